use athletrack_api::{MatchAggregate, Side};
use tui::buffer::Buffer;
use tui::layout::{Direction, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::Line;
use tui::widgets::{Bar, BarChart, BarGroup, Block, Widget};

/// Points-per-player bar chart for the match view.
pub struct PointsChart<'a> {
    pub aggregate: &'a MatchAggregate,
    pub block: Option<Block<'a>>,
}

/// One bar per stat line, in stat-list order.
pub fn point_bars(aggregate: &MatchAggregate) -> Vec<(String, u64, Option<Side>)> {
    aggregate
        .player_stats
        .iter()
        .map(|line| (line.player_name.clone(), u64::from(line.points), line.side))
        .collect()
}

fn side_color(side: Option<Side>) -> Color {
    match side {
        Some(Side::First) => Color::Rgb(0, 122, 195),
        Some(Side::Second) => Color::Rgb(255, 103, 31),
        None => Color::DarkGray,
    }
}

impl Widget for PointsChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bars: Vec<Bar> = point_bars(self.aggregate)
            .into_iter()
            .map(|(name, points, side)| {
                Bar::default()
                    .label(Line::from(name))
                    .value(points)
                    .text_value(points.to_string())
                    .style(Style::default().fg(side_color(side)))
                    .value_style(
                        Style::default()
                            .fg(Color::Black)
                            .bg(side_color(side))
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect();

        let mut chart = BarChart::default()
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .data(BarGroup::default().bars(&bars));
        if let Some(block) = self.block {
            chart = chart.block(block);
        }
        chart.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use athletrack_api::PlayerStatLine;

    #[test]
    fn bars_follow_stat_order() {
        let aggregate = MatchAggregate {
            player_stats: vec![
                PlayerStatLine { player_name: "Ram".into(), points: 12, side: Some(Side::First), ..Default::default() },
                PlayerStatLine { player_name: "Hari".into(), points: 3, side: None, ..Default::default() },
            ],
            ..Default::default()
        };
        let bars = point_bars(&aggregate);
        assert_eq!(
            bars,
            vec![("Ram".to_string(), 12, Some(Side::First)), ("Hari".to_string(), 3, None)]
        );
    }
}
