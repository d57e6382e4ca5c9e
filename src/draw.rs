use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::bouncing_ball::BouncingBall;
use crate::components::points_chart::PointsChart;
use crate::state::app_state::{AdminTab, UPCOMING_COLLAPSED_COUNT};
use crate::state::forms::{Form, SubmitStatus};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::route::{NAV_LINKS, Route};
use crate::ui::layout::LayoutAreas;
use athletrack_api::{Match, MatchAggregate, Side, Tournament};
use log::error;

const BRAND: Color = Color::Rgb(0, 122, 195);
const ACCENT: Color = Color::Rgb(255, 103, 31);
const SEARCH_RESULTS_MAX: u16 = 8;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        let chrome = app.state.route.shows_chrome() && !app.settings.full_screen;
        layout.update(f.area(), chrome, app.state.show_logs);

        if chrome {
            draw_header(f, layout.header, app);
            draw_footer(f, layout.footer, &app.state.route);
        }

        match app.state.route.clone() {
            Route::Home => draw_home(f, layout.main, app),
            Route::Events => draw_events(f, layout.main, app),
            Route::Upcoming => draw_upcoming(f, layout.main, app),
            Route::About => draw_about(f, layout.main, app),
            Route::MatchCards => draw_match_cards(f, layout.main, app),
            Route::MatchDetails { .. } => draw_match_details(f, layout.main, app),
            Route::Register => draw_register(f, layout.main, app),
            Route::RegisterTeam { .. } => draw_registration_form(f, layout.main, app),
            Route::AdminLogin => draw_login(f, layout.main, app, " Admin Login "),
            Route::SuperAdminLogin => draw_login(f, layout.main, app, " Super Admin Login "),
            Route::Admin => draw_admin(f, layout.main, app),
            Route::SuperAdmin => draw_super_admin(f, layout.main, app),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
        if chrome && app.state.search.dropdown_open() {
            draw_search_results(f, layout.header[1], layout.main, app);
        }
        if let Some(prompt) = app.state.path_prompt.as_deref() {
            draw_path_prompt(f, f.area(), prompt);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn selected_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn marker(selected: bool) -> &'static str {
    if selected { "> " } else { "  " }
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn label_line<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![Span::styled(label, Style::default().fg(Color::Gray)), Span::raw(value)])
}

fn npr(amount: u64) -> String {
    format!("NPR {amount}")
}

/// Local calendar day of a tournament start.
fn local_day(tournament: &Tournament) -> String {
    tournament
        .start_date
        .map(|d| d.with_timezone(&chrono::Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "TBA".to_string())
}

// ---------------------------------------------------------------------------
// Chrome
// ---------------------------------------------------------------------------

fn draw_header(f: &mut Frame, header: [Rect; 2], app: &App) {
    let border_type = BorderType::Rounded;
    let active = NAV_LINKS.iter().position(|(route, _)| *route == app.state.route);

    let titles: Vec<Line> = NAV_LINKS.iter().map(|(_, label)| Line::from(*label)).collect();
    let highlight = if active.is_some() {
        Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    } else {
        Style::default()
    };
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type)
                .title(Span::styled(" AthleTrack ", Style::default().fg(BRAND).add_modifier(Modifier::BOLD))),
        )
        .highlight_style(highlight)
        .select(active.unwrap_or(0))
        .style(Style::default().fg(Color::White));
    f.render_widget(tabs, header[0]);

    let search = &app.state.search;
    let (text, style) = if search.focused {
        (format!("{}_", search.query), Style::default().fg(Color::Yellow))
    } else if search.query.is_empty() {
        ("/ Search tournaments".to_string(), dim())
    } else {
        (search.query.clone(), Style::default().fg(Color::White))
    };
    let search_box = Paragraph::new(text)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        );
    f.render_widget(search_box, header[1]);
}

fn draw_search_results(f: &mut Frame, search_area: Rect, main: Rect, app: &App) {
    let search = &app.state.search;
    let matches = search.matches();
    let rows = (matches.len().max(1) as u16).min(SEARCH_RESULTS_MAX);
    let area = Rect::new(search_area.x, main.y, search_area.width, (rows + 2).min(main.height));

    f.render_widget(Clear, area);
    let block = default_border(Color::Yellow);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if matches.is_empty() {
        f.render_widget(Paragraph::new("No tournaments found").style(dim()), inner);
        return;
    }

    let skip = search.highlighted.saturating_sub(inner.height.saturating_sub(1) as usize);
    let lines: Vec<Line> = matches
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(idx, t)| {
            let selected = idx == search.highlighted;
            Line::from(Span::styled(format!("{}{}", marker(selected), t.name), selected_style(selected)))
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(f: &mut Frame, area: Rect, route: &Route) {
    let [location, hints] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).areas(area);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(route.title(), Style::default().fg(BRAND)),
            Span::styled(format!("  {}", route.path()), dim()),
        ])),
        location,
    );
    f.render_widget(
        Paragraph::new("q quit  1-4 pages  c matches  r register  / search  : go to path  \" logs  f full screen")
            .style(dim())
            .alignment(Alignment::Right),
        hints,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Green))
        .output_separator(' ')
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logs, area);
}

fn draw_path_prompt(f: &mut Frame, area: Rect, prompt: &str) {
    let width = area.width.saturating_sub(4).min(60);
    let prompt_area = Rect::new(area.x + (area.width - width) / 2, area.height / 2, width, 3);
    f.render_widget(Clear, prompt_area);
    f.render_widget(
        Paragraph::new(format!(":{prompt}_"))
            .style(Style::default().fg(Color::Yellow))
            .block(default_border(Color::Yellow).title(" Go to path ")),
        prompt_area,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(msg).style(dim()).alignment(Alignment::Center), inner);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen || !app.state.route.shows_chrome() {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(3), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

// ---------------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------------

fn draw_home(f: &mut Frame, area: Rect, app: &App) {
    let Some(tournaments) = app.state.tournaments.as_ref() else {
        draw_placeholder(f, area, "Loading tournaments...");
        return;
    };
    let Some(tournament) = tournaments.first() else {
        draw_placeholder(f, area, "No tournament data available");
        return;
    };

    let block = default_border(BRAND).title(format!(" {} ", tournament.name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [details, ball] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(24)]).areas(inner);

    let pool = &tournament.prize_pool;
    let mut lines = vec![
        Line::from(Span::styled(
            tournament.name.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        label_line("Organized by ", tournament.organizer.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Prize Pool: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(npr(pool.total()), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw("  1st "),
            Span::styled(npr(pool.first), Style::default().fg(Color::Yellow)),
            Span::raw("   2nd "),
            Span::styled(npr(pool.second), Style::default().fg(Color::Gray)),
            Span::raw("   3rd "),
            Span::styled(npr(pool.third), Style::default().fg(Color::Rgb(210, 180, 140))),
        ]),
        Line::from(vec![
            Span::raw("  MVP "),
            Span::styled(npr(pool.mvp), Style::default().fg(ACCENT)),
        ]),
        label_line("Entry fee: ", npr(pool.entry_fee)),
        Line::from(""),
        label_line("Location: ", tournament.location.clone()),
        label_line("Starts: ", local_day(tournament)),
    ];
    if let Some(url) = app.poster_url(tournament) {
        lines.push(label_line("Poster: ", url));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Register your team",
        Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), details);
    f.render_widget(BouncingBall { tick: app.state.animation.tick }, ball);
}

fn draw_events(f: &mut Frame, area: Rect, app: &App) {
    let Some(tournament) = app.events_tournament() else {
        let msg = if app.state.tournaments.is_some() {
            "No tournament data available"
        } else {
            "Loading tournaments..."
        };
        draw_placeholder(f, area, msg);
        return;
    };

    let [info_area, matches_area] =
        Layout::vertical([Constraint::Length(7), Constraint::Fill(1)]).areas(area);

    let info = vec![
        Line::from(Span::styled(
            tournament.name.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        label_line("Organized by ", tournament.organizer.clone()),
        label_line("Location: ", tournament.location.clone()),
        label_line("Starts: ", local_day(tournament)),
        label_line("Prize pool: ", npr(tournament.prize_pool.total())),
    ];
    f.render_widget(
        Paragraph::new(info).block(default_border(BRAND).title(" Event ")),
        info_area,
    );

    let block = default_border(Color::White).title(" Matches ");
    let inner = block.inner(matches_area);
    f.render_widget(block, matches_area);

    if app.state.matches.is_none() {
        f.render_widget(Paragraph::new("Loading matches...").style(dim()), inner);
        return;
    }
    let matches = app.events_matches();
    if matches.is_empty() {
        f.render_widget(Paragraph::new("No matches scheduled yet").style(dim()), inner);
        return;
    }

    let lines = match_lines(matches.into_iter(), app.state.events_cursor.selected, inner.height);
    f.render_widget(Paragraph::new(lines), inner);
}

fn match_lines<'a>(
    matches: impl Iterator<Item = &'a Match>,
    selected: usize,
    height: u16,
) -> Vec<Line<'a>> {
    let skip = selected.saturating_sub(height.saturating_sub(1) as usize);
    matches
        .enumerate()
        .skip(skip)
        .map(|(idx, m)| {
            let is_selected = idx == selected;
            Line::from(Span::styled(
                format!("{}{} vs {}", marker(is_selected), m.team_1.name, m.team_2.name),
                selected_style(is_selected),
            ))
        })
        .collect()
}

fn draw_upcoming(f: &mut Frame, area: Rect, app: &App) {
    let upcoming = &app.state.upcoming;
    let tournaments = match app.state.tournaments.as_ref() {
        Some(t) if !upcoming.is_warming_up() => t,
        _ => {
            draw_placeholder(f, area, "Loading upcoming events...");
            return;
        }
    };
    if tournaments.is_empty() {
        draw_placeholder(f, area, "No upcoming events");
        return;
    }

    let block = default_border(Color::White).title(" Upcoming Events ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let visible = upcoming.visible_count(tournaments.len());
    let [cards_area, toggle_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);

    const CARD_HEIGHT: u16 = 6;
    let per_page = (cards_area.height / CARD_HEIGHT).max(1) as usize;
    let selected = upcoming.cursor.selected;
    let first = selected.saturating_sub(per_page - 1);

    for (slot, (idx, t)) in tournaments
        .iter()
        .enumerate()
        .take(visible)
        .skip(first)
        .take(per_page)
        .enumerate()
    {
        let card = Rect::new(
            cards_area.x,
            cards_area.y + slot as u16 * CARD_HEIGHT,
            cards_area.width,
            CARD_HEIGHT.min(cards_area.height),
        );
        draw_event_card(f, card, t, idx == selected);
    }

    if tournaments.len() > UPCOMING_COLLAPSED_COUNT {
        let label = if upcoming.show_all { "[m] Show less" } else { "[m] Show more" };
        f.render_widget(
            Paragraph::new(label).style(Style::default().fg(ACCENT)).alignment(Alignment::Center),
            toggle_area,
        );
    }
}

fn draw_event_card(f: &mut Frame, area: Rect, t: &Tournament, selected: bool) {
    let mut title = vec![Span::styled(
        format!(" {} ", t.display_name()),
        selected_style(selected),
    )];
    if t.featured {
        title.push(Span::styled(" FEATURED ", Style::default().fg(Color::Black).bg(Color::Yellow)));
    }
    let block = default_border(if selected { Color::Yellow } else { Color::DarkGray }).title(Line::from(title));

    let lines = vec![
        Line::from(vec![
            Span::styled(t.start_day(), Style::default().fg(Color::Gray)),
            Span::raw("  "),
            Span::raw(t.location.clone()),
            Span::raw("  "),
            Span::styled(t.category_label().to_string(), Style::default().fg(BRAND)),
        ]),
        label_line("Prize pool: ", npr(t.prize_pool.total())),
        label_line("Entry fee: ", npr(t.prize_pool.entry_fee)),
        Line::from(Span::styled(
            if selected { "[Enter] Register" } else { "" },
            Style::default().fg(ACCENT),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

const ABOUT_TEXT: &str = "AthleTrack is a home for community basketball tournaments.

Organizers publish their events with prize pools, entry fees and venues. Teams browse what is coming up and register straight from the event page with their coach and roster.

On game day every match gets a live box score: points, assists and rebounds for each player, team totals derived from those lines, and a chart of who carried the scoring.

Administrators review registered teams and matches from the admin dashboard.";

fn draw_about(f: &mut Frame, area: Rect, app: &mut App) {
    let block = default_border(Color::White).title(" About Us ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let paragraph = Paragraph::new(ABOUT_TEXT).wrap(Wrap { trim: false });
    let max_scroll = (paragraph.line_count(inner.width) as u16).saturating_sub(inner.height);
    app.state.about_scroll = app.state.about_scroll.min(max_scroll);
    f.render_widget(paragraph.scroll((app.state.about_scroll, 0)), inner);
}

fn draw_match_cards(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Matches ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(matches) = app.state.matches.as_ref() else {
        f.render_widget(Paragraph::new("Loading matches...").style(dim()), inner);
        return;
    };
    if matches.is_empty() {
        f.render_widget(Paragraph::new("No matches yet").style(dim()), inner);
        return;
    }

    const CARD_HEIGHT: u16 = 4;
    let per_page = (inner.height / CARD_HEIGHT).max(1) as usize;
    let selected = app.state.cards_cursor.selected;
    let first = selected.saturating_sub(per_page - 1);

    for (slot, (idx, m)) in matches.iter().enumerate().skip(first).take(per_page).enumerate() {
        let card = Rect::new(
            inner.x,
            inner.y + slot as u16 * CARD_HEIGHT,
            inner.width,
            CARD_HEIGHT.min(inner.height),
        );
        let is_selected = idx == selected;
        let lines = vec![
            Line::from(vec![
                Span::styled(m.team_1.name.clone(), Style::default().fg(BRAND).add_modifier(Modifier::BOLD)),
                Span::raw("  vs  "),
                Span::styled(m.team_2.name.clone(), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(format!("{} stat lines", m.player_stats.len()), dim())),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .block(default_border(if is_selected { Color::Yellow } else { Color::DarkGray })),
            card,
        );
    }
}

fn draw_match_details(f: &mut Frame, area: Rect, app: &App) {
    let Some(aggregate) = app.state.match_view.aggregate.as_ref() else {
        draw_placeholder(f, area, "Loading match details...");
        return;
    };

    let [score_area, tables_area, chart_area] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    draw_score_header(f, score_area, app, aggregate);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(tables_area);
    let offset = app.state.match_view.scroll_offset as usize;
    draw_player_table(f, left, aggregate, Side::First, offset);
    draw_player_table(f, right, aggregate, Side::Second, offset);

    f.render_widget(
        PointsChart {
            aggregate,
            block: Some(default_border(Color::DarkGray).title(" Graphical Stats: points ")),
        },
        chart_area,
    );
}

fn draw_score_header(f: &mut Frame, area: Rect, app: &App, aggregate: &MatchAggregate) {
    let block = default_border(Color::White).title(" Match Details ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let team = |side: Side, color: Color| {
        let score = aggregate.team(side);
        vec![
            Line::from(Span::styled(score.name.clone(), Style::default().fg(color).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(
                score.score.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(app.logo_url(score.logo.as_deref()).unwrap_or_default(), dim())),
        ]
    };

    let [left, mid, right] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .areas(inner);
    f.render_widget(Paragraph::new(team(Side::First, BRAND)).alignment(Alignment::Center), left);
    f.render_widget(Paragraph::new("\nvs").alignment(Alignment::Center), mid);
    f.render_widget(Paragraph::new(team(Side::Second, ACCENT)).alignment(Alignment::Center), right);
}

fn draw_player_table(f: &mut Frame, area: Rect, aggregate: &MatchAggregate, side: Side, offset: usize) {
    let title = format!(" {} ", aggregate.team(side).name);
    let rows: Vec<Row> = aggregate
        .players_for(side)
        .skip(offset)
        .map(|line| {
            Row::new(vec![
                Cell::from(line.player_name.clone()),
                Cell::from(line.points.to_string()),
                Cell::from(line.assists.to_string()),
                Cell::from(line.rebounds.to_string()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Fill(1), Constraint::Length(4), Constraint::Length(4), Constraint::Length(4)],
    )
    .header(
        Row::new(vec!["Player", "PTS", "AST", "REB"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    )
    .block(default_border(Color::DarkGray).title(title));
    f.render_widget(table, area);
}

fn draw_register(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Register: choose a tournament ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(tournaments) = app.state.tournaments.as_ref() else {
        f.render_widget(Paragraph::new("Loading tournaments...").style(dim()), inner);
        return;
    };
    if tournaments.is_empty() {
        f.render_widget(Paragraph::new("No tournament data available").style(dim()), inner);
        return;
    }

    let selected = app.state.register_cursor.selected;
    let lines: Vec<Line> = tournaments
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            let is_selected = idx == selected;
            Line::from(vec![
                Span::styled(format!("{}{}", marker(is_selected), t.name), selected_style(is_selected)),
                Span::styled(format!("  {}  {}", t.location, t.start_day()), dim()),
            ])
        })
        .collect();
    let scroll = selected.saturating_sub(inner.height.saturating_sub(1) as usize) as u16;
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn form_lines(form: &Form, active: bool) -> Vec<Line<'_>> {
    form.fields
        .iter()
        .enumerate()
        .flat_map(|(idx, field)| {
            let focused = active && idx == form.focused;
            let cursor = if focused { "_" } else { "" };
            [
                Line::from(Span::styled(field.label, selected_style(focused))),
                Line::from(format!("  {}{cursor}", field.display_value())),
                Line::from(""),
            ]
        })
        .collect()
}

fn draw_registration_form(f: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.registration.as_ref() else {
        draw_placeholder(f, area, "No tournament selected");
        return;
    };
    let tournament_name = app
        .registration_tournament()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| form.tournament_id.clone());

    let block = default_border(BRAND).title(format!(" Register for {tournament_name} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = form_lines(&form.form, true);
    match form.status {
        SubmitStatus::Editing => lines.push(Line::from(Span::styled(
            "[Enter] Submit   [Tab] Next field   [Esc] Back",
            dim(),
        ))),
        SubmitStatus::Submitting => {
            lines.push(Line::from(Span::styled("Submitting...", Style::default().fg(Color::Yellow))))
        }
        SubmitStatus::Submitted => lines.push(Line::from(Span::styled(
            "Team registered! You can register another team.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))),
    }
    for err in &form.errors {
        lines.push(Line::from(Span::styled(err.as_str(), Style::default().fg(Color::Red))));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Admin pages
// ---------------------------------------------------------------------------

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(area.x + (area.width - w) / 2, area.y + (area.height - h) / 2, w, h)
}

fn draw_login(f: &mut Frame, area: Rect, app: &App, title: &str) {
    let login = match app.state.route {
        Route::SuperAdminLogin => &app.state.super_admin.login,
        _ => &app.state.admin.login,
    };
    let card = centered(area, 50, 11);
    let block = default_border(BRAND).title(title.to_string());
    let inner = block.inner(card);
    f.render_widget(block, card);

    let mut lines = form_lines(&login.form, true);
    match login.error.as_deref() {
        Some(err) => lines.push(Line::from(Span::styled(err, Style::default().fg(Color::Red)))),
        None => lines.push(Line::from(Span::styled("[Enter] Log in   [Esc] Back", dim()))),
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_admin(f: &mut Frame, area: Rect, app: &App) {
    let admin = &app.state.admin;
    let [tabs_area, body, hint] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let tab_index = match admin.tab {
        AdminTab::Teams => 0,
        AdminTab::Matches => 1,
    };
    f.render_widget(
        Tabs::new(vec![Line::from("Teams"), Line::from("Matches")])
            .block(default_border(BRAND).title(" Admin Dashboard "))
            .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::UNDERLINED))
            .select(tab_index),
        tabs_area,
    );
    f.render_widget(
        Paragraph::new("[Tab] switch  [j/k] move  [Enter] open  [x] log out  [q] quit").style(dim()),
        hint,
    );

    match admin.tab {
        AdminTab::Teams => draw_admin_teams(f, body, app),
        AdminTab::Matches => {
            let block = default_border(Color::White).title(" Matches ");
            let inner = block.inner(body);
            f.render_widget(block, body);
            match app.state.matches.as_ref() {
                None => f.render_widget(Paragraph::new("Loading matches...").style(dim()), inner),
                Some(m) if m.is_empty() => f.render_widget(Paragraph::new("No matches").style(dim()), inner),
                Some(m) => {
                    let lines = match_lines(m.iter(), admin.cursor.selected, inner.height);
                    f.render_widget(Paragraph::new(lines), inner);
                }
            }
        }
    }
}

fn draw_admin_teams(f: &mut Frame, area: Rect, app: &App) {
    let admin = &app.state.admin;
    let Some(teams) = app.state.teams.as_ref() else {
        draw_placeholder(f, area, "Loading teams...");
        return;
    };

    let selected = admin.cursor.selected;
    let mut rows = Vec::with_capacity(teams.len());
    for (idx, team) in teams.iter().enumerate() {
        rows.push(
            Row::new(vec![
                Cell::from(format!("{}{}", marker(idx == selected), team.name)),
                Cell::from(team.origin.clone()),
                Cell::from(team.coach.name.clone()),
                Cell::from(team.coach.phone_number.clone()),
            ])
            .style(selected_style(idx == selected)),
        );
        if admin.expanded_team.as_deref() == Some(team.id.as_str()) {
            let logo = app.logo_url(team.logo.as_deref()).unwrap_or_else(|| "no logo".to_string());
            rows.push(
                Row::new(vec![Cell::from(format!("    id {}  logo {logo}", team.id))]).style(dim()),
            );
        }
    }

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
        ],
    )
    .header(
        Row::new(vec!["Team", "Origin", "Coach", "Contact"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    )
    .block(default_border(Color::White).title(format!(" Teams ({}) ", teams.len())));
    f.render_widget(table, area);
}

fn draw_super_admin(f: &mut Frame, area: Rect, app: &App) {
    let Some(tournaments) = app.state.tournaments.as_ref() else {
        draw_placeholder(f, area, "Loading tournaments...");
        return;
    };

    let selected = app.state.super_admin.cursor.selected;
    let rows: Vec<Row> = tournaments
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            Row::new(vec![
                Cell::from(format!("{}{}", marker(idx == selected), t.name)),
                Cell::from(t.organizer.clone()),
                Cell::from(t.location.clone()),
                Cell::from(t.start_day()),
                Cell::from(npr(t.prize_pool.total())),
            ])
            .style(selected_style(idx == selected))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Length(12),
            Constraint::Fill(1),
        ],
    )
    .header(
        Row::new(vec!["Tournament", "Organizer", "Location", "Starts", "Prize pool"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
    )
    .block(default_border(BRAND).title(" Super Admin: tournaments  [x] log out "));
    f.render_widget(table, area);
}
