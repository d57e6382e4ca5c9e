use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::widgets::Widget;
use std::time::Duration;

/// One full bounce sequence.
pub const BOUNCE_DURATION: Duration = Duration::from_millis(3000);
/// Rest on the ground between sequences.
pub const BOUNCE_DELAY: Duration = Duration::from_millis(500);
/// Interval of the UI animation tick that drives the ball.
pub const TICK: Duration = Duration::from_millis(80);

const DROP_HEIGHT: f64 = 300.0;

/// (progress through the sequence, vertical offset). Offsets are negative
/// above the ground, each bounce lower than the last.
const KEYFRAMES: [(f64, f64); 12] = [
    (0.0, -300.0),
    (0.1, 0.0),
    (0.2, -150.0),
    (0.3, 0.0),
    (0.4, -75.0),
    (0.5, 0.0),
    (0.6, -50.0),
    (0.7, 0.0),
    (0.8, -25.0),
    (0.9, 0.0),
    (0.95, -10.0),
    (1.0, 0.0),
];

const FRAME_COUNT: usize = 4;
const BALL_HEIGHT: u16 = 5;
const BALL_WIDTH: u16 = 9;

fn ball_frame(frame: usize) -> [&'static str; BALL_HEIGHT as usize] {
    const FRAMES: [[&str; BALL_HEIGHT as usize]; FRAME_COUNT] = [
        ["  .---.  ", " /  |  \\ ", "| --+-- |", " \\  |  / ", "  '---'  "],
        ["  .---.  ", " / / \\ \\ ", "| /   \\ |", " \\ \\ / / ", "  '---'  "],
        ["  .---.  ", " /  -  \\ ", "|-- + --|", " \\  -  / ", "  '---'  "],
        ["  .---.  ", " / \\ / \\ ", "| \\   / |", " / / \\ \\ ", "  '---'  "],
    ];
    FRAMES[frame % FRAME_COUNT]
}

/// Height of the ball above the ground as a fraction of the drop height,
/// `elapsed` after the animation started. The sequence repeats forever.
pub fn bounce_height(elapsed: Duration) -> f64 {
    let period = (BOUNCE_DURATION + BOUNCE_DELAY).as_secs_f64();
    let t = elapsed.as_secs_f64() % period;
    let progress = t / BOUNCE_DURATION.as_secs_f64();
    if progress >= 1.0 {
        return 0.0;
    }

    let offset = KEYFRAMES
        .windows(2)
        .find(|w| progress >= w[0].0 && progress < w[1].0)
        .map(|w| {
            let (t0, y0) = w[0];
            let (t1, y1) = w[1];
            y0 + (y1 - y0) * (progress - t0) / (t1 - t0)
        })
        .unwrap_or(0.0);

    (-offset / DROP_HEIGHT).clamp(0.0, 1.0)
}

pub fn elapsed_for_tick(tick: u64) -> Duration {
    TICK.saturating_mul(u32::try_from(tick).unwrap_or(u32::MAX))
}

pub struct BouncingBall {
    pub tick: u64,
}

impl Widget for BouncingBall {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < BALL_WIDTH || area.height < BALL_HEIGHT + 1 {
            return;
        }

        let ground = area.y + area.height - 1;
        let travel = area.height - BALL_HEIGHT - 1;
        let height = bounce_height(elapsed_for_tick(self.tick));
        let lift = (f64::from(travel) * height).round() as u16;
        let top = ground - BALL_HEIGHT - lift;
        let x = area.x + (area.width - BALL_WIDTH) / 2;

        // The ball only spins while airborne.
        let frame = if lift == 0 { 0 } else { (self.tick / 2) as usize };
        let ball_style = Style::default().fg(Color::Rgb(255, 103, 31));
        for (row, text) in ball_frame(frame).iter().enumerate() {
            buf.set_string(x, top + row as u16, text, ball_style);
        }

        let floor = "─".repeat(area.width as usize);
        buf.set_string(area.x, ground, floor, Style::default().fg(Color::Indexed(240)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> f64 {
        bounce_height(Duration::from_millis(ms))
    }

    #[test]
    fn starts_at_the_top_and_lands() {
        assert!((at(0) - 1.0).abs() < 1e-9);
        assert!(at(300) < 1e-9);
        assert!((at(600) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn interpolates_between_keyframes() {
        // Halfway through the first drop.
        assert!((at(150) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn rests_during_the_delay_then_repeats() {
        assert_eq!(at(3000), 0.0);
        assert_eq!(at(3400), 0.0);
        assert!((at(3500) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bounces_decay() {
        let peaks: Vec<f64> = [600, 1200, 1800, 2400, 2850].iter().map(|ms| at(*ms)).collect();
        assert!(peaks.windows(2).all(|w| w[0] > w[1]), "{peaks:?}");
    }

    #[test]
    fn ticks_map_to_elapsed_time() {
        assert_eq!(elapsed_for_tick(0), Duration::ZERO);
        assert_eq!(elapsed_for_tick(25), Duration::from_secs(2));
    }

    #[test]
    fn renders_on_the_ground_at_rest() {
        let area = Rect::new(0, 0, 20, 12);
        let mut buf = Buffer::empty(area);
        // 3.2s in: inside the rest delay.
        BouncingBall { tick: 40 }.render(area, &mut buf);
        assert_eq!(buf[(0, 11)].symbol(), "─");
        assert_eq!(buf[(7, 6)].symbol(), ".");
    }

    #[test]
    fn tiny_areas_are_left_blank() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        BouncingBall { tick: 0 }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }
}
