use tui::layout::{Constraint, Layout, Rect, Size};
pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;
pub const LOG_PANE_HEIGHT: u16 = 8;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    /// Navigation links, search box.
    pub header: [Rect; 2],
    pub main: Rect,
    pub logs: Rect,
    pub footer: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, true, false)
    }

    /// `chrome` is false on full screen and on the admin pages.
    pub fn update(&mut self, area: Rect, chrome: bool, show_logs: bool) {
        *self = Self::from_rect(area, chrome, show_logs);
    }

    fn from_rect(area: Rect, chrome: bool, show_logs: bool) -> Self {
        let log_height = if show_logs { LOG_PANE_HEIGHT } else { 0 };

        if !chrome {
            let [main, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(log_height)]).areas(area);
            return LayoutAreas {
                header: [Rect::ZERO, Rect::ZERO],
                main,
                logs,
                footer: Rect::ZERO,
            };
        }

        let [header, main, logs, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(log_height),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

        LayoutAreas {
            header: Self::split_header(header),
            main,
            logs,
            footer,
        }
    }

    fn split_header(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_reserves_header_and_footer() {
        let areas = LayoutAreas::from_rect(Rect::new(0, 0, 100, 40), true, false);
        assert_eq!(areas.header[0].height, HEADER_HEIGHT);
        assert_eq!(areas.footer.height, FOOTER_HEIGHT);
        assert_eq!(areas.main.height, 40 - HEADER_HEIGHT - FOOTER_HEIGHT);
        assert_eq!(areas.logs.height, 0);
    }

    #[test]
    fn no_chrome_gives_main_the_whole_screen() {
        let areas = LayoutAreas::from_rect(Rect::new(0, 0, 100, 40), false, true);
        assert_eq!(areas.header[0], Rect::ZERO);
        assert_eq!(areas.main.height, 40 - LOG_PANE_HEIGHT);
        assert_eq!(areas.logs.height, LOG_PANE_HEIGHT);
    }
}
