use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas of the console, computed from the full frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub log: Rect,
    pub input: Rect,
    pub schema: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Height of the bordered command line.
    const INPUT_HEIGHT: u16 = 3;

    pub fn build(area: Rect) -> Self {
        let [main, status] = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
        let [left, schema] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(main);
        let [log, input] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(Self::INPUT_HEIGHT)]).areas(left);

        Self {
            log,
            input,
            schema,
            status,
        }
    }
}
