//! Rendering of the output log.
//!
//! Lines are wrapped up front with `textwrap` so the number of screen rows
//! is known exactly; the view is then anchored to the bottom, shifted up by
//! the user's scrollback.

use ratatui::prelude::{Buffer, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::session::{LineKind, OutputLog};

pub fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Command => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        LineKind::Success => Style::default().fg(Color::Green),
        LineKind::Error => Style::default().fg(Color::Red),
        LineKind::System => Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    }
}

/// Wrap every log line to `width` columns.
pub fn wrap_log(log: &OutputLog, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    for line in log.lines() {
        let style = line_style(line.kind());
        for text_line in line.text().split('\n') {
            let wrapped = textwrap::wrap(text_line, width);
            if wrapped.is_empty() {
                rows.push(Line::styled(String::new(), style));
            }
            for segment in wrapped {
                rows.push(Line::styled(segment.into_owned(), style));
            }
        }
    }
    rows
}

/// Index of the first visible row.
pub fn first_visible_row(total_rows: usize, height: usize, scroll_back: usize) -> usize {
    let max_scroll = total_rows.saturating_sub(height);
    max_scroll - scroll_back.min(max_scroll)
}

fn log_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(" Output ")
}

/// Largest useful scrollback for `log` drawn into `area`: beyond it the
/// oldest row is already at the top.
pub fn max_scroll_back(log: &OutputLog, area: Rect) -> usize {
    let inner = log_block().inner(area);
    wrap_log(log, inner.width).len().saturating_sub(usize::from(inner.height))
}

pub struct LogView<'a> {
    log: &'a OutputLog,
    scroll_back: usize,
}

impl<'a> LogView<'a> {
    pub fn new(log: &'a OutputLog, scroll_back: usize) -> Self {
        Self { log, scroll_back }
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = log_block();
        let inner = block.inner(area);

        let rows = wrap_log(self.log, inner.width);
        let height = usize::from(inner.height);
        let start = first_visible_row(rows.len(), height, self.scroll_back);
        let end = (start + height).min(rows.len());

        let scrolled = rows.len().saturating_sub(height) - start;
        if scrolled > 0 {
            block = block.title_bottom(format!(" scrolled up {} (Esc: bottom) ", scrolled));
        }
        block.render(area, buf);

        Paragraph::new(rows[start..end].to_vec()).render(inner, buf);
    }
}
