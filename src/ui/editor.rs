//! Rendering of the command line and the schema editor.

use ratatui::layout::Position;
use ratatui::prelude::{Buffer, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::session::InputBuffer;

const PROMPT: &str = "> ";
const SCHEMA_PLACEHOLDER: &str = "Paste a command schema JSON document, or press Ctrl+T for a template";

/// How far to shift the content so that `pos` fits in `extent` cells.
fn scroll_offset(pos: usize, extent: u16) -> usize {
    (pos + 1).saturating_sub(usize::from(extent))
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default().borders(Borders::ALL).border_style(border).title(title)
}

pub struct CommandLine<'a> {
    input: &'a InputBuffer,
    focused: bool,
    busy: bool,
}

impl<'a> CommandLine<'a> {
    pub fn new(input: &'a InputBuffer, focused: bool, busy: bool) -> Self {
        Self { input, focused, busy }
    }

    /// Screen position of the text cursor inside `area`, or `None` when the
    /// box has no room for text.
    pub fn cursor(input: &InputBuffer, area: Rect) -> Option<Position> {
        let inner = pane_block("", true).inner(area);
        if inner.is_empty() {
            return None;
        }
        let (_, col) = input.cursor_position();
        let col = PROMPT.len() + col;
        let visible = col.saturating_sub(scroll_offset(col, inner.width));
        Some(Position::new(inner.x + visible as u16, inner.y))
    }
}

impl Widget for CommandLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.busy { " Command (running...) " } else { " Command " };
        let block = pane_block(title, self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let (_, col) = self.input.cursor_position();
        let offset = scroll_offset(PROMPT.len() + col, inner.width);
        let line = Line::from(vec![
            Span::styled(PROMPT, Style::default().fg(Color::Cyan)),
            Span::raw(self.input.text()),
        ]);
        Paragraph::new(line).scroll((0, offset as u16)).render(inner, buf);
    }
}

pub struct SchemaEditor<'a> {
    input: &'a InputBuffer,
    focused: bool,
}

impl<'a> SchemaEditor<'a> {
    pub fn new(input: &'a InputBuffer, focused: bool) -> Self {
        Self { input, focused }
    }

    pub fn cursor(input: &InputBuffer, area: Rect) -> Option<Position> {
        let inner = pane_block("", true).inner(area);
        if inner.is_empty() {
            return None;
        }
        let (row, col) = input.cursor_position();
        let row = row.saturating_sub(scroll_offset(row, inner.height));
        let col = col.saturating_sub(scroll_offset(col, inner.width));
        Some(Position::new(inner.x + col as u16, inner.y + row as u16))
    }
}

impl Widget for SchemaEditor<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = pane_block(" Schema  Ctrl+S load | Ctrl+T template ", self.focused);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.input.is_empty() && !self.focused {
            let hint = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
            Paragraph::new(Line::styled(SCHEMA_PLACEHOLDER, hint))
                .wrap(ratatui::widgets::Wrap { trim: true })
                .render(inner, buf);
            return;
        }

        let (row, col) = self.input.cursor_position();
        let lines: Vec<Line> = self.input.text().split('\n').map(Line::raw).collect();
        Paragraph::new(lines)
            .scroll((
                scroll_offset(row, inner.height) as u16,
                scroll_offset(col, inner.width) as u16,
            ))
            .render(inner, buf);
    }
}
