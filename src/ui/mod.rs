//! User interface module for the TUI application.
//!
//! The screen is split into the output log with the command line below it,
//! the schema editor on the right and a one-line status bar at the bottom.

use ratatui::layout::Position;
use ratatui::prelude::{Buffer, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::{ActivePane, App};

pub mod editor;
pub mod layout;
pub mod output;

use editor::{CommandLine, SchemaEditor};
use layout::AppLayout;
use output::LogView;

fn outer_block(app: &App) -> Block<'static> {
    let title = match app.get_active_pane() {
        ActivePane::Console => " repl-console [CONSOLE] ",
        ActivePane::Schema => " repl-console [SCHEMA] ",
    };
    Block::new().borders(Borders::TOP).title(Line::from(title.bold()))
}

fn status_line(app: &App) -> Line<'static> {
    let session = app.session();
    let stats = session.stats();
    let history = session.history();

    let engine = match app.engine_name() {
        Some(name) => Span::styled(format!(" engine: {} ", name), Style::default().fg(Color::Green)),
        None => Span::styled(" engine: none ", Style::default().fg(Color::Red)),
    };
    let mut spans = vec![
        engine,
        Span::raw(format!("| history {}/{} ", history.len(), history.capacity())),
    ];
    if history.is_browsing() {
        spans.push(Span::styled("| browsing ", Style::default().fg(Color::Cyan)));
    }
    spans.push(Span::raw(format!(
        "| ok {}  err {}  fault {} ",
        stats.succeeded, stats.failed, stats.faults
    )));
    if session.is_busy() {
        spans.push(Span::styled("| BUSY ", Style::default().fg(Color::Yellow).bold()));
    }
    spans.push(Span::styled(
        "| Tab: pane  Ctrl+R: history  PgUp/PgDn: scroll  Ctrl+C: quit",
        Style::default().fg(Color::DarkGray),
    ));
    Line::from(spans)
}

/// How far the output log can scroll back when the app fills `area`.
pub fn log_scroll_limit(app: &App, area: Rect) -> usize {
    let layout = AppLayout::build(outer_block(app).inner(area));
    output::max_scroll_back(app.session().log(), layout.log)
}

/// Where the terminal cursor belongs for the focused pane.
pub fn cursor_position(app: &App, area: Rect) -> Option<Position> {
    let inner = outer_block(app).inner(area);
    if inner.width < 3 || inner.height < 3 {
        return None;
    }
    let layout = AppLayout::build(inner);
    let session = app.session();
    match app.get_active_pane() {
        ActivePane::Console => CommandLine::cursor(session.command_input(), layout.input),
        ActivePane::Schema => SchemaEditor::cursor(session.schema_input(), layout.schema),
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let outer_block = outer_block(self);
        let inner_area = outer_block.inner(area);
        outer_block.render(area, buf);

        let layout = AppLayout::build(inner_area);
        let session = self.session();
        let pane = self.get_active_pane();

        LogView::new(session.log(), self.scroll_back()).render(layout.log, buf);
        CommandLine::new(session.command_input(), pane == ActivePane::Console, session.is_busy())
            .render(layout.input, buf);
        SchemaEditor::new(session.schema_input(), pane == ActivePane::Schema).render(layout.schema, buf);
        Paragraph::new(status_line(self)).render(layout.status, buf);
    }
}
