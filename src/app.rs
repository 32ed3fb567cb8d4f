//! Application state management.
//!
//! This module defines the main App struct that owns the console session,
//! the engine handle and the UI state (focused pane, scrollback). It runs
//! the event loop and hands engine calls to the blocking pool so a slow
//! engine never freezes the screen.

use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::engine::{Engine, EngineRequest};
use crate::event::{console as console_event, schema as schema_event};
use crate::event::{init_app_eventsource, init_user_event, AppEvent, UserEvent};
use crate::session::Session;

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    /// The command line below the output log
    Console,
    /// The schema editor on the right
    Schema,
}

pub struct App {
    // backend
    session: Session,                       // History, output log and both editors
    engine: Option<Arc<dyn Engine>>,        // None until an engine is configured and spawned
    engine_task: Option<JoinHandle<()>>,    // Blocking-pool task of the request in flight

    // App State
    active_pane: ActivePane,
    scroll_back: usize,   // Rows scrolled up from the bottom of the log
    scroll_limit: usize,  // Upper bound for scroll_back at the last drawn size
    exit: bool,           // Set by Ctrl+C / Ctrl+Q, checked once per loop turn

    // events sources
    app_event_tx: UnboundedSender<AppEvent>,    // Cloned into each engine task
    app_events: UnboundedReceiver<AppEvent>,    // Engine replies, drained by the main loop
}

impl App {
    pub fn new(session: Session, engine: Option<Arc<dyn Engine>>) -> Self {
        let (app_event_tx, app_events) = init_app_eventsource();
        Self {
            session,
            engine,
            engine_task: None,
            active_pane: ActivePane::Console,
            scroll_back: 0,
            scroll_limit: 0,
            exit: false,
            app_event_tx,
            app_events,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn engine_name(&self) -> Option<&str> {
        self.engine.as_deref().map(|engine| engine.name())
    }

    pub fn get_active_pane(&self) -> ActivePane {
        self.active_pane
    }

    pub fn toggle_pane(&mut self) {
        self.active_pane = match self.active_pane {
            ActivePane::Console => ActivePane::Schema,
            ActivePane::Schema => ActivePane::Console,
        };
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut user_events = init_user_event();
        loop {
            if self.exit {
                self.stop_engine_call();
                break Ok(());
            }
            tokio::select! {
                res = user_events.recv() => {
                    let usr_evt = res.with_context(|| anyhow::anyhow!("User event stream is ended."))?;
                    self.handle_user_event(usr_evt?);
                }
                res = self.app_events.recv() => {
                    let app_evt = res.with_context(|| anyhow::anyhow!("App event stream is ended"))?;
                    self.handle_app_event(app_evt);
                }
            }
            self.draw(terminal)?;
        }
    }

    pub fn draw(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let size = terminal.size()?;
        self.update_scroll_limit(Rect::new(0, 0, size.width, size.height));

        let app = &*self;
        terminal.draw(|frame| {
            let area = frame.area();
            frame.render_widget(app, area);
            if let Some(position) = crate::ui::cursor_position(app, area) {
                frame.set_cursor_position(position);
            }
        })?;
        Ok(())
    }

    /// Send a request to the engine on the blocking pool.
    /// The reply comes back as [`AppEvent::EngineReply`].
    fn dispatch(&mut self, request: EngineRequest) {
        let Some(engine) = self.engine.clone() else {
            return;
        };
        debug!("Dispatching {}", request.op_name());

        let tx = self.app_event_tx.clone();
        self.engine_task = Some(tokio::task::spawn_blocking(move || {
            let result = request.dispatch(engine.as_ref());
            if let Err(e) = tx.send(AppEvent::EngineReply { request, result }) {
                error!("Failed to deliver engine reply: {}", e);
            }
        }));
    }

    /// Recompute how far the log can scroll for a screen of `area`, and pull
    /// the current scrollback inside that bound.
    pub fn update_scroll_limit(&mut self, area: Rect) {
        self.scroll_limit = crate::ui::log_scroll_limit(self, area);
        self.scroll_back = self.scroll_back.min(self.scroll_limit);
    }

    /// Stop the engine if a request is still running. Runtime shutdown waits
    /// for every blocking task, including one stuck inside the engine.
    fn stop_engine_call(&mut self) {
        let Some(task) = self.engine_task.take() else {
            return;
        };
        if task.is_finished() {
            return;
        }
        if let Some(engine) = &self.engine {
            warn!("Exiting with an engine call in flight, stopping engine '{}'", engine.name());
            engine.shutdown();
        }
    }

    /// Run `f` and snap the log back to the bottom if it grew.
    fn with_autoscroll<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let before = self.session.log().len();
        let result = f(self);
        if self.session.log().len() != before {
            self.scroll_back = 0;
        }
        result
    }
}

impl App {
    pub fn handle_user_event(&mut self, event: UserEvent) {
        let UserEvent::Key(key_evt) = event else {
            return;
        };
        if !matches!(key_evt.kind, KeyEventKind::Press) {
            return;
        }

        let ctrl = key_evt.modifiers.contains(KeyModifiers::CONTROL);
        match key_evt.code {
            // Ctrl + C / Ctrl + Q => exit
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('q') | KeyCode::Char('Q') if ctrl => {
                self.exit = true;
                return;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_pane();
                return;
            }
            // Ctrl + R => list history in the log
            KeyCode::Char('r') | KeyCode::Char('R') if ctrl => {
                self.with_autoscroll(|app| app.session.show_history());
                return;
            }
            KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(10).min(self.scroll_limit);
                return;
            }
            KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(10);
                return;
            }
            KeyCode::Esc => {
                self.scroll_back = 0;
                return;
            }
            _ => {}
        }

        let engine_available = self.engine.is_some();
        let request = self.with_autoscroll(|app| match app.active_pane {
            ActivePane::Console => console_event::handle_key_event(&mut app.session, engine_available, key_evt),
            ActivePane::Schema => schema_event::handle_key_event(&mut app.session, engine_available, key_evt),
        });
        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::EngineReply { request, result } => {
                self.engine_task = None;
                self.with_autoscroll(|app| app.session.finish(request, result));
            }
        }
    }
}
