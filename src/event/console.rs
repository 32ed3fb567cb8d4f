//! Key event handling for the command line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::EngineRequest;
use crate::session::Session;

/// Handle key events when the command line is focused.
///
/// Returns the engine request to dispatch when Enter submits a command.
pub fn handle_key_event(
    session: &mut Session,
    engine_available: bool,
    key_evt: KeyEvent,
) -> Option<EngineRequest> {
    let ctrl = key_evt.modifiers.contains(KeyModifiers::CONTROL);

    match key_evt.code {
        KeyCode::Enter => return session.begin_submit(engine_available),

        // History browsing
        KeyCode::Up => session.history_older(),
        KeyCode::Down => session.history_newer(),

        // Ctrl+U: clear the line
        KeyCode::Char('u') | KeyCode::Char('U') if ctrl => session.command_input_mut().clear(),

        KeyCode::Char(c) if !ctrl => session.command_input_mut().insert_char(c),

        KeyCode::Backspace => session.command_input_mut().delete_char(),
        KeyCode::Delete => session.command_input_mut().delete_char_forward(),
        KeyCode::Left => session.command_input_mut().move_cursor(-1),
        KeyCode::Right => session.command_input_mut().move_cursor(1),
        KeyCode::Home => session.command_input_mut().move_cursor_to_line_start(),
        KeyCode::End => session.command_input_mut().move_cursor_to_line_end(),

        _ => {}
    }
    None
}
