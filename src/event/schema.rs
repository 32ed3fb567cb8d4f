//! Key event handling for the schema editor.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::EngineRequest;
use crate::schema::CommandSchemaDocument;
use crate::session::Session;

/// Handle key events when the schema editor is focused.
///
/// Ctrl+S loads the document into the engine; Ctrl+T replaces the editor
/// content with an example document. Enter inserts a newline.
pub fn handle_key_event(
    session: &mut Session,
    engine_available: bool,
    key_evt: KeyEvent,
) -> Option<EngineRequest> {
    let ctrl = key_evt.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key_evt.code, KeyCode::Char('s') | KeyCode::Char('S')) {
        return session.begin_load_schema(engine_available);
    }

    let editor = session.schema_input_mut();
    match key_evt.code {
        KeyCode::Char('t') | KeyCode::Char('T') if ctrl => {
            editor.set(CommandSchemaDocument::template_json());
        }
        KeyCode::Char('u') | KeyCode::Char('U') if ctrl => editor.clear(),

        KeyCode::Char(c) if !ctrl => editor.insert_char(c),
        KeyCode::Enter => editor.insert_char('\n'),

        KeyCode::Backspace => editor.delete_char(),
        KeyCode::Delete => editor.delete_char_forward(),
        KeyCode::Left => editor.move_cursor(-1),
        KeyCode::Right => editor.move_cursor(1),
        KeyCode::Home => editor.move_cursor_to_line_start(),
        KeyCode::End => editor.move_cursor_to_line_end(),

        _ => {}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{EMPTY_SCHEMA, LineKind};

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_enter_inserts_newline() {
        let mut session = Session::default();
        handle_key_event(&mut session, true, KeyEvent::new(KeyCode::Char('{'), KeyModifiers::NONE));
        handle_key_event(&mut session, true, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        handle_key_event(&mut session, true, KeyEvent::new(KeyCode::Char('}'), KeyModifiers::NONE));
        assert_eq!(session.schema_input().text(), "{\n}");
        assert!(session.log().is_empty());
    }

    #[test]
    fn test_ctrl_t_fills_template() {
        let mut session = Session::default();
        handle_key_event(&mut session, true, ctrl('t'));
        assert_eq!(session.schema_input().text(), CommandSchemaDocument::template_json());
    }

    #[test]
    fn test_ctrl_s_loads_editor_text() {
        let mut session = Session::default();
        handle_key_event(&mut session, true, ctrl('t'));

        let request = handle_key_event(&mut session, true, ctrl('s'));
        assert_eq!(
            request,
            Some(EngineRequest::LoadSchema(CommandSchemaDocument::template_json()))
        );
        // Editor is only cleared once the engine accepts the document
        assert!(!session.schema_input().is_empty());
    }

    #[test]
    fn test_ctrl_s_on_empty_editor_reports_error() {
        let mut session = Session::default();
        assert!(handle_key_event(&mut session, true, ctrl('s')).is_none());
        assert_eq!(session.log().lines()[0].kind(), LineKind::Error);
        assert_eq!(session.log().lines()[0].text(), EMPTY_SCHEMA);
    }
}
