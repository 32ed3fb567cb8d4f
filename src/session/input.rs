//! Editable text buffers for the command line and the schema editor.

use unicode_width::UnicodeWidthStr;

/// A text buffer with a cursor kept on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    text: String,
    /// Byte offset into `text`
    cursor: usize,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the content and put the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Backspace.
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.text.remove(self.cursor);
        }
    }

    /// Delete the char under the cursor.
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }

    /// Move the cursor by `delta` chars, clamped to the buffer.
    pub fn move_cursor(&mut self, delta: isize) {
        if delta < 0 {
            for _ in 0..delta.unsigned_abs() {
                match self.text[..self.cursor].chars().next_back() {
                    Some(c) => self.cursor -= c.len_utf8(),
                    None => break,
                }
            }
        } else {
            for _ in 0..delta as usize {
                match self.text[self.cursor..].chars().next() {
                    Some(c) => self.cursor += c.len_utf8(),
                    None => break,
                }
            }
        }
    }

    /// Move to the start of the current line.
    pub fn move_cursor_to_line_start(&mut self) {
        self.cursor = self.text[..self.cursor].rfind('\n').map_or(0, |idx| idx + 1);
    }

    /// Move to the end of the current line.
    pub fn move_cursor_to_line_end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |idx| self.cursor + idx);
    }

    /// Cursor position as (row, display column).
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let row = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
        (row, before[line_start..].width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_clear() {
        let mut input = InputBuffer::new();
        for c in "greet bob".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.text(), "greet bob");
        input.clear();
        assert!(input.is_empty());
        assert_eq!(input.cursor_position(), (0, 0));
    }

    #[test]
    fn test_edit_in_middle() {
        let mut input = InputBuffer::new();
        input.set("helo");
        input.move_cursor(-1);
        input.insert_char('l');
        assert_eq!(input.text(), "hello");

        input.move_cursor(-10);
        input.delete_char_forward();
        assert_eq!(input.text(), "ello");

        input.delete_char();
        assert_eq!(input.text(), "ello");
    }

    #[test]
    fn test_multibyte_chars() {
        let mut input = InputBuffer::new();
        input.set("❌ x");
        input.move_cursor(-2);
        input.delete_char();
        assert_eq!(input.text(), " x");
        input.move_cursor(5);
        assert_eq!(input.cursor_position(), (0, 2));
    }

    #[test]
    fn test_multiline_cursor() {
        let mut input = InputBuffer::new();
        input.set("{\n  \"commands\": []\n}");
        assert_eq!(input.cursor_position(), (2, 1));

        input.move_cursor(-2);
        input.move_cursor_to_line_start();
        assert_eq!(input.cursor_position(), (1, 0));
        input.move_cursor_to_line_end();
        assert_eq!(input.cursor_position(), (1, 16));
    }
}
