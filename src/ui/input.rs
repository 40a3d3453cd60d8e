use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthStr;

/// Editable text with a cursor, used for every text field in the journal.
/// The cursor is a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
    multiline: bool,
}

impl TextInput {
    pub fn single_line() -> Self {
        TextInput::default()
    }

    pub fn multiline() -> Self {
        TextInput {
            multiline: true,
            ..TextInput::default()
        }
    }

    /// Starts with `value` and the cursor at its end.
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self.cursor = self.value.len();
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Applies an editing key. Returns false when the key is not an edit for
    /// this field, so the caller can treat it as navigation.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        match key.code {
            KeyCode::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            KeyCode::Enter if self.multiline => {
                self.value.insert(self.cursor, '\n');
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.value.remove(prev);
                    self.cursor = prev;
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            KeyCode::Left => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.value[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            KeyCode::Home => self.cursor = self.line_start(),
            KeyCode::End => self.cursor = self.line_end(self.cursor),
            KeyCode::Up if self.multiline => self.move_up(),
            KeyCode::Down if self.multiline => self.move_down(),
            _ => return false,
        }
        true
    }

    /// Row and display column of the cursor, for placing the terminal cursor.
    pub fn cursor_offset(&self) -> (u16, u16) {
        let before = &self.value[..self.cursor];
        let row = before.matches('\n').count();
        let line = &before[self.line_start()..];
        (row as u16, line.width() as u16)
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn line_start(&self) -> usize {
        self.value[..self.cursor]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    fn line_end(&self, from: usize) -> usize {
        self.value[from..]
            .find('\n')
            .map(|i| from + i)
            .unwrap_or(self.value.len())
    }

    fn column(&self) -> usize {
        self.value[self.line_start()..self.cursor].chars().count()
    }

    /// Byte offset of `column` within the line `[start, end)`, clamped to its end.
    fn offset_in_line(&self, start: usize, end: usize, column: usize) -> usize {
        self.value[start..end]
            .char_indices()
            .nth(column)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    fn move_up(&mut self) {
        let current_start = self.line_start();
        if current_start == 0 {
            return;
        }
        let column = self.column();
        let prev_end = current_start - 1;
        let prev_start = self.value[..prev_end]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        self.cursor = self.offset_in_line(prev_start, prev_end, column);
    }

    fn move_down(&mut self) {
        let current_end = self.line_end(self.cursor);
        if current_end == self.value.len() {
            return;
        }
        let column = self.column();
        let next_start = current_end + 1;
        let next_end = self.line_end(next_start);
        self.cursor = self.offset_in_line(next_start, next_end, column);
    }
}
