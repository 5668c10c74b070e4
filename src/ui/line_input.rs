use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
    /// Tab: the form moves to its other control.
    SwitchField,
}

/// Single-line text field with a char-indexed cursor and a length cap.
pub struct LineInput {
    chars: Vec<char>,
    cursor: usize,
    max_chars: usize,
}

impl LineInput {
    pub fn new(text: &str, max_chars: usize) -> Self {
        let chars: Vec<char> = text.chars().take(max_chars).collect();
        Self {
            cursor: chars.len(),
            chars,
            max_chars,
        }
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before the cursor, the char under it, and the rest.
    pub fn render_parts(&self) -> (String, Option<char>, String) {
        let before = self.chars[..self.cursor].iter().collect();
        let at = self.chars.get(self.cursor).copied();
        let after_start = (self.cursor + 1).min(self.chars.len());
        let after = self.chars[after_start..].iter().collect();
        (before, at, after)
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Tab | KeyCode::BackTab => return InputResult::SwitchField,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.chars.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.chars.len(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.chars.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.chars.len() {
                    self.chars.remove(self.cursor);
                }
            }
            KeyCode::Char('u') if ctrl => {
                self.chars.clear();
                self.cursor = 0;
            }
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl => {
                if self.chars.len() < self.max_chars {
                    self.chars.insert(self.cursor, ch);
                    self.cursor += 1;
                }
            }
            _ => {}
        }
        InputResult::Continue
    }

    fn delete_word_back(&mut self) {
        let mut pos = self.cursor;
        while pos > 0 && self.chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !self.chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        self.chars.drain(pos..self.cursor);
        self.cursor = pos;
    }
}
