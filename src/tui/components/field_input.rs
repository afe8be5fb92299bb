//! # FieldInput Component
//!
//! A focusable text field used by the compose form. Single-line fields
//! (from, to, subject) scroll horizontally; the multiline body field
//! accepts newlines and scrolls vertically to keep the cursor visible.
//!
//! The buffer is internal state; the title and focus flag are props passed
//! at render time by the owning form. Cursor position is a byte offset into
//! the buffer and all edits stay on `char` boundaries.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::event::TuiEvent;

/// Largest byte offset `<= pos` that is a char boundary.
fn prev_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos.min(s.len());
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Smallest byte offset `>= pos` that is a char boundary.
fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos.min(s.len());
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p
}

pub struct FieldInput {
    /// Text buffer (internal state).
    buffer: String,
    /// Cursor position as a byte offset (0..=buffer.len()).
    cursor: usize,
    /// Whether Enter/paste newlines are kept (body) or rejected (headers).
    multiline: bool,
    /// First visible line, for multiline vertical scrolling.
    scroll_top: u16,
}

impl FieldInput {
    pub fn new(multiline: bool) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            multiline,
            scroll_top: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll_top = 0;
    }

    fn insert_char(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn insert_str(&mut self, s: &str) {
        let cleaned: String = if self.multiline {
            s.to_string()
        } else {
            s.replace(['\n', '\r'], " ")
        };
        self.buffer.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = prev_char_boundary(&self.buffer, self.cursor - 1);
        self.buffer.drain(start..self.cursor);
        self.cursor = start;
    }

    fn delete(&mut self) {
        if self.cursor >= self.buffer.len() {
            return;
        }
        let end = next_char_boundary(&self.buffer, self.cursor + 1);
        self.buffer.drain(self.cursor..end);
    }

    /// The cursor's (line, column-in-chars) position within the buffer.
    fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.buffer[..self.cursor];
        let line = before.matches('\n').count();
        let col_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        (line, before[col_start..].width())
    }

    /// Processes an editing event. Returns true if the buffer changed or
    /// the cursor moved (the caller flags a redraw).
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::InputChar(c) => {
                self.insert_char(*c);
                true
            }
            TuiEvent::Paste(data) => {
                self.insert_str(data);
                true
            }
            TuiEvent::Backspace => {
                self.backspace();
                true
            }
            TuiEvent::Delete => {
                self.delete();
                true
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor - 1);
                }
                true
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor + 1);
                }
                true
            }
            TuiEvent::Home => {
                let before = &self.buffer[..self.cursor];
                self.cursor = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
                true
            }
            TuiEvent::End => {
                let rest = &self.buffer[self.cursor..];
                self.cursor += rest.find('\n').unwrap_or(rest.len());
                true
            }
            TuiEvent::Submit if self.multiline => {
                self.insert_char('\n');
                true
            }
            _ => false,
        }
    }

    /// Render with border, title, and focus styling. The focused field also
    /// places the terminal cursor.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title.to_string());

        let inner_width = area.width.saturating_sub(2).max(1);
        let inner_height = area.height.saturating_sub(2).max(1);

        let (line, col) = self.cursor_line_col();

        // Keep the cursor line visible in multiline fields.
        if (line as u16) < self.scroll_top {
            self.scroll_top = line as u16;
        } else if line as u16 >= self.scroll_top + inner_height {
            self.scroll_top = line as u16 + 1 - inner_height;
        }

        // Horizontal window for single-line fields wider than the box.
        let h_scroll = if col as u16 >= inner_width {
            col as u16 + 1 - inner_width
        } else {
            0
        };

        let paragraph = Paragraph::new(self.buffer.as_str())
            .block(block)
            .scroll((self.scroll_top, h_scroll));
        frame.render_widget(paragraph, area);

        if focused {
            let cursor_x = area.x + 1 + (col as u16).saturating_sub(h_scroll);
            let cursor_y = area.y + 1 + (line as u16).saturating_sub(self.scroll_top);
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(field: &mut FieldInput, text: &str) {
        for c in text.chars() {
            field.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut field = FieldInput::new(false);
        typed(&mut field, "a@x.com");
        assert_eq!(field.text(), "a@x.com");
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.text(), "a@x.co");
    }

    #[test]
    fn test_single_line_rejects_newlines() {
        let mut field = FieldInput::new(false);
        typed(&mut field, "subject");
        field.handle_event(&TuiEvent::InputChar('\n'));
        field.handle_event(&TuiEvent::Paste("a\nb".to_string()));
        assert_eq!(field.text(), "subjecta b");
    }

    #[test]
    fn test_multiline_accepts_enter() {
        let mut field = FieldInput::new(true);
        typed(&mut field, "line one");
        field.handle_event(&TuiEvent::Submit);
        typed(&mut field, "line two");
        assert_eq!(field.text(), "line one\nline two");
    }

    #[test]
    fn test_cursor_edit_in_middle() {
        let mut field = FieldInput::new(false);
        typed(&mut field, "helo");
        field.handle_event(&TuiEvent::CursorLeft);
        field.handle_event(&TuiEvent::InputChar('l'));
        assert_eq!(field.text(), "hello");
    }

    #[test]
    fn test_multibyte_boundary_safety() {
        let mut field = FieldInput::new(false);
        typed(&mut field, "héllo");
        field.handle_event(&TuiEvent::Home);
        field.handle_event(&TuiEvent::CursorRight);
        field.handle_event(&TuiEvent::CursorRight);
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.text(), "hllo");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut field = FieldInput::new(true);
        typed(&mut field, "body text");
        field.clear();
        assert!(field.is_empty());
        assert_eq!(field.text(), "");
    }

    #[test]
    fn test_is_empty_ignores_whitespace() {
        let mut field = FieldInput::new(false);
        typed(&mut field, "   ");
        assert!(field.is_empty());
    }
}
