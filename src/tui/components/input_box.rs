//! # InputBox Component
//!
//! The single-line message field at the bottom of the panel.
//!
//! The buffer and cursor are internal state. The placeholder and the
//! "waiting" flag are props refreshed from the `WidgetView` each frame. When
//! the text is wider than the box, the visible window slides so the cursor
//! stays on screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Left + right border.
const HORIZONTAL_OVERHEAD: u16 = 2;
pub const HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed on a non-blank buffer; the buffer has been cleared.
    Submit(String),
    ContentChanged,
}

pub struct InputBox {
    pub buffer: String,
    /// Shown dimmed while the buffer is empty.
    pub placeholder: String,
    /// A reply is pending: Enter is swallowed and the text is kept.
    pub waiting: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// Display column of the first visible character.
    scroll: usize,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            placeholder: String::new(),
            waiting: false,
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    fn insert_str(&mut self, text: &str) {
        // Single-line field: pasted newlines become spaces.
        let text: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    /// Display column of the cursor from the start of the buffer.
    fn cursor_column(&self) -> usize {
        self.buffer[..self.cursor].width()
    }

    /// Slides the visible window so the cursor fits in `inner_width` columns.
    fn update_scroll(&mut self, inner_width: u16) {
        if inner_width == 0 {
            self.scroll = 0;
            return;
        }
        let inner_width = usize::from(inner_width);
        let column = self.cursor_column();
        if column < self.scroll {
            self.scroll = column;
        } else if column >= self.scroll.saturating_add(inner_width) {
            self.scroll = column + 1 - inner_width;
        }
    }

    /// Cursor offset inside the box, at most `inner_width`.
    fn cursor_offset(&self, inner_width: u16) -> u16 {
        let offset = self.cursor_column().saturating_sub(self.scroll);
        u16::try_from(offset).unwrap_or(u16::MAX).min(inner_width)
    }

    /// The slice of the buffer starting at display column `self.scroll`.
    fn visible_text(&self) -> &str {
        let mut column = 0usize;
        for (i, c) in self.buffer.char_indices() {
            if column >= self.scroll {
                return &self.buffer[i..];
            }
            column += c.width().unwrap_or(0);
        }
        ""
    }
}

fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        self.update_scroll(inner_width);

        let border_style = if self.waiting {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().add_modifier(Modifier::DIM))
        } else {
            Paragraph::new(self.visible_text())
        };
        frame.render_widget(paragraph.block(block), area);

        let x = area.x + 1 + self.cursor_offset(inner_width);
        frame.set_cursor_position((x, area.y + 1));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.insert_str(text);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.cursor > 0 => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorRight if self.cursor < self.buffer.len() => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Submit if !self.waiting && !self.is_empty() => {
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(text: &str) -> InputBox {
        let mut input = InputBox::new();
        for c in text.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = typed("ab");
        assert_eq!(input.buffer, "ab");
        assert_eq!(input.handle_event(&TuiEvent::Backspace), Some(InputEvent::ContentChanged));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_backspace_at_start_is_noop() {
        let mut input = InputBox::new();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_editing_multibyte() {
        let mut input = typed("héllo");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::CursorRight);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "hllo");
        input.handle_event(&TuiEvent::InputChar('é'));
        assert_eq!(input.buffer, "héllo");
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut input = typed("hello");
        match input.handle_event(&TuiEvent::Submit) {
            Some(InputEvent::Submit(text)) => assert_eq!(text, "hello"),
            other => panic!("Expected Submit event, got {:?}", other),
        }
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_submit_blank_or_waiting_keeps_text() {
        let mut blank = typed("   ");
        assert_eq!(blank.handle_event(&TuiEvent::Submit), None);
        assert_eq!(blank.buffer, "   ");

        let mut waiting = typed("next question");
        waiting.waiting = true;
        assert_eq!(waiting.handle_event(&TuiEvent::Submit), None);
        assert_eq!(waiting.buffer, "next question");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("one\ntwo".into()));
        assert_eq!(input.buffer, "one two");
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut input = typed("abcdefghij");
        input.update_scroll(4);
        assert_eq!(input.scroll, 7);
        assert_eq!(input.visible_text(), "hij");

        input.handle_event(&TuiEvent::CursorHome);
        input.update_scroll(4);
        assert_eq!(input.scroll, 0);
    }

    #[test]
    fn test_render_placeholder() {
        let backend = TestBackend::new(30, HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new();
        input.placeholder = "Type your message...".into();
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Type your message..."));
    }

    #[test]
    fn test_very_long_paste_renders() {
        let backend = TestBackend::new(40, HEIGHT);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new();
        input.handle_event(&TuiEvent::Paste("a".repeat(70_000)));

        terminal.draw(|f| input.render(f, f.area())).unwrap();
        terminal.draw(|f| input.render(f, f.area())).unwrap();

        assert_eq!(input.cursor_column(), 70_000);
        assert_eq!(input.scroll, 70_000 + 1 - 38);
        assert_eq!(input.cursor_offset(38), 37);
        assert_eq!(input.visible_text().len(), 37);

        input.handle_event(&TuiEvent::CursorHome);
        terminal.draw(|f| input.render(f, f.area())).unwrap();
        assert_eq!(input.scroll, 0);
        assert_eq!(input.cursor_offset(38), 0);
    }
}
