//! # PanelHeader Component
//!
//! Top row of the chat panel: avatar, assistant name, a status line and the
//! close button. Purely presentational; everything comes in as props.
//!
//! ```text
//! 🤖 Recrut'der Assistant · Online - AI powered        [fr]  ✕
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::content::Direction;
use crate::tui::component::Component;

pub const TITLE: &str = "Recrut'der Assistant";
pub const STATUS_ONLINE: &str = "Online - AI powered";
pub const STATUS_TYPING: &str = "typing…";
const CLOSE_LABEL: &str = " ✕ ";

pub struct PanelHeader {
    pub language: String,
    pub direction: Direction,
    pub typing: bool,
}

impl PanelHeader {
    pub fn new(language: impl Into<String>, direction: Direction, typing: bool) -> Self {
        Self {
            language: language.into(),
            direction,
            typing,
        }
    }

    /// Screen rect of the close button inside a header drawn at `area`.
    pub fn close_button_area(area: Rect) -> Rect {
        let width = (CLOSE_LABEL.chars().count() as u16).min(area.width);
        Rect::new(area.x + area.width - width, area.y, width, 1.min(area.height))
    }

    fn status(&self) -> &'static str {
        if self.typing { STATUS_TYPING } else { STATUS_ONLINE }
    }
}

impl Component for PanelHeader {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let close = Self::close_button_area(area);
        let text_area = Rect::new(area.x, area.y, area.width.saturating_sub(close.width), 1.min(area.height));

        let line = Line::from(vec![
            Span::raw("🤖 "),
            Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!(" · {}", self.status()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("  [{}]", self.language), Style::default().fg(Color::Cyan)),
        ]);
        let alignment = match self.direction {
            Direction::Ltr => Alignment::Left,
            Direction::Rtl => Alignment::Right,
        };
        frame.render_widget(Paragraph::new(line).alignment(alignment), text_area);
        frame.render_widget(
            Span::styled(CLOSE_LABEL, Style::default().fg(Color::Red)),
            close,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(header: &mut PanelHeader, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_header_online() {
        let text = rendered(&mut PanelHeader::new("fr", Direction::Ltr, false), 70);
        assert!(text.contains(TITLE));
        assert!(text.contains(STATUS_ONLINE));
        assert!(text.contains("[fr]"));
        assert!(text.contains('✕'));
    }

    #[test]
    fn test_header_typing() {
        let text = rendered(&mut PanelHeader::new("en", Direction::Ltr, true), 70);
        assert!(text.contains(STATUS_TYPING));
        assert!(!text.contains(STATUS_ONLINE));
    }

    #[test]
    fn test_close_button_area() {
        let area = Rect::new(10, 4, 40, 1);
        assert_eq!(PanelHeader::close_button_area(area), Rect::new(47, 4, 3, 1));
    }
}
