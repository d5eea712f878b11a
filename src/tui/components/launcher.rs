//! # Launcher Component
//!
//! The floating toggle button pinned to the bottom-right corner of the page.
//! It reads "💬 AI" while the panel is closed and "✕" while it is open.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

pub const WIDTH: u16 = 9;
pub const HEIGHT: u16 = 3;
/// Distance from the right and bottom edges of the screen.
const MARGIN: u16 = 1;

pub struct Launcher {
    pub is_open: bool,
}

impl Launcher {
    /// Where the button sits on a screen of size `screen`.
    pub fn area(screen: Rect) -> Rect {
        let width = WIDTH.min(screen.width);
        let height = HEIGHT.min(screen.height);
        let x = screen.x + screen.width.saturating_sub(width + MARGIN);
        let y = screen.y + screen.height.saturating_sub(height + MARGIN);
        Rect::new(x, y, width, height)
    }
}

impl Component for Launcher {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let label = if self.is_open { "✕" } else { "💬 AI" };
        let style = Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD);
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::bordered().border_type(BorderType::Rounded));
        frame.render_widget(button, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_area_is_bottom_right() {
        let screen = Rect::new(0, 0, 80, 24);
        assert_eq!(Launcher::area(screen), Rect::new(70, 20, WIDTH, HEIGHT));
    }

    #[test]
    fn test_area_on_tiny_screen() {
        let screen = Rect::new(0, 0, 5, 2);
        let area = Launcher::area(screen);
        assert!(area.width <= 5 && area.height <= 2);
    }

    #[test]
    fn test_label_follows_state() {
        for (is_open, label) in [(false, "AI"), (true, "✕")] {
            let backend = TestBackend::new(WIDTH, HEIGHT);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|f| Launcher { is_open }.render(f, f.area()))
                .unwrap();
            let text: String = terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|c| c.symbol())
                .collect();
            assert!(text.contains(label));
        }
    }
}
