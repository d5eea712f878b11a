use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::content::Direction;
use crate::core::markup::{self, Inline};
use crate::core::transcript::Role;
use crate::core::view::MessageView;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A single chat bubble: avatar and time in the border, markup in the body.
///
/// Transient: built fresh each frame from a `MessageView`.
#[derive(Clone, Copy)]
pub struct MessageBubble<'a> {
    pub view: &'a MessageView,
    pub direction: Direction,
}

impl<'a> MessageBubble<'a> {
    pub fn new(view: &'a MessageView, direction: Direction) -> Self {
        Self { view, direction }
    }

    /// Rendered height at `width`, borders included.
    pub fn calculate_height(view: &MessageView, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders + padding; still occupy a row.
            return 1;
        }
        let lines = body_paragraph(&view.body, Style::default()).line_count(content_width);
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn title(&self) -> String {
        format!(" {} {} ", self.view.avatar, self.view.time)
    }

    /// Assistant bubbles hang on the leading edge, user bubbles on the
    /// trailing edge; right-to-left languages swap the two.
    fn title_alignment(&self) -> Alignment {
        match (self.view.role, self.direction) {
            (Role::Assistant, Direction::Ltr) | (Role::User, Direction::Rtl) => Alignment::Left,
            (Role::User, Direction::Ltr) | (Role::Assistant, Direction::Rtl) => Alignment::Right,
        }
    }
}

pub fn role_style(role: Role) -> Style {
    match role {
        Role::Assistant => Style::default().fg(Color::Blue),
        Role::User => Style::default().fg(Color::Green),
    }
}

/// Converts parsed markup into styled lines: bold stays bold, links are
/// underlined with the target in parentheses (unsafe targets show the
/// label only).
pub fn inline_lines(inlines: &[Inline], base: Style) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    push_spans(inlines, base, &mut lines);
    lines
}

fn push_spans(inlines: &[Inline], style: Style, lines: &mut Vec<Line<'static>>) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => push(lines, Span::styled(text.clone(), style)),
            Inline::Strong(children) => {
                push_spans(children, style.add_modifier(Modifier::BOLD), lines)
            }
            Inline::Link { label, url } => {
                push_spans(
                    label,
                    style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
                    lines,
                );
                if markup::is_safe_url(url) {
                    push(
                        lines,
                        Span::styled(format!(" ({})", url.trim()), style.add_modifier(Modifier::DIM)),
                    );
                }
            }
            Inline::LineBreak => lines.push(Line::default()),
        }
    }
}

fn push(lines: &mut [Line<'static>], span: Span<'static>) {
    if let Some(line) = lines.last_mut() {
        line.spans.push(span);
    }
}

fn body_paragraph(body: &[Inline], style: Style) -> Paragraph<'static> {
    Paragraph::new(inline_lines(body, style)).wrap(Wrap { trim: true })
}

impl<'a> Widget for MessageBubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = role_style(self.view.role);
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(Line::from(self.title()).alignment(self.title_alignment()))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let alignment = match self.direction {
            Direction::Ltr => Alignment::Left,
            Direction::Rtl => Alignment::Right,
        };
        body_paragraph(&self.view.body, Style::default())
            .alignment(alignment)
            .render(inner_area, buf);
    }
}

impl<'a> Component for MessageBubble<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(role: Role, text: &str) -> MessageView {
        MessageView {
            role,
            avatar: if role == Role::User { "👤" } else { "🤖" },
            time: "14:30".to_string(),
            body: markup::parse(text),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn calculate_height_single_line() {
        assert_eq!(
            MessageBubble::calculate_height(&view(Role::User, "Hello"), 40),
            1 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_counts_line_breaks() {
        assert_eq!(
            MessageBubble::calculate_height(&view(Role::Assistant, "a\nb\nc"), 40),
            3 + VERTICAL_OVERHEAD
        );
    }

    #[test]
    fn calculate_height_wraps_long_text() {
        let v = view(Role::Assistant, "Hello world");
        // content width 5 → "Hello" | "world"
        assert_eq!(MessageBubble::calculate_height(&v, 5 + HORIZONTAL_OVERHEAD), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_degenerate_width() {
        assert_eq!(MessageBubble::calculate_height(&view(Role::User, "Hi"), 0), 1);
        assert_eq!(
            MessageBubble::calculate_height(&view(Role::User, "Hi"), HORIZONTAL_OVERHEAD),
            1
        );
    }

    #[test]
    fn calculate_height_saturates_for_huge_reply() {
        let huge = view(Role::Assistant, &"a\n".repeat(70_000));
        assert_eq!(MessageBubble::calculate_height(&huge, 40), u16::MAX);
    }

    #[test]
    fn inline_lines_styles_strong_and_links() {
        let lines = inline_lines(&markup::parse("See **this** [docs](https://x.io)"), Style::default());
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "See this docs (https://x.io)");

        let bold = &lines[0].spans[1];
        assert_eq!(bold.content, "this");
        assert!(bold.style.add_modifier.contains(Modifier::BOLD));

        let link = &lines[0].spans[3];
        assert_eq!(link.content, "docs");
        assert!(link.style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn inline_lines_hides_unsafe_targets() {
        let lines = inline_lines(&markup::parse("[x](javascript:alert)"), Style::default());
        assert_eq!(line_text(&lines[0]), "x");
    }

    #[test]
    fn inline_lines_breaks_on_newlines() {
        let lines = inline_lines(&markup::parse("one\ntwo"), Style::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(line_text(&lines[1]), "two");
    }

    #[test]
    fn title_alignment_mirrors_in_rtl() {
        let user = view(Role::User, "x");
        let bot = view(Role::Assistant, "x");
        assert_eq!(MessageBubble::new(&user, Direction::Ltr).title_alignment(), Alignment::Right);
        assert_eq!(MessageBubble::new(&bot, Direction::Ltr).title_alignment(), Alignment::Left);
        assert_eq!(MessageBubble::new(&user, Direction::Rtl).title_alignment(), Alignment::Left);
        assert_eq!(MessageBubble::new(&bot, Direction::Rtl).title_alignment(), Alignment::Right);
    }

    #[test]
    fn role_colors() {
        assert_eq!(role_style(Role::User).fg, Some(Color::Green));
        assert_eq!(role_style(Role::Assistant).fg, Some(Color::Blue));
    }
}
