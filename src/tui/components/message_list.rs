//! # MessageList Component
//!
//! Scrollable view of the transcript, with the typing indicator as a
//! trailing row while a request is out.
//!
//! `MessageList` is transient (created each frame) and wraps
//! `&'a mut MessageListState`, the persistent scroll position and layout
//! cache. Messages never change once appended, so cached heights stay valid
//! until the width changes or the conversation is reset.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::Modifier;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::content::Direction;
use crate::core::transcript::Role;
use crate::core::view::MessageView;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{MessageBubble, role_style};
use crate::tui::event::TuiEvent;

const TYPING_FRAMES: [&str; 4] = ["●    ", "● ●  ", "● ● ●", "     "];
const TYPING_HEIGHT: u16 = 1;

pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never runs past the last message.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Re-engage auto-scroll once the user scrolls back down to the end.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached per-message heights plus running totals for visibility lookups.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            content_width: 0,
        }
    }

    /// How many cached heights are still correct for `message_count`
    /// messages at `content_width`.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width {
            return 0;
        }
        // Fewer messages than cached means the transcript was restarted.
        if message_count < self.heights.len() {
            return 0;
        }
        self.heights.len()
    }

    pub fn refresh(&mut self, messages: &[MessageView], content_width: u16) {
        let reusable = self.reusable_count(messages.len(), content_width);
        self.heights.truncate(reusable);
        for message in messages.iter().skip(reusable) {
            self.heights.push(MessageBubble::calculate_height(message, content_width));
        }
        self.content_width = content_width;
        self.rebuild_prefix_heights();
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Indices of messages overlapping the viewport, padded by half a screen
    /// on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [MessageView],
    pub direction: Direction,
    pub typing: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [MessageView],
        direction: Direction,
        typing: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            direction,
            typing,
            spinner_frame,
        }
    }

    fn typing_line(&self) -> Paragraph<'static> {
        let dots = TYPING_FRAMES[self.spinner_frame % TYPING_FRAMES.len()];
        let alignment = match self.direction {
            Direction::Ltr => Alignment::Left,
            Direction::Rtl => Alignment::Right,
        };
        Paragraph::new(Line::styled(
            format!("🤖 {dots}"),
            role_style(Role::Assistant).add_modifier(Modifier::DIM),
        ))
        .alignment(alignment)
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state.layout.refresh(self.messages, content_width);
        let messages_height = self.state.layout.total_height();
        let typing_height = if self.typing { TYPING_HEIGHT } else { 0 };
        let canvas_height = messages_height.saturating_add(typing_height);

        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };
        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageBubble::new(&self.messages[i], self.direction), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.typing {
            let rect = Rect::new(0, messages_height, content_width, TYPING_HEIGHT);
            scroll_view.render_widget(self.typing_line(), rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
