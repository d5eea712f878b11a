//! # SuggestionBar Component
//!
//! Quick-reply chips under the transcript. Chips flow left to right and wrap
//! onto new rows; in right-to-left languages every row is mirrored. The same
//! layout is used for drawing and for mouse hit testing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::core::content::Direction;
use crate::core::view::SuggestionView;
use crate::tui::component::Component;

/// Blank columns between neighbouring chips.
const CHIP_GAP: u16 = 1;

pub struct SuggestionBar<'a> {
    pub suggestions: &'a [SuggestionView],
    pub highlighted: Option<usize>,
    pub direction: Direction,
}

/// Text drawn for one chip.
fn chip_label(label: &str) -> String {
    format!("[ {label} ]")
}

/// Positions of each chip relative to an area `width` columns wide, as
/// `(index, rect)` pairs with `x`/`y` offsets from the area's origin.
pub fn layout_chips(suggestions: &[SuggestionView], width: u16, direction: Direction) -> Vec<(usize, Rect)> {
    let mut placed = Vec::with_capacity(suggestions.len());
    if width == 0 {
        return placed;
    }
    let mut x: u16 = 0;
    let mut y: u16 = 0;
    for suggestion in suggestions {
        let chip_width = (chip_label(suggestion.label).width() as u16).min(width);
        if x > 0 && x + chip_width > width {
            x = 0;
            y += 1;
        }
        let left = match direction {
            Direction::Ltr => x,
            Direction::Rtl => width - x - chip_width,
        };
        placed.push((suggestion.index, Rect::new(left, y, chip_width, 1)));
        x += chip_width + CHIP_GAP;
    }
    placed
}

impl<'a> SuggestionBar<'a> {
    pub fn new(suggestions: &'a [SuggestionView], highlighted: Option<usize>, direction: Direction) -> Self {
        Self {
            suggestions,
            highlighted,
            direction,
        }
    }

    /// Rows needed to show every chip at `width`; 0 when there are none.
    pub fn calculate_height(suggestions: &[SuggestionView], width: u16, direction: Direction) -> u16 {
        layout_chips(suggestions, width, direction)
            .last()
            .map(|(_, rect)| rect.y + 1)
            .unwrap_or(0)
    }

    /// Which chip (by suggestion index) sits under screen cell `(col, row)`.
    pub fn hit_test(&self, area: Rect, col: u16, row: u16) -> Option<usize> {
        layout_chips(self.suggestions, area.width, self.direction)
            .into_iter()
            .find(|(_, rect)| {
                let screen = Rect::new(area.x + rect.x, area.y + rect.y, rect.width, rect.height);
                screen.contains((col, row).into())
            })
            .map(|(index, _)| index)
    }
}

impl<'a> Component for SuggestionBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let normal = Style::default().fg(Color::Magenta);
        let highlighted = normal.add_modifier(Modifier::REVERSED | Modifier::BOLD);

        for (index, rect) in layout_chips(self.suggestions, area.width, self.direction) {
            if rect.y >= area.height {
                break;
            }
            let Some(suggestion) = self.suggestions.iter().find(|s| s.index == index) else {
                continue;
            };
            let style = if self.highlighted == Some(index) { highlighted } else { normal };
            let target = Rect::new(area.x + rect.x, area.y + rect.y, rect.width, 1);
            frame.render_widget(Span::styled(chip_label(suggestion.label), style), target);
        }
    }
}
