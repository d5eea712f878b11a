use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the widget that draws itself into a rectangle.
///
/// Components receive their data as struct fields ("props") built fresh from
/// the current `WidgetView` each frame. Anything that must survive between
/// frames (scroll offsets, the input buffer) lives in a separate state struct
/// owned by `TuiState` and borrowed mutably by the component.
///
/// `render` takes `&mut self` so a component can refresh its layout cache
/// during the render pass, the same contract as ratatui's `StatefulWidget`.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// The higher-level event this component reports to the event loop.
    type Event;

    /// Handle a `TuiEvent`, optionally reporting something back.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
