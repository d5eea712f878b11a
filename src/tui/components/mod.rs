//! # TUI Components
//!
//! Components follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Built fresh each frame from the `WidgetView`:
//! - `Launcher`: The floating toggle button
//! - `PanelHeader`: Assistant name, status and close button
//! - `MessageBubble`: A single transcript entry
//! - `SuggestionBar`: Quick-reply chips
//!
//! ### Stateful Components (Event-Driven)
//!
//! Own state that outlives a frame and consume `TuiEvent`s:
//! - `InputBox`: The message field
//! - `MessageList`: Scrollable transcript with a layout cache
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── launcher.rs       (toggle button)
//! ├── header.rs         (panel header)
//! ├── message.rs        (single message bubble)
//! ├── message_list.rs   (scrollable transcript)
//! ├── suggestion_bar.rs (quick-reply chips)
//! └── input_box.rs      (message field)
//! ```

pub mod header;
pub mod input_box;
pub mod launcher;
pub mod message;
pub mod message_list;
pub mod suggestion_bar;

pub use header::PanelHeader;
pub use input_box::{InputBox, InputEvent};
pub use launcher::Launcher;
pub use message_list::{MessageList, MessageListState};
pub use suggestion_bar::SuggestionBar;
