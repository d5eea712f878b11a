//! # Core Widget Logic
//!
//! This module contains the assistant widget's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (state)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • render() (view)      │
//!                    │                         │
//!                    │  No UI. Transport is a  │
//!                    │  trait object.          │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    HTML    │      │  Language  │
//!     │  Adapter   │      │  (to_html) │      │ Coordinator│
//!     │ (ratatui)  │      │            │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Session` struct and its send cycle
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`transcript`]: Ordered message history
//! - [`content`]: Per-language welcome, suggestion and fallback texts
//! - [`markup`]: The three-construct message markup and its HTML rendering
//! - [`view`]: Session → `WidgetView`
//! - [`language`]: Page-wide language selection and persistence
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod content;
pub mod language;
pub mod markup;
pub mod state;
pub mod transcript;
pub mod view;
