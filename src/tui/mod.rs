//! # TUI Adapter
//!
//! The ratatui-specific host. Draws a stand-in page with the assistant widget
//! floating over it, translates keyboard and mouse input into core `Action`s,
//! and performs the effects `update()` asks for.
//!
//! This is the only module that knows about ratatui and crossterm. The core
//! hands it a `WidgetView` and never looks back, so another host (an HTML
//! page, a GUI) can replace it wholesale.
//!
//! ## Concurrency
//!
//! Everything that touches the `Session` runs on this thread. Requests are
//! posted from `tokio::spawn`ed tasks that send a single
//! `Action::ReplyReceived` back over a std `mpsc` channel, which the loop
//! drains between input batches.
//!
//! ## Redraw Strategy
//!
//! - **Typing indicator visible**: redraws every ~120ms to animate the dots.
//! - **Idle**: sleeps up to 500ms, only redraws on events or replies.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::language::{FilePreferenceStore, LanguageCoordinator, PreferenceStore};
use crate::core::state::{OutboundRequest, Session};
use crate::core::view::{self, WidgetView};
use crate::transport::{AssistantTransport, HttpTransport};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, SuggestionBar};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::HitAreas;

const PLACEHOLDER: &str = "Type your message...";

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// Suggestion chip selected with Tab; Enter on an empty input sends it.
    pub highlighted_suggestion: Option<usize>,
    /// Clickable regions from the last draw.
    pub hit: HitAreas,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        let mut input_box = InputBox::new();
        input_box.placeholder = PLACEHOLDER.to_string();
        Self {
            message_list: MessageListState::new(),
            input_box,
            highlighted_suggestion: None,
            hit: HitAreas::default(),
        }
    }

    /// Moves the chip highlight forward (`step = 1`) or back (`step = -1`),
    /// wrapping around `count` chips.
    fn cycle_highlight(&mut self, count: usize, step: isize) {
        if count == 0 {
            self.highlighted_suggestion = None;
            return;
        }
        let next = match self.highlighted_suggestion {
            None if step >= 0 => 0,
            None => count - 1,
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
        };
        self.highlighted_suggestion = Some(next);
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The Kitty keyboard protocol is pushed unconditionally; terminals
        // without it ignore the sequence.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

/// Runs `restore` when dropped, so the terminal is handed back even when the
/// loop exits early through `?`.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Build the HTTP transport from the resolved endpoint and timeouts.
pub fn build_transport(config: &ResolvedConfig) -> std::io::Result<Arc<dyn AssistantTransport>> {
    let transport = HttpTransport::new(&config.endpoint, config.timeout, config.connect_timeout)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    Ok(Arc::new(transport))
}

/// Picks the starting language and builds the session around it. A language
/// given on the command line counts as a selection and is remembered.
fn start_session<S: PreferenceStore>(
    config: &ResolvedConfig,
    coordinator: &mut LanguageCoordinator<S>,
) -> Session {
    let mut session = Session::new(coordinator.current(), config.page.clone())
        .with_context_window(config.context_window);
    if let Some(code) = &config.language_override {
        coordinator.select(code, &mut session);
        // Nothing has been said yet, so greet in the chosen language.
        session.initialize(code);
    }
    if config.start_open {
        update(&mut session, Action::Open);
    }
    session
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let transport = build_transport(&config)?;
    let store = FilePreferenceStore::in_home()
        .unwrap_or_else(|| FilePreferenceStore::new(".recrutder-language"));
    let mut coordinator = LanguageCoordinator::new(store, &config.default_language);
    let mut session = start_session(&config, &mut coordinator);
    let mut tui = TuiState::new();
    info!(
        "Session {} started (language '{}', page '{}', endpoint {})",
        session.id,
        session.language(),
        session.page(),
        config.endpoint
    );

    let mut terminal = ratatui::init();
    // Declared before the mode guard so modes are popped before the screen is restored.
    let _restore_guard = RestoreGuard::new(ratatui::restore);
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for replies from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        let animating = session.is_typing();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 120) as usize;
            let widget = view::render(&session);
            terminal.draw(|f| ui::draw_ui(f, &widget, session.page(), &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(120)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let widget = view::render(&session);
            for action in route_event(event, &widget, &mut tui) {
                match action {
                    LoopAction::Core(action) => {
                        let reset = matches!(action, Action::Reset);
                        match update(&mut session, action) {
                            Effect::Quit => break 'event_loop,
                            Effect::SpawnRequest(request) => {
                                tui.highlighted_suggestion = None;
                                spawn_request(transport.clone(), request, tx.clone());
                            }
                            Effect::None => {}
                        }
                        if reset {
                            tui.message_list = MessageListState::new();
                            tui.highlighted_suggestion = None;
                        }
                    }
                    LoopAction::CycleLanguage => {
                        let code = coordinator.cycle(&mut session);
                        debug!("Language cycled to '{}'", code);
                        tui.highlighted_suggestion = None;
                    }
                }
            }
        }

        // Replies from background tasks
        if drain_replies(&mut session, &rx) > 0 {
            needs_redraw = true;
        }
    }

    info!("Session {} closed", session.id);
    Ok(())
}

/// What the event loop should do in response to one terminal event.
#[derive(Debug)]
enum LoopAction {
    Core(Action),
    CycleLanguage,
}

/// Maps a terminal event onto loop actions, updating TUI-local state
/// (input buffer, highlight, scroll) along the way.
fn route_event(event: TuiEvent, widget: &WidgetView, tui: &mut TuiState) -> Vec<LoopAction> {
    use LoopAction::Core;

    match event {
        TuiEvent::ForceQuit => return vec![Core(Action::Quit)],
        TuiEvent::TogglePanel => return vec![Core(Action::Toggle)],
        TuiEvent::Resize => return Vec::new(),
        TuiEvent::MouseClick(col, row) => return route_click(col, row, widget, tui),
        _ => {}
    }

    // Everything below only applies while the panel is open.
    if !widget.is_open {
        return Vec::new();
    }

    match event {
        TuiEvent::Escape => vec![Core(Action::Close)],
        TuiEvent::CycleLanguage => vec![LoopAction::CycleLanguage],
        TuiEvent::Reset => vec![Core(Action::Reset)],
        TuiEvent::NextSuggestion => {
            tui.cycle_highlight(widget.suggestions.len(), 1);
            Vec::new()
        }
        TuiEvent::PrevSuggestion => {
            tui.cycle_highlight(widget.suggestions.len(), -1);
            Vec::new()
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(&event);
            Vec::new()
        }
        TuiEvent::Submit if tui.input_box.is_empty() => {
            match tui.highlighted_suggestion.filter(|&i| i < widget.suggestions.len()) {
                Some(index) if !widget.typing => vec![Core(Action::PickSuggestion(index))],
                _ => Vec::new(),
            }
        }
        _ => {
            tui.input_box.waiting = widget.typing;
            match tui.input_box.handle_event(&event) {
                Some(InputEvent::Submit(text)) => vec![Core(Action::Submit(text))],
                _ => Vec::new(),
            }
        }
    }
}

fn route_click(col: u16, row: u16, widget: &WidgetView, tui: &mut TuiState) -> Vec<LoopAction> {
    let hit = (col, row).into();
    if tui.hit.launcher.contains(hit) {
        return vec![LoopAction::Core(Action::Toggle)];
    }
    if !widget.is_open {
        return Vec::new();
    }
    if tui.hit.close.is_some_and(|close| close.contains(hit)) {
        return vec![LoopAction::Core(Action::Close)];
    }
    if let Some(area) = tui.hit.suggestions {
        let bar = SuggestionBar::new(&widget.suggestions, None, widget.direction);
        if let Some(index) = bar.hit_test(area, col, row) {
            return vec![LoopAction::Core(Action::PickSuggestion(index))];
        }
    }
    Vec::new()
}

/// Feeds every reply waiting on `rx` through `update`. Returns how many
/// arrived.
fn drain_replies(session: &mut Session, rx: &mpsc::Receiver<Action>) -> usize {
    let mut received = 0;
    while let Ok(action) = rx.try_recv() {
        debug!("Event loop received: {:?}", action);
        received += 1;
        if update(session, action) != Effect::None {
            warn!("Reply produced an unexpected effect");
        }
    }
    received
}

fn spawn_request(
    transport: Arc<dyn AssistantTransport>,
    request: OutboundRequest,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning request {} via {} transport",
        request.id,
        transport.name()
    );
    tokio::spawn(async move {
        let result = transport.post(&request.body).await;
        if let Err(e) = &result {
            debug!("Request {} failed: {}", request.id, e);
        }
        if tx
            .send(Action::ReplyReceived {
                request_id: request.id,
                result,
            })
            .is_err()
        {
            warn!("Failed to deliver reply {}: receiver dropped", request.id);
        }
    });
}
