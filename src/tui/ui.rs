use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::view::WidgetView;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::input_box::HEIGHT as INPUT_HEIGHT;
use crate::tui::components::{Launcher, MessageList, PanelHeader, SuggestionBar};

const PANEL_MAX_WIDTH: u16 = 52;
const PANEL_MAX_HEIGHT: u16 = 28;
/// Suggestion rows beyond this are cut off rather than squeezing the transcript.
const MAX_SUGGESTION_ROWS: u16 = 4;

/// Screen rects of everything clickable, refreshed on every draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitAreas {
    pub launcher: Rect,
    pub close: Option<Rect>,
    pub suggestions: Option<Rect>,
}

/// Where the pieces of the open panel go on a given screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    pub panel: Rect,
    pub header: Rect,
    pub messages: Rect,
    pub suggestions: Rect,
    pub input: Rect,
}

impl PanelLayout {
    pub fn compute(screen: Rect, suggestion_rows: u16) -> Self {
        let launcher = Launcher::area(screen);
        let width = PANEL_MAX_WIDTH.min(screen.width.saturating_sub(2));
        let height = PANEL_MAX_HEIGHT.min(launcher.y.saturating_sub(screen.y));
        let x = screen.x + screen.width.saturating_sub(width + 1);
        let y = launcher.y.saturating_sub(height);
        let panel = Rect::new(x, y, width, height);

        let inner = Block::bordered().inner(panel);
        let suggestion_rows = suggestion_rows.min(MAX_SUGGESTION_ROWS);
        let [header, messages, suggestions, input] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(suggestion_rows),
            Constraint::Length(INPUT_HEIGHT),
        ])
        .areas(inner);

        Self {
            panel,
            header,
            messages,
            suggestions,
            input,
        }
    }
}

pub fn draw_ui(frame: &mut Frame, view: &WidgetView, page: &str, tui: &mut TuiState, spinner_frame: usize) {
    let screen = frame.area();
    draw_page(frame, screen, page);

    let launcher_area = Launcher::area(screen);
    Launcher { is_open: view.is_open }.render(frame, launcher_area);

    tui.hit = HitAreas {
        launcher: launcher_area,
        close: None,
        suggestions: None,
    };
    if !view.is_open {
        return;
    }

    let inner_width = Block::bordered()
        .inner(PanelLayout::compute(screen, 0).panel)
        .width;
    let rows = SuggestionBar::calculate_height(&view.suggestions, inner_width, view.direction);
    let layout = PanelLayout::compute(screen, rows);

    frame.render_widget(Clear, layout.panel);
    frame.render_widget(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Blue)),
        layout.panel,
    );

    PanelHeader::new(view.language.clone(), view.direction, view.typing).render(frame, layout.header);
    MessageList::new(
        &mut tui.message_list,
        &view.messages,
        view.direction,
        view.typing,
        spinner_frame,
    )
    .render(frame, layout.messages);

    let highlighted = tui.highlighted_suggestion.filter(|&i| i < view.suggestions.len());
    SuggestionBar::new(&view.suggestions, highlighted, view.direction).render(frame, layout.suggestions);

    tui.input_box.waiting = view.typing;
    tui.input_box.render(frame, layout.input);

    tui.hit.close = Some(PanelHeader::close_button_area(layout.header));
    tui.hit.suggestions = (!view.suggestions.is_empty()).then_some(layout.suggestions);
}

/// The host page the widget floats over.
fn draw_page(frame: &mut Frame, area: Rect, page: &str) {
    let block = Block::bordered()
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Recrut'der · {page} "));
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let help = vec![
        Line::default(),
        Line::from(vec![
            Span::styled("Ctrl+T", key),
            Span::raw(" / "),
            Span::styled("F2", key),
            Span::raw(" or click the "),
            Span::styled("💬 AI", key),
            Span::raw(" button to chat"),
        ]),
        Line::from(vec![
            Span::styled("Tab", key),
            Span::raw(" pick a suggestion · "),
            Span::styled("Ctrl+L", key),
            Span::raw(" language · "),
            Span::styled("Ctrl+R", key),
            Span::raw(" restart · "),
            Span::styled("Ctrl+C", key),
            Span::raw(" quit"),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(help).alignment(Alignment::Center).block(block),
        area,
    );
}
