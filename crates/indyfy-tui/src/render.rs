//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::nav::{HEADER_HEIGHT, Page, render_header};
use crate::overlays::OverlayExt;
use crate::pages::render_page;
use crate::state::{AppState, TuiState};

/// Height of the footer line (notice or key hints).
const FOOTER_HEIGHT: u16 = 1;

/// Horizontal margin around the page body.
const BODY_MARGIN: u16 = 2;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let [header, body, footer] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(area);

    render_header(frame, header, &app.tui);

    let body = Rect::new(
        body.x + BODY_MARGIN,
        body.y + 1,
        body.width.saturating_sub(BODY_MARGIN * 2),
        body.height.saturating_sub(1),
    );
    render_page(frame, body, &app.tui);
    render_footer(frame, footer, &app.tui);

    app.overlay.render(frame, area, &app.tui);
}

fn render_footer(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let line = match &tui.notice {
        Some(notice) => Line::from(Span::styled(
            format!(" {notice}"),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            format!(" {}", key_hints(tui)),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn key_hints(tui: &TuiState) -> String {
    let mut hints = vec!["1-3/Tab pages"];
    match tui.page {
        Page::Home => hints.push("j join"),
        Page::Calendar => hints.push("u/p upcoming/past"),
        Page::Artists => {}
    }
    if tui.session.is_signed_in() {
        hints.push("o sign out");
    } else {
        hints.push("l sign in");
    }
    hints.push("q quit");
    hints.join(" • ")
}
