use indyfy_core::catalog::BRAND;
use indyfy_core::session::SessionSnapshot;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::Page;
use crate::common::{TaskKind, truncate_with_ellipsis};
use crate::state::TuiState;

/// Brand line plus bottom border.
pub const HEADER_HEIGHT: u16 = 2;

const ACCENT: Color = Color::Magenta;

/// Text of the session area on the right of the header.
///
/// The session area is informational only; no page depends on it.
pub fn session_label(session: &SessionSnapshot, signing_out: bool) -> String {
    if signing_out {
        return "Signing out…".to_string();
    }
    match (session.display_name(), session.role()) {
        (None, _) => "Sign in (l)".to_string(),
        (Some(name), Some(role)) => format!("{name} · {}  Sign out (o)", role.label()),
        (Some(name), None) => format!("{name}  Sign out (o)"),
    }
}

pub fn render_header(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let signing_out = tui.tasks.state(TaskKind::SignOut).is_running();
    let session = session_label(&tui.session, signing_out);
    let session_width = (session.width() as u16 + 1).min(inner.width / 2);

    let [left, right] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(session_width)])
        .areas(inner);

    let mut spans = vec![
        Span::styled(
            BRAND,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    for (i, page) in Page::ALL.iter().enumerate() {
        let label = format!(" {} {} ", i + 1, page.title());
        let style = if *page == tui.page {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), left);

    let session_style = if tui.session.is_signed_in() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let session = truncate_with_ellipsis(&session, right.width as usize);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(session, session_style)))
            .alignment(Alignment::Right),
        right,
    );
}
