//! Rendering for the auth modal.

use indyfy_core::auth::{Field, Step};
use indyfy_core::catalog::BRAND;
use indyfy_core::profile::Role;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::common::mask;
use crate::overlays::AuthOverlayState;
use crate::overlays::render_utils::{InputLine, KeyHint, Modal, input_line};

const ACCENT: Color = Color::Magenta;
const POPUP_WIDTH: u16 = 62;
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the auth modal.
pub fn render_auth_overlay(
    frame: &mut Frame,
    state: &AuthOverlayState,
    area: Rect,
    spinner_frame: usize,
) {
    let step = state.workflow.step();
    let title = title(state);
    let hints = hints(step);
    let lines = match step {
        Step::RoleChoice => role_choice_lines(state.role_cursor),
        Step::Registration | Step::SignIn => {
            form_lines(state, POPUP_WIDTH.saturating_sub(4), spinner_frame)
        }
    };
    let height = lines.len() as u16 + 3;

    let body = Modal {
        title: &title,
        accent: ACCENT,
        width: POPUP_WIDTH,
        height,
        hints: &hints,
    }
    .render(frame, area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), body);
}

fn title(state: &AuthOverlayState) -> String {
    match (state.workflow.step(), state.workflow.role()) {
        (Step::RoleChoice, _) => format!("Join {BRAND}"),
        (Step::Registration, Some(role)) => format!("New {} account", role.as_str()),
        (Step::Registration, None) => "Create an account".to_string(),
        (Step::SignIn, _) => "Sign in".to_string(),
    }
}

fn hints(step: Step) -> Vec<KeyHint<'static>> {
    match step {
        Step::RoleChoice => vec![
            KeyHint::new("↑↓", "choose"),
            KeyHint::new("Enter", "continue"),
            KeyHint::new("s", "sign in"),
            KeyHint::new("Esc", "close"),
        ],
        Step::Registration => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "create"),
            KeyHint::new("^G", "Google"),
            KeyHint::new("^T", "sign in"),
            KeyHint::new("Esc", "back"),
        ],
        Step::SignIn => vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("Enter", "sign in"),
            KeyHint::new("^G", "Google"),
            KeyHint::new("^T", "register"),
            KeyHint::new("Esc", "back"),
        ],
    }
}

fn role_blurb(role: Role) -> &'static str {
    match role {
        Role::Artist => "I want to share my music and build my community",
        Role::Fan => "I want to discover and follow my favourite artists",
    }
}

fn role_choice_lines(cursor: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("You are...", Style::default().fg(Color::White))),
        Line::from(""),
    ];
    for (i, role) in Role::all().iter().enumerate() {
        let selected = i == cursor;
        let marker = if selected { "▶ " } else { "  " };
        let name_style = if selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(ACCENT)),
            Span::styled(role.label(), name_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", role_blurb(*role)),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Username => "Your username",
        Field::Email => "you@email.com",
        Field::Password | Field::ConfirmPassword => "••••••••",
    }
}

fn form_lines(state: &AuthOverlayState, width: u16, spinner_frame: usize) -> Vec<Line<'static>> {
    let workflow = &state.workflow;
    let subtitle = match workflow.step() {
        Step::SignIn => format!("Welcome back to {BRAND}!"),
        _ => format!("Join the {BRAND} community"),
    };
    let mut lines = vec![
        Line::from(Span::styled(subtitle, Style::default().fg(Color::Gray))),
        Line::from(""),
    ];

    let focused = state.focused_field();
    for field in workflow.step().fields() {
        let value = workflow.form().value(*field);
        let shown = if field.is_secret() {
            mask(value)
        } else {
            value.to_string()
        };
        lines.push(Line::from(Span::styled(
            field.label(),
            Style::default().fg(Color::Gray),
        )));
        lines.push(input_line(
            &InputLine {
                value: &shown,
                placeholder: Some(placeholder(*field)),
                prompt: "> ",
                focused: focused == Some(*field),
                accent: ACCENT,
            },
            width,
        ));
    }

    lines.push(Line::from(""));
    if workflow.is_busy() {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            format!("{spinner} Please wait..."),
            Style::default().fg(Color::Yellow),
        )));
    } else if let Some(error) = workflow.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Ctrl+G to continue with Google",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}
