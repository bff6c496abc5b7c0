//! Drawing helpers shared by modal overlays.

use ratatui::Frame;
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::common::truncate_start_with_ellipsis;

const CURSOR: &str = "█";

/// Centers a `width` x `height` box in `area`, leaving a small margin when
/// the terminal is too small.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// A key and what it does, shown in the modal footer.
pub struct KeyHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> KeyHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Bordered popup drawn over the current page.
pub struct Modal<'a> {
    pub title: &'a str,
    pub accent: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [KeyHint<'a>],
}

impl Modal<'_> {
    /// Clears the popup area, draws border, title and hints, and returns
    /// the area left for the body.
    pub fn render(&self, frame: &mut Frame, area: Rect) -> Rect {
        let popup = centered(area, self.width, self.height);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(self.accent))
                .title(Line::styled(
                    format!(" {} ", self.title),
                    Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
                )),
            popup,
        );

        let mut inner = popup.inner(Margin::new(2, 1));
        if !self.hints.is_empty() && inner.height > 0 {
            inner.height -= 1;
            let footer = Rect { y: inner.bottom(), height: 1, ..inner };
            frame.render_widget(
                Paragraph::new(hint_line(self.hints, self.accent)).alignment(Alignment::Center),
                footer,
            );
        }
        inner
    }
}

fn hint_line(hints: &[KeyHint<'_>], accent: Color) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", dim));
        }
        spans.push(Span::styled(hint.key.to_string(), Style::default().fg(accent)));
        spans.push(Span::styled(format!(" {}", hint.action), dim));
    }
    Line::from(spans)
}

/// One text field of a form.
pub struct InputLine<'a> {
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
    pub focused: bool,
    pub accent: Color,
}

/// Renders `prompt value█`, or the dimmed placeholder when empty.
///
/// Long values keep their tail visible. Only the focused field gets a cursor.
pub fn input_line(input: &InputLine<'_>, width: u16) -> Line<'static> {
    let room = usize::from(width).saturating_sub(input.prompt.len() + 1);
    let prompt_style = Style::default().fg(if input.focused {
        input.accent
    } else {
        Color::DarkGray
    });
    let cursor = Span::styled(CURSOR, Style::default().fg(input.accent));
    let mut spans = vec![Span::styled(input.prompt.to_string(), prompt_style)];

    match input.placeholder.filter(|_| input.value.is_empty()) {
        Some(placeholder) => {
            if input.focused {
                spans.push(cursor);
            }
            spans.push(Span::styled(
                truncate_start_with_ellipsis(placeholder, room),
                Style::default().fg(Color::DarkGray),
            ));
        }
        None => {
            spans.push(Span::styled(
                truncate_start_with_ellipsis(input.value, room),
                Style::default().fg(Color::White),
            ));
            if input.focused {
                spans.push(cursor);
            }
        }
    }
    Line::from(spans)
}
