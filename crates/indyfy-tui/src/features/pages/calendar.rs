use indyfy_core::catalog::{self, PAST_RELEASES, UPCOMING_RELEASES};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::CalendarTab;

pub fn render(frame: &mut Frame, area: Rect, tab: CalendarTab) {
    let [title, toggle, list] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Release calendar",
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        title,
    );
    frame.render_widget(Paragraph::new(toggle_line(tab)), toggle);

    let lines = match tab {
        CalendarTab::Upcoming => upcoming_lines(),
        CalendarTab::Past => past_lines(),
    };
    frame.render_widget(Paragraph::new(lines), list);
}

fn toggle_line(active: CalendarTab) -> Line<'static> {
    let tab = |tab: CalendarTab, key: &str| {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(format!(" {} ({key}) ", tab.title()), style)
    };
    Line::from(vec![
        tab(CalendarTab::Upcoming, "u"),
        Span::raw("  "),
        tab(CalendarTab::Past, "p"),
    ])
}

fn upcoming_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for release in UPCOMING_RELEASES {
        lines.push(Line::from(vec![
            Span::styled(
                release.title,
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", catalog::countdown(release.days_left)),
                Style::default().fg(Color::Yellow),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "  {} · {}",
                release.artist,
                catalog::long_date(release.date)
            ),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    lines
}

fn past_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for release in PAST_RELEASES {
        lines.push(Line::from(vec![
            Span::styled(
                release.title,
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", catalog::released_ago(release.days_ago)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "  {} · {}",
                release.artist,
                catalog::long_date(release.date)
            ),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }
    lines
}
