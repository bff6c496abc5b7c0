use indyfy_core::catalog::{
    self, BRAND, DESCRIPTION, FEATURES, TAGLINE, TOP_ARTISTS, TopArtist,
};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(frame: &mut Frame, area: Rect) {
    let [hero, features, top] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .areas(area);

    render_hero(frame, hero);
    render_features(frame, features);
    render_top_artists(frame, top);
}

fn render_hero(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            BRAND,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::White))),
        Line::from(Span::styled(DESCRIPTION, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!(" Join {BRAND} "),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  j / Enter", Style::default().fg(Color::DarkGray)),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_features(frame: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(FEATURES.iter().map(|_| Constraint::Fill(1)))
        .split(area);

    for ((title, body), column) in FEATURES.iter().zip(columns.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                *title,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*body, Style::default().fg(Color::Gray))),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(card, *column);
    }
}

fn render_top_artists(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Top 3 artists right now",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (rank, artist) in TOP_ARTISTS.iter().enumerate() {
        lines.extend(top_artist_lines(rank + 1, artist));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn top_artist_lines(rank: usize, artist: &TopArtist) -> [Line<'static>; 2] {
    [
        Line::from(vec![
            Span::styled(format!("#{rank} "), Style::default().fg(Color::Magenta)),
            Span::styled(artist.name, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  {}", artist.genre),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                format!("  {} followers", catalog::group_thousands(artist.followers)),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "   Next release: {}",
                catalog::next_release(artist.days_to_next_release)
            ),
            Style::default().fg(Color::Yellow),
        )),
    ]
}
