use indyfy_core::catalog::{self, ARTISTS};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Paragraph, Row, Table};

pub fn render(frame: &mut Frame, area: Rect) {
    if area.height < 2 {
        return;
    }
    let title = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::styled(
            "All artists",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        title,
    );

    let header = Row::new(["Artist", "Genre", "Followers", "Releases"])
        .style(Style::default().fg(Color::DarkGray));
    let rows = ARTISTS.iter().map(|artist| {
        Row::new([
            Cell::from(artist.name).style(Style::default().add_modifier(Modifier::BOLD)),
            Cell::from(artist.genre).style(Style::default().fg(Color::Gray)),
            Cell::from(catalog::group_thousands(artist.followers))
                .style(Style::default().fg(Color::Cyan)),
            Cell::from(catalog::release_count(artist.releases)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .column_spacing(2);

    let body = Rect::new(
        area.x,
        area.y + 2,
        area.width,
        area.height.saturating_sub(2),
    );
    frame.render_widget(table, body);
}
