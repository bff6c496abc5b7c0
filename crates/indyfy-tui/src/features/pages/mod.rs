//! Static content pages.
//!
//! Each page renders fixed catalog data; only the calendar has state of its
//! own (which list is shown).

mod artists;
mod calendar;
mod home;

use ratatui::Frame;
use ratatui::layout::Rect;

use crate::nav::Page;
use crate::state::TuiState;

/// Which list the calendar page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarTab {
    #[default]
    Upcoming,
    Past,
}

impl CalendarTab {
    pub fn title(self) -> &'static str {
        match self {
            CalendarTab::Upcoming => "Upcoming",
            CalendarTab::Past => "Past releases",
        }
    }
}

/// Renders the active page into `area`.
pub fn render_page(frame: &mut Frame, area: Rect, tui: &TuiState) {
    match tui.page {
        Page::Home => home::render(frame, area),
        Page::Calendar => calendar::render(frame, area, tui.calendar),
        Page::Artists => artists::render(frame, area),
    }
}
