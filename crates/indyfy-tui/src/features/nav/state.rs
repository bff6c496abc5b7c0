/// Page shown below the header.
///
/// Switching pages is synchronous and has no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Calendar,
    Artists,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Home, Page::Calendar, Page::Artists];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Calendar => "Calendar",
            Page::Artists => "Artists",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Page::Home => 0,
            Page::Calendar => 1,
            Page::Artists => 2,
        }
    }

    /// Maps the number keys `1`..`3` to pages.
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Page::Home),
            '2' => Some(Page::Calendar),
            '3' => Some(Page::Artists),
            _ => None,
        }
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
