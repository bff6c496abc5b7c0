//! Static showcase content and its display formatting.
//!
//! The pages show fixed sample data. Nothing here is fetched, sorted or
//! filtered; the order of each list is the display order.

use chrono::NaiveDate;

pub const BRAND: &str = "INDYFY";
pub const TAGLINE: &str = "The platform for independent artists";
pub const DESCRIPTION: &str = "Discover tomorrow's talent and follow their upcoming releases in \
                               real time. A community dedicated to independent artists and \
                               their fans.";

/// A home page feature card: (title, body).
pub const FEATURES: &[(&str, &str)] = &[
    (
        "Publish your releases",
        "Build anticipation with countdowns for your next tracks",
    ),
    (
        "Grow your community",
        "Connect with your fans and expand your audience",
    ),
    (
        "Climb the charts",
        "Gain visibility and reach the top of emerging artists",
    ),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopArtist {
    pub name: &'static str,
    pub genre: &'static str,
    pub followers: u64,
    pub days_to_next_release: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingRelease {
    pub title: &'static str,
    pub artist: &'static str,
    pub date: NaiveDate,
    pub days_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastRelease {
    pub title: &'static str,
    pub artist: &'static str,
    pub date: NaiveDate,
    pub days_ago: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtistEntry {
    pub name: &'static str,
    pub genre: &'static str,
    pub followers: u64,
    pub releases: u32,
}

const fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date,
        None => panic!("invalid catalog date"),
    }
}

pub const TOP_ARTISTS: &[TopArtist] = &[
    TopArtist {
        name: "Luna Waves",
        genre: "R&B/Soul",
        followers: 12_500,
        days_to_next_release: 3,
    },
    TopArtist {
        name: "Nexus",
        genre: "Hip-Hop",
        followers: 9_800,
        days_to_next_release: 5,
    },
    TopArtist {
        name: "Echo Dreams",
        genre: "Électro",
        followers: 8_300,
        days_to_next_release: 7,
    },
];

pub const UPCOMING_RELEASES: &[UpcomingRelease] = &[
    UpcomingRelease {
        title: "Midnight Colors",
        artist: "Luna Waves",
        date: ymd(2026, 1, 8),
        days_left: 3,
    },
    UpcomingRelease {
        title: "Urban Stories",
        artist: "Nexus",
        date: ymd(2026, 1, 10),
        days_left: 5,
    },
    UpcomingRelease {
        title: "Digital Horizon",
        artist: "Echo Dreams",
        date: ymd(2026, 1, 12),
        days_left: 7,
    },
    UpcomingRelease {
        title: "Cosmic Vibes",
        artist: "Star Child",
        date: ymd(2026, 1, 15),
        days_left: 10,
    },
];

pub const PAST_RELEASES: &[PastRelease] = &[
    PastRelease {
        title: "Ocean Beats",
        artist: "Wave Maker",
        date: ymd(2026, 1, 2),
        days_ago: 3,
    },
    PastRelease {
        title: "After Hours",
        artist: "Night Owl",
        date: ymd(2025, 12, 28),
        days_ago: 8,
    },
];

pub const ARTISTS: &[ArtistEntry] = &[
    ArtistEntry {
        name: "Luna Waves",
        genre: "R&B/Soul",
        followers: 12_500,
        releases: 4,
    },
    ArtistEntry {
        name: "Nexus",
        genre: "Hip-Hop",
        followers: 9_800,
        releases: 6,
    },
    ArtistEntry {
        name: "Echo Dreams",
        genre: "Électro",
        followers: 8_300,
        releases: 3,
    },
    ArtistEntry {
        name: "Star Child",
        genre: "Pop",
        followers: 7_100,
        releases: 5,
    },
    ArtistEntry {
        name: "Wave Maker",
        genre: "House",
        followers: 6_500,
        releases: 8,
    },
    ArtistEntry {
        name: "Night Owl",
        genre: "Lo-fi",
        followers: 5_900,
        releases: 12,
    },
];

// ============================================================================
// Formatting
// ============================================================================

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Day-month-year with the month spelled out: `8 January 2026`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

/// Countdown label: `3 days`, `1 day`.
pub fn countdown(days: u32) -> String {
    plural(days, "day", "days")
}

/// Next release phrase for the top artists: `In 3 days`, `In 1 week`.
pub fn next_release(days: u32) -> String {
    if days > 0 && days % 7 == 0 {
        format!("In {}", plural(days / 7, "week", "weeks"))
    } else {
        format!("In {}", countdown(days))
    }
}

/// `Released 3 days ago`, `Released 1 day ago`.
pub fn released_ago(days: u32) -> String {
    format!("Released {} ago", countdown(days))
}

/// Groups thousands with commas: `12,500`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// `4 releases`, `1 release`.
pub fn release_count(count: u32) -> String {
    plural(count, "release", "releases")
}
