//! Cache Key Builder
//!
//! Pure functions that turn football API queries into stable cache keys
//! and invalidation tags. Keys have the shape
//! `prefix:entity:id[:flag|:name=value]...`; qualifiers appear only when
//! set and always in the order the builder adds them, so equal queries
//! give equal keys and queries differing in any option never collide.

use std::borrow::Cow;
use std::fmt::Display;

/// Prefix shared by every key derived from the football API.
pub const PREFIX: &str = "football";

const SEPARATOR: &str = ":";

// == Key Builder ==
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    parts: Vec<String>,
}

impl KeyBuilder {
    pub fn new(prefix: &str) -> Self {
        Self {
            parts: vec![escape(prefix).into_owned()],
        }
    }

    /// Appends a positional component (entity type, sub-resource).
    pub fn segment(mut self, segment: impl Display) -> Self {
        self.parts.push(escape(&segment.to_string()).into_owned());
        self
    }

    /// Appends an identifier.
    pub fn id(self, id: impl Display) -> Self {
        self.segment(id)
    }

    /// Appends `name` only when `enabled`.
    pub fn flag(mut self, name: &str, enabled: bool) -> Self {
        if enabled {
            self.parts.push(escape(name).into_owned());
        }
        self
    }

    /// Appends `name=value` only when a value is present.
    pub fn param<V: Display>(mut self, name: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.parts.push(format!(
                "{}={}",
                escape(name),
                escape(&value.to_string())
            ));
        }
        self
    }

    pub fn build(self) -> String {
        self.parts.join(SEPARATOR)
    }
}

/// Percent-escapes characters that carry structure in a key.
fn escape(component: &str) -> Cow<'_, str> {
    if !component.contains(['%', ':', '=']) {
        return Cow::Borrowed(component);
    }

    let mut out = String::with_capacity(component.len() + 6);
    for c in component.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            '=' => out.push_str("%3D"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

// == Query Options ==
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamQuery {
    pub include_stats: bool,
    pub include_squad: bool,
    pub season: Option<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerQuery {
    pub include_stats: bool,
    pub season: Option<u16>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureQuery {
    pub include_events: bool,
    pub include_lineups: bool,
    pub include_statistics: bool,
}

// == Domain Keys ==
pub fn team(team_id: u32, query: &TeamQuery) -> String {
    KeyBuilder::new(PREFIX)
        .segment("team")
        .id(team_id)
        .flag("stats", query.include_stats)
        .flag("squad", query.include_squad)
        .param("season", query.season)
        .build()
}

/// Fixtures of one team, optionally limited to a season or the last N.
pub fn team_fixtures(team_id: u32, season: Option<u16>, last: Option<u32>) -> String {
    KeyBuilder::new(PREFIX)
        .segment("team")
        .id(team_id)
        .segment("fixtures")
        .param("season", season)
        .param("last", last)
        .build()
}

pub fn player(player_id: u32, query: &PlayerQuery) -> String {
    KeyBuilder::new(PREFIX)
        .segment("player")
        .id(player_id)
        .flag("stats", query.include_stats)
        .param("season", query.season)
        .build()
}

pub fn fixture(fixture_id: u32, query: &FixtureQuery) -> String {
    KeyBuilder::new(PREFIX)
        .segment("fixture")
        .id(fixture_id)
        .flag("events", query.include_events)
        .flag("lineups", query.include_lineups)
        .flag("statistics", query.include_statistics)
        .build()
}

/// Fixtures on a calendar date (`YYYY-MM-DD`), optionally within a league.
pub fn fixtures_by_date(date: &str, league_id: Option<u32>) -> String {
    KeyBuilder::new(PREFIX)
        .segment("fixtures")
        .segment(date)
        .param("league", league_id)
        .build()
}

pub fn league(league_id: u32) -> String {
    KeyBuilder::new(PREFIX).segment("league").id(league_id).build()
}

pub fn standings(league_id: u32, season: u16) -> String {
    KeyBuilder::new(PREFIX)
        .segment("league")
        .id(league_id)
        .segment("standings")
        .param("season", Some(season))
        .build()
}

/// Head-to-head record. Team order is kept as given.
pub fn head_to_head(team_a: u32, team_b: u32, last: Option<u32>) -> String {
    KeyBuilder::new(PREFIX)
        .segment("h2h")
        .id(team_a)
        .id(team_b)
        .param("last", last)
        .build()
}

pub fn odds(fixture_id: u32, bookmaker_id: Option<u32>) -> String {
    KeyBuilder::new(PREFIX)
        .segment("odds")
        .id(fixture_id)
        .param("bookmaker", bookmaker_id)
        .build()
}

/// Invalidation tags attached to cached responses.
pub mod tags {
    pub fn team(team_id: u32) -> String {
        format!("team:{}", team_id)
    }

    pub fn player(player_id: u32) -> String {
        format!("player:{}", player_id)
    }

    pub fn fixture(fixture_id: u32) -> String {
        format!("fixture:{}", fixture_id)
    }

    pub fn league(league_id: u32) -> String {
        format!("league:{}", league_id)
    }
}
