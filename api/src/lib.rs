pub mod client;
pub mod ftc;

use chrono::{DateTime, NaiveDateTime};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types, independent of the FTC Events wire format
// ---------------------------------------------------------------------------

/// One team's standing at an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingRecord {
    pub rank: u32,
    pub team_number: u32,
    pub team_name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// First tie-breaker (`sortOrder2` on the wire).
    pub tie_breaker_1: f64,
    /// Second tie-breaker (`sortOrder3` on the wire).
    pub tie_breaker_2: f64,
    pub matches_played: u32,
    /// Qualification average, when the event reports one.
    pub qual_average: Option<f64>,
}

impl RankingRecord {
    pub fn record(&self) -> TeamRecord {
        TeamRecord { wins: self.wins, losses: self.losses, ties: self.ties }
    }
}

/// Win/loss/tie triple. `Default` is the 0-0-0 zero-state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl fmt::Display for TeamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    /// Classify a station label ("Red1", "Blue2", ...) by substring.
    pub fn from_station(station: &str) -> Option<Self> {
        if station.contains("Red") {
            Some(Alliance::Red)
        } else if station.contains("Blue") {
            Some(Alliance::Blue)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTeam {
    pub team_number: u32,
    pub station: String, // "Red1", "Blue2", ...
    /// Disqualified from this match.
    pub dq: bool,
}

impl MatchTeam {
    pub fn alliance(&self) -> Option<Alliance> {
        Alliance::from_station(&self.station)
    }
}

/// One scheduled or played match.
///
/// A match is completed once the API has posted its result, i.e. when
/// `post_result_time` is present. Scores are `None` until the API reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRecord {
    pub description: String,
    pub post_result_time: Option<String>,
    pub teams: Vec<MatchTeam>,
    pub score_red_final: Option<u32>,
    pub score_blue_final: Option<u32>,
}

impl MatchRecord {
    pub fn is_completed(&self) -> bool {
        self.post_result_time.is_some()
    }

    pub fn has_team(&self, team_number: u32) -> bool {
        self.teams.iter().any(|t| t.team_number == team_number)
    }

    /// Team numbers on one alliance, in station order as delivered.
    pub fn alliance_teams(&self, alliance: Alliance) -> Vec<u32> {
        self.teams
            .iter()
            .filter(|t| t.alliance() == Some(alliance))
            .map(|t| t.team_number)
            .collect()
    }

    pub fn disqualified(&self, alliance: Alliance) -> Vec<u32> {
        self.teams
            .iter()
            .filter(|t| t.dq && t.alliance() == Some(alliance))
            .map(|t| t.team_number)
            .collect()
    }

    pub fn final_score(&self, alliance: Alliance) -> Option<u32> {
        match alliance {
            Alliance::Red => self.score_red_final,
            Alliance::Blue => self.score_blue_final,
        }
    }

    pub fn posted_at(&self) -> Option<NaiveDateTime> {
        self.post_result_time.as_deref().and_then(parse_event_time)
    }
}

/// FTC Events timestamps are event-local and usually carry no offset
/// ("2024-02-10T10:23:45.317"). Offset-qualified values are accepted too.
pub fn parse_event_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(number: u32, station: &str) -> MatchTeam {
        MatchTeam { team_number: number, station: station.into(), dq: false }
    }

    #[test]
    fn station_substring_decides_alliance() {
        assert_eq!(Alliance::from_station("Red1"), Some(Alliance::Red));
        assert_eq!(Alliance::from_station("Blue2"), Some(Alliance::Blue));
        assert_eq!(Alliance::from_station("Field"), None);
    }

    #[test]
    fn alliance_teams_keep_station_order() {
        let m = MatchRecord {
            teams: vec![team(1, "Red1"), team(2, "Blue1"), team(3, "Red2"), team(4, "Blue2")],
            ..Default::default()
        };
        assert_eq!(m.alliance_teams(Alliance::Red), vec![1, 3]);
        assert_eq!(m.alliance_teams(Alliance::Blue), vec![2, 4]);
        assert!(m.has_team(4));
        assert!(!m.has_team(5));
    }

    #[test]
    fn disqualified_teams_are_listed_per_alliance() {
        let mut dq = team(4, "Blue2");
        dq.dq = true;
        let m = MatchRecord {
            teams: vec![team(1, "Red1"), team(2, "Blue1"), team(3, "Red2"), dq],
            ..Default::default()
        };
        assert_eq!(m.disqualified(Alliance::Blue), vec![4]);
        assert!(m.disqualified(Alliance::Red).is_empty());
    }

    #[test]
    fn record_display_is_dash_separated() {
        let r = TeamRecord { wins: 5, losses: 1, ties: 0 };
        assert_eq!(r.to_string(), "5-1-0");
        assert_eq!(TeamRecord::default().to_string(), "0-0-0");
    }

    #[test]
    fn event_time_parses_naive_and_offset_forms() {
        let naive = parse_event_time("2024-02-10T10:23:45.317").expect("naive time");
        assert_eq!(naive.format("%H:%M").to_string(), "10:23");
        let offset = parse_event_time("2024-02-10T10:23:45-05:00").expect("offset time");
        assert_eq!(offset.format("%H:%M").to_string(), "10:23");
        assert!(parse_event_time("not a time").is_none());
    }

    #[test]
    fn completion_follows_post_result_time() {
        let mut m = MatchRecord::default();
        assert!(!m.is_completed());
        m.post_result_time = Some("2024-02-10T10:23:45".into());
        assert!(m.is_completed());
        assert!(m.posted_at().is_some());
    }
}
