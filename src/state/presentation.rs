use crate::state::app_state::{EventQuery, Section};
use crate::state::selection::{current_match, next_team_match, parse_team_number, recent_window};
use crate::state::team_stats::{find_ranking, resolve_record};
use ftc_events_api::client::ApiError;
use ftc_events_api::{Alliance, MatchRecord, RankingRecord, TeamRecord};

/// Shown in place of a score the API has not reported.
pub const UNKNOWN_SCORE: &str = "?";

pub const ALL_MATCHES_COMPLETED: &str = "All Matches Completed";
pub const NO_UPCOMING_MATCH: &str = "No Upcoming Match";

// ---------------------------------------------------------------------------
// Match cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllianceView {
    pub teams: Vec<u32>,
    /// Subset of `teams` disqualified from the match.
    pub disqualified: Vec<u32>,
    pub score: Option<u32>,
    /// Bold styling for the strictly higher known score.
    pub emphasized: bool,
}

impl AllianceView {
    pub fn score_label(&self) -> String {
        self.score
            .map(|s| s.to_string())
            .unwrap_or_else(|| UNKNOWN_SCORE.to_string())
    }

    pub fn teams_label(&self) -> String {
        self.teams
            .iter()
            .map(|t| {
                if self.disqualified.contains(t) {
                    format!("{t} (DQ)")
                } else {
                    t.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCard {
    pub description: String,
    pub red: AllianceView,
    pub blue: AllianceView,
    /// Upcoming matches are drawn muted.
    pub completed: bool,
    /// "HH:MM" the result was posted, when known.
    pub posted: Option<String>,
}

/// Emphasis per alliance: only a known, strictly higher score is emphasized.
/// Ties and unplayed matches look the same.
pub fn winner_emphasis(red: Option<u32>, blue: Option<u32>) -> (bool, bool) {
    match (red, blue) {
        (Some(r), Some(b)) => (r > b, b > r),
        _ => (false, false),
    }
}

pub fn match_card(m: &MatchRecord) -> MatchCard {
    let red_score = m.final_score(Alliance::Red);
    let blue_score = m.final_score(Alliance::Blue);
    let (red_bold, blue_bold) = winner_emphasis(red_score, blue_score);

    MatchCard {
        description: m.description.clone(),
        red: AllianceView {
            teams: m.alliance_teams(Alliance::Red),
            disqualified: m.disqualified(Alliance::Red),
            score: red_score,
            emphasized: red_bold,
        },
        blue: AllianceView {
            teams: m.alliance_teams(Alliance::Blue),
            disqualified: m.disqualified(Alliance::Blue),
            score: blue_score,
            emphasized: blue_bold,
        },
        completed: m.is_completed(),
        posted: m.posted_at().map(|t| t.format("%H:%M").to_string()),
    }
}

// ---------------------------------------------------------------------------
// Rankings table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    pub rank: u32,
    pub team_number: u32,
    pub team_name: String,
    pub record: String,
    pub tbp1: String,
    pub tbp2: String,
}

pub const RANKING_HEADERS: [&str; 6] = ["Rank", "Team Number", "Team Name", "Record", "TBP1", "TBP2"];

impl RankingRow {
    pub fn cells(&self) -> [String; 6] {
        [
            self.rank.to_string(),
            self.team_number.to_string(),
            self.team_name.clone(),
            self.record.clone(),
            self.tbp1.clone(),
            self.tbp2.clone(),
        ]
    }
}

pub fn ranking_rows(rankings: &[RankingRecord]) -> Vec<RankingRow> {
    rankings
        .iter()
        .map(|r| RankingRow {
            rank: r.rank,
            team_number: r.team_number,
            team_name: r.team_name.clone(),
            record: r.record().to_string(),
            tbp1: format_tie_breaker(r.tie_breaker_1),
            tbp2: format_tie_breaker(r.tie_breaker_2),
        })
        .collect()
}

fn format_tie_breaker(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

// ---------------------------------------------------------------------------
// Current / next match and team statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlights {
    pub current: String,
    pub next_title: String,
    pub next: String,
}

pub fn highlights(matches: &[MatchRecord], team_input: &str) -> Highlights {
    let current = current_match(matches)
        .map(|m| m.description.clone())
        .unwrap_or_else(|| ALL_MATCHES_COMPLETED.to_string());
    let next = parse_team_number(team_input)
        .and_then(|team| next_team_match(matches, team))
        .map(|m| m.description.clone())
        .unwrap_or_else(|| NO_UPCOMING_MATCH.to_string());

    Highlights {
        current,
        next_title: format!("Next Match (Team {})", team_input.trim()),
        next,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsPanel {
    pub title: String,
    pub record: TeamRecord,
    /// Event rank and team count, when the team is ranked.
    pub rank: Option<(u32, usize)>,
    /// "6 matches played, 180.2 average" when the team is ranked.
    pub summary: Option<String>,
}

impl StatsPanel {
    pub fn record_label(&self) -> String {
        format!("{} - {} - {}", self.record.wins, self.record.losses, self.record.ties)
    }
}

pub fn stats_panel(rankings: &[RankingRecord], team_input: &str) -> StatsPanel {
    let ranking = find_ranking(rankings, team_input);
    StatsPanel {
        title: format!("Team {} Statistics", team_input.trim()),
        record: resolve_record(rankings, team_input),
        rank: ranking.map(|r| (r.rank, rankings.len())),
        summary: ranking.map(play_summary),
    }
}

fn play_summary(r: &RankingRecord) -> String {
    let played = match r.matches_played {
        1 => "1 match played".to_string(),
        n => format!("{n} matches played"),
    };
    match r.qual_average {
        Some(avg) => format!("{played}, {avg:.1} average"),
        None => played,
    }
}

// ---------------------------------------------------------------------------
// Whole dashboard
// ---------------------------------------------------------------------------

/// Everything one refresh cycle renders. Sections whose fetch failed are
/// empty and carry their fault message instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub query: EventQuery,
    pub rankings: Vec<RankingRow>,
    pub rankings_error: Option<String>,
    /// `None` until matches are loaded, or when the event has none.
    pub highlights: Option<Highlights>,
    pub recent: Vec<MatchCard>,
    pub matches_loaded: bool,
    pub matches_error: Option<String>,
    pub stats: StatsPanel,
}

pub struct DashboardInput<'a> {
    pub query: &'a EventQuery,
    pub rankings: Option<&'a [RankingRecord]>,
    pub rankings_error: Option<&'a str>,
    pub matches: Option<&'a [MatchRecord]>,
    pub matches_error: Option<&'a str>,
    pub max_matches: usize,
}

pub fn build_dashboard(input: DashboardInput<'_>) -> DashboardView {
    let team_input = input.query.team_number.as_str();
    let rankings = input.rankings.unwrap_or_default();
    let matches = input.matches.unwrap_or_default();

    let recent = parse_team_number(team_input)
        .map(|team| recent_window(matches, team, input.max_matches))
        .unwrap_or_default()
        .into_iter()
        .map(match_card)
        .collect();

    DashboardView {
        query: input.query.clone(),
        rankings: ranking_rows(rankings),
        rankings_error: input.rankings_error.map(str::to_owned),
        highlights: (!matches.is_empty()).then(|| highlights(matches, team_input)),
        recent,
        matches_loaded: input.matches.is_some(),
        matches_error: input.matches_error.map(str::to_owned),
        stats: stats_panel(rankings, team_input),
    }
}

/// One-line, user-facing description of a failed fetch.
pub fn fault_message(section: Section, err: &ApiError) -> String {
    match err.status() {
        Some(code) => format!("Failed to fetch {}. Status Code: {code}", section.noun()),
        None => format!("Failed to fetch {}. {err}", section.noun()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftc_events_api::MatchTeam;

    fn team(number: u32, station: &str) -> MatchTeam {
        MatchTeam { team_number: number, station: station.into(), dq: false }
    }

    fn scored(red: Option<u32>, blue: Option<u32>) -> MatchRecord {
        MatchRecord {
            description: "Q7".into(),
            post_result_time: Some("2024-02-10T11:42:03.9".into()),
            teams: vec![team(1, "Red1"), team(2, "Red2"), team(3, "Blue1"), team(4, "Blue2")],
            score_red_final: red,
            score_blue_final: blue,
            ..Default::default()
        }
    }

    #[test]
    fn higher_red_score_emphasizes_red_only() {
        assert_eq!(winner_emphasis(Some(30), Some(20)), (true, false));
        assert_eq!(winner_emphasis(Some(20), Some(30)), (false, true));
    }

    #[test]
    fn tie_and_unknown_scores_emphasize_neither() {
        assert_eq!(winner_emphasis(Some(20), Some(20)), (false, false));
        assert_eq!(winner_emphasis(None, Some(20)), (false, false));
        assert_eq!(winner_emphasis(None, None), (false, false));
    }

    #[test]
    fn match_card_partitions_alliances_and_labels_scores() {
        let card = match_card(&scored(Some(30), Some(20)));
        assert_eq!(card.red.teams_label(), "1, 2");
        assert_eq!(card.blue.teams_label(), "3, 4");
        assert_eq!(card.red.score_label(), "30");
        assert!(card.red.emphasized);
        assert!(!card.blue.emphasized);
        assert_eq!(card.posted.as_deref(), Some("11:42"));
        assert!(card.completed);

        let pending = match_card(&scored(None, Some(20)));
        assert_eq!(pending.red.score_label(), UNKNOWN_SCORE);
        assert!(!pending.red.emphasized && !pending.blue.emphasized);
    }

    #[test]
    fn disqualified_teams_are_marked_on_the_card() {
        let mut m = scored(Some(30), Some(20));
        m.teams[3].dq = true;
        m.post_result_time = None;
        let card = match_card(&m);
        assert_eq!(card.blue.teams_label(), "3, 4 (DQ)");
        assert_eq!(card.red.teams_label(), "1, 2");
        assert!(!card.completed);
    }

    #[test]
    fn ranking_rows_format_record_and_tie_breakers() {
        let rows = ranking_rows(&[RankingRecord {
            rank: 1,
            team_number: 10195,
            team_name: "Night Owls".into(),
            wins: 5,
            losses: 0,
            ties: 1,
            tie_breaker_1: 112.5,
            tie_breaker_2: 48.0,
            ..Default::default()
        }]);
        assert_eq!(rows[0].record, "5-0-1");
        assert_eq!(rows[0].tbp1, "112.50");
        assert_eq!(rows[0].tbp2, "48");
        assert_eq!(rows[0].cells()[2], "Night Owls");
    }

    #[test]
    fn empty_rankings_render_an_empty_table() {
        let query = EventQuery::new("2024", "USNCCMP", "10195");
        let view = build_dashboard(DashboardInput {
            query: &query,
            rankings: Some(&[][..]),
            rankings_error: None,
            matches: None,
            matches_error: None,
            max_matches: 5,
        });
        assert!(view.rankings.is_empty());
        assert!(view.rankings_error.is_none());
        assert_eq!(view.stats.record, TeamRecord::default());
        assert_eq!(view.stats.record_label(), "0 - 0 - 0");
        assert!(view.stats.rank.is_none());
        assert!(view.stats.summary.is_none());
    }

    #[test]
    fn end_to_end_current_and_next_match() {
        let matches = vec![
            MatchRecord {
                description: "Q1".into(),
                teams: vec![team(1, "Red1"), team(2, "Blue1")],
                ..Default::default()
            },
            MatchRecord {
                description: "Q2".into(),
                post_result_time: Some("t".into()),
                teams: vec![team(3, "Red1"), team(4, "Blue1")],
                score_red_final: Some(10),
                score_blue_final: Some(5),
                ..Default::default()
            },
        ];
        let query = EventQuery::new("2024", "USNCCMP", "3");
        let view = build_dashboard(DashboardInput {
            query: &query,
            rankings: None,
            rankings_error: Some("Failed to fetch rankings. Status Code: 500"),
            matches: Some(matches.as_slice()),
            matches_error: None,
            max_matches: 5,
        });

        let highlights = view.highlights.expect("matches were loaded");
        assert_eq!(highlights.current, "Q1");
        assert_eq!(highlights.next, NO_UPCOMING_MATCH);
        assert_eq!(highlights.next_title, "Next Match (Team 3)");

        assert_eq!(view.recent.len(), 1);
        assert_eq!(view.recent[0].description, "Q2");
        assert!(view.recent[0].red.emphasized);

        // A rankings fault leaves the match sections intact.
        assert!(view.rankings.is_empty());
        assert!(view.rankings_error.is_some());
    }

    #[test]
    fn all_completed_event_reports_so() {
        let matches = vec![scored(Some(1), Some(2))];
        let h = highlights(&matches, "1");
        assert_eq!(h.current, ALL_MATCHES_COMPLETED);
        assert_eq!(h.next, NO_UPCOMING_MATCH);
    }

    #[test]
    fn stats_panel_reports_rank_out_of_field() {
        let rankings = vec![
            RankingRecord { rank: 1, team_number: 7236, ..Default::default() },
            RankingRecord { rank: 2, team_number: 10195, wins: 3, ..Default::default() },
        ];
        let panel = stats_panel(&rankings, "10195");
        assert_eq!(panel.title, "Team 10195 Statistics");
        assert_eq!(panel.rank, Some((2, 2)));
        assert_eq!(panel.record_label(), "3 - 0 - 0");
        assert_eq!(panel.summary.as_deref(), Some("0 matches played"));
    }

    #[test]
    fn stats_summary_includes_qualification_average() {
        let rankings = vec![RankingRecord {
            rank: 1,
            team_number: 10195,
            matches_played: 6,
            qual_average: Some(180.24),
            ..Default::default()
        }];
        let panel = stats_panel(&rankings, " 10195 ");
        assert_eq!(panel.summary.as_deref(), Some("6 matches played, 180.2 average"));
    }

    #[test]
    fn fault_message_names_the_status_code() {
        let err = ApiError::Fault { status: 403, url: "http://x/2024/rankings/E".into() };
        assert_eq!(fault_message(Section::Rankings, &err), "Failed to fetch rankings. Status Code: 403");
        assert_eq!(fault_message(Section::Matches, &err), "Failed to fetch match data. Status Code: 403");
    }
}
