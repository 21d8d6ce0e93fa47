use crate::state::selection::parse_team_number;
use ftc_events_api::{RankingRecord, TeamRecord};

/// Win/loss/tie record for the team typed into the query.
///
/// A team missing from the rankings (or an unparsable input) resolves to
/// 0-0-0, which displays the same as a team that has not won, lost or tied.
pub fn resolve_record(rankings: &[RankingRecord], team_input: &str) -> TeamRecord {
    find_ranking(rankings, team_input)
        .map(RankingRecord::record)
        .unwrap_or_default()
}

pub fn find_ranking<'a>(rankings: &'a [RankingRecord], team_input: &str) -> Option<&'a RankingRecord> {
    let team_number = parse_team_number(team_input)?;
    rankings.iter().find(|r| r.team_number == team_number)
}
