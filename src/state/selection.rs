use ftc_events_api::MatchRecord;

/// Earliest not-yet-completed match across the whole event.
///
/// API order is taken as chronological; the first open match wins.
pub fn current_match(matches: &[MatchRecord]) -> Option<&MatchRecord> {
    matches.iter().find(|m| !m.is_completed())
}

/// First not-yet-completed match that `team_number` plays in.
pub fn next_team_match(matches: &[MatchRecord], team_number: u32) -> Option<&MatchRecord> {
    matches
        .iter()
        .find(|m| m.has_team(team_number) && !m.is_completed())
}

/// The last `max` matches containing `team_number`, in API order.
///
/// Played and upcoming matches are treated alike.
pub fn recent_window(matches: &[MatchRecord], team_number: u32, max: usize) -> Vec<&MatchRecord> {
    let team_matches: Vec<&MatchRecord> = matches.iter().filter(|m| m.has_team(team_number)).collect();
    let skip = team_matches.len().saturating_sub(max);
    team_matches.into_iter().skip(skip).collect()
}

/// Normalize the free-text team input to a team number.
pub fn parse_team_number(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok()
}
