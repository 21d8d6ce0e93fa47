/// FTC Events API v2 raw wire types used to deserialize responses.
/// These map to the clean domain types via the mapping functions in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Rankings  (GET /{season}/rankings/{eventCode})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RankingsResponse {
    #[serde(alias = "Rankings")]
    pub rankings: Option<Vec<FtcRanking>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FtcRanking {
    pub rank: Option<u32>,
    pub team_number: Option<u32>,
    pub team_name: Option<String>,
    /// Displayed as TBP1.
    pub sort_order2: Option<f64>,
    /// Displayed as TBP2.
    pub sort_order3: Option<f64>,
    pub wins: Option<u32>,
    pub losses: Option<u32>,
    pub ties: Option<u32>,
    pub matches_played: Option<u32>,
    pub qual_average: Option<f64>,
}

// ---------------------------------------------------------------------------
// Matches  (GET /{season}/matches/{eventCode})
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct MatchesResponse {
    #[serde(alias = "Matches")]
    pub matches: Option<Vec<FtcMatch>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FtcMatch {
    pub description: Option<String>,
    /// Null until the result is posted.
    pub post_result_time: Option<String>,
    pub score_red_final: Option<u32>,
    pub score_blue_final: Option<u32>,
    pub teams: Option<Vec<FtcMatchTeam>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FtcMatchTeam {
    /// Null for unfilled playoff slots.
    pub team_number: Option<u32>,
    pub station: Option<String>,
    pub dq: Option<bool>,
}
