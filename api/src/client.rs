use crate::ftc::{FtcMatch, FtcMatchTeam, FtcRanking, MatchesResponse, RankingsResponse};
use crate::{MatchRecord, MatchTeam, RankingRecord};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

pub const FTC_EVENTS_V2: &str = "https://ftc-api.firstinspires.org/v2.0";

/// How requests authenticate against the FTC Events API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Credentials {
    #[default]
    Anonymous,
    /// Pre-encoded `base64(username:key)`, sent as `Authorization: Basic <token>`.
    Token(String),
    /// Raw username and authorization key; encoded per request.
    Basic { username: String, key: String },
}

/// Connection settings injected into [`FtcEventsApi`] at construction time.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub credentials: Credentials,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: FTC_EVENTS_V2.to_owned(), credentials: Credentials::Anonymous }
    }
}

/// FTC Events API client: one GET per call, no retries, no caching.
#[derive(Debug, Clone)]
pub struct FtcEventsApi {
    client: Client,
    config: ApiConfig,
}

impl Default for FtcEventsApi {
    fn default() -> Self {
        Self::new(ApiConfig::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    /// Upstream answered with a non-success status.
    Fault { status: u16, url: String },
    Network(reqwest::Error, String),
    Parsing(serde_json::Error, String),
    Config(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Fault { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Fault { status, url } => write!(f, "Status Code: {status} ({url})"),
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FtcEventsApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("ftcdash/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Fetch the qualification rankings for one event.
    pub async fn fetch_rankings(&self, season: &str, event_code: &str) -> ApiResult<Vec<RankingRecord>> {
        let url = self.event_url(season, "rankings", event_code)?;
        let raw: RankingsResponse = self.get(&url, &[]).await?;
        Ok(raw.rankings.unwrap_or_default().iter().filter_map(map_ranking).collect())
    }

    /// Fetch the match list for one event, tagged with the team of interest.
    ///
    /// The returned order is the API's, which is treated as chronological.
    pub async fn fetch_matches(
        &self,
        season: &str,
        event_code: &str,
        team_number: &str,
    ) -> ApiResult<Vec<MatchRecord>> {
        let url = self.event_url(season, "matches", event_code)?;
        let mut query = Vec::new();
        let team_number = team_number.trim();
        if !team_number.is_empty() {
            query.push(("team", team_number));
        }
        let raw: MatchesResponse = self.get(&url, &query).await?;
        Ok(raw.matches.unwrap_or_default().iter().map(map_match).collect())
    }

    fn event_url(&self, season: &str, resource: &str, event_code: &str) -> ApiResult<String> {
        let season = season.trim();
        let event_code = event_code.trim();
        if season.is_empty() || event_code.is_empty() {
            return Err(ApiError::Config("season and event code are required".into()));
        }
        let base = self.config.base_url.trim_end_matches('/');
        Ok(format!("{base}/{season}/{resource}/{event_code}"))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> ApiResult<T> {
        let request = self.client.get(url).query(query);
        let request = match &self.config.credentials {
            Credentials::Anonymous => request,
            Credentials::Token(token) => request.header(AUTHORIZATION, format!("Basic {token}")),
            Credentials::Basic { username, key } => request.basic_auth(username, Some(key)),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let url = response.url().to_string();
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Fault { status: status.as_u16(), url });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parsing(e, url))
    }
}

// ---------------------------------------------------------------------------
// Mapping: FTC wire types → clean domain types
// ---------------------------------------------------------------------------

/// Rows without a team number cannot be joined on and are dropped.
fn map_ranking(r: &FtcRanking) -> Option<RankingRecord> {
    Some(RankingRecord {
        rank: r.rank.unwrap_or_default(),
        team_number: r.team_number?,
        team_name: r.team_name.clone().unwrap_or_default(),
        wins: r.wins.unwrap_or_default(),
        losses: r.losses.unwrap_or_default(),
        ties: r.ties.unwrap_or_default(),
        tie_breaker_1: r.sort_order2.unwrap_or_default(),
        tie_breaker_2: r.sort_order3.unwrap_or_default(),
        matches_played: r.matches_played.unwrap_or_default(),
        qual_average: r.qual_average,
    })
}

fn map_match(m: &FtcMatch) -> MatchRecord {
    MatchRecord {
        description: m.description.clone().unwrap_or_default(),
        post_result_time: m.post_result_time.clone(),
        teams: m.teams.iter().flatten().filter_map(map_match_team).collect(),
        score_red_final: m.score_red_final,
        score_blue_final: m.score_blue_final,
    }
}

fn map_match_team(t: &FtcMatchTeam) -> Option<MatchTeam> {
    Some(MatchTeam {
        team_number: t.team_number?,
        station: t.station.clone().unwrap_or_default(),
        dq: t.dq.unwrap_or(false),
    })
}
