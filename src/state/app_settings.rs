use crate::state::app_state::EventQuery;
use ftc_events_api::client::{ApiConfig, Credentials, FTC_EVENTS_V2};
use log::LevelFilter;
use std::time::Duration;

pub const DEFAULT_MAX_MATCHES: usize = 5;
pub const DEFAULT_REFRESH_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api: ApiConfig,
    /// Query shown on startup; fetched immediately when complete.
    pub query: EventQuery,
    /// How many of the team's most recent matches to list.
    pub max_matches: usize,
    /// `None` disables periodic refresh.
    pub refresh_interval: Option<Duration>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: None,
            api: ApiConfig::default(),
            query: EventQuery::default(),
            max_matches: DEFAULT_MAX_MATCHES,
            refresh_interval: Some(Duration::from_secs(DEFAULT_REFRESH_SECS)),
        }
    }
}

impl AppSettings {
    /// Settings from the process environment, after loading `.env` if present.
    pub fn load() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_env(|key| std::env::var(key).ok())
    }

    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let credentials = match (get("FTC_API_TOKEN"), get("FTC_API_USERNAME"), get("FTC_API_KEY")) {
            (Some(token), _, _) => Credentials::Token(token),
            (None, Some(username), Some(key)) => Credentials::Basic { username, key },
            _ => Credentials::Anonymous,
        };

        let api = ApiConfig {
            base_url: get("FTC_API_URL").unwrap_or_else(|| FTC_EVENTS_V2.to_string()),
            credentials,
        };

        let refresh_interval = match get("FTCDASH_REFRESH_SECS").and_then(|v| v.parse::<u64>().ok()) {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => defaults.refresh_interval,
        };

        Self {
            full_screen: false,
            log_level: get("FTCDASH_LOG").and_then(|v| v.parse::<LevelFilter>().ok()),
            api,
            query: EventQuery::new(
                get("FTCDASH_SEASON").unwrap_or_default(),
                get("FTCDASH_EVENT").unwrap_or_default(),
                get("FTCDASH_TEAM").unwrap_or_default(),
            ),
            max_matches: get("FTCDASH_MAX_MATCHES")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.max_matches),
            refresh_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> AppSettings {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_env(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let s = settings_from(&[]);
        assert_eq!(s.api.base_url, FTC_EVENTS_V2);
        assert_eq!(s.api.credentials, Credentials::Anonymous);
        assert_eq!(s.max_matches, DEFAULT_MAX_MATCHES);
        assert_eq!(s.refresh_interval, Some(Duration::from_secs(DEFAULT_REFRESH_SECS)));
        assert!(!s.query.is_complete());
        assert!(s.log_level.is_none());
    }

    #[test]
    fn token_wins_over_username_and_key() {
        let s = settings_from(&[
            ("FTC_API_TOKEN", "abc123"),
            ("FTC_API_USERNAME", "user"),
            ("FTC_API_KEY", "key"),
        ]);
        assert_eq!(s.api.credentials, Credentials::Token("abc123".into()));

        let s = settings_from(&[("FTC_API_USERNAME", "user"), ("FTC_API_KEY", "key")]);
        assert_eq!(
            s.api.credentials,
            Credentials::Basic { username: "user".into(), key: "key".into() }
        );
    }

    #[test]
    fn query_and_display_options_come_from_env() {
        let s = settings_from(&[
            ("FTCDASH_SEASON", "2024"),
            ("FTCDASH_EVENT", " USNCCMP "),
            ("FTCDASH_TEAM", "10195"),
            ("FTCDASH_MAX_MATCHES", "8"),
            ("FTCDASH_REFRESH_SECS", "0"),
            ("FTCDASH_LOG", "debug"),
            ("FTC_API_URL", "http://localhost:8080/v2.0"),
        ]);
        assert_eq!(s.query, EventQuery::new("2024", "USNCCMP", "10195"));
        assert_eq!(s.max_matches, 8);
        assert_eq!(s.refresh_interval, None);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
        assert_eq!(s.api.base_url, "http://localhost:8080/v2.0");
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let s = settings_from(&[("FTCDASH_MAX_MATCHES", "lots"), ("FTCDASH_REFRESH_SECS", "-1")]);
        assert_eq!(s.max_matches, DEFAULT_MAX_MATCHES);
        assert_eq!(s.refresh_interval, Some(Duration::from_secs(DEFAULT_REFRESH_SECS)));
    }
}
