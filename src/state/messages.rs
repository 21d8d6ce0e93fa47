use crate::state::app_state::{EventQuery, Section};
use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use ftc_events_api::{MatchRecord, RankingRecord};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    /// Fetch rankings, then matches, for one query.
    Refresh { query: EventQuery },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    RankingsLoaded { query: EventQuery, rankings: Vec<RankingRecord> },
    MatchesLoaded { query: EventQuery, matches: Vec<MatchRecord> },
    /// One endpoint failed; its section is emptied for this cycle.
    Fault { query: EventQuery, section: Section, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    RefreshDue,
}
