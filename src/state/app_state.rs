use crate::app::MenuItem;
use chrono::{DateTime, Local};
use ftc_events_api::{MatchRecord, RankingRecord};

// ---------------------------------------------------------------------------
// Query: the three free-text inputs that select what to fetch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub season: String,
    pub event_code: String,
    pub team_number: String,
}

impl EventQuery {
    pub fn new(season: impl Into<String>, event_code: impl Into<String>, team_number: impl Into<String>) -> Self {
        Self {
            season: season.into(),
            event_code: event_code.into(),
            team_number: team_number.into(),
        }
    }

    /// All three inputs must be non-empty before anything is fetched.
    pub fn is_complete(&self) -> bool {
        !self.season.trim().is_empty()
            && !self.event_code.trim().is_empty()
            && !self.team_number.trim().is_empty()
    }

    pub fn trimmed(&self) -> Self {
        Self::new(self.season.trim(), self.event_code.trim(), self.team_number.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Rankings,
    Matches,
}

impl Section {
    /// Noun used in user-facing fault messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Section::Rankings => "rankings",
            Section::Matches => "match data",
        }
    }
}

// ---------------------------------------------------------------------------
// Fetched snapshots
// ---------------------------------------------------------------------------

/// One dashboard section's latest snapshot. A failed refresh replaces the
/// previous data with an error, so stale data is never shown next to a fault.
#[derive(Debug)]
pub struct SectionState<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Local>>,
}

impl<T> Default for SectionState<T> {
    fn default() -> Self {
        Self { data: None, error: None, updated_at: None }
    }
}

impl<T> SectionState<T> {
    pub fn load(&mut self, data: T) {
        self.data = Some(data);
        self.error = None;
        self.updated_at = Some(Local::now());
    }

    pub fn fail(&mut self, message: String) {
        self.data = None;
        self.error = Some(message);
        self.updated_at = Some(Local::now());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Query editor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryField {
    #[default]
    Season,
    Event,
    Team,
}

impl QueryField {
    pub fn next(self) -> Self {
        match self {
            QueryField::Season => QueryField::Event,
            QueryField::Event => QueryField::Team,
            QueryField::Team => QueryField::Season,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QueryField::Season => "Season Year",
            QueryField::Event => "Event Code",
            QueryField::Team => "Team Number",
        }
    }
}

#[derive(Debug, Default)]
pub struct QueryEditor {
    pub active: bool,
    pub field: QueryField,
    pub draft: EventQuery,
}

impl QueryEditor {
    pub fn open(&mut self, current: &EventQuery) {
        self.active = true;
        self.field = QueryField::Season;
        self.draft = current.clone();
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn cycle_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn push_char(&mut self, c: char) {
        let c = match self.field {
            QueryField::Event => c.to_ascii_uppercase(),
            _ => c,
        };
        self.active_input_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_input_mut().pop();
    }

    pub fn value(&self, field: QueryField) -> &str {
        match field {
            QueryField::Season => &self.draft.season,
            QueryField::Event => &self.draft.event_code,
            QueryField::Team => &self.draft.team_number,
        }
    }

    /// Close the editor and hand back the trimmed draft.
    pub fn submit(&mut self) -> EventQuery {
        self.active = false;
        self.draft.trimmed()
    }

    fn active_input_mut(&mut self) -> &mut String {
        match self.field {
            QueryField::Season => &mut self.draft.season,
            QueryField::Event => &mut self.draft.event_code,
            QueryField::Team => &mut self.draft.team_number,
        }
    }
}

// ---------------------------------------------------------------------------
// Root state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub query: EventQuery,
    pub rankings: SectionState<Vec<RankingRecord>>,
    pub matches: SectionState<Vec<MatchRecord>>,
    pub editor: QueryEditor,
    /// First visible row on the Rankings tab.
    pub rankings_scroll: usize,
    pub show_logs: bool,
}

impl AppState {
    pub fn new(query: EventQuery) -> Self {
        Self { query, ..Default::default() }
    }

    pub fn fail_section(&mut self, section: Section, message: String) {
        match section {
            Section::Rankings => self.rankings.fail(message),
            Section::Matches => self.matches.fail(message),
        }
    }

    /// Replace the query. Snapshots for the old query are dropped.
    pub fn set_query(&mut self, query: EventQuery) {
        if self.query != query {
            self.rankings.clear();
            self.matches.clear();
            self.rankings_scroll = 0;
        }
        self.query = query;
    }
}
