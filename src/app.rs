use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, EventQuery, Section};
use crate::state::presentation::{DashboardInput, DashboardView, build_dashboard};
use ftc_events_api::{MatchRecord, RankingRecord};
use log::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Dashboard,
    Rankings,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(settings.query.clone()),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Responses for a query the user has since replaced are dropped.
    fn is_current(&self, query: &EventQuery) -> bool {
        if &self.state.query != query {
            debug!("dropping stale response for {}/{}", query.season, query.event_code);
            return false;
        }
        true
    }

    pub fn on_rankings_loaded(&mut self, query: EventQuery, rankings: Vec<RankingRecord>) {
        if self.is_current(&query) {
            self.state.rankings.load(rankings);
            self.clamp_rankings_scroll();
        }
    }

    pub fn on_matches_loaded(&mut self, query: EventQuery, matches: Vec<MatchRecord>) {
        if self.is_current(&query) {
            self.state.matches.load(matches);
        }
    }

    pub fn on_fault(&mut self, query: EventQuery, section: Section, message: String) {
        if self.is_current(&query) {
            self.state.fail_section(section, message);
        }
    }

    /// The query to fetch, if all three inputs are filled in.
    pub fn refresh_query(&self) -> Option<EventQuery> {
        self.state
            .query
            .is_complete()
            .then(|| self.state.query.trimmed())
    }

    pub fn dashboard_view(&self) -> DashboardView {
        build_dashboard(DashboardInput {
            query: &self.state.query,
            rankings: self.state.rankings.data.as_deref(),
            rankings_error: self.state.rankings.error.as_deref(),
            matches: self.state.matches.data.as_deref(),
            matches_error: self.state.matches.error.as_deref(),
            max_matches: self.settings.max_matches,
        })
    }

    // -----------------------------------------------------------------------
    // Query editing
    // -----------------------------------------------------------------------

    pub fn open_query_editor(&mut self) {
        let query = self.state.query.clone();
        self.state.editor.open(&query);
    }

    /// Applies the edited query; returns it when it should be fetched.
    pub fn submit_query_editor(&mut self) -> Option<EventQuery> {
        let query = self.state.editor.submit();
        self.state.set_query(query);
        self.refresh_query()
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Rankings tab scrolling
    // -----------------------------------------------------------------------

    pub fn rankings_scroll_down(&mut self) {
        self.state.rankings_scroll = self.state.rankings_scroll.saturating_add(1);
        self.clamp_rankings_scroll();
    }

    pub fn rankings_scroll_up(&mut self) {
        self.state.rankings_scroll = self.state.rankings_scroll.saturating_sub(1);
    }

    fn clamp_rankings_scroll(&mut self) {
        let rows = self.state.rankings.data.as_ref().map(Vec::len).unwrap_or(0);
        self.state.rankings_scroll = self.state.rankings_scroll.min(rows.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_query(query: EventQuery) -> App {
        App::new(AppSettings { query, ..Default::default() })
    }

    #[test]
    fn incomplete_query_has_nothing_to_refresh() {
        let app = app_with_query(EventQuery::new("2024", "", "10195"));
        assert!(app.refresh_query().is_none());
    }

    #[test]
    fn stale_responses_are_ignored() {
        let current = EventQuery::new("2024", "USNCCMP", "10195");
        let mut app = app_with_query(current.clone());

        app.on_rankings_loaded(EventQuery::new("2024", "OTHER", "10195"), vec![RankingRecord::default()]);
        assert!(app.state.rankings.data.is_none());

        app.on_rankings_loaded(current, vec![RankingRecord::default()]);
        assert_eq!(app.state.rankings.data.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn fault_empties_only_its_section() {
        let query = EventQuery::new("2024", "USNCCMP", "10195");
        let mut app = app_with_query(query.clone());
        app.on_rankings_loaded(query.clone(), vec![RankingRecord::default()]);
        app.on_matches_loaded(query.clone(), vec![]);

        app.on_fault(query, Section::Matches, "Failed to fetch match data. Status Code: 500".into());

        let view = app.dashboard_view();
        assert_eq!(view.rankings.len(), 1);
        assert!(!view.matches_loaded);
        assert_eq!(view.matches_error.as_deref(), Some("Failed to fetch match data. Status Code: 500"));
    }

    #[test]
    fn submitting_editor_switches_query() {
        let mut app = app_with_query(EventQuery::new("2024", "USNCCMP", "10195"));
        app.open_query_editor();
        app.state.editor.cycle_field();
        app.state.editor.cycle_field();
        app.state.editor.backspace();
        app.state.editor.push_char('6');

        let next = app.submit_query_editor().expect("complete query");
        assert_eq!(next, EventQuery::new("2024", "USNCCMP", "10196"));
        assert_eq!(app.state.query, next);
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app_with_query(EventQuery::default());
        app.update_tab(MenuItem::Rankings);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Rankings);
    }

    #[test]
    fn rankings_scroll_stays_within_rows() {
        let query = EventQuery::new("2024", "USNCCMP", "10195");
        let mut app = app_with_query(query.clone());
        app.on_rankings_loaded(query, vec![RankingRecord::default(); 3]);
        for _ in 0..10 {
            app.rankings_scroll_down();
        }
        assert_eq!(app.state.rankings_scroll, 2);
        app.rankings_scroll_up();
        assert_eq!(app.state.rankings_scroll, 1);
    }
}
