use crate::state::app_state::{EventQuery, Section};
use crate::state::messages::{NetworkRequest, NetworkResponse};
use crate::state::presentation::fault_message;
use ftc_events_api::client::{ApiConfig, FtcEventsApi};
use log::{debug, error, warn};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

const SPINNER_FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_PERIOD: Duration = Duration::from_millis(33);
pub const ERROR_CHAR: char = '!';

/// Spinner glyph shown in the corner of the screen while a refresh runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl LoadingState {
    fn frame(tick: usize) -> Self {
        Self { is_loading: true, spinner_char: SPINNER_FRAMES[tick % SPINNER_FRAMES.len()] }
    }

    /// Blank after a clean refresh, `!` if any section failed.
    fn finished(all_ok: bool) -> Self {
        Self { is_loading: false, spinner_char: if all_ok { ' ' } else { ERROR_CHAR } }
    }
}

impl Default for LoadingState {
    fn default() -> Self {
        Self::finished(true)
    }
}

/// Serves refresh requests one at a time, so requests never overlap.
pub struct NetworkWorker {
    client: FtcEventsApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        config: ApiConfig,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: FtcEventsApi::new(config),
            requests,
            responses,
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let spinner = self.spawn_spinner();

            let responses = match request {
                NetworkRequest::Refresh { query } => self.handle_refresh(query).await,
            };

            let all_ok = responses
                .iter()
                .all(|r| !matches!(r, NetworkResponse::Fault { .. }));
            debug!("network request complete");
            spinner.abort();
            // A frame sent after this point would hide the finished state.
            let _ = spinner.await;
            let _ = self
                .responses
                .send(NetworkResponse::LoadingStateChanged { loading_state: LoadingState::finished(all_ok) })
                .await;

            for response in responses {
                if let Err(e) = self.responses.send(response).await {
                    error!("Failed to send network response: {e}");
                    return;
                }
            }
        }
    }

    /// One fetch per section. A failing section does not stop the other.
    async fn handle_refresh(&self, query: EventQuery) -> Vec<NetworkResponse> {
        debug!(
            "refreshing {} {} for team {}",
            query.season, query.event_code, query.team_number
        );
        let mut out = Vec::with_capacity(2);

        match self.client.fetch_rankings(&query.season, &query.event_code).await {
            Ok(rankings) => {
                debug!("loaded {} rankings", rankings.len());
                out.push(NetworkResponse::RankingsLoaded { query: query.clone(), rankings });
            }
            Err(e) => {
                warn!("rankings fetch failed: {e}");
                out.push(NetworkResponse::Fault {
                    query: query.clone(),
                    section: Section::Rankings,
                    message: fault_message(Section::Rankings, &e),
                });
            }
        }

        match self
            .client
            .fetch_matches(&query.season, &query.event_code, &query.team_number)
            .await
        {
            Ok(matches) => {
                debug!("loaded {} matches", matches.len());
                out.push(NetworkResponse::MatchesLoaded { query, matches });
            }
            Err(e) => {
                warn!("match fetch failed: {e}");
                out.push(NetworkResponse::Fault {
                    query,
                    section: Section::Matches,
                    message: fault_message(Section::Matches, &e),
                });
            }
        }

        out
    }

    /// Streams spinner frames to the UI until the returned task is aborted.
    fn spawn_spinner(&self) -> JoinHandle<()> {
        let responses = self.responses.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(SPINNER_PERIOD);
            for tick in 0.. {
                ticker.tick().await;
                let loading_state = LoadingState::frame(tick);
                if responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await
                    .is_err()
                {
                    break;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const MATCHES_JSON: &str = r#"{"matches": [
        {"description": "Qualification 1", "postResultTime": "2024-02-10T09:05:40",
         "scoreRedFinal": 30, "scoreBlueFinal": 20,
         "teams": [{"teamNumber": 3, "station": "Red1"}, {"teamNumber": 4, "station": "Blue1"}]},
        {"description": "Qualification 2",
         "teams": [{"teamNumber": 5, "station": "Red1"}, {"teamNumber": 3, "station": "Blue1"}]}
    ]}"#;

    async fn event_server(rankings_status: usize) -> mockito::ServerGuard {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/2024/rankings/USNCCMP")
            .with_status(rankings_status)
            .with_body(r#"{"rankings": []}"#)
            .create_async()
            .await;
        server
            .mock("GET", Matcher::Regex(r"^/2024/matches/USNCCMP".into()))
            .with_status(200)
            .with_body(MATCHES_JSON)
            .create_async()
            .await;
        server
    }

    fn worker_for(
        server: &mockito::ServerGuard,
    ) -> (NetworkWorker, mpsc::Sender<NetworkRequest>, mpsc::Receiver<NetworkResponse>) {
        let (req_tx, req_rx) = mpsc::channel(8);
        let (resp_tx, resp_rx) = mpsc::channel(64);
        let config = ApiConfig { base_url: server.url(), ..Default::default() };
        (NetworkWorker::new(config, req_rx, resp_tx), req_tx, resp_rx)
    }

    #[tokio::test]
    async fn failed_rankings_do_not_stop_the_match_fetch() {
        let server = event_server(500).await;
        let (worker, _req_tx, _resp_rx) = worker_for(&server);

        let out = worker.handle_refresh(EventQuery::new("2024", "USNCCMP", "3")).await;

        assert_eq!(out.len(), 2);
        assert!(matches!(
            &out[0],
            NetworkResponse::Fault { section: Section::Rankings, message, .. }
                if message == "Failed to fetch rankings. Status Code: 500"
        ));
        assert!(matches!(
            &out[1],
            NetworkResponse::MatchesLoaded { matches, .. } if matches.len() == 2
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn finished_state_is_the_last_spinner_update() {
        let server = event_server(200).await;
        let (worker, req_tx, mut resp_rx) = worker_for(&server);
        let task = tokio::spawn(worker.run());

        let query = EventQuery::new("2024", "USNCCMP", "3");
        req_tx.send(NetworkRequest::Refresh { query }).await.expect("request");
        drop(req_tx);

        let mut loading_states = Vec::new();
        let mut loaded = 0;
        while let Some(response) = resp_rx.recv().await {
            match response {
                NetworkResponse::LoadingStateChanged { loading_state } => loading_states.push(loading_state),
                NetworkResponse::RankingsLoaded { .. } | NetworkResponse::MatchesLoaded { .. } => loaded += 1,
                NetworkResponse::Fault { message, .. } => panic!("unexpected fault: {message}"),
            }
        }
        task.await.expect("worker");

        assert_eq!(loaded, 2);
        assert_eq!(loading_states.last(), Some(&LoadingState::finished(true)));
        assert_eq!(loading_states.iter().filter(|s| !s.is_loading).count(), 1);
    }

    #[test]
    fn spinner_frames_wrap_around() {
        assert_eq!(LoadingState::frame(0).spinner_char, '⠋');
        assert_eq!(LoadingState::frame(10), LoadingState::frame(0));
        assert!(LoadingState::frame(3).is_loading);
    }

    #[test]
    fn finished_state_flags_failures() {
        assert_eq!(LoadingState::finished(true), LoadingState::default());
        assert_eq!(LoadingState::finished(false).spinner_char, ERROR_CHAR);
        assert!(!LoadingState::finished(false).is_loading);
    }
}
