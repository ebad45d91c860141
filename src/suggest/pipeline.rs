use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Quiet period after the last input change before a fetch is issued.
    pub debounce: Duration,
    /// Trimmed inputs shorter than this (in chars) never reach the service.
    pub min_input_len: usize,
    pub limit: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::from(config())
    }
}

impl From<&Config> for PipelineSettings {
    fn from(config: &Config) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            min_input_len: config.min_input_len,
            limit: config.suggestion_limit,
        }
    }
}

/// What the suggestion panel should currently show.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SuggestionState {
    #[default]
    Idle,
    Loading,
    Ready(Vec<QuerySuggestion>),
    /// The list is cleared and the message shown inline. No retry follows.
    Failed(String),
}

impl SuggestionState {
    pub fn suggestions(&self) -> &[QuerySuggestion] {
        match self {
            SuggestionState::Ready(list) => list,
            _ => &[],
        }
    }
}

/// A suggestion as rendered, with favorite status looked up at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSuggestion {
    pub suggestion: QuerySuggestion,
    pub is_favorite: bool,
}

struct Shared {
    service: Arc<dyn SuggestionService>,
    favorites: Arc<Favorites>,
    settings: PipelineSettings,
    /// Identity of the most recently issued request. Responses for any
    /// other id are dropped.
    latest: AtomicU64,
    state: watch::Sender<SuggestionState>,
}

impl Shared {
    fn is_latest(&self, request: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == request
    }

    async fn request(&self, sql: String, server_id: Option<String>) -> Result<Vec<QuerySuggestion>> {
        let params = SuggestionParams {
            sql,
            server_id,
            limit: Some(self.settings.limit),
        };
        let mut suggestions = self
            .service
            .get_query_suggestions(params)
            .await
            .map_err(|e| match e {
                Error::SuggestionFetchFailed(_) => e,
                other => Error::SuggestionFetchFailed(other.to_string()),
            })?;
        suggestions.truncate(self.settings.limit);
        Ok(suggestions)
    }

    async fn fetch(self: Arc<Self>, request: u64, sql: String, server_id: Option<String>) {
        if !self.is_latest(request) {
            return;
        }
        debug!("Issuing suggestion request {request}");
        self.state.send_replace(SuggestionState::Loading);

        let result = self.request(sql, server_id).await;
        if !self.is_latest(request) {
            debug!("Discarding stale suggestions for request {request}");
            return;
        }
        let next = match result {
            Ok(list) => {
                trace!("Request {request} returned {} suggestions", list.len());
                SuggestionState::Ready(list)
            }
            Err(e) => {
                warn!("Suggestion request {request} failed: {e}");
                SuggestionState::Failed(e.to_string())
            }
        };
        self.state.send_replace(next);
    }
}

/// Debounced query suggestions for one editor.
///
/// Every input change re-arms a single quiet-period timer; only the text
/// present when it fires is sent. A fetch already issued is never aborted,
/// but its response is ignored once a newer change has arrived, so results
/// land in request order rather than arrival order.
pub struct SuggestionPipeline {
    shared: Arc<Shared>,
    pending: Option<JoinHandle<()>>,
}

impl SuggestionPipeline {
    pub fn new(
        service: Arc<dyn SuggestionService>,
        favorites: Arc<Favorites>,
        settings: PipelineSettings,
    ) -> Self {
        let (state, _) = watch::channel(SuggestionState::Idle);
        Self {
            shared: Arc::new(Shared {
                service,
                favorites,
                settings,
                latest: AtomicU64::new(0),
                state,
            }),
            pending: None,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.shared.settings
    }

    /// Record an input change and (re)arm the debounce timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_input_change(&mut self, sql: impl Into<String>, server_id: Option<String>) {
        let request = self.shared.latest.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(timer) = self.pending.take() {
            trace!("Re-arming suggestion timer");
            timer.abort();
        }

        let sql = sql.into();
        if sql.trim().chars().count() < self.shared.settings.min_input_len {
            self.shared.state.send_replace(SuggestionState::Idle);
            return;
        }

        let shared = Arc::clone(&self.shared);
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(shared.settings.debounce).await;
            // Its own task, so re-arming the timer cannot abort an issued fetch.
            tokio::spawn(shared.fetch(request, sql, server_id));
        }));
    }

    /// Fetch immediately, bypassing the debounce timer and the state channel.
    pub async fn get_suggestions(
        &self,
        sql: &str,
        server_id: Option<&str>,
    ) -> Result<Vec<QuerySuggestion>> {
        self.shared
            .request(sql.to_string(), server_id.map(str::to_string))
            .await
    }

    /// Drop any pending timer and ignore in-flight responses.
    pub fn cancel(&mut self) {
        self.shared.latest.fetch_add(1, Ordering::SeqCst);
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
        self.shared.state.send_replace(SuggestionState::Idle);
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.shared.state.subscribe()
    }

    pub fn state(&self) -> SuggestionState {
        self.shared.state.borrow().clone()
    }

    pub fn favorites(&self) -> &Arc<Favorites> {
        &self.shared.favorites
    }

    pub async fn is_favorite(&self, suggestion: &QuerySuggestion) -> bool {
        self.shared.favorites.contains(&suggestion.sql_text).await
    }

    pub async fn toggle_favorite(&self, suggestion: &QuerySuggestion) -> Result<bool> {
        self.shared.favorites.toggle(&suggestion.sql_text).await
    }

    /// The current list with favorite status resolved against the live set.
    pub async fn render(&self) -> Vec<RenderedSuggestion> {
        let favorites = self.shared.favorites.snapshot().await;
        let state = self.state();
        state
            .suggestions()
            .iter()
            .map(|suggestion| RenderedSuggestion {
                is_favorite: favorites.contains(&suggestion.sql_text),
                suggestion: suggestion.clone(),
            })
            .collect()
    }
}

impl Drop for SuggestionPipeline {
    fn drop(&mut self) {
        if let Some(timer) = self.pending.take() {
            timer.abort();
        }
    }
}

impl std::fmt::Debug for SuggestionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionPipeline")
            .field("settings", &self.shared.settings)
            .field("latest", &self.shared.latest.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
