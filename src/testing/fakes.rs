use crate::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// `dbo.users(id uuid, email text)` and `orders(total numeric)`.
pub fn sample_snapshot() -> SchemaSnapshot {
    SchemaSnapshot::new([
        Table::new_with_ordered("users", [("id", "uuid"), ("email", "text")]).in_namespace("dbo"),
        Table::new_with_ordered("orders", [("total", "numeric")]),
    ])
}

/// Schema backend serving canned snapshots. Servers without one fail.
#[derive(Debug, Default)]
pub struct FakeSchemaService {
    schemas: Mutex<HashMap<String, SchemaSnapshot>>,
    failing: Mutex<HashSet<String>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeSchemaService {
    pub fn with_schema(server_id: &str, snapshot: SchemaSnapshot) -> Self {
        let service = Self::default();
        service.set_schema(server_id, snapshot);
        service
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn set_schema(&self, server_id: &str, snapshot: SchemaSnapshot) {
        lock(&self.failing).remove(server_id);
        lock(&self.schemas).insert(server_id.to_string(), snapshot);
    }

    pub fn fail(&self, server_id: &str) {
        lock(&self.failing).insert(server_id.to_string());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SchemaService for FakeSchemaService {
    async fn get_server_schema(&self, server_id: &str) -> Result<SchemaSnapshot> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if lock(&self.failing).contains(server_id) {
            return Err(Error::Internal(format!("server {server_id} unreachable")));
        }
        lock(&self.schemas)
            .get(server_id)
            .cloned()
            .ok_or_else(|| Error::Internal(format!("unknown server {server_id}")))
    }
}

/// Suggestion backend with canned answers per input text and per-text latency.
#[derive(Debug, Default)]
pub struct FakeSuggestionService {
    responses: Mutex<HashMap<String, Vec<QuerySuggestion>>>,
    delays: Mutex<HashMap<String, Duration>>,
    failing: AtomicBool,
    requests: Mutex<Vec<SuggestionParams>>,
}

impl FakeSuggestionService {
    pub fn with_response(self, sql: &str, suggestions: Vec<QuerySuggestion>) -> Self {
        lock(&self.responses).insert(sql.to_string(), suggestions);
        self
    }

    pub fn with_delay(self, sql: &str, delay: Duration) -> Self {
        lock(&self.delays).insert(sql.to_string(), delay);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<SuggestionParams> {
        lock(&self.requests).clone()
    }

    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait::async_trait]
impl SuggestionService for FakeSuggestionService {
    async fn get_query_suggestions(&self, params: SuggestionParams) -> Result<Vec<QuerySuggestion>> {
        let sql = params.sql.clone();
        lock(&self.requests).push(params);
        let delay = lock(&self.delays).get(&sql).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Internal("suggestion backend offline".into()));
        }
        Ok(lock(&self.responses).get(&sql).cloned().unwrap_or_default())
    }
}

/// Favorites backed by an in-memory JSON store seeded with `initial`.
pub async fn memory_favorites(initial: &[&str]) -> Arc<Favorites> {
    let raw = serde_json::to_string(initial).expect("strings serialize");
    let store = JsonFavoritesStore::new(MemoryKeyValueStore::with_entry(
        JsonFavoritesStore::<MemoryKeyValueStore>::KEY,
        raw,
    ));
    Arc::new(
        Favorites::load(Arc::new(store))
            .await
            .expect("memory store loads"),
    )
}

/// In-memory editing surface with a linear undo history.
#[derive(Default)]
pub struct FakeSurface {
    text: String,
    cursor: usize,
    undo: Vec<(String, usize)>,
    redo: Vec<(String, usize)>,
    next_registration: u64,
    tokenizers: Vec<(Registration, Arc<dyn TokenProvider>)>,
    providers: Vec<(Registration, Arc<dyn CompletionProvider>)>,
}

impl FakeSurface {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
            ..Default::default()
        }
    }

    /// Replace the document as a user edit, caret at the end.
    pub fn set_text(&mut self, text: &str) {
        let range = TextRange::full(&self.text);
        self.replace_range(range, text);
    }

    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.text.len());
    }

    pub fn providers(&self) -> Vec<Registration> {
        self.providers.iter().map(|(r, _)| *r).collect()
    }

    pub fn provider(&self) -> Option<Arc<dyn CompletionProvider>> {
        self.providers.last().map(|(_, p)| Arc::clone(p))
    }

    pub fn tokenizer(&self) -> Option<Arc<dyn TokenProvider>> {
        self.tokenizers.last().map(|(_, t)| Arc::clone(t))
    }

    pub fn registrations(&self) -> usize {
        self.tokenizers.len() + self.providers.len()
    }

    fn next(&mut self) -> Registration {
        self.next_registration += 1;
        Registration(self.next_registration)
    }
}

impl EditorSurface for FakeSurface {
    fn register_tokenizer(&mut self, _: &str, tokenizer: Arc<dyn TokenProvider>) -> Registration {
        let registration = self.next();
        self.tokenizers.push((registration, tokenizer));
        registration
    }

    fn register_completion_provider(
        &mut self,
        _: &str,
        provider: Arc<dyn CompletionProvider>,
    ) -> Registration {
        let registration = self.next();
        self.providers.push((registration, provider));
        registration
    }

    fn unregister(&mut self, registration: Registration) {
        self.tokenizers.retain(|(r, _)| *r != registration);
        self.providers.retain(|(r, _)| *r != registration);
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn cursor(&self) -> Cursor {
        Cursor::at(self.cursor)
    }

    fn replace_range(&mut self, range: TextRange, text: &str) {
        self.undo.push((self.text.clone(), self.cursor));
        self.redo.clear();
        self.text.replace_range(range.start..range.end, text);
        self.cursor = range.start + text.len();
    }

    fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some((text, cursor)) => {
                let current = std::mem::replace(&mut self.text, text);
                self.redo.push((current, self.cursor));
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }

    fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some((text, cursor)) => {
                let current = std::mem::replace(&mut self.text, text);
                self.undo.push((current, self.cursor));
                self.cursor = cursor;
                true
            }
            None => false,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
