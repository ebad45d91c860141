use crate::*;
use std::sync::Arc;

/// The host editor's completion extension point.
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn provide_completions(&self, text: &str, cursor: Cursor) -> Completions;
}

/// Where candidates come from. Fixed when the resolver is built.
#[derive(Debug, Clone)]
pub enum CompletionMode {
    /// Flattened schema of an attached server.
    Schema {
        server_id: String,
        registry: Arc<SchemaRegistry>,
    },
    /// Caller supplied list, served as given.
    Static(Arc<[Candidate]>),
    /// Neither a server nor a list: nothing to offer.
    Disabled,
}

impl CompletionMode {
    /// Schema mode wins whenever a server is attached; the static list is only
    /// used without one.
    pub fn arbitrate(
        server_id: Option<String>,
        registry: Arc<SchemaRegistry>,
        static_candidates: Option<Vec<Candidate>>,
    ) -> Self {
        match (server_id, static_candidates) {
            (Some(server_id), _) => CompletionMode::Schema {
                server_id,
                registry,
            },
            (None, Some(candidates)) => CompletionMode::Static(candidates.into()),
            (None, None) => CompletionMode::Disabled,
        }
    }
}

/// Answers completion requests for one editor.
///
/// Candidates are not ranked here: schema candidates keep their flattening
/// order and the host's own fuzzy filter narrows them by prefix.
#[derive(Debug, Clone)]
pub struct CompletionResolver {
    mode: CompletionMode,
    include_keywords: bool,
}

impl CompletionResolver {
    pub fn new(mode: CompletionMode) -> Self {
        Self {
            mode,
            include_keywords: true,
        }
    }

    /// Append keyword candidates after the schema candidates in schema mode.
    pub fn include_keywords(mut self, include: bool) -> Self {
        self.include_keywords = include;
        self
    }

    pub fn mode(&self) -> &CompletionMode {
        &self.mode
    }

    pub fn server_id(&self) -> Option<&str> {
        match &self.mode {
            CompletionMode::Schema { server_id, .. } => Some(server_id),
            _ => None,
        }
    }

    pub async fn resolve(&self, text: &str, cursor: Cursor) -> Completions {
        let range = word_range(text, cursor.start());
        let mut schema_error = None;
        let suggestions = match &self.mode {
            CompletionMode::Schema {
                server_id,
                registry,
            } => {
                // An unavailable schema degrades to keywords only.
                let corpus = match registry.load_schema(server_id).await {
                    Ok(corpus) => Some(corpus),
                    Err(e) => {
                        schema_error = Some(e.to_string());
                        None
                    }
                };
                let schema = corpus.iter().flat_map(|c| c.candidates.iter());
                let keywords = keyword_candidates()
                    .iter()
                    .filter(|_| self.include_keywords);
                schema.chain(keywords).map(|c| c.at(range)).collect()
            }
            CompletionMode::Static(candidates) => {
                candidates.iter().map(|c| c.at(range)).collect()
            }
            CompletionMode::Disabled => Vec::new(),
        };
        trace!(
            "Resolved {} completions for range {range}",
            suggestions.len()
        );
        Completions {
            range,
            suggestions,
            schema_error,
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for CompletionResolver {
    async fn provide_completions(&self, text: &str, cursor: Cursor) -> Completions {
        self.resolve(text, cursor).await
    }
}
