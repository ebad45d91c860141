use crate::*;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub scan: ScanOptions,
    pub include_keywords: bool,
    pub format: FormatSettings,
    /// Served when no server is attached.
    pub static_candidates: Option<Vec<Candidate>>,
    pub server_id: Option<String>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self::from(config())
    }
}

impl From<&Config> for EditorOptions {
    fn from(config: &Config) -> Self {
        Self {
            scan: ScanOptions::from(config),
            include_keywords: config.include_keywords,
            format: FormatSettings::from(config),
            static_candidates: None,
            server_id: None,
        }
    }
}

/// Binds the scanner, the completion resolver and the suggestion pipeline to
/// one host editing surface.
///
/// Exactly one completion provider is registered at any time; changing the
/// server replaces it.
pub struct SqlEditor<S: EditorSurface> {
    surface: S,
    registry: Arc<SchemaRegistry>,
    pipeline: SuggestionPipeline,
    options: EditorOptions,
    tokenizer: Registration,
    provider: (Registration, Arc<CompletionResolver>),
}

impl<S: EditorSurface> SqlEditor<S> {
    /// Register the tokenizer and the initial completion provider.
    ///
    /// The schema for `options.server_id` is fetched lazily on the first
    /// completion request.
    pub fn mount(
        mut surface: S,
        registry: Arc<SchemaRegistry>,
        pipeline: SuggestionPipeline,
        options: EditorOptions,
    ) -> Self {
        let tokenizer =
            surface.register_tokenizer(SQL_LANGUAGE, Arc::new(SqlTokenizer::new(options.scan)));
        let resolver = Arc::new(Self::resolver(&registry, &options));
        let registration = surface.register_completion_provider(SQL_LANGUAGE, resolver.clone());
        debug!(
            "Mounted SQL editor ({tokenizer}, provider {registration}) for server {:?}",
            options.server_id
        );
        Self {
            surface,
            registry,
            pipeline,
            options,
            tokenizer,
            provider: (registration, resolver),
        }
    }

    fn resolver(registry: &Arc<SchemaRegistry>, options: &EditorOptions) -> CompletionResolver {
        let mode = CompletionMode::arbitrate(
            options.server_id.clone(),
            Arc::clone(registry),
            options.static_candidates.clone(),
        );
        CompletionResolver::new(mode).include_keywords(options.include_keywords)
    }

    pub fn server_id(&self) -> Option<&str> {
        self.options.server_id.as_deref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn pipeline(&self) -> &SuggestionPipeline {
        &self.pipeline
    }

    pub fn resolver_mode(&self) -> &CompletionMode {
        self.provider.1.mode()
    }

    /// Why the attached server's schema is unavailable, for an inline notice.
    pub fn schema_error(&self) -> Option<String> {
        self.server_id()
            .and_then(|server_id| self.registry.failure(server_id))
    }

    /// Attach a different server (or none), replacing the completion provider
    /// and reloading that server's schema.
    ///
    /// A failed schema load is returned but leaves the editor usable: the new
    /// provider degrades to keyword completions, and the failure is served
    /// without refetching until the server is selected again.
    pub async fn select_server(&mut self, server_id: Option<String>) -> Result {
        self.pipeline.cancel();
        self.options.server_id = server_id;

        let resolver = Arc::new(Self::resolver(&self.registry, &self.options));
        self.surface.unregister(self.provider.0);
        let registration = self
            .surface
            .register_completion_provider(SQL_LANGUAGE, resolver.clone());
        debug!(
            "Replaced completion provider {} with {registration}",
            self.provider.0
        );
        self.provider = (registration, resolver);

        if let Some(server_id) = &self.options.server_id {
            self.registry.refresh(server_id).await?;
        }
        Ok(())
    }

    /// Feed the current document to the suggestion pipeline.
    pub fn on_text_change(&mut self) {
        let text = self.surface.text();
        self.pipeline
            .on_input_change(text, self.options.server_id.clone());
    }

    /// Completions at the surface's caret.
    pub async fn complete(&self) -> Completions {
        let text = self.surface.text();
        self.provider
            .1
            .provide_completions(&text, self.surface.cursor())
            .await
    }

    /// Insert a completion over the partial word it was computed for.
    pub fn accept(&mut self, suggestion: &Suggestion) {
        trace!(
            "Accepting {} over {}",
            suggestion.insert_text, suggestion.range
        );
        self.surface
            .replace_range(suggestion.range, &suggestion.insert_text);
    }

    /// Replace the statement at the caret with a query suggestion.
    ///
    /// Suggestions are whole statements, so the rest of a multi-statement
    /// document is left alone.
    pub fn apply_query_suggestion(&mut self, suggestion: &QuerySuggestion) {
        let text = self.surface.text();
        let range = statement_range(&text, self.surface.cursor().start());
        self.accept(&suggestion.to_suggestion(range));
    }

    pub async fn toggle_favorite(&self, suggestion: &QuerySuggestion) -> Result<bool> {
        self.pipeline.toggle_favorite(suggestion).await
    }

    /// Run a keyboard command. Returns whether the document changed.
    pub fn execute(&mut self, command: EditorCommand) -> bool {
        match command {
            EditorCommand::Format => {
                let text = self.surface.text();
                match format_sql(&text, self.options.format) {
                    Some(formatted) if formatted != text => {
                        self.surface.replace_range(TextRange::full(&text), &formatted);
                        true
                    }
                    _ => false,
                }
            }
            EditorCommand::Undo => self.surface.undo(),
            EditorCommand::Redo => self.surface.redo(),
        }
    }

    pub fn handle_keybinding(&mut self, binding: &str) -> Option<bool> {
        EditorCommand::from_keybinding(binding).map(|command| self.execute(command))
    }

    /// Remove every registration, drop pending suggestions and discard the
    /// attached server's snapshot. Hands the surface back to the host.
    pub async fn unmount(mut self) -> S {
        self.pipeline.cancel();
        self.surface.unregister(self.provider.0);
        self.surface.unregister(self.tokenizer);
        if let Some(server_id) = &self.options.server_id {
            self.registry.evict(server_id).await;
        }
        debug!("Unmounted SQL editor");
        self.surface
    }
}

impl<S: EditorSurface + std::fmt::Debug> std::fmt::Debug for SqlEditor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlEditor")
            .field("surface", &self.surface)
            .field("server_id", &self.options.server_id)
            .field("provider", &self.provider.0)
            .finish_non_exhaustive()
    }
}
