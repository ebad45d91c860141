use crate::testing::*;
use crate::*;
use std::sync::Arc;
use test_context::AsyncTestContext;
pub use test_context::test_context;

/// An editor mounted on a [`FakeSurface`], attached to `srv-1`, with every
/// backend faked.
pub struct EditorContext {
    pub schema: Arc<FakeSchemaService>,
    pub suggestions: Arc<FakeSuggestionService>,
    pub registry: Arc<SchemaRegistry>,
    pub editor: SqlEditor<FakeSurface>,
    pub is_teardown: bool,
}

impl EditorContext {
    pub const SERVER: &'static str = "srv-1";

    /// Responses for texts the context tests type.
    fn suggestion_service() -> FakeSuggestionService {
        FakeSuggestionService::default().with_response(
            "SELECT * FROM us",
            vec![
                QuerySuggestion::new("SELECT * FROM users")
                    .with_source(SuggestionSource::RecentQuery)
                    .with_score(92.0),
                QuerySuggestion::new("SELECT * FROM users WHERE id = 1"),
            ],
        )
    }
}

impl AsyncTestContext for EditorContext {
    async fn setup() -> Self {
        crate::testing::common_init();
        let schema = Arc::new(FakeSchemaService::with_schema(Self::SERVER, sample_snapshot()));
        let suggestions = Arc::new(Self::suggestion_service());
        let registry = Arc::new(SchemaRegistry::new(schema.clone(), RegistrySettings::default()));
        let pipeline = SuggestionPipeline::new(
            suggestions.clone(),
            memory_favorites(&[]).await,
            PipelineSettings::default(),
        );
        let options = EditorOptions {
            server_id: Some(Self::SERVER.to_string()),
            ..Default::default()
        };
        let editor = SqlEditor::mount(FakeSurface::default(), registry.clone(), pipeline, options);

        Self {
            schema,
            suggestions,
            registry,
            editor,
            is_teardown: true,
        }
    }

    async fn teardown(self) {
        if !self.is_teardown {
            return;
        }

        let surface = self.editor.unmount().await;
        assert_eq!(surface.registrations(), 0, "unmount leaves registrations behind");
        assert!(self.registry.cached(Self::SERVER).await.is_none());
    }
}
