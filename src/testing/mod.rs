#![cfg(test)]
crate::reexport!(fakes);
crate::reexport!(context);
pub use rstest::*;

pub(in crate::testing) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

mod editor_context_tests {
    use super::{super::*, *};

    #[test_context(EditorContext)]
    #[tokio::test]
    async fn mounts_with_one_tokenizer_and_one_provider(ctx: &mut EditorContext) {
        assert_eq!(ctx.editor.surface().registrations(), 2);
        assert_eq!(ctx.editor.server_id(), Some("srv-1"));
    }

    #[test_context(EditorContext)]
    #[tokio::test]
    async fn registered_provider_reads_the_schema(ctx: &mut EditorContext) -> Result {
        let provider = ctx.editor.surface().provider().expect("provider registered");
        let completions = provider.provide_completions("SELECT us", Cursor::at(9)).await;
        assert!(completions.labels().contains(&"users"));
        assert_eq!(ctx.schema.calls(), 1);
        Ok(())
    }
}
