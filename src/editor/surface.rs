use crate::*;
use std::sync::Arc;

/// Language id the adapter registers its providers under.
pub const SQL_LANGUAGE: &str = "sql";

/// Handle returned by the host for a registered provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("registration #{_0}")]
pub struct Registration(pub u64);

/// Tokenizer extension point. Runs synchronously on every keystroke.
pub trait TokenProvider: Send + Sync {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SqlTokenizer {
    options: ScanOptions,
}

impl SqlTokenizer {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }
}

impl TokenProvider for SqlTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        scan_with(text, self.options)
    }
}

/// The host's text-editing surface, as seen by the adapter.
///
/// Keeps the scanner and resolver free of any concrete editor type.
pub trait EditorSurface: Send {
    fn register_tokenizer(
        &mut self,
        language: &str,
        tokenizer: Arc<dyn TokenProvider>,
    ) -> Registration;

    fn register_completion_provider(
        &mut self,
        language: &str,
        provider: Arc<dyn CompletionProvider>,
    ) -> Registration;

    fn unregister(&mut self, registration: Registration);

    fn text(&self) -> String;

    fn cursor(&self) -> Cursor;

    fn replace_range(&mut self, range: TextRange, text: &str);

    /// Returns false when there is nothing to undo.
    fn undo(&mut self) -> bool;

    fn redo(&mut self) -> bool;
}
