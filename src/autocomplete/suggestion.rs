use crate::*;

/// An entry offered by the editor, placed at the range it replaces.
///
/// For completions `range` is the current word at the cursor, never a whole
/// line, so accepting one only rewrites the partial token being typed. Query
/// suggestions cover the statement at the cursor instead.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{label}")]
pub struct Suggestion {
    pub label: String,
    pub kind: SuggestionKind,
    pub detail: String,
    pub insert_text: String,
    pub documentation: Option<String>,
    pub range: TextRange,
    pub source: Option<SuggestionSource>,
    /// Relevance in `0..=100`, for query suggestions.
    pub relevance_score: Option<u8>,
}

pub type Suggestions = Vec<Suggestion>;

impl Suggestion {
    pub fn relevance(&self) -> Option<RelevanceBucket> {
        self.relevance_score.map(RelevanceBucket::from)
    }
}

/// Result of one completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions {
    pub range: TextRange,
    pub suggestions: Suggestions,
    /// Set when the attached server's schema could not be loaded and only
    /// keywords are offered.
    pub schema_error: Option<String>,
}

impl Completions {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.suggestions.iter().map(|s| s.label.as_str()).collect()
    }
}
