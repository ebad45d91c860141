use crate::*;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SuggestionKind {
    Table,
    Column,
    Keyword,
    Function,
    #[display("History")]
    HistoryItem,
}

/// An entry eligible to be offered at the cursor, before it is placed at a range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub label: String,
    pub kind: SuggestionKind,
    pub detail: String,
    pub insert_text: String,
    pub documentation: Option<String>,
}

impl Candidate {
    pub fn new(
        label: impl Into<String>,
        kind: SuggestionKind,
        insert_text: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: String::new(),
            insert_text: insert_text.into(),
            documentation: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Place this candidate at the word range being replaced.
    pub fn at(&self, range: TextRange) -> Suggestion {
        Suggestion {
            label: self.label.clone(),
            kind: self.kind,
            detail: self.detail.clone(),
            insert_text: self.insert_text.clone(),
            documentation: self.documentation.clone(),
            range,
            source: None,
            relevance_score: None,
        }
    }
}

impl From<Keyword> for Candidate {
    fn from(keyword: Keyword) -> Self {
        let (kind, detail) = if keyword.is_function() {
            (SuggestionKind::Function, "Aggregate function")
        } else {
            (SuggestionKind::Keyword, "Keyword")
        };
        Candidate::new(keyword.as_str(), kind, keyword.as_str()).with_detail(detail)
    }
}

/// One candidate per keyword, in keyword declaration order.
pub fn keyword_candidates() -> &'static [Candidate] {
    static KEYWORDS: LazyLock<Vec<Candidate>> =
        LazyLock::new(|| Keyword::ALL.iter().copied().map(Candidate::from).collect());
    &KEYWORDS
}
