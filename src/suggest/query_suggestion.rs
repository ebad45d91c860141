use super::*;
use itertools::Itertools as _;

/// A whole statement proposed by the suggestion service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySuggestion {
    pub sql_text: String,
    /// Kept exactly as returned; absent stays absent.
    #[serde(default)]
    pub source: Option<SuggestionSource>,
    #[serde(default)]
    pub relevance_score: Option<f64>,
    #[serde(default)]
    pub tables: Vec<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl QuerySuggestion {
    pub fn new(sql_text: impl Into<String>) -> Self {
        Self {
            sql_text: sql_text.into(),
            source: None,
            relevance_score: None,
            tables: Vec::new(),
            kind: None,
        }
    }

    pub fn with_source(mut self, source: SuggestionSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.relevance_score = Some(score);
        self
    }

    pub fn score(&self) -> Option<u8> {
        self.relevance_score.and_then(normalize_score)
    }

    pub fn relevance(&self) -> Option<RelevanceBucket> {
        self.score().map(RelevanceBucket::from)
    }

    pub fn source_label(&self) -> &'static str {
        source_label(self.source.as_ref())
    }

    /// The editor entry that inserts this statement over `range`.
    pub fn to_suggestion(&self, range: TextRange) -> Suggestion {
        let detail = match self.score() {
            Some(score) => format!("{} · {}", self.source_label(), percent_label(score)),
            None => self.source_label().to_string(),
        };
        let documentation = (!self.tables.is_empty())
            .then(|| format!("Tables: {}", self.tables.iter().join(", ")));
        Suggestion {
            label: self.sql_text.clone(),
            kind: SuggestionKind::HistoryItem,
            detail,
            insert_text: self.sql_text.clone(),
            documentation,
            range,
            source: self.source.clone(),
            relevance_score: self.score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_service_payload() {
        let payload = r#"[
            {"sql_text": "SELECT * FROM users", "source": "recent_query", "relevance_score": 91.5, "tables": ["users"], "type": "select"},
            {"sql_text": "SELECT 1", "source": "trending"},
            {"sql_text": "SELECT 2"}
        ]"#;

        let suggestions: Vec<QuerySuggestion> = serde_json::from_str(payload).expect("decodes");

        assert_eq!(suggestions[0].source, Some(SuggestionSource::RecentQuery));
        assert_eq!(suggestions[0].relevance(), Some(RelevanceBucket::VeryHigh));
        assert_eq!(suggestions[0].kind.as_deref(), Some("select"));
        assert_eq!(suggestions[1].source_label(), "Unclassified");
        assert_eq!(
            suggestions[1].source,
            Some(SuggestionSource::Unclassified("trending".into()))
        );
        assert_eq!(suggestions[2].source, None);
        assert_eq!(suggestions[2].relevance(), None);
        assert!(suggestions[2].tables.is_empty());
    }

    #[test]
    fn converts_to_history_item_at_range() {
        let query = QuerySuggestion {
            tables: vec!["users".into(), "orders".into()],
            ..QuerySuggestion::new("SELECT * FROM users JOIN orders ON 1 = 1")
                .with_source(SuggestionSource::SimilarQuery)
                .with_score(87.0)
        };

        let suggestion = query.to_suggestion(TextRange::new(0, 6));

        assert_eq!(suggestion.kind, SuggestionKind::HistoryItem);
        assert_eq!(suggestion.insert_text, query.sql_text);
        assert_eq!(suggestion.range, TextRange::new(0, 6));
        assert_eq!(suggestion.detail, "Similar · 87%");
        assert_eq!(suggestion.relevance(), Some(RelevanceBucket::High));
        assert_eq!(suggestion.documentation.as_deref(), Some("Tables: users, orders"));
    }

    #[test]
    fn unscored_suggestion_has_no_percent() {
        let suggestion = QuerySuggestion::new("SELECT 1").to_suggestion(TextRange::default());
        assert_eq!(suggestion.detail, "Unclassified");
        assert_eq!(suggestion.source, None);
        assert_eq!(suggestion.relevance_score, None);
    }
}
