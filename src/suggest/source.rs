/// Where a query suggestion came from, as tagged by the suggestion service.
///
/// Values outside the known set are kept verbatim in `Unclassified`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SuggestionSource {
    RecentQuery,
    SimilarQuery,
    PopularQuery,
    Completion,
    Unclassified(String),
}

impl SuggestionSource {
    pub fn wire_name(&self) -> &str {
        match self {
            SuggestionSource::RecentQuery => "recent_query",
            SuggestionSource::SimilarQuery => "similar_query",
            SuggestionSource::PopularQuery => "popular_query",
            SuggestionSource::Completion => "completion",
            SuggestionSource::Unclassified(raw) => raw,
        }
    }

    /// Short label shown next to a suggestion.
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionSource::RecentQuery => "Recent",
            SuggestionSource::SimilarQuery => "Similar",
            SuggestionSource::PopularQuery => "Popular",
            SuggestionSource::Completion => "Completion",
            SuggestionSource::Unclassified(_) => UNCLASSIFIED,
        }
    }
}

pub const UNCLASSIFIED: &str = "Unclassified";

/// Label for an optional source; a missing source renders as unclassified.
pub fn source_label(source: Option<&SuggestionSource>) -> &'static str {
    source.map_or(UNCLASSIFIED, SuggestionSource::label)
}

impl From<String> for SuggestionSource {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "recent_query" => SuggestionSource::RecentQuery,
            "similar_query" => SuggestionSource::SimilarQuery,
            "popular_query" => SuggestionSource::PopularQuery,
            "completion" => SuggestionSource::Completion,
            _ => SuggestionSource::Unclassified(raw),
        }
    }
}

impl From<SuggestionSource> for String {
    fn from(source: SuggestionSource) -> Self {
        match source {
            SuggestionSource::Unclassified(raw) => raw,
            known => known.wire_name().to_string(),
        }
    }
}

impl std::fmt::Display for SuggestionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
