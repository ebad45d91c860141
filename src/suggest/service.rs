use super::*;

/// Request sent to the suggestion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionParams {
    pub sql: String,
    #[serde(rename = "serverId", skip_serializing_if = "Option::is_none")]
    pub server_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Backend that proposes whole statements for partially typed SQL.
#[async_trait::async_trait]
pub trait SuggestionService: Send + Sync {
    async fn get_query_suggestions(&self, params: SuggestionParams) -> Result<Vec<QuerySuggestion>>;
}
