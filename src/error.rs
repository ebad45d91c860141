#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Schema unavailable for server {server_id}: {reason}")]
    SchemaUnavailable { server_id: String, reason: String },

    #[error("Suggestion fetch failed: {0}")]
    SuggestionFetchFailed(String),

    #[error("Persisted data is corrupt: {0}")]
    PersistenceCorrupt(#[from] serde_json::Error),

    #[error("Persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    pub fn schema_unavailable(server_id: impl Into<String>, reason: impl ToString) -> Self {
        Error::SchemaUnavailable {
            server_id: server_id.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<confique::Error> for Error {
    fn from(value: confique::Error) -> Self {
        Error::Config(value.to_string())
    }
}
