use super::*;

/// Remote schema lookup, `getServerSchema(serverId)`.
///
/// Implementations wrap whatever transport the console uses; the registry only
/// needs a snapshot or an error back.
#[async_trait::async_trait]
pub trait SchemaService: Send + Sync {
    async fn get_server_schema(&self, server_id: &str) -> Result<SchemaSnapshot>;
}
