use crate::error::SourceError;
use async_trait::async_trait;

/// Read access to a source-control host.
#[async_trait]
pub trait SourceControl: Send + Sync {
    async fn list_branches(
        &self,
        organization: &str,
        repository: &str,
    ) -> Result<Vec<String>, SourceError>;

    async fn list_open_pull_requests(
        &self,
        organization: &str,
        repository: &str,
    ) -> Result<Vec<u64>, SourceError>;
}
