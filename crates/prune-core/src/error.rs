use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("backend setup failed: {0}")]
    Setup(String),

    #[error("inventory namespace not found: {0}")]
    NamespaceNotFound(String),

    #[error("{command} failed: {stderr}")]
    Command { command: String, stderr: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackendError {
    pub fn is_namespace_missing(&self) -> bool {
        matches!(self, BackendError::NamespaceNotFound(_))
    }
}

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("setup failed: {0}")]
    Setup(String),

    #[error("failed to list {repository}: {source}")]
    SourceListing {
        repository: String,
        #[source]
        source: SourceError,
    },

    #[error("failed to list artifacts in {scope}: {source}")]
    InventoryListing {
        scope: String,
        #[source]
        source: BackendError,
    },
}

impl SweepError {
    pub fn is_setup(&self) -> bool {
        matches!(self, SweepError::Setup(_))
    }

    pub fn is_listing(&self) -> bool {
        matches!(
            self,
            SweepError::SourceListing { .. } | SweepError::InventoryListing { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
