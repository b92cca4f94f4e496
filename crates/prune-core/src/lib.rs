pub mod artifact;
pub mod backend;
pub mod error;
pub mod inventory;
pub mod naming;
pub mod reconcile;
pub mod snapshot;
pub mod source;
pub mod sweep;

pub use artifact::{ArtifactRecord, Ownership};
pub use backend::{ArtifactBackend, InventoryScope};
pub use error::{BackendError, Result, SourceError, SweepError};
pub use naming::{Identity, derive_name, slugify};
pub use reconcile::{Reconciliation, Verdict, classify, reconcile};
pub use snapshot::{RepositorySlug, RepositorySnapshot, SnapshotSet};
pub use source::SourceControl;
pub use sweep::{DeleteFailure, SweepOptions, SweepSummary, Sweeper};
