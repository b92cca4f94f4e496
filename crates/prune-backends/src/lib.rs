mod command;
mod helm;
mod storage;

pub use helm::HelmBackend;
pub use storage::{StorageBackend, container_name};
