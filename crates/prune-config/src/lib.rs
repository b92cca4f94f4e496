pub mod config;
pub mod constants;

pub use config::{ConfigError, HelmConfig, PruneConfig, StorageConfig, load_config};
