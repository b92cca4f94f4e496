use std::time::Duration;

/// Helm refuses release names longer than this.
pub const MAX_RELEASE_NAME_LEN: usize = 53;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const GITHUB_PAGE_SIZE: usize = 100;
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// Protected branches are not returned by the branch listing
pub const DEFAULT_ALWAYS_LIVE_BRANCHES: &[&str] = &["master"];

pub const DEFAULT_HELM_BINARY: &str = "helm";
pub const HELM_PAGE_SIZE: usize = 256;

pub const DEFAULT_AZ_BINARY: &str = "az";
pub const BRANCH_METADATA_KEY: &str = "branch";

pub const DEFAULT_CONFIG_PATH: &str = "/etc/prune/prune.toml";
