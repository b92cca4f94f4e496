//! Artifact naming shared with the deploy pipeline.
//!
//! A release for branch `feature/x` of repository `MyApp` is called
//! `myapp-feature-x`; pull request 42 becomes `myapp-pr-42`. Names are cut to
//! [`MAX_RELEASE_NAME_LEN`] characters without any collision handling, so two
//! long branches sharing a 53 character prefix map to the same release.

use prune_config::constants::MAX_RELEASE_NAME_LEN;
use std::fmt;

/// A live reference an artifact can be named after.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identity {
    Branch(String),
    PullRequest(u64),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Branch(branch) => write!(f, "{}", branch),
            Identity::PullRequest(number) => write!(f, "pr-{}", number),
        }
    }
}

/// Replaces every run of characters outside `[A-Za-z0-9]` with a single `-`
/// and lowercases the rest.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut in_separator = false;

    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }

    slug
}

pub fn repository_key(repository: &str) -> String {
    repository.to_lowercase()
}

pub fn derive_name(repository: &str, identity: &Identity) -> String {
    let name = format!(
        "{}-{}",
        repository_key(repository),
        slugify(&identity.to_string())
    );

    if name.chars().count() > MAX_RELEASE_NAME_LEN {
        name.chars().take(MAX_RELEASE_NAME_LEN).collect()
    } else {
        name
    }
}

/// Everything before the first hyphen, or `None` when the name has no hyphen.
pub fn repository_prefix(name: &str) -> Option<&str> {
    name.split_once('-').map(|(prefix, _)| prefix)
}
