use crate::error::{Result, SweepError};
use crate::naming;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// An `organization/repository` pair as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    pub organization: String,
    pub repository: String,
}

impl FromStr for RepositorySlug {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(organization), Some(repository), None)
                if !organization.is_empty() && !repository.is_empty() =>
            {
                Ok(Self {
                    organization: organization.to_string(),
                    repository: repository.to_string(),
                })
            }
            _ => Err(SweepError::Setup(format!(
                "invalid repository '{}', expected organization/repository",
                s
            ))),
        }
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.repository)
    }
}

/// Live branches and open pull requests of one repository, taken once per sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySnapshot {
    pub organization: String,
    pub repository: String,
    pub live_branches: BTreeSet<String>,
    pub open_pull_requests: BTreeSet<u64>,
}

impl RepositorySnapshot {
    pub fn new(
        slug: &RepositorySlug,
        live_branches: impl IntoIterator<Item = String>,
        open_pull_requests: impl IntoIterator<Item = u64>,
    ) -> Self {
        Self {
            organization: slug.organization.clone(),
            repository: slug.repository.clone(),
            live_branches: live_branches.into_iter().collect(),
            open_pull_requests: open_pull_requests.into_iter().collect(),
        }
    }

    pub fn key(&self) -> String {
        naming::repository_key(&self.repository)
    }

    pub fn slug(&self) -> RepositorySlug {
        RepositorySlug {
            organization: self.organization.clone(),
            repository: self.repository.clone(),
        }
    }

    pub fn is_live_branch(&self, branch: &str) -> bool {
        self.live_branches.contains(branch)
    }
}

/// Snapshots keyed by repository key.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSet {
    snapshots: BTreeMap<String, RepositorySnapshot>,
}

impl SnapshotSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects a second repository with the same key; artifact names could not
    /// tell the two apart.
    pub fn insert(&mut self, snapshot: RepositorySnapshot) -> Result<()> {
        let key = snapshot.key();

        if let Some(existing) = self.snapshots.get(&key) {
            return Err(SweepError::Setup(format!(
                "repositories {} and {} share the artifact prefix '{}'",
                existing.slug(),
                snapshot.slug(),
                key
            )));
        }

        self.snapshots.insert(key, snapshot);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&RepositorySnapshot> {
        self.snapshots.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepositorySnapshot> {
        self.snapshots.values()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl FromIterator<RepositorySnapshot> for SnapshotSet {
    /// Later snapshots replace earlier ones with the same key. Use
    /// [`SnapshotSet::insert`] to reject duplicates instead.
    fn from_iter<I: IntoIterator<Item = RepositorySnapshot>>(iter: I) -> Self {
        Self {
            snapshots: iter.into_iter().map(|s| (s.key(), s)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug() {
        let slug: RepositorySlug = "acme/myapp".parse().unwrap();
        assert_eq!(slug.organization, "acme");
        assert_eq!(slug.repository, "myapp");
        assert_eq!(slug.to_string(), "acme/myapp");
    }

    #[test]
    fn test_parse_invalid_slugs() {
        for input in ["myapp", "acme/", "/myapp", "acme/myapp/extra", ""] {
            let result = input.parse::<RepositorySlug>();
            assert!(
                matches!(result, Err(SweepError::Setup(_))),
                "expected setup error for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_snapshot_key_is_lowercase() {
        let slug: RepositorySlug = "Acme/MyApp".parse().unwrap();
        let snapshot = RepositorySnapshot::new(&slug, vec!["main".to_string()], vec![]);
        assert_eq!(snapshot.key(), "myapp");
        assert!(snapshot.is_live_branch("main"));
        assert!(!snapshot.is_live_branch("Main"));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let first: RepositorySlug = "acme/myapp".parse().unwrap();
        let second: RepositorySlug = "other/MyApp".parse().unwrap();

        let mut set = SnapshotSet::new();
        set.insert(RepositorySnapshot::new(&first, vec![], vec![]))
            .unwrap();
        let result = set.insert(RepositorySnapshot::new(&second, vec![], vec![]));

        assert!(matches!(result, Err(SweepError::Setup(_))));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("myapp").unwrap().organization, "acme");
    }
}
