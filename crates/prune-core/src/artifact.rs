use std::fmt;

/// How an artifact is tied back to the repository that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership {
    /// Repository and branch or PR are encoded in the artifact name.
    Named,
    /// Listed from a repository-specific container, with the branch stored as
    /// metadata on the artifact.
    Tagged {
        repository: String,
        branch: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    pub name: String,
    /// Whatever the backend needs to delete the artifact again.
    pub handle: String,
    pub ownership: Ownership,
}

impl ArtifactRecord {
    pub fn named(name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handle: handle.into(),
            ownership: Ownership::Named,
        }
    }

    pub fn tagged(
        name: impl Into<String>,
        handle: impl Into<String>,
        repository: impl Into<String>,
        branch: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            handle: handle.into(),
            ownership: Ownership::Tagged {
                repository: repository.into(),
                branch,
            },
        }
    }
}

impl fmt::Display for ArtifactRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
