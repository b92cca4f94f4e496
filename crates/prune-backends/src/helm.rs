use crate::command::{self, split_handle};
use async_trait::async_trait;
use prune_config::{HelmConfig, constants};
use prune_core::{ArtifactBackend, ArtifactRecord, BackendError, InventoryScope, SnapshotSet};
use serde::Deserialize;
use tokio::process::Command;
use tracing::info;

#[derive(Debug, Deserialize)]
struct HelmRelease {
    name: String,
    namespace: String,
    #[serde(default)]
    status: Option<String>,
}

/// Helm releases across every namespace of the current cluster.
pub struct HelmBackend {
    binary: String,
    kube_context: Option<String>,
}

impl HelmBackend {
    pub fn new(config: &HelmConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            kube_context: config.kube_context.clone(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        if let Some(context) = &self.kube_context {
            command.arg("--kube-context").arg(context);
        }
        command
    }

    fn list_command(&self, max: usize, offset: usize) -> Command {
        let mut command = self.command();
        command
            .arg("list")
            .arg("--all-namespaces")
            .arg("--all")
            .arg("--output")
            .arg("json")
            .arg("--max")
            .arg(max.to_string())
            .arg("--offset")
            .arg(offset.to_string());
        command
    }
}

fn parse_releases(stdout: &[u8]) -> Result<Vec<ArtifactRecord>, BackendError> {
    if stdout.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let releases: Vec<HelmRelease> = serde_json::from_slice(stdout)?;

    Ok(releases
        .into_iter()
        .map(|r| {
            tracing::debug!(
                "Release {} in {} ({})",
                r.name,
                r.namespace,
                r.status.as_deref().unwrap_or("unknown")
            );
            let handle = format!("{}/{}", r.namespace, r.name);
            ArtifactRecord::named(r.name, handle)
        })
        .collect())
}

#[async_trait]
impl ArtifactBackend for HelmBackend {
    fn name(&self) -> &'static str {
        "helm"
    }

    async fn check(&self) -> Result<(), BackendError> {
        command::run(&mut self.list_command(1, 0), "helm list")
            .await
            .map_err(|e| BackendError::Setup(format!("cannot reach cluster: {}", e)))?;

        info!("Connected to cluster via {}", self.binary);
        Ok(())
    }

    fn inventory_scopes(&self, _snapshots: &SnapshotSet) -> Vec<InventoryScope> {
        vec![InventoryScope::All]
    }

    async fn list_artifacts(
        &self,
        _scope: &InventoryScope,
    ) -> Result<Vec<ArtifactRecord>, BackendError> {
        let mut releases = Vec::new();

        loop {
            let stdout = command::run(
                &mut self.list_command(constants::HELM_PAGE_SIZE, releases.len()),
                "helm list",
            )
            .await?;

            let page = parse_releases(&stdout)?;
            let done = page.len() < constants::HELM_PAGE_SIZE;
            releases.extend(page);

            if done {
                return Ok(releases);
            }
        }
    }

    async fn delete_artifact(&self, artifact: &ArtifactRecord) -> Result<(), BackendError> {
        let (namespace, name) = split_handle(&artifact.handle)?;

        let stdout = command::run(
            self.command()
                .arg("uninstall")
                .arg(name)
                .arg("--namespace")
                .arg(namespace),
            &format!("helm uninstall {}", name),
        )
        .await?;

        info!(
            "Uninstalled release {}: {}",
            artifact.handle,
            String::from_utf8_lossy(&stdout).trim()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prune_core::Ownership;

    #[test]
    fn test_parse_releases() {
        let stdout = br#"[
            {
                "name": "myapp-main",
                "namespace": "previews",
                "revision": "3",
                "updated": "2024-05-01 10:00:00.000000 +0000 UTC",
                "status": "deployed",
                "chart": "myapp-0.1.0",
                "app_version": "1.0"
            },
            {
                "name": "myapp-pr-42",
                "namespace": "pr",
                "revision": "1",
                "status": "failed",
                "chart": "myapp-0.1.0",
                "app_version": "1.0"
            }
        ]"#;

        let releases = parse_releases(stdout).unwrap();

        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0].name, "myapp-main");
        assert_eq!(releases[0].handle, "previews/myapp-main");
        assert_eq!(releases[0].ownership, Ownership::Named);
        assert_eq!(releases[1].handle, "pr/myapp-pr-42");
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_releases(b"").unwrap().is_empty());
        assert!(parse_releases(b"\n").unwrap().is_empty());
        assert!(parse_releases(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage_output() {
        let result = parse_releases(b"Error: Kubernetes cluster unreachable");
        assert!(matches!(result, Err(BackendError::Json(_))));
    }

    #[test]
    fn test_list_command_arguments() {
        let backend = HelmBackend::new(&HelmConfig {
            binary: "helm".to_string(),
            kube_context: Some("previews".to_string()),
        });

        let command = backend.list_command(256, 512);
        let args: Vec<_> = command
            .as_std()
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();

        assert_eq!(
            args,
            vec![
                "--kube-context",
                "previews",
                "list",
                "--all-namespaces",
                "--all",
                "--output",
                "json",
                "--max",
                "256",
                "--offset",
                "512"
            ]
        );
    }

    #[tokio::test]
    async fn test_check_fails_without_binary() {
        let backend = HelmBackend::new(&HelmConfig {
            binary: "prune-test-helm-that-does-not-exist".to_string(),
            kube_context: None,
        });

        let result = backend.check().await;
        assert!(matches!(result, Err(BackendError::Setup(_))));
    }
}
