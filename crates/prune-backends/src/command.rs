use prune_core::BackendError;
use tokio::process::Command;
use tracing::debug;

/// Runs a CLI command to completion and returns its stdout.
pub async fn run(command: &mut Command, description: &str) -> Result<Vec<u8>, BackendError> {
    debug!("Running {}", description);

    let output = command.output().await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(BackendError::Command {
            command: description.to_string(),
            stderr,
        });
    }

    Ok(output.stdout)
}

/// Splits a `scope/name` handle.
pub fn split_handle(handle: &str) -> Result<(&str, &str), BackendError> {
    handle
        .split_once('/')
        .filter(|(scope, name)| !scope.is_empty() && !name.is_empty())
        .ok_or_else(|| {
            BackendError::Other(anyhow::anyhow!("malformed artifact handle: {}", handle))
        })
}
