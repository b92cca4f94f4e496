mod cli;
mod config;

use clap::Parser;
use cli::{BackendCommand, Cli};
use prune_core::{RepositorySlug, Sweeper};
use prune_github::GitHubClient;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let cli = Cli::parse();

    let mut settings = prune_config::load_config(&cli.config).await?;
    config::apply_env_overrides(&mut settings);

    let slugs = cli
        .backend
        .repositories()
        .iter()
        .map(|s| s.parse())
        .collect::<Result<Vec<RepositorySlug>, _>>()?;

    let backend = match &cli.backend {
        BackendCommand::Helm { .. } => config::create_helm_backend(&settings),
        BackendCommand::Storage { .. } => config::create_storage_backend(&settings)?,
    };

    let source = Arc::new(GitHubClient::new(
        &settings.github_api_url,
        config::github_token()?,
    )?);

    let sweeper = Sweeper::new(
        source,
        backend,
        config::create_sweep_options(&settings, cli.dry_run),
    );

    let summary = match sweeper.run(&slugs).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!("Clean up aborted: {}", e);
            return Err(e.into());
        }
    };

    summary.log_failures();

    Ok(())
}
