//! Pomora - Pomodoro session service
//!
//! Main entry point for the HTTP server. A small `issue-token` admin
//! command mints bearer credentials for a user without going through an
//! identity provider.

use std::sync::Arc;

use anyhow::Context;
use pomora_api::{router, AppContext};
use pomora_domain::UserId;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging FIRST so we can see .env loading
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load environment variables from .env file
    match dotenvy::dotenv() {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(_) => tracing::debug!("no .env file found"),
    }

    let config = pomora_infra::config::load().context("failed to load configuration")?;
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let ctx = Arc::new(AppContext::new(config).context("failed to initialise application")?);

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        return run_command(&ctx, &command, args.collect()).await;
    }

    let listener =
        TcpListener::bind(&addr).await.with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "pomora listening");

    axum::serve(listener, router(ctx)).await.context("server exited with error")?;
    Ok(())
}

async fn run_command(ctx: &Arc<AppContext>, command: &str, args: Vec<String>) -> anyhow::Result<()> {
    match command {
        "issue-token" => {
            let user = args
                .first()
                .map(|id| UserId::new(id.clone()))
                .context("usage: pomora issue-token <user-id> [label]")?;
            let label = args.get(1).cloned().unwrap_or_else(|| "manual".to_string());

            let token = ctx.tokens.issue_token(&user, &label).await?;
            // The plaintext token is shown exactly once.
            println!("{token}");
            Ok(())
        }
        other => anyhow::bail!("unknown command: {other}"),
    }
}
