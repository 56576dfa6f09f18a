use anyhow::Context;
use clipkeep_lib::bootstrap::{self, AppPaths};
use clipkeep_lib::message::handle_message;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = AppPaths::resolve().context("failed to resolve data directory")?;
    bootstrap::tracing::init_tracing_subscriber(&paths.logs_dir)
        .context("failed to initialize tracing")?;

    let app = bootstrap::build_app(&paths);

    let removed = app.history.sweep_expired().await;
    if removed > 0 {
        info!(removed, "expired entries swept at startup");
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_message(&app, &line).await;
        let mut encoded = match serde_json::to_string(&response) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!(error = %e, "failed to encode response");
                continue;
            }
        };
        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }

    info!("stdin closed, exiting");
    Ok(())
}
