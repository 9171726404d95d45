use clap::Parser;
use color_eyre::eyre::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::PathBuf;
use teamup::{app::TeamupService, config::Cli, event::InboundMessage, store::StateStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

/// One reply line on stdout.
#[derive(Debug, Serialize)]
struct OutboundReply<'a> {
    reply: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // stdout carries replies, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("teamup=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config(std::env::var_os("HOME").map(PathBuf::from))?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store = StateStore::new(config.paths.state_file.clone());
    let mut service = TeamupService::open(store, config.admin_policy(), rng);

    tracing::info!(
        data_dir = %config.paths.data_dir.display(),
        state_file = %config.paths.state_file.display(),
        super_admins = service.policy().super_admin_count(),
        "teamup ready"
    );

    run_message_loop(&mut service).await
}

/// Handle stdin lines one at a time until EOF or Ctrl-C.
/// Each command finishes (including its save) before the next line is read.
async fn run_message_loop(service: &mut TeamupService) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!("stdin closed");
                    break;
                };
                if let Some(out) = process_line(service, &line)? {
                    stdout.write_all(out.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    Ok(())
}

/// Turn one input line into an encoded reply line, if any.
fn process_line(service: &mut TeamupService, line: &str) -> Result<Option<String>> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let message = match InboundMessage::from_json_line(line) {
        Ok(m) => m,
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed input line");
            return Ok(None);
        }
    };
    match service.handle(&message) {
        Some(text) => Ok(Some(serde_json::to_string(&OutboundReply { reply: &text })?)),
        None => Ok(None),
    }
}
