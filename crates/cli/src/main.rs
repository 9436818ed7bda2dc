// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! idlewatch - directory account inactivity reconciler

use anyhow::{Context, Result};
use clap::Parser;
use iw_adapters::{DirectoryConfig, HttpDirectoryAdapter, SmtpConfig, SmtpMailTransport};
use iw_core::SystemClock;
use iw_engine::run_pass;
use iw_storage::ConfigFile;
use std::path::PathBuf;
use std::time::Duration;

/// Network calls never block the pass indefinitely.
const NETWORK_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(
    name = "idlewatch",
    version,
    about = "Checks a user directory for inactive accounts: watch, warn, expire"
)]
struct Cli {
    /// Path to the configuration/state file
    #[arg(value_name = "CFG", default_value = "UserChecker.cfg")]
    cfg: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ConfigFile::load(&cli.cfg)
        .with_context(|| format!("cannot read config file {}", cli.cfg.display()))?;

    // Without a directory session there is no snapshot and nothing to
    // reconcile; this is the one fatal connection.
    let directory = HttpDirectoryAdapter::connect(&DirectoryConfig {
        url: config.directory.url.clone(),
        username: config.directory.username.clone(),
        password: config.directory.password.clone(),
        timeout: NETWORK_TIMEOUT,
    })
    .await
    .context("directory connection failed")?;

    let smtp = SmtpConfig {
        server: config.smtp.server.clone(),
        port: config.smtp.port,
        ssl: config.smtp.ssl,
        auth: config.smtp.auth,
        username: config.smtp.username.clone(),
        password: config.smtp.password.clone(),
        timeout: NETWORK_TIMEOUT,
    };

    let result = run_pass(&mut config, &SystemClock, &directory, move || async move {
        SmtpMailTransport::connect(&smtp).await
    })
    .await;
    directory.logout().await;
    result?;

    // State is rewritten only after the pass completed.
    config
        .save(&cli.cfg)
        .with_context(|| format!("cannot save config file {}", cli.cfg.display()))?;
    Ok(())
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, skip the
/// "caused by" chain to avoid noisy duplicate output; otherwise render the
/// full chain so context isn't lost.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|source| top.contains(&source.to_string()));
    if chain_redundant {
        top
    } else {
        let mut out = top;
        for source in err.chain().skip(1) {
            out.push_str(&format!("\n  caused by: {source}"));
        }
        out
    }
}
