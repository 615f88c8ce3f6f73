// SPDX-License-Identifier: MIT
//! sitecheck — CLI entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use sitecheck::config::SiteCheckConfig;
use sitecheck::health::text::{EnglishTextService, TextService};
use sitecheck::{checks, output, StatusResultType};

#[derive(Parser)]
#[command(
    name = "sitecheck",
    version,
    about = "Health checks and one-click remediations for deployed CMS sites"
)]
struct Cli {
    /// Path to a sitecheck.toml configuration file.
    #[arg(long, env = "SITECHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Site root directory (overrides the config file).
    #[arg(long)]
    site_root: Option<PathBuf>,

    /// Base URL of the running site (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// JSON snapshot of CMS entities; enables the CMS-level checks.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every registered check and print the report.
    Report {
        /// Emit the report as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// List the registered checks and their ids.
    List,
    /// Execute a single remediation action.
    Fix {
        /// Id of the check that owns the action.
        #[arg(long)]
        check: Uuid,
        /// Action alias, as offered by the latest status.
        #[arg(long)]
        action: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sitecheck=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = SiteCheckConfig::load_or_default(cli.config.as_deref())?;
    if let Some(site_root) = cli.site_root {
        config.site_root = site_root;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(snapshot) = cli.snapshot {
        config.cms_snapshot = Some(snapshot);
    }

    let text: Arc<dyn TextService> = Arc::new(EnglishTextService);
    let registry = checks::build_registry(&config, text)?;

    match cli.command {
        Command::Report { json } => {
            let report = registry.list_statuses().await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_report(&report);
            }
            if report.overall == StatusResultType::Error {
                std::process::exit(1);
            }
        }
        Command::List => {
            for check in registry.checks() {
                let meta = check.meta();
                println!("{}  {:<28} {}", meta.id, meta.name, meta.description);
            }
        }
        Command::Fix { check, action } => {
            let status = registry
                .dispatch(check, &action)
                .await
                .with_context(|| format!("action '{action}' on check {check} failed"))?;
            output::print_fix_result(&status);
        }
    }

    Ok(())
}
