//! CLI module
//!
//! Each subcommand runs one workflow operation against the configured
//! store and prints the JSON result on stdout:
//! - `request`: file a join request
//! - `accept`: promote a pending request to a membership
//! - `reject`: delete a pending request
//! - `list`: list a team's pending requests

mod commands;

pub use commands::execute;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;

use crate::config::AppConfig;
use crate::domain::ErrorReport;
use crate::infrastructure::logging;
use crate::infrastructure::store::{StoreConfig, StoreFactory};

/// Team request workflow - request, accept and reject team membership
#[derive(Debug, Parser)]
#[command(name = "team-requests")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// JSON snapshot to seed the in-memory store with (overrides store.seed)
    #[arg(long, global = true)]
    pub seed: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Ask to join a team
    Request(RequestArgs),

    /// Accept a pending request (team owner only)
    Accept(ManageArgs),

    /// Reject or withdraw a pending request (team owner only)
    Reject(ManageArgs),

    /// List the pending requests of a team (team owner only)
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Email of the requesting user
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub team: Option<String>,

    /// Note for the team owner
    #[arg(long)]
    pub message: Option<String>,
}

#[derive(Debug, Args)]
pub struct ManageArgs {
    /// Email of the team owner
    #[arg(long)]
    pub owner: Option<String>,

    #[arg(long)]
    pub team: Option<String>,

    /// Name of the user who filed the request
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Email of the team owner
    #[arg(long)]
    pub owner: Option<String>,

    #[arg(long)]
    pub team: Option<String>,
}

/// Load configuration, build the store and run one command
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    if cli.seed.is_some() {
        config.store.seed = cli.seed.clone();
    }

    let store_config = StoreConfig::from_settings(&config.store)?;
    let service = StoreFactory::create_service(&store_config).await?;

    match execute(&service, &cli.command).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(kind = err.kind(), "{}", err);
            println!("{}", serde_json::to_string_pretty(&ErrorReport::from(&err))?);
            Ok(ExitCode::FAILURE)
        }
    }
}
