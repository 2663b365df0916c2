//! Aegis CLI Application
//!
//! Command-line interface for the Aegis crisis preparedness and recovery
//! tracking tool.

mod args;
mod cli;
mod renderer;

use aegis_core::{params::ListPlans, TrackerBuilder};
use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        principal,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(tracker, renderer, principal);

    info!("Aegis started");

    match command {
        Some(Business { command }) => cli.handle_business_command(command).await,
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Action { command }) => cli.handle_action_command(command).await,
        Some(Crisis { command }) => cli.handle_crisis_command(command).await,
        Some(Recovery { command }) => cli.handle_recovery_command(command).await,
        Some(Metrics(args)) => cli.show_metrics(args).await,
        None => cli.list_plans(&ListPlans { archived: false }).await,
    }
}
