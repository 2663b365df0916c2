use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    ActionCommands, BusinessCommands, CrisisCommands, MetricsArgs, PlanCommands, RecoveryCommands,
};

/// Main command-line interface for the Aegis crisis tracking tool
///
/// Aegis helps small businesses prepare for and recover from crises. Each
/// emergency plan holds three phases of response actions (pre-crisis,
/// during-crisis, post-crisis); checking actions off against a plan linked
/// to an open crisis keeps that crisis's recovery record up to date.
#[derive(Parser)]
#[command(version, about, name = "aegis")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/aegis/aegis.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Principal acting on behalf of a business; required for commands that
    /// modify data
    #[arg(long, global = true, env = "AEGIS_PRINCIPAL")]
    pub principal: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Aegis CLI
///
/// Commands are grouped by resource:
/// - `business`: Register and inspect the acting principal's business
/// - `plan`: Manage emergency plans and their lifecycle
/// - `action`: Manage response actions within a plan's phases
/// - `crisis`: Open and inspect crisis events
/// - `recovery`: Inspect and update recovery records
/// - `metrics`: Derive read-only metrics for a plan
#[derive(Subcommand)]
pub enum Commands {
    /// Manage businesses
    #[command(alias = "b")]
    Business {
        #[command(subcommand)]
        command: BusinessCommands,
    },
    /// Manage emergency plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Manage response actions within plans
    #[command(alias = "a")]
    Action {
        #[command(subcommand)]
        command: ActionCommands,
    },
    /// Manage crisis events
    #[command(alias = "c")]
    Crisis {
        #[command(subcommand)]
        command: CrisisCommands,
    },
    /// Manage recovery records
    #[command(alias = "r")]
    Recovery {
        #[command(subcommand)]
        command: RecoveryCommands,
    },
    /// Show derived metrics for a plan
    #[command(alias = "m")]
    Metrics(MetricsArgs),
}
