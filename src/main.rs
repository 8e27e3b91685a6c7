use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "leadflow")]
#[command(version, about = "Lead pipeline reports over a JSON lead book")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true)]
    pub project_dir: Option<PathBuf>,

    /// Path to the dataset JSON. Overrides LEADFLOW_DATASET and leadflow.toml.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Search box and dropdown filters shared by every list-style command.
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive match on name, email or company
    #[arg(short, long)]
    pub search: Option<String>,

    /// Stage key (new, contacted, ..., lost) or "all"
    #[arg(long)]
    pub status: Option<String>,

    /// Exact lead source or "all"
    #[arg(long)]
    pub source: Option<String>,

    /// Exact assigned agent name or "all"
    #[arg(long)]
    pub agent: Option<String>,

    /// Show the view of this user (id or name). Agents only see their own leads.
    #[arg(long = "as", value_name = "USER")]
    pub as_user: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the pipeline stages in order
    Stages,
    /// List leads matching the filters
    Leads {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort by: name, company, created, follow-up, stage
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show pipeline counts and the conversion rate
    Summary {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        json: bool,
    },
    /// Per-agent or per-source totals and conversion rates
    Rollup {
        /// Group by: agent or source
        by: String,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        json: bool,
    },
    /// Write a CSV report
    Export {
        /// Report type: leads or users
        report: String,

        /// Output file ("-" for stdout). Defaults to the [export] setting in leadflow.toml.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Open leads whose follow-up is due
    Due {
        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        on: Option<String>,

        #[arg(long = "as", value_name = "USER")]
        as_user: Option<String>,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default leadflow.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_dir = match cli.project_dir.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match &cli.command {
        Commands::Stages => cmd::cmd_stages()?,
        Commands::Leads {
            filters,
            sort,
            desc,
            json,
        } => cmd::cmd_leads(&project_dir, &cli, filters, sort.as_deref(), *desc, *json)?,
        Commands::Summary { filters, json } => {
            cmd::cmd_summary(&project_dir, &cli, filters, *json)?
        }
        Commands::Rollup { by, filters, json } => {
            cmd::cmd_rollup(&project_dir, &cli, by, filters, *json)?
        }
        Commands::Export {
            report,
            output,
            filters,
        } => cmd::cmd_export(&project_dir, &cli, report, output.as_deref(), filters)?,
        Commands::Due { on, as_user } => {
            cmd::cmd_due(&project_dir, &cli, on.as_deref(), as_user.as_deref())?
        }
        Commands::Config { command } => {
            cmd::cmd_config(&project_dir, &cli, command.clone())?
        }
    }

    Ok(())
}
