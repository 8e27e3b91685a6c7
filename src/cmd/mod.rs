//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module   | Commands handled          |
//! |----------|---------------------------|
//! | `leads`  | `Stages`, `Leads`, `Due`  |
//! | `stats`  | `Summary`, `Rollup`       |
//! | `export` | `Export`                  |
//! | `config` | `Config`                  |

pub mod config;
pub mod export;
pub mod leads;
pub mod stats;

pub use config::cmd_config;
pub use export::cmd_export;
pub use leads::{cmd_due, cmd_leads, cmd_stages};
pub use stats::{cmd_rollup, cmd_summary};

use std::path::Path;

use anyhow::{Context, Result, bail};
use leadflow::config::LeadflowConfig;
use leadflow::dataset::Dataset;
use leadflow::filter::{LeadQuery, Scope, Selection};
use leadflow::stage::Stage;
use leadflow::store::{LeadStore, UserDirectory};

use super::{Cli, FilterArgs};

/// Everything a read-only command needs: resolved config plus the loaded stores.
pub struct LeadBook {
    pub config: LeadflowConfig,
    pub leads: LeadStore,
    pub users: UserDirectory,
}

pub fn load_book(project_dir: &Path, cli: &Cli) -> Result<LeadBook> {
    let config = LeadflowConfig::with_cli_args(project_dir.to_path_buf(), cli.data.clone())?;
    let path = config.dataset_path();
    let dataset = Dataset::load(&path)
        .with_context(|| format!("Could not load lead book from {}", path.display()))?;
    let (leads, users) = dataset.into_stores(config.follow_up_days())?;
    Ok(LeadBook {
        config,
        leads,
        users,
    })
}

/// Scope for `--as`. Without it the report covers the whole book.
pub fn resolve_scope(users: &UserDirectory, as_user: Option<&str>) -> Result<Scope> {
    match as_user {
        None => Ok(Scope::Everything),
        Some(name) => match users.find(name) {
            Some(user) => Ok(Scope::for_user(user)),
            None => bail!("Unknown user '{}'. Pass a user id or exact name.", name),
        },
    }
}

pub fn build_query(filters: &FilterArgs) -> Result<LeadQuery> {
    let status: Selection<Stage> = match filters.status.as_deref() {
        Some(raw) => raw.parse()?,
        None => Selection::All,
    };
    Ok(LeadQuery {
        text: filters.search.clone().unwrap_or_default(),
        status,
        source: text_selection(filters.source.as_deref()),
        agent: text_selection(filters.agent.as_deref()),
    })
}

fn text_selection(raw: Option<&str>) -> Selection<String> {
    raw.map(|value| value.parse().unwrap_or_default())
        .unwrap_or_default()
}
