//! Aggregate reports: `leadflow summary` and `leadflow rollup`.

use std::path::Path;

use anyhow::{Result, anyhow};
use leadflow::filter::visible_leads;
use leadflow::stats::{PipelineSummary, RollupKey, rollup};
use leadflow::ui;

use super::super::{Cli, FilterArgs};
use super::{build_query, load_book, resolve_scope};

pub fn cmd_summary(project_dir: &Path, cli: &Cli, filters: &FilterArgs, json: bool) -> Result<()> {
    let book = load_book(project_dir, cli)?;
    let scope = resolve_scope(&book.users, filters.as_user.as_deref())?;
    let query = build_query(filters)?;
    let leads = visible_leads(book.leads.leads(), &scope, &query, None);

    let summary = PipelineSummary::from_leads(&leads);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        ui::display_summary(&summary);
    }
    Ok(())
}

pub fn cmd_rollup(
    project_dir: &Path,
    cli: &Cli,
    by: &str,
    filters: &FilterArgs,
    json: bool,
) -> Result<()> {
    let key: RollupKey = by.parse().map_err(|e: String| anyhow!(e))?;
    let book = load_book(project_dir, cli)?;
    let scope = resolve_scope(&book.users, filters.as_user.as_deref())?;
    let query = build_query(filters)?;
    let leads = visible_leads(book.leads.leads(), &scope, &query, None);

    let rows = rollup(&leads, key);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        ui::display_rollup(&rows, key);
    }
    Ok(())
}
