//! Stage and lead listing commands: `leadflow stages`, `leadflow leads`, `leadflow due`.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use leadflow::filter::{LeadQuery, SortKey, SortOrder, follow_ups_due, visible_leads};
use leadflow::ui;

use super::super::{Cli, FilterArgs};
use super::{build_query, load_book, resolve_scope};

pub fn cmd_stages() -> Result<()> {
    ui::display_stages();
    Ok(())
}

pub fn cmd_leads(
    project_dir: &Path,
    cli: &Cli,
    filters: &FilterArgs,
    sort: Option<&str>,
    desc: bool,
    json: bool,
) -> Result<()> {
    let book = load_book(project_dir, cli)?;
    let scope = resolve_scope(&book.users, filters.as_user.as_deref())?;
    let query = build_query(filters)?;
    let order = if desc {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    let sort = sort
        .map(|key| key.parse::<SortKey>().map_err(|e| anyhow!(e)))
        .transpose()?
        .map(|key| (key, order));

    let leads = visible_leads(book.leads.leads(), &scope, &query, sort);
    if json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
    } else {
        ui::display_leads(&leads);
    }
    Ok(())
}

pub fn cmd_due(
    project_dir: &Path,
    cli: &Cli,
    on: Option<&str>,
    as_user: Option<&str>,
) -> Result<()> {
    let today = match on {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let book = load_book(project_dir, cli)?;
    let scope = resolve_scope(&book.users, as_user)?;
    let scoped = visible_leads(book.leads.leads(), &scope, &LeadQuery::new(), None);
    let due = follow_ups_due(&scoped, today);
    ui::display_follow_ups(&due, today);
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Expected YYYY-MM-DD", raw))
}
