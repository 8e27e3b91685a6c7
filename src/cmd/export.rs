//! CSV reports: `leadflow export <leads|users>`.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use leadflow::export::{Report, export_leads, export_users};
use leadflow::filter::visible_leads;
use leadflow::ui::icons::FILE_NEW;
use tracing::info;

use super::super::{Cli, FilterArgs};
use super::{build_query, load_book, resolve_scope};

/// Output path meaning "write to stdout".
const STDOUT: &str = "-";

pub fn cmd_export(
    project_dir: &Path,
    cli: &Cli,
    report: &str,
    output: Option<&Path>,
    filters: &FilterArgs,
) -> Result<()> {
    let report: Report = report.parse().map_err(|e: String| anyhow!(e))?;
    let book = load_book(project_dir, cli)?;

    let (csv, rows) = match report {
        Report::Leads => {
            let scope = resolve_scope(&book.users, filters.as_user.as_deref())?;
            let query = build_query(filters)?;
            let leads = visible_leads(book.leads.leads(), &scope, &query, None);
            (export_leads(&leads), leads.len())
        }
        Report::Users => (export_users(book.users.users()), book.users.len()),
    };

    if output.is_some_and(|path| path == Path::new(STDOUT)) {
        println!("{}", csv);
        return Ok(());
    }

    let path = match output {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => book.config.project_dir.join(path),
        None => book.config.export_path(report),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(&path, &csv)
        .with_context(|| format!("Failed to write {} report to {}", report.as_str(), path.display()))?;
    info!(report = report.as_str(), rows, path = %path.display(), "Exported report");

    println!(
        "{}Exported {} {} to {}",
        FILE_NEW,
        rows,
        report.as_str(),
        path.display()
    );
    Ok(())
}
