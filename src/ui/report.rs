//! Console rendering for lead lists, pipeline summaries and rollups.
//!
//! `render_*` functions build the text; `display_*` print it to stdout.

use std::fmt::Write;

use chrono::NaiveDate;
use console::style;

use crate::lead::Lead;
use crate::stage::Stage;
use crate::stats::{PipelineSummary, Rollup, RollupKey};
use crate::ui::icons::{CHART, CLOCK, PEOPLE};

/// Cut `value` to at most `width` characters, marking the cut with `…`.
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let kept: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

fn stage_cell(stage: Stage, width: usize) -> String {
    stage
        .style()
        .apply_to(format!("{:<width$}", stage.label(), width = width))
        .to_string()
}

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_stages() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<4} {:<13} {:<13} Terminal", "#", "Key", "Label");
    let _ = writeln!(out, "{:<4} {:<13} {:<13} --------", "----", "-------------", "-------------");
    for stage in Stage::ALL {
        let _ = writeln!(
            out,
            "{:<4} {:<13} {}{} {}",
            stage.position() + 1,
            stage.as_str(),
            stage.icon(),
            stage_cell(stage, 10),
            if stage.is_terminal() { "yes" } else { "no" }
        );
    }
    out
}

pub fn render_leads(leads: &[Lead]) -> String {
    let mut out = String::new();
    if leads.is_empty() {
        let _ = writeln!(out, "No leads match the current filters.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<22} {:<26} {:<16} {:<10} {:<12} {:<14} {:<10}",
        "Name", "Email", "Company", "Source", "Status", "Agent", "Follow Up"
    );
    let _ = writeln!(
        out,
        "{:<22} {:<26} {:<16} {:<10} {:<12} {:<14} {:<10}",
        "-".repeat(22),
        "-".repeat(26),
        "-".repeat(16),
        "-".repeat(10),
        "-".repeat(12),
        "-".repeat(14),
        "-".repeat(10)
    );
    for lead in leads {
        let _ = writeln!(
            out,
            "{:<22} {:<26} {:<16} {:<10} {} {:<14} {:<10}",
            truncate(&lead.name, 22),
            truncate(&lead.email, 26),
            truncate(&lead.company, 16),
            truncate(&lead.source, 10),
            stage_cell(lead.status, 12),
            truncate(&lead.assigned_agent, 14),
            date_cell(lead.next_follow_up)
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{} lead(s)", leads.len());
    out
}

pub fn render_summary(summary: &PipelineSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}{} ({} leads)",
        CHART,
        style("Pipeline Summary").bold(),
        summary.total
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:<12} {}", "Total", summary.total);
    let _ = writeln!(out, "  {:<12} {}", "Open", summary.open);
    let _ = writeln!(out, "  {:<12} {}", "Converted", summary.converted);
    let _ = writeln!(out, "  {:<12} {}", "Lost", summary.lost);
    let _ = writeln!(out, "  {:<12} {:.1}%", "Conversion", summary.conversion_rate);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<13} {:<8} {:<8}", "Stage", "Count", "Share");
    let _ = writeln!(out, "{:<13} {:<8} {:<8}", "-".repeat(13), "-".repeat(8), "-".repeat(8));
    for share in &summary.stages {
        let _ = writeln!(
            out,
            "{} {:<8} {:.1}%",
            stage_cell(share.stage, 13),
            share.count,
            share.share
        );
    }
    out
}

pub fn render_rollup(rows: &[Rollup], key: RollupKey) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{} Rollup", PEOPLE, style(key.label()).bold());
    let _ = writeln!(out);
    if rows.is_empty() {
        let _ = writeln!(out, "No leads to roll up.");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<20} {:<7} {:<7} {:<10} {:<7} {:<10}",
        key.label(),
        "Total",
        "Open",
        "Converted",
        "Lost",
        "Rate"
    );
    let _ = writeln!(
        out,
        "{:<20} {:<7} {:<7} {:<10} {:<7} {:<10}",
        "-".repeat(20),
        "-".repeat(7),
        "-".repeat(7),
        "-".repeat(10),
        "-".repeat(7),
        "-".repeat(10)
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<20} {:<7} {:<7} {:<10} {:<7} {:.1}%",
            truncate(&row.key, 20),
            row.total,
            row.open,
            row.converted,
            row.lost,
            row.conversion_rate
        );
    }
    out
}

pub fn display_stages() {
    println!();
    print!("{}", render_stages());
    println!();
}

pub fn display_leads(leads: &[Lead]) {
    println!();
    print!("{}", render_leads(leads));
    println!();
}

pub fn display_summary(summary: &PipelineSummary) {
    println!();
    print!("{}", render_summary(summary));
    println!();
}

pub fn display_rollup(rows: &[Rollup], key: RollupKey) {
    println!();
    print!("{}", render_rollup(rows, key));
    println!();
}

pub fn display_follow_ups(leads: &[Lead], today: NaiveDate) {
    println!();
    println!("{}Follow-ups due on or before {}", CLOCK, today.format("%Y-%m-%d"));
    println!();
    if leads.is_empty() {
        println!("Nothing due.");
    } else {
        print!("{}", render_leads(leads));
    }
    println!();
}
