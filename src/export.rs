//! CSV report serialization.
//!
//! One serializer drives every report: a report is a list of [`Column`]s,
//! each pairing a header with a function that renders one field of a row.
//! Output format:
//!
//! - first line is the header row
//! - one line per record, joined with `\n`, no trailing newline
//! - every field, headers included, wrapped in double quotes; embedded
//!   quotes are doubled
//! - line breaks inside a field become a single space, so a report of N
//!   records is always N+1 lines
//!
//! Reports are write-only; there is no import path.

use std::str::FromStr;

use crate::lead::Lead;
use crate::user::User;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A report column: header text plus the field renderer.
pub struct Column<T> {
    pub header: &'static str,
    pub render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub const fn new(header: &'static str, render: fn(&T) -> String) -> Self {
        Self { header, render }
    }
}

fn quote(field: &str) -> String {
    let single_line = field.replace("\r\n", " ").replace(['\r', '\n'], " ");
    format!("\"{}\"", single_line.replace('"', "\"\""))
}

/// Serialize `rows` with the given columns.
pub fn to_csv<T>(rows: &[T], columns: &[Column<T>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        columns
            .iter()
            .map(|c| quote(c.header))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        lines.push(
            columns
                .iter()
                .map(|c| quote(&(c.render)(row)))
                .collect::<Vec<_>>()
                .join(","),
        );
    }
    lines.join("\n")
}

/// Name, Email, Phone, Company, Source, Status, Assigned Agent, Date, Next Follow Up.
pub fn lead_columns() -> [Column<Lead>; 9] {
    [
        Column::new("Name", |l: &Lead| l.name.clone()),
        Column::new("Email", |l: &Lead| l.email.clone()),
        Column::new("Phone", |l: &Lead| l.phone.clone()),
        Column::new("Company", |l: &Lead| l.company.clone()),
        Column::new("Source", |l: &Lead| l.source.clone()),
        Column::new("Status", |l: &Lead| l.status.label().to_string()),
        Column::new("Assigned Agent", |l: &Lead| l.assigned_agent.clone()),
        Column::new("Date", |l: &Lead| l.created_at.format(DATE_FORMAT).to_string()),
        Column::new("Next Follow Up", |l: &Lead| {
            l.next_follow_up
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        }),
    ]
}

pub fn user_columns() -> [Column<User>; 4] {
    [
        Column::new("Name", |u: &User| u.name.clone()),
        Column::new("Email", |u: &User| u.email.clone()),
        Column::new("Role", |u: &User| u.role.label().to_string()),
        Column::new("Status", |u: &User| u.status.label().to_string()),
    ]
}

pub fn export_leads(leads: &[Lead]) -> String {
    to_csv(leads, &lead_columns())
}

pub fn export_users(users: &[User]) -> String {
    to_csv(users, &user_columns())
}

/// Report types offered by the export action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Leads,
    Users,
}

impl Report {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leads => "leads",
            Self::Users => "users",
        }
    }
}

impl FromStr for Report {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "leads" => Ok(Self::Leads),
            "users" => Ok(Self::Users),
            _ => Err(format!("Invalid report '{}'. Valid reports: leads, users", s)),
        }
    }
}
