//! Lead records and the form draft used to add or edit them.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::stage::Stage;
use crate::validation::ValidationErrors;

/// Follow-up offset applied to new leads when none is configured.
pub const DEFAULT_FOLLOW_UP_DAYS: u64 = 7;

/// Sources offered by the add-lead form. The domain is open; leads may carry any source.
pub const COMMON_SOURCES: [&str; 5] = ["Website", "Referral", "LinkedIn", "Ads", "Cold Call"];

/// A sales prospect tracked through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    pub source: String,
    pub status: Stage,
    pub assigned_agent: String,
    pub created_at: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<NaiveDate>,
}

impl Lead {
    /// Build a lead from a validated draft.
    ///
    /// Status defaults to the first stage and the follow-up date to
    /// `created_at + follow_up_days` unless the draft sets them.
    pub fn from_draft(
        id: String,
        draft: LeadDraft,
        created_at: NaiveDate,
        follow_up_days: u64,
    ) -> Self {
        let next_follow_up = draft
            .next_follow_up
            .or_else(|| default_follow_up(created_at, follow_up_days));
        Self {
            id,
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            company: draft.company.trim().to_string(),
            source: draft.source.trim().to_string(),
            status: draft.status.unwrap_or(Stage::first()),
            assigned_agent: draft.assigned_agent.trim().to_string(),
            created_at,
            next_follow_up,
        }
    }

    /// Overwrite the editable fields from a draft, keeping `id` and `created_at`.
    pub fn apply_draft(&self, draft: LeadDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            company: draft.company.trim().to_string(),
            source: draft.source.trim().to_string(),
            status: draft.status.unwrap_or(self.status),
            assigned_agent: draft.assigned_agent.trim().to_string(),
            created_at: self.created_at,
            next_follow_up: draft.next_follow_up.or(self.next_follow_up),
        }
    }

    /// Copy of this lead with only the status replaced.
    pub fn with_status(&self, status: Stage) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Case-insensitive substring match on name, email or company.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.company.to_lowercase().contains(needle)
    }

    /// Still in the pipeline (not converted or lost).
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Follow-up date on or before `today` for a lead still in the pipeline.
    pub fn is_follow_up_due(&self, today: NaiveDate) -> bool {
        self.is_open() && self.next_follow_up.is_some_and(|date| date <= today)
    }
}

fn default_follow_up(created_at: NaiveDate, follow_up_days: u64) -> Option<NaiveDate> {
    created_at.checked_add_days(Days::new(follow_up_days))
}

/// Add/edit form input for a lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    pub source: String,
    pub assigned_agent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_follow_up: Option<NaiveDate>,
}

impl LeadDraft {
    pub fn new(name: &str, email: &str, source: &str, assigned_agent: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            source: source.to_string(),
            assigned_agent: assigned_agent.to_string(),
            ..Self::default()
        }
    }

    pub fn with_company(mut self, company: &str) -> Self {
        self.company = company.to_string();
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = phone.to_string();
        self
    }

    pub fn with_status(mut self, status: Stage) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_follow_up(mut self, date: NaiveDate) -> Self {
        self.next_follow_up = Some(date);
        self
    }

    /// Draft pre-filled from an existing lead, for the edit form.
    pub fn from_lead(lead: &Lead) -> Self {
        Self {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            company: lead.company.clone(),
            source: lead.source.clone(),
            assigned_agent: lead.assigned_agent.clone(),
            status: Some(lead.status),
            next_follow_up: lead.next_follow_up,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_email("email", &self.email);
        errors.require("source", &self.source, "Source is required");
        errors.require("assignedAgent", &self.assigned_agent, "Assigned agent is required");
        errors.into_result()
    }
}
