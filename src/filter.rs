//! Filtering, role scoping and sorting of lead collections.
//!
//! All functions here are pure: they take a slice and return a fresh `Vec`,
//! preserving input order unless a sort key is given.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::lead::Lead;
use crate::stage::Stage;
use crate::user::{Role, User};

/// Sentinel accepted wherever a categorical filter is parsed from text.
pub const ALL: &str = "all";

/// A categorical filter value: everything, or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Selection<T> {
    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Only(_))
    }

    pub fn matches<U: ?Sized>(&self, value: &U) -> bool
    where
        T: PartialEq<U>,
    {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    /// Blank input and `"all"` (any case) select everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            Ok(Selection::All)
        } else {
            trimmed.parse().map(Selection::Only)
        }
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Selection::Only(v),
            None => Selection::All,
        }
    }
}

/// Search box plus the status, source and agent dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadQuery {
    pub text: String,
    pub status: Selection<Stage>,
    pub source: Selection<String>,
    pub agent: Selection<String>,
}

impl LeadQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn status(mut self, status: Stage) -> Self {
        self.status = Selection::Only(status);
        self
    }

    /// Exact source, or everything for `"all"` and blank input.
    pub fn source(mut self, source: &str) -> Self {
        self.source = source.parse().unwrap_or_default();
        self
    }

    /// Exact agent name, or everything for `"all"` and blank input.
    pub fn agent(mut self, agent: &str) -> Self {
        self.agent = agent.parse().unwrap_or_default();
        self
    }

    /// No filter narrows the collection.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
            && !self.status.is_active()
            && !self.source.is_active()
            && !self.agent.is_active()
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        let needle = self.text.trim().to_lowercase();
        self.matches_with_needle(lead, &needle)
    }

    fn matches_with_needle(&self, lead: &Lead, needle: &str) -> bool {
        lead.matches_text(needle)
            && self.status.matches(&lead.status)
            && self.source.matches(lead.source.as_str())
            && self.agent.matches(lead.assigned_agent.as_str())
    }
}

/// Leads matching every active filter, in input order.
pub fn filter_leads(leads: &[Lead], query: &LeadQuery) -> Vec<Lead> {
    let needle = query.text.trim().to_lowercase();
    leads
        .iter()
        .filter(|lead| query.matches_with_needle(lead, &needle))
        .cloned()
        .collect()
}

/// Which leads a user's dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Admin and manager views.
    Everything,
    /// Agent view: only leads assigned to this agent name.
    AssignedTo(String),
    /// Deactivated users see nothing.
    Nothing,
}

impl Scope {
    pub fn for_user(user: &User) -> Self {
        if !user.is_active() {
            return Scope::Nothing;
        }
        match user.role {
            Role::Admin | Role::Manager => Scope::Everything,
            Role::Agent => Scope::AssignedTo(user.name.clone()),
        }
    }

    pub fn permits(&self, lead: &Lead) -> bool {
        match self {
            Scope::Everything => true,
            Scope::AssignedTo(agent) => &lead.assigned_agent == agent,
            Scope::Nothing => false,
        }
    }

    pub fn apply(&self, leads: &[Lead]) -> Vec<Lead> {
        leads.iter().filter(|lead| self.permits(lead)).cloned().collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Company,
    Created,
    FollowUp,
    Stage,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "company" => Ok(Self::Company),
            "created" | "date" => Ok(Self::Created),
            "follow-up" | "followup" | "follow_up" => Ok(Self::FollowUp),
            "stage" | "status" => Ok(Self::Stage),
            _ => Err(format!(
                "Invalid sort key '{}'. Valid keys: name, company, created, follow-up, stage",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

fn compare(a: &Lead, b: &Lead, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
        SortKey::Created => a.created_at.cmp(&b.created_at),
        SortKey::FollowUp => match (a.next_follow_up, b.next_follow_up) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Stage => a.status.position().cmp(&b.status.position()),
    }
}

/// Stable sort. Leads without a follow-up date stay last in either order.
pub fn sort_leads(leads: &[Lead], key: SortKey, order: SortOrder) -> Vec<Lead> {
    let mut sorted = leads.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => {
                if key == SortKey::FollowUp
                    && (a.next_follow_up.is_none() || b.next_follow_up.is_none())
                {
                    ord
                } else {
                    ord.reverse()
                }
            }
        }
    });
    sorted
}

/// Open leads whose follow-up date is on or before `today`, earliest first.
pub fn follow_ups_due(leads: &[Lead], today: NaiveDate) -> Vec<Lead> {
    let due: Vec<Lead> = leads
        .iter()
        .filter(|lead| lead.is_follow_up_due(today))
        .cloned()
        .collect();
    sort_leads(&due, SortKey::FollowUp, SortOrder::Ascending)
}

/// Scope, then filter, then optionally sort: the pipeline every list view runs.
pub fn visible_leads(
    leads: &[Lead],
    scope: &Scope,
    query: &LeadQuery,
    sort: Option<(SortKey, SortOrder)>,
) -> Vec<Lead> {
    let scoped = scope.apply(leads);
    let filtered = filter_leads(&scoped, query);
    match sort {
        Some((key, order)) => sort_leads(&filtered, key, order),
        None => filtered,
    }
}
