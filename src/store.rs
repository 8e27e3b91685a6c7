//! In-memory lead book and user directory.
//!
//! Both stores follow an immutable-update discipline: every mutation takes
//! `&self` and returns a new store, leaving the original untouched. Views
//! holding the previous store can compare old and new to detect changes.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;
use uuid::Uuid;

use crate::errors::LeadflowError;
use crate::lead::{DEFAULT_FOLLOW_UP_DAYS, Lead, LeadDraft};
use crate::stage::Stage;
use crate::user::{Role, User, UserDraft};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Ordered collection of leads with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadStore {
    leads: Vec<Lead>,
    follow_up_days: u64,
}

impl Default for LeadStore {
    fn default() -> Self {
        Self {
            leads: Vec::new(),
            follow_up_days: DEFAULT_FOLLOW_UP_DAYS,
        }
    }
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, rejecting duplicate ids.
    pub fn from_leads(leads: Vec<Lead>) -> Result<Self, LeadflowError> {
        let mut seen = HashSet::new();
        for lead in &leads {
            if !seen.insert(lead.id.as_str()) {
                return Err(LeadflowError::DuplicateLeadId {
                    id: lead.id.clone(),
                });
            }
        }
        Ok(Self {
            leads,
            ..Self::default()
        })
    }

    /// Set the follow-up offset used for leads added through [`LeadStore::add_lead`].
    pub fn with_follow_up_days(mut self, days: u64) -> Self {
        self.follow_up_days = days;
        self
    }

    pub fn follow_up_days(&self) -> u64 {
        self.follow_up_days
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    /// Validate a draft and append a new lead created on `created_at`.
    ///
    /// Returns the new store and the created lead.
    pub fn add_lead(
        &self,
        draft: LeadDraft,
        created_at: NaiveDate,
    ) -> Result<(Self, Lead), LeadflowError> {
        draft.validate()?;
        let lead = Lead::from_draft(new_id(), draft, created_at, self.follow_up_days);
        let store = self.insert(lead.clone())?;
        Ok((store, lead))
    }

    /// Append an already-built lead.
    pub fn insert(&self, lead: Lead) -> Result<Self, LeadflowError> {
        if self.get(&lead.id).is_some() {
            return Err(LeadflowError::DuplicateLeadId { id: lead.id });
        }
        debug!(lead_id = %lead.id, status = %lead.status, "Adding lead");
        let mut leads = self.leads.clone();
        leads.push(lead);
        Ok(Self {
            leads,
            follow_up_days: self.follow_up_days,
        })
    }

    /// Overwrite the editable fields of a lead from a validated draft.
    pub fn edit_lead(&self, id: &str, draft: LeadDraft) -> Result<Self, LeadflowError> {
        draft.validate()?;
        debug!(lead_id = %id, "Editing lead");
        self.replace(id, |lead| lead.apply_draft(draft.clone()))
    }

    /// Move a lead to another stage. Every transition is permitted.
    pub fn change_status(&self, id: &str, status: Stage) -> Result<Self, LeadflowError> {
        debug!(lead_id = %id, status = %status, "Changing lead status");
        self.replace(id, |lead| lead.with_status(status))
    }

    fn replace<F>(&self, id: &str, update: F) -> Result<Self, LeadflowError>
    where
        F: Fn(&Lead) -> Lead,
    {
        if self.get(id).is_none() {
            return Err(LeadflowError::LeadNotFound { id: id.to_string() });
        }
        let leads = self
            .leads
            .iter()
            .map(|lead| if lead.id == id { update(lead) } else { lead.clone() })
            .collect();
        Ok(Self {
            leads,
            follow_up_days: self.follow_up_days,
        })
    }

    /// Distinct assigned agents, sorted by name.
    pub fn agents(&self) -> Vec<String> {
        distinct(self.leads.iter().map(|lead| lead.assigned_agent.as_str()))
    }

    /// Distinct lead sources, sorted by name.
    pub fn sources(&self) -> Vec<String> {
        distinct(self.leads.iter().map(|lead| lead.source.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Ordered collection of users. Users are never deleted, only deactivated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: Vec<User>) -> Result<Self, LeadflowError> {
        let mut seen = HashSet::new();
        for user in &users {
            if !seen.insert(user.id.as_str()) {
                return Err(LeadflowError::DuplicateUserId {
                    id: user.id.clone(),
                });
            }
        }
        Ok(Self { users })
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Look a user up by id, then by exact name.
    pub fn find(&self, id_or_name: &str) -> Option<&User> {
        self.get(id_or_name)
            .or_else(|| self.users.iter().find(|user| user.name == id_or_name))
    }

    pub fn add_user(&self, draft: UserDraft) -> Result<(Self, User), LeadflowError> {
        draft.validate()?;
        let user = User::from_draft(new_id(), draft);
        debug!(user_id = %user.id, role = %user.role, "Adding user");
        let mut users = self.users.clone();
        users.push(user.clone());
        Ok((Self { users }, user))
    }

    pub fn edit_user(&self, id: &str, draft: UserDraft) -> Result<Self, LeadflowError> {
        draft.validate()?;
        debug!(user_id = %id, "Editing user");
        self.replace(id, |user| user.apply_draft(draft.clone()))
    }

    pub fn toggle_status(&self, id: &str) -> Result<Self, LeadflowError> {
        debug!(user_id = %id, "Toggling user status");
        self.replace(id, User::with_status_toggled)
    }

    fn replace<F>(&self, id: &str, update: F) -> Result<Self, LeadflowError>
    where
        F: Fn(&User) -> User,
    {
        if self.get(id).is_none() {
            return Err(LeadflowError::UserNotFound { id: id.to_string() });
        }
        let users = self
            .users
            .iter()
            .map(|user| if user.id == id { update(user) } else { user.clone() })
            .collect();
        Ok(Self { users })
    }

    /// Names of active agents, in directory order. These populate the assign-to picker.
    pub fn active_agent_names(&self) -> Vec<String> {
        self.users
            .iter()
            .filter(|user| user.role == Role::Agent && user.is_active())
            .map(|user| user.name.clone())
            .collect()
    }
}
