//! Users of the dashboard: admins, managers and the agents leads are assigned to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LeadflowError;
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Agent => "agent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Agent => "Agent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LeadflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "agent" => Ok(Self::Agent),
            _ => Err(LeadflowError::UnknownRole {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl FromStr for UserStatus {
    type Err = LeadflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(LeadflowError::UnknownUserStatus {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
}

impl User {
    pub fn from_draft(id: String, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            role: draft.role,
            status: UserStatus::Active,
        }
    }

    /// Overwrite name, email and role, keeping `id` and `status`.
    pub fn apply_draft(&self, draft: UserDraft) -> Self {
        Self {
            id: self.id.clone(),
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            role: draft.role,
            status: self.status,
        }
    }

    pub fn with_status_toggled(&self) -> Self {
        Self {
            status: self.status.toggled(),
            ..self.clone()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Add/edit form input for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserDraft {
    pub fn new(name: &str, email: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            role,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require_email("email", &self.email);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("Agent".parse::<Role>().unwrap(), Role::Agent);
        assert_eq!("MANAGER".parse::<Role>().unwrap(), Role::Manager);
        let err = "owner".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("Unknown role 'owner'"));
    }

    #[test]
    fn test_status_toggle_is_binary() {
        assert_eq!(UserStatus::Active.toggled(), UserStatus::Inactive);
        assert_eq!(UserStatus::Active.toggled().toggled(), UserStatus::Active);
    }

    #[test]
    fn test_new_user_is_active() {
        let user = User::from_draft(
            "U1".into(),
            UserDraft::new("Sarah Agent", "sarah@crm.io", Role::Agent),
        );
        assert!(user.is_active());
        assert!(!user.with_status_toggled().is_active());
    }

    #[test]
    fn test_apply_draft_keeps_status() {
        let user = User::from_draft(
            "U1".into(),
            UserDraft::new("Sarah Agent", "sarah@crm.io", Role::Agent),
        )
        .with_status_toggled();
        let edited = user.apply_draft(UserDraft::new("Sarah Lead", "sarah@crm.io", Role::Manager));
        assert_eq!(edited.id, "U1");
        assert_eq!(edited.role, Role::Manager);
        assert_eq!(edited.status, UserStatus::Inactive);
    }

    #[test]
    fn test_user_draft_validation() {
        let errors = UserDraft::new("", "nope", Role::Admin).validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is invalid"));
    }

    #[test]
    fn test_status_defaults_to_active_when_missing() {
        let user: User = serde_json::from_str(
            r#"{"id":"U1","name":"Mia","email":"mia@crm.io","role":"manager"}"#,
        )
        .unwrap();
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.role, Role::Manager);
    }
}
