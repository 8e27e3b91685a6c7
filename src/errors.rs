//! Typed error hierarchy for the lead book.
//!
//! Library operations return [`LeadflowError`]. Form validation failures are
//! carried as a field → message map ([`ValidationErrors`]) rather than one
//! variant per field.

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum LeadflowError {
    #[error(
        "Unknown stage '{key}'. Valid stages: new, contacted, qualified, proposal, negotiation, converted, lost"
    )]
    UnknownStage { key: String },

    #[error("Unknown role '{value}'. Valid roles: admin, manager, agent")]
    UnknownRole { value: String },

    #[error("Unknown user status '{value}'. Valid values: active, inactive")]
    UnknownUserStatus { value: String },

    #[error("Lead {id} not found")]
    LeadNotFound { id: String },

    #[error("User {id} not found")]
    UserNotFound { id: String },

    #[error("Duplicate lead id {id}")]
    DuplicateLeadId { id: String },

    #[error("Duplicate user id {id}")]
    DuplicateUserId { id: String },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Failed to read dataset at {path}: {source}")]
    DatasetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse dataset at {path}: {source}")]
    DatasetParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ValidationErrors> for LeadflowError {
    fn from(errors: ValidationErrors) -> Self {
        LeadflowError::Validation(errors)
    }
}
