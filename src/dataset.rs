//! JSON snapshot of a lead book, loaded into the in-memory stores.
//!
//! ```json
//! {
//!   "leads": [
//!     { "id": "L-1", "name": "Alice", "email": "alice@acme.io", "phone": "",
//!       "company": "Acme", "source": "Website", "status": "new",
//!       "assignedAgent": "Sam", "createdAt": "2024-03-01",
//!       "nextFollowUp": "2024-03-08" }
//!   ],
//!   "users": [
//!     { "id": "U-1", "name": "Sam", "email": "sam@crm.io",
//!       "role": "agent", "status": "active" }
//!   ]
//! }
//! ```
//!
//! The snapshot is input only. Nothing is ever written back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::LeadflowError;
use crate::lead::Lead;
use crate::store::{LeadStore, UserDirectory};
use crate::user::User;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub users: Vec<User>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, LeadflowError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| LeadflowError::DatasetRead {
                path: path.to_path_buf(),
                source,
            })?;
        let dataset: Dataset =
            serde_json::from_str(&content).map_err(|source| LeadflowError::DatasetParse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(
            path = %path.display(),
            leads = dataset.leads.len(),
            users = dataset.users.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Build the stores, rejecting duplicate lead or user ids.
    pub fn into_stores(
        self,
        follow_up_days: u64,
    ) -> Result<(LeadStore, UserDirectory), LeadflowError> {
        let leads = LeadStore::from_leads(self.leads)?.with_follow_up_days(follow_up_days);
        let users = UserDirectory::from_users(self.users)?;
        Ok((leads, users))
    }
}
