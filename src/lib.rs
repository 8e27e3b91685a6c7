pub mod config;
pub mod dataset;
pub mod errors;
pub mod export;
pub mod filter;
pub mod lead;
pub mod stage;
pub mod stats;
pub mod store;
pub mod ui;
pub mod user;
pub mod validation;

pub use errors::LeadflowError;
pub use lead::{Lead, LeadDraft};
pub use stage::Stage;
pub use store::{LeadStore, UserDirectory};
pub use user::{Role, User, UserDraft, UserStatus};
