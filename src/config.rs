//! Configuration for leadflow, read from `.leadflow/leadflow.toml`.
//!
//! Settings are layered file → environment → CLI:
//!
//! ```toml
//! [defaults]
//! follow_up_days = 7
//! dataset = "leads.json"
//!
//! [export]
//! leads_file = "leads.csv"
//! users_file = "users.csv"
//!
//! [sources]
//! known = ["Website", "Referral", "LinkedIn", "Ads", "Cold Call"]
//! ```
//!
//! | Setting          | Environment override       | CLI override |
//! |------------------|----------------------------|--------------|
//! | `dataset`        | `LEADFLOW_DATASET`         | `--data`     |
//! | `follow_up_days` | `LEADFLOW_FOLLOW_UP_DAYS`  |              |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::export::Report;
use crate::lead::{COMMON_SOURCES, DEFAULT_FOLLOW_UP_DAYS};

/// The name of the leadflow configuration directory.
pub const LEADFLOW_DIR: &str = ".leadflow";

pub const CONFIG_FILE: &str = "leadflow.toml";

pub const DATASET_ENV: &str = "LEADFLOW_DATASET";

pub const FOLLOW_UP_DAYS_ENV: &str = "LEADFLOW_FOLLOW_UP_DAYS";

/// Default settings for lead handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Days between creating a lead and its first follow-up
    #[serde(default = "default_follow_up_days")]
    pub follow_up_days: u64,
    /// Dataset file, relative to the project directory
    #[serde(default = "default_dataset")]
    pub dataset: String,
}

fn default_follow_up_days() -> u64 {
    DEFAULT_FOLLOW_UP_DAYS
}

fn default_dataset() -> String {
    "leads.json".to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            follow_up_days: default_follow_up_days(),
            dataset: default_dataset(),
        }
    }
}

/// Default output file names for `leadflow export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSection {
    #[serde(default = "default_leads_file")]
    pub leads_file: String,
    #[serde(default = "default_users_file")]
    pub users_file: String,
}

fn default_leads_file() -> String {
    "leads.csv".to_string()
}

fn default_users_file() -> String {
    "users.csv".to_string()
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            leads_file: default_leads_file(),
            users_file: default_users_file(),
        }
    }
}

/// Lead sources offered in pickers. Leads may still carry any source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesSection {
    #[serde(default = "default_known_sources")]
    pub known: Vec<String>,
}

fn default_known_sources() -> Vec<String> {
    COMMON_SOURCES.iter().map(|s| s.to_string()).collect()
}

impl Default for SourcesSection {
    fn default() -> Self {
        Self {
            known: default_known_sources(),
        }
    }
}

/// The complete leadflow.toml configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadflowToml {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub export: ExportSection,
    #[serde(default)]
    pub sources: SourcesSection,
}

impl LeadflowToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse leadflow.toml")
    }

    /// Load `leadflow.toml` from the config directory, or defaults if absent.
    pub fn load_or_default(leadflow_dir: &Path) -> Result<Self> {
        let config_path = leadflow_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize leadflow.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.defaults.follow_up_days == 0 {
            warnings.push(
                "follow_up_days = 0 schedules the first follow-up on the day a lead is created"
                    .to_string(),
            );
        } else if self.defaults.follow_up_days > 365 {
            warnings.push(format!(
                "follow_up_days = {} is more than a year",
                self.defaults.follow_up_days
            ));
        }

        if self.defaults.dataset.trim().is_empty() {
            warnings.push("dataset is empty; pass --data or set LEADFLOW_DATASET".to_string());
        }

        if self.export.leads_file.trim().is_empty() {
            warnings.push("export.leads_file is empty".to_string());
        }
        if self.export.users_file.trim().is_empty() {
            warnings.push("export.users_file is empty".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for source in &self.sources.known {
            if source.trim().is_empty() {
                warnings.push("sources.known contains an empty source".to_string());
            } else if !seen.insert(source.to_lowercase()) {
                warnings.push(format!("sources.known lists '{}' more than once", source));
            }
        }

        warnings
    }

    /// Sources seen in a dataset that `[sources] known` does not list.
    pub fn unknown_sources(&self, sources: &[String]) -> Vec<String> {
        sources
            .iter()
            .filter(|source| {
                !self
                    .sources
                    .known
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(source))
            })
            .cloned()
            .collect()
    }
}

/// Parse a follow-up override, falling back to the file value when it is not a number.
fn resolve_follow_up_days(env_value: Option<String>, file_value: u64) -> u64 {
    match env_value {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(days) => days,
            Err(_) => {
                warn!(
                    value = %raw,
                    "Ignoring {} (not a whole number of days)",
                    FOLLOW_UP_DAYS_ENV
                );
                file_value
            }
        },
        None => file_value,
    }
}

/// Unified configuration: leadflow.toml merged with environment and CLI overrides.
#[derive(Debug, Clone)]
pub struct LeadflowConfig {
    pub project_dir: PathBuf,
    pub leadflow_dir: PathBuf,
    pub toml: LeadflowToml,
    /// CLI override for the dataset path
    pub cli_dataset: Option<PathBuf>,
}

impl LeadflowConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let leadflow_dir = get_leadflow_dir(&project_dir);
        let toml = LeadflowToml::load_or_default(&leadflow_dir)?;

        Ok(Self {
            project_dir,
            leadflow_dir,
            toml,
            cli_dataset: None,
        })
    }

    pub fn with_cli_args(project_dir: PathBuf, dataset: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.cli_dataset = dataset;
        Ok(config)
    }

    pub fn config_path(&self) -> PathBuf {
        self.leadflow_dir.join(CONFIG_FILE)
    }

    /// Dataset path (CLI → env → file). Relative paths resolve against the project directory.
    pub fn dataset_path(&self) -> PathBuf {
        self.resolve_dataset(std::env::var(DATASET_ENV).ok())
    }

    fn resolve_dataset(&self, env_value: Option<String>) -> PathBuf {
        let chosen = self
            .cli_dataset
            .clone()
            .or_else(|| env_value.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(&self.toml.defaults.dataset));
        if chosen.is_absolute() {
            chosen
        } else {
            self.project_dir.join(chosen)
        }
    }

    /// Follow-up offset for new leads (env → file).
    pub fn follow_up_days(&self) -> u64 {
        resolve_follow_up_days(
            std::env::var(FOLLOW_UP_DAYS_ENV).ok(),
            self.toml.defaults.follow_up_days,
        )
    }

    /// Default output path for a report, relative to the project directory.
    pub fn export_path(&self, report: Report) -> PathBuf {
        let file = match report {
            Report::Leads => &self.toml.export.leads_file,
            Report::Users => &self.toml.export.users_file,
        };
        self.project_dir.join(file)
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}

/// Path of the `.leadflow/` directory for a project.
pub fn get_leadflow_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(LEADFLOW_DIR)
}
