//! Pipeline stage model.
//!
//! Every lead sits in exactly one of seven stages. The order below is fixed
//! and is the order used for display and for zero-filled stage counts:
//!
//! | Key           | Label       | Terminal |
//! |---------------|-------------|----------|
//! | `new`         | New         | no       |
//! | `contacted`   | Contacted   | no       |
//! | `qualified`   | Qualified   | no       |
//! | `proposal`    | Proposal    | no       |
//! | `negotiation` | Negotiation | no       |
//! | `converted`   | Converted   | yes      |
//! | `lost`        | Lost        | yes      |
//!
//! Transitions are unrestricted: any stage may move to any other stage,
//! terminal stages included.

use std::fmt;
use std::str::FromStr;

use console::{Color, Emoji, Style};
use serde::{Deserialize, Serialize};

use crate::errors::LeadflowError;

/// Label shown for a stage key that is not part of the pipeline.
pub const UNKNOWN_STAGE_LABEL: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Converted,
    Lost,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 7] = [
        Stage::New,
        Stage::Contacted,
        Stage::Qualified,
        Stage::Proposal,
        Stage::Negotiation,
        Stage::Converted,
        Stage::Lost,
    ];

    /// Stage assigned to newly added leads.
    pub const fn first() -> Stage {
        Stage::New
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::Converted => "converted",
            Self::Lost => "lost",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::Converted => "Converted",
            Self::Lost => "Lost",
        }
    }

    pub fn icon(&self) -> Emoji<'static, 'static> {
        match self {
            Self::New => Emoji("🆕 ", "[N]"),
            Self::Contacted => Emoji("📞 ", "[C]"),
            Self::Qualified => Emoji("✅ ", "[Q]"),
            Self::Proposal => Emoji("📄 ", "[P]"),
            Self::Negotiation => Emoji("🤝 ", "[G]"),
            Self::Converted => Emoji("🏆 ", "[W]"),
            Self::Lost => Emoji("❌ ", "[L]"),
        }
    }

    /// Display color name, as used by badge styling.
    pub fn color_name(&self) -> &'static str {
        match self {
            Self::New => "blue",
            Self::Contacted => "yellow",
            Self::Qualified => "purple",
            Self::Proposal => "indigo",
            Self::Negotiation => "orange",
            Self::Converted => "green",
            Self::Lost => "red",
        }
    }

    /// Terminal style for rendering the stage label.
    pub fn style(&self) -> Style {
        let color = match self {
            Self::New => Color::Blue,
            Self::Contacted => Color::Yellow,
            Self::Qualified => Color::Magenta,
            Self::Proposal => Color::Cyan,
            Self::Negotiation => Color::Color256(208),
            Self::Converted => Color::Green,
            Self::Lost => Color::Red,
        };
        Style::new().fg(color)
    }

    /// Zero-based position in the pipeline.
    pub fn position(&self) -> usize {
        *self as usize
    }

    /// Converted and lost leads are resolved; everything else is still in the pipeline.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converted | Self::Lost)
    }

    /// Whether a lead may move from this stage to `target`.
    ///
    /// The pipeline is fully connected: manual overrides may move a lead
    /// anywhere, including out of a terminal stage.
    pub fn can_transition_to(&self, _target: Stage) -> bool {
        true
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = LeadflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "qualified" => Ok(Self::Qualified),
            "proposal" => Ok(Self::Proposal),
            "negotiation" => Ok(Self::Negotiation),
            "converted" => Ok(Self::Converted),
            "lost" => Ok(Self::Lost),
            _ => Err(LeadflowError::UnknownStage { key: s.to_string() }),
        }
    }
}

/// Display label for a stage key. Fails with `UnknownStage` for keys outside the pipeline.
pub fn label_for(key: &str) -> Result<&'static str, LeadflowError> {
    key.parse::<Stage>().map(|stage| stage.label())
}

/// Display label for a stage key, falling back to [`UNKNOWN_STAGE_LABEL`].
pub fn label_or_unknown(key: &str) -> &'static str {
    label_for(key).unwrap_or(UNKNOWN_STAGE_LABEL)
}

/// Whether a stage key names a terminal stage.
pub fn is_terminal(key: &str) -> Result<bool, LeadflowError> {
    key.parse::<Stage>().map(|stage| stage.is_terminal())
}
