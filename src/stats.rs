//! Aggregation over lead collections.
//!
//! | Function / type     | What it computes                                        |
//! |---------------------|---------------------------------------------------------|
//! | `counts_by_stage`   | Per-stage counts, every stage present, pipeline order   |
//! | `conversion_rate`   | Converted share of the collection, in percent           |
//! | `counts_by_source`  | Per-source counts for sources present in the collection |
//! | `counts_by_agent`   | Per-agent counts for agents present in the collection   |
//! | `Rollup`            | Per-key totals with converted/lost/open and a rate      |
//! | `PipelineSummary`   | Dashboard headline numbers plus stage shares            |
//!
//! Nothing here fails. Percentages are rounded to one decimal place and are
//! `0.0` for an empty collection.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::lead::Lead;
use crate::stage::Stage;

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100`, rounded to one decimal, `0.0` when `whole` is zero.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round1(part as f64 / whole as f64 * 100.0)
}

/// Lead counts for every stage, zero-filled, in pipeline order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    counts: [usize; Stage::ALL.len()],
}

impl StageCounts {
    pub fn get(&self, stage: Stage) -> usize {
        self.counts[stage.position()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(stage, count)` pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, usize)> + '_ {
        Stage::ALL.iter().map(|stage| (*stage, self.get(*stage)))
    }

    fn increment(&mut self, stage: Stage) {
        self.counts[stage.position()] += 1;
    }
}

impl Serialize for StageCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Stage::ALL.len()))?;
        for (stage, count) in self.iter() {
            map.serialize_entry(stage.as_str(), &count)?;
        }
        map.end()
    }
}

pub fn counts_by_stage(leads: &[Lead]) -> StageCounts {
    let mut counts = StageCounts::default();
    for lead in leads {
        counts.increment(lead.status);
    }
    counts
}

/// Percentage of leads in the `converted` stage.
pub fn conversion_rate(leads: &[Lead]) -> f64 {
    let converted = leads.iter().filter(|l| l.status == Stage::Converted).count();
    percentage(converted, leads.len())
}

pub fn counts_by_source(leads: &[Lead]) -> BTreeMap<String, usize> {
    count_by(leads, |lead| &lead.source)
}

pub fn counts_by_agent(leads: &[Lead]) -> BTreeMap<String, usize> {
    count_by(leads, |lead| &lead.assigned_agent)
}

fn count_by<F>(leads: &[Lead], key: F) -> BTreeMap<String, usize>
where
    F: Fn(&Lead) -> &String,
{
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for lead in leads {
        *counts.entry(key(lead).clone()).or_default() += 1;
    }
    counts
}

/// Which attribute a rollup groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RollupKey {
    Agent,
    Source,
}

impl RollupKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Source => "source",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Source => "Source",
        }
    }

    fn value<'a>(&self, lead: &'a Lead) -> &'a String {
        match self {
            Self::Agent => &lead.assigned_agent,
            Self::Source => &lead.source,
        }
    }
}

impl std::str::FromStr for RollupKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "agent" => Ok(Self::Agent),
            "source" => Ok(Self::Source),
            _ => Err(format!("Invalid rollup key '{}'. Valid keys: agent, source", s)),
        }
    }
}

/// Per-agent or per-source performance row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rollup {
    pub key: String,
    pub total: usize,
    pub open: usize,
    pub converted: usize,
    pub lost: usize,
    pub conversion_rate: f64,
}

impl Rollup {
    /// Build a row from the leads sharing one key.
    pub fn from_leads(key: &str, leads: &[&Lead]) -> Self {
        let converted = leads.iter().filter(|l| l.status == Stage::Converted).count();
        let lost = leads.iter().filter(|l| l.status == Stage::Lost).count();
        Self {
            key: key.to_string(),
            total: leads.len(),
            open: leads.len() - converted - lost,
            converted,
            lost,
            conversion_rate: percentage(converted, leads.len()),
        }
    }
}

/// One row per distinct key value present in `leads`, sorted by key.
pub fn rollup(leads: &[Lead], by: RollupKey) -> Vec<Rollup> {
    let mut groups: BTreeMap<&str, Vec<&Lead>> = BTreeMap::new();
    for lead in leads {
        groups.entry(by.value(lead).as_str()).or_default().push(lead);
    }
    groups
        .into_iter()
        .map(|(key, members)| Rollup::from_leads(key, &members))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageShare {
    pub stage: Stage,
    pub label: &'static str,
    pub count: usize,
    /// Percent of the whole collection.
    pub share: f64,
}

/// Headline numbers for a dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineSummary {
    pub total: usize,
    pub open: usize,
    pub converted: usize,
    pub lost: usize,
    pub conversion_rate: f64,
    pub counts_by_stage: StageCounts,
    pub stages: Vec<StageShare>,
}

impl PipelineSummary {
    pub fn from_leads(leads: &[Lead]) -> Self {
        let counts = counts_by_stage(leads);
        let total = counts.total();
        let converted = counts.get(Stage::Converted);
        let lost = counts.get(Stage::Lost);
        let stages = counts
            .iter()
            .map(|(stage, count)| StageShare {
                stage,
                label: stage.label(),
                count,
                share: percentage(count, total),
            })
            .collect();

        Self {
            total,
            open: total - converted - lost,
            converted,
            lost,
            conversion_rate: percentage(converted, total),
            counts_by_stage: counts,
            stages,
        }
    }
}
