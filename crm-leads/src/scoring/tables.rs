//! Tunable scoring lookup tables
//!
//! The category weights and tier thresholds are fixed business rules, but
//! the per-value lookup tables (source/motivation/role weights, size bucket
//! cut-points) are tuning knobs. Defaults below are the shipped policy; a
//! `[scoring]` section in the config file overrides individual tables.

use std::collections::HashMap;

use crm_common::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::models::lead::{DecisionRole, LeadSource, Motivation};

/// Lookup tables for the category scorers.
///
/// Every lookup degrades to 0 for a missing key, so a table override that
/// drops an entry weakens that value rather than breaking scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTables {
    /// Ordered bucket cut-points for economic_units / usage_volume.
    /// A value v scores `(buckets at or below v) / len * 100`, giving the
    /// default steps 0 / 25 / 50 / 75 / 100 for `[1, 10, 50, 200]`.
    pub size_thresholds: Vec<u32>,
    pub source_weights: HashMap<LeadSource, u8>,
    pub motivation_weights: HashMap<Motivation, u8>,
    pub role_weights: HashMap<DecisionRole, u8>,
}

impl Default for ScoringTables {
    fn default() -> Self {
        ScoringTables {
            size_thresholds: vec![1, 10, 50, 200],
            source_weights: HashMap::from([
                (LeadSource::Referral, 100),
                (LeadSource::PartnerReferral, 90),
                (LeadSource::Website, 65),
                (LeadSource::Event, 55),
                (LeadSource::Advertisement, 40),
                (LeadSource::ColdOutreach, 20),
            ]),
            motivation_weights: HashMap::from([
                (Motivation::CostReduction, 90),
                (Motivation::CompetitivePressure, 85),
                (Motivation::Growth, 70),
                (Motivation::Compliance, 60),
                (Motivation::Modernization, 50),
            ]),
            role_weights: HashMap::from([
                (DecisionRole::DecisionMaker, 100),
                (DecisionRole::EconomicBuyer, 95),
                (DecisionRole::Champion, 75),
                (DecisionRole::Influencer, 60),
                (DecisionRole::Evaluator, 40),
                (DecisionRole::EndUser, 25),
            ]),
        }
    }
}

impl ScoringTables {
    /// Load tables from a config file's `[scoring]` section, falling back
    /// to defaults when the file has no such section.
    pub fn from_config_str(contents: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct ConfigFile {
            #[serde(default)]
            scoring: Option<ScoringTables>,
        }

        let config: ConfigFile = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Failed to parse scoring config: {}", e)))?;

        let tables = config.scoring.unwrap_or_default();
        tables.validate()?;
        Ok(tables)
    }

    /// Validate table contents at load time.
    pub fn validate(&self) -> Result<()> {
        if self.size_thresholds.is_empty() {
            return Err(Error::Config(
                "scoring.size_thresholds must not be empty".to_string(),
            ));
        }
        if !self.size_thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(Error::Config(
                "scoring.size_thresholds must be strictly increasing".to_string(),
            ));
        }

        let weight_tables = self
            .source_weights
            .values()
            .chain(self.motivation_weights.values())
            .chain(self.role_weights.values());
        for weight in weight_tables {
            if *weight > 100 {
                return Err(Error::Config(format!(
                    "scoring weight {} exceeds 100",
                    weight
                )));
            }
        }

        Ok(())
    }

    /// Bucket sub-score for a single size input.
    pub fn bucket_score(&self, value: u32) -> f64 {
        let buckets_reached = self
            .size_thresholds
            .iter()
            .filter(|threshold| value >= **threshold)
            .count();
        (buckets_reached as f64 / self.size_thresholds.len() as f64) * 100.0
    }

    pub fn source_weight(&self, source: LeadSource) -> f64 {
        self.source_weights.get(&source).copied().unwrap_or(0) as f64
    }

    pub fn motivation_weight(&self, motivation: Motivation) -> f64 {
        self.motivation_weights
            .get(&motivation)
            .copied()
            .unwrap_or(0) as f64
    }

    pub fn role_weight(&self, role: DecisionRole) -> f64 {
        self.role_weights.get(&role).copied().unwrap_or(0) as f64
    }
}
