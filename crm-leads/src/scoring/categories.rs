//! Category scorers
//!
//! Five independent, pure functions, each mapping raw lead attributes to a
//! sub-score in [0, 100]. None of them can fail; missing or out-of-range
//! values lower the sub-score instead of raising an error.

use crate::models::lead::{DecisionRole, LeadSource, Motivation};
use crate::scoring::tables::ScoringTables;

/// Linear 1..=5 scale mapped onto [0, 100]; anything else scores 0.
fn five_point_scale(value: Option<u8>) -> f64 {
    match value {
        Some(v @ 1..=5) => (f64::from(v) - 1.0) / 4.0 * 100.0,
        _ => 0.0,
    }
}

/// Size: bucketed economic_units and usage_volume, averaged over the
/// inputs that are actually supplied. One supplied input stands alone;
/// a lead with neither scores 0.
pub fn size_score(
    tables: &ScoringTables,
    economic_units: Option<u32>,
    usage_volume: Option<u32>,
) -> f64 {
    let supplied: Vec<f64> = [economic_units, usage_volume]
        .into_iter()
        .flatten()
        .map(|v| tables.bucket_score(v))
        .collect();

    if supplied.is_empty() {
        return 0.0;
    }
    supplied.iter().sum::<f64>() / supplied.len() as f64
}

/// Urgency: linear 1..=5 scale.
pub fn urgency_score(urgency: Option<u8>) -> f64 {
    five_point_scale(urgency)
}

/// Source: fixed lookup table weight.
pub fn source_score(tables: &ScoringTables, source: Option<LeadSource>) -> f64 {
    source.map(|s| tables.source_weight(s)).unwrap_or(0.0)
}

/// Motivation: fixed lookup table weight.
pub fn motivation_score(tables: &ScoringTables, motivation: Option<Motivation>) -> f64 {
    motivation
        .map(|m| tables.motivation_weight(m))
        .unwrap_or(0.0)
}

/// Decision: mean of the role weight and the linear clarity scale.
/// A missing component contributes 0 to the two-way average, so either
/// half alone caps this category at 50.
pub fn decision_score(
    tables: &ScoringTables,
    role: Option<DecisionRole>,
    clarity: Option<u8>,
) -> f64 {
    let role_component = role.map(|r| tables.role_weight(r)).unwrap_or(0.0);
    let clarity_component = five_point_scale(clarity);
    (role_component + clarity_component) / 2.0
}
