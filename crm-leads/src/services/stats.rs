//! Scoring stats aggregator
//!
//! Read-only rollup of tier counts and per-tier average score for
//! dashboards. A single GROUP BY query, so the counts always describe one
//! consistent snapshot and sum to the total.

use std::collections::BTreeMap;

use crm_common::Error;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::error::LeadResult;
use crate::models::lead::Tier;

/// Per-tier rollup
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TierStats {
    pub count: u64,
    pub average_score: f64,
}

/// Population-wide scoring stats
#[derive(Debug, Clone, Serialize)]
pub struct ScoringStats {
    pub total: u64,
    pub tiers: BTreeMap<Tier, TierStats>,
}

/// Aggregate tier distribution over the current lead population.
///
/// Tiers with no leads report a zero entry, so consumers always see all
/// four tiers.
pub async fn scoring_stats(pool: &SqlitePool) -> LeadResult<ScoringStats> {
    let rows = sqlx::query(
        r#"
        SELECT tier, COUNT(*) AS lead_count, AVG(lead_score) AS average_score
        FROM leads
        GROUP BY tier
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut tiers: BTreeMap<Tier, TierStats> = Tier::all()
        .into_iter()
        .map(|tier| (tier, TierStats::default()))
        .collect();
    let mut total: u64 = 0;

    for row in rows {
        let tier: String = row.get("tier");
        let tier = Tier::parse(&tier)
            .ok_or_else(|| Error::Internal(format!("Unknown tier in stats: {}", tier)))?;
        let count: i64 = row.get("lead_count");
        let average_score: Option<f64> = row.get("average_score");

        tiers.insert(
            tier,
            TierStats {
                count: count as u64,
                average_score: average_score.unwrap_or(0.0),
            },
        );
        total += count as u64;
    }

    Ok(ScoringStats { total, tiers })
}
