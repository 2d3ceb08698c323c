//! Lead entity and its closed vocabulary enums
//!
//! Enum fields are closed tagged variants rather than free strings, so an
//! invalid value cannot drift into the store: unknown text fails at the
//! boundary, not inside the scoring engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::status::LeadStatus;
use crate::scoring::{ScoreBreakdown, ScoringInputs};

/// How the lead entered the funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Referral,
    PartnerReferral,
    Website,
    Event,
    Advertisement,
    ColdOutreach,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Referral => "referral",
            LeadSource::PartnerReferral => "partner_referral",
            LeadSource::Website => "website",
            LeadSource::Event => "event",
            LeadSource::Advertisement => "advertisement",
            LeadSource::ColdOutreach => "cold_outreach",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "referral" => Some(LeadSource::Referral),
            "partner_referral" => Some(LeadSource::PartnerReferral),
            "website" => Some(LeadSource::Website),
            "event" => Some(LeadSource::Event),
            "advertisement" => Some(LeadSource::Advertisement),
            "cold_outreach" => Some(LeadSource::ColdOutreach),
            _ => None,
        }
    }
}

/// Primary buying motivation stated by the prospect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motivation {
    CostReduction,
    CompetitivePressure,
    Growth,
    Compliance,
    Modernization,
}

impl Motivation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Motivation::CostReduction => "cost_reduction",
            Motivation::CompetitivePressure => "competitive_pressure",
            Motivation::Growth => "growth",
            Motivation::Compliance => "compliance",
            Motivation::Modernization => "modernization",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cost_reduction" => Some(Motivation::CostReduction),
            "competitive_pressure" => Some(Motivation::CompetitivePressure),
            "growth" => Some(Motivation::Growth),
            "compliance" => Some(Motivation::Compliance),
            "modernization" => Some(Motivation::Modernization),
            _ => None,
        }
    }
}

/// The prospect contact's role in the buying decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRole {
    DecisionMaker,
    EconomicBuyer,
    Champion,
    Influencer,
    Evaluator,
    EndUser,
}

impl DecisionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionRole::DecisionMaker => "decision_maker",
            DecisionRole::EconomicBuyer => "economic_buyer",
            DecisionRole::Champion => "champion",
            DecisionRole::Influencer => "influencer",
            DecisionRole::Evaluator => "evaluator",
            DecisionRole::EndUser => "end_user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "decision_maker" => Some(DecisionRole::DecisionMaker),
            "economic_buyer" => Some(DecisionRole::EconomicBuyer),
            "champion" => Some(DecisionRole::Champion),
            "influencer" => Some(DecisionRole::Influencer),
            "evaluator" => Some(DecisionRole::Evaluator),
            "end_user" => Some(DecisionRole::EndUser),
            _ => None,
        }
    }
}

/// Commercial path the lead follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesMotion {
    /// Direct partnership sales, no third-party partner involved
    PartnershipSales,
    /// Sale of a third-party partner's product
    PartnerSales,
}

impl Default for SalesMotion {
    fn default() -> Self {
        SalesMotion::PartnershipSales
    }
}

impl SalesMotion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesMotion::PartnershipSales => "partnership_sales",
            SalesMotion::PartnerSales => "partner_sales",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "partnership_sales" => Some(SalesMotion::PartnershipSales),
            "partner_sales" => Some(SalesMotion::PartnerSales),
            _ => None,
        }
    }
}

/// Coarse classification of a lead's composite score, used for
/// prioritization and forecasting confidence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    A,
    B,
    C,
    D,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "A" => Some(Tier::A),
            "B" => Some(Tier::B),
            "C" => Some(Tier::C),
            "D" => Some(Tier::D),
            _ => None,
        }
    }

    /// All tiers in priority order.
    pub fn all() -> [Tier; 4] {
        [Tier::A, Tier::B, Tier::C, Tier::D]
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The central lead entity.
///
/// `lead_score`, `tier` and `score_breakdown` are derived fields: they are
/// recomputed together by the composite scoring engine whenever a scoring
/// input changes, and never anywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    /// Optimistic-concurrency counter, incremented by every successful save
    pub version: i64,

    // Contact fields
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub title: Option<String>,

    // Scoring inputs
    pub economic_units: Option<u32>,
    pub usage_volume: Option<u32>,
    pub urgency: Option<u8>,
    pub trigger_event: Option<String>,
    pub primary_motivation: Option<Motivation>,
    pub decision_role: Option<DecisionRole>,
    pub decision_process_clarity: Option<u8>,
    pub source: Option<LeadSource>,

    // Derived (written together, never independently)
    pub lead_score: u8,
    pub tier: Tier,
    pub score_breakdown: ScoreBreakdown,

    // Workflow
    pub status: LeadStatus,
    pub status_changed_at: DateTime<Utc>,
    pub touchpoint_count: u32,

    // Sales motion
    pub sales_motion: SalesMotion,
    pub partner_id: Option<Uuid>,
    pub product_id: Option<Uuid>,

    /// Set exactly once, by the qualification orchestrator, when the lead
    /// reaches `qualified`
    pub converted_deal_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Snapshot of the scoring input fields for the composite engine.
    pub fn scoring_inputs(&self) -> ScoringInputs {
        ScoringInputs {
            economic_units: self.economic_units,
            usage_volume: self.usage_volume,
            urgency: self.urgency,
            primary_motivation: self.primary_motivation,
            decision_role: self.decision_role,
            decision_process_clarity: self.decision_process_clarity,
            source: self.source,
        }
    }

    /// Full display name, used for contact resolution and deal naming.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
