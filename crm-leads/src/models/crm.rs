//! Downstream CRM records materialized by qualification, plus the
//! partner/product catalog records read by the sales-motion resolver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::lead::{Lead, SalesMotion, Tier};

/// A person record in the downstream CRM store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An organization record in the downstream CRM store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Deal pipeline stage seeded at qualification time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    Discovery,
    Evaluation,
    Proposal,
    Negotiation,
}

impl DealStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStage::Discovery => "discovery",
            DealStage::Evaluation => "evaluation",
            DealStage::Proposal => "proposal",
            DealStage::Negotiation => "negotiation",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "discovery" => Some(DealStage::Discovery),
            "evaluation" => Some(DealStage::Evaluation),
            "proposal" => Some(DealStage::Proposal),
            "negotiation" => Some(DealStage::Negotiation),
            _ => None,
        }
    }
}

/// An active sales opportunity created from a qualified lead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub contact_id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub stage: DealStage,
    /// Close probability percentage, seeded from the lead's tier
    pub probability: u8,
    pub sales_motion: SalesMotion,
    pub partner_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Deal {
    /// Seed a new deal from a lead and its resolved contact/company.
    ///
    /// Stage and probability defaults are tier-derived: high-tier leads
    /// enter the pipeline further along and with more forecasting weight.
    pub fn seed_from(lead: &Lead, contact_id: Uuid, company_id: Uuid, company_name: &str) -> Self {
        let (stage, probability) = match lead.tier {
            Tier::A => (DealStage::Evaluation, 60),
            Tier::B => (DealStage::Discovery, 40),
            Tier::C => (DealStage::Discovery, 25),
            Tier::D => (DealStage::Discovery, 10),
        };

        Deal {
            id: Uuid::new_v4(),
            lead_id: lead.id,
            contact_id,
            company_id,
            name: format!("{} opportunity", company_name),
            stage,
            probability,
            sales_motion: lead.sales_motion,
            partner_id: lead.partner_id,
            product_id: lead.product_id,
            created_at: Utc::now(),
        }
    }
}

/// Partner account status in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    Active,
    Suspended,
    Terminated,
}

impl PartnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartnerStatus::Active => "active",
            PartnerStatus::Suspended => "suspended",
            PartnerStatus::Terminated => "terminated",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(PartnerStatus::Active),
            "suspended" => Some(PartnerStatus::Suspended),
            "terminated" => Some(PartnerStatus::Terminated),
            _ => None,
        }
    }
}

impl std::fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A third-party partner in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Partner {
    pub id: Uuid,
    pub name: String,
    pub status: PartnerStatus,
}

/// A partner-owned product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub partner_id: Uuid,
    pub name: String,
}
