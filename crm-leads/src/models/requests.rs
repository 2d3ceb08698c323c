//! Typed request DTOs for the exposed lead operations
//!
//! One DTO per operation; enum fields use the closed vocabulary types so an
//! invalid value is rejected at deserialization, never stored.

use serde::Deserialize;
use uuid::Uuid;

use crate::models::lead::{DecisionRole, LeadSource, Motivation, SalesMotion, Tier};
use crate::models::status::LeadStatus;

/// Input for `create_lead`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateLeadRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub title: Option<String>,

    pub economic_units: Option<u32>,
    pub usage_volume: Option<u32>,
    pub urgency: Option<u8>,
    pub trigger_event: Option<String>,
    pub primary_motivation: Option<Motivation>,
    pub decision_role: Option<DecisionRole>,
    pub decision_process_clarity: Option<u8>,
    pub source: Option<LeadSource>,

    #[serde(default)]
    pub sales_motion: SalesMotion,
    pub partner_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

/// Input for `update_scoring_fields`
///
/// Only supplied fields change; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScoringFieldsRequest {
    pub economic_units: Option<u32>,
    pub usage_volume: Option<u32>,
    pub urgency: Option<u8>,
    pub trigger_event: Option<String>,
    pub primary_motivation: Option<Motivation>,
    pub decision_role: Option<DecisionRole>,
    pub decision_process_clarity: Option<u8>,
    pub source: Option<LeadSource>,
}

impl UpdateScoringFieldsRequest {
    /// True when the request carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.economic_units.is_none()
            && self.usage_volume.is_none()
            && self.urgency.is_none()
            && self.trigger_event.is_none()
            && self.primary_motivation.is_none()
            && self.decision_role.is_none()
            && self.decision_process_clarity.is_none()
            && self.source.is_none()
    }
}

/// Filter for `list_leads`
#[derive(Debug, Clone, Deserialize)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub tier: Option<Tier>,
    pub min_score: Option<u8>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for LeadFilter {
    fn default() -> Self {
        LeadFilter {
            status: None,
            tier: None,
            min_score: None,
            limit: 50,
            offset: 0,
        }
    }
}
