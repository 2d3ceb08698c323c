//! Lead engine event types
//!
//! Emitted over the shared [`crm_common::EventBus`] so the surrounding
//! system (UI push channels, audit trail) can observe engine activity
//! without the engine depending on any of it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::lead::Tier;
use crate::models::status::LeadStatus;

/// Event bus carrying lead engine events
pub type LeadEventBus = crm_common::EventBus<LeadEvent>;

/// Events emitted by the lead engine
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeadEvent {
    /// A lead was created and scored for the first time
    LeadCreated {
        lead_id: Uuid,
        score: u8,
        tier: Tier,
        timestamp: DateTime<Utc>,
    },

    /// Scoring inputs changed and the composite score was recomputed
    LeadScored {
        lead_id: Uuid,
        score: u8,
        previous_score: u8,
        tier: Tier,
        timestamp: DateTime<Utc>,
    },

    /// A status transition was applied
    LeadStatusChanged {
        lead_id: Uuid,
        from: LeadStatus,
        to: LeadStatus,
        timestamp: DateTime<Utc>,
    },

    /// A lead was converted into Contact + Company + Deal
    LeadQualified {
        lead_id: Uuid,
        deal_id: Uuid,
        contact_id: Uuid,
        company_id: Uuid,
        timestamp: DateTime<Utc>,
    },
}
