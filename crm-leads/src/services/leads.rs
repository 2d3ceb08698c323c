//! Lead lifecycle operations
//!
//! Creation and every scoring-input mutation run through the composite
//! scoring engine, so `lead_score`, `tier` and the breakdown can never
//! drift apart. Status changes are validated against the state machine;
//! `qualified` is only reachable through the qualification orchestrator.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db;
use crate::error::{LeadError, LeadResult};
use crate::events::LeadEvent;
use crate::models::lead::{Lead, SalesMotion, Tier};
use crate::models::requests::{CreateLeadRequest, LeadFilter, UpdateScoringFieldsRequest};
use crate::models::status::LeadStatus;
use crate::scoring::{compute_score, ScoringInputs};
use crate::AppState;

/// Create a lead and compute its initial score and tier.
pub async fn create_lead(state: &AppState, req: CreateLeadRequest) -> LeadResult<Lead> {
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(LeadError::Validation(
            "first_name and last_name are required".to_string(),
        ));
    }

    // Partner fields only make sense for partner sales. The partner must be
    // known up front; the product may be finalized any time before
    // qualification.
    let (partner_id, product_id) = match req.sales_motion {
        SalesMotion::PartnershipSales => (None, None),
        SalesMotion::PartnerSales => {
            if req.partner_id.is_none() {
                return Err(LeadError::Validation(
                    "partner_sales lead requires partner_id".to_string(),
                ));
            }
            (req.partner_id, req.product_id)
        }
    };

    let inputs = ScoringInputs {
        economic_units: req.economic_units,
        usage_volume: req.usage_volume,
        urgency: req.urgency,
        primary_motivation: req.primary_motivation,
        decision_role: req.decision_role,
        decision_process_clarity: req.decision_process_clarity,
        source: req.source,
    };
    let computation = compute_score(&state.scoring, &inputs);

    let now = Utc::now();
    let lead = Lead {
        id: Uuid::new_v4(),
        version: 0,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone,
        company_name: req.company_name,
        title: req.title,
        economic_units: req.economic_units,
        usage_volume: req.usage_volume,
        urgency: req.urgency,
        trigger_event: req.trigger_event,
        primary_motivation: req.primary_motivation,
        decision_role: req.decision_role,
        decision_process_clarity: req.decision_process_clarity,
        source: req.source,
        lead_score: computation.score,
        tier: Tier::from_score(computation.score),
        score_breakdown: computation.breakdown,
        status: LeadStatus::New,
        status_changed_at: now,
        touchpoint_count: 0,
        sales_motion: req.sales_motion,
        partner_id,
        product_id,
        converted_deal_id: None,
        created_at: now,
        updated_at: now,
    };

    db::leads::insert_lead(&state.db, &lead).await?;

    info!(
        lead_id = %lead.id,
        score = lead.lead_score,
        tier = %lead.tier,
        "Lead created"
    );

    state.events.emit_lossy(LeadEvent::LeadCreated {
        lead_id: lead.id,
        score: lead.lead_score,
        tier: lead.tier,
        timestamp: now,
    });

    Ok(lead)
}

/// Apply scoring field edits and recompute score and tier synchronously.
pub async fn update_scoring_fields(
    state: &AppState,
    lead_id: Uuid,
    req: UpdateScoringFieldsRequest,
) -> LeadResult<Lead> {
    let mut lead = get_lead(state, lead_id).await?;

    if lead.status.is_terminal() {
        return Err(LeadError::Validation(format!(
            "lead {} is {} and its scoring inputs are immutable",
            lead_id, lead.status
        )));
    }

    if req.is_empty() {
        return Ok(lead);
    }

    if let Some(v) = req.economic_units {
        lead.economic_units = Some(v);
    }
    if let Some(v) = req.usage_volume {
        lead.usage_volume = Some(v);
    }
    if let Some(v) = req.urgency {
        lead.urgency = Some(v);
    }
    if let Some(v) = req.trigger_event {
        lead.trigger_event = Some(v);
    }
    if let Some(v) = req.primary_motivation {
        lead.primary_motivation = Some(v);
    }
    if let Some(v) = req.decision_role {
        lead.decision_role = Some(v);
    }
    if let Some(v) = req.decision_process_clarity {
        lead.decision_process_clarity = Some(v);
    }
    if let Some(v) = req.source {
        lead.source = Some(v);
    }

    let previous_score = lead.lead_score;
    let computation = compute_score(&state.scoring, &lead.scoring_inputs());
    lead.lead_score = computation.score;
    lead.tier = Tier::from_score(computation.score);
    lead.score_breakdown = computation.breakdown;
    lead.updated_at = Utc::now();

    let expected_version = lead.version;
    if !db::leads::save_lead(&state.db, &lead, expected_version).await? {
        return Err(LeadError::PersistenceConflict(format!(
            "lead {} changed concurrently",
            lead_id
        )));
    }
    lead.version = expected_version + 1;

    debug!(
        lead_id = %lead.id,
        previous_score,
        score = lead.lead_score,
        tier = %lead.tier,
        "Scoring fields updated"
    );

    if lead.lead_score != previous_score {
        state.events.emit_lossy(LeadEvent::LeadScored {
            lead_id: lead.id,
            score: lead.lead_score,
            previous_score,
            tier: lead.tier,
            timestamp: lead.updated_at,
        });
    }

    Ok(lead)
}

/// Apply a status transition validated against the state machine.
///
/// `qualified` is rejected here even from `info_collected`: that
/// transition belongs to the qualification orchestrator, which must
/// materialize the downstream records atomically with it.
pub async fn transition_status(
    state: &AppState,
    lead_id: Uuid,
    new_status: LeadStatus,
) -> LeadResult<Lead> {
    let mut lead = get_lead(state, lead_id).await?;

    if new_status == LeadStatus::Qualified || !lead.status.can_transition_to(new_status) {
        return Err(LeadError::InvalidTransition {
            from: lead.status,
            to: new_status,
        });
    }

    let from = lead.status;
    lead.status = new_status;
    lead.status_changed_at = Utc::now();
    lead.updated_at = lead.status_changed_at;

    let expected_version = lead.version;
    if !db::leads::save_lead(&state.db, &lead, expected_version).await? {
        return Err(LeadError::PersistenceConflict(format!(
            "lead {} changed concurrently",
            lead_id
        )));
    }
    lead.version = expected_version + 1;

    info!(lead_id = %lead.id, %from, to = %new_status, "Lead status changed");

    state.events.emit_lossy(LeadEvent::LeadStatusChanged {
        lead_id: lead.id,
        from,
        to: new_status,
        timestamp: lead.status_changed_at,
    });

    Ok(lead)
}

/// Load a lead or fail with `NotFound`.
pub async fn get_lead(state: &AppState, lead_id: Uuid) -> LeadResult<Lead> {
    db::leads::get_lead(&state.db, lead_id)
        .await?
        .ok_or_else(|| LeadError::NotFound(format!("Lead {}", lead_id)))
}

/// List leads matching the filter.
pub async fn list_leads(state: &AppState, filter: &LeadFilter) -> LeadResult<Vec<Lead>> {
    Ok(db::leads::list_leads(&state.db, filter).await?)
}

/// Interaction-logging hook: bump the touchpoint counter.
pub async fn record_touchpoint(state: &AppState, lead_id: Uuid) -> LeadResult<()> {
    if !db::leads::record_touchpoint(&state.db, lead_id).await? {
        return Err(LeadError::NotFound(format!("Lead {}", lead_id)));
    }
    Ok(())
}
