//! Lead lifecycle integration tests
//!
//! Creation scoring, synchronous rescoring on edits, state machine
//! enforcement, optimistic-concurrency writes and the touchpoint hook.

mod helpers;

use crm_leads::db;
use crm_leads::error::LeadError;
use crm_leads::events::LeadEvent;
use crm_leads::models::lead::{LeadSource, Motivation, SalesMotion, Tier};
use crm_leads::models::requests::{CreateLeadRequest, LeadFilter, UpdateScoringFieldsRequest};
use crm_leads::models::status::LeadStatus;
use crm_leads::services::leads;

use helpers::{create_info_collected_lead, hot_lead_request, sparse_lead_request, test_state};

#[tokio::test]
async fn create_scores_hot_lead_as_tier_a() {
    let (state, _dir) = test_state().await;

    let lead = leads::create_lead(&state, hot_lead_request()).await.unwrap();

    assert!(lead.lead_score >= 80);
    assert_eq!(lead.lead_score, 80);
    assert_eq!(lead.tier, Tier::A);
    assert_eq!(lead.status, LeadStatus::New);
    assert_eq!(lead.version, 0);
    assert!(lead.converted_deal_id.is_none());

    // persisted row matches what the service returned
    let stored = leads::get_lead(&state, lead.id).await.unwrap();
    assert_eq!(stored.lead_score, 80);
    assert_eq!(stored.tier, Tier::A);
    assert_eq!(stored.score_breakdown, lead.score_breakdown);
}

#[tokio::test]
async fn create_scores_empty_lead_as_tier_d() {
    let (state, _dir) = test_state().await;

    let lead = leads::create_lead(&state, sparse_lead_request("Ada", "Lovelace"))
        .await
        .unwrap();

    assert_eq!(lead.lead_score, 0);
    assert_eq!(lead.tier, Tier::D);
}

#[tokio::test]
async fn create_requires_names() {
    let (state, _dir) = test_state().await;

    let req = CreateLeadRequest {
        first_name: "  ".to_string(),
        last_name: "Hopper".to_string(),
        ..Default::default()
    };
    let err = leads::create_lead(&state, req).await.unwrap_err();
    assert!(matches!(err, LeadError::Validation(_)));
}

#[tokio::test]
async fn update_recomputes_score_and_tier_synchronously() {
    let (state, _dir) = test_state().await;

    let lead = leads::create_lead(&state, sparse_lead_request("Ada", "Lovelace"))
        .await
        .unwrap();
    assert_eq!(lead.lead_score, 0);

    let updated = leads::update_scoring_fields(
        &state,
        lead.id,
        UpdateScoringFieldsRequest {
            urgency: Some(5),
            source: Some(LeadSource::Referral),
            primary_motivation: Some(Motivation::CostReduction),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // 0.20*100 + 0.15*100 + 0.20*90 = 53
    assert_eq!(updated.lead_score, 53);
    assert_eq!(updated.tier, Tier::C);
    assert_eq!(updated.version, 1);

    // derived fields are stored together with the inputs
    let stored = leads::get_lead(&state, lead.id).await.unwrap();
    assert_eq!(stored.lead_score, 53);
    assert_eq!(stored.tier, Tier::C);
    assert_eq!(stored.score_breakdown.motivation, 90);
}

#[tokio::test]
async fn update_emits_scored_event_only_when_score_changes() {
    let (state, _dir) = test_state().await;

    let lead = leads::create_lead(&state, sparse_lead_request("Ada", "Lovelace"))
        .await
        .unwrap();

    let mut rx = state.events.subscribe();

    // trigger_event is not a scored field, so the score stays 0
    leads::update_scoring_fields(
        &state,
        lead.id,
        UpdateScoringFieldsRequest {
            trigger_event: Some("budget approved".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    leads::update_scoring_fields(
        &state,
        lead.id,
        UpdateScoringFieldsRequest {
            urgency: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let event = rx.recv().await.unwrap();
    match event {
        LeadEvent::LeadScored {
            lead_id,
            score,
            previous_score,
            ..
        } => {
            assert_eq!(lead_id, lead.id);
            assert_eq!(previous_score, 0);
            assert_eq!(score, 20);
        }
        other => panic!("expected LeadScored, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_transition_is_rejected_without_state_change() {
    let (state, _dir) = test_state().await;

    let lead = leads::create_lead(&state, sparse_lead_request("Ada", "Lovelace"))
        .await
        .unwrap();

    let err = leads::transition_status(&state, lead.id, LeadStatus::InfoCollected)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LeadError::InvalidTransition {
            from: LeadStatus::New,
            to: LeadStatus::InfoCollected
        }
    ));

    let stored = leads::get_lead(&state, lead.id).await.unwrap();
    assert_eq!(stored.status, LeadStatus::New);
    assert_eq!(stored.version, 0);
}

#[tokio::test]
async fn qualified_is_not_reachable_through_status_transitions() {
    let (state, _dir) = test_state().await;
    let lead = create_info_collected_lead(&state, hot_lead_request()).await;

    let err = leads::transition_status(&state, lead.id, LeadStatus::Qualified)
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::InvalidTransition { .. }));

    let stored = leads::get_lead(&state, lead.id).await.unwrap();
    assert_eq!(stored.status, LeadStatus::InfoCollected);
}

#[tokio::test]
async fn reengagement_path_allows_working_again() {
    let (state, _dir) = test_state().await;

    let lead = leads::create_lead(&state, sparse_lead_request("Ada", "Lovelace"))
        .await
        .unwrap();
    leads::transition_status(&state, lead.id, LeadStatus::Assigned)
        .await
        .unwrap();
    leads::transition_status(&state, lead.id, LeadStatus::Unresponsive)
        .await
        .unwrap();
    let revived = leads::transition_status(&state, lead.id, LeadStatus::Working)
        .await
        .unwrap();

    assert_eq!(revived.status, LeadStatus::Working);
}

#[tokio::test]
async fn terminal_lead_freezes_scoring_inputs() {
    let (state, _dir) = test_state().await;

    let lead = create_info_collected_lead(&state, sparse_lead_request("Ada", "Lovelace")).await;
    leads::transition_status(&state, lead.id, LeadStatus::Disqualified)
        .await
        .unwrap();

    let err = leads::update_scoring_fields(
        &state,
        lead.id,
        UpdateScoringFieldsRequest {
            urgency: Some(5),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, LeadError::Validation(_)));

    let stored = leads::get_lead(&state, lead.id).await.unwrap();
    assert_eq!(stored.lead_score, 0);
    assert_eq!(stored.urgency, None);
}

#[tokio::test]
async fn stale_version_write_is_rejected() {
    let (state, _dir) = test_state().await;

    let lead = leads::create_lead(&state, sparse_lead_request("Ada", "Lovelace"))
        .await
        .unwrap();

    // a save conditioned on a version nobody holds must not land
    let saved = db::leads::save_lead(&state.db, &lead, 7).await.unwrap();
    assert!(!saved);

    // the version actually read still works
    let saved = db::leads::save_lead(&state.db, &lead, 0).await.unwrap();
    assert!(saved);

    let stored = leads::get_lead(&state, lead.id).await.unwrap();
    assert_eq!(stored.version, 1);
}

#[tokio::test]
async fn list_leads_applies_filters() {
    let (state, _dir) = test_state().await;

    let hot = leads::create_lead(&state, hot_lead_request()).await.unwrap();
    let cold = leads::create_lead(&state, sparse_lead_request("Ada", "Lovelace"))
        .await
        .unwrap();
    leads::transition_status(&state, cold.id, LeadStatus::Working)
        .await
        .unwrap();

    let tier_a = leads::list_leads(
        &state,
        &LeadFilter {
            tier: Some(Tier::A),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(tier_a.len(), 1);
    assert_eq!(tier_a[0].id, hot.id);

    let working = leads::list_leads(
        &state,
        &LeadFilter {
            status: Some(LeadStatus::Working),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(working.len(), 1);
    assert_eq!(working[0].id, cold.id);

    let high_score = leads::list_leads(
        &state,
        &LeadFilter {
            min_score: Some(60),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(high_score.len(), 1);

    let everyone = leads::list_leads(&state, &LeadFilter::default()).await.unwrap();
    assert_eq!(everyone.len(), 2);
}

#[tokio::test]
async fn touchpoints_count_without_affecting_score() {
    let (state, _dir) = test_state().await;

    let lead = leads::create_lead(&state, sparse_lead_request("Ada", "Lovelace"))
        .await
        .unwrap();

    leads::record_touchpoint(&state, lead.id).await.unwrap();
    leads::record_touchpoint(&state, lead.id).await.unwrap();

    let stored = leads::get_lead(&state, lead.id).await.unwrap();
    assert_eq!(stored.touchpoint_count, 2);
    assert_eq!(stored.lead_score, 0);

    let err = leads::record_touchpoint(&state, uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, LeadError::NotFound(_)));
}

#[tokio::test]
async fn partnership_sales_ignores_partner_fields() {
    let (state, _dir) = test_state().await;

    let req = CreateLeadRequest {
        sales_motion: SalesMotion::PartnershipSales,
        partner_id: Some(uuid::Uuid::new_v4()),
        product_id: Some(uuid::Uuid::new_v4()),
        ..sparse_lead_request("Ada", "Lovelace")
    };
    let lead = leads::create_lead(&state, req).await.unwrap();

    assert_eq!(lead.partner_id, None);
    assert_eq!(lead.product_id, None);
}

#[tokio::test]
async fn partner_sales_requires_partner_id() {
    let (state, _dir) = test_state().await;

    let req = CreateLeadRequest {
        sales_motion: SalesMotion::PartnerSales,
        ..sparse_lead_request("Ada", "Lovelace")
    };
    let err = leads::create_lead(&state, req).await.unwrap_err();
    assert!(matches!(err, LeadError::Validation(_)));
}
