//! Shared test helpers: temp-file databases and seeded fixtures

#![allow(dead_code)]

use tempfile::TempDir;
use uuid::Uuid;

use crm_leads::db;
use crm_leads::models::crm::{Partner, PartnerStatus, Product};
use crm_leads::models::lead::Lead;
use crm_leads::models::requests::CreateLeadRequest;
use crm_leads::models::status::LeadStatus;
use crm_leads::scoring::ScoringTables;
use crm_leads::services;
use crm_leads::AppState;

/// Create an engine state backed by a fresh temp-file database.
///
/// The TempDir must stay alive for the duration of the test.
pub async fn test_state() -> (AppState, TempDir) {
    let dir = TempDir::new().expect("create temp dir");
    let pool = db::init_database_pool(&dir.path().join("crm-test.db"))
        .await
        .expect("init test database");
    (AppState::new(pool, ScoringTables::default()), dir)
}

/// Scenario-1 style request: urgency 5, clarity 5, decision maker,
/// referral source, 250 economic units. Scores 80 / Tier A.
pub fn hot_lead_request() -> CreateLeadRequest {
    CreateLeadRequest {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: Some("grace@eniac.example".to_string()),
        company_name: Some("Eckert-Mauchly".to_string()),
        economic_units: Some(250),
        urgency: Some(5),
        decision_role: Some(crm_leads::models::lead::DecisionRole::DecisionMaker),
        decision_process_clarity: Some(5),
        source: Some(crm_leads::models::lead::LeadSource::Referral),
        ..Default::default()
    }
}

/// Minimal request with every scoring input absent. Scores 0 / Tier D.
pub fn sparse_lead_request(first: &str, last: &str) -> CreateLeadRequest {
    CreateLeadRequest {
        first_name: first.to_string(),
        last_name: last.to_string(),
        ..Default::default()
    }
}

/// Create a lead and walk it to `info_collected` so it is eligible for
/// qualification.
pub async fn create_info_collected_lead(state: &AppState, req: CreateLeadRequest) -> Lead {
    let lead = services::leads::create_lead(state, req)
        .await
        .expect("create lead");
    services::leads::transition_status(state, lead.id, LeadStatus::Working)
        .await
        .expect("new -> working");
    services::leads::transition_status(state, lead.id, LeadStatus::InfoCollected)
        .await
        .expect("working -> info_collected")
}

/// Seed a catalog partner.
pub async fn seed_partner(state: &AppState, status: PartnerStatus) -> Partner {
    let partner = Partner {
        id: Uuid::new_v4(),
        name: format!("Partner {}", &Uuid::new_v4().to_string()[..8]),
        status,
    };
    db::partners::insert_partner(&state.db, &partner)
        .await
        .expect("seed partner");
    partner
}

/// Seed a catalog product owned by `partner_id`.
pub async fn seed_product(state: &AppState, partner_id: Uuid) -> Product {
    let product = Product {
        id: Uuid::new_v4(),
        partner_id,
        name: format!("Product {}", &Uuid::new_v4().to_string()[..8]),
    };
    db::partners::insert_product(&state.db, &product)
        .await
        .expect("seed product");
    product
}

/// Count rows in a table, for exactly-once assertions.
pub async fn count_rows(state: &AppState, table: &str) -> i64 {
    let query = format!("SELECT COUNT(*) FROM {}", table);
    sqlx::query_scalar(&query)
        .fetch_one(&state.db)
        .await
        .expect("count rows")
}
