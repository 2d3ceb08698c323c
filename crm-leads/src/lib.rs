//! Lead scoring and qualification engine
//!
//! Turns raw intake data about a prospective customer into a deterministic
//! 0-100 score, classifies the lead into a tier, drives the lead status
//! state machine, and performs the exactly-once qualification that
//! materializes linked Contact + Company + Deal records.
//!
//! The engine is a library: the surrounding system mounts it behind
//! whatever transport it uses. Nothing in here renders, routes or
//! authenticates.

pub mod db;
pub mod error;
pub mod events;
pub mod models;
pub mod scoring;
pub mod services;

pub use error::{LeadError, LeadResult};
pub use events::{LeadEvent, LeadEventBus};

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::scoring::ScoringTables;

/// Shared state for the lead engine
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Event bus for engine notifications
    pub events: LeadEventBus,
    /// Scoring lookup tables (tunable via config)
    pub scoring: Arc<ScoringTables>,
}

impl AppState {
    pub fn new(db: SqlitePool, scoring: ScoringTables) -> Self {
        Self {
            db,
            events: LeadEventBus::new(256),
            scoring: Arc::new(scoring),
        }
    }
}
