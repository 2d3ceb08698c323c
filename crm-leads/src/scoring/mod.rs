//! Lead scoring: category scorers, composite engine, tier classifier
//!
//! Everything in this module is pure and side-effect free. Scoring never
//! fails: absent or out-of-range inputs degrade the affected sub-score
//! toward 0, because a lead may be legitimately sparse during early
//! contact.

pub mod categories;
pub mod engine;
pub mod tables;
pub mod tier;

pub use engine::{compute_score, ScoreBreakdown, ScoreComputation, ScoringInputs};
pub use tables::ScoringTables;
