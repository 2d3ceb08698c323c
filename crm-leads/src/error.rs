//! Error taxonomy for the lead engine
//!
//! Scoring never fails outward; every other operation either fully commits
//! or fully rolls back. Callers branch on [`LeadError::is_retryable`]:
//! retryable errors are safe to retry without side effects, the rest need
//! the input state fixed first.

use thiserror::Error;
use uuid::Uuid;

use crate::models::crm::PartnerStatus;
use crate::models::status::LeadStatus;

/// Result type for lead engine operations
pub type LeadResult<T> = Result<T, LeadError>;

/// Lead engine error type
#[derive(Debug, Error)]
pub enum LeadError {
    /// Status change not permitted by the state machine
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: LeadStatus, to: LeadStatus },

    /// The lead's product is owned by a different partner
    #[error("product {product_id} does not belong to partner {partner_id}")]
    PartnerProductMismatch { partner_id: Uuid, product_id: Uuid },

    /// The lead's partner is not in active status
    #[error("partner {partner_id} is not active (status: {status})")]
    PartnerInactive {
        partner_id: Uuid,
        status: PartnerStatus,
    },

    /// A concurrent writer won; the operation was rolled back and is safe
    /// to retry
    #[error("concurrent update conflict: {0}")]
    PersistenceConflict(String),

    /// The downstream store is unreachable; nothing was committed
    #[error("downstream store unavailable: {0}")]
    DownstreamUnavailable(String),

    /// Operation aborted by the caller's cancellation signal before commit
    #[error("operation cancelled before commit")]
    Cancelled,

    /// Malformed request input
    #[error("invalid input: {0}")]
    Validation(String),

    /// Requested record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Shared plumbing error
    #[error("common error: {0}")]
    Common(crm_common::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LeadError {
    /// True for errors a caller may retry verbatim without side effects.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LeadError::PersistenceConflict(_) | LeadError::DownstreamUnavailable(_)
        )
    }
}

/// Classify plumbing errors as they cross into the engine: lock contention
/// becomes a retryable conflict, connectivity loss a retryable outage, and
/// everything else passes through.
impl From<crm_common::Error> for LeadError {
    fn from(err: crm_common::Error) -> Self {
        match err {
            crm_common::Error::Database(db_err) => classify_db_error(db_err),
            other => LeadError::Common(other),
        }
    }
}

impl From<sqlx::Error> for LeadError {
    fn from(err: sqlx::Error) -> Self {
        classify_db_error(err)
    }
}

fn classify_db_error(err: sqlx::Error) -> LeadError {
    use sqlx::error::DatabaseError;

    let lock_contention = matches!(
        &err,
        sqlx::Error::Database(db_err)
            if db_err.message().contains("database is locked")
                || db_err.message().contains("database is busy")
    );
    if lock_contention {
        return LeadError::PersistenceConflict(err.to_string());
    }

    let unreachable_store = matches!(
        &err,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    );
    if unreachable_store {
        return LeadError::DownstreamUnavailable(err.to_string());
    }

    LeadError::Common(crm_common::Error::Database(err))
}
