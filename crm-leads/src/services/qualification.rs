//! Qualification orchestrator
//!
//! Converts a vetted lead into Contact + Company + Deal exactly once.
//! All four effects (three record writes plus the lead's status flip)
//! commit inside one database transaction; any failure rolls the whole
//! thing back and leaves the lead untouched.
//!
//! Exactly-once is enforced by a compare-and-set on the lead's version:
//! the conversion write only lands if the row still carries the version
//! the snapshot was read with. A caller that loses the race observes the
//! winner's deal id instead of creating a second deal, which also makes
//! the operation safely retryable.

use chrono::Utc;
use sqlx::SqlitePool;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db;
use crate::error::{LeadError, LeadResult};
use crate::events::{LeadEvent, LeadEventBus};
use crate::models::crm::Deal;
use crate::models::status::LeadStatus;
use crate::services::sales_motion;
use crate::AppState;

/// Attempts per call before lock contention surfaces as a conflict
const MAX_ATTEMPTS: u32 = 3;

/// Result of one qualification attempt
enum QualifyOutcome {
    /// This call performed the conversion
    Converted {
        deal_id: Uuid,
        contact_id: Uuid,
        company_id: Uuid,
    },
    /// The lead was already qualified (by an earlier call or a concurrent
    /// winner); no side effects were produced
    AlreadyQualified { deal_id: Uuid },
}

/// Transactional lead conversion
pub struct QualificationOrchestrator {
    db: SqlitePool,
    events: LeadEventBus,
}

impl QualificationOrchestrator {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
            events: state.events.clone(),
        }
    }

    /// Qualify a lead and return its deal id.
    ///
    /// Idempotent: calling this on an already-qualified lead returns the
    /// existing deal id without side effects. The caller-supplied
    /// cancellation token is honored up to the commit point; a cancelled
    /// token guarantees nothing was written.
    pub async fn qualify(&self, lead_id: Uuid, cancel: CancellationToken) -> LeadResult<Uuid> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.try_qualify(lead_id, &cancel).await {
                Ok(QualifyOutcome::Converted {
                    deal_id,
                    contact_id,
                    company_id,
                }) => {
                    self.events.emit_lossy(LeadEvent::LeadQualified {
                        lead_id,
                        deal_id,
                        contact_id,
                        company_id,
                        timestamp: Utc::now(),
                    });
                    return Ok(deal_id);
                }
                Ok(QualifyOutcome::AlreadyQualified { deal_id }) => return Ok(deal_id),
                Err(err) if err.is_retryable() && attempt < MAX_ATTEMPTS => {
                    warn!(
                        lead_id = %lead_id,
                        attempt,
                        error = %err,
                        "Qualification attempt lost a race, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(25 * u64::from(attempt))).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One qualification attempt inside a single transaction.
    async fn try_qualify(
        &self,
        lead_id: Uuid,
        cancel: &CancellationToken,
    ) -> LeadResult<QualifyOutcome> {
        if cancel.is_cancelled() {
            return Err(LeadError::Cancelled);
        }

        let mut tx = self.db.begin().await?;

        // Consistent snapshot: status, scoring fields and sales motion are
        // all read inside the transaction, and preconditions validate
        // against this snapshot rather than caller-cached state.
        let snapshot = db::leads::get_lead(&mut *tx, lead_id)
            .await?
            .ok_or_else(|| LeadError::NotFound(format!("Lead {}", lead_id)))?;

        if snapshot.status == LeadStatus::Qualified {
            let deal_id = snapshot.converted_deal_id.ok_or_else(|| {
                LeadError::Common(crm_common::Error::Internal(format!(
                    "Lead {} is qualified but has no converted deal",
                    lead_id
                )))
            })?;
            info!(lead_id = %lead_id, deal_id = %deal_id, "Lead already qualified");
            return Ok(QualifyOutcome::AlreadyQualified { deal_id });
        }

        if !snapshot.status.allows_qualification() {
            return Err(LeadError::InvalidTransition {
                from: snapshot.status,
                to: LeadStatus::Qualified,
            });
        }

        sales_motion::validate_for_qualification(&mut tx, &snapshot).await?;

        let contact = db::contacts::find_or_create_for_lead(&mut tx, &snapshot).await?;
        let company_name = snapshot
            .company_name
            .clone()
            .unwrap_or_else(|| snapshot.full_name());
        let company = db::companies::find_or_create(&mut tx, &company_name).await?;

        let deal = Deal::seed_from(&snapshot, contact.id, company.id, &company.name);
        db::deals::insert_deal(&mut tx, &deal).await?;

        let converted =
            db::leads::mark_qualified(&mut tx, lead_id, deal.id, snapshot.version).await?;
        if !converted {
            // A concurrent writer bumped the version. Drop our writes and
            // report the winner's result if it was a qualification.
            tx.rollback().await?;

            let current = db::leads::get_lead(&self.db, lead_id)
                .await?
                .ok_or_else(|| LeadError::NotFound(format!("Lead {}", lead_id)))?;
            if current.status == LeadStatus::Qualified {
                if let Some(deal_id) = current.converted_deal_id {
                    info!(
                        lead_id = %lead_id,
                        deal_id = %deal_id,
                        "Concurrent caller qualified the lead first"
                    );
                    return Ok(QualifyOutcome::AlreadyQualified { deal_id });
                }
            }
            return Err(LeadError::PersistenceConflict(format!(
                "lead {} changed during qualification",
                lead_id
            )));
        }

        // Last cancellation point: nothing is visible until commit, so
        // bailing here still leaves the lead unchanged.
        if cancel.is_cancelled() {
            tx.rollback().await?;
            return Err(LeadError::Cancelled);
        }

        tx.commit().await?;

        info!(
            lead_id = %lead_id,
            deal_id = %deal.id,
            contact_id = %contact.id,
            company_id = %company.id,
            "Lead qualified"
        );

        Ok(QualifyOutcome::Converted {
            deal_id: deal.id,
            contact_id: contact.id,
            company_id: company.id,
        })
    }
}
