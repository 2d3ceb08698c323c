//! Sales-motion resolver
//!
//! Validates partner/product consistency as a precondition of
//! qualification. Runs against the orchestrator's open transaction so the
//! catalog is read from the same snapshot the conversion will commit
//! against.
//!
//! This check deliberately does not run at lead creation: a partner_sales
//! lead may exist before its product is finalized, it just cannot qualify
//! until the pairing is consistent.

use sqlx::SqliteConnection;

use crate::db;
use crate::error::{LeadError, LeadResult};
use crate::models::crm::PartnerStatus;
use crate::models::lead::{Lead, SalesMotion};

/// Validate the lead's sales motion for qualification.
///
/// - `partnership_sales`: partner/product fields are ignored.
/// - `partner_sales`: both ids are required, the product must belong to
///   the lead's partner, and the partner must be active.
pub async fn validate_for_qualification(
    conn: &mut SqliteConnection,
    lead: &Lead,
) -> LeadResult<()> {
    match lead.sales_motion {
        SalesMotion::PartnershipSales => Ok(()),
        SalesMotion::PartnerSales => {
            let partner_id = lead.partner_id.ok_or_else(|| {
                LeadError::Validation(format!(
                    "partner_sales lead {} is missing partner_id",
                    lead.id
                ))
            })?;
            let product_id = lead.product_id.ok_or_else(|| {
                LeadError::Validation(format!(
                    "partner_sales lead {} is missing product_id",
                    lead.id
                ))
            })?;

            let product = db::partners::get_product(&mut *conn, product_id)
                .await?
                .ok_or_else(|| LeadError::NotFound(format!("Product {}", product_id)))?;

            if product.partner_id != partner_id {
                return Err(LeadError::PartnerProductMismatch {
                    partner_id,
                    product_id,
                });
            }

            let partner = db::partners::get_partner(&mut *conn, partner_id)
                .await?
                .ok_or_else(|| LeadError::NotFound(format!("Partner {}", partner_id)))?;

            if partner.status != PartnerStatus::Active {
                return Err(LeadError::PartnerInactive {
                    partner_id,
                    status: partner.status,
                });
            }

            Ok(())
        }
    }
}
