//! Deal table operations

use crm_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::{parse_datetime, parse_opt_uuid, parse_uuid};
use crate::models::crm::{Deal, DealStage};
use crate::models::lead::SalesMotion;

/// Insert a deal inside the qualification transaction.
pub async fn insert_deal(conn: &mut SqliteConnection, deal: &Deal) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO deals (
            id, lead_id, contact_id, company_id, name, stage, probability,
            sales_motion, partner_id, product_id, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(deal.id.to_string())
    .bind(deal.lead_id.to_string())
    .bind(deal.contact_id.to_string())
    .bind(deal.company_id.to_string())
    .bind(&deal.name)
    .bind(deal.stage.as_str())
    .bind(deal.probability)
    .bind(deal.sales_motion.as_str())
    .bind(deal.partner_id.map(|id| id.to_string()))
    .bind(deal.product_id.map(|id| id.to_string()))
    .bind(deal.created_at.to_rfc3339())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Load a deal by id.
pub async fn get_deal(pool: &SqlitePool, deal_id: Uuid) -> Result<Option<Deal>> {
    let row = sqlx::query(
        r#"
        SELECT id, lead_id, contact_id, company_id, name, stage, probability,
               sales_motion, partner_id, product_id, created_at
        FROM deals
        WHERE id = ?
        "#,
    )
    .bind(deal_id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(|r| deal_from_row(&r)).transpose()
}

/// How many deals exist for a lead. Exactly-once conversion means this is
/// always 0 or 1.
pub async fn count_for_lead(pool: &SqlitePool, lead_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM deals WHERE lead_id = ?")
        .bind(lead_id.to_string())
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn deal_from_row(row: &SqliteRow) -> Result<Deal> {
    let id: String = row.get("id");
    let lead_id: String = row.get("lead_id");
    let contact_id: String = row.get("contact_id");
    let company_id: String = row.get("company_id");
    let created_at: String = row.get("created_at");

    let stage: String = row.get("stage");
    let stage = DealStage::parse(&stage)
        .ok_or_else(|| Error::Internal(format!("Unknown deal stage: {}", stage)))?;

    let sales_motion: String = row.get("sales_motion");
    let sales_motion = SalesMotion::parse(&sales_motion)
        .ok_or_else(|| Error::Internal(format!("Unknown sales motion: {}", sales_motion)))?;

    Ok(Deal {
        id: parse_uuid(&id, "deal id")?,
        lead_id: parse_uuid(&lead_id, "deal lead_id")?,
        contact_id: parse_uuid(&contact_id, "deal contact_id")?,
        company_id: parse_uuid(&company_id, "deal company_id")?,
        name: row.get("name"),
        stage,
        probability: row.get("probability"),
        sales_motion,
        partner_id: parse_opt_uuid(row.get("partner_id"), "deal partner_id")?,
        product_id: parse_opt_uuid(row.get("product_id"), "deal product_id")?,
        created_at: parse_datetime(&created_at, "deal created_at")?,
    })
}
