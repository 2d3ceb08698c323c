//! Lead table operations
//!
//! All writes are optimistic: the row carries a version counter and every
//! update is conditional on the version the writer read. A failed
//! condition surfaces as `Ok(false)` so callers decide between retry and
//! the idempotent observation path.

use chrono::Utc;
use crm_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::{parse_datetime, parse_opt_uuid, parse_uuid};
use crate::models::lead::{DecisionRole, Lead, LeadSource, Motivation, SalesMotion, Tier};
use crate::models::requests::LeadFilter;
use crate::models::status::LeadStatus;

const LEAD_COLUMNS: &str = r#"
    id, version, first_name, last_name, email, phone, company_name, title,
    economic_units, usage_volume, urgency, trigger_event, primary_motivation,
    decision_role, decision_process_clarity, source,
    lead_score, tier, score_breakdown,
    status, status_changed_at, touchpoint_count,
    sales_motion, partner_id, product_id, converted_deal_id,
    created_at, updated_at
"#;

/// Insert a freshly created lead.
pub async fn insert_lead(pool: &SqlitePool, lead: &Lead) -> Result<()> {
    let breakdown = serde_json::to_string(&lead.score_breakdown)
        .map_err(|e| Error::Internal(format!("Failed to serialize score breakdown: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO leads (
            id, version, first_name, last_name, email, phone, company_name, title,
            economic_units, usage_volume, urgency, trigger_event, primary_motivation,
            decision_role, decision_process_clarity, source,
            lead_score, tier, score_breakdown,
            status, status_changed_at, touchpoint_count,
            sales_motion, partner_id, product_id, converted_deal_id,
            created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(lead.id.to_string())
    .bind(lead.version)
    .bind(&lead.first_name)
    .bind(&lead.last_name)
    .bind(lead.email.as_deref())
    .bind(lead.phone.as_deref())
    .bind(lead.company_name.as_deref())
    .bind(lead.title.as_deref())
    .bind(lead.economic_units)
    .bind(lead.usage_volume)
    .bind(lead.urgency)
    .bind(lead.trigger_event.as_deref())
    .bind(lead.primary_motivation.map(|m| m.as_str()))
    .bind(lead.decision_role.map(|r| r.as_str()))
    .bind(lead.decision_process_clarity)
    .bind(lead.source.map(|s| s.as_str()))
    .bind(lead.lead_score)
    .bind(lead.tier.as_str())
    .bind(&breakdown)
    .bind(lead.status.as_str())
    .bind(lead.status_changed_at.to_rfc3339())
    .bind(lead.touchpoint_count)
    .bind(lead.sales_motion.as_str())
    .bind(lead.partner_id.map(|id| id.to_string()))
    .bind(lead.product_id.map(|id| id.to_string()))
    .bind(lead.converted_deal_id.map(|id| id.to_string()))
    .bind(lead.created_at.to_rfc3339())
    .bind(lead.updated_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a lead by id.
///
/// Generic over the executor so the qualification orchestrator can read
/// its snapshot inside an open transaction.
pub async fn get_lead<'e, E>(executor: E, lead_id: Uuid) -> Result<Option<Lead>>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let query = format!("SELECT {} FROM leads WHERE id = ?", LEAD_COLUMNS);
    let row = sqlx::query(&query)
        .bind(lead_id.to_string())
        .fetch_optional(executor)
        .await?;

    row.map(|r| lead_from_row(&r)).transpose()
}

/// Optimistic-concurrency write of a lead's mutable fields.
///
/// `touchpoint_count` and `converted_deal_id` are excluded: the first is
/// owned by the touchpoint increment path, the second by the qualification
/// orchestrator. Returns false when `expected_version` no longer matches.
pub async fn save_lead(pool: &SqlitePool, lead: &Lead, expected_version: i64) -> Result<bool> {
    let breakdown = serde_json::to_string(&lead.score_breakdown)
        .map_err(|e| Error::Internal(format!("Failed to serialize score breakdown: {}", e)))?;

    let result = sqlx::query(
        r#"
        UPDATE leads SET
            first_name = ?, last_name = ?, email = ?, phone = ?, company_name = ?, title = ?,
            economic_units = ?, usage_volume = ?, urgency = ?, trigger_event = ?,
            primary_motivation = ?, decision_role = ?, decision_process_clarity = ?, source = ?,
            lead_score = ?, tier = ?, score_breakdown = ?,
            status = ?, status_changed_at = ?,
            sales_motion = ?, partner_id = ?, product_id = ?,
            updated_at = ?, version = ?
        WHERE id = ? AND version = ?
        "#,
    )
    .bind(&lead.first_name)
    .bind(&lead.last_name)
    .bind(lead.email.as_deref())
    .bind(lead.phone.as_deref())
    .bind(lead.company_name.as_deref())
    .bind(lead.title.as_deref())
    .bind(lead.economic_units)
    .bind(lead.usage_volume)
    .bind(lead.urgency)
    .bind(lead.trigger_event.as_deref())
    .bind(lead.primary_motivation.map(|m| m.as_str()))
    .bind(lead.decision_role.map(|r| r.as_str()))
    .bind(lead.decision_process_clarity)
    .bind(lead.source.map(|s| s.as_str()))
    .bind(lead.lead_score)
    .bind(lead.tier.as_str())
    .bind(&breakdown)
    .bind(lead.status.as_str())
    .bind(lead.status_changed_at.to_rfc3339())
    .bind(lead.sales_motion.as_str())
    .bind(lead.partner_id.map(|id| id.to_string()))
    .bind(lead.product_id.map(|id| id.to_string()))
    .bind(lead.updated_at.to_rfc3339())
    .bind(expected_version + 1)
    .bind(lead.id.to_string())
    .bind(expected_version)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Compare-and-set conversion write, run inside the qualification
/// transaction. Transitions the lead to `qualified` and records the deal
/// only if nobody else touched the row since the snapshot was read.
pub async fn mark_qualified(
    conn: &mut SqliteConnection,
    lead_id: Uuid,
    deal_id: Uuid,
    expected_version: i64,
) -> Result<bool> {
    let now = Utc::now().to_rfc3339();

    let result = sqlx::query(
        r#"
        UPDATE leads SET
            status = 'qualified',
            converted_deal_id = ?,
            status_changed_at = ?,
            updated_at = ?,
            version = version + 1
        WHERE id = ? AND version = ?
        "#,
    )
    .bind(deal_id.to_string())
    .bind(&now)
    .bind(&now)
    .bind(lead_id.to_string())
    .bind(expected_version)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// List leads matching a filter, newest first.
pub async fn list_leads(pool: &SqlitePool, filter: &LeadFilter) -> Result<Vec<Lead>> {
    let query = format!(
        r#"
        SELECT {} FROM leads
        WHERE (?1 IS NULL OR status = ?1)
          AND (?2 IS NULL OR tier = ?2)
          AND (?3 IS NULL OR lead_score >= ?3)
        ORDER BY created_at DESC
        LIMIT ?4 OFFSET ?5
        "#,
        LEAD_COLUMNS
    );

    let rows = sqlx::query(&query)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.tier.map(|t| t.as_str()))
        .bind(filter.min_score)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(pool)
        .await?;

    rows.iter().map(lead_from_row).collect()
}

/// Increment the touchpoint counter (interaction logging hook).
///
/// Single-column atomic increment; deliberately not version-guarded so
/// interaction logging never conflicts with scoring edits.
pub async fn record_touchpoint(pool: &SqlitePool, lead_id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE leads SET touchpoint_count = touchpoint_count + 1, updated_at = ? WHERE id = ?",
    )
    .bind(Utc::now().to_rfc3339())
    .bind(lead_id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

fn lead_from_row(row: &SqliteRow) -> Result<Lead> {
    let id: String = row.get("id");

    let status: String = row.get("status");
    let status = LeadStatus::parse(&status)
        .ok_or_else(|| Error::Internal(format!("Unknown lead status: {}", status)))?;

    let tier: String = row.get("tier");
    let tier =
        Tier::parse(&tier).ok_or_else(|| Error::Internal(format!("Unknown tier: {}", tier)))?;

    let sales_motion: String = row.get("sales_motion");
    let sales_motion = SalesMotion::parse(&sales_motion)
        .ok_or_else(|| Error::Internal(format!("Unknown sales motion: {}", sales_motion)))?;

    let source: Option<String> = row.get("source");
    let source = source
        .map(|s| {
            LeadSource::parse(&s).ok_or_else(|| Error::Internal(format!("Unknown source: {}", s)))
        })
        .transpose()?;

    let motivation: Option<String> = row.get("primary_motivation");
    let primary_motivation = motivation
        .map(|m| {
            Motivation::parse(&m)
                .ok_or_else(|| Error::Internal(format!("Unknown motivation: {}", m)))
        })
        .transpose()?;

    let role: Option<String> = row.get("decision_role");
    let decision_role = role
        .map(|r| {
            DecisionRole::parse(&r)
                .ok_or_else(|| Error::Internal(format!("Unknown decision role: {}", r)))
        })
        .transpose()?;

    let breakdown: String = row.get("score_breakdown");
    let score_breakdown = serde_json::from_str(&breakdown)
        .map_err(|e| Error::Internal(format!("Failed to parse score breakdown: {}", e)))?;

    let status_changed_at: String = row.get("status_changed_at");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(Lead {
        id: parse_uuid(&id, "lead id")?,
        version: row.get("version"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        company_name: row.get("company_name"),
        title: row.get("title"),
        economic_units: row.get("economic_units"),
        usage_volume: row.get("usage_volume"),
        urgency: row.get("urgency"),
        trigger_event: row.get("trigger_event"),
        primary_motivation,
        decision_role,
        decision_process_clarity: row.get("decision_process_clarity"),
        source,
        lead_score: row.get("lead_score"),
        tier,
        score_breakdown,
        status,
        status_changed_at: parse_datetime(&status_changed_at, "status_changed_at")?,
        touchpoint_count: row.get("touchpoint_count"),
        sales_motion,
        partner_id: parse_opt_uuid(row.get("partner_id"), "partner_id")?,
        product_id: parse_opt_uuid(row.get("product_id"), "product_id")?,
        converted_deal_id: parse_opt_uuid(row.get("converted_deal_id"), "converted_deal_id")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}
