//! Database schema for the lead engine
//!
//! All statements are idempotent (`IF NOT EXISTS`), so startup can apply
//! the schema unconditionally.

use crm_common::Result;
use sqlx::SqlitePool;

/// Create the lead engine tables if they don't exist.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS leads (
            id TEXT PRIMARY KEY,
            version INTEGER NOT NULL DEFAULT 0,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            company_name TEXT,
            title TEXT,
            economic_units INTEGER,
            usage_volume INTEGER,
            urgency INTEGER,
            trigger_event TEXT,
            primary_motivation TEXT,
            decision_role TEXT,
            decision_process_clarity INTEGER,
            source TEXT,
            lead_score INTEGER NOT NULL DEFAULT 0,
            tier TEXT NOT NULL DEFAULT 'D',
            score_breakdown TEXT NOT NULL DEFAULT '{}',
            status TEXT NOT NULL DEFAULT 'new',
            status_changed_at TEXT NOT NULL,
            touchpoint_count INTEGER NOT NULL DEFAULT 0,
            sales_motion TEXT NOT NULL DEFAULT 'partnership_sales',
            partner_id TEXT,
            product_id TEXT,
            converted_deal_id TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_status ON leads(status)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_leads_tier ON leads(tier)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS partners (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'active'
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            partner_id TEXT NOT NULL REFERENCES partners(id),
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id TEXT PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            title TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_contacts_email ON contacts(email)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS companies (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_companies_name ON companies(name)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS deals (
            id TEXT PRIMARY KEY,
            lead_id TEXT NOT NULL REFERENCES leads(id),
            contact_id TEXT NOT NULL REFERENCES contacts(id),
            company_id TEXT NOT NULL REFERENCES companies(id),
            name TEXT NOT NULL,
            stage TEXT NOT NULL,
            probability INTEGER NOT NULL,
            sales_motion TEXT NOT NULL,
            partner_id TEXT,
            product_id TEXT,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_deals_lead ON deals(lead_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database tables initialized (leads, partners, products, contacts, companies, deals)");

    Ok(())
}
