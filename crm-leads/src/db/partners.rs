//! Partner/product catalog reads
//!
//! The catalog is owned by the partner management side of the system; this
//! engine only reads it (sales-motion validation) and seeds it in tests.

use crm_common::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::parse_uuid;
use crate::models::crm::{Partner, PartnerStatus, Product};

/// Load a partner by id.
pub async fn get_partner<'e, E>(executor: E, partner_id: Uuid) -> Result<Option<Partner>>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let row = sqlx::query("SELECT id, name, status FROM partners WHERE id = ?")
        .bind(partner_id.to_string())
        .fetch_optional(executor)
        .await?;

    row.map(|r| partner_from_row(&r)).transpose()
}

/// Load a product by id.
pub async fn get_product<'e, E>(executor: E, product_id: Uuid) -> Result<Option<Product>>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let row = sqlx::query("SELECT id, partner_id, name FROM products WHERE id = ?")
        .bind(product_id.to_string())
        .fetch_optional(executor)
        .await?;

    row.map(|r| product_from_row(&r)).transpose()
}

/// Insert a partner (catalog seeding).
pub async fn insert_partner(pool: &SqlitePool, partner: &Partner) -> Result<()> {
    sqlx::query("INSERT INTO partners (id, name, status) VALUES (?, ?, ?)")
        .bind(partner.id.to_string())
        .bind(&partner.name)
        .bind(partner.status.as_str())
        .execute(pool)
        .await?;
    Ok(())
}

/// Insert a product (catalog seeding).
pub async fn insert_product(pool: &SqlitePool, product: &Product) -> Result<()> {
    sqlx::query("INSERT INTO products (id, partner_id, name) VALUES (?, ?, ?)")
        .bind(product.id.to_string())
        .bind(product.partner_id.to_string())
        .bind(&product.name)
        .execute(pool)
        .await?;
    Ok(())
}

fn partner_from_row(row: &SqliteRow) -> Result<Partner> {
    let id: String = row.get("id");
    let status: String = row.get("status");

    Ok(Partner {
        id: parse_uuid(&id, "partner id")?,
        name: row.get("name"),
        status: PartnerStatus::parse(&status)
            .ok_or_else(|| Error::Internal(format!("Unknown partner status: {}", status)))?,
    })
}

fn product_from_row(row: &SqliteRow) -> Result<Product> {
    let id: String = row.get("id");
    let partner_id: String = row.get("partner_id");

    Ok(Product {
        id: parse_uuid(&id, "product id")?,
        partner_id: parse_uuid(&partner_id, "product partner_id")?,
        name: row.get("name"),
    })
}
