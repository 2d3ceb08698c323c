//! Company resolution for qualification

use chrono::Utc;
use crm_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::{parse_datetime, parse_uuid};
use crate::models::crm::Company;

/// Resolve a company by exact name, creating it when absent.
pub async fn find_or_create(conn: &mut SqliteConnection, name: &str) -> Result<Company> {
    if let Some(existing) = find_by_name(conn, name).await? {
        return Ok(existing);
    }

    let company = Company {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at: Utc::now(),
    };
    insert_company(conn, &company).await?;
    Ok(company)
}

pub async fn find_by_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<Company>> {
    let row = sqlx::query("SELECT id, name, created_at FROM companies WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;

    row.map(|r| company_from_row(&r)).transpose()
}

pub async fn insert_company(conn: &mut SqliteConnection, company: &Company) -> Result<()> {
    sqlx::query("INSERT INTO companies (id, name, created_at) VALUES (?, ?, ?)")
        .bind(company.id.to_string())
        .bind(&company.name)
        .bind(company.created_at.to_rfc3339())
        .execute(&mut *conn)
        .await?;
    Ok(())
}

fn company_from_row(row: &SqliteRow) -> Result<Company> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");

    Ok(Company {
        id: parse_uuid(&id, "company id")?,
        name: row.get("name"),
        created_at: parse_datetime(&created_at, "company created_at")?,
    })
}
