//! Contact resolution for qualification
//!
//! Runs against an open transaction connection so contact creation commits
//! or rolls back together with the rest of the qualification writes.

use chrono::Utc;
use crm_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::{parse_datetime, parse_uuid};
use crate::models::crm::Contact;
use crate::models::lead::Lead;

/// Resolve the contact for a lead: match by email when the lead has one,
/// otherwise create a fresh contact from the lead's contact fields.
pub async fn find_or_create_for_lead(conn: &mut SqliteConnection, lead: &Lead) -> Result<Contact> {
    if let Some(email) = lead.email.as_deref() {
        if let Some(existing) = find_by_email(conn, email).await? {
            return Ok(existing);
        }
    }

    let contact = Contact {
        id: Uuid::new_v4(),
        first_name: lead.first_name.clone(),
        last_name: lead.last_name.clone(),
        email: lead.email.clone(),
        phone: lead.phone.clone(),
        title: lead.title.clone(),
        created_at: Utc::now(),
    };
    insert_contact(conn, &contact).await?;
    Ok(contact)
}

/// Find the oldest contact carrying this email.
pub async fn find_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<Contact>> {
    let row = sqlx::query(
        r#"
        SELECT id, first_name, last_name, email, phone, title, created_at
        FROM contacts
        WHERE email = ?
        ORDER BY created_at ASC
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(|r| contact_from_row(&r)).transpose()
}

pub async fn insert_contact(conn: &mut SqliteConnection, contact: &Contact) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO contacts (id, first_name, last_name, email, phone, title, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(contact.id.to_string())
    .bind(&contact.first_name)
    .bind(&contact.last_name)
    .bind(contact.email.as_deref())
    .bind(contact.phone.as_deref())
    .bind(contact.title.as_deref())
    .bind(contact.created_at.to_rfc3339())
    .execute(&mut *conn)
    .await?;
    Ok(())
}

fn contact_from_row(row: &SqliteRow) -> Result<Contact> {
    let id: String = row.get("id");
    let created_at: String = row.get("created_at");

    Ok(Contact {
        id: parse_uuid(&id, "contact id")?,
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        title: row.get("title"),
        created_at: parse_datetime(&created_at, "contact created_at")?,
    })
}
