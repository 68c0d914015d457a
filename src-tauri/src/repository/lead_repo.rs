//! Lead Repository
//!
//! SQLite-backed implementation for Lead CRUD and pipeline moves.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Lead, LeadStatus, WireValue};
use super::db::{with_conn, SharedConn};
use super::traits::{Repository, StatusRepository};

const LEAD_COLUMNS: &str =
    "id, name, email, phone, company, status, source, value, assigned_to, created_at, updated_at";

/// SQLite implementation of Lead repository
pub struct LeadRepository {
    conn: SharedConn,
}

impl LeadRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }
}

fn row_to_lead(row: &Row) -> rusqlite::Result<Lead> {
    Ok(Lead {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        company: row.get(4)?,
        status: LeadStatus::from_stored(&row.get::<_, String>(5)?, row.get(0)?),
        source: row.get(6)?,
        value: row.get(7)?,
        assigned_to: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

fn select_lead(conn: &Connection, id: u32) -> DomainResult<Option<Lead>> {
    let sql = format!("SELECT {} FROM leads WHERE id = ?1", LEAD_COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_lead).optional()?)
}

fn not_found(id: u32) -> DomainError {
    DomainError::NotFound(format!("lead {}", id))
}

#[async_trait]
impl Repository<Lead> for LeadRepository {
    async fn create(&self, entity: &Lead) -> DomainResult<Lead> {
        entity.validate()?;
        with_conn(&self.conn, |conn| {
            conn.execute(
                "INSERT INTO leads (name, email, phone, company, status, source, value, assigned_to)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entity.name.trim(),
                    entity.email,
                    entity.phone,
                    entity.company,
                    entity.status.as_str(),
                    entity.source,
                    entity.value,
                    entity.assigned_to,
                ],
            )?;
            let id = conn.last_insert_rowid() as u32;
            select_lead(conn, id)?.ok_or_else(|| not_found(id))
        })
        .await
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Lead>> {
        with_conn(&self.conn, |conn| select_lead(conn, id)).await
    }

    async fn list(&self) -> DomainResult<Vec<Lead>> {
        with_conn(&self.conn, |conn| {
            let sql = format!("SELECT {} FROM leads ORDER BY created_at DESC, id DESC", LEAD_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let leads = stmt
                .query_map([], row_to_lead)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(leads)
        })
        .await
    }

    async fn update(&self, entity: &Lead) -> DomainResult<Lead> {
        entity.validate()?;
        with_conn(&self.conn, |conn| {
            let changed = conn.execute(
                "UPDATE leads SET name = ?1, email = ?2, phone = ?3, company = ?4, status = ?5, source = ?6,
                    value = ?7, assigned_to = ?8, updated_at = CAST(strftime('%s', 'now') AS INTEGER)
                 WHERE id = ?9",
                params![
                    entity.name.trim(),
                    entity.email,
                    entity.phone,
                    entity.company,
                    entity.status.as_str(),
                    entity.source,
                    entity.value,
                    entity.assigned_to,
                    entity.id,
                ],
            )?;
            if changed == 0 {
                return Err(not_found(entity.id));
            }
            select_lead(conn, entity.id)?.ok_or_else(|| not_found(entity.id))
        })
        .await
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        with_conn(&self.conn, |conn| {
            if conn.execute("DELETE FROM leads WHERE id = ?1", params![id])? == 0 {
                return Err(not_found(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl StatusRepository<Lead> for LeadRepository {
    async fn update_status(&self, id: u32, status: &str) -> DomainResult<Lead> {
        let status = LeadStatus::parse(status)?;
        with_conn(&self.conn, |conn| {
            let changed = conn.execute(
                "UPDATE leads SET status = ?1, updated_at = CAST(strftime('%s', 'now') AS INTEGER) WHERE id = ?2",
                params![status.as_str(), id],
            )?;
            if changed == 0 {
                return Err(not_found(id));
            }
            select_lead(conn, id)?.ok_or_else(|| not_found(id))
        })
        .await
    }
}
