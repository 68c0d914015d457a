//! Ticket Repository
//!
//! SQLite-backed implementation for Ticket CRUD and status moves.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::{DomainError, DomainResult, Ticket, TicketPriority, TicketStatus, WireValue};
use super::db::{with_conn, SharedConn};
use super::traits::{Repository, StatusRepository};

const TICKET_COLUMNS: &str =
    "id, subject, description, status, priority, client_id, assigned_to, created_at, updated_at";

/// SQLite implementation of Ticket repository
pub struct TicketRepository {
    conn: SharedConn,
}

impl TicketRepository {
    pub fn new(conn: SharedConn) -> Self {
        Self { conn }
    }
}

fn row_to_ticket(row: &Row) -> rusqlite::Result<Ticket> {
    Ok(Ticket {
        id: row.get(0)?,
        subject: row.get(1)?,
        description: row.get(2)?,
        status: TicketStatus::from_stored(&row.get::<_, String>(3)?, row.get(0)?),
        priority: TicketPriority::from_stored(&row.get::<_, String>(4)?, row.get(0)?),
        client_id: row.get(5)?,
        assigned_to: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn select_ticket(conn: &Connection, id: u32) -> DomainResult<Option<Ticket>> {
    let sql = format!("SELECT {} FROM tickets WHERE id = ?1", TICKET_COLUMNS);
    Ok(conn.query_row(&sql, params![id], row_to_ticket).optional()?)
}

fn not_found(id: u32) -> DomainError {
    DomainError::NotFound(format!("ticket {}", id))
}

#[async_trait]
impl Repository<Ticket> for TicketRepository {
    async fn create(&self, entity: &Ticket) -> DomainResult<Ticket> {
        entity.validate()?;
        with_conn(&self.conn, |conn| {
            conn.execute(
                "INSERT INTO tickets (subject, description, status, priority, client_id, assigned_to)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    entity.subject.trim(),
                    entity.description,
                    entity.status.as_str(),
                    entity.priority.as_str(),
                    entity.client_id,
                    entity.assigned_to,
                ],
            )?;
            let id = conn.last_insert_rowid() as u32;
            select_ticket(conn, id)?.ok_or_else(|| not_found(id))
        })
        .await
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Ticket>> {
        with_conn(&self.conn, |conn| select_ticket(conn, id)).await
    }

    async fn list(&self) -> DomainResult<Vec<Ticket>> {
        with_conn(&self.conn, |conn| {
            let sql = format!("SELECT {} FROM tickets ORDER BY created_at DESC, id DESC", TICKET_COLUMNS);
            let mut stmt = conn.prepare(&sql)?;
            let tickets = stmt
                .query_map([], row_to_ticket)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tickets)
        })
        .await
    }

    async fn update(&self, entity: &Ticket) -> DomainResult<Ticket> {
        entity.validate()?;
        with_conn(&self.conn, |conn| {
            let changed = conn.execute(
                "UPDATE tickets SET subject = ?1, description = ?2, status = ?3, priority = ?4, client_id = ?5,
                    assigned_to = ?6, updated_at = CAST(strftime('%s', 'now') AS INTEGER)
                 WHERE id = ?7",
                params![
                    entity.subject.trim(),
                    entity.description,
                    entity.status.as_str(),
                    entity.priority.as_str(),
                    entity.client_id,
                    entity.assigned_to,
                    entity.id,
                ],
            )?;
            if changed == 0 {
                return Err(not_found(entity.id));
            }
            select_ticket(conn, entity.id)?.ok_or_else(|| not_found(entity.id))
        })
        .await
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        with_conn(&self.conn, |conn| {
            if conn.execute("DELETE FROM tickets WHERE id = ?1", params![id])? == 0 {
                return Err(not_found(id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl StatusRepository<Ticket> for TicketRepository {
    async fn update_status(&self, id: u32, status: &str) -> DomainResult<Ticket> {
        let status = TicketStatus::parse(status)?;
        with_conn(&self.conn, |conn| {
            let changed = conn.execute(
                "UPDATE tickets SET status = ?1, updated_at = CAST(strftime('%s', 'now') AS INTEGER) WHERE id = ?2",
                params![status.as_str(), id],
            )?;
            if changed == 0 {
                return Err(not_found(id));
            }
            select_ticket(conn, id)?.ok_or_else(|| not_found(id))
        })
        .await
    }
}
