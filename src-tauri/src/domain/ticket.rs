//! Ticket Entity
//!
//! A client support request.

use serde::{Deserialize, Serialize};

use super::entity::{require_text, DomainError, DomainResult, Entity};
use super::status::{TicketPriority, TicketStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub subject: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    /// Client the ticket was raised for
    pub client_id: u32,
    pub assigned_to: Option<u32>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Ticket {
    pub fn new(id: u32, subject: String, client_id: u32) -> Self {
        Self {
            id,
            subject,
            description: String::new(),
            status: TicketStatus::default(),
            priority: TicketPriority::default(),
            client_id,
            assigned_to: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("subject", &self.subject)?;
        if self.client_id == 0 {
            return Err(DomainError::InvalidInput("client_id is required".to_string()));
        }
        Ok(())
    }
}

impl Entity for Ticket {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
