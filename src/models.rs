//! Frontend Data Models
//!
//! Mirror the backend entities. Status and priority stay plain strings here:
//! the board treats them as column keys.

use serde::Deserialize;

/// Which board a view or event belongs to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoardKind {
    #[default]
    Leads,
    Tasks,
    Tickets,
}

impl BoardKind {
    pub const ALL: [BoardKind; 3] = [BoardKind::Leads, BoardKind::Tasks, BoardKind::Tickets];

    pub fn label(&self) -> &'static str {
        match self {
            BoardKind::Leads => "Leads",
            BoardKind::Tasks => "Tasks",
            BoardKind::Tickets => "Tickets",
        }
    }

    /// Entity name used in backend commands and change events
    pub fn entity(&self) -> &'static str {
        match self {
            BoardKind::Leads => "lead",
            BoardKind::Tasks => "task",
            BoardKind::Tickets => "ticket",
        }
    }

    pub fn from_entity(entity: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.entity() == entity)
    }

    /// Position in `ALL`
    pub fn index(&self) -> usize {
        match self {
            BoardKind::Leads => 0,
            BoardKind::Tasks => 1,
            BoardKind::Tickets => 2,
        }
    }

    pub fn list_command(&self) -> String {
        format!("list_{}s", self.entity())
    }

    pub fn update_status_command(&self) -> String {
        format!("update_{}_status", self.entity())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Lead {
    pub id: u32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: String,
    pub source: Option<String>,
    pub value: f64,
    pub assigned_to: Option<u32>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<u32>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub client_id: u32,
    pub assigned_to: Option<u32>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// Payload of the backend `crm-changed` event
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CrmChanged {
    pub entity: String,
    pub action: String,
    pub id: u32,
}
