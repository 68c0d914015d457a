//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! This layer has no storage or IPC dependencies.

mod entity;
mod lead;
mod status;
mod task;
mod ticket;

pub use entity::{Entity, DomainError, DomainResult};
pub use lead::Lead;
pub use status::{LeadStatus, TaskPriority, TaskStatus, TicketPriority, TicketStatus, WireValue};
pub use task::Task;
pub use ticket::Ticket;
