//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod db;
mod lead_repo;
mod task_repo;
mod ticket_repo;
mod seed;

#[cfg(test)]
mod tests;

pub use traits::{Repository, StatusRepository};
pub use db::{init_db, DbState, SharedConn};
pub use lead_repo::LeadRepository;
pub use task_repo::TaskRepository;
pub use ticket_repo::TicketRepository;
pub use seed::seed_demo_data;
