//! Demo Data
//!
//! Fills empty tables with a small sample pipeline so every board column
//! has something to drag.

use tracing::info;

use crate::domain::{
    DomainResult, Lead, LeadStatus, Task, TaskPriority, TaskStatus, Ticket, TicketPriority,
    TicketStatus,
};
use super::db::SharedConn;
use super::traits::Repository;
use super::{LeadRepository, TaskRepository, TicketRepository};

const LEADS: &[(&str, &str, LeadStatus, f64)] = &[
    ("Ada Brooks", "Northwind", LeadStatus::New, 4_500.0),
    ("Liam Carter", "Globex", LeadStatus::New, 12_000.0),
    ("Maya Singh", "Initech", LeadStatus::Contacted, 7_800.0),
    ("Noah Kim", "Umbrella", LeadStatus::Qualified, 21_000.0),
    ("Olivia Park", "Hooli", LeadStatus::ProposalSent, 35_000.0),
    ("Ethan Diaz", "Vandelay", LeadStatus::Won, 9_900.0),
    ("Zoe Martin", "Stark Ind.", LeadStatus::Lost, 15_000.0),
];

const TASKS: &[(&str, TaskPriority, TaskStatus)] = &[
    ("Send proposal to Hooli", TaskPriority::High, TaskStatus::Todo),
    ("Follow up with Initech", TaskPriority::Medium, TaskStatus::Todo),
    ("Prepare Q3 forecast", TaskPriority::Low, TaskStatus::InProgress),
    ("Update CRM contacts", TaskPriority::Medium, TaskStatus::Done),
];

const TICKETS: &[(&str, u32, TicketPriority, TicketStatus)] = &[
    ("Cannot export invoices", 1, TicketPriority::High, TicketStatus::Open),
    ("Password reset email missing", 2, TicketPriority::Urgent, TicketStatus::Open),
    ("Dashboard loads slowly", 3, TicketPriority::Medium, TicketStatus::InProgress),
    ("Typo on pricing page", 1, TicketPriority::Low, TicketStatus::Resolved),
    ("Duplicate client records", 4, TicketPriority::Medium, TicketStatus::Closed),
];

/// Insert the sample rows into any table that is still empty
pub async fn seed_demo_data(conn: SharedConn) -> DomainResult<()> {
    let leads = LeadRepository::new(conn.clone());
    if leads.list().await?.is_empty() {
        for (name, company, status, value) in LEADS {
            let mut lead = Lead::new(0, name.to_string());
            lead.company = Some(company.to_string());
            lead.status = *status;
            lead.value = *value;
            lead.source = Some("demo".to_string());
            leads.create(&lead).await?;
        }
        info!(count = LEADS.len(), "seeded demo leads");
    }

    let tasks = TaskRepository::new(conn.clone());
    if tasks.list().await?.is_empty() {
        for (title, priority, status) in TASKS {
            let mut task = Task::new(0, title.to_string());
            task.priority = *priority;
            task.status = *status;
            tasks.create(&task).await?;
        }
        info!(count = TASKS.len(), "seeded demo tasks");
    }

    let tickets = TicketRepository::new(conn);
    if tickets.list().await?.is_empty() {
        for (subject, client_id, priority, status) in TICKETS {
            let mut ticket = Ticket::new(0, subject.to_string(), *client_id);
            ticket.priority = *priority;
            ticket.status = *status;
            tickets.create(&ticket).await?;
        }
        info!(count = TICKETS.len(), "seeded demo tickets");
    }

    Ok(())
}
