//! Board Bindings
//!
//! Per-entity column layout and card face. Everything else about a board
//! (grouping, drag, commit, rollback) comes from `board_sync`.

use board_sync::{BoardConfig, BoardItem, ColumnDef, ConfigError};
use serde::de::DeserializeOwned;

use crate::models::{BoardKind, Lead, Task, Ticket};

// ========================
// Column Layouts
// ========================

const LEAD_COLUMNS: &[(&str, &str, &str)] = &[
    ("NEW", "New", "#3b82f6"),
    ("CONTACTED", "Contacted", "#eab308"),
    ("QUALIFIED", "Qualified", "#ec4899"),
    ("PROPOSAL SENT", "Proposal Sent", "#8b5cf6"),
    ("WON", "Won", "#22c55e"),
    ("LOST", "Lost", "#ef4444"),
];

const TASK_COLUMNS: &[(&str, &str, &str)] = &[
    ("TODO", "To Do", "#3b82f6"),
    ("IN_PROGRESS", "In Progress", "#eab308"),
    ("DONE", "Done", "#22c55e"),
];

const TICKET_COLUMNS: &[(&str, &str, &str)] = &[
    ("OPEN", "Open", "#3b82f6"),
    ("IN_PROGRESS", "In Progress", "#eab308"),
    ("RESOLVED", "Resolved", "#22c55e"),
    ("CLOSED", "Closed", "#64748b"),
];

impl BoardKind {
    /// Column layout and default column for this board
    pub fn config(&self) -> Result<BoardConfig, ConfigError> {
        let (columns, default_key) = match self {
            BoardKind::Leads => (LEAD_COLUMNS, "NEW"),
            BoardKind::Tasks => (TASK_COLUMNS, "TODO"),
            BoardKind::Tickets => (TICKET_COLUMNS, "OPEN"),
        };
        let defs = columns
            .iter()
            .map(|(key, title, color)| ColumnDef::new(key, title, color))
            .collect();
        BoardConfig::new(self.entity(), defs, default_key)
    }
}

// ========================
// Entity Bindings
// ========================

/// A backend entity that can be shown as a card on a board
pub trait BoardEntity:
    BoardItem<Id = u32> + DeserializeOwned + PartialEq + Send + Sync + 'static
{
    const KIND: BoardKind;

    /// Card heading
    fn card_title(&self) -> String;
    /// Secondary line (company, due date, client)
    fn card_detail(&self) -> Option<String>;
    /// Small tag in the card corner (value, priority)
    fn card_badge(&self) -> Option<String>;
}

impl BoardItem for Lead {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

impl BoardEntity for Lead {
    const KIND: BoardKind = BoardKind::Leads;

    fn card_title(&self) -> String {
        self.name.clone()
    }

    fn card_detail(&self) -> Option<String> {
        self.company.clone().or_else(|| self.email.clone())
    }

    fn card_badge(&self) -> Option<String> {
        (self.value > 0.0).then(|| format_currency(self.value))
    }
}

impl BoardItem for Task {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

impl BoardEntity for Task {
    const KIND: BoardKind = BoardKind::Tasks;

    fn card_title(&self) -> String {
        self.title.clone()
    }

    fn card_detail(&self) -> Option<String> {
        // Date part only
        self.due_date
            .as_ref()
            .map(|d| format!("Due {}", d.split('T').next().unwrap_or(d)))
    }

    fn card_badge(&self) -> Option<String> {
        Some(self.priority.clone())
    }
}

impl BoardItem for Ticket {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

impl BoardEntity for Ticket {
    const KIND: BoardKind = BoardKind::Tickets;

    fn card_title(&self) -> String {
        self.subject.clone()
    }

    fn card_detail(&self) -> Option<String> {
        Some(format!("Client #{}", self.client_id))
    }

    fn card_badge(&self) -> Option<String> {
        Some(self.priority.clone())
    }
}

/// `12500.0` -> `$12,500`
fn format_currency(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if whole < 0 {
        format!("-${}", out)
    } else {
        format!("${}", out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_sync::Board;

    fn lead(id: u32, status: &str) -> Lead {
        Lead {
            id,
            name: format!("Lead {}", id),
            email: None,
            phone: None,
            company: Some("Acme".to_string()),
            status: status.to_string(),
            source: None,
            value: 12_500.0,
            assigned_to: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_every_board_config_is_valid() {
        for kind in BoardKind::ALL {
            let config = kind.config().expect("board config should be valid");
            assert_eq!(config.name(), kind.entity());
        }
        let leads = BoardKind::Leads.config().unwrap();
        let keys: Vec<_> = leads.columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["NEW", "CONTACTED", "QUALIFIED", "PROPOSAL SENT", "WON", "LOST"]);
        assert_eq!(leads.default_column().key, "NEW");
    }

    #[test]
    fn test_lead_grouping_matches_backend_values() {
        let config = BoardKind::Leads.config().unwrap();
        let items = vec![lead(1, "PROPOSAL SENT"), lead(2, "won"), lead(3, "ARCHIVED")];
        let board = Board::group(&config, &items);

        assert_eq!(board.ids("PROPOSAL SENT"), vec![1]);
        assert_eq!(board.ids("WON"), vec![2]);
        assert_eq!(board.ids("NEW"), vec![3]);
    }

    #[test]
    fn test_card_faces() {
        let l = lead(1, "NEW");
        assert_eq!(l.card_title(), "Lead 1");
        assert_eq!(l.card_detail().as_deref(), Some("Acme"));
        assert_eq!(l.card_badge().as_deref(), Some("$12,500"));

        let task = Task {
            id: 4,
            title: "Call".to_string(),
            description: None,
            due_date: Some("2024-05-01T09:30:00Z".to_string()),
            priority: "HIGH".to_string(),
            status: "TODO".to_string(),
            assigned_to: None,
            created_at: None,
            updated_at: None,
        };
        assert_eq!(task.card_detail().as_deref(), Some("Due 2024-05-01"));
        assert_eq!(task.card_badge().as_deref(), Some("HIGH"));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1_000.0), "$1,000");
        assert_eq!(format_currency(1_234_567.4), "$1,234,567");
    }
}
