//! Task Entity

use serde::{Deserialize, Serialize};

use super::entity::{require_text, DomainError, DomainResult, Entity};
use super::status::{TaskPriority, TaskStatus};

/// A to-do item assigned to a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    pub description: Option<String>,
    /// Due date as given by the client (ISO 8601 date or date-time)
    pub due_date: Option<String>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assigned_to: Option<u32>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl Task {
    pub fn new(id: u32, title: String) -> Self {
        Self {
            id,
            title,
            description: None,
            due_date: None,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            assigned_to: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_text("title", &self.title)?;
        if let Some(due) = &self.due_date {
            validate_date(due)?;
        }
        Ok(())
    }
}

impl Entity for Task {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 date-time
fn validate_date(value: &str) -> DomainResult<()> {
    let ok = chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(value).is_ok()
        || chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok();
    if ok {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!("invalid due date '{}'", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_date_formats() {
        let mut task = Task::new(0, "Call back".to_string());
        for ok in ["2024-05-01", "2024-05-01T09:30:00Z", "2024-05-01T09:30"] {
            task.due_date = Some(ok.to_string());
            assert!(task.validate().is_ok(), "{}", ok);
        }
        task.due_date = Some("next tuesday".to_string());
        assert!(task.validate().is_err());
    }
}
