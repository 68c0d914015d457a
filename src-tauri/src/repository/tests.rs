//! Repository Integration Tests
//!
//! Tests for the lead/task/ticket repositories with in-memory SQLite.

#[cfg(test)]
mod tests {
    use crate::domain::{
        DomainError, Lead, LeadStatus, Task, TaskPriority, TaskStatus, Ticket, TicketStatus,
    };
    use crate::repository::{
        init_db, seed_demo_data, DbState, LeadRepository, Repository, SharedConn, StatusRepository,
        TaskRepository, TicketRepository,
    };
    use std::path::PathBuf;

    async fn setup_test_db() -> SharedConn {
        // Use in-memory database for tests
        let db_path = PathBuf::from(":memory:");
        let db_state = init_db(&db_path).await.expect("Failed to init test DB");
        db_state.conn
    }

    #[tokio::test]
    async fn test_create_lead() {
        let repo = LeadRepository::new(setup_test_db().await);

        let mut lead = Lead::new(0, "Ada Brooks".to_string());
        lead.email = Some("ada@northwind.com".to_string());
        lead.value = 4500.0;
        let created = repo.create(&lead).await.expect("Failed to create");

        assert!(created.id > 0);
        assert_eq!(created.name, "Ada Brooks");
        assert_eq!(created.status, LeadStatus::New);
        assert!(created.created_at.is_some());
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let repo = LeadRepository::new(setup_test_db().await);

        let err = repo.create(&Lead::new(0, "".to_string())).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = TaskRepository::new(setup_test_db().await);

        repo.create(&Task::new(0, "First".to_string())).await.unwrap();
        repo.create(&Task::new(0, "Second".to_string())).await.unwrap();

        let tasks = repo.list().await.expect("List failed");
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_update_task() {
        let repo = TaskRepository::new(setup_test_db().await);

        let mut created = repo.create(&Task::new(0, "Original".to_string())).await.unwrap();
        created.title = "Updated".to_string();
        created.priority = TaskPriority::High;
        created.due_date = Some("2024-06-30".to_string());

        let updated = repo.update(&created).await.expect("Update failed");
        assert_eq!(updated.title, "Updated");
        assert_eq!(updated.priority, TaskPriority::High);
        assert_eq!(updated.due_date.as_deref(), Some("2024-06-30"));
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let repo = TaskRepository::new(setup_test_db().await);

        let ghost = Task::new(99, "Ghost".to_string());
        let err = repo.update(&ghost).await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("task 99".to_string()));
    }

    #[tokio::test]
    async fn test_delete_ticket() {
        let repo = TicketRepository::new(setup_test_db().await);

        let created = repo.create(&Ticket::new(0, "Broken export".to_string(), 3)).await.unwrap();
        repo.delete(created.id).await.expect("Delete failed");

        let found = repo.find_by_id(created.id).await.expect("Find failed");
        assert!(found.is_none());
        assert!(matches!(repo.delete(created.id).await, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ticket_requires_client() {
        let repo = TicketRepository::new(setup_test_db().await);

        let err = repo.create(&Ticket::new(0, "No client".to_string(), 0)).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_update_status_returns_canonical_row() {
        let repo = LeadRepository::new(setup_test_db().await);
        let created = repo.create(&Lead::new(0, "Noah Kim".to_string())).await.unwrap();

        let moved = repo.update_status(created.id, "proposal sent").await.expect("Status update failed");
        assert_eq!(moved.status, LeadStatus::ProposalSent);
        assert_eq!(moved.name, "Noah Kim");

        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeadStatus::ProposalSent);
    }

    #[tokio::test]
    async fn test_update_status_errors() {
        let conn = setup_test_db().await;
        let tickets = TicketRepository::new(conn.clone());
        let created = tickets.create(&Ticket::new(0, "Slow".to_string(), 1)).await.unwrap();

        let err = tickets.update_status(created.id, "ESCALATED").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        let unchanged = tickets.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, TicketStatus::Open);

        let err = tickets.update_status(404, "CLOSED").await.unwrap_err();
        assert_eq!(err, DomainError::NotFound("ticket 404".to_string()));

        // Any column may follow any other
        let tasks = TaskRepository::new(conn);
        let task = tasks.create(&Task::new(0, "Ship".to_string())).await.unwrap();
        let done = tasks.update_status(task.id, "DONE").await.unwrap();
        let back = tasks.update_status(done.id, "TODO").await.unwrap();
        assert_eq!(back.status, TaskStatus::Todo);
    }

    #[tokio::test]
    async fn test_unknown_stored_status_reads_as_default() {
        let conn = setup_test_db().await;
        {
            let guard = conn.lock().await;
            let db = guard.as_ref().unwrap();
            db.execute("INSERT INTO leads (name, status) VALUES ('Legacy', 'ARCHIVED')", [])
                .unwrap();
            db.execute(
                "INSERT INTO tasks (title, priority, status) VALUES ('Old', 'SOMEDAY', 'BLOCKED')",
                [],
            )
            .unwrap();
        }

        let leads = LeadRepository::new(conn.clone()).list().await.expect("legacy row should load");
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].status, LeadStatus::New);

        let tasks = TaskRepository::new(conn).list().await.expect("legacy row should load");
        assert_eq!(tasks[0].status, TaskStatus::Todo);
        assert_eq!(tasks[0].priority, TaskPriority::default());
    }

    #[tokio::test]
    async fn test_uninitialized_db() {
        let repo = LeadRepository::new(DbState::new().conn);

        let err = repo.list().await.unwrap_err();
        assert_eq!(err, DomainError::Internal("Database not initialized".to_string()));
    }

    #[tokio::test]
    async fn test_file_backed_db_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.db");

        {
            let repo = LeadRepository::new(init_db(&path).await.unwrap().conn);
            repo.create(&Lead::new(0, "Persisted".to_string())).await.unwrap();
        }

        let repo = LeadRepository::new(init_db(&path).await.unwrap().conn);
        let leads = repo.list().await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].name, "Persisted");
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_tables() {
        let conn = setup_test_db().await;
        let tasks = TaskRepository::new(conn.clone());
        tasks.create(&Task::new(0, "Existing".to_string())).await.unwrap();

        seed_demo_data(conn.clone()).await.expect("Seed failed");
        seed_demo_data(conn.clone()).await.expect("Second seed failed");

        assert_eq!(tasks.list().await.unwrap().len(), 1);
        let leads = LeadRepository::new(conn.clone()).list().await.unwrap();
        assert_eq!(leads.len(), 7);
        assert!(leads.iter().any(|l| l.status == LeadStatus::ProposalSent));
        assert_eq!(TicketRepository::new(conn).list().await.unwrap().len(), 5);
    }
}
