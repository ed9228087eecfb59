//! Integration tests for ticketflow-core services
//!
//! These tests run the full context against real DuckDB files in a temp
//! directory, reopening the database to check what actually persisted.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use ticketflow_core::adapters::duckdb::DuckDbStorage;
use ticketflow_core::config::Config;
use ticketflow_core::ports::{slots, KeyValueStorage};
use ticketflow_core::{
    BoardStatus, BoardTicketPatch, Error, NewBoardTicket, NewTicket, Priority, StatusFilter,
    TicketFlowContext, TicketPatch, TicketStatus,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn test_config() -> Config {
    Config {
        seed_sample_tickets: true,
        auth_delay: Duration::ZERO,
    }
}

/// Open a context over `<dir>/ticketflow.duckdb` with no auth delay
fn open_context(dir: &Path) -> TicketFlowContext {
    let storage = DuckDbStorage::new(&dir.join(ticketflow_core::STORAGE_FILE))
        .expect("Failed to open storage");
    storage.ensure_schema().expect("Failed to initialize schema");
    TicketFlowContext::with_storage(test_config(), Arc::new(storage))
}

// ============================================================================
// Session Guard
// ============================================================================

#[test]
fn test_protected_operation_without_session_redirects() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = open_context(temp_dir.path());

    match ctx.session_guard.require_session() {
        Err(Error::Unauthorized { redirect }) => assert_eq!(redirect, "/auth/login"),
        other => panic!("expected redirect to login, got {:?}", other),
    }
}

#[tokio::test]
async fn test_session_survives_reopen_and_logout_clears_it() {
    let temp_dir = TempDir::new().unwrap();

    {
        let ctx = open_context(temp_dir.path());
        ctx.auth_service
            .register("dev@example.com", "secret1")
            .await
            .unwrap();
        assert!(ctx.session_guard.is_authorized());
    }

    let ctx = open_context(temp_dir.path());
    let session = ctx.session_guard.current_session().unwrap().unwrap();
    assert_eq!(session.email, "dev@example.com");

    ctx.auth_service.logout().unwrap();
    drop(ctx);

    let ctx = open_context(temp_dir.path());
    assert!(ctx.session_guard.require_session().is_err());
}

// ============================================================================
// Mock Auth
// ============================================================================

#[tokio::test]
async fn test_signup_then_login_after_reopen() {
    let temp_dir = TempDir::new().unwrap();

    let user = {
        let ctx = open_context(temp_dir.path());
        let user = ctx
            .auth_service
            .register("dev@example.com", "secret1")
            .await
            .unwrap();
        ctx.auth_service.logout().unwrap();
        user
    };

    let ctx = open_context(temp_dir.path());
    let err = ctx
        .auth_service
        .login("dev@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert!(!ctx.session_guard.is_authorized());

    let session = ctx
        .auth_service
        .login("dev@example.com", "secret1")
        .await
        .unwrap();
    assert_eq!(session.id, user.id);

    let raw_users = ctx.storage.get(slots::USERS).unwrap().unwrap();
    assert!(!raw_users.contains("secret1"));
}

// ============================================================================
// Ticket Persistence
// ============================================================================

#[test]
fn test_first_run_seeds_sample_tickets() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = open_context(temp_dir.path());

    let tickets = ctx.ticket_service.list(StatusFilter::All).unwrap();
    let titles: Vec<_> = tickets.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Fix login bug", "Add dark mode", "Update documentation"]
    );
}

#[test]
fn test_ticket_lifecycle_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();

    let created = {
        let ctx = open_context(temp_dir.path());
        let ticket = ctx
            .ticket_service
            .create(
                NewTicket::new("Fix login bug")
                    .with_description("Users cannot sign in with SSO")
                    .with_priority(Priority::High),
            )
            .unwrap();
        ctx.ticket_service
            .update(
                &ticket.id,
                TicketPatch {
                    status: Some(TicketStatus::InProgress),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(ctx.ticket_service.delete("3").unwrap());
        ticket
    };

    let ctx = open_context(temp_dir.path());
    let reloaded = ctx.ticket_service.get(&created.id).unwrap();
    assert_eq!(reloaded.status, TicketStatus::InProgress);
    assert_eq!(reloaded.created_at, created.created_at);
    assert_eq!(reloaded.description, "Users cannot sign in with SSO");

    let all = ctx.ticket_service.list(StatusFilter::All).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|t| t.id != "3"));
}

#[test]
fn test_rejected_create_leaves_storage_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = open_context(temp_dir.path());

    ctx.ticket_service.list(StatusFilter::All).unwrap();
    let before = ctx.storage.get(slots::TICKETS).unwrap();

    assert!(ctx.ticket_service.create(NewTicket::new("   ")).is_err());
    assert!(ctx
        .board_service
        .create(NewBoardTicket::new("x".repeat(101)))
        .is_err());

    assert_eq!(ctx.storage.get(slots::TICKETS).unwrap(), before);
    assert_eq!(ctx.storage.get(slots::BOARD_TICKETS).unwrap(), None);
}

#[test]
fn test_save_of_load_is_a_no_op() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = open_context(temp_dir.path());
    let store = ctx.ticket_service.store();

    let loaded = store.load().unwrap();
    let before = ctx.storage.get(slots::TICKETS).unwrap();

    store.save(&loaded).unwrap();
    assert_eq!(ctx.storage.get(slots::TICKETS).unwrap(), before);
}

#[test]
fn test_malformed_snapshot_falls_back_to_seed() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = open_context(temp_dir.path());

    ctx.storage.set(slots::TICKETS, "not json at all").unwrap();
    let tickets = ctx.ticket_service.list(StatusFilter::All).unwrap();
    assert_eq!(tickets.len(), 3);

    // The fallback is not written back
    assert_eq!(
        ctx.storage.get(slots::TICKETS).unwrap().as_deref(),
        Some("not json at all")
    );
}

// ============================================================================
// Board
// ============================================================================

#[test]
fn test_board_is_independent_of_dashboard() {
    let temp_dir = TempDir::new().unwrap();

    let ticket = {
        let ctx = open_context(temp_dir.path());
        let ticket = ctx
            .board_service
            .create(NewBoardTicket::new("Ship release notes"))
            .unwrap();
        ctx.board_service
            .update(
                ticket.id,
                BoardTicketPatch {
                    status: Some(BoardStatus::Closed),
                    ..Default::default()
                },
            )
            .unwrap()
    };

    let ctx = open_context(temp_dir.path());
    let board = ctx.board_service.list(StatusFilter::All).unwrap();
    assert_eq!(board, vec![ticket]);

    let raw = ctx.storage.get(slots::BOARD_TICKETS).unwrap().unwrap();
    assert!(raw.contains("\"closed\""));

    let dashboard = ctx.ticket_service.list(StatusFilter::All).unwrap();
    assert!(dashboard.iter().all(|t| t.title != "Ship release notes"));
}

#[test]
fn test_board_status_uses_underscore_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = open_context(temp_dir.path());

    let ticket = ctx
        .board_service
        .create(NewBoardTicket::new("Migrate CI"))
        .unwrap();
    ctx.board_service
        .update(
            ticket.id,
            BoardTicketPatch {
                status: Some(BoardStatus::InProgress),
                ..Default::default()
            },
        )
        .unwrap();

    let raw = ctx.storage.get(slots::BOARD_TICKETS).unwrap().unwrap();
    assert!(raw.contains("\"in_progress\""));
}

// ============================================================================
// Reset and Reopen
// ============================================================================

#[tokio::test]
async fn test_reset_returns_to_first_run() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = open_context(temp_dir.path());

    ctx.auth_service
        .register("dev@example.com", "secret1")
        .await
        .unwrap();
    ctx.ticket_service.delete("1").unwrap();
    ctx.board_service
        .create(NewBoardTicket::new("Scratch"))
        .unwrap();

    ctx.reset().unwrap();

    assert!(!ctx.session_guard.is_authorized());
    assert_eq!(ctx.auth_service.user_count().unwrap(), 0);
    assert!(ctx.board_service.list(StatusFilter::All).unwrap().is_empty());
    assert_eq!(ctx.ticket_service.list(StatusFilter::All).unwrap().len(), 3);
}

#[test]
fn test_reopen_runs_no_new_migrations() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("ticketflow.duckdb");

    let first = DuckDbStorage::new(&db_path).unwrap();
    let applied = first.run_migrations().unwrap();
    assert!(!applied.applied.is_empty());
    drop(first);

    let second = DuckDbStorage::new(&db_path).unwrap();
    let result = second.run_migrations().unwrap();
    assert!(result.applied.is_empty());
    assert!(result.already_applied > 0);
}

#[test]
fn test_context_new_creates_data_dir() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("nested").join("ticketflow");

    let ctx = TicketFlowContext::new(&data_dir).unwrap();
    assert!(data_dir.join("ticketflow.duckdb").exists());
    assert!(ctx.storage.keys().unwrap().is_empty());
}
