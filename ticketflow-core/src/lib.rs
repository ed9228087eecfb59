//! TicketFlow Core - business logic for local ticket tracking
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: tickets, board tickets, users, filters, errors
//! - **ports**: the [`ports::KeyValueStorage`] slot interface
//! - **services**: snapshot persistence, session guard, ticket/board CRUD, mock auth
//! - **adapters**: DuckDB and in-memory storage, sample seed data

pub mod adapters;
pub mod config;
pub mod domain;
pub mod migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::duckdb::DuckDbStorage;
use config::Config;
use ports::{slots, KeyValueStorage};
use services::*;

pub use domain::result::{Error, OperationResult, LOGIN_ROUTE};
pub use domain::{
    BoardStatus, BoardTicket, BoardTicketPatch, NewBoardTicket, NewTicket, Priority, Session,
    StatusFilter, Ticket, TicketPatch, TicketStatus, User,
};
pub use services::{EntryPoint, LogEvent, LoggingService, TicketSummary};

/// File name of the slot database inside the data directory
pub const STORAGE_FILE: &str = "ticketflow.duckdb";

/// Main context for TicketFlow operations
///
/// Holds the configuration, the shared storage handle and every service
/// built on it. All services see the same storage, so a session written by
/// `auth_service` is immediately visible to `session_guard`.
pub struct TicketFlowContext {
    pub config: Config,
    pub storage: Arc<dyn KeyValueStorage>,
    pub session_guard: SessionGuard,
    pub ticket_service: TicketService,
    pub board_service: BoardService,
    pub auth_service: AuthService,
}

impl TicketFlowContext {
    /// Open the context rooted at `data_dir`, creating the database on first use
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let config = Config::load(data_dir)?;

        let storage = Arc::new(DuckDbStorage::new(&data_dir.join(STORAGE_FILE))?);
        storage.ensure_schema()?;

        Ok(Self::with_storage(config, storage))
    }

    /// Build the services over an arbitrary storage backend
    pub fn with_storage(config: Config, storage: Arc<dyn KeyValueStorage>) -> Self {
        let session_guard = SessionGuard::new(Arc::clone(&storage));
        let ticket_service = TicketService::new(Arc::clone(&storage), config.seed_sample_tickets);
        let board_service = BoardService::new(Arc::clone(&storage));
        let auth_service = AuthService::new(Arc::clone(&storage)).with_delay(config.auth_delay);

        Self {
            config,
            storage,
            session_guard,
            ticket_service,
            board_service,
            auth_service,
        }
    }

    /// Drop every ticket collection, every user and the session
    ///
    /// The next dashboard load reseeds according to the config.
    pub fn reset(&self) -> domain::result::Result<()> {
        for slot in slots::TICKET_SLOTS {
            self.storage.remove(slot)?;
        }
        self.storage.remove(slots::USERS)?;
        self.storage.remove(slots::SESSION)
    }
}
