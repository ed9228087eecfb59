//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! owns one feature area and talks to storage only through
//! [`crate::ports::KeyValueStorage`].

mod auth;
mod board;
pub mod credential;
pub mod logging;
pub mod migration;
mod session;
pub mod snapshot;
mod ticket;

pub use auth::{AuthService, DEFAULT_AUTH_DELAY};
pub use board::BoardService;
pub use credential::{Argon2Params, CredentialHasher};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use migration::{MigrationResult, MigrationService};
pub use session::SessionGuard;
pub use snapshot::{Seed, SnapshotStore};
pub use ticket::{TicketService, TicketSummary};
