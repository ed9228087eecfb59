//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

pub mod board;
pub mod filter;
pub mod result;
pub mod ticket;
mod user;

pub use board::{BoardStatus, BoardTicket, BoardTicketPatch, NewBoardTicket};
pub use filter::StatusFilter;
pub use ticket::{NewTicket, Priority, Ticket, TicketPatch, TicketStatus};
pub use user::{require_credentials, validate_signup, Session, User, MIN_PASSWORD_LEN};
