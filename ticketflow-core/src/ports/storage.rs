//! Key-value storage port
//!
//! TicketFlow persists everything as whole JSON snapshots in named slots.
//! Implementations only need get/set/remove of strings by key.

use crate::domain::result::Result;

/// Slot names used by the services
pub mod slots {
    /// Dashboard tickets (`in-progress` statuses, string ids)
    pub const TICKETS: &str = "tickets";
    /// Standalone board tickets (`in_progress` statuses, integer ids)
    pub const BOARD_TICKETS: &str = "ticketapp_tickets";
    /// Registered users
    pub const USERS: &str = "ticketapp_users";
    /// Session marker
    pub const SESSION: &str = "ticketapp_session";

    /// Slots holding ticket data (cleared by `tf reset`)
    pub const TICKET_SLOTS: [&str; 2] = [TICKETS, BOARD_TICKETS];
}

/// Durable key-value storage abstraction
///
/// A `set` replaces the whole value of a slot. There is no merge and no
/// cross-slot transaction; a single writer is assumed.
pub trait KeyValueStorage: Send + Sync {
    /// Read a slot, `None` if it was never written or has been removed
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot; removing a missing slot is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Names of all slots currently present
    fn keys(&self) -> Result<Vec<String>>;
}
