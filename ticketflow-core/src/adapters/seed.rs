//! Sample tickets written on first run
//!
//! Mirrors the three sample tickets the dashboard ships with so a fresh
//! install has something to look at.

use chrono::{DateTime, Utc};

use crate::domain::{Priority, Ticket, TicketStatus};

/// The default dashboard collection, stamped with `now`
pub fn sample_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    let sample = |id: &str, title: &str, description: &str, status, priority| Ticket {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        priority,
        created_at: now,
        updated_at: now,
    };

    vec![
        sample(
            "1",
            "Fix login bug",
            "Users unable to login with special characters",
            TicketStatus::Open,
            Priority::High,
        ),
        sample(
            "2",
            "Add dark mode",
            "Implement dark mode theme",
            TicketStatus::InProgress,
            Priority::Medium,
        ),
        sample(
            "3",
            "Update documentation",
            "Update API documentation",
            TicketStatus::Closed,
            Priority::Low,
        ),
    ]
}
