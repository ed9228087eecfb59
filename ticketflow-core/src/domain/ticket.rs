//! Ticket domain model (dashboard context)
//!
//! Statuses here use hyphenated names (`in-progress`). The standalone board
//! keeps its own enumeration in [`super::board`]; the two are never mixed.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::filter::StatusFilter;
use super::result::{Error, Result};

/// Length of generated ticket ids
pub const TICKET_ID_LEN: usize = 9;

/// Ticket priority, shared by both ticket contexts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Display label, e.g. "High Priority"
    pub fn label(&self) -> String {
        let name = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        format!("{} Priority", name)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::validation(format!("invalid priority: {}", other))),
        }
    }
}

/// Dashboard ticket status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Open,
        TicketStatus::InProgress,
        TicketStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TicketStatus::Open => "Open",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "open" => Ok(TicketStatus::Open),
            "in-progress" => Ok(TicketStatus::InProgress),
            "closed" => Ok(TicketStatus::Closed),
            other => Err(Error::validation(format!("invalid status: {}", other))),
        }
    }
}

/// A support ticket as persisted in the `tickets` slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating a ticket
#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl NewTicket {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Replaceable fields of an existing ticket; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
    }
}

impl Ticket {
    /// Build a fresh open ticket stamped with `now`
    pub fn new(id: impl Into<String>, input: NewTicket, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: input.title,
            description: input.description,
            status: TicketStatus::Open,
            priority: input.priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch and bump `updated_at`
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply(&mut self, patch: TicketPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        self.updated_at = now.max(self.updated_at);
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title, None)
    }
}

/// Tickets matching `filter`, in collection order
pub fn filter_tickets(tickets: &[Ticket], filter: StatusFilter<TicketStatus>) -> Vec<Ticket> {
    filter.apply(tickets, |t| &t.status)
}

/// Title must be non-blank and, when bounded, at most `max_len` characters
pub fn validate_title(title: &str, max_len: Option<usize>) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::validation("title required"));
    }
    if let Some(max) = max_len {
        if title.chars().count() > max {
            return Err(Error::validation(format!(
                "title must be at most {} characters",
                max
            )));
        }
    }
    Ok(())
}

/// Random lowercase base-36 id
pub fn generate_ticket_id() -> String {
    let mut rng = rand::thread_rng();
    (0..TICKET_ID_LEN)
        .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ticket(id: &str, status: TicketStatus) -> Ticket {
        let mut t = Ticket::new(id, NewTicket::new(format!("Ticket {}", id)), Utc::now());
        t.status = status;
        t
    }

    #[test]
    fn test_status_serde_uses_hyphen() {
        let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let parsed: TicketStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, TicketStatus::InProgress);
    }

    #[test]
    fn test_status_rejects_underscore_variant() {
        assert!("in_progress".parse::<TicketStatus>().is_err());
        assert!(serde_json::from_str::<TicketStatus>("\"in_progress\"").is_err());
    }

    #[test]
    fn test_ticket_json_field_names() {
        let t = ticket("abc", TicketStatus::Open);
        let value = serde_json::to_value(&t).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert_eq!(value["priority"], "medium");
    }

    #[test]
    fn test_new_ticket_is_open() {
        let now = Utc::now();
        let t = Ticket::new(
            "x1",
            NewTicket::new("Fix login bug").with_priority(Priority::High),
            now,
        );
        assert_eq!(t.status, TicketStatus::Open);
        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.created_at, t.updated_at);
    }

    #[test]
    fn test_apply_keeps_updated_at_monotonic() {
        let now = Utc::now();
        let mut t = Ticket::new("x1", NewTicket::new("A"), now);
        t.apply(
            TicketPatch {
                status: Some(TicketStatus::Closed),
                ..Default::default()
            },
            now - Duration::seconds(30),
        );
        assert_eq!(t.status, TicketStatus::Closed);
        assert_eq!(t.updated_at, now);
        assert_eq!(t.created_at, now);
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Fix login bug", None).is_ok());
        assert!(matches!(validate_title("   ", None), Err(Error::Validation(_))));
        assert!(validate_title(&"a".repeat(100), Some(100)).is_ok());
        assert!(validate_title(&"a".repeat(101), Some(100)).is_err());
    }

    #[test]
    fn test_filter_all_preserves_order() {
        let tickets = vec![
            ticket("1", TicketStatus::Closed),
            ticket("2", TicketStatus::Open),
            ticket("3", TicketStatus::InProgress),
        ];
        assert_eq!(filter_tickets(&tickets, StatusFilter::All), tickets);

        let open = filter_tickets(&tickets, StatusFilter::Only(TicketStatus::Open));
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, "2");
    }

    #[test]
    fn test_filter_parse() {
        let all: StatusFilter<TicketStatus> = "all".parse().unwrap();
        assert_eq!(all, StatusFilter::All);
        let wip: StatusFilter<TicketStatus> = "in-progress".parse().unwrap();
        assert_eq!(wip, StatusFilter::Only(TicketStatus::InProgress));
        assert!("pending".parse::<StatusFilter<TicketStatus>>().is_err());
    }

    #[test]
    fn test_generated_id_shape() {
        let id = generate_ticket_id();
        assert_eq!(id.len(), TICKET_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }
}
