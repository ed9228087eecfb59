//! Board ticket domain model (standalone ticket page)
//!
//! A separate bounded context from [`super::ticket`]: integer ids, an
//! underscored `in_progress` status, a bounded title, and no `updatedAt`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::StatusFilter;
use super::result::{Error, Result};
use super::ticket::{validate_title, Priority};

/// Longest title the board accepts
pub const BOARD_TITLE_MAX_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardStatus {
    Open,
    InProgress,
    Closed,
}

impl BoardStatus {
    pub const ALL: [BoardStatus; 3] = [
        BoardStatus::Open,
        BoardStatus::InProgress,
        BoardStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardStatus::Open => "open",
            BoardStatus::InProgress => "in_progress",
            BoardStatus::Closed => "closed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BoardStatus::Open => "Open",
            BoardStatus::InProgress => "In Progress",
            BoardStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BoardStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "open" => Ok(BoardStatus::Open),
            "in_progress" => Ok(BoardStatus::InProgress),
            "closed" => Ok(BoardStatus::Closed),
            other => Err(Error::validation(format!("invalid status: {}", other))),
        }
    }
}

/// A ticket as persisted in the `ticketapp_tickets` slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardTicket {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: BoardStatus,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when creating a board ticket
#[derive(Debug, Clone, Default)]
pub struct NewBoardTicket {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl NewBoardTicket {
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

#[derive(Debug, Clone, Default)]
pub struct BoardTicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<BoardStatus>,
    pub priority: Option<Priority>,
}

impl BoardTicket {
    pub fn new(id: i64, input: NewBoardTicket, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            status: BoardStatus::Open,
            priority: input.priority,
            created_at: now,
        }
    }

    pub fn apply(&mut self, patch: BoardTicketPatch) {
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
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title, Some(BOARD_TITLE_MAX_LEN))
    }
}

pub fn filter_board(tickets: &[BoardTicket], filter: StatusFilter<BoardStatus>) -> Vec<BoardTicket> {
    filter.apply(tickets, |t| &t.status)
}

/// Millisecond timestamp id, bumped past every id already taken
///
/// Fails with a storage error when the largest stored id is `i64::MAX`.
pub fn next_timestamp_id(now: DateTime<Utc>, taken: impl IntoIterator<Item = i64>) -> Result<i64> {
    let candidate = now.timestamp_millis();
    match taken.into_iter().max() {
        Some(max) if max >= candidate => max
            .checked_add(1)
            .ok_or_else(|| Error::storage(format!("no id left after {}", max))),
        _ => Ok(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_uses_underscore() {
        let json = serde_json::to_string(&BoardStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert!("in-progress".parse::<BoardStatus>().is_err());
    }

    #[test]
    fn test_title_bound() {
        let now = Utc::now();
        let ok = BoardTicket::new(1, NewBoardTicket::new("a".repeat(100)), now);
        assert!(ok.validate().is_ok());

        let too_long = BoardTicket::new(2, NewBoardTicket::new("a".repeat(101)), now);
        let err = too_long.validate().unwrap_err();
        assert!(err.to_string().contains("at most 100"));
    }

    #[test]
    fn test_next_timestamp_id() {
        let now = Utc::now();
        let ms = now.timestamp_millis();
        assert_eq!(next_timestamp_id(now, Vec::new()).unwrap(), ms);
        assert_eq!(next_timestamp_id(now, vec![ms]).unwrap(), ms + 1);
        assert_eq!(next_timestamp_id(now, vec![ms - 10]).unwrap(), ms);
    }

    #[test]
    fn test_next_timestamp_id_exhausted() {
        let err = next_timestamp_id(Utc::now(), vec![i64::MAX]).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
    }

    #[test]
    fn test_patch_changes_status() {
        let mut t = BoardTicket::new(1, NewBoardTicket::new("Write docs"), Utc::now());
        t.apply(BoardTicketPatch {
            status: Some(BoardStatus::InProgress),
            ..Default::default()
        });
        assert_eq!(t.status, BoardStatus::InProgress);
        assert_eq!(t.title, "Write docs");
    }
}
