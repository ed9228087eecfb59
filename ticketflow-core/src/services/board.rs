//! Board service - CRUD over the standalone ticket board
//!
//! Same snapshot discipline as [`super::TicketService`], with the board's
//! own schema: integer ids, bounded titles, no seed data.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::board::{filter_board, next_timestamp_id, BOARD_TITLE_MAX_LEN};
use crate::domain::result::{Error, Result};
use crate::domain::ticket::validate_title;
use crate::domain::{BoardStatus, BoardTicket, BoardTicketPatch, NewBoardTicket, StatusFilter};
use crate::ports::{slots, KeyValueStorage};

use super::snapshot::{Seed, SnapshotStore};

pub struct BoardService {
    store: SnapshotStore<BoardTicket>,
}

impl BoardService {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            store: SnapshotStore::new(storage, slots::BOARD_TICKETS, Seed::Empty),
        }
    }

    pub fn store(&self) -> &SnapshotStore<BoardTicket> {
        &self.store
    }

    pub fn list(&self, filter: StatusFilter<BoardStatus>) -> Result<Vec<BoardTicket>> {
        let tickets = self.store.load()?;
        Ok(filter_board(&tickets, filter))
    }

    pub fn get(&self, id: i64) -> Result<BoardTicket> {
        self.store
            .load()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found(format!("board ticket {}", id)))
    }

    pub fn create(&self, input: NewBoardTicket) -> Result<BoardTicket> {
        validate_title(&input.title, Some(BOARD_TITLE_MAX_LEN))?;

        let mut tickets = self.store.load()?;
        let now = Utc::now();
        let id = next_timestamp_id(now, tickets.iter().map(|t| t.id))?;

        let ticket = BoardTicket::new(id, input, now);
        tickets.push(ticket.clone());
        self.store.save(&tickets)?;
        Ok(ticket)
    }

    pub fn update(&self, id: i64, patch: BoardTicketPatch) -> Result<BoardTicket> {
        let mut tickets = self.store.load()?;
        let existing = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found(format!("board ticket {}", id)))?;

        let mut updated = existing.clone();
        updated.apply(patch);
        updated.validate()?;

        *existing = updated.clone();
        self.store.save(&tickets)?;
        Ok(updated)
    }

    /// Idempotent: deleting a missing id returns `Ok(false)`
    pub fn delete(&self, id: i64) -> Result<bool> {
        let mut tickets = self.store.load()?;
        let before = tickets.len();
        tickets.retain(|t| t.id != id);

        if tickets.len() == before {
            return Ok(false);
        }
        self.store.save(&tickets)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStorage;
    use crate::domain::Priority;

    fn service() -> BoardService {
        BoardService::new(Arc::new(InMemoryStorage::new()))
    }

    #[test]
    fn test_board_starts_empty() {
        assert!(service().list(StatusFilter::All).unwrap().is_empty());
    }

    #[test]
    fn test_create_assigns_unique_ids() {
        let service = service();
        let a = service.create(NewBoardTicket::new("First")).unwrap();
        let b = service.create(NewBoardTicket::new("Second")).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.status, BoardStatus::Open);
        assert_eq!(
            service.list(StatusFilter::All).unwrap(),
            vec![a.clone(), b.clone()]
        );
    }

    #[test]
    fn test_title_length_bound() {
        let service = service();
        let err = service
            .create(NewBoardTicket::new("x".repeat(101)))
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(service.list(StatusFilter::All).unwrap().is_empty());
    }

    #[test]
    fn test_update_status_and_priority() {
        let service = service();
        let ticket = service.create(NewBoardTicket::new("Triage inbox")).unwrap();

        let updated = service
            .update(
                ticket.id,
                BoardTicketPatch {
                    status: Some(BoardStatus::InProgress),
                    priority: Some(Priority::High),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.created_at, ticket.created_at);
        assert_eq!(updated.status, BoardStatus::InProgress);

        let wip = service
            .list(StatusFilter::Only(BoardStatus::InProgress))
            .unwrap();
        assert_eq!(wip, vec![updated]);
    }

    #[test]
    fn test_create_after_max_id_fails_soft() {
        let raw = format!(
            r#"[{{"id":{},"title":"A","description":"","status":"open","priority":"low","createdAt":"2024-01-01T00:00:00Z"}}]"#,
            i64::MAX
        );
        let storage = Arc::new(InMemoryStorage::with_slots([(slots::BOARD_TICKETS, raw.clone())]));
        let service = BoardService::new(storage.clone());

        let err = service.create(NewBoardTicket::new("B")).unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert_eq!(storage.get(slots::BOARD_TICKETS).unwrap(), Some(raw));
    }

    #[test]
    fn test_update_missing_and_delete_missing() {
        let service = service();
        assert!(matches!(
            service.update(42, BoardTicketPatch::default()),
            Err(Error::NotFound(_))
        ));
        assert!(!service.delete(42).unwrap());
    }
}
