//! Ticket service - CRUD over the dashboard ticket collection
//!
//! Each mutation loads the current snapshot, validates, builds the next
//! snapshot and writes it back whole. A rejected operation never writes.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::adapters::seed::sample_tickets;
use crate::domain::result::{Error, Result};
use crate::domain::ticket::{filter_tickets, generate_ticket_id, validate_title};
use crate::domain::{NewTicket, Priority, StatusFilter, Ticket, TicketPatch, TicketStatus};
use crate::ports::{slots, KeyValueStorage};

use super::snapshot::{Seed, SnapshotStore};

pub struct TicketService {
    store: SnapshotStore<Ticket>,
}

impl TicketService {
    /// `seed_samples` controls whether a fresh slot starts with sample tickets
    pub fn new(storage: Arc<dyn KeyValueStorage>, seed_samples: bool) -> Self {
        let seed = if seed_samples {
            Seed::Sample(sample_tickets)
        } else {
            Seed::Empty
        };
        Self {
            store: SnapshotStore::new(storage, slots::TICKETS, seed),
        }
    }

    pub fn store(&self) -> &SnapshotStore<Ticket> {
        &self.store
    }

    /// Tickets matching `filter`, in insertion order
    pub fn list(&self, filter: StatusFilter<TicketStatus>) -> Result<Vec<Ticket>> {
        let tickets = self.store.load()?;
        Ok(filter_tickets(&tickets, filter))
    }

    pub fn get(&self, id: &str) -> Result<Ticket> {
        self.store
            .load()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found(format!("ticket {}", id)))
    }

    /// Create an open ticket with a fresh id
    pub fn create(&self, input: NewTicket) -> Result<Ticket> {
        validate_title(&input.title, None)?;

        let mut tickets = self.store.load()?;
        let id = loop {
            let candidate = generate_ticket_id();
            if !tickets.iter().any(|t| t.id == candidate) {
                break candidate;
            }
        };

        let ticket = Ticket::new(id, input, Utc::now());
        tickets.push(ticket.clone());
        self.store.save(&tickets)?;
        Ok(ticket)
    }

    /// Replace any of title, description, status and priority
    ///
    /// `id` and `created_at` are never touched; `updated_at` moves forward.
    pub fn update(&self, id: &str, patch: TicketPatch) -> Result<Ticket> {
        let mut tickets = self.store.load()?;
        let existing = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::not_found(format!("ticket {}", id)))?;

        let mut updated = existing.clone();
        updated.apply(patch, Utc::now());
        updated.validate()?;

        *existing = updated.clone();
        self.store.save(&tickets)?;
        Ok(updated)
    }

    /// Remove a ticket; returns whether anything was removed
    ///
    /// Deleting a missing id is a successful no-op.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut tickets = self.store.load()?;
        let before = tickets.len();
        tickets.retain(|t| t.id != id);

        if tickets.len() == before {
            return Ok(false);
        }
        self.store.save(&tickets)?;
        Ok(true)
    }

    /// Per-status and per-priority counts for the dashboard
    pub fn summary(&self) -> Result<TicketSummary> {
        let tickets = self.store.load()?;
        Ok(TicketSummary::from_tickets(&tickets))
    }
}

/// Counts shown on the dashboard statistics cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub low_priority: usize,
}

impl TicketSummary {
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        tickets.iter().fold(
            Self {
                total: tickets.len(),
                ..Self::default()
            },
            |mut acc, t| {
                match t.status {
                    TicketStatus::Open => acc.open += 1,
                    TicketStatus::InProgress => acc.in_progress += 1,
                    TicketStatus::Closed => acc.closed += 1,
                }
                match t.priority {
                    Priority::High => acc.high_priority += 1,
                    Priority::Medium => acc.medium_priority += 1,
                    Priority::Low => acc.low_priority += 1,
                }
                acc
            },
        )
    }
}
