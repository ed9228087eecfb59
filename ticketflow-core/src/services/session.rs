//! Session guard - gates protected operations on the session marker
//!
//! The marker is a plain `{email, id}` blob. Its presence is the whole
//! check: no expiry, no signature, no server round trip.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::Session;
use crate::ports::{slots, KeyValueStorage};

pub struct SessionGuard {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionGuard {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// True when a session marker is present
    ///
    /// A storage failure counts as "not logged in".
    pub fn is_authorized(&self) -> bool {
        matches!(self.storage.get(slots::SESSION), Ok(Some(_)))
    }

    /// Stop unless someone is logged in
    ///
    /// Callers must abandon the operation on `Err`; the error carries the
    /// login route to send the user to.
    pub fn require_session(&self) -> Result<()> {
        if self.is_authorized() {
            Ok(())
        } else {
            Err(Error::unauthorized())
        }
    }

    /// The parsed session marker, `None` when absent or unreadable
    pub fn current_session(&self) -> Result<Option<Session>> {
        let raw = self.storage.get(slots::SESSION)?;
        Ok(raw.and_then(|raw| serde_json::from_str(&raw).ok()))
    }

    pub(crate) fn establish(&self, session: &Session) -> Result<()> {
        let raw = serde_json::to_string(session)?;
        self.storage.set(slots::SESSION, &raw)
    }

    /// Remove the marker; fine to call when nobody is logged in
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(slots::SESSION)
    }
}
