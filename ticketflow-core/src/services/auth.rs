//! Auth service - mock signup, login and logout
//!
//! Users live in their own snapshot slot. A successful signup or login
//! writes the session marker that [`SessionGuard`] checks. Both flows wait
//! a fixed delay before touching storage, standing in for a network call.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::board::next_timestamp_id;
use crate::domain::result::{Error, Result};
use crate::domain::{require_credentials, validate_signup, Session, User};
use crate::ports::{slots, KeyValueStorage};

use super::credential::CredentialHasher;
use super::session::SessionGuard;
use super::snapshot::{Seed, SnapshotStore};

/// Simulated round-trip latency used when none is configured
pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(500);

pub struct AuthService {
    users: SnapshotStore<User>,
    sessions: SessionGuard,
    hasher: CredentialHasher,
    delay: Duration,
}

impl AuthService {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            users: SnapshotStore::new(storage.clone(), slots::USERS, Seed::Empty),
            sessions: SessionGuard::new(storage),
            hasher: CredentialHasher::default(),
            delay: DEFAULT_AUTH_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn sessions(&self) -> &SessionGuard {
        &self.sessions
    }

    /// Register a new user and log them in
    ///
    /// Validation runs before the delay, so a rejected form returns at once
    /// and writes nothing. If the session cannot be written the new user is
    /// removed again, so a failed signup leaves no account behind.
    pub async fn register(&self, email: &str, password: &str) -> Result<User> {
        validate_signup(email, password)?;
        self.simulate_latency().await;

        let mut users = self.users.load()?;
        if users.iter().any(|u| u.email == email) {
            return Err(Error::auth("email already registered"));
        }

        let password_hash = self.hasher.hash(password)?;
        let id = next_timestamp_id(Utc::now(), users.iter().map(|u| u.id))?;
        let user = User::new(id, email, password_hash);

        users.push(user.clone());
        self.users.save(&users)?;
        if let Err(e) = self.sessions.establish(&user.session()) {
            users.pop();
            let _ = if users.is_empty() {
                self.users.clear()
            } else {
                self.users.save(&users)
            };
            return Err(e);
        }
        Ok(user)
    }

    /// Check credentials and write the session marker
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        require_credentials(email, password)?;
        self.simulate_latency().await;

        let users = self.users.load()?;
        let session = users
            .iter()
            .find(|u| u.email == email && self.hasher.verify(password, &u.password_hash))
            .map(User::session)
            .ok_or_else(|| Error::auth("invalid credentials"))?;

        self.sessions.establish(&session)?;
        Ok(session)
    }

    /// Remove the session marker; a no-op when nobody is logged in
    pub fn logout(&self) -> Result<()> {
        self.sessions.clear()
    }

    pub fn user_count(&self) -> Result<usize> {
        Ok(self.users.load()?.len())
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
