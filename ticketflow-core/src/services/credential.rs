//! Credential hashing for the mock user registry
//!
//! Passwords are stored as Argon2id PHC strings and checked with the
//! Argon2 verifier. This keeps plaintext out of storage but is still a
//! local stub, not an authentication system.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};

pub const DEFAULT_TIME_COST: u32 = 3;
pub const DEFAULT_MEMORY_COST: u32 = 65536; // 64 MiB
pub const DEFAULT_PARALLELISM: u32 = 4;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Params {
    pub time_cost: u32,
    pub memory_cost: u32,
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            time_cost: DEFAULT_TIME_COST,
            memory_cost: DEFAULT_MEMORY_COST,
            parallelism: DEFAULT_PARALLELISM,
        }
    }
}

impl Argon2Params {
    /// Cheapest parameters Argon2 accepts; for tests and demos only
    pub fn minimal() -> Self {
        Self {
            time_cost: 1,
            memory_cost: 8,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Argon2Params,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(Argon2Params::default())
    }
}

impl CredentialHasher {
    pub fn new(params: Argon2Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Result<Argon2<'static>> {
        let params = Params::new(
            self.params.memory_cost,
            self.params.time_cost,
            self.params.parallelism,
            None,
        )
        .map_err(|e| Error::Config(format!("Invalid argon2 params: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash `password` with a fresh 16-byte salt
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt_bytes: [u8; 16] = rand::thread_rng().gen();
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| Error::Other(format!("Failed to encode salt: {}", e)))?;

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| Error::Other(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Check `password` against a stored PHC string
    ///
    /// Unparseable hashes never match.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
