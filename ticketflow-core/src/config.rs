//! Configuration management
//!
//! Settings live in `<dir>/settings.json`:
//! ```json
//! {
//!   "app": { "seedSampleTickets": true, "authDelayMs": 500 }
//! }
//! ```
//! Keys this crate does not manage are carried through on save.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::services::DEFAULT_AUTH_DELAY;

pub const SEED_SAMPLES_ENV: &str = "TICKETFLOW_SEED_SAMPLES";
pub const AUTH_DELAY_ENV: &str = "TICKETFLOW_AUTH_DELAY_MS";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    app: AppSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default = "default_seed_samples")]
    seed_sample_tickets: bool,
    #[serde(default = "default_auth_delay_ms")]
    auth_delay_ms: u64,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

fn default_seed_samples() -> bool {
    true
}

fn default_auth_delay_ms() -> u64 {
    DEFAULT_AUTH_DELAY.as_millis() as u64
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            seed_sample_tickets: default_seed_samples(),
            auth_delay_ms: default_auth_delay_ms(),
            other: HashMap::new(),
        }
    }
}

/// TicketFlow configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    /// Seed the dashboard with sample tickets on first run
    pub seed_sample_tickets: bool,
    /// Simulated latency for signup and login
    pub auth_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_sample_tickets: default_seed_samples(),
            auth_delay: DEFAULT_AUTH_DELAY,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// `TICKETFLOW_SEED_SAMPLES` and `TICKETFLOW_AUTH_DELAY_MS` override the
    /// file (for CI/testing).
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_with_env(data_dir, |key| std::env::var(key).ok())
    }

    /// Load only what `settings.json` says, ignoring env overrides
    ///
    /// Use this as the base for [`Config::save`] so an override never ends
    /// up persisted.
    pub fn load_file(data_dir: &Path) -> Result<Self> {
        Self::load_with_env(data_dir, |_| None)
    }

    fn load_with_env(data_dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let seed_sample_tickets = match env(SEED_SAMPLES_ENV).as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.seed_sample_tickets,
        };

        let auth_delay_ms = env(AUTH_DELAY_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(raw.app.auth_delay_ms);

        Ok(Self {
            seed_sample_tickets,
            auth_delay: Duration::from_millis(auth_delay_ms),
        })
    }

    /// Save config to the data directory
    ///
    /// Only the fields this struct manages are rewritten.
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        let mut settings = read_settings(data_dir)?;
        settings.app.seed_sample_tickets = self.seed_sample_tickets;
        settings.app.auth_delay_ms = self.auth_delay.as_millis() as u64;

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join("settings.json"), content)?;
        Ok(())
    }
}

/// Unreadable JSON falls back to defaults; I/O errors propagate
fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join("settings.json");
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}
