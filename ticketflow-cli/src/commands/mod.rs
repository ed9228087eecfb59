//! CLI command implementations

pub mod auth;
pub mod board;
pub mod config;
pub mod logs;
pub mod reset;
pub mod status;
pub mod tickets;

use std::future::Future;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use ticketflow_core::{
    EntryPoint, Error, LogEvent, LoggingService, OperationResult, TicketFlowContext,
};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_ticketflow_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Get the data directory from `TICKETFLOW_DIR` or `~/.ticketflow`
pub fn get_ticketflow_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("TICKETFLOW_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".ticketflow"))
        .ok_or_else(|| anyhow!("Could not find home directory; set TICKETFLOW_DIR"))
}

/// Open the context, creating the data directory on first use
pub fn get_context() -> Result<TicketFlowContext> {
    let data_dir = get_ticketflow_dir()?;
    TicketFlowContext::new(&data_dir)
        .with_context(|| format!("Failed to open ticketflow data in {:?}", data_dir))
}

/// Gate a protected command on the session marker
///
/// Rejections are logged and turned into a hint pointing at `tf login`.
pub fn require_session(
    ctx: &TicketFlowContext,
    logger: &Option<LoggingService>,
    command: &str,
) -> Result<()> {
    match ctx.session_guard.require_session() {
        Ok(()) => Ok(()),
        Err(Error::Unauthorized { redirect }) => {
            log_event(
                logger,
                LogEvent::new("access_denied")
                    .with_command(command)
                    .with_error_details(redirect),
            );
            Err(anyhow!(
                "Not logged in. Run `tf login` or `tf signup` first."
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Run a future to completion on a single-threaded runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

/// Record the outcome of a core operation under `event`
///
/// Only the event name, command, slot and error text are logged.
pub fn log_outcome<T>(
    logger: &Option<LoggingService>,
    event: &str,
    command: &str,
    slot: Option<&str>,
    result: &ticketflow_core::domain::result::Result<T>,
) {
    let mut entry = match result {
        Ok(_) => LogEvent::new(event),
        Err(e) => LogEvent::new(format!("{}_failed", event)).with_error(e.to_string()),
    }
    .with_command(command);
    if let Some(slot) = slot {
        entry = entry.with_slot(slot);
    }
    log_event(logger, entry);
}

/// Print a failure as an `OperationResult` envelope when `--json` is set
pub fn fail_json(json: bool, err: Error) -> Result<()> {
    if json {
        println!("{}", failure_envelope(&err)?);
        std::process::exit(1);
    }
    Err(err.into())
}

fn failure_envelope(err: &Error) -> Result<String> {
    let envelope = OperationResult::<()>::fail(err.to_string());
    Ok(serde_json::to_string_pretty(&envelope)?)
}
