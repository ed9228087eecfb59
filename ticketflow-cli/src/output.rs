//! Output formatting utilities

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use ticketflow_core::{BoardStatus, Priority, TicketStatus};

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Timestamp in local time, minute precision
pub fn format_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn ticket_status(status: TicketStatus) -> String {
    let label = status.label();
    match status {
        TicketStatus::Open => label.blue().to_string(),
        TicketStatus::InProgress => label.yellow().to_string(),
        TicketStatus::Closed => label.green().to_string(),
    }
}

pub fn board_status(status: BoardStatus) -> String {
    let label = status.label();
    match status {
        BoardStatus::Open => label.blue().to_string(),
        BoardStatus::InProgress => label.yellow().to_string(),
        BoardStatus::Closed => label.green().to_string(),
    }
}

pub fn priority(priority: Priority) -> String {
    let label = priority.label();
    match priority {
        Priority::High => label.red().to_string(),
        Priority::Medium => label.yellow().to_string(),
        Priority::Low => label.dimmed().to_string(),
    }
}

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
