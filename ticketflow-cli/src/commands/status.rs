//! Status command - the dashboard summary

use anyhow::Result;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use ticketflow_core::{Session, TicketSummary};

use super::{get_context, get_logger, require_session};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    session: Option<Session>,
    tickets: TicketSummary,
    board_tickets: usize,
    registered_users: usize,
}

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    require_session(&ctx, &logger, "status")?;

    let report = StatusReport {
        session: ctx.session_guard.current_session()?,
        tickets: ctx.ticket_service.summary()?,
        board_tickets: ctx.board_service.list(Default::default())?.len(),
        registered_users: ctx.auth_service.user_count()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(session) = &report.session {
        println!("{} {}", "Signed in as".dimmed(), session.email);
        println!();
    }

    println!("{}", "Ticket Dashboard".bold());
    println!();

    let s = &report.tickets;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec!["Total", &s.total.to_string()]);
    table.add_row(vec!["Open", &s.open.to_string()]);
    table.add_row(vec!["In Progress", &s.in_progress.to_string()]);
    table.add_row(vec!["Closed", &s.closed.to_string()]);
    table.add_row(vec!["High Priority", &s.high_priority.to_string()]);
    table.add_row(vec!["Medium Priority", &s.medium_priority.to_string()]);
    table.add_row(vec!["Low Priority", &s.low_priority.to_string()]);
    println!("{}", table);
    println!();

    println!("Board tickets: {}", report.board_tickets);
    println!("Registered users: {}", report.registered_users);

    Ok(())
}
