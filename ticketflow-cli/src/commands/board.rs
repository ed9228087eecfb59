//! Board command - the standalone ticket board

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use ticketflow_core::ports::slots;
use ticketflow_core::{BoardStatus, BoardTicketPatch, NewBoardTicket, Priority, StatusFilter};

use super::{fail_json, get_context, get_logger, log_outcome, require_session};
use crate::output;

#[derive(Subcommand)]
pub enum BoardCommands {
    /// List board tickets, optionally filtered by status
    List {
        /// all, open, in_progress or closed
        #[arg(long, default_value = "all")]
        status: StatusFilter<BoardStatus>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a ticket to the board
    Create {
        /// Title, at most 100 characters
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a board ticket
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        status: Option<BoardStatus>,
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a board ticket
    Delete {
        id: i64,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: BoardCommands) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let service = &ctx.board_service;

    match command {
        BoardCommands::List { status, json } => {
            require_session(&ctx, &logger, "board list")?;
            let tickets = service.list(status)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&tickets)?);
                return Ok(());
            }
            if tickets.is_empty() {
                println!("{}", "The board is empty".dimmed());
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["ID", "Title", "Status", "Priority", "Created"]);
            for t in &tickets {
                table.add_row(vec![
                    t.id.to_string(),
                    t.title.clone(),
                    output::board_status(t.status),
                    output::priority(t.priority),
                    output::format_time(&t.created_at),
                ]);
            }
            println!("{}", table);
        }
        BoardCommands::Create {
            title,
            description,
            priority,
            json,
        } => {
            require_session(&ctx, &logger, "board create")?;
            let input = NewBoardTicket::new(title)
                .with_description(description)
                .with_priority(priority);
            let result = service.create(input);
            log_outcome(&logger, "board_ticket_created", "board create", Some(slots::BOARD_TICKETS), &result);

            let ticket = match result {
                Ok(t) => t,
                Err(e) => return fail_json(json, e),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                println!("{} Added board ticket {}", "✓".green(), ticket.id);
            }
        }
        BoardCommands::Edit {
            id,
            title,
            description,
            status,
            priority,
            json,
        } => {
            require_session(&ctx, &logger, "board edit")?;
            if title.is_none() && description.is_none() && status.is_none() && priority.is_none() {
                bail!("Nothing to change. Pass --title, --description, --status or --priority.");
            }
            let patch = BoardTicketPatch {
                title,
                description,
                status,
                priority,
            };

            let result = service.update(id, patch);
            log_outcome(&logger, "board_ticket_updated", "board edit", Some(slots::BOARD_TICKETS), &result);

            let ticket = match result {
                Ok(t) => t,
                Err(e) => return fail_json(json, e),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                println!(
                    "{} Board ticket {} is {}",
                    "✓".green(),
                    ticket.id,
                    output::board_status(ticket.status)
                );
            }
        }
        BoardCommands::Delete { id, force, json } => {
            require_session(&ctx, &logger, "board delete")?;

            if !force && !json {
                if !Confirm::new()
                    .with_prompt(format!("Delete board ticket {}?", id))
                    .default(false)
                    .interact()?
                {
                    println!("{}", "Cancelled".dimmed());
                    return Ok(());
                }
            }

            let result = service.delete(id);
            log_outcome(&logger, "board_ticket_deleted", "board delete", Some(slots::BOARD_TICKETS), &result);
            let removed = match result {
                Ok(r) => r,
                Err(e) => return fail_json(json, e),
            };

            if json {
                println!("{}", serde_json::json!({ "deleted": removed, "id": id }));
            } else if removed {
                println!("{} Deleted board ticket {}", "✓".green(), id);
            } else {
                println!("{}", format!("No board ticket with id {}", id).dimmed());
            }
        }
    }

    Ok(())
}
