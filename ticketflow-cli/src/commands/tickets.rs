//! Tickets command - the dashboard ticket collection

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use ticketflow_core::ports::slots;
use ticketflow_core::{
    NewTicket, Priority, StatusFilter, Ticket, TicketPatch, TicketStatus,
};

use super::{fail_json, get_context, get_logger, log_outcome, require_session};
use crate::output;

#[derive(Subcommand)]
pub enum TicketsCommands {
    /// List tickets, optionally filtered by status
    List {
        /// all, open, in-progress or closed
        #[arg(long, default_value = "all")]
        status: StatusFilter<TicketStatus>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single ticket
    Show {
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a ticket
    Create {
        /// Ticket title
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change any of title, description, status and priority
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// open, in-progress or closed
        #[arg(short, long)]
        status: Option<TicketStatus>,
        /// low, medium or high
        #[arg(short, long)]
        priority: Option<Priority>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a ticket
    Delete {
        id: String,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: TicketsCommands) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let service = &ctx.ticket_service;

    match command {
        TicketsCommands::List { status, json } => {
            require_session(&ctx, &logger, "tickets list")?;
            let tickets = service.list(status)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&tickets)?);
                return Ok(());
            }
            if tickets.is_empty() {
                println!("{}", "No tickets found".dimmed());
                return Ok(());
            }
            print_tickets(&tickets);
        }
        TicketsCommands::Show { id, json } => {
            require_session(&ctx, &logger, "tickets show")?;
            let ticket = match service.get(&id) {
                Ok(t) => t,
                Err(e) => return fail_json(json, e),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                print_ticket(&ticket);
            }
        }
        TicketsCommands::Create {
            title,
            description,
            priority,
            json,
        } => {
            require_session(&ctx, &logger, "tickets create")?;
            let input = NewTicket::new(title)
                .with_description(description)
                .with_priority(priority);
            let result = service.create(input);
            log_outcome(&logger, "ticket_created", "tickets create", Some(slots::TICKETS), &result);

            let ticket = match result {
                Ok(t) => t,
                Err(e) => return fail_json(json, e),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                println!("{} Created ticket {}", "✓".green(), ticket.id.bold());
            }
        }
        TicketsCommands::Edit {
            id,
            title,
            description,
            status,
            priority,
            json,
        } => {
            require_session(&ctx, &logger, "tickets edit")?;
            let patch = TicketPatch {
                title,
                description,
                status,
                priority,
            };
            if patch.is_empty() {
                bail!("Nothing to change. Pass --title, --description, --status or --priority.");
            }

            let result = service.update(&id, patch);
            log_outcome(&logger, "ticket_updated", "tickets edit", Some(slots::TICKETS), &result);

            let ticket = match result {
                Ok(t) => t,
                Err(e) => return fail_json(json, e),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
            } else {
                println!("{} Updated ticket {}", "✓".green(), ticket.id.bold());
            }
        }
        TicketsCommands::Delete { id, force, json } => {
            require_session(&ctx, &logger, "tickets delete")?;

            if !force && !json {
                if !Confirm::new()
                    .with_prompt(format!("Delete ticket {}?", id))
                    .default(false)
                    .interact()?
                {
                    println!("{}", "Cancelled".dimmed());
                    return Ok(());
                }
            }

            let result = service.delete(&id);
            log_outcome(&logger, "ticket_deleted", "tickets delete", Some(slots::TICKETS), &result);
            let removed = match result {
                Ok(r) => r,
                Err(e) => return fail_json(json, e),
            };

            if json {
                println!("{}", serde_json::json!({ "deleted": removed, "id": id }));
            } else if removed {
                println!("{} Deleted ticket {}", "✓".green(), id);
            } else {
                println!("{}", format!("No ticket with id {}", id).dimmed());
            }
        }
    }

    Ok(())
}

fn print_tickets(tickets: &[Ticket]) {
    let mut table = output::create_table();
    table.set_header(vec!["ID", "Title", "Status", "Priority", "Updated"]);
    for t in tickets {
        table.add_row(vec![
            t.id.clone(),
            t.title.clone(),
            output::ticket_status(t.status),
            output::priority(t.priority),
            output::format_time(&t.updated_at),
        ]);
    }
    println!("{}", table);
}

fn print_ticket(t: &Ticket) {
    println!("{} {}", t.id.dimmed(), t.title.bold());
    println!();
    if !t.description.is_empty() {
        println!("{}", t.description);
        println!();
    }
    println!("  Status:   {}", output::ticket_status(t.status));
    println!("  Priority: {}", output::priority(t.priority));
    println!("  Created:  {}", output::format_time(&t.created_at));
    println!("  Updated:  {}", output::format_time(&t.updated_at));
}
