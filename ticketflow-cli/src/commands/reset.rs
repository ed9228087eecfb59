//! Reset command - wipe tickets, users and the session

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use ticketflow_core::LogEvent;

use super::{get_context, get_logger, log_event};

pub fn run(force: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    if !force && !json {
        println!(
            "\n{}",
            "This deletes every ticket, every board ticket and every registered user.".yellow()
        );
        println!("{}\n", "You will be logged out.".dimmed());

        if !Confirm::new()
            .with_prompt("Are you sure?")
            .default(false)
            .interact()?
        {
            println!("{}\n", "Cancelled".dimmed());
            return Ok(());
        }
    }

    ctx.reset()?;
    log_event(&get_logger(), LogEvent::new("reset").with_command("reset"));

    if json {
        println!("{}", serde_json::json!({ "success": true }));
    } else {
        println!("{} All ticketflow data cleared", "✓".green());
    }
    Ok(())
}
