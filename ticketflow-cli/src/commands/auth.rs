//! Signup, login and logout commands

use std::time::Duration;

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use ticketflow_core::ports::slots;
use ticketflow_core::LogEvent;

use super::{block_on, fail_json, get_context, get_logger, log_event, log_outcome};

/// Prompt for whatever was not passed on the command line
///
/// Refuses to prompt when stdin is not a terminal.
fn credentials(
    email: Option<String>,
    password: Option<String>,
    confirm: bool,
) -> Result<(String, String)> {
    if (email.is_none() || password.is_none()) && atty::isnt(atty::Stream::Stdin) {
        bail!("--email and --password are required when stdin is not a terminal");
    }

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = match password {
        Some(p) => p,
        None if confirm => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
        None => Password::new().with_prompt("Password").interact()?,
    };

    Ok((email.trim().to_string(), password))
}

fn spinner(message: &'static str, json: bool) -> Option<ProgressBar> {
    if json {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

pub fn run_signup(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let (email, password) = credentials(email, password, true)?;
    let ctx = get_context()?;
    let logger = get_logger();

    let pb = spinner("Creating account...", json);
    let result = block_on(ctx.auth_service.register(&email, &password))?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    log_outcome(&logger, "signup", "signup", Some(slots::USERS), &result);

    let user = match result {
        Ok(user) => user,
        Err(e) => return fail_json(json, e),
    };

    if json {
        let envelope = ticketflow_core::OperationResult::ok(user.session());
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        println!("{} Account created for {}", "✓".green(), user.email);
        println!("{}", "You are now logged in. Run 'tf status' to see your dashboard.".dimmed());
    }
    Ok(())
}

pub fn run_login(email: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let (email, password) = credentials(email, password, false)?;
    let ctx = get_context()?;
    let logger = get_logger();

    let pb = spinner("Signing in...", json);
    let result = block_on(ctx.auth_service.login(&email, &password))?;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    log_outcome(&logger, "login", "login", Some(slots::SESSION), &result);

    let session = match result {
        Ok(session) => session,
        Err(e) => return fail_json(json, e),
    };

    if json {
        let envelope = ticketflow_core::OperationResult::ok(session);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        println!("{} Logged in as {}", "✓".green(), session.email);
    }
    Ok(())
}

pub fn run_logout(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let was_logged_in = ctx.session_guard.is_authorized();
    ctx.auth_service.logout()?;
    log_event(&logger, LogEvent::new("logout").with_command("logout"));

    if json {
        println!("{}", serde_json::json!({ "success": true, "wasLoggedIn": was_logged_in }));
    } else if was_logged_in {
        println!("{}", "Logged out".yellow());
    } else {
        println!("{}", "Not logged in".dimmed());
    }
    Ok(())
}
