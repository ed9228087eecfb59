//! TicketFlow CLI - ticket tracking in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{auth, board, config, logs, reset, status, tickets};

/// TicketFlow - ticket tracking in your terminal
#[derive(Parser)]
#[command(name = "tf", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Signup {
        #[arg(long, env = "TICKETFLOW_EMAIL")]
        email: Option<String>,
        #[arg(long, env = "TICKETFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in with an existing account
    Login {
        #[arg(long, env = "TICKETFLOW_EMAIL")]
        email: Option<String>,
        #[arg(long, env = "TICKETFLOW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log out
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the dashboard summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage dashboard tickets
    Tickets {
        #[command(subcommand)]
        command: tickets::TicketsCommands,
    },

    /// Manage the standalone ticket board
    Board {
        #[command(subcommand)]
        command: board::BoardCommands,
    },

    /// Delete all tickets, users and the session
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// View and change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Signup { email, password, json } => auth::run_signup(email, password, json),
        Commands::Login { email, password, json } => auth::run_login(email, password, json),
        Commands::Logout { json } => auth::run_logout(json),
        Commands::Status { json } => status::run(json),
        Commands::Tickets { command } => tickets::run(command),
        Commands::Board { command } => board::run(command),
        Commands::Reset { force, json } => reset::run(force, json),
        Commands::Logs { command } => logs::run(command),
        Commands::Config { command } => config::run(command),
    }
}
