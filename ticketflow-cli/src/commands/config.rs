//! Config command - view and change settings.json

use anyhow::{bail, Result};
use clap::Subcommand;
use colored::Colorize;
use std::time::Duration;
use ticketflow_core::config::{Config, AUTH_DELAY_ENV, SEED_SAMPLES_ENV};
use ticketflow_core::LogEvent;

use super::{get_logger, get_ticketflow_dir, log_event};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change settings and write them to settings.json
    Set {
        /// Seed the dashboard with sample tickets on first run
        #[arg(long)]
        seed_samples: Option<bool>,
        /// Simulated signup/login latency in milliseconds
        #[arg(long)]
        auth_delay_ms: Option<u64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn print_config(config: &Config, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "seedSampleTickets": config.seed_sample_tickets,
                "authDelayMs": config.auth_delay.as_millis() as u64,
            })
        );
        return Ok(());
    }

    let seed = if config.seed_sample_tickets {
        "ON".green()
    } else {
        "OFF".yellow()
    };
    println!("  Sample tickets: {}", seed);
    println!("  Auth delay:     {} ms", config.auth_delay.as_millis());
    Ok(())
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_ticketflow_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;
            print_config(&config, json)?;

            let overridden: Vec<&str> = [SEED_SAMPLES_ENV, AUTH_DELAY_ENV]
                .into_iter()
                .filter(|key| std::env::var(key).is_ok())
                .collect();
            if !json && !overridden.is_empty() {
                println!("{}", format!("  (overridden by {})", overridden.join(", ")).dimmed());
            }
        }
        ConfigCommands::Set {
            seed_samples,
            auth_delay_ms,
            json,
        } => {
            if seed_samples.is_none() && auth_delay_ms.is_none() {
                bail!("Nothing to change. Pass --seed-samples or --auth-delay-ms.");
            }

            let mut config = Config::load_file(&data_dir)?;
            if let Some(seed) = seed_samples {
                config.seed_sample_tickets = seed;
            }
            if let Some(ms) = auth_delay_ms {
                config.auth_delay = Duration::from_millis(ms);
            }
            config.save(&data_dir)?;
            log_event(&get_logger(), LogEvent::new("config_saved").with_command("config set"));

            if !json {
                println!("{} Settings saved", "✓".green());
            }
            print_config(&config, json)?;
        }
    }

    Ok(())
}
