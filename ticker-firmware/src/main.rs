//! Ticker firmware, host build
//!
//! Runs the ticker's persistent state on a development machine, with a
//! host directory standing in for the flash volume. Each subcommand plays
//! the part of one event on the device: booting, the web UI requesting or
//! submitting a page, or the display asking for its next message.

mod app;
mod config;
mod containers;
mod state;
mod ticker;
mod web;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};
use ticker_hal_host::StdFileSystem;

use crate::app::Ticker;
use crate::config::load_boot_config;
use crate::containers::ALL_SETTINGS;
use crate::ticker::{display_text, ClockFeeds};

#[derive(Parser)]
#[command(name = "ticker")]
#[command(about = "Ticker display firmware (host build)", long_about = None)]
struct Cli {
    /// Boot configuration (TOML); embedded defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory from the boot configuration
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Boot the device and print its settings
    Boot,

    /// Settings pages
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Local messages page and rotation
    Messages {
        #[command(subcommand)]
        action: MessagesAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the settings form of a container
    Show {
        /// Container key, e.g. deviceSettings
        key: String,
    },

    /// Submit an edited settings form
    Submit {
        /// Container key, e.g. deviceSettings
        key: String,

        /// Submission JSON: {"fields":[{"fieldName":..,"value":..}]}
        json: String,
    },
}

#[derive(Subcommand)]
enum MessagesAction {
    /// Print the stored messages
    List,

    /// Replace the stored messages with a JSON array of strings
    Set {
        /// JSON array, e.g. ["Hello","<weerlive>"]
        json: String,
    },

    /// Show the next messages in rotation
    Next {
        /// Number of messages
        #[arg(default_value_t = 1)]
        count: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut boot = load_boot_config(cli.config.as_deref()).map_err(|e| e.to_string())?;
    if let Some(dir) = cli.data_dir {
        boot.data_dir = dir;
    }

    let fs = StdFileSystem::mount(&boot.data_dir)
        .map_err(|e| format!("cannot mount {}: {:?}", boot.data_dir.display(), e))?;
    info!("Volume at {}", fs.root().display());

    let mut ticker = Ticker::boot(fs, &boot);

    match cli.command {
        Commands::Boot => {
            for key in ALL_SETTINGS {
                println!("{}", ticker.settings_json(key));
            }
        }
        Commands::Settings { action } => match action {
            SettingsAction::Show { key } => {
                let json = ticker.settings_json(&key);
                if json.is_empty() {
                    return Err(format!("unknown settings container [{}]", key));
                }
                println!("{}", json);
            }
            SettingsAction::Submit { key, json } => {
                let outgoing = ticker.process_settings(&json, &key);
                if outgoing.is_empty() {
                    return Err(format!("settings for [{}] not processed", key));
                }
                for message in outgoing {
                    println!("{}", message);
                }
            }
        },
        Commands::Messages { action } => match action {
            MessagesAction::List => {
                let payload = ticker
                    .local_messages_json()
                    .ok_or_else(|| String::from("cannot encode local messages"))?;
                println!("{}", payload);
            }
            MessagesAction::Set { json } => {
                let payload = ticker
                    .process_local_messages(&json)
                    .ok_or_else(|| String::from("expected a JSON array of messages"))?;
                println!("{}", payload);
            }
            MessagesAction::Next { count } => {
                let mut feeds = ClockFeeds::local();
                for _ in 0..count {
                    println!("{}", display_text(&ticker.next_message(&mut feeds)));
                }
            }
        },
    }

    Ok(())
}
