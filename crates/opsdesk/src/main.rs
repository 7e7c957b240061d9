// SPDX-FileCopyrightText: 2026 Opsdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opsdesk - chat-driven task intake over Telegram.
//!
//! Binary entry point: parses the CLI, loads and validates configuration,
//! and dispatches to the selected subcommand.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod users;

use clap::{Parser, Subcommand};

/// Opsdesk - chat-driven task intake over Telegram.
#[derive(Parser, Debug)]
#[command(name = "opsdesk", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook server.
    Serve,
    /// Print the resolved configuration as TOML.
    Config,
    /// Manage the assignee directory.
    Users {
        #[command(subcommand)]
        command: users::UsersCommand,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match opsdesk_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            opsdesk_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => {
                println!("{rendered}");
                Ok(())
            }
            Err(e) => Err(opsdesk_core::OpsdeskError::Internal(format!(
                "failed to render config: {e}"
            ))),
        },
        Some(Commands::Users { command }) => users::run_users(config, command).await,
        None => {
            println!("opsdesk: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
