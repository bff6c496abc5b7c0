//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "indyfy")]
#[command(version)]
#[command(about = "INDYFY terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run against an in-memory backend instead of Firebase
    #[arg(long)]
    offline: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Show the signed-in account and its profile
    Whoami,
    /// Sign out and delete the saved session
    Logout,
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, offline } = cli;

    // default to the terminal client
    let Some(command) = command else {
        return commands::app::run(offline).await;
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Commands::Whoami => commands::session::whoami().await,
        Commands::Logout => commands::session::logout(),
    }
}
