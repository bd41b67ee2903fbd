mod client;
mod commands;
mod daemon_launcher;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{TableAction, TimerAction};
use ludo_core::Language;

#[derive(Parser)]
#[command(name = "ludo")]
#[command(about = "Ludo CLI - study with a pomodoro timer, spend the chips at blackjack", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a player name and language
    Init {
        /// Player name (prompted when missing)
        #[arg(short, long)]
        name: Option<String>,
        /// Interface language: en or es (prompted when missing)
        #[arg(short, long)]
        language: Option<Language>,
    },
    /// Go back to playing as guest
    Logout,
    /// Show the player, timer and table
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Control the pomodoro timer
    Timer {
        #[command(subcommand)]
        action: Option<TimerAction>,
    },
    /// Play blackjack with your chips
    Table {
        #[command(subcommand)]
        action: Option<TableAction>,
    },
    /// Show chips and recent activity
    Profile {
        /// Switch between the light and dark theme
        #[arg(long)]
        toggle_theme: bool,
        /// Number of ledger entries to show
        #[arg(long, default_value_t = 10)]
        entries: u32,
    },
    /// Show or change the interface language
    Lang {
        /// Language code (en, es)
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { name, language } => commands::init(name, language).await,
        Commands::Logout => commands::logout().await,
        Commands::Status { json } => commands::status(json).await,
        Commands::Timer { action } => {
            commands::timer(action.unwrap_or(TimerAction::Show)).await
        }
        Commands::Table { action } => {
            commands::table(action.unwrap_or(TableAction::Show)).await
        }
        Commands::Profile {
            toggle_theme,
            entries,
        } => commands::profile(toggle_theme, entries),
        Commands::Lang { language } => commands::lang(language),
    }
}
