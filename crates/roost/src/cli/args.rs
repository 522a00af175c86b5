use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Property-search front end: describe a home to see listings, or just chat.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, author)]
pub struct Cli {
    /// Path to the preferences file (defaults to <config dir>/roost/preferences.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Simulated classifier latency in milliseconds
    #[arg(long, env = "ROOST_DELAY_MS", global = true)]
    pub delay_ms: Option<u64>,

    /// Give up on a classification after this many milliseconds
    #[arg(long, env = "ROOST_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Text that marks an input as a property search
    #[arg(long, global = true)]
    pub keyword: Option<String>,

    /// Canned chat reply
    #[arg(long, global = true)]
    pub reply: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Launch the interactive terminal UI (default)
    Tui,
    /// Run submissions without a terminal UI and print the final session as JSON
    Headless {
        /// Messages to submit in order. Read one per line from stdin when omitted.
        messages: Vec<String>,
    },
    /// Manage user preferences
    Preferences {
        #[command(subcommand)]
        action: PreferencesCommands,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum PreferencesCommands {
    /// Show the effective preferences and where they are read from
    Show,
    /// Write the default preferences file if none exists
    Init,
    /// Delete the preferences file
    Reset,
}
