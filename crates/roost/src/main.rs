use clap::Parser;
use eyre::Result;

use roost::cli::config::{apply_overrides, load_env, load_preferences, preferences_path};
use roost::cli::{Cli, Commands, PreferencesCommands};
use roost::commands::Command;
use roost::commands::headless::HeadlessCommand;
use roost::commands::preferences::{PreferencesAction, PreferencesCommand};
use tracing::info;

#[cfg(feature = "ui")]
use roost_tui::tui::{self, setup_panic_hook};

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre for better error reports
    color_eyre::install()?;

    let cli = Cli::parse();

    // Load .env file if it exists
    load_env()?;

    // Initialize tracing (level configured via RUST_LOG env var)
    roost::utils::tracing::init_tracing()?;

    let mut preferences = load_preferences(&cli)?;
    apply_overrides(&mut preferences, &cli);
    info!(
        delay_ms = preferences.classifier.delay_ms,
        timeout_ms = preferences.classifier.timeout_ms,
        "Loaded preferences"
    );

    // If no subcommand specified, default to TUI
    let cmd = cli.command.clone().unwrap_or(Commands::Tui);

    match cmd {
        Commands::Tui => {
            #[cfg(feature = "ui")]
            {
                setup_signal_handlers().await;
                // Set panic hook for terminal cleanup
                setup_panic_hook();

                let controller = roost_core::Controller::simulated(&preferences.classifier);
                let tick = std::time::Duration::from_millis(preferences.ui.tick_ms);
                tui::run_tui(controller, tick)
                    .await
                    .map_err(|e| eyre::eyre!("TUI error: {}", e))
            }
            #[cfg(not(feature = "ui"))]
            {
                eyre::bail!(
                    "Terminal UI not available. This binary was compiled without the 'ui' feature."
                );
            }
        }
        Commands::Headless { messages } => {
            let command = HeadlessCommand {
                messages,
                classifier: preferences.classifier,
            };
            command.execute().await
        }
        Commands::Preferences { action } => {
            let cmd = PreferencesCommand {
                action: match action {
                    PreferencesCommands::Show => PreferencesAction::Show(preferences),
                    PreferencesCommands::Init => PreferencesAction::Init,
                    PreferencesCommands::Reset => PreferencesAction::Reset,
                },
                path: preferences_path(&cli)?,
            };
            cmd.execute().await
        }
    }
}

#[cfg(feature = "ui")]
async fn setup_signal_handlers() {
    #[cfg(not(windows))]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let _sigterm_task = tokio::spawn(async move {
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(signal) => signal,
                Err(error) => {
                    tracing::warn!(error = %error, "Failed to set up SIGTERM handler");
                    return;
                }
            };
            sigterm.recv().await;

            tui::terminal::cleanup();
            std::process::exit(0);
        });
    }

    #[cfg(windows)]
    {
        let _ctrl_c_task = tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tui::terminal::cleanup();
            std::process::exit(130);
        });
    }
}
