use chrono::Local;
use std::io;
use std::path::PathBuf;
use tracing_appender::rolling;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Directory for log files, `~/.roost/logs`
pub fn log_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".roost").join("logs"))
}

/// Initialize tracing with a file logger writing to a timestamp-named file.
/// The filter comes from the RUST_LOG environment variable.
///
/// Logging never goes to stdout: the TUI owns the terminal and headless mode
/// prints JSON there. Without a home directory, logs go to stderr.
pub fn init_tracing() -> io::Result<()> {
    let filter = EnvFilter::from_default_env();

    if let Some(log_dir) = log_dir() {
        std::fs::create_dir_all(&log_dir)?;

        let file_name = format!("{}.log", Local::now().format("%Y%m%d_%H%M%S"));
        let file_appender = rolling::never(&log_dir, &file_name);

        let subscriber = tracing_subscriber::registry()
            .with(
                fmt::Layer::new()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter);

        ::tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

        ::tracing::debug!(
            target: "roost::utils::tracing",
            path = %log_dir.join(&file_name).display(),
            "Tracing initialized with file output. Filter configured via RUST_LOG env var."
        );
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(
                fmt::Layer::default()
                    .with_writer(io::stderr)
                    .with_target(true),
            )
            .with(filter);

        ::tracing::subscriber::set_global_default(subscriber).map_err(io::Error::other)?;

        ::tracing::debug!(
            target: "roost::utils::tracing",
            "Tracing initialized with stderr output. Filter configured via RUST_LOG env var."
        );
    }

    Ok(())
}
