use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
pub fn init_logging() {
    // The rolling appender expects the directory to already exist
    let _ = fs::create_dir_all("logs");

    // Daily-rotated JSON log file alongside the console output
    let file_appender = tracing_appender::rolling::daily("logs", "cleanup.log");
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);
    let console_layer = fmt::layer().with_writer(std::io::stdout);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("profile_cleaner=info".parse().unwrap()))
        .with(file_layer)
        .with(console_layer)
        .init();

    // The guard has to outlive the process or buffered lines are dropped
    std::mem::forget(_guard);
}
