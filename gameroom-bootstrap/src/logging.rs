use std::io;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "gameroom.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Console logging, plus a daily-rolling file under `log_dir` when set.
/// The returned guard flushes the file writer and must live until exit.
pub fn init_logging(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(env_filter());

    let mut guard = None;
    let file_layer = log_dir.and_then(|dir| {
        if let Err(err) = std::fs::create_dir_all(dir) {
            eprintln!("failed to create log directory {}: {}", dir, err);
            return None;
        }
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        guard = Some(worker_guard);
        Some(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .json()
                .with_filter(env_filter()),
        )
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    info!(log_dir = log_dir.unwrap_or("-"), "logging initialized");
    guard
}
