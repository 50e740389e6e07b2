use std::{
    fs,
    path::Path,
};

use anyhow::Context;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const MAX_LOG_AGE_DAYS: i64 = 3;

/// Keeps the non-blocking file writer alive; logs are flushed on drop.
#[allow(dead_code)]
pub struct LoggerGuard(Option<WorkerGuard>);

/// Install the global subscriber.
///
/// Console output goes to stderr so stdout stays reserved for progress
/// and the preview table. A daily rolling file is added when `log_dir` is set.
pub fn init_logging(
    log_dir: Option<&Path>,
    prefix: &str,
    level: &str,
) -> anyhow::Result<LoggerGuard> {
    let level = match level {
        "trace" | "debug" | "info" | "warn" | "error" => level,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            "info"
        }
    };

    let default_directive = level
        .parse::<Directive>()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    let builder = EnvFilter::builder().with_default_directive(default_directive);
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true)
        .with_filter(builder.clone().parse_lossy(&rust_log));

    let mut guard = None;
    let file_layer = match log_dir {
        Some(dir) => {
            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .filename_suffix("log")
                .build(dir)
                .with_context(|| format!("Failed to create log appender in {}", dir.display()))?;
            let (non_blocking, worker_guard) = NonBlocking::new(file_appender);
            guard = Some(worker_guard);

            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_filter(builder.parse_lossy(&rust_log)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .init();

    if let Some(dir) = log_dir {
        match cleanup_old_logs(dir, prefix, MAX_LOG_AGE_DAYS) {
            Ok(0) => {}
            Ok(n) => tracing::debug!("Deleted {} old log file(s) from {}", n, dir.display()),
            Err(e) => tracing::warn!("Failed to delete old log file: {}", e),
        }
    }

    Ok(LoggerGuard(guard))
}

/// Remove `<prefix>*.log` files in `log_dir` last modified more than
/// `days_to_keep` days ago. Returns how many were deleted.
fn cleanup_old_logs(log_dir: &Path, prefix: &str, days_to_keep: i64) -> std::io::Result<usize> {
    let cutoff = chrono::Utc::now() - chrono::Duration::days(days_to_keep);
    let mut deleted = 0;

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();

        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !(file_name.starts_with(prefix) && file_name.ends_with(".log")) {
            continue;
        }

        let modified: chrono::DateTime<chrono::Utc> = fs::metadata(&path)?.modified()?.into();
        if modified < cutoff {
            fs::remove_file(&path)?;
            deleted += 1;
        }
    }

    Ok(deleted)
}
