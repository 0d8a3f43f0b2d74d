//! Structured logging: JSONL to a file and compact human-readable stderr.
//!
//! ```rust,ignore
//! use inform_ide::logging;
//!
//! // MUST keep guard alive for duration of program
//! let _guard = logging::init();
//! tracing::info!(event_type = "app_start", "IDE started");
//! ```
//!
//! Each line of the JSONL file is one event:
//! ```json
//! {"timestamp":"2026-10-14T10:30:45.123Z","level":"INFO","target":"inform_ide::registry","fields":{"event_type":"story_lifecycle","action":"created","story_id":"…"}}
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::story::StoryId;

const LOG_FILE_NAME: &str = "inform-ide.jsonl";

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize the dual-output logging system.
///
/// If the log file cannot be opened, the JSONL layer writes to a sink and
/// only the stderr output remains.
/// Calling this twice is harmless; the second subscriber is not installed.
pub fn init() -> LoggingGuard {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
    }
    let log_path = log_dir.join(LOG_FILE_NAME);

    let (non_blocking_file, file_guard) = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => tracing_appender::non_blocking(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            tracing_appender::non_blocking(std::io::sink())
        }
    };

    // Default to info, allow override via RUST_LOG
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE);

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(true)
        .with_level(true)
        .compact();

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            event_type = "app_lifecycle",
            action = "started",
            log_path = %log_path.display(),
            "Application logging initialized"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

/// Get the log directory path (~/.local/share/inform-ide/logs/)
fn get_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("inform-ide").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("inform-ide-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}

// =============================================================================
// STRUCTURED LOGGING HELPERS
// =============================================================================

/// Log a story lifecycle event (created, renamed, destroyed)
pub fn log_story_event(story_id: StoryId, action: &str, title: &str) {
    tracing::info!(
        event_type = "story_lifecycle",
        story_id = %story_id,
        action = action,
        title = title,
        "Story {} {}", action, title
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_path_file_name() {
        assert_eq!(log_path().file_name().unwrap(), LOG_FILE_NAME);
    }

    #[test]
    fn test_log_story_event_without_subscriber() {
        // No subscriber installed: the event is dropped without panicking
        log_story_event(StoryId::new(), "created", "Untitled");
    }
}
