//! Central vocabulary for user-facing messages.
//!
//! All console text goes through the [`Message`] enum and the `msg_*!`
//! macros, which route to the tracing system when debug logging is enabled
//! (`CAMWATCH_DEBUG` or `RUST_LOG` set) and to plain console output
//! otherwise.

use std::fmt;
use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("CAMWATCH_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[derive(Debug, Clone)]
pub enum Message {
    // Configuration
    ConfigWizardHeader,
    ConfigSaved(String),
    ApiKeyMissing,

    // Inventory / detail
    FetchingCameras,
    CamerasFound(usize),
    CameraNotFound(String),
    NoCamerasMatched,

    // Archives
    NoArchivesFound,
    UnknownArchiveStatus(String),

    // Report workflow
    ReportHeader(u32),
    ReportWorkers(usize, u32),
    ReportInterrupted,
    ReportFetchError(String, String),
    ReportDone(usize, usize),
    ExportCompleted(String),
    ProblemCameras(usize),
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::ConfigWizardHeader => write!(f, "camwatch configuration"),
            Message::ConfigSaved(path) => write!(f, "Configuration saved to {}", path),
            Message::ApiKeyMissing => write!(
                f,
                "API key is not configured. Run `camwatch init` or set CAMWATCH_API_KEY"
            ),
            Message::FetchingCameras => write!(f, "Fetching camera list..."),
            Message::CamerasFound(count) => write!(f, "Found {} cameras", count),
            Message::CameraNotFound(uid) => write!(f, "Camera {} not found", uid),
            Message::NoCamerasMatched => write!(f, "No cameras matched the given filters"),
            Message::NoArchivesFound => write!(f, "No baked archives found"),
            Message::UnknownArchiveStatus(label) => {
                write!(f, "Unknown archive status: {} (expected NEW, ENQUEUED, ERROR or DONE)", label)
            }
            Message::ReportHeader(days) => write!(f, "Archive integrity report: last {} days", days),
            Message::ReportWorkers(workers, retries) => {
                write!(f, "Workers: {}, retries: {}", workers, retries)
            }
            Message::ReportInterrupted => write!(f, "Interrupted. Draining in-flight work..."),
            Message::ReportFetchError(uid, error) => write!(f, "ERROR {}: {}", uid, error),
            Message::ReportDone(total, errors) => {
                write!(f, "Processed {} cameras, errors: {}", total, errors)
            }
            Message::ExportCompleted(path) => write!(f, "Saved: {}", path),
            Message::ProblemCameras(count) => write!(f, "Problem cameras: {}", count),
        }
    }
}

/// Prints a general message, optionally padded with blank lines.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        if $crate::libs::messages::is_debug_mode() {
            tracing::info!("{}", $msg);
        } else {
            println!("{}", $msg);
        }
    };
    ($msg:expr, true) => {
        if $crate::libs::messages::is_debug_mode() {
            tracing::info!("\n{}\n", $msg);
        } else {
            println!("\n{}\n", $msg);
        }
    };
}

/// Prints a success message with a ✅ prefix.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        if $crate::libs::messages::is_debug_mode() {
            tracing::info!("✅ {}", $msg);
        } else {
            println!("✅ {}", $msg);
        }
    };
}

/// Prints an informational message with an ℹ️ prefix.
#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        if $crate::libs::messages::is_debug_mode() {
            tracing::info!("ℹ️ {}", $msg);
        } else {
            println!("ℹ️ {}", $msg);
        }
    };
}

/// Prints a warning message with a ⚠️ prefix.
#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        if $crate::libs::messages::is_debug_mode() {
            tracing::warn!("⚠️ {}", $msg);
        } else {
            println!("⚠️ {}", $msg);
        }
    };
}

/// Prints an error message with a ❌ prefix, on stderr in console mode.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        if $crate::libs::messages::is_debug_mode() {
            tracing::error!("❌ {}", $msg);
        } else {
            eprintln!("❌ {}", $msg);
        }
    };
}

/// Creates an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

/// Early-returns an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
