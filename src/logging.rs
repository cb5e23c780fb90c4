use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::core::{WgetError, WgetResult};

/// Log file used by background mode, relative to the working directory
pub const BACKGROUND_LOG_FILE: &str = "wget-log";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogDestination {
    Stdout,
    /// Truncated when logging starts
    File(PathBuf),
}

impl LogDestination {
    pub fn background() -> Self {
        LogDestination::File(PathBuf::from(BACKGROUND_LOG_FILE))
    }
}

/// Filter directive: `RUST_LOG` when set and valid, else `default_level`
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs the global `tracing` subscriber
///
/// Output is the plain report format: no timestamps or targets, ANSI colour
/// only when `color` is set and the destination is stdout. Calling this twice
/// leaves the first subscriber in place.
pub fn init_logging(destination: &LogDestination, level: &str, color: bool) -> WgetResult<()> {
    let (writer, ansi) = match destination {
        LogDestination::Stdout => (BoxMakeWriter::new(std::io::stdout), color),
        LogDestination::File(path) => {
            let file = File::create(path).map_err(|e| WgetError::filesystem(path, e))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    // Already initialised (tests, repeated calls): keep the existing one
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .try_init();

    Ok(())
}

/// Whether coloured output makes sense for stdout
pub fn stdout_supports_color(no_color: bool) -> bool {
    !no_color && atty::is(atty::Stream::Stdout)
}
