//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start the rolling file logger once per process.
//! - Capture panics as one-line log events.
//!
//! # Invariants
//! - Re-initializing with the same level and directory is a no-op.
//! - Re-initializing with a different level or directory is rejected.
//! - Nothing in this module panics.
//! - Store events carry ids and counts only, never user-entered field values.

use flexi_logger::{
    Cleanup, Criterion, FileSpec, LogSpecification, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::any::Any;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "userdesk";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Where and how verbosely to log, as requested by a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LogTarget {
    level: LevelFilter,
    dir: PathBuf,
}

impl LogTarget {
    fn parse(level: &str, dir: &str) -> Result<Self, String> {
        let level = match level.trim().parse::<LevelFilter>() {
            Ok(LevelFilter::Off) | Err(_) => {
                return Err(format!(
                    "unsupported log level `{}`; expected trace|debug|info|warn|error",
                    level.trim()
                ));
            }
            Ok(level) => level,
        };

        let dir = dir.trim();
        if dir.is_empty() {
            return Err("log_dir cannot be empty".to_string());
        }
        let dir = Path::new(dir);
        if !dir.is_absolute() {
            return Err(format!(
                "log_dir must be an absolute path, got `{}`",
                dir.display()
            ));
        }

        Ok(Self {
            level,
            dir: dir.to_path_buf(),
        })
    }
}

struct ActiveLogger {
    target: LogTarget,
    _handle: LoggerHandle,
}

impl ActiveLogger {
    fn accept(&self, requested: &LogTarget) -> Result<(), String> {
        if self.target == *requested {
            return Ok(());
        }
        Err(format!(
            "logging already initialized as {} at `{}`; refusing to switch to {} at `{}`",
            self.target.level,
            self.target.dir.display(),
            requested.level,
            requested.dir.display()
        ))
    }
}

/// Initializes file logging for the given level and absolute directory.
///
/// # Errors
/// - `level` is not one of `trace|debug|info|warn|error` (any case).
/// - `log_dir` is blank, relative, or cannot be created.
/// - A logger is already active with another level or directory.
/// - The `flexi_logger` backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogTarget::parse(level, log_dir)?;
    ACTIVE_LOGGER
        .get_or_try_init(|| start_logger(requested.clone()))?
        .accept(&requested)
}

/// Returns `(level, log_dir)` of the active logger, if any.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.target.level, active.target.dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(target: LogTarget) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&target.dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            target.dir.display()
        )
    })?;

    let spec = LogSpecification::builder().default(target.level).build();
    let handle = Logger::with(spec)
        .log_to_file(
            FileSpec::default()
                .directory(target.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    if PANIC_HOOK.set(()).is_ok() {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            error!(
                "event=panic_captured module=logging status=error location={} payload={}",
                location,
                single_line(payload_text(panic_info.payload()), MAX_PANIC_PAYLOAD_CHARS)
            );
            previous(panic_info);
        }));
    }

    info!(
        "event=logging_init module=logging status=ok level={} log_dir={} version={}",
        target.level,
        target.dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogger {
        target,
        _handle: handle,
    })
}

fn payload_text(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Flattens `value` onto one line and caps it at `max_chars`, appending `...`
/// when anything was cut.
pub(crate) fn single_line(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let mut out: String = chars
        .by_ref()
        .take(max_chars)
        .map(|ch| if matches!(ch, '\n' | '\r') { ' ' } else { ch })
        .collect();
    if chars.next().is_some() {
        out.push_str("...");
    }
    out
}
