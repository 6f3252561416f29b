//! Logging and diagnostics setup.
//!
//! - File logging through `tracing` (JSON, daily rolling), since the TUI owns
//!   the terminal and nothing may be written to stdout while it runs.
//! - `log` macros are bridged into `tracing`.
//! - Old rolled log files are gzip-compressed in the background.
//! - Startup failures are reported with miette diagnostics.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use miette::Diagnostic;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log file.
pub const LOG_FILE_PREFIX: &str = "cinematch.log";

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info";

/// Directory the log files go to, under the resolved data directory.
pub fn log_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// Initialize file logging for TUI mode.
///
/// `RUST_LOG` wins over `filter`. Returns a `WorkerGuard` that must be kept
/// alive until shutdown so buffered lines are flushed.
pub fn init_tui(data_dir: &Path, filter: Option<&str>) -> WorkerGuard {
    let log_dir = log_dir(data_dir);
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter.unwrap_or(DEFAULT_FILTER)));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter);

    // No stdout layer, the TUI owns the terminal
    if let Err(e) = tracing_subscriber::registry().with(file_layer).try_init() {
        eprintln!("Failed to initialize tracing subscriber: {}", e);
    }

    // try_init already installs the bridge when tracing-subscriber's
    // `tracing-log` feature is on; this covers builds without it.
    let _ = tracing_log::LogTracer::init();

    init_miette();

    let log_dir_clone = log_dir.clone();
    std::thread::spawn(move || {
        compress_old_logs(&log_dir_clone);
    });

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

/// Whether a file in the log directory is a rolled log that should be
/// compressed. Today's file and already-compressed files are left alone.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{LOG_FILE_PREFIX}."))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Compress old log files in the background
fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let file = fs::File::open(path)?;
    let mut reader = io::BufReader::new(file);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?
        .join(gz_name);

    // Skip if already exists
    if gz_path.exists() {
        return Ok(());
    }

    let output = fs::File::create(&gz_path)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(())
}

/// Initialize miette for error reporting after the terminal is restored.
fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .context_lines(3)
                .tab_width(4)
                .break_words(true)
                .build(),
        )
    }))
    .ok(); // Ignore if already set
}

// ============================================================================
// Diagnostic Error Types (miette integration)
// ============================================================================

/// Fatal error raised before or after the TUI runs.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code("CINEMATCH::STARTUP"))]
pub struct StartupError {
    message: String,

    #[help]
    help_text: Option<String>,
}

impl StartupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help_text: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }
}
