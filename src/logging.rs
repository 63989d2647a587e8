//! Logger setup for the driver.
//!
//! Records go through the `log` facade to `env_logger`, either on stderr or
//! into one file per day under the configured log directory. Old log files
//! are cleaned up at startup.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

use chrono::Local;
use log::LevelFilter;

use crate::config::DriverConfig;
use crate::error::{ResultExt, ShimResult};

/// Maximum number of log files to keep
const MAX_LOG_FILES: usize = 5;

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: &DriverConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder
            .filter_level(parse_level(&config.log_level))
            .parse_env("RUST_LOG")
            .format(|buf, record| {
                let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
                writeln!(
                    buf,
                    "[{}] [{}] [{}] {}",
                    timestamp,
                    record.level(),
                    record.target(),
                    record.args()
                )
            });

        let mut file_error = None;
        if let Some(dir) = &config.log_directory {
            match open_log_file(dir) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                }
                Err(e) => file_error = Some(e),
            }
        }

        if builder.try_init().is_err() {
            // Someone else owns the global logger.
            return;
        }

        log::info!("[LOG] Logging system initialized");
        match (&config.log_directory, file_error) {
            (Some(dir), None) => log::info!("[LOG] Log directory: {:?}", dir),
            (Some(dir), Some(e)) => log::warn!("[LOG] Cannot log to {:?}: {}", dir, e),
            _ => {}
        }
    });
}

/// Maps a configured level name to a filter. Unknown names mean `info`.
fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Opens today's log file in `dir` for appending and prunes old files.
fn open_log_file(dir: &Path) -> ShimResult<File> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let path = current_log_path(dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    cleanup_old_logs(dir);
    Ok(file)
}

/// Get the path for the current log file (one per day)
fn current_log_path(dir: &Path) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    dir.join(format!("d3d9_{}.log", date))
}

/// Clean up old log files, keeping only the most recent MAX_LOG_FILES
fn cleanup_old_logs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    let mut log_files: Vec<_> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "log"))
        .collect();

    // Newest first
    log_files.sort_by(|a, b| {
        let a_time = a.metadata().and_then(|m| m.modified()).ok();
        let b_time = b.metadata().and_then(|m| m.modified()).ok();
        b_time.cmp(&a_time)
    });

    for file in log_files.into_iter().skip(MAX_LOG_FILES) {
        let _ = fs::remove_file(file.path());
    }
}
