//! Append-only log file sink with daily rotation and retention.
//!
//! The library only emits through the `log` facade. A binary constructs a
//! [`FileLogger`] explicitly and installs it once; nothing is set up as a
//! side effect of using the crate.
//!
//! Records go to `<stem>.<YYYY-MM-DD>.log` in the configured directory,
//! rotated daily by `tracing-appender`, which also keeps at most
//! `retention_days` files of that stem.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::io::{self, Write};
use std::sync::Mutex;
use thiserror::Error;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

use crate::config::LogConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    Init(#[from] InitError),

    #[error("a logger is already installed")]
    AlreadyInstalled(#[from] log::SetLoggerError),
}

pub struct FileLogger {
    level: LevelFilter,
    appender: Mutex<RollingFileAppender>,
}

impl FileLogger {
    /// Opens the daily-rotated file appender in `config.dir`, creating the
    /// directory if needed.
    pub fn open(config: &LogConfig, level: LevelFilter) -> Result<Self, LoggingError> {
        let mut builder = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(config.stem.as_str())
            .filename_suffix("log");
        if config.retention_days > 0 {
            builder = builder.max_log_files(config.retention_days as usize);
        }
        let appender = builder.build(&config.dir)?;

        Ok(Self {
            level,
            appender: Mutex::new(appender),
        })
    }

    /// Installs this sink as the process-wide `log` backend.
    pub fn install(self) -> Result<(), LoggingError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn write_line(&self, line: &str) -> io::Result<()> {
        let Ok(mut appender) = self.appender.lock() else {
            return Ok(());
        };
        writeln!(appender, "{line}")
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "{} | {:<5} | {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );

        if let Err(e) = self.write_line(&line) {
            eprintln!("wifi-connect: failed to write log record: {e}");
        }
    }

    fn flush(&self) {
        if let Ok(mut appender) = self.appender.lock() {
            let _ = appender.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use std::fs;
    use std::path::PathBuf;

    fn temp_config() -> LogConfig {
        LogConfig {
            dir: std::env::temp_dir().join(format!("wifi-connect-log-{}", uuid::Uuid::new_v4())),
            stem: "netman".to_string(),
            retention_days: 15,
        }
    }

    fn log_files(config: &LogConfig) -> Vec<PathBuf> {
        fs::read_dir(&config.dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[test]
    fn writes_records_to_dated_file() {
        let config = temp_config();
        let logger = FileLogger::open(&config, LevelFilter::Debug).unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("Connection hotspot is live."))
                .level(Level::Debug)
                .target("wifi_connect::core::connection")
                .build(),
        );
        logger.flush();

        let files = log_files(&config);
        assert_eq!(files.len(), 1);
        let name = files[0].file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("netman."), "{name}");
        assert!(name.ends_with(".log"), "{name}");

        let contents = fs::read_to_string(&files[0]).unwrap();
        assert!(contents.contains("DEBUG"));
        assert!(contents.contains("wifi_connect::core::connection - Connection hotspot is live."));

        fs::remove_dir_all(&config.dir).unwrap();
    }

    #[test]
    fn records_below_level_are_dropped() {
        let config = temp_config();
        let logger = FileLogger::open(&config, LevelFilter::Info).unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("noisy detail"))
                .level(Level::Trace)
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("kept"))
                .level(Level::Warn)
                .build(),
        );
        logger.flush();

        let files = log_files(&config);
        let contents = fs::read_to_string(&files[0]).unwrap();
        assert!(!contents.contains("noisy detail"));
        assert!(contents.contains("kept"));

        fs::remove_dir_all(&config.dir).unwrap();
    }
}
