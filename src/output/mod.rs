//! Thread-safe composite result sink
//!
//! One `Output` is constructed per run and shared as `Arc<Output>` by
//! every worker. A single mutex guards all channel writes so that
//! concurrent workers never split a record mid-write across any channel.

pub mod csv;
pub mod dump;
pub mod jsonl;

use crate::error::Result;
use crate::models::{OutputConfig, ProbeOutcome, ProbeRecord};
use chrono::Local;
use colored::Colorize;
use self::csv::CsvSink;
use self::jsonl::JsonlSink;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

/// Timestamp format used on console lines and in the scan log
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Severity of a scan log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Returns the current local time in scan log format
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Writer state behind the sink lock
struct Channels {
    log: Option<File>,
    csv: Option<CsvSink>,
    json: Option<JsonlSink>,
}

/// Composite output sink for scan results
pub struct Output {
    console: bool,
    progress: bool,
    verbose: bool,
    dump_root: Option<PathBuf>,
    channels: Mutex<Channels>,
}

impl Output {
    /// Opens every configured channel. File creation failures here are
    /// configuration errors and abort the run before probing starts.
    pub fn from_config(config: &OutputConfig) -> Result<Self> {
        let log = match &config.log_path {
            Some(path) => Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?,
            ),
            None => None,
        };

        let csv = match &config.csv_path {
            Some(path) => Some(CsvSink::create(path)?),
            None => None,
        };

        let json = match &config.json_path {
            Some(path) => Some(JsonlSink::create(path)?),
            None => None,
        };

        Ok(Self {
            console: config.console,
            progress: config.progress,
            verbose: config.verbose,
            dump_root: config.dump_dir.clone(),
            channels: Mutex::new(Channels { log, csv, json }),
        })
    }

    /// Records one accepted probe result across every active channel.
    ///
    /// Thread-safe; all writes for this call happen under one lock. A
    /// failing channel drops that single write and never aborts the scan.
    pub fn record(&self, url: &str, outcome: &ProbeOutcome) {
        let record = match ProbeRecord::from_outcome(url, outcome) {
            Some(record) => record,
            None => return,
        };

        let mut channels = match self.channels.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if self.console && !self.progress {
            print_result_line(&record);
        }

        if let Some(log) = channels.log.as_mut() {
            let line = format!(
                "{} - INFO - {} {} {}\n",
                timestamp(),
                record.url,
                record.status,
                record.length
            );
            if log.write_all(line.as_bytes()).is_err() {
                warn!("dropped log write for {}", record.url);
            }
        }

        if let Some(csv) = channels.csv.as_mut() {
            if csv.write_record(&record).is_err() {
                warn!("dropped CSV write for {}", record.url);
            }
        }

        if let Some(json) = channels.json.as_mut() {
            if json.write_record(&record).is_err() {
                warn!("dropped JSONL write for {}", record.url);
            }
        }

        if let Some(root) = &self.dump_root {
            if let ProbeOutcome::Success { body, .. } = outcome {
                if let Err(e) = dump::write_body(root, url, body) {
                    warn!("dropped dump write for {url}: {e}");
                }
            }
        }
    }

    /// Writes one line to the scan log channel, if configured.
    ///
    /// Debug lines are suppressed unless verbose mode is on; a write
    /// failure degrades to a silent drop for that line.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level == LogLevel::Debug && !self.verbose {
            return;
        }

        let mut channels = match self.channels.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(log) = channels.log.as_mut() {
            let line = format!("{} - {} - {}\n", timestamp(), level, message);
            let _ = log.write_all(line.as_bytes());
        }
    }
}

/// Prints the color-coded console line: green 200, red 4xx, yellow else
fn print_result_line(record: &ProbeRecord) {
    let line = format!(
        "[{}] {} -> {}",
        timestamp(),
        record.url,
        record.status
    );
    let colored_line = match record.status {
        200 => line.green(),
        400..=499 => line.red(),
        _ => line.yellow(),
    };
    println!("{colored_line}");
}
