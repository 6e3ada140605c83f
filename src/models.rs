//! Core data models for httpscan

use crate::filter::FilterRule;
use crate::http::{AuthConfig, CookieConfig, UserAgentMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Classification of a failed probe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Transport-level connection failure (refused, DNS, reset)
    Connection,
    /// HTTP-protocol-level error (malformed response, body decode)
    Http,
    /// Probe exceeded its timeout
    Timeout,
    /// Redirect chain limit exceeded
    TooManyRedirects,
    /// Catch-all for anything the transport reports that fits no bucket
    Unknown,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Connection => write!(f, "connection error"),
            FailureKind::Http => write!(f, "HTTP error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooManyRedirects => write!(f, "too many redirects"),
            FailureKind::Unknown => write!(f, "unknown error"),
        }
    }
}

/// Outcome of probing one URL
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    /// The server answered with a complete HTTP response
    Success {
        status: u16,
        headers: Vec<(String, String)>,
        body: String,
        /// Taken from a well-formed `content-length` header when present,
        /// otherwise the decoded body text length
        length: u64,
    },
    /// The request never produced a usable response
    Failure { kind: FailureKind, message: String },
}

impl ProbeOutcome {
    /// Returns the HTTP status for a Success outcome
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Success { status, .. } => Some(*status),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }
}

/// The serialized unit written to the CSV and JSONL sinks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeRecord {
    pub url: String,
    pub status: u16,
    pub length: u64,
}

impl ProbeRecord {
    /// Builds a record from a Success outcome; Failures carry no record
    pub fn from_outcome(url: &str, outcome: &ProbeOutcome) -> Option<Self> {
        match outcome {
            ProbeOutcome::Success { status, length, .. } => Some(Self {
                url: url.to_string(),
                status: *status,
                length: *length,
            }),
            ProbeOutcome::Failure { .. } => None,
        }
    }
}

/// Output sink toggles, each independently optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print one colored line per result to stdout
    pub console: bool,
    /// Show a progress bar instead of per-result console lines
    pub progress: bool,
    /// Write debug-severity lines to the scan log
    pub verbose: bool,
    /// Scan log file path
    pub log_path: Option<PathBuf>,
    /// Semicolon-delimited tabular output
    pub csv_path: Option<PathBuf>,
    /// Record-per-line structured output
    pub json_path: Option<PathBuf>,
    /// Directory for raw response body dumps
    pub dump_dir: Option<PathBuf>,
}

/// Configuration for a scan session, immutable once the engine starts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Maximum concurrent in-flight probes
    pub pool_size: usize,
    /// Per-probe timeout in seconds
    pub timeout_secs: u64,
    /// Whether to follow HTTP redirects
    pub follow_redirects: bool,
    /// User-Agent header selection
    pub user_agent: UserAgentMode,
    /// Basic-auth credentials
    pub auth: AuthConfig,
    /// Cookies to send with every probe
    pub cookies: CookieConfig,
    /// Skip TLS certificate verification
    pub insecure: bool,
    /// Status-code allow/ignore rule
    pub filter: FilterRule,
    /// Output sink configuration
    pub output: OutputConfig,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pool_size: 5,
            timeout_secs: 10,
            follow_redirects: false,
            user_agent: UserAgentMode::default(),
            auth: AuthConfig::None,
            cookies: CookieConfig::None,
            insecure: false,
            filter: FilterRule::default(),
            output: OutputConfig {
                console: true,
                ..OutputConfig::default()
            },
        }
    }
}
