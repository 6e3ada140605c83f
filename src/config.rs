//! Configuration file support for httpscan

use crate::error::Result;
use crate::models::ScanConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File-based configuration structure
#[derive(Debug, Deserialize)]
struct FileConfig {
    scan: Option<ScanSection>,
    output: Option<OutputSection>,
}

#[derive(Debug, Deserialize)]
struct ScanSection {
    threads: Option<usize>,
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    follow_redirects: Option<bool>,
    insecure: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct OutputSection {
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
    log_file: Option<PathBuf>,
    dump: Option<PathBuf>,
}

/// Loads configuration from a TOML file and merges with defaults.
/// CLI flags are applied on top by the caller.
pub fn load_config(path: &Path) -> Result<ScanConfig> {
    let content = std::fs::read_to_string(path)?;
    let file_config: FileConfig = toml::from_str(&content)?;

    let mut config = ScanConfig::default();

    if let Some(scan) = file_config.scan {
        if let Some(threads) = scan.threads {
            config.pool_size = threads;
        }
        if let Some(timeout) = scan.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(ua) = scan.user_agent {
            config.user_agent = crate::http::UserAgentMode::Fixed(ua);
        }
        if let Some(follow) = scan.follow_redirects {
            config.follow_redirects = follow;
        }
        if let Some(insecure) = scan.insecure {
            config.insecure = insecure;
        }
    }

    if let Some(output) = file_config.output {
        config.output.csv_path = output.csv;
        config.output.json_path = output.json;
        config.output.log_path = output.log_file;
        config.output.dump_dir = output.dump;
    }

    Ok(config)
}
