//! Credential and cookie configuration for probes

use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Authentication configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,
    /// HTTP basic authentication
    Basic { username: String, password: String },
}

impl AuthConfig {
    /// Parses a `user:password` CLI credential string
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once(':') {
            Some((user, pass)) if !user.is_empty() => Ok(AuthConfig::Basic {
                username: user.to_string(),
                password: pass.to_string(),
            }),
            _ => Err(ScanError::ConfigError(format!(
                "invalid auth string '{raw}', expected user:password"
            ))),
        }
    }
}

/// Cookie configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum CookieConfig {
    /// Send no cookies
    #[default]
    None,
    /// Raw `Cookie` header value passed on the command line
    Header(String),
    /// Netscape-format cookie jar loaded from disk
    Jar(PathBuf),
}

impl CookieConfig {
    /// Resolves the configuration into a `Cookie` header value.
    ///
    /// A jar path that does not exist is a configuration error; the
    /// caller aborts before any probing starts.
    pub fn resolve(&self) -> Result<Option<String>> {
        match self {
            CookieConfig::None => Ok(None),
            CookieConfig::Header(raw) => Ok(Some(raw.clone())),
            CookieConfig::Jar(path) => {
                if !path.is_file() {
                    return Err(ScanError::ConfigError(format!(
                        "could not find cookie file: {}",
                        path.display()
                    )));
                }
                let header = load_jar(path)?;
                info!("Loaded cookie jar from {}", path.display());
                Ok(Some(header))
            }
        }
    }
}

/// Parses a Netscape `cookies.txt` jar into one Cookie header value.
///
/// Each non-comment line has seven tab-separated fields; the last two
/// are the cookie name and value. Malformed lines are skipped.
fn load_jar(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;

    let pairs: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            match fields.as_slice() {
                [_, _, _, _, _, name, value] => Some(format!("{name}={value}")),
                _ => None,
            }
        })
        .collect();

    Ok(pairs.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_auth_parse_valid() {
        let auth = AuthConfig::parse("admin:s3cret").expect("parse");
        match auth {
            AuthConfig::Basic { username, password } => {
                assert_eq!(username, "admin");
                assert_eq!(password, "s3cret");
            }
            AuthConfig::None => panic!("expected basic auth"),
        }
    }

    #[test]
    fn test_auth_parse_invalid() {
        assert!(AuthConfig::parse("no-separator").is_err());
        assert!(AuthConfig::parse(":onlypass").is_err());
    }

    #[test]
    fn test_jar_missing_file_is_config_error() {
        let cookies = CookieConfig::Jar(PathBuf::from("/nonexistent/cookies.txt"));
        assert!(cookies.resolve().is_err());
    }

    #[test]
    fn test_jar_parsing() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "# Netscape HTTP Cookie File").expect("write");
        writeln!(
            file,
            ".a.test\tTRUE\t/\tFALSE\t0\tsession\tabc123"
        )
        .expect("write");
        writeln!(file, ".a.test\tTRUE\t/\tFALSE\t0\ttoken\txyz").expect("write");
        writeln!(file, "malformed line").expect("write");

        let cookies = CookieConfig::Jar(file.path().to_path_buf());
        let header = cookies.resolve().expect("resolve").expect("header");
        assert_eq!(header, "session=abc123; token=xyz");
    }

    #[test]
    fn test_header_passthrough() {
        let cookies = CookieConfig::Header("k=v".to_string());
        assert_eq!(cookies.resolve().expect("resolve"), Some("k=v".to_string()));
    }
}
