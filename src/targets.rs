//! Target set construction: hosts x paths -> deduplicated URL list

use crate::error::{Result, ScanError};
use std::collections::HashSet;
use std::path::Path;

/// Normalizes a raw host entry into an absolute base URL.
///
/// A `:443` port marker implies HTTPS; anything without a scheme gets
/// plain HTTP; entries that already carry a scheme are used verbatim.
pub fn normalize_host(host: &str) -> String {
    if host.contains(":443") {
        format!("https://{host}")
    } else if !host.to_lowercase().starts_with("http") {
        format!("http://{host}")
    } else {
        host.to_string()
    }
}

/// Joins a path template onto a base URL with RFC 3986 relative
/// resolution: an absolute template replaces the base path, a relative
/// one resolves against the base path's directory.
///
/// String-level on purpose: the url crate strips default ports during
/// normalization, and operators expect an explicit `:443` marker to
/// survive into the target list verbatim.
pub fn join(base: &str, path: &str) -> String {
    let lower = path.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return path.to_string();
    }

    let (prefix, base_path) = match base.find("://") {
        Some(scheme_end) => {
            let authority_start = scheme_end + 3;
            match base[authority_start..].find('/') {
                Some(slash) => base.split_at(authority_start + slash),
                None => (base, ""),
            }
        }
        None => (base, ""),
    };

    if path.starts_with('/') {
        format!("{prefix}{path}")
    } else {
        // Relative resolution: drop the last segment of the base path
        let dir = match base_path.rfind('/') {
            Some(slash) => &base_path[..=slash],
            None => "/",
        };
        format!("{prefix}{dir}{path}")
    }
}

/// Builds the deduplicated target URL list from hosts and path templates.
/// First occurrence wins; insertion order is preserved.
pub fn build(hosts: &[String], paths: &[String]) -> Result<Vec<String>> {
    if hosts.is_empty() {
        return Err(ScanError::ConfigError("host list is empty".to_string()));
    }
    if paths.is_empty() {
        return Err(ScanError::ConfigError("path list is empty".to_string()));
    }

    let mut targets = Vec::new();
    let mut seen = HashSet::new();

    for host in hosts {
        let base = normalize_host(host);
        for path in paths {
            let full = join(&base, path);
            if seen.insert(full.clone()) {
                targets.push(full);
            }
        }
    }

    Ok(targets)
}

/// Reads a newline-delimited input file, discarding blank lines.
///
/// A missing or unreadable file is a configuration error: the caller is
/// expected to abort before any probing starts.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ScanError::ConfigError(format!("cannot read {}: {e}", path.display()))
    })?;

    Ok(content
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_plain_host() {
        assert_eq!(normalize_host("example.com"), "http://example.com");
    }

    #[test]
    fn test_normalize_https_port_marker() {
        assert_eq!(normalize_host("example.com:443"), "https://example.com:443");
    }

    #[test]
    fn test_normalize_existing_scheme_untouched() {
        assert_eq!(normalize_host("https://example.com"), "https://example.com");
        assert_eq!(normalize_host("HTTP://example.com"), "HTTP://example.com");
    }

    #[test]
    fn test_join_absolute_path() {
        assert_eq!(join("http://a.test", "/x"), "http://a.test/x");
        assert_eq!(join("http://a.test/base/", "/admin"), "http://a.test/admin");
    }

    #[test]
    fn test_join_relative_path() {
        assert_eq!(join("http://a.test/base/", "sub"), "http://a.test/base/sub");
        assert_eq!(join("http://a.test/base", "sub"), "http://a.test/sub");
        assert_eq!(join("http://a.test", "x"), "http://a.test/x");
    }

    #[test]
    fn test_join_absolute_template_replaces_base() {
        assert_eq!(join("http://a.test/x", "http://b.test/y"), "http://b.test/y");
    }

    #[test]
    fn test_build_joins_hosts_and_paths() {
        let targets = build(&strings(&["example.com"]), &strings(&["/a"])).expect("build");
        assert_eq!(targets, vec!["http://example.com/a"]);

        let targets =
            build(&strings(&["example.com:443"]), &strings(&["/a"])).expect("build");
        assert_eq!(targets, vec!["https://example.com:443/a"]);
    }

    #[test]
    fn test_build_deduplicates_preserving_order() {
        let targets = build(
            &strings(&["a.test", "a.test"]),
            &strings(&["/x", "/y", "/x"]),
        )
        .expect("build");
        assert_eq!(targets, vec!["http://a.test/x", "http://a.test/y"]);
    }

    #[test]
    fn test_build_rejects_empty_inputs() {
        assert!(build(&[], &strings(&["/a"])).is_err());
        assert!(build(&strings(&["a.test"]), &[]).is_err());
    }
}
