//! Raw response body dump sink
//!
//! Bodies land at `<root>/<host[:port]>/<url-path-without-leading-slash>`,
//! mirroring the URL's path hierarchy under a per-host subdirectory.

use std::io;
use std::path::{Path, PathBuf};

/// Leaf name used when the URL path ends in a slash
const INDEX_LEAF: &str = "index.html";

/// Splits an absolute URL into (host[:port], path), dropping userinfo,
/// query and fragment. The port marker is kept exactly as written.
fn split_url(url: &str) -> Option<(&str, &str)> {
    let scheme_end = url.find("://")?;
    let rest = &url[scheme_end + 3..];

    let (authority, path) = match rest.find('/') {
        Some(slash) => (&rest[..slash], &rest[slash..]),
        None => (rest, "/"),
    };

    let host = authority.rsplit('@').next()?;
    if host.is_empty() {
        return None;
    }
    let path = path.split(['?', '#']).next().unwrap_or("/");

    Some((host, path))
}

/// Derives the dump file path for a URL, or None for an unparseable URL
pub fn dump_path(root: &Path, url: &str) -> Option<PathBuf> {
    let (host, path) = split_url(url)?;

    let base = root.join(host);
    let rel = path.trim_start_matches('/');

    Some(if rel.is_empty() || rel.ends_with('/') {
        base.join(rel).join(INDEX_LEAF)
    } else {
        base.join(rel)
    })
}

/// Writes one response body, creating intermediate directories on demand.
/// An existing file at the target path is overwritten.
pub fn write_body(root: &Path, url: &str, body: &str) -> io::Result<()> {
    let path = dump_path(root, url).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("unparseable URL: {url}"))
    })?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)
}
