//! User-Agent header selection

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Pool of common browser User-Agent strings used in random mode
const AGENT_POOL: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
];

/// How the User-Agent header is chosen per probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UserAgentMode {
    /// Send the same string on every request
    Fixed(String),
    /// Pick a fresh string from the built-in pool on every request
    Random,
}

impl Default for UserAgentMode {
    fn default() -> Self {
        UserAgentMode::Fixed(format!("httpscan/{}", env!("CARGO_PKG_VERSION")))
    }
}

impl UserAgentMode {
    /// Returns the User-Agent value for the next request
    pub fn pick(&self) -> String {
        match self {
            UserAgentMode::Fixed(ua) => ua.clone(),
            UserAgentMode::Random => {
                let mut rng = rand::rng();
                AGENT_POOL
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or(AGENT_POOL[0])
                    .to_string()
            }
        }
    }
}
