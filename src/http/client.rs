//! Probe executor: one HTTP GET per URL, every outcome classified

use crate::error::Result;
use crate::http::agent::UserAgentMode;
use crate::http::auth::AuthConfig;
use crate::models::{FailureKind, ProbeOutcome, ScanConfig};
use async_trait::async_trait;
use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Redirect chain limit when redirect following is enabled
const MAX_REDIRECTS: usize = 10;

/// Issues one probe against one URL.
///
/// Implementations must be safe to call concurrently from any number of
/// workers and must never panic across the worker boundary: every
/// failure mode is folded into a `ProbeOutcome::Failure`.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

/// reqwest-backed prober, stateless between invocations
pub struct HttpProber {
    client: Client,
    user_agent: UserAgentMode,
    auth: AuthConfig,
    cookie_header: Option<String>,
}

impl HttpProber {
    /// Builds a prober from the scan configuration.
    ///
    /// Cookie jar loading happens here so that a missing jar file aborts
    /// the run before any probe starts.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(MAX_REDIRECTS)
            } else {
                reqwest::redirect::Policy::none()
            })
            .danger_accept_invalid_certs(config.insecure)
            .build()?;

        let cookie_header = config.cookies.resolve()?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            auth: config.auth.clone(),
            cookie_header,
        })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let mut req = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.pick());

        if let AuthConfig::Basic { username, password } = &self.auth {
            req = req.basic_auth(username, Some(password));
        }
        if let Some(cookies) = &self.cookie_header {
            req = req.header(COOKIE, cookies.clone());
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => return classify(&e),
        };

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let content_length = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<u64>().ok());

        match response.text().await {
            Ok(body) => {
                let length = content_length.unwrap_or(body.len() as u64);
                debug!("Probe {url} -> {status} ({length} bytes)");
                ProbeOutcome::Success {
                    status,
                    headers,
                    body,
                    length,
                }
            }
            Err(e) => classify(&e),
        }
    }
}

/// Maps a reqwest error onto the failure taxonomy
fn classify(e: &reqwest::Error) -> ProbeOutcome {
    let kind = if e.is_timeout() {
        FailureKind::Timeout
    } else if e.is_connect() {
        FailureKind::Connection
    } else if e.is_redirect() {
        FailureKind::TooManyRedirects
    } else if e.is_status() || e.is_decode() || e.is_body() {
        FailureKind::Http
    } else {
        FailureKind::Unknown
    };

    ProbeOutcome::Failure {
        kind,
        message: e.to_string(),
    }
}
