//! HTTP probe module for httpscan

pub mod agent;
pub mod auth;
pub mod client;
pub use agent::UserAgentMode;
pub use auth::{AuthConfig, CookieConfig};
pub use client::{HttpProber, Prober};
