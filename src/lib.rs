//! httpscan - Multithreaded HTTP scanner
//!
//! Probes the cross-product of a host list and a path list over
//! HTTP(S) under a bounded concurrency budget, classifies every
//! outcome, and records results through configurable output sinks
//! (console, scan log, CSV, JSONL, raw body dumps).

pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod models;
pub mod output;
pub mod scanner;
pub mod targets;
