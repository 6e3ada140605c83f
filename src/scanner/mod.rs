//! Scan engine: bounded-concurrency dispatch of probes over a target set

use crate::error::Result;
use crate::http::{HttpProber, Prober};
use crate::models::{ProbeOutcome, ScanConfig};
use crate::output::{LogLevel, Output};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::{debug, error};

/// Drives the worker pool: feeds it the target list, invokes the prober
/// per URL, applies the status filter and fans accepted results out to
/// the output sinks.
pub struct ScanEngine {
    prober: Arc<dyn Prober>,
    output: Arc<Output>,
}

impl ScanEngine {
    /// Creates an engine over an explicit prober and sink, used by tests
    /// to instrument concurrency and completion order
    pub fn new(prober: Arc<dyn Prober>, output: Arc<Output>) -> Self {
        Self { prober, output }
    }

    /// Creates the production engine: reqwest prober + configured sinks.
    ///
    /// Any configuration error here (unreadable cookie jar, unwritable
    /// output file) aborts before the first probe.
    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        let prober = Arc::new(HttpProber::from_config(config)?);
        let output = Arc::new(Output::from_config(&config.output)?);
        Ok(Self::new(prober, output))
    }

    /// Probes every target with at most `config.pool_size` requests in
    /// flight. Sinks see results in completion order; the returned list
    /// is index-aligned with `targets` (submission order).
    pub async fn run(&self, targets: &[String], config: &ScanConfig) -> Vec<ProbeOutcome> {
        let pool_size = config.pool_size.max(1);

        let progress = if config.output.progress {
            let pb = ProgressBar::new(targets.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  {spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=>-"),
            );
            pb.set_message("scanning");
            Some(pb)
        } else {
            None
        };

        let mut slots: Vec<Option<ProbeOutcome>> = Vec::new();
        slots.resize_with(targets.len(), || None);

        let mut completions = stream::iter(targets.iter().enumerate().map(|(index, url)| {
            let prober = Arc::clone(&self.prober);
            let output = Arc::clone(&self.output);
            async move {
                debug!("Probing {url}");
                output.log(LogLevel::Debug, &format!("Scanning {url}"));
                let outcome = prober.probe(url).await;
                (index, outcome)
            }
        }))
        .buffer_unordered(pool_size);

        while let Some((index, outcome)) = completions.next().await {
            let url = &targets[index];

            match &outcome {
                ProbeOutcome::Failure { kind, message } => {
                    error!("{kind} while querying {url}: {message}");
                    self.output.log(
                        LogLevel::Error,
                        &format!("{kind} while querying {url}"),
                    );
                }
                ProbeOutcome::Success { .. } => {
                    if config.filter.accept(&outcome) {
                        self.output.record(url, &outcome);
                    }
                }
            }

            if let Some(pb) = &progress {
                pb.inc(1);
            }
            slots[index] = Some(outcome);
        }

        if let Some(pb) = &progress {
            pb.finish_with_message("scan complete");
        }

        // buffer_unordered yields every submitted future exactly once,
        // so each slot is filled by the time the stream is drained
        slots
            .into_iter()
            .map(|slot| slot.expect("probe completed for every submitted target"))
            .collect()
    }
}
