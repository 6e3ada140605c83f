//! httpscan CLI entry point

use clap::Parser;
use colored::Colorize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use httpscan::config;
use httpscan::error::Result;
use httpscan::http::{AuthConfig, CookieConfig, UserAgentMode};
use httpscan::models::ScanConfig;
use httpscan::output::timestamp;
use httpscan::scanner::ScanEngine;
use httpscan::targets;

/// Multithreaded HTTP scanner: probes every host x path combination and
/// records statuses through the configured output sinks
#[derive(Parser)]
#[command(name = "httpscan", version, about, long_about = None)]
struct Cli {
    /// File with target hosts, one per line
    hosts: PathBuf,

    /// File with URL paths to probe, one per line
    paths: PathBuf,

    /// HTTP probe timeout in seconds
    #[arg(short = 't', long, default_value_t = 10)]
    timeout: u64,

    /// Concurrent probe count
    #[arg(short = 'T', long, default_value_t = 5)]
    threads: usize,

    /// Follow HTTP redirects
    #[arg(short = 'r', long)]
    allow_redirects: bool,

    /// HTTP basic auth as user:password
    #[arg(short = 'a', long)]
    auth: Option<String>,

    /// Cookie header value to send with every probe
    #[arg(short = 'c', long)]
    cookies: Option<String>,

    /// Load cookies from a Netscape-format jar file
    #[arg(short = 'C', long)]
    load_cookies: Option<PathBuf>,

    /// Fixed User-Agent header value
    #[arg(short = 'u', long)]
    user_agent: Option<String>,

    /// Pick a random User-Agent per probe
    #[arg(short = 'R', long)]
    random_agent: bool,

    /// Skip TLS certificate verification
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Save response bodies under this directory
    #[arg(short = 'd', long)]
    dump: Option<PathBuf>,

    /// Record only these HTTP statuses
    #[arg(short = 'A', long, num_args = 1.., value_delimiter = ',')]
    allow: Option<Vec<u16>>,

    /// Never record these HTTP statuses
    #[arg(short = 'I', long, num_args = 1.., value_delimiter = ',')]
    ignore: Option<Vec<u16>>,

    /// Write results to a CSV file
    #[arg(long = "output-csv")]
    output_csv: Option<PathBuf>,

    /// Write results to a JSON-lines file
    #[arg(long = "output-json")]
    output_json: Option<PathBuf>,

    /// Show a progress bar instead of per-result lines
    #[arg(short = 'P', long)]
    progress: bool,

    /// Scan log file path
    #[arg(short = 'L', long)]
    log_file: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output (debug diagnostics and debug scan-log lines)
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Applies CLI flags on top of the file/default configuration
fn build_config(cli: &Cli) -> Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ScanConfig::default(),
    };

    config.pool_size = cli.threads;
    config.timeout_secs = cli.timeout;
    if cli.allow_redirects {
        config.follow_redirects = true;
    }
    if cli.insecure {
        config.insecure = true;
    }

    if cli.random_agent {
        config.user_agent = UserAgentMode::Random;
    } else if let Some(ua) = &cli.user_agent {
        config.user_agent = UserAgentMode::Fixed(ua.clone());
    }

    if let Some(raw) = &cli.auth {
        config.auth = AuthConfig::parse(raw)?;
    }

    // A jar file takes precedence over a raw cookie header
    if let Some(jar) = &cli.load_cookies {
        config.cookies = CookieConfig::Jar(jar.clone());
    } else if let Some(raw) = &cli.cookies {
        config.cookies = CookieConfig::Header(raw.clone());
    }

    let to_set = |codes: &Option<Vec<u16>>| -> Option<HashSet<u16>> {
        codes.as_ref().map(|list| list.iter().copied().collect())
    };
    config.filter.allow = to_set(&cli.allow);
    config.filter.ignore = to_set(&cli.ignore);

    if let Some(path) = &cli.output_csv {
        config.output.csv_path = Some(path.clone());
    }
    if let Some(path) = &cli.output_json {
        config.output.json_path = Some(path.clone());
    }
    if let Some(path) = &cli.log_file {
        config.output.log_path = Some(path.clone());
    }
    if let Some(dir) = &cli.dump {
        config.output.dump_dir = Some(dir.clone());
    }
    config.output.progress = cli.progress;
    config.output.verbose = cli.verbose;

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;

    let hosts = targets::load_lines(&cli.hosts)?;
    let paths = targets::load_lines(&cli.paths)?;
    let urls = targets::build(&hosts, &paths)?;

    println!(
        "{} hosts {} paths loaded, {} urls to scan",
        hosts.len(),
        paths.len(),
        urls.len()
    );

    let engine = ScanEngine::from_config(&config)?;

    let started = timestamp();
    let outcomes = engine.run(&urls, &config).await;
    let finished = timestamp();

    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    println!("\n{}", "Statistics:".bold());
    println!(
        "{} urls scanned, {} responded, {} failed",
        outcomes.len(),
        succeeded,
        outcomes.len() - succeeded
    );
    println!("Scan started {started}");
    println!("Scan finished {finished}");

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "httpscan=debug"
    } else {
        "httpscan=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}
