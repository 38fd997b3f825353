use anyhow::{bail, Context, Result};
use clap::Parser;
use dblp_bibmerge::config::{find_config_file, load_config, save_config, Config};
use dblp_bibmerge::models::YearRange;
use dblp_bibmerge::pipeline::{Pipeline, Reporter, SilentReporter};
use dblp_bibmerge::sources::DblpSource;
use dblp_bibmerge::ui::{self, ConsoleReporter};
use dblp_bibmerge::utils::load_authors;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fetch DBLP publications for a list of authors and combine them into one BibTeX file
#[derive(Parser, Debug)]
#[command(name = "dblp-bibmerge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch DBLP publications and combine into one BibTeX file", long_about = None)]
#[command(after_help = "\
Examples:
  dblp-bibmerge
  dblp-bibmerge --start 2020 --end 2024
  dblp-bibmerge --authors team.txt --output my_publications.bib
  dblp-bibmerge --start 2023 --output recent_pubs.bib")]
struct Cli {
    /// Authors file, one `Name[, PID]` per line (default: authors.txt)
    #[arg(long)]
    authors: Option<PathBuf>,

    /// Output BibTeX file (default: publications.bib)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Start year, inclusive (e.g., 2020)
    #[arg(long)]
    start: Option<i32>,

    /// End year, inclusive (e.g., 2024)
    #[arg(long)]
    end: Option<i32>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default configuration to this path and exit
    #[arg(long, value_name = "PATH")]
    init_config: Option<PathBuf>,

    /// Seconds to wait between authors (overrides config)
    #[arg(long)]
    delay: Option<u64>,

    /// Enable verbose logging (-v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Show all environment variables
    #[arg(long)]
    env: bool,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("dblp-bibmerge - Environment Variables");
    println!();
    println!("DBLP Access:");
    println!("  DBLP_BIBMERGE_DBLP__BASE_URL                 DBLP endpoint (default: https://dblp.org)");
    println!("  DBLP_BIBMERGE_DBLP__TIMEOUT_SECS             Per-request timeout (default: 30)");
    println!("  DBLP_BIBMERGE_DBLP__MAX_RETRIES              Attempts when rate limited (default: 3)");
    println!("  DBLP_BIBMERGE_DBLP__RATE_LIMIT_BACKOFF_SECS  Backoff step after HTTP 429 (default: 5)");
    println!("  DBLP_BIBMERGE_DBLP__REQUEST_DELAY_SECS       Pause between authors (default: 3)");
    println!("  DBLP_BIBMERGE_DBLP__USER_AGENT               Custom User-Agent header");
    println!();
    println!("Files:");
    println!("  DBLP_BIBMERGE_RUN__AUTHORS_FILE              Authors file (default: authors.txt)");
    println!("  DBLP_BIBMERGE_RUN__OUTPUT_FILE               Output file (default: publications.bib)");
    println!();
    println!("Other Settings:");
    println!("  DBLP_BIBMERGE_LOGGING__LEVEL                 Log level when RUST_LOG is unset (default: info)");
    println!("  RUST_LOG                                     Rust logging filter (e.g., debug, info, warn, error)");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    if let Some(path) = &cli.init_config {
        save_config(&Config::default(), path)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Wrote default configuration to {}", path.display());
        return Ok(());
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load config from environment".to_string(),
    })?;

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("dblp_bibmerge={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let range = YearRange::new(cli.start, cli.end)?;
    let authors_path = cli.authors.unwrap_or_else(|| config.run.authors_file.clone());
    let output_path = cli.output.unwrap_or_else(|| config.run.output_file.clone());
    let delay = Duration::from_secs(cli.delay.unwrap_or(config.dblp.request_delay_secs));

    if !cli.quiet {
        ui::print_banner();
    }

    let authors = load_authors(&authors_path)?;
    if authors.is_empty() {
        bail!("No authors found in {}", authors_path.display());
    }

    if !cli.quiet {
        ui::print_run_header(authors.len(), &range);
    }

    let source = DblpSource::from_config(&config.dblp)?;
    let reporter: Box<dyn Reporter> = if cli.quiet {
        Box::new(SilentReporter)
    } else {
        Box::new(ConsoleReporter::new())
    };

    let summary = Pipeline::new(&source, reporter.as_ref())
        .with_range(range)
        .with_request_delay(delay)
        .run(&authors, chrono::Local::now().naive_local())
        .await?;

    std::fs::write(&output_path, &summary.combined.report)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    if cli.quiet {
        tracing::info!(
            "Wrote {} unique publications to {}",
            summary.unique(),
            output_path.display()
        );
    } else {
        ui::print_summary(&summary, &range, &output_path);
    }

    Ok(())
}
