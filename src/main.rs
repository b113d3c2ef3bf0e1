use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use paper_fetcher::config::{get_config, load_config, Config};
use paper_fetcher::report::{render_table, save_csv, to_csv_string, to_json};
use paper_fetcher::{PaperFetcher, PubMedSource};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Get PubMed papers with at least one author from a pharmaceutical or biotech company
#[derive(Parser, Debug)]
#[command(name = "get-papers-list")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Get PubMed papers with at least one author from a pharmaceutical or biotech company", long_about = None)]
struct Cli {
    /// PubMed search query (full PubMed query syntax supported)
    #[arg(required_unless_present = "print_config")]
    query: Option<String>,

    /// Write the results as CSV to this file instead of printing them
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Print debug information during execution
    #[arg(long, short)]
    debug: bool,

    /// Maximum number of PubMed IDs to fetch (default: 50, or the config value)
    #[arg(long, short)]
    max_results: Option<usize>,

    /// Output format when printing to stdout
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Configuration file path (default: ./paper-fetcher.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

/// Output format for results printed to stdout
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Table format (human-readable)
    Table,
    /// CSV, same layout as --file
    Csv,
    /// JSON format (machine-readable)
    Json,
}

fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paper_fetcher={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => get_config().context("failed to load configuration")?,
    };

    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }
    if let Some(max_results) = cli.max_results {
        config.entrez.max_results = max_results;
    }

    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let query = cli.query.as_deref().unwrap_or_default();
    let source = Arc::new(PubMedSource::from_config(&config)?);
    let fetcher = PaperFetcher::from_config(source, &config);

    let rows = fetcher.fetch(query, config.entrez.max_results).await?;

    match &cli.file {
        Some(path) => {
            let count = save_csv(&rows, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Saved {} papers to {}", count, path.display());
        }
        None => match cli.output {
            OutputFormat::Table => println!("{}", render_table(&rows)),
            OutputFormat::Csv => print!("{}", to_csv_string(&rows)?),
            OutputFormat::Json => println!("{}", to_json(&rows)?),
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
