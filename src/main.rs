//! Boxdly main entry point
//!
//! This is the command-line interface for the monthly top films query.

use anyhow::Context;
use boxdly::config::{load_config, Config};
use boxdly::{rating, FilmRecord, ScrapePipeline, YearMonth};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Boxdly: a user's four best rated films of the month
///
/// Boxdly reads a public film listing page by page, decodes the star ratings
/// and prints the highest rated films watched in the chosen month.
#[derive(Parser, Debug)]
#[command(name = "boxdly")]
#[command(version)]
#[command(about = "Top rated films of the month from a public listing", long_about = None)]
struct Cli {
    /// Listing site username
    #[arg(value_name = "USERNAME")]
    username: String,

    /// Month to rank, as YYYY-MM (defaults to the current month)
    #[arg(short, long, value_name = "YYYY-MM")]
    month: Option<YearMonth>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    let pipeline = ScrapePipeline::from_config(&config)?;
    let month = cli.month.unwrap_or_else(YearMonth::current);

    let films = pipeline
        .top_films_for_month(&cli.username, month)
        .await
        .with_context(|| format!("Error fetching data for user: {}", cli.username))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&films)?);
    } else {
        print_films(&cli.username, month, &films);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("boxdly=info,warn"),
            1 => EnvFilter::new("boxdly=debug,info"),
            2 => EnvFilter::new("boxdly=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the ranked films as a plain table
fn print_films(username: &str, month: YearMonth, films: &[FilmRecord]) {
    println!("=== Top films for {} in {} ===\n", username, month);

    if films.is_empty() {
        println!("No rated films found for this month.");
        return;
    }

    for (rank, film) in films.iter().enumerate() {
        let year = if film.release_year().is_empty() {
            String::new()
        } else {
            format!(" ({})", film.release_year())
        };
        println!(
            "{}. {:<6} {}{}",
            rank + 1,
            rating::render(film.rating()),
            film.title(),
            year
        );
        println!("   {}", film.detail_url());
    }
}
