// ABOUTME: CLI for searching the video site and parsing saved pages with tubeparse.
// ABOUTME: Prints the JSON envelope of each operation; exits 1 when the envelope reports failure.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubeparse_client::{ApiError, Client, ErrorResponse, SearchParams, TrendingParams};
use tubeparse_engine::filters::DEFAULT_MIN_DURATION;
use tubeparse_engine::{extract_detailed, PostFilter};

/// Extract video listings from video-site pages and print JSON.
#[derive(Parser, Debug)]
#[command(name = "tubeparse")]
#[command(about = "Extract video listings from video-site pages and print JSON", long_about = None)]
struct Args {
    /// Site root that page paths are resolved against.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Output compact JSON instead of pretty.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    /// Log filter used when RUST_LOG is unset (logs go to stderr).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for videos.
    Search {
        query: String,
        #[arg(long, default_value_t = tubeparse_client::api::DEFAULT_MAX_RESULTS)]
        max_results: usize,
        /// Keep only official "- Topic" channels.
        #[arg(long)]
        official: bool,
        /// Minimum duration in seconds; 0 disables the filter.
        #[arg(long, default_value_t = DEFAULT_MIN_DURATION)]
        min_duration: u64,
    },
    /// Popular videos for a region.
    Trending {
        #[arg(long, default_value = tubeparse_client::api::DEFAULT_REGION)]
        region: String,
        #[arg(long)]
        official: bool,
        #[arg(long, default_value_t = DEFAULT_MIN_DURATION)]
        min_duration: u64,
    },
    /// Details for one video.
    Video { id: String },
    /// Check whether the site is reachable.
    Status,
    /// Describe this service.
    Stats,
    /// Parse a saved page from a file, or "-" for stdin, without fetching.
    Parse {
        target: String,
        #[arg(long)]
        official: bool,
        #[arg(long, default_value_t = 0)]
        min_duration: u64,
        #[arg(long)]
        max_results: Option<usize>,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn build_client(args: &Args) -> Client {
    let mut builder = Client::builder();
    if let Some(base) = &args.base_url {
        builder = builder.base_url(base);
    }
    if let Some(secs) = args.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

fn emit<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    if compact {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Prints the success envelope or the error envelope, returning whether it succeeded.
fn emit_result<T: Serialize>(result: Result<T, ApiError>, compact: bool) -> Result<bool> {
    match result {
        Ok(envelope) => {
            emit(&envelope, compact)?;
            Ok(true)
        }
        Err(err) => {
            debug!(code = %err.code, status = err.status_code(), "operation failed");
            emit(&ErrorResponse::from(&err), compact)?;
            Ok(false)
        }
    }
}

fn load_page(target: &str) -> Result<String> {
    let bytes = if target == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        let path = PathBuf::from(target);
        if !path.exists() {
            return Err(anyhow!("file not found: {}", target));
        }
        fs::read(&path).with_context(|| format!("failed to read {}", target))?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn parse_page(target: &str, filter: PostFilter, compact: bool) -> Result<bool> {
    let html = match load_page(target) {
        Ok(html) => html,
        Err(err) => {
            emit(&json!({ "success": false, "error": err.to_string() }), compact)?;
            return Ok(false);
        }
    };

    let extraction = extract_detailed(&html);
    let results = filter.apply(extraction.videos);
    emit(
        &json!({
            "success": true,
            "strategy": extraction.strategy,
            "total": results.len(),
            "results": results,
        }),
        compact,
    )?;
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let client = build_client(&args);
    let compact = args.compact;

    let ok = match &args.command {
        Command::Search {
            query,
            max_results,
            official,
            min_duration,
        } => {
            let params = SearchParams {
                max_results: *max_results,
                filter_official: *official,
                min_duration: *min_duration,
            };
            emit_result(client.search(query, &params).await, compact)?
        }
        Command::Trending {
            region,
            official,
            min_duration,
        } => {
            let params = TrendingParams {
                region: region.clone(),
                filter_official: *official,
                min_duration: *min_duration,
            };
            emit_result(client.trending(&params).await, compact)?
        }
        Command::Video { id } => emit_result(client.video(id).await, compact)?,
        Command::Status => {
            let status = client.status().await;
            emit(&status, compact)?;
            status.success
        }
        Command::Stats => {
            emit(&client.stats(), compact)?;
            true
        }
        Command::Parse {
            target,
            official,
            min_duration,
            max_results,
        } => {
            let filter = PostFilter {
                official_only: *official,
                min_duration: *min_duration,
                max_results: *max_results,
            };
            parse_page(target, filter, compact)?
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
