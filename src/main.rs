use anyhow::Context;
use clap::Parser;
use crypto_tracker::config::{self, COINGECKO_API_BASE, DEFAULT_CURRENCY_ID, DEFAULT_LOOKBACK_DAYS};
use crypto_tracker::utils::logging;
use crypto_tracker::{
    fetch_snapshot, log_debug, log_error, render_failure, render_json, render_summary,
    KnownTokenIds, PriceClient, TrackerConfig,
};
use std::process::ExitCode;
use std::time::Duration;

const LOG_MODULE: &str = "main";

/// Print price, market cap, volume and recent price change for a cryptocurrency
#[derive(Parser, Debug)]
#[command(name = "crypto-tracker", version)]
struct Cli {
    /// CoinGecko coin id (e.g. "bitcoin") or ticker symbol (e.g. "BTC")
    #[arg(default_value = DEFAULT_CURRENCY_ID)]
    currency: String,

    /// Lookback window for the price change, in days
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS, value_parser = clap::value_parser!(u32).range(1..))]
    days: u32,

    /// API base URL
    #[arg(long, env = "CRYPTO_TRACKER_API_BASE", default_value = COINGECKO_API_BASE)]
    base_url: String,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long, env = "CRYPTO_TRACKER_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Print the snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn build_client(cli: &Cli) -> anyhow::Result<PriceClient> {
    let config = TrackerConfig::new(&cli.base_url)?
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let config = config::install(config)?;
    PriceClient::from_config(config).context("building HTTP client")
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.verbose {
        logging::enable_debug();
    }

    let client = match build_client(&cli) {
        Ok(client) => client,
        Err(e) => {
            log_error!(LOG_MODULE, "invalid configuration", error = format!("{:#}", e));
            return ExitCode::from(2);
        }
    };

    let currency_id = KnownTokenIds::resolve(&cli.currency);
    log_debug!(
        LOG_MODULE,
        "fetching snapshot",
        currency = currency_id,
        days = cli.days,
        base_url = config::global().base_url(),
    );

    let snapshot = match fetch_snapshot(&client, &currency_id, cli.days) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log_debug!(
                LOG_MODULE,
                "fetch failed",
                operation = e.operation,
                kind = format!("{:?}", e.kind),
                details = e.details.as_deref().unwrap_or("-"),
            );
            print!("{}", render_failure(&e));
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match render_json(&snapshot) {
            Ok(json) => print!("{}", json),
            Err(e) => {
                log_error!(LOG_MODULE, "failed to encode snapshot", error = e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_summary(&snapshot));
    }

    ExitCode::SUCCESS
}
