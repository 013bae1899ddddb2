//! # Price a Cart
//!
//! Loads a price list, scans the given SKUs and prints the total.
//!
//! ## Usage
//! ```bash
//! # Uses $CHECKOUT_PRICE_LIST or ./pricing.toml
//! cargo run -p checkout-core --bin price-cart -- a a a b
//!
//! # Explicit price list, JSON output
//! cargo run -p checkout-core --bin price-cart -- --prices ./pricing.toml --json a b
//! ```
//!
//! Exits non-zero on a usage error or on the first unknown SKU.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use checkout_core::{Checkout, CheckoutError, PriceList};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line mistakes, reported before any pricing happens.
#[derive(Debug, Error, PartialEq, Eq)]
enum UsageError {
    #[error("{0} requires a path")]
    MissingValue(String),

    #[error("unknown option: {0} (see --help)")]
    UnknownOption(String),
}

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Price {
        prices: Option<PathBuf>,
        json: bool,
        skus: Vec<String>,
    },
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "Checkout failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Parses arguments (program name excluded).
///
/// Everything after `--` is a SKU, even if it starts with `-`.
fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let mut prices: Option<PathBuf> = None;
    let mut json = false;
    let mut skus: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--prices" | "-p" => {
                let Some(path) = args.get(i + 1) else {
                    return Err(UsageError::MissingValue(args[i].clone()));
                };
                prices = Some(PathBuf::from(path));
                i += 1;
            }
            "--json" => json = true,
            "--help" | "-h" => return Ok(Command::Help),
            "--" => {
                skus.extend(args[i + 1..].iter().cloned());
                break;
            }
            flag if flag.starts_with('-') => {
                return Err(UsageError::UnknownOption(flag.to_string()));
            }
            sku => skus.push(sku.to_string()),
        }
        i += 1;
    }

    Ok(Command::Price { prices, json, skus })
}

fn print_help() {
    println!("Usage: price-cart [OPTIONS] [--] <SKU>...");
    println!();
    println!("Options:");
    println!("  -p, --prices <PATH>  Price list file (default: $CHECKOUT_PRICE_LIST or ./pricing.toml)");
    println!("      --json           Print totals as JSON");
    println!("  -h, --help           Show this help message");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let (prices, json, skus) = match parse_args(&args)? {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Price { prices, json, skus } => (prices, json, skus),
    };

    let path = PriceList::resolve_path(prices);
    let list = PriceList::load(&path).map_err(CheckoutError::from)?;
    let mut checkout = Checkout::from_price_list(&list);
    info!(session = %checkout.session_id(), scans = skus.len(), "Pricing cart");

    for sku in &skus {
        checkout.add_to_cart(sku)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&checkout.totals())?);
        return Ok(());
    }

    for line in checkout.lines() {
        println!(
            "{:<20} x{:<4} {:>10}  (saved {})",
            line.sku,
            line.quantity,
            line.line_total.to_string(),
            line.savings
        );
    }
    println!("{:<26} {:>10}", "TOTAL", checkout.compute_cart_total().to_string());

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every registration and scan
/// - Default: INFO, with DEBUG for the checkout crate
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkout_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
