//! Command-line parsing for the cheeseburger price service.
//!
//! Argument parsing and command dispatch stay separate from the pricing code.

use clap::{Args, Parser, Subcommand};

use crate::data::fred::BASE_URL;
use crate::domain::DEFAULT_TREND_MONTHS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "burger", version, about = "Cheeseburger Price Index (FRED-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON price API.
    Serve(ServeArgs),
    /// Print the current cost of one cheeseburger.
    Prices(SourceArgs),
    /// Print the composite cost trend.
    Trend(TrendArgs),
}

/// Upstream connection options shared by every command.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// FRED observations endpoint.
    #[arg(long, default_value = BASE_URL)]
    pub fred_base_url: String,

    /// Abort upstream requests after this many seconds (no limit by default).
    #[arg(long)]
    pub upstream_timeout_secs: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind.
    #[arg(short, long, default_value_t = 3000)]
    pub port: u16,

    /// Seconds a cached result stays fresh.
    #[arg(long, default_value_t = 3600)]
    pub cache_ttl_secs: u64,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Debug, Args, Clone)]
pub struct TrendArgs {
    /// Months of history to include.
    #[arg(short, long, default_value_t = DEFAULT_TREND_MONTHS, value_parser = clap::value_parser!(u32).range(1..))]
    pub months: u32,

    #[command(flatten)]
    pub source: SourceArgs,
}
