//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - wires the FRED client, aggregator, and cache
//! - serves the JSON API, or prints a one-shot report

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use crate::cli::{Command, ServeArgs, SourceArgs, TrendArgs};
use crate::domain::RangeKey;
use crate::error::AppError;
use crate::pricing::DEFAULT_FRESHNESS;

pub mod pipeline;

/// Entry point for the `burger` binary.
pub async fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => handle_serve(args).await,
        Command::Prices(args) => handle_prices(args).await,
        Command::Trend(args) => handle_trend(args).await,
    }
}

async fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    let freshness = Duration::from_secs(args.cache_ttl_secs);
    let service = Arc::new(pipeline::build_service(&args.source, freshness)?);
    let router = crate::server::create_router(service);

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port))
        .await
        .map_err(|e| AppError::new(3, format!("Failed to bind {}:{}: {e}", args.host, args.port)))?;
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::new(3, format!("Failed to read bound address: {e}")))?;
    info!(%addr, cache_ttl_secs = args.cache_ttl_secs, "serving cheeseburger price API");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::new(3, format!("Server error: {e}")))?;

    info!("server stopped");
    Ok(())
}

async fn handle_prices(args: SourceArgs) -> Result<(), AppError> {
    let service = pipeline::build_service(&args, DEFAULT_FRESHNESS)?;
    let prices = service.current_prices().await?;
    println!("{}", crate::report::format_price_summary(&prices));
    Ok(())
}

async fn handle_trend(args: TrendArgs) -> Result<(), AppError> {
    let service = pipeline::build_service(&args.source, DEFAULT_FRESHNESS)?;
    let points = service.price_history(RangeKey::new(args.months)).await?;
    println!("{}", crate::report::format_trend_table(&points));
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Rewrite argv so `burger` defaults to `burger serve`.
///
/// Rules:
/// - `burger`                          -> `burger serve`
/// - `burger --port 8080 ...`          -> `burger serve --port 8080 ...`
/// - `burger --help/--version/-h`      -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "serve" | "prices" | "trend");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "serve flags".
    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_serves() {
        assert_eq!(rewrite_args(argv(&["burger"])), argv(&["burger", "serve"]));
        assert_eq!(
            rewrite_args(argv(&["burger", "--port", "8080"])),
            argv(&["burger", "serve", "--port", "8080"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["burger", "trend", "-m", "3"])), argv(&["burger", "trend", "-m", "3"]));
        assert_eq!(rewrite_args(argv(&["burger", "--help"])), argv(&["burger", "--help"]));
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = crate::cli::Cli::parse_from(rewrite_args(argv(&["burger", "--port", "8080"])));
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.port, 8080);
                assert_eq!(args.host, "127.0.0.1");
                assert_eq!(args.cache_ttl_secs, 3600);
                assert_eq!(args.source.fred_base_url, crate::data::fred::BASE_URL);
            }
            other => panic!("expected serve, got {other:?}"),
        }

        let cli = crate::cli::Cli::parse_from(argv(&["burger", "trend"]));
        match cli.command {
            Command::Trend(args) => assert_eq!(args.months, 6),
            other => panic!("expected trend, got {other:?}"),
        }
    }

    #[test]
    fn trend_rejects_zero_months() {
        assert!(crate::cli::Cli::try_parse_from(argv(&["burger", "trend", "--months", "0"])).is_err());
    }
}
