//! dynamic-mockups-mcp: MCP server for the Dynamic Mockups rendering API
//!
//! Exposes the Dynamic Mockups REST API as schema-described tools so AI
//! assistants can browse templates, queue renders, and manage PSD uploads.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use dynamic_mockups_mcp::config;
use dynamic_mockups_mcp::mcp::{http, StdioServer};
use dynamic_mockups_mcp::tools::ToolRouter;
use dynamic_mockups_mcp::usage::UsageReporter;

/// Environment variable carrying the process-wide fallback API key.
const API_KEY_ENV: &str = "DYNAMIC_MOCKUPS_API_KEY";

/// Transport to serve the MCP surface over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// Line-delimited JSON-RPC over stdin/stdout (one client).
    Stdio,
    /// HTTP with per-session routing and SSE streams.
    Http,
}

/// MCP server for the Dynamic Mockups rendering API.
///
/// Provides tool-calling access to mockup catalogs, render operations,
/// and PSD template management.
#[derive(Parser, Debug)]
#[command(name = "dynamic-mockups-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Transport to serve over
    #[arg(short, long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Override the configured HTTP listen host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured HTTP listen port
    #[arg(long)]
    port: Option<u16>,

    /// Fallback API key (overrides config file and environment)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the process-wide fallback API key.
///
/// Precedence: `--api-key` flag, then the environment, then the config
/// file. Resolved once here; the router never reads the environment.
fn resolve_fallback_key(args: &Args, config_key: Option<String>) -> Option<String> {
    args.api_key
        .clone()
        .or_else(|| std::env::var(API_KEY_ENV).ok())
        .filter(|key| !key.is_empty())
        .or_else(|| config_key.filter(|key| !key.is_empty()))
}

/// Entry point for the dynamic-mockups-mcp server.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let mut cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting dynamic-mockups-mcp server"
    );

    // Apply CLI overrides
    if let Some(host) = args.host.clone() {
        cfg.http.host = host;
    }
    if let Some(port) = args.port {
        cfg.http.port = port;
    }

    let fallback_key = resolve_fallback_key(&args, cfg.api.key.clone());
    if fallback_key.is_none() {
        info!(
            "No fallback API key configured; only requests carrying their own \
             credential will reach the upstream"
        );
    }

    let usage = UsageReporter::new(cfg.api.usage_endpoint.clone());
    let router = Arc::new(ToolRouter::new(
        cfg.api.base_url.clone(),
        fallback_key,
        usage,
    ));

    // Run the server
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = match args.transport {
        Transport::Stdio => {
            info!("MCP server ready, waiting for client connection...");
            let mut server = StdioServer::new(router);
            runtime.block_on(server.run())
        }
        Transport::Http => runtime.block_on(http::serve(router, &cfg.http)),
    };

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn log_level_mapping() {
        assert_eq!(get_log_level(0, false, "debug"), Level::DEBUG);
        assert_eq!(get_log_level(0, false, "bogus"), Level::WARN);
        assert_eq!(get_log_level(1, false, "error"), Level::INFO);
        assert_eq!(get_log_level(3, false, "warn"), Level::TRACE);
        assert_eq!(get_log_level(2, true, "trace"), Level::ERROR);
    }
}
