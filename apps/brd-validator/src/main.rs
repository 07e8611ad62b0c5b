//! BRD Validator
//!
//! Parses business requirements documents (free text or structured JSON),
//! runs the validation rule catalogue and reports a severity-weighted
//! verdict. Two front ends share the same parser and engine:
//!
//! - `check` / `rules` on the command line
//! - `serve`, a REST API for other tools

use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod cli;
mod config;
mod error;

use api::AppState;
use cli::{CheckOptions, Cli, Command};
use config::FrameworkConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    // Reports go to stdout, so logs stay on stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Check {
            file,
            structured,
            format,
            output,
            config,
            show_document,
        } => {
            let valid = cli::run_check(CheckOptions {
                file: &file,
                structured,
                format,
                output: output.as_deref(),
                config: config.as_deref(),
                show_document,
            })?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Command::Rules { config } => {
            cli::run_rules(config.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { host, port, config } => {
            serve(&host, port, config.as_deref()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn serve(host: &str, port: u16, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = FrameworkConfig::load(config_path)?;
    info!("Starting BRD validator on {}:{}", host, port);

    let engine = config.engine();
    let state = AppState {
        parser: Arc::new(config.parser()),
        engine,
        max_content_bytes: config.server.max_content_bytes,
    };
    let rule_count = state.engine.registry().len();
    let app = api::router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Rules loaded: {}", rule_count);
    info!("Time budget: {}ms", config.engine.time_budget_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
