//! graphbatch CLI Binary
//!
//! Command-line interface for submitting and tracking bulk graph operations.

use clap::Parser;
use graphbatch::cli::{Cli, RunContext};
use graphbatch::config::ConfigLoader;
use graphbatch::logging::{init_logging, LoggingConfig};
use std::process;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("graphbatch CLI starting");

    let context = match RunContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", graphbatch::cli::map_error(&e));
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let exit_code = runtime.block_on(async {
        let interrupt = cancel.clone();
        tokio::spawn(async move {
            // First Ctrl+C asks the server to cancel; a second one exits.
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received; requesting cancellation");
                interrupt.cancel();
            }
            if tokio::signal::ctrl_c().await.is_ok() {
                process::exit(130);
            }
        });

        match context.execute(&cli.command, &cancel).await {
            Ok(output) => {
                info!(exit_code = output.exit_code, "Command completed");
                println!("{}", output.text);
                output.exit_code
            }
            Err(e) => {
                error!("Command failed: {}", e);
                eprintln!("{}", graphbatch::cli::map_error(&e));
                1
            }
        }
    });

    process::exit(exit_code);
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
