//! verigate - content verification against trusted sources
//!
//! Command line front-end for the verification engine. Builds one engine per
//! invocation from layered configuration and renders the resulting records.

mod cli;
mod display;
mod error;
mod events;
mod input;
mod logging;

use crate::cli::{Cli, Commands};
use crate::display::{CommandOutput, OutputRenderer};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use std::collections::BTreeMap;
use std::process;
use tokio::select;
use tracing::{error, info};
use verigate_config::Config;
use verigate_engine::VerificationEngine;
use verigate_events::{EventReceiver, EventSender};
use verigate_types::{ColorChoice, OutputFormat};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.json, cli.global.debug);

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Main application logic. Returns the process exit status.
async fn run(cli: Cli) -> Result<i32, CliError> {
    info!("Starting verigate v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global);

    let (event_sender, event_receiver) = verigate_events::channel();

    let format = config.general.default_output;
    let renderer = OutputRenderer::new(format, config.general.color);

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(
        colors_enabled,
        cli.global.debug,
        format == OutputFormat::Json,
    );

    let output = execute_command_with_events(
        cli.command,
        config,
        event_sender,
        event_receiver,
        &mut event_handler,
    )
    .await?;

    renderer.render_result(&output)?;

    info!("Command completed");
    Ok(output.exit_code())
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    config: Config,
    event_sender: EventSender,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<CommandOutput, CliError> {
    let mut command_future = Box::pin(execute_command(command, config, event_sender));
    let mut channel_open = true;

    loop {
        select! {
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            event = event_receiver.recv(), if channel_open => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => channel_open = false,
                }
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(
    command: Commands,
    config: Config,
    tx: EventSender,
) -> Result<CommandOutput, CliError> {
    match command {
        Commands::Verify {
            source,
            file,
            content,
        } => {
            let engine = VerificationEngine::from_config(&config, Some(tx))?;
            let content = input::read_content(content, file.as_deref()).await?;
            let record = engine.verify(&content, &source);
            Ok(CommandOutput::Record { record })
        }

        Commands::Batch { path } => {
            // Parse everything first so a bad line produces no records
            let items = input::read_batch(&path).await?;
            let engine = VerificationEngine::from_config(&config, Some(tx))?;
            let records = engine.verify_batch(
                items
                    .iter()
                    .map(|item| (item.content.as_str(), item.source.as_str())),
            );
            Ok(CommandOutput::Batch {
                records,
                stats: engine.log_stats(),
            })
        }

        Commands::Sources => {
            let engine = VerificationEngine::from_config(&config, Some(tx))?;
            let mut sources: BTreeMap<String, Vec<String>> = BTreeMap::new();
            for (category, identifier) in engine.registry().iter() {
                sources
                    .entry(category.to_string())
                    .or_default()
                    .push(identifier.to_string());
            }
            Ok(CommandOutput::Sources { sources })
        }

        Commands::Rules => {
            let engine = VerificationEngine::from_config(&config, Some(tx))?;
            Ok(CommandOutput::Rules {
                patterns: engine.ruleset().patterns().map(str::to_string).collect(),
                policy: config.policy,
            })
        }

        Commands::Config => {
            let toml = config.to_toml_string()?;
            Ok(CommandOutput::Config { toml, config })
        }
    }
}

/// Initialize tracing/logging. Logs always go to stderr so stdout carries
/// only command output.
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let rust_log_set = std::env::var("RUST_LOG").is_ok();

    if debug_enabled_flag {
        // Debug mode: structured JSON logs
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(
                        "info,verigate=debug,verigate_engine=debug",
                    )
                }),
            )
            .init();
    } else if json_mode && !rust_log_set {
        // JSON mode: keep stderr quiet unless logging was asked for
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("warn,verigate=warn,verigate_engine=warn")
                }),
            )
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) {
    if global.json {
        config.general.default_output = OutputFormat::Json;
    }
    if let Some(color) = global.color {
        config.general.color = color;
    }
}
