// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prana - an Ayurvedic wellness assistant for the terminal.
//!
//! This is the binary entry point. It loads configuration, installs the
//! redacting log sink, and dispatches to the chat front end.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod shell;

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use clap::{Parser, Subcommand};
use colored::Colorize;
use prana_agent::ConversationClient;
use prana_config::PranaConfig;
use prana_core::RedactingWriter;
use prana_gemini::{API_KEY_ENV, GeminiBackend};

#[derive(Parser, Debug)]
#[command(name = "prana", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Start an interactive chat session (the default).
    Chat {
        /// Wait for each complete reply instead of streaming it.
        #[arg(long)]
        no_stream: bool,
    },
    /// Ask one question and print the reply.
    Ask {
        /// The question text.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Wait for the complete reply instead of streaming it.
        #[arg(long)]
        no_stream: bool,
    },
    /// Check that the Gemini API answers with the configured key.
    Ping,
    /// Validate configuration and print a summary.
    CheckConfig,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            prana_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let secrets = Arc::new(RwLock::new(Vec::new()));
    init_tracing(&config.assistant.log_level, secrets.clone());
    register_secrets(&secrets, &config);

    let command = cli.command.unwrap_or(Commands::Chat { no_stream: false });
    if command == Commands::CheckConfig {
        print_config_summary(&config);
        return;
    }

    let client = connect_or_exit(&config).await;
    let code = match command {
        Commands::Chat { no_stream } => {
            let stream = config.chat.stream && !no_stream;
            match shell::run_chat(&client, &config, stream).await {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("{}: {e}", "error".red());
                    1
                }
            }
        }
        Commands::Ask { text, no_stream } => {
            let stream = config.chat.stream && !no_stream;
            match shell::run_ask(&client, &config, &text.join(" "), stream).await {
                Ok(true) => 0,
                Ok(false) => 1,
                Err(e) => {
                    eprintln!("{}: {e}", "error".red());
                    1
                }
            }
        }
        Commands::Ping => {
            if client.test_connection().await {
                println!("{} Gemini answered ({})", "ok".green(), config.gemini.model);
                0
            } else {
                println!("{} Gemini did not answer; see the log for details", "failed".red());
                1
            }
        }
        Commands::CheckConfig => 0,
    };

    std::process::exit(code);
}

fn load_config(path: Option<&Path>) -> Result<PranaConfig, Vec<prana_config::ConfigError>> {
    match path {
        Some(path) => prana_config::load_and_validate_path(path),
        None => prana_config::load_and_validate(),
    }
}

async fn connect_or_exit(config: &PranaConfig) -> ConversationClient<GeminiBackend> {
    match ConversationClient::connect(config).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            eprintln!(
                "hint: set gemini.api_key in prana.toml, PRANA_GEMINI_API_KEY, or {API_KEY_ENV}"
            );
            std::process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr through a [`RedactingWriter`] so credentials never
/// reach the terminal.
fn init_tracing(log_level: &str, secrets: Arc<RwLock<Vec<String>>>) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("prana={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), secrets.clone()))
        .init();
}

/// Registers every candidate API key value with the log redactor.
fn register_secrets(secrets: &Arc<RwLock<Vec<String>>>, config: &PranaConfig) {
    if let Some(key) = &config.gemini.api_key {
        RedactingWriter::<std::io::Stderr>::add_secret(secrets, key.trim().to_string());
    }
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        RedactingWriter::<std::io::Stderr>::add_secret(secrets, key.trim().to_string());
    }
}

/// Where the API key will come from, without revealing it.
fn key_source(config: &PranaConfig, env_value: Option<&str>) -> &'static str {
    let present = |v: Option<&str>| v.is_some_and(|v| !v.trim().is_empty());
    if present(config.gemini.api_key.as_deref()) {
        "configured"
    } else if present(env_value) {
        API_KEY_ENV
    } else {
        "missing"
    }
}

fn print_config_summary(config: &PranaConfig) {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let source = key_source(config, env_key.as_deref());
    let source = if source == "missing" {
        source.red().to_string()
    } else {
        source.green().to_string()
    };

    println!("{}", "configuration ok".bold().green());
    println!("  assistant.name       {}", config.assistant.name);
    println!("  assistant.log_level  {}", config.assistant.log_level);
    println!("  gemini.model         {}", config.gemini.model);
    println!("  gemini.base_url      {}", config.gemini.base_url);
    println!("  gemini.temperature   {}", config.gemini.temperature);
    println!("  gemini.thinking      {}", config.gemini.thinking_budget);
    println!("  gemini.api_key       {source}");
    println!("  chat.stream          {}", config.chat.stream);
    println!("  chat.max_input_chars {}", config.chat.max_input_chars);
    println!("  chat.turn_timeout    {}s", config.chat.turn_timeout_secs);
}
