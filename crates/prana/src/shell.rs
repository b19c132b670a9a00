// SPDX-FileCopyrightText: 2026 Prana Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `prana chat` and `prana ask` implementation.
//!
//! The chat REPL has a colored prompt, readline history, and streams
//! replies to stdout as they arrive. Each turn is bounded by the configured
//! timeout.

use std::io::Write;
use std::time::Duration;

use colored::Colorize;
use prana_agent::{ChatSession, ConversationClient, QUICK_QUESTIONS, quick_question};
use prana_config::PranaConfig;
use prana_core::traits::GenerativeBackend;
use prana_core::{ChatReply, ErrorKind, PranaError};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, warn};

/// One parsed line of REPL input.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Quit,
    Help,
    Empty,
    Message(&'a str),
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    match trimmed {
        "" => Input::Empty,
        "/quit" | "/exit" => Input::Quit,
        "/help" | "/?" => Input::Help,
        _ => match trimmed.strip_prefix('/') {
            Some(rest) => match rest.parse::<usize>().ok().and_then(quick_question) {
                Some(question) => Input::Message(question),
                None => Input::Unknown(trimmed),
            },
            None => Input::Message(trimmed),
        },
    }
}

/// Runs the `prana chat` interactive REPL.
pub async fn run_chat<B: GenerativeBackend>(
    client: &ConversationClient<B>,
    config: &PranaConfig,
    stream: bool,
) -> Result<(), PranaError> {
    let mut rl = DefaultEditor::new()
        .map_err(|e| PranaError::Internal(format!("failed to initialize readline: {e}")))?;
    let mut session = ChatSession::from_config(client, config);
    let name = config.assistant.name.as_str();
    let timeout = Duration::from_secs(config.chat.turn_timeout_secs);

    println!("{}", "prana wellness chat".bold().green());
    println!(
        "Type {} for quick questions, {} to exit.\n",
        "/help".yellow(),
        "/quit".yellow()
    );
    if let Some(greeting) = session.history().last() {
        println!(
            "{} {} {}\n",
            greeting.display_time().dimmed(),
            format!("{name}>").cyan(),
            greeting.text
        );
    }

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => match parse_input(&line) {
                Input::Quit => break,
                Input::Empty => continue,
                Input::Help => print_help(),
                Input::Unknown(command) => {
                    eprintln!("{}: unknown command {command}", "error".red());
                }
                Input::Message(text) => {
                    let _ = rl.add_history_entry(line.as_str());
                    run_turn(&mut session, name, text, stream, timeout).await;
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    debug!(messages = session.history().len(), "chat session ended");
    println!("{}", "take care".dimmed());
    Ok(())
}

/// Runs `prana ask`: one turn against a fresh greeting-seeded history.
///
/// Returns whether the turn produced a reply rather than an error.
pub async fn run_ask<B: GenerativeBackend>(
    client: &ConversationClient<B>,
    config: &PranaConfig,
    text: &str,
    stream: bool,
) -> Result<bool, PranaError> {
    let mut session = ChatSession::from_config(client, config);
    let timeout = Duration::from_secs(config.chat.turn_timeout_secs);

    let mut streamed = false;
    let outcome = if stream {
        tokio::time::timeout(
            timeout,
            session.send_streaming(text, |chunk| print_chunk(chunk, &mut streamed)),
        )
        .await
    } else {
        tokio::time::timeout(timeout, session.send(text)).await
    };

    let reply = match outcome {
        Ok(reply) => reply?,
        Err(_) => return Err(PranaError::Timeout { duration: timeout }),
    };
    render_reply(&reply, streamed);
    Ok(!reply.is_error())
}

async fn run_turn<B: GenerativeBackend>(
    session: &mut ChatSession<'_, B>,
    name: &str,
    text: &str,
    stream: bool,
    timeout: Duration,
) {
    if stream {
        print!("{} ", format!("{name}>").cyan());
        let _ = std::io::stdout().flush();
    }

    let mut streamed = false;
    let outcome = if stream {
        tokio::time::timeout(
            timeout,
            session.send_streaming(text, |chunk| print_chunk(chunk, &mut streamed)),
        )
        .await
    } else {
        tokio::time::timeout(timeout, session.send(text)).await
    };

    match outcome {
        Ok(Ok(reply)) => {
            if !stream {
                print!("{} ", format!("{name}>").cyan());
            }
            render_reply(&reply, streamed);
        }
        Ok(Err(e)) => {
            if stream {
                println!();
            }
            eprintln!("{}: {e}", "error".red());
        }
        Err(_) => {
            println!();
            warn!(seconds = timeout.as_secs(), "turn timed out");
            eprintln!(
                "{}: {}",
                "error".red(),
                PranaError::Timeout { duration: timeout }
            );
        }
    }
    println!();
}

fn print_chunk(chunk: &str, streamed: &mut bool) {
    if chunk.is_empty() {
        return;
    }
    *streamed = true;
    print!("{chunk}");
    let _ = std::io::stdout().flush();
}

/// Prints whatever part of the reply has not been streamed yet, then any
/// notice its error kind calls for.
fn render_reply(reply: &ChatReply, streamed: bool) {
    match reply.error {
        None if streamed => println!(),
        None => println!("{}", reply.text),
        Some(kind) => {
            if streamed {
                println!();
            }
            println!("{}", reply.text.yellow());
            eprintln!("{}", notice_line(kind));
        }
    }
}

fn notice_line(kind: ErrorKind) -> String {
    if kind.requires_alert() {
        format!("[{}] {kind}", kind.notice()).bold().red().to_string()
    } else {
        format!("[{}]", kind.notice()).dimmed().to_string()
    }
}

fn print_help() {
    println!("{}", "Quick questions:".bold());
    for (i, question) in QUICK_QUESTIONS.iter().enumerate() {
        println!("  {}  {question}", format!("/{}", i + 1).yellow());
    }
    println!("  {}  leave the chat", "/quit".yellow());
}
