// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::assistant::gemini::GeminiClient;
use crate::assistant::{AssistantClient, ChatOutcome, ChatSession, GREETING, UnavailableClient};
use crate::config::AssistantConfig;
use crate::store::LedgerStore;
use crate::utils::{fmt_won, today};
use anyhow::Result;
use std::io::{BufRead, Write};

/// A live client, or one that fails every send when setup went wrong.
pub fn client_from(config: Result<AssistantConfig>) -> Box<dyn AssistantClient> {
    match config.and_then(|c| GeminiClient::new(&c)) {
        Ok(client) => Box::new(client),
        Err(e) => {
            log::warn!("Assistant is not configured: {:#}", e);
            Box::new(UnavailableClient::new(&e))
        }
    }
}

fn client_for(store: &LedgerStore) -> Box<dyn AssistantClient> {
    client_from(AssistantConfig::load(store.conn()))
}

fn print_outcome(outcome: &ChatOutcome) {
    println!("🐹 {}", outcome.reply);
    if let Some(tx) = &outcome.recorded {
        println!(
            "   [{}] {} {} {} ({})",
            tx.date,
            tx.r#type,
            tx.category,
            fmt_won(tx.amount),
            tx.description
        );
    }
}

pub fn ask(store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    let message = m
        .get_many::<String>("message")
        .map(|parts| parts.cloned().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    let client = client_for(store);
    let mut session = ChatSession::new();
    match session.send(client.as_ref(), store, &message, today()) {
        Ok(outcome) => print_outcome(&outcome),
        Err(e) => eprintln!("{}", e),
    }
    Ok(())
}

pub fn repl(store: &mut LedgerStore) -> Result<()> {
    let client = client_for(store);
    run_session(client.as_ref(), store, std::io::stdin().lock())
}

/// Reads one message per line until EOF or `exit`/`quit`.
pub fn run_session(
    client: &dyn AssistantClient,
    store: &mut LedgerStore,
    input: impl BufRead,
) -> Result<()> {
    let mut session = ChatSession::new();
    println!("🐹 {}", GREETING);
    prompt()?;
    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if matches!(text, "exit" | "quit") {
            break;
        }
        if !text.is_empty() {
            match session.send(client, store, text, today()) {
                Ok(outcome) => print_outcome(&outcome),
                Err(e) => eprintln!("{}", e),
            }
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}
