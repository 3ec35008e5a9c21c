// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{AssistantConfig, set_api_key, set_endpoint, set_model, set_timeout};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-key", sub)) => {
            if let Some(key) = sub.get_one::<String>("key") {
                set_api_key(conn, key)?;
                println!("Assistant API key saved");
            }
        }
        Some(("set-model", sub)) => {
            if let Some(model) = sub.get_one::<String>("model") {
                set_model(conn, model)?;
                println!("Assistant model set to {}", model.trim());
            }
        }
        Some(("set-endpoint", sub)) => {
            if let Some(url) = sub.get_one::<String>("url") {
                set_endpoint(conn, url)?;
                println!("Assistant endpoint set to {}", url.trim());
            }
        }
        Some(("set-timeout", sub)) => {
            if let Some(secs) = sub.get_one::<u64>("secs") {
                set_timeout(conn, *secs)?;
                println!("Assistant timeout set to {}s", secs);
            }
        }
        _ => show(conn)?,
    }
    Ok(())
}

fn show(conn: &Connection) -> Result<()> {
    let cfg = AssistantConfig::load(conn)?;
    let rows = vec![
        vec!["api key".to_string(), cfg.masked_key()],
        vec!["model".to_string(), cfg.model.clone()],
        vec!["endpoint".to_string(), cfg.endpoint.clone()],
        vec!["timeout".to_string(), format!("{}s", cfg.timeout_secs)],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}
