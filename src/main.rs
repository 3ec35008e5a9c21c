// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use hamsterbook::{cli, commands, db, store::LedgerStore};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let mut store = LedgerStore::load(conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut store, sub)?,
        Some(("calendar", sub)) => commands::calendar::handle(&store, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("fixed", sub)) => commands::fixed::handle(&mut store, sub)?,
        Some(("saving", sub)) => commands::savings::handle(&mut store, sub)?,
        Some(("loan", sub)) => commands::loans::handle(&mut store, sub)?,
        Some(("chat", _)) => commands::chat::repl(&mut store)?,
        Some(("ask", sub)) => commands::chat::ask(&mut store, sub)?,
        Some(("config", sub)) => commands::settings::handle(store.conn(), sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
