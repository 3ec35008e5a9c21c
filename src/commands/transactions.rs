// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionInput, TransactionType};
use crate::stats::month_transactions;
use crate::store::LedgerStore;
use crate::utils::{
    fmt_won, maybe_print_json, month_or_current, parse_date, parse_decimal, pretty_table,
    report_invalid, today,
};
use anyhow::{Result, anyhow};

pub fn handle(store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds the manual-entry record from `tx add` arguments.
pub fn input_from_args(sub: &clap::ArgMatches) -> Result<TransactionInput> {
    let kind = sub
        .get_one::<String>("type")
        .ok_or_else(|| anyhow!("--type is required"))?;
    let r#type = kind
        .parse::<TransactionType>()
        .map_err(|bad| anyhow!("Unknown transaction type '{}'", bad))?;
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    let amount = match sub.get_one::<String>("amount") {
        Some(raw) => parse_decimal(raw)?,
        None => rust_decimal::Decimal::ZERO,
    };
    let date = match sub.get_one::<String>("date") {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    Ok(TransactionInput {
        date,
        r#type,
        category,
        amount,
        description,
    })
}

fn add(store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let input = input_from_args(sub)?;
    if let Err(e) = input.validate_manual() {
        report_invalid(&e);
        return Ok(());
    }
    let tx = store.add_transaction(input)?;
    let sign = match tx.r#type {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };
    println!(
        "Recorded {}{} {} on {} ({})",
        sign,
        fmt_won(tx.amount),
        tx.category,
        tx.date,
        tx.id
    );
    Ok(())
}

/// Transactions for `--date`, or for `--month` (current month by default), oldest first.
pub fn query_rows<'a>(store: &'a LedgerStore, sub: &clap::ArgMatches) -> Result<Vec<&'a Transaction>> {
    let mut rows: Vec<&Transaction> = if let Some(raw) = sub.get_one::<String>("date") {
        let date = parse_date(raw)?;
        store.transactions().iter().filter(|t| t.date == date).collect()
    } else {
        let (year, month) = month_or_current(sub.get_one::<String>("month"))?;
        month_transactions(store.transactions(), year, month)
    };
    rows.sort_by_key(|t| t.date);
    Ok(rows)
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.r#type.to_string(),
                    t.category.clone(),
                    fmt_won(t.amount),
                    t.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount", "Description"], rows)
        );
    }
    Ok(())
}
