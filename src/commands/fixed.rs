// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::finance::total_fixed_expenses;
use crate::models::FixedExpenseInput;
use crate::store::{FinancialKind, LedgerStore};
use crate::utils::{fmt_won, maybe_print_json, parse_decimal, pretty_table, report_invalid};
use anyhow::Result;

pub fn handle(store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => super::remove(store, FinancialKind::FixedExpense, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let input = FixedExpenseInput {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        amount: parse_decimal(sub.get_one::<String>("amount").map_or("0", |s| s.as_str()))?,
        day: sub.get_one::<u32>("day").copied().unwrap_or(0),
    };
    if let Err(e) = input.validate() {
        report_invalid(&e);
        return Ok(());
    }
    let item = store.add_fixed_expense(input)?;
    println!(
        "Added fixed expense '{}' {} on day {} ({})",
        item.name,
        fmt_won(item.amount),
        item.day,
        item.id
    );
    Ok(())
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let items = store.fixed_expenses();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    let rows = items
        .iter()
        .map(|f| {
            vec![
                f.id.clone(),
                f.name.clone(),
                format!("매달 {}일", f.day),
                fmt_won(f.amount),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Name", "Day", "Amount"], rows));
    println!("월 고정 지출 합계: -{}", fmt_won(total_fixed_expenses(items)));
    Ok(())
}
