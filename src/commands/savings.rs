// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::finance::{Maturity, maturity, total_saved_principal};
use crate::models::{Saving, SavingInput, SavingKind};
use crate::store::{FinancialKind, LedgerStore};
use crate::utils::{
    fmt_won, maybe_print_json, parse_date, parse_decimal, pretty_table, report_invalid, today,
};
use anyhow::{Result, anyhow};
use serde::Serialize;

pub fn handle(store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => super::remove(store, FinancialKind::Saving, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub
        .get_one::<String>("kind")
        .ok_or_else(|| anyhow!("--kind is required"))?
        .parse::<SavingKind>()
        .map_err(|bad| anyhow!("Unknown saving kind '{}'", bad))?;
    let start_date = match sub.get_one::<String>("start") {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let input = SavingInput {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        kind,
        monthly_amount: parse_decimal(sub.get_one::<String>("amount").map_or("0", |s| s.as_str()))?,
        rate: parse_decimal(sub.get_one::<String>("rate").map_or("0", |s| s.as_str()))?,
        term: sub.get_one::<u32>("term").copied().unwrap_or(0),
        start_date,
    };
    if let Err(e) = input.validate() {
        report_invalid(&e);
        return Ok(());
    }
    let item = store.add_saving(input)?;
    let m = maturity(&item);
    println!(
        "Added {} '{}' ({}); 만기 예상 수령액 {}",
        item.kind,
        item.name,
        item.id,
        fmt_won(m.total)
    );
    Ok(())
}

#[derive(Serialize)]
struct SavingRow<'a> {
    #[serde(flatten)]
    saving: &'a Saving,
    maturity: Maturity,
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<SavingRow> = store
        .savings()
        .iter()
        .map(|s| SavingRow {
            saving: s,
            maturity: maturity(s),
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|r| {
            let kind = match r.saving.kind {
                SavingKind::Installment => "적금",
                SavingKind::Deposit => "예금",
            };
            vec![
                r.saving.id.clone(),
                r.saving.name.clone(),
                kind.to_string(),
                format!("{}% / {}개월", r.saving.rate, r.saving.term),
                fmt_won(r.maturity.principal),
                format!("+{}", fmt_won(r.maturity.interest_after_tax)),
                fmt_won(r.maturity.total),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Kind", "Rate / Term", "원금 합계", "만기 이자(세후)", "만기 수령액"],
            rows,
        )
    );
    println!(
        "현재까지 모인 모든 원금: {}",
        fmt_won(total_saved_principal(store.savings()))
    );
    Ok(())
}
