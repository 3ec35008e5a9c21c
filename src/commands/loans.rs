// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::finance::{monthly_payment, total_monthly_payments};
use crate::models::{Loan, LoanInput};
use crate::store::{FinancialKind, LedgerStore};
use crate::utils::{
    fmt_won, maybe_print_json, parse_date, parse_decimal, pretty_table, report_invalid, today,
};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(store: &mut LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => super::remove(store, FinancialKind::Loan, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let start_date = match sub.get_one::<String>("start") {
        Some(raw) => parse_date(raw)?,
        None => today(),
    };
    let input = LoanInput {
        name: sub.get_one::<String>("name").cloned().unwrap_or_default(),
        principal: parse_decimal(sub.get_one::<String>("principal").map_or("0", |s| s.as_str()))?,
        rate: parse_decimal(sub.get_one::<String>("rate").map_or("0", |s| s.as_str()))?,
        term: sub.get_one::<u32>("term").copied().unwrap_or(0),
        start_date,
    };
    if let Err(e) = input.validate() {
        report_invalid(&e);
        return Ok(());
    }
    let item = store.add_loan(input)?;
    println!(
        "Added loan '{}' ({}); 월 상환액 {}",
        item.name,
        item.id,
        fmt_won(monthly_payment(&item))
    );
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoanRow<'a> {
    #[serde(flatten)]
    loan: &'a Loan,
    monthly_payment: Decimal,
}

fn list(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<LoanRow> = store
        .loans()
        .iter()
        .map(|l| LoanRow {
            loan: l,
            monthly_payment: monthly_payment(l),
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.loan.id.clone(),
                r.loan.name.clone(),
                fmt_won(r.loan.principal),
                format!("{}% / {}개월", r.loan.rate, r.loan.term),
                r.loan.start_date.to_string(),
                fmt_won(r.monthly_payment),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["ID", "Name", "Principal", "Rate / Term", "Start", "월 상환액"],
            rows
        )
    );
    println!(
        "월 대출 상환 합계: -{}",
        fmt_won(total_monthly_payments(store.loans()))
    );
    Ok(())
}
