// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionType;
use crate::stats::{CategoryShare, Totals, category_breakdown, monthly_totals, yearly_trend};
use crate::store::LedgerStore;
use crate::utils::{fmt_won, maybe_print_json, month_or_current, pretty_table, today};
use anyhow::{Result, anyhow};
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;

const BAR_WIDTH: u32 = 30;

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("month", sub)) => month(store, sub)?,
        Some(("year", sub)) => year(store, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct MonthReport {
    year: i32,
    month: u32,
    totals: Totals,
    balance: Decimal,
    r#type: TransactionType,
    categories: Vec<CategoryShare>,
}

fn month(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = month_or_current(sub.get_one::<String>("month"))?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()
        .map_err(|bad| anyhow!("Unknown transaction type '{}'", bad))?
        .unwrap_or(TransactionType::Expense);

    let totals = monthly_totals(store.transactions(), year, month);
    let categories = category_breakdown(store.transactions(), year, month, kind);
    let report = MonthReport {
        year,
        month,
        totals,
        balance: totals.balance(),
        r#type: kind,
        categories,
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    println!("📊 {}년 {}월 상세 분석", year, month);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                format!("+{}", fmt_won(totals.income)),
                format!("-{}", fmt_won(totals.expense)),
                fmt_won(totals.balance()),
            ]],
        )
    );
    let label = match kind {
        TransactionType::Income => "💰 수입",
        TransactionType::Expense => "💸 지출",
    };
    println!("{} 카테고리 순위", label);
    if report.categories.is_empty() {
        println!("(no {} recorded this month)", kind.as_str().to_lowercase());
        return Ok(());
    }
    let rows = report
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            vec![
                (i + 1).to_string(),
                c.category.clone(),
                fmt_won(c.amount),
                format!("{}%", c.percentage),
                "█".repeat((c.percentage as usize * BAR_WIDTH as usize) / 100),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["#", "Category", "Amount", "Share", ""], rows)
    );
    Ok(())
}

fn year(store: &LedgerStore, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| today().year());
    let trend = yearly_trend(store.transactions(), year);
    if maybe_print_json(json_flag, jsonl_flag, &trend)? {
        return Ok(());
    }
    let rows = trend
        .months
        .iter()
        .map(|m| {
            vec![
                format!("{}월", m.month),
                fmt_won(m.income),
                fmt_won(m.expense),
                format!(
                    "{}\n{}",
                    "▇".repeat(trend.bar_len(m.income, BAR_WIDTH) as usize),
                    "░".repeat(trend.bar_len(m.expense, BAR_WIDTH) as usize)
                ),
            ]
        })
        .collect();
    println!("📈 {}년 월별 추이 (▇ 수입 / ░ 지출)", year);
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", ""], rows)
    );
    Ok(())
}
