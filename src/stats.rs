// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period aggregation over the transaction list.
//!
//! Months are 1-based (January = 1). Nothing here is cached; every view is
//! recomputed from the full list on demand.

use crate::models::{Transaction, TransactionType};
use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    pub fn balance(&self) -> Decimal {
        self.income.saturating_sub(self.expense)
    }

    // sums saturate instead of overflowing
    fn add(&mut self, tx: &Transaction) {
        match tx.r#type {
            TransactionType::Income => self.income = self.income.saturating_add(tx.amount),
            TransactionType::Expense => self.expense = self.expense.saturating_add(tx.amount),
        }
    }

    pub fn of(&self, kind: TransactionType) -> Decimal {
        match kind {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
        }
    }
}

fn in_month(tx: &Transaction, year: i32, month: u32) -> bool {
    tx.date.year() == year && tx.date.month() == month
}

fn sum<'a>(txs: impl Iterator<Item = &'a Transaction>) -> Totals {
    let mut totals = Totals::default();
    for tx in txs {
        totals.add(tx);
    }
    totals
}

pub fn monthly_totals(transactions: &[Transaction], year: i32, month: u32) -> Totals {
    sum(transactions.iter().filter(|t| in_month(t, year, month)))
}

pub fn daily_totals(transactions: &[Transaction], date: NaiveDate) -> Totals {
    sum(transactions.iter().filter(|t| t.date == date))
}

pub fn month_transactions(transactions: &[Transaction], year: i32, month: u32) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| in_month(t, year, month))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotals {
    pub month: u32,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyTrend {
    pub year: i32,
    pub months: Vec<MonthTotals>,
    /// Largest single income or expense figure of the year, never below 1.
    pub scale_max: Decimal,
}

impl YearlyTrend {
    /// Bar length for `value` when the tallest bar is `height` units.
    pub fn bar_len(&self, value: Decimal, height: u32) -> u32 {
        let scaled = value / self.scale_max * Decimal::from(height);
        scaled.floor().to_u32().unwrap_or(0).min(height)
    }
}

pub fn yearly_trend(transactions: &[Transaction], year: i32) -> YearlyTrend {
    let months: Vec<MonthTotals> = (1..=12)
        .map(|m| {
            let t = monthly_totals(transactions, year, m);
            MonthTotals {
                month: m,
                income: t.income,
                expense: t.expense,
            }
        })
        .collect();
    let scale_max = months
        .iter()
        .map(|m| m.income.max(m.expense))
        .fold(Decimal::ONE, |acc, v| acc.max(v));
    YearlyTrend {
        year,
        months,
        scale_max,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    /// Share of the month's total for the type, rounded half-up to a whole percent.
    pub percentage: u32,
}

pub fn category_breakdown(
    transactions: &[Transaction],
    year: i32,
    month: u32,
    kind: TransactionType,
) -> Vec<CategoryShare> {
    let mut order: Vec<(String, Decimal)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for tx in transactions
        .iter()
        .filter(|t| t.r#type == kind && in_month(t, year, month))
    {
        match index.get(&tx.category) {
            Some(&i) => order[i].1 = order[i].1.saturating_add(tx.amount),
            None => {
                index.insert(tx.category.clone(), order.len());
                order.push((tx.category.clone(), tx.amount));
            }
        }
    }
    let total = order
        .iter()
        .fold(Decimal::ZERO, |acc, (_, a)| acc.saturating_add(*a));
    // stable: equal sums keep first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            percentage: percent_of(amount, total),
            category,
            amount,
        })
        .collect()
}

fn percent_of(part: Decimal, total: Decimal) -> u32 {
    if total <= Decimal::ZERO {
        return 0;
    }
    (part / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
