// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hamsterbook::models::{Transaction, TransactionType};
use hamsterbook::stats::{category_breakdown, daily_totals, monthly_totals, yearly_trend};
use rust_decimal::Decimal;

fn tx(date: &str, kind: TransactionType, category: &str, amount: i64) -> Transaction {
    Transaction {
        id: format!("{}-{}-{}", date, category, amount),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        r#type: kind,
        category: category.into(),
        amount: Decimal::from(amount),
        description: String::new(),
    }
}

fn sample() -> Vec<Transaction> {
    use TransactionType::*;
    vec![
        tx("2024-01-25", Income, "월급", 3_000_000),
        tx("2024-01-03", Expense, "식비", 12_000),
        tx("2024-03-05", Expense, "식비", 15_000),
        tx("2024-03-05", Expense, "교통", 1_400),
        tx("2024-03-05", Income, "용돈", 50_000),
        tx("2024-03-18", Expense, "쇼핑", 15_000),
        tx("2024-03-31", Expense, "식비", 8_000),
        tx("2024-12-31", Expense, "여행", 400_000),
        tx("2023-12-31", Expense, "식비", 99_999),
        tx("2025-01-01", Income, "보너스", 1_000_000),
    ]
}

#[test]
fn monthly_and_daily_totals() {
    let txs = sample();
    let march = monthly_totals(&txs, 2024, 3);
    assert_eq!(march.income, Decimal::from(50_000));
    assert_eq!(march.expense, Decimal::from(39_400));
    assert_eq!(march.balance(), Decimal::from(10_600));

    let day = daily_totals(&txs, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(day.income, Decimal::from(50_000));
    assert_eq!(day.expense, Decimal::from(16_400));
}

#[test]
fn empty_inputs_give_zeroes() {
    let none: Vec<Transaction> = Vec::new();
    let t = monthly_totals(&none, 2024, 2);
    assert_eq!(t.income, Decimal::ZERO);
    assert_eq!(t.expense, Decimal::ZERO);
    assert!(category_breakdown(&none, 2024, 2, TransactionType::Expense).is_empty());
    // a month with no data in a non-empty list
    assert_eq!(monthly_totals(&sample(), 2024, 7), Default::default());
}

#[test]
fn months_partition_the_year() {
    let txs = sample();
    let trend = yearly_trend(&txs, 2024);
    assert_eq!(trend.months.len(), 12);
    assert_eq!(
        trend.months.iter().map(|m| m.month).collect::<Vec<_>>(),
        (1..=12).collect::<Vec<_>>()
    );

    let from_months: Decimal = trend.months.iter().map(|m| m.income + m.expense).sum();
    let direct: Decimal = txs
        .iter()
        .filter(|t| t.date.format("%Y").to_string() == "2024")
        .map(|t| t.amount)
        .sum();
    assert_eq!(from_months, direct);
}

#[test]
fn trend_scale_is_largest_single_figure() {
    let trend = yearly_trend(&sample(), 2024);
    assert_eq!(trend.scale_max, Decimal::from(3_000_000));
    assert_eq!(trend.bar_len(Decimal::from(3_000_000), 30), 30);
    assert_eq!(trend.bar_len(Decimal::from(1_500_000), 30), 15);

    let empty = yearly_trend(&[], 2024);
    assert_eq!(empty.scale_max, Decimal::ONE);
    assert_eq!(empty.bar_len(Decimal::ZERO, 30), 0);
}

#[test]
fn breakdown_sorted_descending_with_stable_ties() {
    let txs = sample();
    let shares = category_breakdown(&txs, 2024, 3, TransactionType::Expense);
    let names: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
    // 식비 23,000 first; 쇼핑 15,000 then 교통 1,400
    assert_eq!(names, vec!["식비", "쇼핑", "교통"]);
    assert_eq!(shares[0].amount, Decimal::from(23_000));
    assert_eq!(shares[0].percentage, 58);
    assert_eq!(shares[1].percentage, 38);
    assert_eq!(shares[2].percentage, 4);

    let ties = vec![
        tx("2024-05-01", TransactionType::Expense, "B", 100),
        tx("2024-05-02", TransactionType::Expense, "A", 100),
        tx("2024-05-03", TransactionType::Expense, "C", 300),
    ];
    let shares = category_breakdown(&ties, 2024, 5, TransactionType::Expense);
    let names: Vec<&str> = shares.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(names, vec!["C", "B", "A"]);
}

#[test]
fn percentages_are_bounded_and_zero_when_total_is_zero() {
    let thirds = vec![
        tx("2024-06-01", TransactionType::Expense, "a", 1),
        tx("2024-06-01", TransactionType::Expense, "b", 1),
        tx("2024-06-01", TransactionType::Expense, "c", 1),
    ];
    let shares = category_breakdown(&thirds, 2024, 6, TransactionType::Expense);
    let sum: u32 = shares.iter().map(|s| s.percentage).sum();
    assert_eq!(sum, 99);

    let halves = vec![
        tx("2024-06-01", TransactionType::Income, "a", 1),
        tx("2024-06-01", TransactionType::Income, "b", 7),
    ];
    let shares = category_breakdown(&halves, 2024, 6, TransactionType::Income);
    // 12.5 rounds half-up
    assert_eq!(shares[1].percentage, 13);

    let zeros = vec![
        tx("2024-06-01", TransactionType::Expense, "free", 0),
        tx("2024-06-02", TransactionType::Expense, "gift", 0),
    ];
    let shares = category_breakdown(&zeros, 2024, 6, TransactionType::Expense);
    assert_eq!(shares.len(), 2);
    assert!(shares.iter().all(|s| s.percentage == 0));
}

#[test]
fn enormous_amounts_saturate_without_panicking() {
    let big = |category: &str| Transaction {
        id: category.into(),
        date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
        r#type: TransactionType::Expense,
        category: category.into(),
        amount: Decimal::MAX,
        description: String::new(),
    };
    let txs = vec![big("a"), big("b"), big("a")];

    let totals = monthly_totals(&txs, 2024, 8);
    assert_eq!(totals.expense, Decimal::MAX);
    assert!(totals.balance() < Decimal::ZERO);

    let shares = category_breakdown(&txs, 2024, 8, TransactionType::Expense);
    assert_eq!(shares.len(), 2);
    assert!(shares.iter().all(|s| s.percentage <= 100));

    let trend = yearly_trend(&txs, 2024);
    assert_eq!(trend.bar_len(Decimal::MAX, 30), 30);
}
