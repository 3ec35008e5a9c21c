// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use hamsterbook::finance::{
    INTEREST_TAX_RATE, maturity, monthly_payment, total_fixed_expenses, total_monthly_payments,
    total_saved_principal,
};
use hamsterbook::models::{FixedExpense, Loan, Saving, SavingKind};
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn saving(kind: SavingKind, amount: i64, rate: &str, term: u32) -> Saving {
    Saving {
        id: "s".into(),
        name: "테스트".into(),
        kind,
        monthly_amount: Decimal::from(amount),
        rate: dec(rate),
        term,
        start_date: start(),
    }
}

fn loan(principal: i64, rate: &str, term: u32) -> Loan {
    Loan {
        id: "l".into(),
        name: "대출".into(),
        principal: Decimal::from(principal),
        rate: dec(rate),
        term,
        start_date: start(),
    }
}

#[test]
fn tax_rate_is_fifteen_point_four_percent() {
    assert_eq!(INTEREST_TAX_RATE, dec("0.154"));
}

#[test]
fn deposit_earns_simple_interest() {
    let m = maturity(&saving(SavingKind::Deposit, 1_000_000, "4", 12));
    assert_eq!(m.principal, Decimal::from(1_000_000));
    assert_eq!(m.gross_interest, Decimal::from(40_000));
    assert_eq!(m.tax, Decimal::from(6_160));
    assert_eq!(m.interest_after_tax, Decimal::from(33_840));
    assert_eq!(m.total, Decimal::from(1_033_840));
}

#[test]
fn deposit_scales_with_partial_years() {
    let m = maturity(&saving(SavingKind::Deposit, 1_000_000, "4", 6));
    assert_eq!(m.gross_interest, Decimal::from(20_000));
}

#[test]
fn installment_weights_each_month() {
    let m = maturity(&saving(SavingKind::Installment, 100_000, "3.6", 12));
    assert_eq!(m.principal, Decimal::from(1_200_000));
    assert_eq!(m.gross_interest, Decimal::from(23_400));
    assert_eq!(m.tax, dec("3603.6"));
    assert_eq!(m.interest_after_tax, dec("19796.4"));
    assert_eq!(m.total, dec("1219796.4"));
}

#[test]
fn zero_rate_and_zero_term_savings() {
    let m = maturity(&saving(SavingKind::Installment, 50_000, "0", 24));
    assert_eq!(m.principal, Decimal::from(1_200_000));
    assert!(m.gross_interest.is_zero());
    assert_eq!(m.total, m.principal);

    let m = maturity(&saving(SavingKind::Installment, 50_000, "3", 0));
    assert!(m.principal.is_zero());
    assert!(m.total.is_zero());
}

#[test]
fn amortized_payment_is_floored() {
    let p = monthly_payment(&loan(12_000_000, "6", 12));
    let expected = Decimal::from(1_032_797);
    assert!((p - expected).abs() <= Decimal::ONE, "got {}", p);
    assert_eq!(p, p.floor());

    let mortgage = monthly_payment(&loan(30_000_000, "3.5", 360));
    assert!((mortgage - Decimal::from(134_713)).abs() <= Decimal::ONE, "got {}", mortgage);
}

#[test]
fn payment_never_below_straight_line() {
    let l = loan(5_000_000, "12", 24);
    let straight = Decimal::from(5_000_000) / Decimal::from(24);
    assert!(monthly_payment(&l) > straight.floor());
}

#[test]
fn zero_rate_loan_is_principal_over_term() {
    assert_eq!(
        monthly_payment(&loan(1_200_000, "0", 12)),
        Decimal::from(100_000)
    );
    assert_eq!(monthly_payment(&loan(1_000_000, "0", 3)), Decimal::from(333_333));
}

#[test]
fn zero_term_loan_pays_nothing() {
    assert!(monthly_payment(&loan(1_000_000, "5", 0)).is_zero());
}

#[test]
fn totals_add_up() {
    let fixed = vec![
        FixedExpense {
            id: "a".into(),
            name: "월세".into(),
            amount: Decimal::from(500_000),
            day: 25,
        },
        FixedExpense {
            id: "b".into(),
            name: "통신비".into(),
            amount: Decimal::from(55_000),
            day: 10,
        },
    ];
    assert_eq!(total_fixed_expenses(&fixed), Decimal::from(555_000));
    assert!(total_fixed_expenses(&[]).is_zero());

    let loans = vec![loan(1_200_000, "0", 12), loan(600_000, "0", 6)];
    assert_eq!(total_monthly_payments(&loans), Decimal::from(200_000));
}

#[test]
fn unrepresentable_growth_pays_interest_only() {
    // (1 + 1/12)^1000 does not fit in a Decimal
    assert_eq!(
        monthly_payment(&loan(1_000_000, "100", 1000)),
        Decimal::from(83_333)
    );
}

#[test]
fn large_principal_over_long_term_stays_finite() {
    let p = monthly_payment(&loan(1_000_000_000_000, "100", 700));
    let interest_only = Decimal::from(83_333_333_333i64);
    assert!((p - interest_only).abs() <= Decimal::ONE, "got {}", p);
}

#[test]
fn oversized_saving_projects_to_zero() {
    let mut s = saving(SavingKind::Installment, 1, "5", 12);
    s.monthly_amount = Decimal::MAX;
    let m = maturity(&s);
    assert!(m.total.is_zero());
    assert!(m.gross_interest.is_zero());
}

#[test]
fn saved_principal_counts_lump_sums_and_contributions() {
    let savings = vec![
        saving(SavingKind::Deposit, 1_000_000, "4", 12),
        saving(SavingKind::Installment, 100_000, "3.6", 12),
    ];
    assert_eq!(total_saved_principal(&savings), Decimal::from(2_200_000));
    assert!(total_saved_principal(&[]).is_zero());

    let mut huge = saving(SavingKind::Installment, 1, "1", 24);
    huge.monthly_amount = Decimal::MAX;
    assert_eq!(total_saved_principal(&[huge]), Decimal::MAX);
}

#[test]
fn totals_saturate_instead_of_overflowing() {
    let fixed: Vec<FixedExpense> = (0..2)
        .map(|i| FixedExpense {
            id: i.to_string(),
            name: "big".into(),
            amount: Decimal::MAX,
            day: 1,
        })
        .collect();
    assert_eq!(total_fixed_expenses(&fixed), Decimal::MAX);
}

#[test]
fn maturity_serializes_camel_case() {
    let v = serde_json::to_value(maturity(&saving(SavingKind::Deposit, 1_000_000, "4", 12))).unwrap();
    assert!(!v["grossInterest"].is_null());
    assert!(v.get("interestAfterTax").is_some());
    assert!(v.get("gross_interest").is_none());
}
