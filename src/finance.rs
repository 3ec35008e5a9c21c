// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Savings maturity and loan repayment formulas.
//!
//! All arithmetic stays in full `Decimal` precision; callers floor only when
//! displaying.

use crate::models::{FixedExpense, Loan, Saving, SavingKind};
use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

/// Flat interest-income withholding (15.4%).
pub const INTEREST_TAX_RATE: Decimal = Decimal::from_parts(154, 0, 0, false, 3);

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Maturity {
    pub principal: Decimal,
    pub gross_interest: Decimal,
    pub tax: Decimal,
    pub interest_after_tax: Decimal,
    pub total: Decimal,
}

fn annual_fraction(rate_percent: Decimal) -> Decimal {
    rate_percent / Decimal::ONE_HUNDRED
}

/// Money put in over the whole term.
fn principal_of(saving: &Saving) -> Option<Decimal> {
    match saving.kind {
        SavingKind::Installment => saving
            .monthly_amount
            .checked_mul(Decimal::from(saving.term)),
        SavingKind::Deposit => Some(saving.monthly_amount),
    }
}

fn checked_maturity(saving: &Saving) -> Option<Maturity> {
    let a = saving.monthly_amount;
    let n = Decimal::from(saving.term);
    let r = annual_fraction(saving.rate);

    let principal = principal_of(saving)?;
    let gross_interest = match saving.kind {
        SavingKind::Installment => {
            let month_weights = n * (n + Decimal::ONE) / Decimal::TWO;
            a.checked_mul(month_weights)?
                .checked_mul(r / MONTHS_PER_YEAR)?
        }
        SavingKind::Deposit => a.checked_mul(r)?.checked_mul(n / MONTHS_PER_YEAR)?,
    };
    let tax = gross_interest.checked_mul(INTEREST_TAX_RATE)?;
    let interest_after_tax = gross_interest - tax;
    Some(Maturity {
        principal,
        gross_interest,
        tax,
        interest_after_tax,
        total: principal.checked_add(interest_after_tax)?,
    })
}

/// Projected payout at the end of the term.
///
/// Installments use the flat installment approximation
/// `a * n(n+1)/2 * r/12`; deposits earn simple interest `a * r * n/12`.
/// Neither compounds. Figures too large to represent come back as zero.
pub fn maturity(saving: &Saving) -> Maturity {
    checked_maturity(saving).unwrap_or_else(|| {
        log::warn!(
            "Saving '{}' is too large to project (rate {}%, {} months)",
            saving.name,
            saving.rate,
            saving.term
        );
        Maturity::default()
    })
}

/// Equal monthly payment (principal + interest) over the loan term, floored.
///
/// Computed as `P * r / (1 - (1 + r)^-n)`. A zero rate degenerates that to
/// 0/0, so it falls back to `principal / term`. When `(1 + r)^n` is too large
/// to represent, the discount term is indistinguishable from zero and the
/// payment is the interest-only limit `P * r`. A zero term yields 0.
pub fn monthly_payment(loan: &Loan) -> Decimal {
    if loan.term == 0 {
        return Decimal::ZERO;
    }
    let term = Decimal::from(loan.term);
    let monthly_rate = annual_fraction(loan.rate) / MONTHS_PER_YEAR;
    if monthly_rate.is_zero() {
        return (loan.principal / term).floor();
    }
    let payment = match (Decimal::ONE + monthly_rate).checked_powi(i64::from(loan.term)) {
        None => loan.principal.checked_mul(monthly_rate),
        Some(growth) => {
            let remaining = Decimal::ONE.checked_div(growth).map(|d| Decimal::ONE - d);
            match remaining {
                Some(denominator) if !denominator.is_zero() => loan
                    .principal
                    .checked_mul(monthly_rate)
                    .and_then(|interest| interest.checked_div(denominator)),
                _ => Some(loan.principal / term),
            }
        }
    };
    match payment {
        Some(p) => p.floor(),
        None => {
            log::warn!(
                "Loan '{}' overflows the payment formula (rate {}%, {} months)",
                loan.name,
                loan.rate,
                loan.term
            );
            Decimal::ZERO
        }
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

pub fn total_fixed_expenses(items: &[FixedExpense]) -> Decimal {
    saturating_sum(items.iter().map(|f| f.amount))
}

pub fn total_monthly_payments(loans: &[Loan]) -> Decimal {
    saturating_sum(loans.iter().map(monthly_payment))
}

/// Principal committed across all savings: deposits count their lump sum,
/// installments their contribution times the term.
pub fn total_saved_principal(savings: &[Saving]) -> Decimal {
    saturating_sum(
        savings
            .iter()
            .map(|s| principal_of(s).unwrap_or(Decimal::MAX)),
    )
}
