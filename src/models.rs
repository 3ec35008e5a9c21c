// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest amount any record may carry: 1,000조원 (10^15).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

fn check_ceiling(amount: Decimal) -> Result<(), ValidationError> {
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub r#type: TransactionType,
    pub category: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

/// A transaction that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub date: NaiveDate,
    pub r#type: TransactionType,
    pub category: String,
    pub amount: Decimal,
    pub description: String,
}

impl TransactionInput {
    /// Invariants every stored transaction must satisfy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if self.amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount);
        }
        check_ceiling(self.amount)
    }

    /// Manual entry is stricter than the stored invariant: zero amounts are refused.
    pub fn validate_manual(&self) -> Result<(), ValidationError> {
        self.validate()?;
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
    pub day: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedExpenseInput {
    pub name: String,
    pub amount: Decimal,
    pub day: u32,
}

impl FixedExpenseInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        check_ceiling(self.amount)?;
        // day is not checked against the length of any particular month
        if !(1..=31).contains(&self.day) {
            return Err(ValidationError::DayOutOfRange(self.day));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SavingKind {
    /// Periodic monthly contribution.
    Installment,
    /// Lump sum held for the whole term.
    Deposit,
}

impl fmt::Display for SavingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavingKind::Installment => f.write_str("INSTALLMENT"),
            SavingKind::Deposit => f.write_str("DEPOSIT"),
        }
    }
}

impl FromStr for SavingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INSTALLMENT" => Ok(SavingKind::Installment),
            "DEPOSIT" => Ok(SavingKind::Deposit),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Saving {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SavingKind,
    /// Monthly contribution for installments, principal for deposits.
    pub monthly_amount: Decimal,
    /// Annual rate in percent (3.5 means 3.5%).
    pub rate: Decimal,
    /// Term in months.
    pub term: u32,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavingInput {
    pub name: String,
    pub kind: SavingKind,
    pub monthly_amount: Decimal,
    pub rate: Decimal,
    pub term: u32,
    pub start_date: NaiveDate,
}

impl SavingInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.monthly_amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        check_ceiling(self.monthly_amount)?;
        if self.rate < Decimal::ZERO {
            return Err(ValidationError::NegativeRate);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub name: String,
    pub principal: Decimal,
    /// Annual rate in percent.
    pub rate: Decimal,
    /// Repayment term in months.
    pub term: u32,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanInput {
    pub name: String,
    pub principal: Decimal,
    pub rate: Decimal,
    pub term: u32,
    pub start_date: NaiveDate,
}

impl LoanInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.principal <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        check_ceiling(self.principal)?;
        if self.rate < Decimal::ZERO {
            return Err(ValidationError::NegativeRate);
        }
        if self.term == 0 {
            return Err(ValidationError::ZeroTerm);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

/// One conversation turn, shaped like the assistant service's `Content` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}
