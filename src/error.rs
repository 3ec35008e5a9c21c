// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("category is required")]
    EmptyCategory,
    #[error("name is required")]
    EmptyName,
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("amount must not be negative")]
    NegativeAmount,
    #[error("amount exceeds 1,000,000,000,000,000")]
    AmountTooLarge,
    #[error("day of month must be between 1 and 31, got {0}")]
    DayOutOfRange(u32),
    #[error("rate must not be negative")]
    NegativeRate,
    #[error("term must be at least one month")]
    ZeroTerm,
}

/// Why a structured `addTransaction` call could not become a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("call arguments must be a JSON object")]
    NotAnObject,
    #[error("unsupported transaction type '{0}'")]
    UnknownType(String),
    #[error("amount '{0}' is not a valid number")]
    InvalidAmount(String),
    #[error("date '{0}' is not in YYYY-MM-DD form")]
    InvalidDate(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("a message is already being sent")]
    Busy,
    #[error("message is empty")]
    EmptyMessage,
}
