// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger store owns the four persisted collections.
//!
//! Every collection lives in its own slot as a JSON array. A mutation rewrites
//! only the slot of the collection it touched, and the in-memory state is
//! rolled back if that write fails, so memory and storage never disagree.

use crate::db::{read_slot, write_slot};
use crate::models::{
    FixedExpense, FixedExpenseInput, Loan, LoanInput, Saving, SavingInput, Transaction,
    TransactionInput,
};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Transactions,
    FixedExpenses,
    Savings,
    Loans,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Transactions,
        Collection::FixedExpenses,
        Collection::Savings,
        Collection::Loans,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Transactions => "rich_hamster_ledger_transactions",
            Collection::FixedExpenses => "rich_hamster_fixed_expenses",
            Collection::Savings => "rich_hamster_savings",
            Collection::Loans => "rich_hamster_loans",
        }
    }
}

/// The deletable financial-product collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinancialKind {
    FixedExpense,
    Saving,
    Loan,
}

impl FinancialKind {
    pub fn collection(&self) -> Collection {
        match self {
            FinancialKind::FixedExpense => Collection::FixedExpenses,
            FinancialKind::Saving => Collection::Savings,
            FinancialKind::Loan => Collection::Loans,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerState {
    pub transactions: Vec<Transaction>,
    pub fixed_expenses: Vec<FixedExpense>,
    pub savings: Vec<Saving>,
    pub loans: Vec<Loan>,
}

pub struct LedgerStore {
    conn: Connection,
    state: LedgerState,
}

/// Random v4 UUID: 122 random bits, so collisions are not a practical concern.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn decode_slot<T: DeserializeOwned>(conn: &Connection, collection: Collection) -> Result<Vec<T>> {
    let Some(raw) = read_slot(conn, collection.key())? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            log::warn!(
                "Stored '{}' could not be decoded ({}); starting with an empty list",
                collection.key(),
                e
            );
            Ok(Vec::new())
        }
    }
}

fn encode<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items).context("Serialize collection")
}

impl LedgerStore {
    /// Reads all four collections. A corrupt slot only empties its own collection.
    pub fn load(conn: Connection) -> Result<Self> {
        let state = LedgerState {
            transactions: decode_slot(&conn, Collection::Transactions)?,
            fixed_expenses: decode_slot(&conn, Collection::FixedExpenses)?,
            savings: decode_slot(&conn, Collection::Savings)?,
            loans: decode_slot(&conn, Collection::Loans)?,
        };
        log::debug!(
            "Loaded {} transactions, {} fixed expenses, {} savings, {} loans",
            state.transactions.len(),
            state.fixed_expenses.len(),
            state.savings.len(),
            state.loans.len()
        );
        Ok(Self { conn, state })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.state.transactions
    }

    pub fn fixed_expenses(&self) -> &[FixedExpense] {
        &self.state.fixed_expenses
    }

    pub fn savings(&self) -> &[Saving] {
        &self.state.savings
    }

    pub fn loans(&self) -> &[Loan] {
        &self.state.loans
    }

    /// Writes one collection to its slot.
    pub fn save(&self, collection: Collection) -> Result<()> {
        let json = match collection {
            Collection::Transactions => encode(&self.state.transactions)?,
            Collection::FixedExpenses => encode(&self.state.fixed_expenses)?,
            Collection::Savings => encode(&self.state.savings)?,
            Collection::Loans => encode(&self.state.loans)?,
        };
        write_slot(&self.conn, collection.key(), &json)?;
        log::debug!("Saved '{}' ({} bytes)", collection.key(), json.len());
        Ok(())
    }

    pub fn add_transaction(&mut self, input: TransactionInput) -> Result<Transaction> {
        input.validate()?;
        let tx = Transaction {
            id: new_id(),
            date: input.date,
            r#type: input.r#type,
            category: input.category.trim().to_string(),
            amount: input.amount,
            description: input.description,
        };
        self.state.transactions.push(tx.clone());
        if let Err(e) = self.save(Collection::Transactions) {
            self.state.transactions.pop();
            return Err(e);
        }
        Ok(tx)
    }

    pub fn add_fixed_expense(&mut self, input: FixedExpenseInput) -> Result<FixedExpense> {
        input.validate()?;
        let item = FixedExpense {
            id: new_id(),
            name: input.name.trim().to_string(),
            amount: input.amount,
            day: input.day,
        };
        self.state.fixed_expenses.push(item.clone());
        if let Err(e) = self.save(Collection::FixedExpenses) {
            self.state.fixed_expenses.pop();
            return Err(e);
        }
        Ok(item)
    }

    pub fn add_saving(&mut self, input: SavingInput) -> Result<Saving> {
        input.validate()?;
        let item = Saving {
            id: new_id(),
            name: input.name.trim().to_string(),
            kind: input.kind,
            monthly_amount: input.monthly_amount,
            rate: input.rate,
            term: input.term,
            start_date: input.start_date,
        };
        self.state.savings.push(item.clone());
        if let Err(e) = self.save(Collection::Savings) {
            self.state.savings.pop();
            return Err(e);
        }
        Ok(item)
    }

    pub fn add_loan(&mut self, input: LoanInput) -> Result<Loan> {
        input.validate()?;
        let item = Loan {
            id: new_id(),
            name: input.name.trim().to_string(),
            principal: input.principal,
            rate: input.rate,
            term: input.term,
            start_date: input.start_date,
        };
        self.state.loans.push(item.clone());
        if let Err(e) = self.save(Collection::Loans) {
            self.state.loans.pop();
            return Err(e);
        }
        Ok(item)
    }

    /// Removes an entry by id. Returns `false` (and writes nothing) when the id is absent.
    /// Confirmation is the caller's job.
    pub fn delete_financial_item(&mut self, kind: FinancialKind, id: &str) -> Result<bool> {
        match kind {
            FinancialKind::FixedExpense => {
                let Some(idx) = self.state.fixed_expenses.iter().position(|x| x.id == id) else {
                    return Ok(false);
                };
                let removed = self.state.fixed_expenses.remove(idx);
                if let Err(e) = self.save(kind.collection()) {
                    self.state.fixed_expenses.insert(idx, removed);
                    return Err(e);
                }
            }
            FinancialKind::Saving => {
                let Some(idx) = self.state.savings.iter().position(|x| x.id == id) else {
                    return Ok(false);
                };
                let removed = self.state.savings.remove(idx);
                if let Err(e) = self.save(kind.collection()) {
                    self.state.savings.insert(idx, removed);
                    return Err(e);
                }
            }
            FinancialKind::Loan => {
                let Some(idx) = self.state.loans.iter().position(|x| x.id == id) else {
                    return Ok(false);
                };
                let removed = self.state.loans.remove(idx);
                if let Err(e) = self.save(kind.collection()) {
                    self.state.loans.insert(idx, removed);
                    return Err(e);
                }
            }
        }
        Ok(true)
    }
}
