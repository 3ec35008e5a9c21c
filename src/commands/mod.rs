// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calendar;
pub mod chat;
pub mod fixed;
pub mod loans;
pub mod reports;
pub mod savings;
pub mod settings;
pub mod transactions;

use crate::store::{FinancialKind, LedgerStore};
use crate::utils::confirm;
use anyhow::Result;

/// Shared `rm` for the financial-product subcommands.
fn remove(store: &mut LedgerStore, kind: FinancialKind, sub: &clap::ArgMatches) -> Result<()> {
    let Some(id) = sub.get_one::<String>("id") else {
        return Ok(());
    };
    if !sub.get_flag("yes") && !confirm("삭제하시겠습니까?")? {
        println!("Cancelled");
        return Ok(());
    }
    if store.delete_financial_item(kind, id)? {
        println!("Deleted {}", id);
    } else {
        println!("No entry with id {}", id);
    }
    Ok(())
}
