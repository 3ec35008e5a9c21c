// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use num_format::{Locale, ToFormattedString};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::time::Duration;

const UA: &str = concat!("hamsterbook/", env!("CARGO_PKG_VERSION"));

pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(UA)
        .build()?;
    Ok(c)
}

/// The viewer's local calendar date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `YYYY-MM` to (year, 1-based month).
pub fn parse_month(s: &str) -> Result<(i32, u32)> {
    let d = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok((d.year(), d.month()))
}

/// Month given on the command line, or the current one.
pub fn month_or_current(arg: Option<&String>) -> Result<(i32, u32)> {
    match arg {
        Some(s) => parse_month(s),
        None => {
            let t = today();
            Ok((t.year(), t.month()))
        }
    }
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .replace(',', "")
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Whole currency units with thousands separators, floored.
pub fn fmt_won(d: Decimal) -> String {
    format!("{}원", fmt_amount(d))
}

pub fn fmt_amount(d: Decimal) -> String {
    let whole = d.floor();
    whole
        .to_i128()
        .map(|v| v.to_formatted_string(&Locale::en))
        .unwrap_or_else(|| whole.to_string())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Asks a yes/no question on stdin; anything but y/yes is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    use std::io::{BufRead, Write};
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| anyhow!("Failed to read confirmation: {}", e))?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

/// Validation blocks the submission; it is reported, not raised.
pub fn report_invalid(e: &crate::error::ValidationError) {
    eprintln!("Not saved: {}", e);
}
