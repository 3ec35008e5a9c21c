// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::stats::{Totals, daily_totals};
use anyhow::{Result, anyhow};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Public holidays, matched by exact `YYYY-MM-DD`.
pub const HOLIDAYS: &[(&str, &str)] = &[
    ("2024-01-01", "신정"),
    ("2024-02-09", "설날"),
    ("2024-02-10", "설날"),
    ("2024-02-11", "설날"),
    ("2024-02-12", "대체공휴일"),
    ("2024-03-01", "삼일절"),
    ("2024-04-10", "국회의원선거"),
    ("2024-05-05", "어린이날"),
    ("2024-05-06", "대체공휴일"),
    ("2024-05-15", "부처님오신날"),
    ("2024-06-06", "현충일"),
    ("2024-08-15", "광복절"),
    ("2024-09-16", "추석"),
    ("2024-09-17", "추석"),
    ("2024-09-18", "추석"),
    ("2024-10-01", "국군의날"),
    ("2024-10-03", "개천절"),
    ("2024-10-09", "한글날"),
    ("2024-12-25", "크리스마스"),
    ("2025-01-01", "신정"),
    ("2025-01-27", "임시공휴일"),
    ("2025-01-28", "설날"),
    ("2025-01-29", "설날"),
    ("2025-01-30", "설날"),
    ("2025-03-01", "삼일절"),
    ("2025-03-03", "대체공휴일"),
    ("2025-05-05", "어린이날"),
    ("2025-05-06", "대체공휴일"),
    ("2025-06-03", "대통령선거"),
    ("2025-06-06", "현충일"),
    ("2025-08-15", "광복절"),
    ("2025-10-03", "개천절"),
    ("2025-10-05", "추석"),
    ("2025-10-06", "추석"),
    ("2025-10-07", "추석"),
    ("2025-10-08", "대체공휴일"),
    ("2025-10-09", "한글날"),
    ("2025-12-25", "크리스마스"),
    ("2026-01-01", "신정"),
    ("2026-02-16", "설날"),
    ("2026-02-17", "설날"),
    ("2026-02-18", "설날"),
    ("2026-03-01", "삼일절"),
    ("2026-03-02", "대체공휴일"),
    ("2026-05-05", "어린이날"),
    ("2026-05-24", "부처님오신날"),
    ("2026-05-25", "대체공휴일"),
    ("2026-06-06", "현충일"),
    ("2026-08-15", "광복절"),
    ("2026-08-17", "대체공휴일"),
    ("2026-09-24", "추석"),
    ("2026-09-25", "추석"),
    ("2026-09-26", "추석"),
    ("2026-10-03", "개천절"),
    ("2026-10-05", "대체공휴일"),
    ("2026-10-09", "한글날"),
    ("2026-12-25", "크리스마스"),
];

pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    let key = date.format("%Y-%m-%d").to_string();
    HOLIDAYS
        .iter()
        .find(|(d, _)| *d == key)
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub totals: Totals,
    pub is_today: bool,
    pub holiday: Option<&'static str>,
}

impl DayCell {
    /// Column in a Sunday-first week, 0 = Sunday.
    pub fn weekday(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Leading `None`s pad the first week; then one cell per day.
    pub cells: Vec<Option<DayCell>>,
}

impl MonthGrid {
    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().flatten()
    }

    /// Rows of seven, the last one padded with blanks.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell>>> {
        self.cells
            .chunks(7)
            .map(|w| {
                let mut row: Vec<Option<&DayCell>> = w.iter().map(|c| c.as_ref()).collect();
                row.resize(7, None);
                row
            })
            .collect()
    }
}

pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow!("Invalid month {}-{:02}", year, month))
}

/// Last day of the month, found as the day before the first of the next month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    let last = next
        .pred_opt()
        .ok_or_else(|| anyhow!("No day before {}", next))?;
    debug_assert_eq!(last.month(), first.month());
    Ok(last.day())
}

pub fn build_month_grid(
    year: i32,
    month: u32,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Result<MonthGrid> {
    let first = first_of_month(year, month)?;
    let blanks = first.weekday().num_days_from_sunday() as usize;
    let n = days_in_month(year, month)?;

    let mut cells: Vec<Option<DayCell>> = Vec::with_capacity(blanks + n as usize);
    cells.resize(blanks, None);
    for day in 1..=n {
        let date = first
            .with_day(day)
            .ok_or_else(|| anyhow!("Invalid day {} in {}-{:02}", day, year, month))?;
        cells.push(Some(DayCell {
            date,
            day,
            totals: daily_totals(transactions, date),
            is_today: date == today,
            holiday: holiday_name(date),
        }));
    }
    Ok(MonthGrid { year, month, cells })
}
