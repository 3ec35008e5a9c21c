// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calendar::{DayCell, MonthGrid, build_month_grid};
use crate::store::LedgerStore;
use crate::utils::{fmt_amount, month_or_current, today};
use anyhow::Result;
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

const WEEKDAYS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

pub fn handle(store: &LedgerStore, m: &clap::ArgMatches) -> Result<()> {
    let (year, month) = month_or_current(m.get_one::<String>("month"))?;
    let grid = build_month_grid(year, month, store.transactions(), today())?;
    println!("{}년 {}월", year, month);
    println!("{}", render(&grid));
    Ok(())
}

fn cell_text(day: &DayCell) -> String {
    let mut lines = vec![if day.is_today {
        format!("{} *", day.day)
    } else {
        day.day.to_string()
    }];
    if let Some(name) = day.holiday {
        lines.push(name.to_string());
    }
    if day.totals.income > Decimal::ZERO {
        lines.push(format!("+{}", fmt_amount(day.totals.income)));
    }
    if day.totals.expense > Decimal::ZERO {
        lines.push(format!("-{}", fmt_amount(day.totals.expense)));
    }
    lines.join("\n")
}

pub fn render(grid: &MonthGrid) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(WEEKDAYS.iter().enumerate().map(|(i, w)| match i {
        0 => Cell::new(*w).fg(Color::Red),
        6 => Cell::new(*w).fg(Color::Blue),
        _ => Cell::new(*w),
    }));
    for week in grid.weeks() {
        t.add_row(week.into_iter().map(|cell| match cell {
            None => Cell::new(""),
            Some(day) => {
                let c = Cell::new(cell_text(day));
                if day.weekday() == 0 || day.holiday.is_some() {
                    c.fg(Color::Red)
                } else if day.weekday() == 6 {
                    c.fg(Color::Blue)
                } else {
                    c
                }
            }
        }));
    }
    t
}
