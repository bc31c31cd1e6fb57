// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;

use crate::engine::{accounts, periods};
use crate::models::Expense;
use crate::store::{Store, Txn};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    let user = m.get_one::<String>("user").unwrap();
    let rows = store.with_txn(|txn| collect_rows(txn, user))?;

    match m.get_one::<String>("out") {
        Some(path) => {
            let mut wtr = csv::Writer::from_path(path)?;
            write_rows(&mut wtr, &rows)?;
            wtr.flush()?;
            println!("Exported {} expense(s) to {}", rows.len(), path);
        }
        None => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            write_rows(&mut wtr, &rows)?;
            wtr.flush()?;
        }
    }
    Ok(())
}

type Row = [String; 6];

fn collect_rows(txn: &Txn, user: &str) -> crate::error::Result<Vec<Row>> {
    let account = accounts::for_owner(txn, user)?;
    let mut titles: HashMap<String, String> = HashMap::new();
    for period_id in &account.periods {
        let tracker = periods::get(txn, period_id, user)?;
        titles.insert(tracker.id.clone(), tracker.title());
    }

    let mut expenses: Vec<Expense> = txn.find("owner", user)?;
    expenses.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(expenses
        .into_iter()
        .map(|e| {
            [
                e.date.to_string(),
                titles.get(&e.month_tracker).cloned().unwrap_or_default(),
                e.name,
                e.category.to_string(),
                e.amount.to_string(),
                if e.recurring { "true".into() } else { "false".into() },
            ]
        })
        .collect())
}

fn write_rows<W: std::io::Write>(wtr: &mut csv::Writer<W>, rows: &[Row]) -> Result<()> {
    wtr.write_record(["date", "period", "name", "category", "amount", "recurring"])?;
    for row in rows {
        wtr.write_record(row)?;
    }
    Ok(())
}
