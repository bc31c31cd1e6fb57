// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::engine::periods::{self, CreatePeriod, PeriodPatch};
use crate::models::MonthTracker;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, parse_month, pretty_table};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let month = parse_month(sub.get_one::<String>("month").unwrap())?;
    let year = *sub.get_one::<i32>("year").unwrap();
    let budget = match sub.get_one::<String>("budget") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };

    let tracker = store.with_txn(|txn| {
        periods::create(
            txn,
            CreatePeriod {
                owner: user.clone(),
                month,
                year,
                budget,
            },
        )
    })?;
    println!(
        "Created {} (id {}) with {} expense(s), take-home {}/month",
        tracker.title(),
        tracker.id,
        tracker.expenses.len(),
        fmt_money(&tracker.monthly_take_home)
    );
    Ok(())
}

fn tracker_row(t: &MonthTracker) -> Vec<String> {
    vec![
        t.id.clone(),
        t.title(),
        fmt_money(&t.monthly_take_home),
        fmt_money(&t.budget),
        fmt_money(&t.total_expenses),
        fmt_money(&t.monthly_savings),
        fmt_money(&t.monthly_loan_payments),
        fmt_money(&t.monthly_cashflow),
    ]
}

const TRACKER_HEADERS: [&str; 8] = [
    "Id",
    "Period",
    "Take-home",
    "Budget",
    "Expenses",
    "Savings",
    "Loan pmts",
    "Cashflow",
];

fn list(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let trackers = store.with_txn(|txn| periods::list(txn, user))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &trackers)? {
        return Ok(());
    }
    let rows = trackers.iter().map(tracker_row).collect();
    println!("{}", pretty_table(&TRACKER_HEADERS, rows));
    Ok(())
}

fn show(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let id = sub.get_one::<String>("id").unwrap();
    let tracker = store.with_txn(|txn| periods::get(txn, id, user))?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &tracker)? {
        return Ok(());
    }
    println!("{}", pretty_table(&TRACKER_HEADERS, vec![tracker_row(&tracker)]));
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let id = sub.get_one::<String>("id").unwrap();
    let patch = PeriodPatch {
        annual_take_home: match sub.get_one::<String>("take-home") {
            Some(s) => Some(parse_amount(s)?),
            None => None,
        },
        budget: match sub.get_one::<String>("budget") {
            Some(s) => Some(parse_amount(s)?),
            None => None,
        },
    };
    let tracker = store.with_txn(|txn| periods::update(txn, id, user, patch))?;
    println!("Updated {} ({})", tracker.title(), tracker.id);
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let id = sub.get_one::<String>("id").unwrap();
    store.with_txn(|txn| periods::delete(txn, id, user))?;
    println!("Deleted period {} and its expenses", id);
    Ok(())
}
