// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use regex::Regex;

use crate::engine::expenses::{self, CreateExpense, ExpensePatch};
use crate::store::Store;
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_category, parse_date, pretty_table,
};

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("edit", sub)) => edit(store, sub)?,
        Some(("rm", sub)) => rm(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let period = sub.get_one::<String>("period").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let category = parse_category(sub.get_one::<String>("category").unwrap())?;
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let recurring = sub.get_flag("recurring");

    let expense = store.with_txn(|txn| {
        expenses::create(
            txn,
            CreateExpense {
                period_id: period.clone(),
                owner: user.clone(),
                name: name.clone(),
                category,
                amount,
                date,
                recurring,
            },
        )
    })?;
    println!(
        "Recorded {} {} '{}' on {}{}",
        fmt_money(&expense.amount),
        expense.category,
        expense.name,
        expense.date,
        if expense.recurring { " (recurring)" } else { "" }
    );
    Ok(())
}

fn list(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let period = sub.get_one::<String>("period").unwrap();
    let category = match sub.get_one::<String>("category") {
        Some(s) => Some(parse_category(s)?),
        None => None,
    };

    let mut data = store.with_txn(|txn| expenses::list(txn, period, user, category))?;
    if let Some(pattern) = sub.get_one::<String>("match") {
        let re = Regex::new(pattern).with_context(|| format!("Invalid regex '{}'", pattern))?;
        data.retain(|e| re.is_match(&e.name));
    }

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.date.to_string(),
                e.name.clone(),
                e.category.to_string(),
                fmt_money(&e.amount),
                if e.recurring { "yes".into() } else { "".into() },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Name", "Category", "Amount", "Recurring"], rows)
    );
    Ok(())
}

fn edit(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let id = sub.get_one::<String>("id").unwrap();
    let patch = ExpensePatch {
        name: sub.get_one::<String>("name").cloned(),
        category: match sub.get_one::<String>("category") {
            Some(s) => Some(parse_category(s)?),
            None => None,
        },
        amount: match sub.get_one::<String>("amount") {
            Some(s) => Some(parse_amount(s)?),
            None => None,
        },
        date: match sub.get_one::<String>("date") {
            Some(s) => Some(parse_date(s)?),
            None => None,
        },
        recurring: sub.get_one::<bool>("recurring").copied(),
    };

    let expense = store.with_txn(|txn| expenses::update(txn, id, user, patch))?;
    println!(
        "Updated '{}': {} {}",
        expense.name,
        fmt_money(&expense.amount),
        expense.category
    );
    Ok(())
}

fn rm(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let id = sub.get_one::<String>("id").unwrap();
    store.with_txn(|txn| expenses::delete(txn, id, user))?;
    println!("Deleted expense {}", id);
    Ok(())
}
