// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::engine::accounts;
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table};

pub fn signup(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    let user = m.get_one::<String>("user").unwrap();
    let income = parse_amount(m.get_one::<String>("income").unwrap())?;
    let opening_savings = match m.get_one::<String>("savings") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };
    let opening_loans = match m.get_one::<String>("loans") {
        Some(s) => parse_amount(s)?,
        None => Decimal::ZERO,
    };

    let account = store.with_txn(|txn| {
        accounts::create(txn, user, income, opening_savings, opening_loans)
    })?;
    println!(
        "Created account for '{}' (income {}, savings {}, loans {})",
        user,
        fmt_money(&account.income),
        fmt_money(&account.savings),
        fmt_money(&account.loans)
    );
    Ok(())
}

pub fn handle(store: &mut Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(store, sub)?,
        Some(("set-income", sub)) => set_income(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let account = store.with_txn(|txn| accounts::for_owner(txn, user))?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &account)? {
        return Ok(());
    }
    let rows = vec![vec![
        account.owner.clone(),
        fmt_money(&account.income),
        fmt_money(&account.savings),
        fmt_money(&account.loans),
        fmt_money(&account.cashflow),
        account.recurrences.len().to_string(),
        account.periods.len().to_string(),
    ]];
    println!(
        "{}",
        pretty_table(
            &["User", "Income", "Savings", "Loans", "Cashflow", "Recurring", "Periods"],
            rows,
        )
    );
    Ok(())
}

fn set_income(store: &mut Store, sub: &clap::ArgMatches) -> Result<()> {
    let user = sub.get_one::<String>("user").unwrap();
    let income = parse_amount(sub.get_one::<String>("income").unwrap())?;
    let account = store.with_txn(|txn| accounts::set_income(txn, user, income))?;
    println!("Income for '{}' set to {}", user, fmt_money(&account.income));
    Ok(())
}
