// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monthbook::engine::{accounts, expenses, periods};
use monthbook::models::{Category, Month};
use monthbook::store::Store;
use monthbook::{cli, commands};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn export_writes_dated_csv_rows() {
    let mut store = Store::in_memory().unwrap();
    store
        .with_txn(|txn| accounts::create(txn, "u1", dec("1200"), Decimal::ZERO, Decimal::ZERO))
        .unwrap();
    let tracker = store
        .with_txn(|txn| {
            periods::create(
                txn,
                periods::CreatePeriod {
                    owner: "u1".into(),
                    month: Month::January,
                    year: 2025,
                    budget: Decimal::ZERO,
                },
            )
        })
        .unwrap();
    for (name, category, amount, day) in [
        ("Rent", Category::Housing, "800", 3),
        ("Movie", Category::Entertainment, "12", 1),
    ] {
        store
            .with_txn(|txn| {
                expenses::create(
                    txn,
                    expenses::CreateExpense {
                        period_id: tracker.id.clone(),
                        owner: "u1".into(),
                        name: name.into(),
                        category,
                        amount: dec(amount),
                        date: chrono::NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
                        recurring: false,
                    },
                )
            })
            .unwrap();
    }

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("expenses.csv");
    let out_str = out.to_str().unwrap().to_string();

    let matches = cli::build_cli().get_matches_from([
        "monthbook", "export", "--user", "u1", "--out", &out_str,
    ]);
    if let Some(("export", sub)) = matches.subcommand() {
        commands::exporter::handle(&mut store, sub).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let content = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "date,period,name,category,amount,recurring");
    // Sorted by date: the movie precedes the rent.
    assert_eq!(lines[1], "2025-01-01,January 2025,Movie,Entertainment,12,false");
    assert_eq!(lines[2], "2025-01-03,January 2025,Rent,Housing,800,false");
    assert_eq!(lines.len(), 3);
}
