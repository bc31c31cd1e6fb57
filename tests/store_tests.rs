// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use monthbook::error::Error;
use monthbook::models::{Account, RecurringTemplate};
use monthbook::store::{Document, Store};
use rust_decimal::Decimal;

fn account(id: &str, owner: &str) -> Account {
    Account {
        id: id.into(),
        owner: owner.into(),
        income: Decimal::from(1200),
        savings: Decimal::ZERO,
        loans: Decimal::ZERO,
        cashflow: Decimal::ZERO,
        opening_savings: Decimal::ZERO,
        opening_loans: Decimal::ZERO,
        recurrences: Vec::new(),
        periods: Vec::new(),
    }
}

#[test]
fn put_get_round_trips_documents() {
    let mut store = Store::in_memory().unwrap();
    let mut doc = account("a1", "u1");
    doc.recurrences.push(RecurringTemplate {
        recurring_id: "r1".into(),
        name: "Rent".into(),
        category: monthbook::models::Category::Housing,
        amount: Decimal::from(800),
    });

    store
        .with_txn(|txn| {
            txn.put(&doc)?;
            let loaded: Account = txn.get("a1")?;
            assert_eq!(loaded.owner, "u1");
            assert_eq!(loaded.recurrences.len(), 1);
            assert_eq!(loaded.recurrences[0].name, "Rent");
            Ok(())
        })
        .unwrap();
}

#[test]
fn put_replaces_by_id() {
    let mut store = Store::in_memory().unwrap();
    store
        .with_txn(|txn| {
            let mut doc = account("a1", "u1");
            txn.put(&doc)?;
            doc.income = Decimal::from(2400);
            txn.put(&doc)?;
            let loaded: Account = txn.get("a1")?;
            assert_eq!(loaded.income, Decimal::from(2400));
            Ok(())
        })
        .unwrap();
}

#[test]
fn find_filters_on_json_fields_in_insertion_order() {
    let mut store = Store::in_memory().unwrap();
    store
        .with_txn(|txn| {
            txn.put(&account("a1", "u1"))?;
            txn.put(&account("a2", "u2"))?;
            txn.put(&account("a3", "u1"))?;
            let mine: Vec<Account> = txn.find("owner", "u1")?;
            let ids: Vec<&str> = mine.iter().map(|a| a.id()).collect();
            assert_eq!(ids, ["a1", "a3"]);
            Ok(())
        })
        .unwrap();
}

#[test]
fn get_missing_is_not_found() {
    let mut store = Store::in_memory().unwrap();
    let err = store.with_txn(|txn| txn.get::<Account>("nope"));
    match err {
        Err(Error::NotFound { collection, id }) => {
            assert_eq!(collection, "accounts");
            assert_eq!(id, "nope");
        }
        other => panic!("expected NotFound, got {:?}", other.map(|a| a.id)),
    }
    let none = store.with_txn(|txn| txn.try_get::<Account>("nope")).unwrap();
    assert!(none.is_none());
}

#[test]
fn delete_removes_the_document() {
    let mut store = Store::in_memory().unwrap();
    store
        .with_txn(|txn| {
            txn.put(&account("a1", "u1"))?;
            txn.delete::<Account>("a1")
        })
        .unwrap();
    let none = store.with_txn(|txn| txn.try_get::<Account>("a1")).unwrap();
    assert!(none.is_none());
}

#[test]
fn failed_unit_of_work_rolls_back_every_write() {
    let mut store = Store::in_memory().unwrap();
    store.with_txn(|txn| txn.put(&account("a1", "u1"))).unwrap();

    let err: Result<(), _> = store.with_txn(|txn| {
        let mut doc: Account = txn.get("a1")?;
        doc.income = Decimal::from(9999);
        txn.put(&doc)?;
        txn.put(&account("a2", "u2"))?;
        Err(Error::InvalidAmount("boom".into()))
    });
    assert!(err.is_err());

    let unchanged = store
        .with_txn(|txn| txn.get::<Account>("a1"))
        .unwrap();
    assert_eq!(unchanged.income, Decimal::from(1200));
    let phantom = store.with_txn(|txn| txn.try_get::<Account>("a2")).unwrap();
    assert!(phantom.is_none());
}
