// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use monthbook::engine::{accounts, audit, expenses, periods};
use monthbook::error::Error;
use monthbook::models::{Category, Expense, Month, MonthTracker};
use monthbook::store::Store;
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Account with income 1200 (take-home 100/month), 500 outstanding loans,
/// and one January 2025 period.
fn setup() -> (Store, MonthTracker) {
    let mut store = Store::in_memory().unwrap();
    store
        .with_txn(|txn| accounts::create(txn, "u1", dec("1200"), Decimal::ZERO, dec("500")))
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
    (store, tracker)
}

fn add(store: &mut Store, period_id: &str, name: &str, category: Category, amount: &str) -> Expense {
    store
        .with_txn(|txn| {
            expenses::create(
                txn,
                expenses::CreateExpense {
                    period_id: period_id.into(),
                    owner: "u1".into(),
                    name: name.into(),
                    category,
                    amount: dec(amount),
                    date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                    recurring: false,
                },
            )
        })
        .unwrap()
}

fn reload(store: &mut Store, period_id: &str) -> (MonthTracker, monthbook::models::Account) {
    store
        .with_txn(|txn| {
            Ok((
                periods::get(txn, period_id, "u1")?,
                accounts::for_owner(txn, "u1")?,
            ))
        })
        .unwrap()
}

#[test]
fn loan_expense_moves_all_three_documents() {
    let (mut store, tracker) = setup();
    add(&mut store, &tracker.id, "Car payment", Category::Loans, "30");

    let (tracker, account) = reload(&mut store, &tracker.id);
    assert_eq!(tracker.monthly_loan_payments, dec("30"));
    assert_eq!(tracker.total_expenses, dec("30"));
    assert_eq!(tracker.monthly_cashflow, dec("70"));
    assert_eq!(account.loans, dec("470"));
    assert_eq!(account.cashflow, dec("70"));
}

#[test]
fn recategorize_loans_to_savings() {
    let (mut store, tracker) = setup();
    let expense = add(&mut store, &tracker.id, "Payment", Category::Loans, "30");

    store
        .with_txn(|txn| {
            expenses::update(
                txn,
                &expense.id,
                "u1",
                expenses::ExpensePatch {
                    category: Some(Category::Savings),
                    ..Default::default()
                },
            )
        })
        .unwrap();

    let (tracker, account) = reload(&mut store, &tracker.id);
    assert_eq!(tracker.monthly_loan_payments, Decimal::ZERO);
    assert_eq!(tracker.monthly_savings, dec("30"));
    assert_eq!(tracker.total_expenses, dec("30"));
    assert_eq!(account.loans, dec("500"), "loan delta reversed");
    assert_eq!(account.savings, dec("30"));
}

#[test]
fn savings_round_trip_restores_balances() {
    let (mut store, tracker) = setup();
    let before = reload(&mut store, &tracker.id);

    let expense = add(&mut store, &tracker.id, "Nest egg", Category::Savings, "100");
    store
        .with_txn(|txn| expenses::delete(txn, &expense.id, "u1"))
        .unwrap();

    let after = reload(&mut store, &tracker.id);
    assert_eq!(after.0.monthly_savings, before.0.monthly_savings);
    assert_eq!(after.0.total_expenses, before.0.total_expenses);
    assert_eq!(after.0.monthly_cashflow, before.0.monthly_cashflow);
    assert_eq!(after.1.savings, before.1.savings);
    assert_eq!(after.1.cashflow, before.1.cashflow);
    assert!(after.0.expenses.is_empty());
}

#[test]
fn identical_update_changes_nothing() {
    let (mut store, tracker) = setup();
    let expense = add(&mut store, &tracker.id, "Rent", Category::Housing, "80");
    let before = reload(&mut store, &tracker.id);

    store
        .with_txn(|txn| {
            expenses::update(
                txn,
                &expense.id,
                "u1",
                expenses::ExpensePatch {
                    name: Some("Rent".into()),
                    category: Some(Category::Housing),
                    amount: Some(dec("80")),
                    date: Some(expense.date),
                    recurring: Some(false),
                },
            )
        })
        .unwrap();

    let after = reload(&mut store, &tracker.id);
    assert_eq!(after.0.total_expenses, before.0.total_expenses);
    assert_eq!(after.0.monthly_cashflow, before.0.monthly_cashflow);
    assert_eq!(after.1.cashflow, before.1.cashflow);
    assert_eq!(after.1.savings, before.1.savings);
    assert_eq!(after.1.loans, before.1.loans);
}

#[test]
fn income_expense_raises_take_home() {
    let (mut store, tracker) = setup();
    add(&mut store, &tracker.id, "Side gig", Category::Income, "50");

    let (tracker, account) = reload(&mut store, &tracker.id);
    assert_eq!(tracker.monthly_take_home, dec("150"));
    assert_eq!(tracker.total_expenses, Decimal::ZERO, "income is not an expense");
    assert_eq!(tracker.monthly_cashflow, dec("150"));
    assert_eq!(account.cashflow, dec("150"));
}

#[test]
fn income_to_loans_adjusts_both_sides() {
    let (mut store, tracker) = setup();
    let expense = add(&mut store, &tracker.id, "Side gig", Category::Income, "50");

    store
        .with_txn(|txn| {
            expenses::update(
                txn,
                &expense.id,
                "u1",
                expenses::ExpensePatch {
                    category: Some(Category::Loans),
                    ..Default::default()
                },
            )
        })
        .unwrap();

    let (tracker, account) = reload(&mut store, &tracker.id);
    assert_eq!(tracker.monthly_take_home, dec("100"));
    assert_eq!(tracker.monthly_loan_payments, dec("50"));
    assert_eq!(tracker.total_expenses, dec("50"));
    assert_eq!(tracker.monthly_cashflow, dec("50"));
    assert_eq!(account.loans, dec("450"));
}

#[test]
fn amount_edit_within_category() {
    let (mut store, tracker) = setup();
    let expense = add(&mut store, &tracker.id, "Nest egg", Category::Savings, "40");

    store
        .with_txn(|txn| {
            expenses::update(
                txn,
                &expense.id,
                "u1",
                expenses::ExpensePatch {
                    amount: Some(dec("55")),
                    ..Default::default()
                },
            )
        })
        .unwrap();

    let (tracker, account) = reload(&mut store, &tracker.id);
    assert_eq!(tracker.monthly_savings, dec("55"));
    assert_eq!(tracker.total_expenses, dec("55"));
    assert_eq!(account.savings, dec("55"));
}

#[test]
fn negative_amount_is_rejected() {
    let (mut store, tracker) = setup();
    let err = store.with_txn(|txn| {
        expenses::create(
            txn,
            expenses::CreateExpense {
                period_id: tracker.id.clone(),
                owner: "u1".into(),
                name: "Bad".into(),
                category: Category::Other,
                amount: dec("-5"),
                date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                recurring: false,
            },
        )
    });
    assert!(matches!(err, Err(Error::InvalidAmount(_))));

    // The rejected command left nothing behind.
    let (tracker, _) = reload(&mut store, &tracker.id);
    assert!(tracker.expenses.is_empty());
    assert_eq!(tracker.total_expenses, Decimal::ZERO);
}

#[test]
fn oversized_loan_payment_clamps_to_zero() {
    let mut store = Store::in_memory().unwrap();
    store
        .with_txn(|txn| accounts::create(txn, "u1", dec("1200"), Decimal::ZERO, dec("20")))
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

    add(&mut store, &tracker.id, "Final payment", Category::Loans, "30");
    let (_, account) = reload(&mut store, &tracker.id);
    assert_eq!(account.loans, Decimal::ZERO);
}

#[test]
fn list_filters_by_category() {
    let (mut store, tracker) = setup();
    add(&mut store, &tracker.id, "Movie", Category::Entertainment, "12");
    add(&mut store, &tracker.id, "Rent", Category::Housing, "800");
    add(&mut store, &tracker.id, "Concert", Category::Entertainment, "45");

    let all = store
        .with_txn(|txn| expenses::list(txn, &tracker.id, "u1", None))
        .unwrap();
    assert_eq!(all.len(), 3);

    let fun = store
        .with_txn(|txn| expenses::list(txn, &tracker.id, "u1", Some(Category::Entertainment)))
        .unwrap();
    let names: Vec<&str> = fun.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Movie", "Concert"]);
}

#[test]
fn aggregates_stay_drift_free_across_a_command_mix() {
    let (mut store, tracker) = setup();
    let e1 = add(&mut store, &tracker.id, "Nest egg", Category::Savings, "100");
    let e2 = add(&mut store, &tracker.id, "Car", Category::Loans, "60");
    add(&mut store, &tracker.id, "Rent", Category::Housing, "300");
    add(&mut store, &tracker.id, "Bonus", Category::Income, "25");

    store
        .with_txn(|txn| {
            expenses::update(
                txn,
                &e1.id,
                "u1",
                expenses::ExpensePatch {
                    category: Some(Category::Loans),
                    amount: Some(dec("110")),
                    ..Default::default()
                },
            )
        })
        .unwrap();
    store
        .with_txn(|txn| expenses::delete(txn, &e2.id, "u1"))
        .unwrap();

    let findings = store.with_txn(|txn| audit::audit(txn, "u1")).unwrap();
    assert!(findings.is_empty(), "unexpected drift: {:?}", findings);
}
