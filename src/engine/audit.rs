// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Aggregate-drift detection. Recomputes every derived field from the raw
//! expense sets and reports any stored value that disagrees. Drift is a
//! bug somewhere, never an expected state.

use rust_decimal::Decimal;

use crate::engine::accounts;
use crate::error::Result;
use crate::models::{Account, Category, Expense, MonthTracker};
use crate::store::Txn;

#[derive(Debug)]
pub struct Drift {
    /// Which record drifted, e.g. "account" or a period title.
    pub scope: String,
    pub field: &'static str,
    pub expected: Decimal,
    pub actual: Decimal,
}

fn check(
    findings: &mut Vec<Drift>,
    scope: &str,
    field: &'static str,
    expected: Decimal,
    actual: Decimal,
) {
    if expected != actual {
        findings.push(Drift {
            scope: scope.to_string(),
            field,
            expected,
            actual,
        });
    }
}

/// Audit one account and all of its periods.
///
/// After a clamp-to-zero event the stored balances legitimately disagree
/// with the raw sums; the clamp warning in the log is the explanation.
pub fn audit(txn: &Txn, owner: &str) -> Result<Vec<Drift>> {
    let account = accounts::for_owner(txn, owner)?;
    let mut findings = Vec::new();

    let mut sum_savings = Decimal::ZERO;
    let mut sum_loan_payments = Decimal::ZERO;
    let mut sum_cashflow = Decimal::ZERO;

    for period_id in &account.periods {
        let tracker: MonthTracker = txn.get(period_id)?;
        let expenses: Vec<Expense> = txn.find("month_tracker", period_id)?;
        let scope = tracker.title();

        let mut savings = Decimal::ZERO;
        let mut loan_payments = Decimal::ZERO;
        let mut income = Decimal::ZERO;
        let mut total = Decimal::ZERO;
        for e in &expenses {
            match e.category {
                Category::Savings => {
                    savings += e.amount;
                    total += e.amount;
                }
                Category::Loans => {
                    loan_payments += e.amount;
                    total += e.amount;
                }
                Category::Income => income += e.amount,
                _ => total += e.amount,
            }
        }

        let take_home = tracker.annual_take_home / Decimal::from(12) + income;
        check(&mut findings, &scope, "monthly_savings", savings, tracker.monthly_savings);
        check(
            &mut findings,
            &scope,
            "monthly_loan_payments",
            loan_payments,
            tracker.monthly_loan_payments,
        );
        check(&mut findings, &scope, "total_expenses", total, tracker.total_expenses);
        check(&mut findings, &scope, "monthly_take_home", take_home, tracker.monthly_take_home);
        check(
            &mut findings,
            &scope,
            "monthly_cashflow",
            tracker.monthly_take_home - tracker.total_expenses,
            tracker.monthly_cashflow,
        );
        check(
            &mut findings,
            &scope,
            "expense_refs",
            Decimal::from(expenses.len() as i64),
            Decimal::from(tracker.expenses.len() as i64),
        );

        sum_savings += tracker.monthly_savings;
        sum_loan_payments += tracker.monthly_loan_payments;
        sum_cashflow += tracker.monthly_cashflow;
    }

    check(
        &mut findings,
        "account",
        "savings",
        account.opening_savings + sum_savings,
        account.savings,
    );
    let expected_loans = account.opening_loans - sum_loan_payments;
    check(
        &mut findings,
        "account",
        "loans",
        if expected_loans < Decimal::ZERO {
            Decimal::ZERO
        } else {
            expected_loans
        },
        account.loans,
    );
    check(&mut findings, "account", "cashflow", sum_cashflow, account.cashflow);

    Ok(findings)
}
