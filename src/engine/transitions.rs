// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category transition rules: every expense create, recategorization,
//! amount edit, or delete maps to exactly one arm below, which moves the
//! affected amounts between the period aggregates and the account balances.

use log::warn;
use rust_decimal::Decimal;

use crate::models::{Account, Category, MonthTracker};

/// Aggregation bucket of a category. Savings, Loans and Income each have
/// their own rules; every remaining category behaves identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Savings,
    Loans,
    Income,
    Other,
}

impl From<Category> for Bucket {
    fn from(c: Category) -> Bucket {
        match c {
            Category::Savings => Bucket::Savings,
            Category::Loans => Bucket::Loans,
            Category::Income => Bucket::Income,
            _ => Bucket::Other,
        }
    }
}

/// One classified expense mutation.
#[derive(Debug, Clone, Copy)]
pub enum Transition {
    Create { to: Bucket },
    Recategorize { from: Bucket, to: Bucket },
    Delete { from: Bucket },
}

/// Clamp a balance that the domain does not allow below zero, warning
/// instead of failing the command.
pub(crate) fn floor_zero(label: &str, v: Decimal) -> Decimal {
    if v < Decimal::ZERO {
        warn!("{} would go negative ({}); clamping to zero", label, v);
        Decimal::ZERO
    } else {
        v
    }
}

/// Apply one transition to the owning period and account.
///
/// `old_amt` is the expense amount before the mutation, `new_amt` after
/// (equal unless the amount itself changed; for creates only `new_amt`
/// matters, for deletes only `old_amt`). Recategorizations uniformly
/// remove the old contribution and add the new one, so an amount-only
/// edit is the `from == to` arm. `total_expenses` tracks every arm so it
/// stays equal to the sum of non-Income amounts.
///
/// Ends by re-deriving `monthly_cashflow`; the caller persists the
/// documents and runs the account-level cashflow recompute.
pub fn apply(
    tracker: &mut MonthTracker,
    account: &mut Account,
    transition: Transition,
    old_amt: Decimal,
    new_amt: Decimal,
) {
    use Bucket::*;
    use Transition::*;

    match transition {
        Create { to: Savings } => {
            tracker.monthly_savings += new_amt;
            tracker.total_expenses += new_amt;
            account.savings += new_amt;
        }
        Create { to: Loans } => {
            tracker.monthly_loan_payments += new_amt;
            tracker.total_expenses += new_amt;
            account.loans -= new_amt;
        }
        Create { to: Income } => {
            tracker.monthly_take_home += new_amt;
        }
        Create { to: Other } => {
            tracker.total_expenses += new_amt;
        }

        Recategorize { from: Savings, to: Savings } => {
            tracker.monthly_savings += new_amt - old_amt;
            tracker.total_expenses += new_amt - old_amt;
            account.savings += new_amt - old_amt;
        }
        Recategorize { from: Savings, to: Loans } => {
            tracker.monthly_savings -= old_amt;
            tracker.monthly_loan_payments += new_amt;
            tracker.total_expenses += new_amt - old_amt;
            account.savings -= old_amt;
            account.loans -= new_amt;
        }
        Recategorize { from: Savings, to: Income } => {
            tracker.monthly_savings -= old_amt;
            tracker.total_expenses -= old_amt;
            tracker.monthly_take_home += new_amt;
            account.savings -= old_amt;
        }
        Recategorize { from: Savings, to: Other } => {
            tracker.monthly_savings -= old_amt;
            tracker.total_expenses += new_amt - old_amt;
            account.savings -= old_amt;
        }

        Recategorize { from: Loans, to: Savings } => {
            tracker.monthly_loan_payments -= old_amt;
            tracker.monthly_savings += new_amt;
            tracker.total_expenses += new_amt - old_amt;
            account.loans += old_amt;
            account.savings += new_amt;
        }
        Recategorize { from: Loans, to: Loans } => {
            tracker.monthly_loan_payments += new_amt - old_amt;
            tracker.total_expenses += new_amt - old_amt;
            account.loans -= new_amt - old_amt;
        }
        Recategorize { from: Loans, to: Income } => {
            tracker.monthly_loan_payments -= old_amt;
            tracker.total_expenses -= old_amt;
            tracker.monthly_take_home += new_amt;
            account.loans += old_amt;
        }
        Recategorize { from: Loans, to: Other } => {
            tracker.monthly_loan_payments -= old_amt;
            tracker.total_expenses += new_amt - old_amt;
            account.loans += old_amt;
        }

        Recategorize { from: Income, to: Savings } => {
            tracker.monthly_take_home -= old_amt;
            tracker.monthly_savings += new_amt;
            tracker.total_expenses += new_amt;
            account.savings += new_amt;
        }
        Recategorize { from: Income, to: Loans } => {
            tracker.monthly_take_home -= old_amt;
            tracker.monthly_loan_payments += new_amt;
            tracker.total_expenses += new_amt;
            account.loans -= new_amt;
        }
        Recategorize { from: Income, to: Income } => {
            tracker.monthly_take_home += new_amt - old_amt;
        }
        Recategorize { from: Income, to: Other } => {
            tracker.monthly_take_home -= old_amt;
            tracker.total_expenses += new_amt;
        }

        Recategorize { from: Other, to: Savings } => {
            tracker.monthly_savings += new_amt;
            tracker.total_expenses += new_amt - old_amt;
            account.savings += new_amt;
        }
        Recategorize { from: Other, to: Loans } => {
            tracker.monthly_loan_payments += new_amt;
            tracker.total_expenses += new_amt - old_amt;
            account.loans -= new_amt;
        }
        Recategorize { from: Other, to: Income } => {
            tracker.total_expenses -= old_amt;
            tracker.monthly_take_home += new_amt;
        }
        Recategorize { from: Other, to: Other } => {
            tracker.total_expenses += new_amt - old_amt;
        }

        Delete { from: Savings } => {
            tracker.monthly_savings -= old_amt;
            tracker.total_expenses -= old_amt;
            account.savings -= old_amt;
        }
        Delete { from: Loans } => {
            tracker.monthly_loan_payments -= old_amt;
            tracker.total_expenses -= old_amt;
            account.loans += old_amt;
        }
        Delete { from: Income } => {
            tracker.monthly_take_home -= old_amt;
        }
        Delete { from: Other } => {
            tracker.total_expenses -= old_amt;
        }
    }

    tracker.monthly_savings = floor_zero("monthly_savings", tracker.monthly_savings);
    tracker.monthly_loan_payments =
        floor_zero("monthly_loan_payments", tracker.monthly_loan_payments);
    tracker.total_expenses = floor_zero("total_expenses", tracker.total_expenses);
    account.savings = floor_zero("savings", account.savings);
    account.loans = floor_zero("loans", account.loans);

    tracker.monthly_cashflow = tracker.monthly_take_home - tracker.total_expenses;
}
