// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Period (month tracker) commands.

use log::warn;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::engine::accounts::{self, check_amount};
use crate::engine::recurrence;
use crate::engine::transitions::floor_zero;
use crate::error::{Error, Result};
use crate::models::{Category, Expense, Month, MonthTracker};
use crate::store::Txn;

pub struct CreatePeriod {
    pub owner: String,
    pub month: Month,
    pub year: i32,
    pub budget: Decimal,
}

#[derive(Default)]
pub struct PeriodPatch {
    pub annual_take_home: Option<Decimal>,
    pub budget: Option<Decimal>,
}

fn owned(txn: &Txn, period_id: &str, owner: &str) -> Result<MonthTracker> {
    let tracker: MonthTracker = txn.get(period_id)?;
    if tracker.owner != owner {
        return Err(Error::forbidden(period_id));
    }
    Ok(tracker)
}

/// Create a period, snapshotting the account income as its take-home and
/// seeding it from the account's recurring templates.
pub fn create(txn: &Txn, cmd: CreatePeriod) -> Result<MonthTracker> {
    check_amount(cmd.budget)?;
    let mut account = accounts::for_owner(txn, &cmd.owner)?;

    // (owner, month, year) uniqueness is not enforced; flag it and proceed.
    for period_id in &account.periods {
        let existing: MonthTracker = txn.get(period_id)?;
        if existing.month == cmd.month && existing.year == cmd.year {
            warn!("duplicate period {} {} for user {}", cmd.month, cmd.year, cmd.owner);
        }
    }

    let monthly_take_home = account.income / Decimal::from(12);
    let mut tracker = MonthTracker {
        id: Uuid::new_v4().to_string(),
        owner: cmd.owner,
        month: cmd.month,
        year: cmd.year,
        annual_take_home: account.income,
        monthly_take_home,
        budget: cmd.budget,
        monthly_savings: Decimal::ZERO,
        monthly_loan_payments: Decimal::ZERO,
        total_expenses: Decimal::ZERO,
        monthly_cashflow: monthly_take_home,
        expenses: Vec::new(),
    };
    account.periods.push(tracker.id.clone());

    txn.put(&tracker)?;
    recurrence::seed_period(txn, &mut account, &mut tracker)?;
    txn.put(&tracker)?;
    accounts::recompute_cashflow(txn, &mut account)?;
    txn.put(&account)?;
    Ok(tracker)
}

/// Update the take-home snapshot and/or budget. The monthly take-home is
/// re-derived from the new annual figure plus the period's Income expenses.
pub fn update(txn: &Txn, period_id: &str, owner: &str, patch: PeriodPatch) -> Result<MonthTracker> {
    let mut tracker = owned(txn, period_id, owner)?;
    let mut account = accounts::for_owner(txn, owner)?;

    if let Some(budget) = patch.budget {
        tracker.budget = check_amount(budget)?;
    }
    if let Some(annual) = patch.annual_take_home {
        check_amount(annual)?;
        let expenses: Vec<Expense> = txn.find("month_tracker", period_id)?;
        let income_extra: Decimal = expenses
            .iter()
            .filter(|e| e.category == Category::Income)
            .map(|e| e.amount)
            .sum();
        tracker.annual_take_home = annual;
        tracker.monthly_take_home = annual / Decimal::from(12) + income_extra;
        tracker.monthly_cashflow = tracker.monthly_take_home - tracker.total_expenses;
    }

    txn.put(&tracker)?;
    accounts::recompute_cashflow(txn, &mut account)?;
    txn.put(&account)?;
    Ok(tracker)
}

/// Delete a period: reverse its contribution to the account balances,
/// cascade-delete its expenses, then drop it from the period set.
/// Standing recurring templates outlive the periods they were seeded into.
pub fn delete(txn: &Txn, period_id: &str, owner: &str) -> Result<()> {
    let tracker = owned(txn, period_id, owner)?;
    let mut account = accounts::for_owner(txn, owner)?;

    account.savings = floor_zero("savings", account.savings - tracker.monthly_savings);
    account.loans += tracker.monthly_loan_payments;

    for expense_id in &tracker.expenses {
        txn.delete::<Expense>(expense_id)?;
    }
    account.periods.retain(|id| id != period_id);
    txn.delete::<MonthTracker>(period_id)?;

    accounts::recompute_cashflow(txn, &mut account)?;
    txn.put(&account)
}

pub fn get(txn: &Txn, period_id: &str, owner: &str) -> Result<MonthTracker> {
    owned(txn, period_id, owner)
}

/// All periods of one user, most recent month first.
pub fn list(txn: &Txn, owner: &str) -> Result<Vec<MonthTracker>> {
    let mut trackers: Vec<MonthTracker> = txn.find("owner", owner)?;
    trackers.sort_by_key(|t| std::cmp::Reverse((t.year, t.month.number())));
    Ok(trackers)
}
