// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense commands. Every mutation reads the expense, its period, and the
//! owning account, applies exactly one transition, then writes all three
//! back in order: expense, period, account (after the cashflow recompute).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::engine::accounts::{self, check_amount};
use crate::engine::recurrence;
use crate::engine::transitions::{self, Transition};
use crate::error::{Error, Result};
use crate::models::{Account, Category, Expense, MonthTracker};
use crate::store::Txn;

pub struct CreateExpense {
    pub period_id: String,
    pub owner: String,
    pub name: String,
    pub category: Category,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub recurring: bool,
}

/// Field-wise patch; `None` leaves the field untouched.
#[derive(Default)]
pub struct ExpensePatch {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDate>,
    pub recurring: Option<bool>,
}

fn owned_tracker(txn: &Txn, period_id: &str, owner: &str) -> Result<MonthTracker> {
    let tracker: MonthTracker = txn.get(period_id)?;
    if tracker.owner != owner {
        return Err(Error::forbidden(period_id));
    }
    Ok(tracker)
}

fn owned_expense(txn: &Txn, expense_id: &str, owner: &str) -> Result<Expense> {
    let expense: Expense = txn.get(expense_id)?;
    if expense.owner != owner {
        return Err(Error::forbidden(expense_id));
    }
    Ok(expense)
}

fn persist(
    txn: &Txn,
    tracker: &MonthTracker,
    account: &mut Account,
) -> Result<()> {
    txn.put(tracker)?;
    accounts::recompute_cashflow(txn, account)?;
    txn.put(account)
}

pub fn create(txn: &Txn, cmd: CreateExpense) -> Result<Expense> {
    check_amount(cmd.amount)?;
    let mut tracker = owned_tracker(txn, &cmd.period_id, &cmd.owner)?;
    let mut account = accounts::for_owner(txn, &cmd.owner)?;

    let mut expense = Expense {
        id: Uuid::new_v4().to_string(),
        owner: cmd.owner,
        month_tracker: tracker.id.clone(),
        name: cmd.name,
        category: cmd.category,
        amount: cmd.amount,
        date: cmd.date,
        recurring: cmd.recurring,
        recurring_id: None,
    };
    if expense.recurring {
        recurrence::register_template(&mut account, &mut expense);
    }
    tracker.expenses.push(expense.id.clone());
    transitions::apply(
        &mut tracker,
        &mut account,
        Transition::Create {
            to: expense.category.into(),
        },
        expense.amount,
        expense.amount,
    );

    txn.put(&expense)?;
    persist(txn, &tracker, &mut account)?;
    Ok(expense)
}

pub fn update(txn: &Txn, expense_id: &str, owner: &str, patch: ExpensePatch) -> Result<Expense> {
    let mut expense = owned_expense(txn, expense_id, owner)?;
    let mut tracker = owned_tracker(txn, &expense.month_tracker.clone(), owner)?;
    let mut account = accounts::for_owner(txn, owner)?;

    let old_amt = expense.amount;
    let old_category = expense.category;
    let was_recurring = expense.recurring;

    if let Some(name) = patch.name {
        expense.name = name;
    }
    if let Some(category) = patch.category {
        expense.category = category;
    }
    if let Some(amount) = patch.amount {
        expense.amount = check_amount(amount)?;
    }
    if let Some(date) = patch.date {
        expense.date = date;
    }
    if let Some(recurring) = patch.recurring {
        expense.recurring = recurring;
    }

    transitions::apply(
        &mut tracker,
        &mut account,
        Transition::Recategorize {
            from: old_category.into(),
            to: expense.category.into(),
        },
        old_amt,
        expense.amount,
    );

    match (was_recurring, expense.recurring) {
        (false, true) => recurrence::register_template(&mut account, &mut expense),
        (true, false) => {
            recurrence::remove_template(&mut account, expense.recurring_id.take().as_deref());
        }
        (true, true) => recurrence::sync_template(&mut account, &expense),
        (false, false) => {}
    }

    txn.put(&expense)?;
    persist(txn, &tracker, &mut account)?;
    Ok(expense)
}

pub fn delete(txn: &Txn, expense_id: &str, owner: &str) -> Result<()> {
    let expense = owned_expense(txn, expense_id, owner)?;
    let mut tracker = owned_tracker(txn, &expense.month_tracker, owner)?;
    let mut account = accounts::for_owner(txn, owner)?;

    transitions::apply(
        &mut tracker,
        &mut account,
        Transition::Delete {
            from: expense.category.into(),
        },
        expense.amount,
        expense.amount,
    );
    tracker.expenses.retain(|id| id != expense_id);
    recurrence::remove_template(&mut account, expense.recurring_id.as_deref());

    txn.delete::<Expense>(expense_id)?;
    persist(txn, &tracker, &mut account)
}

pub fn get(txn: &Txn, expense_id: &str, owner: &str) -> Result<Expense> {
    owned_expense(txn, expense_id, owner)
}

/// Expenses of one period, optionally narrowed to a single category.
pub fn list(
    txn: &Txn,
    period_id: &str,
    owner: &str,
    category: Option<Category>,
) -> Result<Vec<Expense>> {
    owned_tracker(txn, period_id, owner)?;
    let mut expenses: Vec<Expense> = txn.find("month_tracker", period_id)?;
    if let Some(cat) = category {
        expenses.retain(|e| e.category == cat);
    }
    Ok(expenses)
}
