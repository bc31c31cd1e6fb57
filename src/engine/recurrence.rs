// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Recurring-expense propagation: account-level templates seed a concrete
//! expense into every newly created period.

use log::debug;
use uuid::Uuid;

use crate::engine::transitions::{self, Transition};
use crate::error::{Error, Result};
use crate::models::{Account, Expense, MonthTracker, RecurringTemplate};
use crate::store::Txn;

/// Materialize every template on `account` into `tracker`, folding each
/// copy through the create rules in template order. Each expense is
/// persisted before its fold so the period never lists an expense its
/// totals do not cover. The caller persists the tracker and runs the
/// account cashflow recompute once, after the whole batch.
pub fn seed_period(txn: &Txn, account: &mut Account, tracker: &mut MonthTracker) -> Result<()> {
    if account.recurrences.is_empty() {
        return Ok(());
    }
    let date = tracker.first_day().ok_or_else(|| {
        Error::InvariantViolation(format!("period {} has no valid calendar date", tracker.title()))
    })?;
    // Snapshot: folding borrows the account mutably.
    let templates: Vec<RecurringTemplate> = account.recurrences.clone();
    debug!(
        "seeding {} with {} recurring expense(s)",
        tracker.title(),
        templates.len()
    );
    for template in templates {
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            owner: account.owner.clone(),
            month_tracker: tracker.id.clone(),
            name: template.name.clone(),
            category: template.category,
            amount: template.amount,
            date,
            recurring: true,
            // The template keeps the correlation id; the per-period copy
            // does not carry it.
            recurring_id: None,
        };
        txn.put(&expense)?;
        tracker.expenses.push(expense.id.clone());
        transitions::apply(
            tracker,
            account,
            Transition::Create {
                to: template.category.into(),
            },
            template.amount,
            template.amount,
        );
    }
    Ok(())
}

/// Register a standing template for an expense newly marked recurring and
/// stamp the expense with the generated correlation id.
pub fn register_template(account: &mut Account, expense: &mut Expense) {
    let recurring_id = Uuid::new_v4().to_string();
    account.recurrences.push(RecurringTemplate {
        recurring_id: recurring_id.clone(),
        name: expense.name.clone(),
        category: expense.category,
        amount: expense.amount,
    });
    expense.recurring_id = Some(recurring_id);
}

/// Drop the template matching `recurring_id`, if any.
pub fn remove_template(account: &mut Account, recurring_id: Option<&str>) {
    if let Some(rid) = recurring_id {
        account.recurrences.retain(|t| t.recurring_id != rid);
    }
}

/// Keep a still-recurring expense's template in step with its fields.
pub fn sync_template(account: &mut Account, expense: &Expense) {
    if let Some(rid) = expense.recurring_id.clone() {
        if let Some(template) = account.template_mut(&rid) {
            template.name = expense.name.clone();
            template.category = expense.category;
            template.amount = expense.amount;
        }
    }
}
