// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{Account, MonthTracker};
use crate::store::Txn;

pub(crate) fn check_amount(amount: Decimal) -> Result<Decimal> {
    if amount < Decimal::ZERO {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    Ok(amount)
}

/// Create the one account a user gets at signup.
pub fn create(
    txn: &Txn,
    owner: &str,
    income: Decimal,
    opening_savings: Decimal,
    opening_loans: Decimal,
) -> Result<Account> {
    check_amount(income)?;
    check_amount(opening_savings)?;
    check_amount(opening_loans)?;
    let existing: Vec<Account> = txn.find("owner", owner)?;
    if !existing.is_empty() {
        return Err(Error::InvariantViolation(format!(
            "user '{}' already has an account",
            owner
        )));
    }
    let account = Account {
        id: Uuid::new_v4().to_string(),
        owner: owner.to_string(),
        income,
        savings: opening_savings,
        loans: opening_loans,
        cashflow: Decimal::ZERO,
        opening_savings,
        opening_loans,
        recurrences: Vec::new(),
        periods: Vec::new(),
    };
    txn.put(&account)?;
    Ok(account)
}

pub fn for_owner(txn: &Txn, owner: &str) -> Result<Account> {
    let mut found: Vec<Account> = txn.find("owner", owner)?;
    found.pop().ok_or_else(|| Error::not_found("account", owner))
}

/// Update the annual income. Existing periods keep the snapshot they took
/// at creation.
pub fn set_income(txn: &Txn, owner: &str, income: Decimal) -> Result<Account> {
    check_amount(income)?;
    let mut account = for_owner(txn, owner)?;
    account.income = income;
    txn.put(&account)?;
    Ok(account)
}

/// Re-derive the account cashflow from the full period set. Always a whole
/// recompute, never an incremental delta; runs as the final step of every
/// mutating command, against the same transaction the mutation wrote to.
pub fn recompute_cashflow(txn: &Txn, account: &mut Account) -> Result<()> {
    let mut total = Decimal::ZERO;
    for period_id in &account.periods {
        let tracker: MonthTracker = txn.get(period_id)?;
        total += tracker.monthly_cashflow;
    }
    account.cashflow = total;
    Ok(())
}
