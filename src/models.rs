// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::store::Document;

/// Expense category. Savings, Loans and Income drive the aggregate rules;
/// every other category is a plain expense and only matters for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Savings,
    Loans,
    Income,
    Entertainment,
    Housing,
    Food,
    Auto,
    Health,
    Shopping,
    Restaurant,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Savings,
        Category::Loans,
        Category::Income,
        Category::Entertainment,
        Category::Housing,
        Category::Food,
        Category::Auto,
        Category::Health,
        Category::Shopping,
        Category::Restaurant,
        Category::Other,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Savings => "Savings",
            Category::Loans => "Loans",
            Category::Income => "Income",
            Category::Entertainment => "Entertainment",
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Auto => "Auto",
            Category::Health => "Health",
            Category::Shopping => "Shopping",
            Category::Restaurant => "Restaurant",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// 1-based month number, as used in dates.
    pub fn number(&self) -> u32 {
        Month::ALL.iter().position(|m| m == self).unwrap_or(0) as u32 + 1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Month::ALL
                .get(n.wrapping_sub(1) as usize)
                .copied()
                .ok_or_else(|| format!("month number {} out of range", n));
        }
        Month::ALL
            .iter()
            .find(|m| {
                m.name().eq_ignore_ascii_case(s)
                    || (s.len() == 3 && m.name()[..3].eq_ignore_ascii_case(s))
            })
            .copied()
            .ok_or_else(|| format!("unknown month '{}'", s))
    }
}

/// A standing pattern on the account that seeds a concrete expense into
/// every newly created period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    pub recurring_id: String,
    pub name: String,
    pub category: Category,
    pub amount: Decimal,
}

/// One account per user, holding the account-wide balances and the list of
/// recurring templates. `savings`/`loans` move incrementally in lockstep
/// with the period aggregates; `cashflow` is always re-derived in full.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub owner: String,
    pub income: Decimal,
    pub savings: Decimal,
    pub loans: Decimal,
    pub cashflow: Decimal,
    /// Starting balances at signup. Immutable; the audit uses them to check
    /// the running balances against the raw expense sums.
    pub opening_savings: Decimal,
    pub opening_loans: Decimal,
    pub recurrences: Vec<RecurringTemplate>,
    /// Owned period ids, insertion-ordered, membership unique.
    pub periods: Vec<String>,
}

impl Account {
    pub fn template_mut(&mut self, recurring_id: &str) -> Option<&mut RecurringTemplate> {
        self.recurrences
            .iter_mut()
            .find(|t| t.recurring_id == recurring_id)
    }
}

impl Document for Account {
    const COLLECTION: &'static str = "accounts";

    fn id(&self) -> &str {
        &self.id
    }
}

/// One month's budget-tracking record. All monetary fields are derived from
/// the owned expense set plus the income snapshot taken at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthTracker {
    pub id: String,
    pub owner: String,
    pub month: Month,
    pub year: i32,
    /// Snapshot of Account.income when the period was created.
    pub annual_take_home: Decimal,
    pub monthly_take_home: Decimal,
    /// User-set ceiling, informational only.
    pub budget: Decimal,
    pub monthly_savings: Decimal,
    pub monthly_loan_payments: Decimal,
    pub total_expenses: Decimal,
    pub monthly_cashflow: Decimal,
    /// Owned expense ids.
    pub expenses: Vec<String>,
}

impl MonthTracker {
    pub fn title(&self) -> String {
        format!("{} {}", self.month, self.year)
    }

    /// First day of the tracked month.
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number(), 1)
    }
}

impl Document for MonthTracker {
    const COLLECTION: &'static str = "month_trackers";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub owner: String,
    pub month_tracker: String,
    pub name: String,
    pub category: Category,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub recurring: bool,
    /// Correlates the expense to an account recurring template. Absent on
    /// copies materialized into a new period.
    pub recurring_id: Option<String>,
}

impl Document for Expense {
    const COLLECTION: &'static str = "expenses";

    fn id(&self) -> &str {
        &self.id
    }
}
