// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::advisor::{self, AdvisorInputs, Recommendation};
use crate::categories::{self, UNNECESSARY};
use crate::error::StoreError;
use crate::models::{Balances, SavingEntry, SavingsGoal, Transaction, TransactionKind};
use crate::store::{KeyValueStore, Storage};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub const WEEK_DAYS: i64 = 7;

pub fn week_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(WEEK_DAYS)
}

fn weekly_expense_iter(
    txs: &[Transaction],
    now: DateTime<Utc>,
) -> impl Iterator<Item = &Transaction> {
    let cutoff = week_start(now);
    txs.iter()
        .filter(move |t| t.kind == TransactionKind::Expense && t.date >= cutoff)
}

/// Sum that pins at `Decimal::MAX`/`MIN` instead of overflowing.
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a))
}

/// Expenses dated within the last seven days, boundary included.
pub fn weekly_expenses(txs: &[Transaction], now: DateTime<Utc>) -> Decimal {
    saturating_sum(weekly_expense_iter(txs, now).map(|t| t.amount))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub tag: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub amount: Decimal,
    pub share_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub total: Decimal,
    pub categories: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    pub fn get(&self, tag: &str) -> Decimal {
        self.categories
            .iter()
            .find(|c| c.tag == tag)
            .map(|c| c.amount)
            .unwrap_or(Decimal::ZERO)
    }
}

/// Weekly spend per known expense category. Tags outside the category table
/// are not reported, though they still count toward `weekly_expenses`.
pub fn weekly_expenses_by_category(txs: &[Transaction], now: DateTime<Utc>) -> CategoryBreakdown {
    let weekly: Vec<&Transaction> = weekly_expense_iter(txs, now).collect();
    let total = saturating_sum(weekly.iter().map(|t| t.amount));
    let categories = categories::expense_categories()
        .map(|c| {
            let amount = saturating_sum(
                weekly
                    .iter()
                    .filter(|t| t.category == c.tag)
                    .map(|t| t.amount),
            );
            let share_percent = amount
                .checked_div(total)
                .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO);
            CategoryTotal {
                tag: c.tag,
                label: c.label,
                icon: c.icon,
                amount,
                share_percent,
            }
        })
        .collect();
    CategoryBreakdown { total, categories }
}

pub fn total_savings(savings: &[SavingEntry]) -> Decimal {
    saturating_sum(savings.iter().map(|s| s.amount))
}

/// Percent of the goal reached, capped at 100. `None` without a goal.
pub fn goal_progress_percent(goal: Option<&SavingsGoal>, saved: Decimal) -> Option<Decimal> {
    let goal = goal?;
    if goal.amount <= Decimal::ZERO {
        return Some(Decimal::ONE_HUNDRED);
    }
    // overflow only happens far past 100%
    let percent = saved
        .checked_div(goal.amount)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED);
    Some(percent.min(Decimal::ONE_HUNDRED))
}

/// Newest first, optionally restricted to one category tag.
pub fn history(txs: &[Transaction], category: Option<&str>, limit: Option<usize>) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = txs
        .iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    if let Some(n) = limit {
        out.truncate(n);
    }
    out
}

pub fn savings_history(savings: &[SavingEntry]) -> Vec<SavingEntry> {
    let mut out = savings.to_vec();
    out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    out
}

/// Store-backed views. Every call re-reads the store.
pub struct Aggregator<'a, S> {
    storage: &'a Storage<S>,
}

impl<'a, S: KeyValueStore> Aggregator<'a, S> {
    pub fn new(storage: &'a Storage<S>) -> Self {
        Self { storage }
    }

    pub fn weekly_expenses(&self, now: DateTime<Utc>) -> Result<Decimal, StoreError> {
        Ok(weekly_expenses(&self.storage.transactions()?, now))
    }

    pub fn weekly_expenses_by_category(
        &self,
        now: DateTime<Utc>,
    ) -> Result<CategoryBreakdown, StoreError> {
        Ok(weekly_expenses_by_category(&self.storage.transactions()?, now))
    }

    pub fn total_savings(&self) -> Result<Decimal, StoreError> {
        Ok(total_savings(&self.storage.savings()?))
    }

    pub fn goal_progress_percent(&self) -> Result<Option<Decimal>, StoreError> {
        let goal = self.storage.savings_goal()?;
        Ok(goal_progress_percent(goal.as_ref(), self.total_savings()?))
    }

    pub fn recommendations(&self, now: DateTime<Utc>) -> Result<Vec<Recommendation>, StoreError> {
        Ok(self.dashboard(now)?.recommendations)
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> Result<Dashboard, StoreError> {
        let txs = self.storage.transactions()?;
        let savings = self.storage.savings()?;
        let goal = self.storage.savings_goal()?;
        let balances = Balances {
            cash_balance: self.storage.cash_balance()?,
            total_balance: self.storage.total_balance()?,
        };

        let breakdown = weekly_expenses_by_category(&txs, now);
        let weekly = weekly_expenses(&txs, now);
        let saved = total_savings(&savings);
        let progress = goal_progress_percent(goal.as_ref(), saved);

        let recommendations = advisor::evaluate(&AdvisorInputs {
            weekly_expenses: weekly,
            weekly_unnecessary: breakdown.get(UNNECESSARY),
            cash_balance: balances.cash_balance,
            total_balance: balances.total_balance,
            total_savings: saved,
            goal: goal.as_ref(),
        });

        Ok(Dashboard {
            as_of: now,
            balances,
            weekly_expenses: weekly,
            breakdown,
            total_savings: saved,
            goal,
            goal_progress_percent: progress,
            recommendations,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub as_of: DateTime<Utc>,
    pub balances: Balances,
    pub weekly_expenses: Decimal,
    pub breakdown: CategoryBreakdown,
    pub total_savings: Decimal,
    pub goal: Option<SavingsGoal>,
    pub goal_progress_percent: Option<Decimal>,
    pub recommendations: Vec<Recommendation>,
}
