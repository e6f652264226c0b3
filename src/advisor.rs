// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SavingsGoal;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    ReduceNonEssential,
    HighSpendRate,
    LowCash,
    SavingsReminder,
    OnTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub icon: &'static str,
    pub message: String,
}

pub struct AdvisorInputs<'a> {
    pub weekly_expenses: Decimal,
    pub weekly_unnecessary: Decimal,
    pub cash_balance: Decimal,
    pub total_balance: Decimal,
    pub total_savings: Decimal,
    pub goal: Option<&'a SavingsGoal>,
}

pub const NON_ESSENTIAL_LIMIT: Decimal = Decimal::from_parts(200, 0, 0, false, 0);
pub const LOW_CASH_LIMIT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);
// 0.2 and 0.7
const REDUCTION_SHARE: Decimal = Decimal::from_parts(2, 0, 0, false, 1);
const SPEND_RATE_LIMIT: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

type Rule = fn(&AdvisorInputs<'_>) -> Option<Recommendation>;

/// Evaluated in order; every rule that fires contributes.
const RULES: &[Rule] = &[
    reduce_non_essential,
    high_spend_rate,
    low_cash,
    savings_reminder,
];

fn reduce_non_essential(i: &AdvisorInputs<'_>) -> Option<Recommendation> {
    (i.weekly_unnecessary > NON_ESSENTIAL_LIMIT).then(|| Recommendation {
        kind: RecommendationKind::ReduceNonEssential,
        icon: "💡",
        message: format!(
            "Consider cutting non-essential spending by {:.2} this week",
            (i.weekly_unnecessary * REDUCTION_SHARE).round_dp(2)
        ),
    })
}

fn high_spend_rate(i: &AdvisorInputs<'_>) -> Option<Recommendation> {
    (i.weekly_expenses > i.total_balance * SPEND_RATE_LIMIT).then(|| Recommendation {
        kind: RecommendationKind::HighSpendRate,
        icon: "⚠️",
        message: "You are spending more than 70% of your balance this week. Consider adjusting your expenses."
            .to_string(),
    })
}

fn low_cash(i: &AdvisorInputs<'_>) -> Option<Recommendation> {
    (i.cash_balance < LOW_CASH_LIMIT).then(|| Recommendation {
        kind: RecommendationKind::LowCash,
        icon: "💰",
        message: "Your cash is running low. Consider adding money or cutting cash expenses."
            .to_string(),
    })
}

fn savings_reminder(i: &AdvisorInputs<'_>) -> Option<Recommendation> {
    let goal = i.goal?;
    (i.total_savings < goal.amount).then(|| Recommendation {
        kind: RecommendationKind::SavingsReminder,
        icon: "🎯",
        message: format!(
            "To reach your savings goal you need to save {:.2} per day",
            goal.daily_amount.round_dp(2)
        ),
    })
}

fn on_track() -> Recommendation {
    Recommendation {
        kind: RecommendationKind::OnTrack,
        icon: "✅",
        message: "Good job! Your finances look healthy this week.".to_string(),
    }
}

pub fn evaluate(inputs: &AdvisorInputs<'_>) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = RULES.iter().filter_map(|rule| rule(inputs)).collect();
    if out.is_empty() {
        out.push(on_track());
    }
    out
}
