// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub tag: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub kind: TransactionKind,
    pub default_description: &'static str,
}

pub const UNNECESSARY: &str = "unnecessary";

/// Every known category tag. Expense categories come first, in dashboard order.
pub static CATEGORIES: &[CategoryInfo] = &[
    CategoryInfo {
        tag: "food",
        label: "Food",
        icon: "🍔",
        kind: TransactionKind::Expense,
        default_description: "Campus food",
    },
    CategoryInfo {
        tag: "university",
        label: "University",
        icon: "📚",
        kind: TransactionKind::Expense,
        default_description: "University supplies",
    },
    CategoryInfo {
        tag: "cleaning",
        label: "Cleaning",
        icon: "🧴",
        kind: TransactionKind::Expense,
        default_description: "Cleaning products",
    },
    CategoryInfo {
        tag: "transport",
        label: "Transport",
        icon: "🚌",
        kind: TransactionKind::Expense,
        default_description: "Transport",
    },
    CategoryInfo {
        tag: UNNECESSARY,
        label: "Non-essential",
        icon: "🛍️",
        kind: TransactionKind::Expense,
        default_description: "Personal spending",
    },
    CategoryInfo {
        tag: "family",
        label: "Family",
        icon: "👪",
        kind: TransactionKind::Income,
        default_description: "Family support",
    },
    CategoryInfo {
        tag: "work",
        label: "Work",
        icon: "💼",
        kind: TransactionKind::Income,
        default_description: "Work income",
    },
    CategoryInfo {
        tag: "scholarship",
        label: "Scholarship",
        icon: "🎓",
        kind: TransactionKind::Income,
        default_description: "University scholarship",
    },
    CategoryInfo {
        tag: "other",
        label: "Other",
        icon: "✨",
        kind: TransactionKind::Income,
        default_description: "Other income",
    },
];

pub fn lookup(tag: &str) -> Option<&'static CategoryInfo> {
    CATEGORIES.iter().find(|c| c.tag == tag)
}

pub fn expense_categories() -> impl Iterator<Item = &'static CategoryInfo> {
    CATEGORIES
        .iter()
        .filter(|c| c.kind == TransactionKind::Expense)
}

pub fn income_sources() -> impl Iterator<Item = &'static CategoryInfo> {
    CATEGORIES.iter().filter(|c| c.kind == TransactionKind::Income)
}

/// Display label with icon; unknown tags fall back to a generic entry.
pub fn display_label(tag: &str) -> String {
    match lookup(tag) {
        Some(c) => format!("{} {}", c.icon, c.label),
        None => format!("📦 Misc ({})", tag),
    }
}

pub fn default_description(tag: &str, kind: TransactionKind) -> &'static str {
    match lookup(tag) {
        Some(c) if c.kind == kind => c.default_description,
        _ => match kind {
            TransactionKind::Expense => "Miscellaneous expense",
            TransactionKind::Income => "Additional income",
        },
    }
}
