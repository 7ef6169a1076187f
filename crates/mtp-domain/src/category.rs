//! Fixed, kind-dependent category taxonomy offered by the creation form.

use crate::transaction::TransactionKind;

pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Gift", "Other"];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing",
    "Entertainment",
    "Shopping",
    "Health",
    "Utilities",
    "Other",
];

/// Returns the categories offered for the given transaction kind.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// Looks up the canonical spelling of `name`, ignoring ASCII case.
pub fn canonical_category(kind: TransactionKind, name: &str) -> Option<&'static str> {
    let needle = name.trim();
    categories_for(kind)
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(needle))
}
