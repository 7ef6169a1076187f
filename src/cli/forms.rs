//! Interactive dialoguer prompts used when a command runs without arguments.

use dialoguer::{theme::ColorfulTheme, Input, Select};
use mtp_core::{Clock, CurrencyFormatter, DraftInput, DraftService, DATE_FORMAT};
use mtp_domain::{categories_for, Transaction, TransactionKind};

use crate::cli::errors::CommandError;
use crate::cli::formatters::CliFormatters;

/// Collects the fields of a new transaction. Each field is validated as it is typed.
pub struct TransactionForm<'a> {
    theme: &'a ColorfulTheme,
    clock: &'a dyn Clock,
}

impl<'a> TransactionForm<'a> {
    pub fn new(theme: &'a ColorfulTheme, clock: &'a dyn Clock) -> Self {
        Self { theme, clock }
    }

    /// Returns `None` when the user backs out of a selection.
    pub fn prompt(&self) -> Result<Option<DraftInput>, CommandError> {
        let kinds = [TransactionKind::Expense, TransactionKind::Income];
        let labels: Vec<&str> = kinds.iter().map(|kind| kind.as_str()).collect();
        let Some(kind_idx) = Select::with_theme(self.theme)
            .with_prompt("Type")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            return Ok(None);
        };
        let kind = kinds[kind_idx];

        let amount: String = Input::with_theme(self.theme)
            .with_prompt("Amount")
            .validate_with(|value: &String| {
                DraftService::parse_amount(value)
                    .map(|_| ())
                    .map_err(|err| err.to_string())
            })
            .interact_text()?;

        let categories = categories_for(kind);
        let Some(category_idx) = Select::with_theme(self.theme)
            .with_prompt("Category")
            .items(categories)
            .default(0)
            .interact_opt()?
        else {
            return Ok(None);
        };

        let clock = self.clock;
        let date: String = Input::with_theme(self.theme)
            .with_prompt("Date (YYYY-MM-DD)")
            .default(clock.today().format(DATE_FORMAT).to_string())
            .validate_with(move |value: &String| {
                DraftService::parse_date(value, clock)
                    .map(|_| ())
                    .map_err(|err| err.to_string())
            })
            .interact_text()?;

        let note: String = Input::with_theme(self.theme)
            .with_prompt("Note (optional)")
            .allow_empty(true)
            .interact_text()?;

        Ok(Some(DraftInput {
            kind: kind.as_str().to_string(),
            amount,
            category: categories[category_idx].to_string(),
            date,
            note: Some(note),
        }))
    }
}

/// Lets the user pick one transaction from `transactions`.
pub fn select_transaction(
    theme: &ColorfulTheme,
    transactions: &[Transaction],
    formatters: &CliFormatters,
) -> Result<Option<Transaction>, CommandError> {
    let items: Vec<String> = transactions
        .iter()
        .map(|txn| {
            format!(
                "{}  {}  {:<13} {}",
                txn.short_id(),
                txn.date.format(DATE_FORMAT),
                txn.category,
                formatters.format_amount(txn.signed_amount())
            )
        })
        .collect();
    let selection = Select::with_theme(theme)
        .with_prompt("Select a transaction")
        .items(&items)
        .default(0)
        .interact_opt()?;
    Ok(selection.and_then(|idx| transactions.get(idx).cloned()))
}
