use std::str::FromStr;

use mtp_core::{CurrencyFormatter, DraftService};
use mtp_domain::{categories_for, Decimal, TransactionKind};

use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const BUDGET_USAGE: &str = "budget [limit]";
const CATEGORIES_USAGE: &str = "categories [income|expense]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "budget",
            "Show or set the daily spending limit",
            BUDGET_USAGE,
            cmd_budget,
        ),
        CommandEntry::new(
            "categories",
            "List the categories available for each transaction type",
            CATEGORIES_USAGE,
            cmd_categories,
        ),
    ]
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            let summary = context.ledger.summary(context.now());
            let fmt = &context.formatters;
            output::section("Daily budget");
            output::two_column(&[
                ("Daily limit", fmt.format_amount(summary.daily_limit)),
                ("Spent today", fmt.format_amount(summary.today_expenses)),
                ("Remaining", fmt.format_amount(summary.remaining_today)),
            ]);
            Ok(())
        }
        [raw] => {
            let limit = DraftService::parse_limit(raw)?;
            context.ledger.update_budget(limit)?;
            output::success(format!(
                "Daily limit set to {}.",
                context.formatters.format_amount(limit)
            ));
            if limit <= Decimal::ZERO {
                output::warning("Any spending today will now count as over budget.");
            }
            Ok(())
        }
        _ => Err(CommandError::usage(BUDGET_USAGE)),
    }
}

fn cmd_categories(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kinds = match args {
        [] => TransactionKind::ALL.to_vec(),
        [raw] => vec![TransactionKind::from_str(raw)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?],
        _ => return Err(CommandError::usage(CATEGORIES_USAGE)),
    };
    for kind in kinds {
        output::section(format!("{} categories", capitalize(kind.as_str())));
        for category in categories_for(kind) {
            println!("  {category}");
        }
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
