use mtp_core::{format_short_date, CurrencyFormatter, DateFormatter, LedgerSummary};
use mtp_domain::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::formatters::CliFormatters;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn};

const USAGE: &str = "summary [--json]";
const BAR_WIDTH: usize = 20;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show totals, balance, today's budget and the last 7 days",
        USAGE,
        cmd_summary,
    )
    .with_aliases(&["dashboard"])]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let summary = context.ledger.summary(context.now());
    match args {
        [] => {
            print_summary(&summary, &context.formatters);
            Ok(())
        }
        ["--json"] => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
        _ => Err(CommandError::usage(USAGE)),
    }
}

fn print_summary(summary: &LedgerSummary, fmt: &CliFormatters) {
    output::section(format!("Summary for {}", fmt.format_date(summary.today)));
    output::two_column(&[
        ("Total income", fmt.format_amount(summary.total_income)),
        ("Total expense", fmt.format_amount(summary.total_expense)),
        ("Balance", fmt.format_amount(summary.balance)),
        (
            "Projected interest",
            format!("{} (4.5% of income)", fmt.format_amount(summary.projected_interest)),
        ),
    ]);

    output::section("Daily budget");
    let status = if summary.is_over_budget {
        format!(
            "Over budget by {}",
            fmt.format_amount(summary.today_expenses.saturating_sub(summary.daily_limit))
        )
    } else {
        format!("{} left today", fmt.format_amount(summary.remaining_today))
    };
    output::two_column(&[
        ("Spent today", fmt.format_amount(summary.today_expenses)),
        ("Daily limit", fmt.format_amount(summary.daily_limit)),
        ("Progress", progress_bar(summary.budget_progress)),
        ("Status", status),
    ]);
    if summary.is_over_budget {
        output::warning("Daily spending limit exceeded.");
    }

    output::section("Last 7 days");
    let mut table = Table::new(vec![
        TableColumn::left("Day"),
        TableColumn::left("Date"),
        TableColumn::right("Income"),
        TableColumn::right("Expense"),
    ]);
    for day in &summary.weekly {
        table.add_row(vec![
            day.label.clone(),
            format_short_date(day.date),
            fmt.format_amount(day.income),
            fmt.format_amount(day.expense),
        ]);
    }
    table.print();
}

/// `[#####---------------] 25%` for a progress value in `0..=100`.
fn progress_bar(progress: Decimal) -> String {
    let step = Decimal::from(100 / BAR_WIDTH);
    let filled = (progress / step)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.round_dp(0)
    )
}
