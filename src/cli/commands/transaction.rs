use mtp_core::{CoreError, CurrencyFormatter, DateFormatter, DraftInput, DraftService};

use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::forms::{self, TransactionForm};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CliMode, ShellContext};
use crate::cli::table::{Table, TableColumn};

const ADD_USAGE: &str = "add <income|expense> <amount> <category> [YYYY-MM-DD|today] [note...]";
const DELETE_USAGE: &str = "delete <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense (form when run without arguments)",
            ADD_USAGE,
            cmd_add,
        ),
        CommandEntry::new(
            "delete",
            "Remove a transaction by id or unique id prefix",
            DELETE_USAGE,
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandEntry::new(
            "list",
            "Show transactions newest first, optionally filtered by note or category",
            "list [search text]",
            cmd_list,
        )
        .with_aliases(&["ls", "history"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = if args.is_empty() {
        if context.mode != CliMode::Interactive {
            return Err(CommandError::usage(ADD_USAGE));
        }
        match TransactionForm::new(&context.theme, context.clock.as_ref()).prompt()? {
            Some(input) => input,
            None => {
                output::info("Nothing recorded.");
                return Ok(());
            }
        }
    } else {
        parse_add_args(args)?
    };

    let draft = DraftService::validate(&input, context.clock.as_ref())?;
    let txn = context.ledger.add_transaction(draft)?;
    output::success(format!(
        "Recorded {} of {} ({}) on {} [{}].",
        txn.kind,
        context.formatters.format_amount(txn.amount),
        txn.category,
        context.formatters.format_date(txn.date),
        txn.short_id()
    ));
    Ok(())
}

fn parse_add_args(args: &[&str]) -> Result<DraftInput, CommandError> {
    let [kind, amount, category, rest @ ..] = args else {
        return Err(CommandError::usage(ADD_USAGE));
    };
    let (date, note) = match rest.split_first() {
        Some((date, note)) => (date.to_string(), note.join(" ")),
        None => (String::new(), String::new()),
    };
    Ok(DraftInput {
        kind: kind.to_string(),
        amount: amount.to_string(),
        category: category.to_string(),
        date,
        note: Some(note),
    })
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let target = match args {
        [prefix] => match context.ledger.find_by_prefix(prefix) {
            Ok(txn) => txn.clone(),
            Err(CoreError::TransactionNotFound(missing)) => {
                output::warning(format!("No transaction matches `{missing}`; nothing deleted."));
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        },
        [] if context.mode == CliMode::Interactive => {
            if context.ledger.is_empty() {
                output::info("No transactions recorded yet.");
                return Ok(());
            }
            match forms::select_transaction(
                &context.theme,
                context.ledger.transactions(),
                &context.formatters,
            )? {
                Some(txn) => txn,
                None => return Ok(()),
            }
        }
        _ => return Err(CommandError::usage(DELETE_USAGE)),
    };

    if context.ledger.delete_transaction(target.id)? {
        output::success(format!(
            "Deleted {} of {} ({}) [{}].",
            target.kind,
            context.formatters.format_amount(target.amount),
            target.category,
            target.short_id()
        ));
    } else {
        output::warning(format!("Transaction {} was already gone.", target.short_id()));
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let query = args.join(" ");
    let matches = context.ledger.search(&query);
    if matches.is_empty() {
        if query.is_empty() {
            output::info("No transactions recorded yet. Use `add` to record one.");
        } else {
            output::info(format!("No transactions match `{query}`."));
        }
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::left("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Note"),
    ]);
    for txn in &matches {
        table.add_row(vec![
            txn.short_id(),
            context.formatters.format_date(txn.date),
            txn.kind.to_string(),
            txn.category.clone(),
            context.formatters.format_amount(txn.signed_amount()),
            txn.note.clone(),
        ]);
    }
    output::section("Transactions");
    table.print();
    output::info(format!(
        "{} of {} transaction(s) shown.",
        matches.len(),
        context.ledger.len()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_arguments_split_into_date_and_note() {
        let input = parse_add_args(&["expense", "4.50", "food", "2024-02-01", "flat", "white"])
            .unwrap();
        assert_eq!(input.category, "food");
        assert_eq!(input.date, "2024-02-01");
        assert_eq!(input.note.as_deref(), Some("flat white"));

        let minimal = parse_add_args(&["income", "10", "Gift"]).unwrap();
        assert!(minimal.date.is_empty());
        assert!(parse_add_args(&["income", "10"]).is_err());
    }
}
