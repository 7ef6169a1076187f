use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::table::{Table, TableColumn};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    let mut table = Table::new(vec![
        TableColumn::left("Command"),
        TableColumn::left("Description"),
    ]);
    for entry in registry.list() {
        table.add_row(vec![entry.name, entry.description]);
    }
    table.print();
    output::hint("Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    let aliases = if entry.aliases.is_empty() {
        "none".to_string()
    } else {
        entry.aliases.join(", ")
    };
    output::two_column(&[
        ("Description", entry.description.to_string()),
        ("Usage", entry.usage.to_string()),
        ("Aliases", aliases),
    ]);
}
