use mtp_config::ConfigKey;

use crate::cli::errors::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const USAGE: &str = "config [show | set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences (symbol, precision, color, data-root)",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show_config(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => {
            let key = context.config.set(key, &value.join(" "))?;
            context.persist_config()?;
            context.apply_config();
            output::success(format!("`{}` set to {}.", key, context.config.get(key)));
            if key == ConfigKey::DataRoot {
                output::info("The new data location takes effect on the next start.");
            }
            Ok(())
        }
        _ => Err(CommandError::usage(USAGE)),
    }
}

fn show_config(context: &ShellContext) {
    output::section("Configuration");
    let mut rows: Vec<(&str, String)> = ConfigKey::ALL
        .iter()
        .map(|key| (key.as_str(), context.config.get(*key)))
        .collect();
    rows.push((
        "config file",
        context.config_manager.config_path().display().to_string(),
    ));
    rows.push(("data directory", context.data_root.display().to_string()));
    output::two_column(&rows);
}
