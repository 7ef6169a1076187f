//! Shared runtime state for CLI interactions and command execution.

use std::{path::PathBuf, sync::Arc};

use chrono::NaiveDateTime;
use dialoguer::{theme::ColorfulTheme, Confirm};
use mtp_config::{default_base_dir, Config, ConfigManager};
use mtp_core::{Clock, CoreError, LedgerStore};
use mtp_storage_json::JsonFileStore;
use strsim::levenshtein;
use tracing::{debug, warn};

use super::{
    commands,
    errors::{CliError, CommandError},
    formatters::CliFormatters,
    output,
    registry::{CommandEntry, CommandRegistry},
    system_clock::clock_from_env,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

const MAX_SUGGESTION_DISTANCE: usize = 3;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: LedgerStore,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub formatters: CliFormatters,
    pub theme: ColorfulTheme,
    pub data_root: PathBuf,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::open(mode, default_base_dir(), clock_from_env())
    }

    /// Loads configuration and ledger data rooted at `base`.
    pub fn open(mode: CliMode, base: PathBuf, clock: Arc<dyn Clock>) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base.clone())?;
        let config = config_manager.load().unwrap_or_else(|err| {
            warn!(error = %err, "configuration unreadable; using defaults");
            Config::default()
        });
        let data_root = config.resolve_data_root(&base);
        let storage = JsonFileStore::new(data_root.clone())?;
        let ledger = LedgerStore::load(Box::new(storage), clock.clone());
        debug!(data_root = %data_root.display(), "shell context ready");

        let mut context = ShellContext {
            mode,
            registry,
            ledger,
            clock,
            formatters: CliFormatters::from_config(&config),
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            data_root,
            running: true,
        };
        context.apply_config();
        Ok(context)
    }

    pub(crate) fn prompt(&self) -> String {
        "money> ".to_string()
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Re-derives formatters and styling after the configuration changed.
    pub(crate) fn apply_config(&mut self) {
        self.formatters = CliFormatters::from_config(&self.config);
        output::set_color_enabled(self.mode == CliMode::Interactive && self.config.ui_color_enabled);
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            output::info(format!("Did you mean `{}`?", best));
        }
    }

    fn closest_command(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Core(CoreError::Storage(message)) => {
                output::error(format!("Could not save changes: {message}"));
                output::hint("The change is kept for this session and saved with the next write.");
            }
            other => output::error(other),
        }
        Ok(())
    }
}
