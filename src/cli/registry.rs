use std::collections::HashMap;

use crate::cli::errors::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            description,
            usage,
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }
}

/// Commands in registration order, addressable by name or alias.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandEntry>,
    lookup: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`. A later entry with the same name replaces the earlier one.
    pub fn register(&mut self, entry: CommandEntry) {
        let index = match self.lookup.get(entry.name) {
            Some(&existing) => {
                self.commands[existing] = entry;
                existing
            }
            None => {
                self.commands.push(entry);
                self.commands.len() - 1
            }
        };
        let entry = &self.commands[index];
        self.lookup.insert(entry.name, index);
        for &alias in entry.aliases {
            self.lookup.insert(alias, index);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.lookup.get(name).map(|&index| &self.commands[index])
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> {
        self.commands.iter()
    }

    /// Primary names followed by aliases, for completion and suggestions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands
            .iter()
            .map(|entry| entry.name)
            .chain(self.commands.iter().flat_map(|entry| entry.aliases.iter().copied()))
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut ShellContext, _: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn aliases_resolve_to_the_primary_entry() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "List", "list", noop).with_aliases(&["ls"]));
        registry.register(CommandEntry::new("exit", "Exit", "exit", noop));

        assert_eq!(registry.get("ls").map(|entry| entry.name), Some("list"));
        assert!(registry.get("quit").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "exit", "ls"]);
    }

    #[test]
    fn re_registering_keeps_position() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("a", "first", "a", noop));
        registry.register(CommandEntry::new("b", "b", "b", noop));
        registry.register(CommandEntry::new("a", "second", "a", noop));

        let descriptions: Vec<_> = registry.list().map(|entry| entry.description).collect();
        assert_eq!(descriptions, vec!["second", "b"]);
    }
}
