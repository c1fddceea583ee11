//! Command table and action storage.
//!
//! The [`CommandTable`] owns command metadata keyed by canonical name, in
//! registration order so suggestion iteration is deterministic. Actions live
//! in [`CommandActions`], a separate resource, so they can execute with full
//! `World` access (including access to the table itself) without borrow
//! conflicts.

use std::collections::HashMap;

use bevy::prelude::*;

use super::command::{ActionSet, Command, CommandAction, CommandMeta, DefaultAction};

/// Commands that can never be unregistered.
pub const PERMANENT_COMMANDS: [&str; 6] =
    ["devconsole", "commands", "help", "print", "clear", "reset"];

/// Normalize a command name or alias: strip whitespace, lowercase.
fn normalize(name: &str) -> Box<str> {
    name.split_whitespace()
        .collect::<String>()
        .to_lowercase()
        .into()
}

/// Central table of registered command metadata.
///
/// Lookup by canonical name is case-insensitive; alias lookup is a linear
/// scan comparing the raw input exactly, which is acceptable for the tens to
/// low hundreds of commands a console holds.
#[derive(Resource, Default)]
pub struct CommandTable {
    // Registration order drives suggestion iteration.
    entries: Vec<CommandMeta>,
    index: HashMap<Box<str>, usize>,
}

impl CommandTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of registered commands.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a canonical name is registered (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&*normalize(name))
    }

    /// Look up a command by name or alias.
    ///
    /// Canonical names match case-insensitively; aliases match the raw input
    /// exactly (the original console's asymmetry, kept deliberately).
    pub fn lookup(&self, name_or_alias: &str) -> Option<&CommandMeta> {
        if let Some(&i) = self.index.get(&*name_or_alias.to_lowercase()) {
            return Some(&self.entries[i]);
        }
        self.entries.iter().find(|meta| meta.has_alias(name_or_alias))
    }

    /// Iterate over all commands in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandMeta> {
        self.entries.iter()
    }

    /// Iterate over all canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|meta| meta.name())
    }

    /// Whether a name belongs to the permanent command set.
    pub fn is_permanent(name: &str) -> bool {
        PERMANENT_COMMANDS.contains(&name)
    }

    fn collides(&self, candidate: &str) -> bool {
        self.index.contains_key(candidate)
            || self.entries.iter().any(|meta| meta.has_alias(candidate))
    }

    /// Insert validated metadata. Returns `false` on any name or alias
    /// collision, leaving the table untouched.
    fn insert(&mut self, meta: CommandMeta) -> bool {
        if meta.name.is_empty() || self.collides(&meta.name) {
            return false;
        }
        if meta.aliases.iter().any(|alias| self.collides(alias)) {
            return false;
        }

        self.index.insert(meta.name.clone(), self.entries.len());
        self.entries.push(meta);
        true
    }

    fn remove(&mut self, name: &str) -> Option<CommandMeta> {
        let i = self.index.remove(name)?;
        let meta = self.entries.remove(i);
        // Positions after the removed entry shifted down by one.
        for (pos, entry) in self.entries.iter().enumerate().skip(i) {
            self.index.insert(entry.name.clone(), pos);
        }
        Some(meta)
    }
}

/// Stores command actions separately from metadata.
#[derive(Resource, Default)]
pub struct CommandActions {
    actions: HashMap<Box<str>, ActionSet>,
}

impl CommandActions {
    /// Create a new empty action storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a command's actions temporarily for execution.
    ///
    /// Use [`put`](Self::put) to return them after execution.
    pub fn take(&mut self, name: &str) -> Option<ActionSet> {
        self.actions.remove(name)
    }

    /// Put actions back after temporary removal.
    pub fn put(&mut self, name: &str, set: ActionSet) {
        self.actions.insert(name.into(), set);
    }

    fn insert(&mut self, name: Box<str>, set: ActionSet) {
        self.actions.insert(name, set);
    }

    fn remove(&mut self, name: &str) -> Option<ActionSet> {
        self.actions.remove(name)
    }
}

/// Register a command into the table and action storage.
///
/// The name and aliases are normalized (whitespace stripped, lowercased) and
/// empty aliases are dropped. Returns `false` without modifying anything when
/// the normalized name is empty, the command has no usable action, parameter
/// names collide, or the name or any alias collides with an existing name or
/// alias. Conflicts are logged at `warn` level rather than raised.
pub fn register(table: &mut CommandTable, actions: &mut CommandActions, cmd: Command) -> bool {
    let (mut meta, set) = cmd.split();

    meta.name = normalize(&meta.name);
    meta.aliases = meta
        .aliases
        .iter()
        .map(|a| normalize(a))
        .filter(|a| !a.is_empty())
        .collect();

    if meta.name.is_empty() {
        warn!("Console: refusing to register a command with an empty name");
        return false;
    }
    if !meta.has_action && !meta.has_default {
        warn!("Console: command '{}' has no action", meta.name);
        return false;
    }
    if !meta.params.is_empty() && !meta.has_action {
        warn!(
            "Console: command '{}' declares parameters but no parameterized action",
            meta.name
        );
        return false;
    }
    for (i, param) in meta.params.iter().enumerate() {
        if meta.params[..i].iter().any(|p| p.name() == param.name()) {
            warn!(
                "Console: command '{}' declares duplicate parameter '{}'",
                meta.name,
                param.name()
            );
            return false;
        }
    }

    let name = meta.name.clone();
    if !table.insert(meta) {
        warn!("Console: command or alias conflict registering '{}'", name);
        return false;
    }
    actions.insert(name, set);
    true
}

/// Unregister a command by canonical name.
///
/// Returns `true` as a no-op when the command does not exist, `false` when
/// the name belongs to the permanent set, and `true` after removing an
/// ordinary command.
pub fn unregister(table: &mut CommandTable, actions: &mut CommandActions, name: &str) -> bool {
    let name = normalize(name);

    if !table.contains(&name) {
        return true;
    }
    if CommandTable::is_permanent(&name) {
        return false;
    }

    table.remove(&name);
    actions.remove(&name);
    true
}

/// Run a command's parameterized action with temporary ownership.
///
/// The actions are taken out of storage for the duration of the call so the
/// action itself may freely access [`CommandActions`] through the world.
/// Panics inside the action propagate to the caller.
pub(crate) fn run_action(
    world: &mut World,
    name: &str,
    f: impl FnOnce(&CommandAction, &mut World) -> super::command::CommandResult,
) -> Option<super::command::CommandResult> {
    let set = world.resource_mut::<CommandActions>().take(name)?;
    let result = set.action.as_ref().map(|action| f(action, world));
    world.resource_mut::<CommandActions>().put(name, set);
    result
}

/// Run a command's no-argument action with temporary ownership.
pub(crate) fn run_default_action(
    world: &mut World,
    name: &str,
    f: impl FnOnce(&DefaultAction, &mut World) -> super::command::CommandResult,
) -> Option<super::command::CommandResult> {
    let set = world.resource_mut::<CommandActions>().take(name)?;
    let result = set.default.as_ref().map(|action| f(action, world));
    world.resource_mut::<CommandActions>().put(name, set);
    result
}
