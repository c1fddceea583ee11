//! Unified console API for convenient access.
//!
//! The [`Console`] system parameter bundles the command table, action
//! storage, type converters and session state into a single capability-style
//! interface for registration, interactive editing and output. Dispatch needs
//! exclusive `World` access and lives in [`dispatch`](super::dispatch()).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::command::{Command, CommandMeta};
use super::convert::{EnumSpec, ParamType, ParamValue, TypeConverters};
use super::events::OutputQueue;
use super::history::HistoryBuffer;
use super::state::ConsoleState;
use super::suggest::Suggestions;
use super::table::{self, CommandActions, CommandTable};

/// Unified console system parameter.
///
/// # Examples
///
/// ```ignore
/// fn setup_console(mut console: Console) {
///     console.register_command(
///         Command::new("spawn")
///             .help("Spawn an entity at a position")
///             .param(ParamSpec::new("x", ParamType::Float))
///             .param(ParamSpec::new("y", ParamType::Float))
///             .action(|values, world| {
///                 // ...
///                 Ok(())
///             }),
///     );
/// }
/// ```
#[derive(SystemParam)]
pub struct Console<'w> {
    table: ResMut<'w, CommandTable>,
    actions: ResMut<'w, CommandActions>,
    converters: ResMut<'w, TypeConverters>,
    state: ResMut<'w, ConsoleState>,
    output: ResMut<'w, OutputQueue>,
}

impl Console<'_> {
    /// Register a command.
    ///
    /// Returns `false` on any name or alias conflict (the table is left
    /// unchanged) or when the command has no usable action.
    pub fn register_command(&mut self, cmd: Command) -> bool {
        table::register(&mut self.table, &mut self.actions, cmd)
    }

    /// Unregister a command by name.
    ///
    /// Returns `true` as a no-op for unknown names, `false` for permanent
    /// commands, and `true` after removal otherwise.
    pub fn unregister(&mut self, name: &str) -> bool {
        table::unregister(&mut self.table, &mut self.actions, name)
    }

    /// Register a parameter type converter. Additive only; returns `false`
    /// if the type already has one.
    pub fn register_type_converter<F>(&mut self, ty: ParamType, f: F) -> bool
    where
        F: Fn(&str) -> Option<ParamValue> + Send + Sync + 'static,
    {
        self.converters.register(ty, f)
    }

    /// Register an enumeration parameter type. Additive only.
    pub fn register_enum(&mut self, spec: EnumSpec) -> bool {
        self.converters.register_enum(spec)
    }

    /// Look up a command by name or alias.
    pub fn lookup(&self, name_or_alias: &str) -> Option<&CommandMeta> {
        self.table.lookup(name_or_alias)
    }

    /// Check if a command name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    /// Get the number of registered commands.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over command metadata in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandMeta> {
        self.table.iter()
    }

    /// Get the current input buffer contents.
    pub fn input(&self) -> &str {
        self.state.input()
    }

    /// Notify the console that the input buffer changed.
    pub fn on_input_changed(&mut self, text: impl Into<String>) {
        let names = self.table.names();
        self.state.on_input_changed(text, names);
    }

    /// Step through command history; see [`ConsoleState::cycle_history`].
    pub fn cycle_history(&mut self, direction: i32) -> Option<&str> {
        self.state.cycle_history(direction)
    }

    /// Move the suggestion cursor, wrapping around the candidate list.
    pub fn cycle_suggestions(&mut self, direction: i32) {
        self.state.cycle_suggestions(direction);
    }

    /// Replace the input buffer with the selected suggestion.
    pub fn accept_suggestion(&mut self) -> bool {
        let names = self.table.names();
        self.state.accept_suggestion(names)
    }

    /// Get the command history.
    pub fn history(&self) -> &HistoryBuffer {
        self.state.history()
    }

    /// Get the current suggestion candidates.
    pub fn suggestions(&self) -> &Suggestions {
        self.state.suggestions()
    }

    /// Get mutable access to the session state.
    pub fn state_mut(&mut self) -> &mut ConsoleState {
        &mut self.state
    }

    /// Queue an info message on the console output.
    pub fn info(&mut self, message: impl Into<String>) {
        self.output.info(message);
    }

    /// Queue a warning message on the console output.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.output.warning(message);
    }

    /// Queue an error message on the console output.
    pub fn error(&mut self, message: impl Into<String>) {
        self.output.error(message);
    }

    /// Queue a success message on the console output.
    pub fn success(&mut self, message: impl Into<String>) {
        self.output.success(message);
    }
}

/// Read-only console system parameter.
///
/// Use this when a system only inspects console state; it allows better
/// parallelism in the scheduler.
#[derive(SystemParam)]
pub struct ConsoleRef<'w> {
    table: Res<'w, CommandTable>,
    state: Res<'w, ConsoleState>,
}

impl ConsoleRef<'_> {
    /// Look up a command by name or alias.
    pub fn lookup(&self, name_or_alias: &str) -> Option<&CommandMeta> {
        self.table.lookup(name_or_alias)
    }

    /// Check if a command name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.table.contains(name)
    }

    /// Iterate over command metadata in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandMeta> {
        self.table.iter()
    }

    /// Get the current input buffer contents.
    pub fn input(&self) -> &str {
        self.state.input()
    }

    /// Get the command history.
    pub fn history(&self) -> &HistoryBuffer {
        self.state.history()
    }

    /// Get the current suggestion candidates.
    pub fn suggestions(&self) -> &Suggestions {
        self.state.suggestions()
    }
}
