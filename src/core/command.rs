//! Command definitions.
//!
//! A [`Command`] describes one console command: canonical name, aliases, help
//! text, ordered parameter specs and its actions. Metadata and actions are
//! stored separately (see [`CommandTable`](super::CommandTable) and
//! [`CommandActions`](super::CommandActions)) so actions can run with full
//! `World` access without borrow conflicts.

use bevy::prelude::*;

use super::convert::{ParamType, ParamValue};

/// Error reported by a command action.
///
/// Returning an error from an action makes the surrounding dispatch report
/// the message through the console's error channel and return failure.
#[derive(Debug, Clone)]
pub struct CommandError(Box<str>);

impl CommandError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<Box<str>>) -> Self {
        Self(message.into())
    }

    /// Get the error message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CommandError {}

/// Result type for command actions.
pub type CommandResult = Result<(), CommandError>;

/// Type alias for parameterized command actions.
///
/// Actions receive:
/// - `values`: the converted parameters, one per declared [`ParamSpec`]
/// - `world`: mutable access to the Bevy world
pub type CommandAction = Box<dyn Fn(&[ParamValue], &mut World) -> CommandResult + Send + Sync>;

/// Type alias for no-argument command actions.
///
/// Invoked when the command is submitted without any parameters, letting a
/// command support both a query form and a mutation form under one name.
pub type DefaultAction = Box<dyn Fn(&mut World) -> CommandResult + Send + Sync>;

/// Specification of one command parameter.
///
/// Parameter order is the calling convention: tokens are converted and passed
/// to the action in declaration order.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    name: Box<str>,
    ty: ParamType,
    help: &'static str,
}

impl ParamSpec {
    /// Create a new parameter spec.
    pub fn new(name: impl Into<Box<str>>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            help: "",
        }
    }

    /// Set the help text.
    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Get the parameter name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the parameter type.
    #[inline]
    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    /// Get the help text.
    #[inline]
    pub fn help_text(&self) -> &'static str {
        self.help
    }

    /// Format as shown in conversion errors, e.g. `<enabled: bool>`.
    pub fn formatted(&self) -> String {
        format!("<{}: {}>", self.name, self.ty)
    }
}

/// Metadata for a console command (stored in the table).
///
/// The actions are stored separately in
/// [`CommandActions`](super::CommandActions).
#[derive(Debug, Clone)]
pub struct CommandMeta {
    pub(crate) name: Box<str>,
    pub(crate) aliases: Vec<Box<str>>,
    pub(crate) help: &'static str,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) has_action: bool,
    pub(crate) has_default: bool,
}

impl CommandMeta {
    /// Get the canonical command name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the aliases.
    #[inline]
    pub fn aliases(&self) -> &[Box<str>] {
        &self.aliases
    }

    /// Get the help text.
    #[inline]
    pub fn help_text(&self) -> &'static str {
        self.help
    }

    /// Get the ordered parameter specs.
    #[inline]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Whether this command has a no-argument action.
    #[inline]
    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// Check if the given raw string matches one of the aliases.
    ///
    /// Alias comparison is exact on the raw input as given; since aliases are
    /// normalized to lowercase at registration, an uppercased alias will not
    /// resolve while an uppercased canonical name will.
    pub fn has_alias(&self, raw: &str) -> bool {
        self.aliases.iter().any(|a| &**a == raw)
    }

    /// Format the calling syntax, e.g. `print <message>`.
    pub fn syntax(&self) -> String {
        let mut s = self.name.to_string();
        for param in &self.params {
            s.push_str(" <");
            s.push_str(&param.name);
            s.push('>');
        }
        s
    }
}

/// The actions belonging to one command, stored keyed by canonical name.
pub struct ActionSet {
    pub(crate) action: Option<CommandAction>,
    pub(crate) default: Option<DefaultAction>,
}

/// A console command under construction.
///
/// # Examples
///
/// ```ignore
/// let print = Command::new("print")
///     .alias("echo")
///     .help("Display a message in the developer console")
///     .param(ParamSpec::new("message", ParamType::String).help("Message to display"))
///     .action(|values, _world| {
///         info!("{}", values[0].as_str().unwrap_or_default());
///         Ok(())
///     });
/// ```
pub struct Command {
    name: Box<str>,
    aliases: Vec<Box<str>>,
    help: &'static str,
    params: Vec<ParamSpec>,
    action: Option<CommandAction>,
    default: Option<DefaultAction>,
}

impl Command {
    /// Create a new command with the given name.
    ///
    /// The name is normalized (whitespace stripped, lowercased) at
    /// registration time.
    pub fn new(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            help: "",
            params: Vec::new(),
            action: None,
            default: None,
        }
    }

    /// Add an alias.
    pub fn alias(mut self, alias: impl Into<Box<str>>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Set the help text.
    pub fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    /// Append a parameter spec. Order is the calling convention.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Set the parameterized action.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&[ParamValue], &mut World) -> CommandResult + Send + Sync + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Set the no-argument action, invoked when no parameters are supplied.
    pub fn default_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut World) -> CommandResult + Send + Sync + 'static,
    {
        self.default = Some(Box::new(action));
        self
    }

    /// Get the command name as given (not yet normalized).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Split into metadata and actions for separate storage.
    pub fn split(self) -> (CommandMeta, ActionSet) {
        (
            CommandMeta {
                name: self.name,
                aliases: self.aliases,
                help: self.help,
                params: self.params,
                has_action: self.action.is_some(),
                has_default: self.default.is_some(),
            },
            ActionSet {
                action: self.action,
                default: self.default,
            },
        )
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = Command::new("print")
            .alias("echo")
            .help("Display a message")
            .param(ParamSpec::new("message", ParamType::String).help("Message to display"))
            .action(|_, _| Ok(()));

        let (meta, actions) = cmd.split();
        assert_eq!(meta.name(), "print");
        assert_eq!(meta.aliases().len(), 1);
        assert_eq!(meta.params().len(), 1);
        assert!(meta.has_action);
        assert!(!meta.has_default());
        assert!(actions.action.is_some());
        assert!(actions.default.is_none());
    }

    #[test]
    fn test_command_syntax() {
        let (meta, _) = Command::new("tp")
            .param(ParamSpec::new("x", ParamType::Float))
            .param(ParamSpec::new("y", ParamType::Float))
            .action(|_, _| Ok(()))
            .split();
        assert_eq!(meta.syntax(), "tp <x> <y>");
    }

    #[test]
    fn test_param_formatted() {
        let spec = ParamSpec::new("enabled", ParamType::Bool);
        assert_eq!(spec.formatted(), "<enabled: bool>");
    }

    #[test]
    fn test_has_alias_exact_case() {
        let (meta, _) = Command::new("print")
            .alias("echo")
            .default_action(|_| Ok(()))
            .split();
        assert!(meta.has_alias("echo"));
        assert!(!meta.has_alias("Echo"));
    }
}
