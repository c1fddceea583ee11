//! Input dispatch.
//!
//! [`dispatch`] drives one submission through the full pipeline: tokenize,
//! resolve, reconcile arity, convert parameters, invoke. Every failure is
//! reported through the [`OutputQueue`] error channel and surfaced as a
//! `false` return; dispatch itself never panics on malformed input. Panics
//! raised inside command actions are not caught and propagate to the caller.

use bevy::prelude::*;

use super::command::CommandError;
use super::convert::{ParamType, ParamValue, TypeConverters};
use super::events::OutputQueue;
use super::state::ConsoleState;
use super::table::{CommandTable, run_action, run_default_action};
use super::tokenizer::{reconcile, tokenize};

/// A dispatch failure. All variants are recoverable; none abort the caller.
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// No command matched the first token by name or alias.
    UnknownCommand(Box<str>),
    /// The parameter count did not match after reconciliation.
    ArityMismatch {
        /// The command's calling syntax.
        syntax: Box<str>,
        /// Declared parameter count.
        expected: usize,
        /// Supplied parameter count.
        got: usize,
    },
    /// A parameter token could not be converted to its declared type.
    ConversionFailure {
        /// The offending token.
        token: Box<str>,
        /// The formatted parameter it was destined for.
        expected: Box<str>,
    },
    /// The command action reported a failure.
    CommandFailed(CommandError),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::UnknownCommand(name) => {
                write!(f, "Could not find the specified command: \"{}\".", name)
            }
            DispatchError::ArityMismatch {
                syntax,
                expected,
                got,
            } => write!(
                f,
                "Invalid number of parameters: {} (expected {}, got {}).",
                syntax, expected, got
            ),
            DispatchError::ConversionFailure { token, expected } => {
                write!(
                    f,
                    "Invalid parameter type: \"{}\". Expected {}.",
                    token, expected
                )
            }
            DispatchError::CommandFailed(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Dispatch one raw input line.
///
/// Runs synchronously within the caller's turn: the matched action completes
/// before this returns. The submission is recorded into history regardless of
/// outcome, and echoed to the output sink when
/// [`ConsoleState::echo_input`] is set.
///
/// Returns `true` only when a known command was resolved, its arity and
/// parameter conversion succeeded and its action reported success; any
/// failure is reported through the error channel and yields `false`.
pub fn dispatch(world: &mut World, raw: &str) -> bool {
    match dispatch_inner(world, raw) {
        Ok(()) => true,
        Err(err) => {
            world.resource_mut::<OutputQueue>().error(err.to_string());
            false
        }
    }
}

fn dispatch_inner(world: &mut World, raw: &str) -> Result<(), DispatchError> {
    let tokens = tokenize(raw);

    if world.resource::<ConsoleState>().echo_input {
        world
            .resource_mut::<OutputQueue>()
            .command(format!("$ {}", raw));
    }

    // Resolve by name or alias; clone the metadata so the table borrow does
    // not outlive this block.
    let meta = world.resource::<CommandTable>().lookup(&tokens[0]).cloned();

    // Record into history even when the command is unknown.
    let resolved = meta
        .as_ref()
        .map(|m| m.name().to_string())
        .unwrap_or_else(|| tokens[0].clone());
    world
        .resource_mut::<ConsoleState>()
        .record_submission(&resolved, raw);

    let Some(meta) = meta else {
        return Err(DispatchError::UnknownCommand(tokens[0].as_str().into()));
    };

    let tokens = reconcile(tokens, meta.params().len());

    // With no parameters supplied, a no-argument action takes precedence.
    if tokens.len() == 1 && meta.has_default() {
        if let Some(Err(err)) = run_default_action(world, meta.name(), |action, world| {
            action(world)
        }) {
            return Err(DispatchError::CommandFailed(err));
        }
        return Ok(());
    }

    if meta.params().len() != tokens.len() - 1 {
        return Err(DispatchError::ArityMismatch {
            syntax: meta.syntax().into(),
            expected: meta.params().len(),
            got: tokens.len() - 1,
        });
    }

    // Convert every parameter before any action runs; a failure here means no
    // partial invocation.
    let mut values = Vec::with_capacity(meta.params().len());
    {
        let converters = world.resource::<TypeConverters>();
        for (spec, token) in meta.params().iter().zip(&tokens[1..]) {
            let mut token = token.as_str();

            // Accept numeric booleans: 0 and 1 read as false and true.
            if *spec.ty() == ParamType::Bool {
                match token.parse::<i64>() {
                    Ok(0) => token = "false",
                    Ok(1) => token = "true",
                    _ => {}
                }
            }

            match converters.convert(token, spec.ty()) {
                Ok(value) => values.push(value),
                Err(_) => {
                    return Err(DispatchError::ConversionFailure {
                        token: token.into(),
                        expected: spec.formatted().into(),
                    });
                }
            }
        }
    }

    invoke(world, meta.name(), &values)
}

fn invoke(world: &mut World, name: &str, values: &[ParamValue]) -> Result<(), DispatchError> {
    if let Some(Err(err)) = run_action(world, name, |action, world| action(values, world)) {
        return Err(DispatchError::CommandFailed(err));
    }
    Ok(())
}
