//! Core console types.
//!
//! The fundamental building blocks:
//! - [`Command`] - command definitions with typed parameters and actions
//! - [`CommandTable`] / [`CommandActions`] - registry split into metadata and actions
//! - [`TypeConverters`] - parameter type registry with built-in and custom converters
//! - [`tokenize`] / [`reconcile`] - input tokenization and arity reconciliation
//! - [`dispatch`] - the input dispatch state machine
//! - [`ConsoleState`] - history, suggestions and the input buffer
//! - [`Console`] - unified system parameter for convenient access
//! - Messages for communication with the embedding application

mod command;
mod console;
mod convert;
mod dispatch;
mod events;
mod history;
mod state;
mod suggest;
mod table;
mod tokenizer;

pub use command::{
    ActionSet, Command, CommandAction, CommandError, CommandMeta, CommandResult, DefaultAction,
    ParamSpec,
};
pub use console::{Console, ConsoleRef};
pub use convert::{ConvertError, ConvertFn, EnumSpec, ParamType, ParamValue, TypeConverters};
pub use dispatch::{DispatchError, dispatch};
pub use events::{
    ConsoleClearEvent, ConsoleEventsPlugin, ConsoleInputEvent, ConsoleOutputEvent, OutputLevel,
    OutputQueue,
};
pub use history::{HISTORY_CAPACITY, HistoryBuffer, HistoryCycle};
pub use state::ConsoleState;
pub use suggest::Suggestions;
pub use table::{CommandActions, CommandTable, PERMANENT_COMMANDS, register, unregister};
pub use tokenizer::{reconcile, tokenize};
