//! Console messages and the output sink.
//!
//! Messages are the boundary between the core and its collaborators:
//! - Embedding app -> core: [`ConsoleInputEvent`] carries submitted input
//! - Core -> embedding app: [`ConsoleOutputEvent`] carries structured output
//!   and [`ConsoleClearEvent`] requests clearing the visible log
//!
//! The core itself never renders text; dispatch results and command-authored
//! output go through the [`OutputQueue`] resource, which a plugin system
//! drains into [`ConsoleOutputEvent`] writers once per frame.

use bevy::prelude::*;

/// Message sent when input is submitted to the console.
///
/// The console plugin parses and dispatches this input on the next update.
#[derive(Message, Debug, Clone)]
pub struct ConsoleInputEvent {
    /// The raw input string to dispatch.
    pub input: String,
}

impl ConsoleInputEvent {
    /// Create a new input message.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Output channel for a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLevel {
    /// General information (default).
    #[default]
    Info,
    /// Warning.
    Warning,
    /// Error, including all dispatch failures.
    Error,
    /// Successful state change reported by a command.
    Success,
    /// Echo of submitted input.
    Command,
}

/// Message sent when the console produces output to display.
#[derive(Message, Debug, Clone)]
pub struct ConsoleOutputEvent {
    /// The message text.
    pub message: String,
    /// The output channel.
    pub level: OutputLevel,
}

impl ConsoleOutputEvent {
    /// Create a new output message.
    pub fn new(level: OutputLevel, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    /// Create an info message.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(OutputLevel::Info, message)
    }

    /// Create a warning message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(OutputLevel::Warning, message)
    }

    /// Create an error message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(OutputLevel::Error, message)
    }

    /// Create a success message.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(OutputLevel::Success, message)
    }

    /// Create an input-echo message.
    pub fn command(message: impl Into<String>) -> Self {
        Self::new(OutputLevel::Command, message)
    }
}

/// Message requesting the console display to clear its log.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ConsoleClearEvent;

/// Buffered console output, drained to message writers once per frame.
///
/// Dispatch and command actions push here (they run with exclusive `World`
/// access where message writers are unavailable); ordinary systems may also
/// push through `ResMut<OutputQueue>`.
#[derive(Resource, Default)]
pub struct OutputQueue {
    messages: Vec<ConsoleOutputEvent>,
    clear_requested: bool,
}

impl OutputQueue {
    /// Queue an output message.
    pub fn push(&mut self, message: ConsoleOutputEvent) {
        self.messages.push(message);
    }

    /// Queue an info message.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputEvent::info(message));
    }

    /// Queue a warning message.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputEvent::warning(message));
    }

    /// Queue an error message.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputEvent::error(message));
    }

    /// Queue a success message.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputEvent::success(message));
    }

    /// Queue an input-echo message.
    pub fn command(&mut self, message: impl Into<String>) {
        self.push(ConsoleOutputEvent::command(message));
    }

    /// Request that the console display clears its log.
    pub fn request_clear(&mut self) {
        self.clear_requested = true;
    }

    /// Drain all queued messages.
    pub fn drain(&mut self) -> impl Iterator<Item = ConsoleOutputEvent> + '_ {
        self.messages.drain(..)
    }

    /// Take and reset the clear-request flag.
    pub fn take_clear_request(&mut self) -> bool {
        std::mem::take(&mut self.clear_requested)
    }

    /// Check whether any messages are queued.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Peek at the queued messages without draining them.
    pub fn messages(&self) -> &[ConsoleOutputEvent] {
        &self.messages
    }
}

/// Plugin that registers all console messages.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<ConsoleClearEvent>();
    }
}
