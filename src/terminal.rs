//! Terminal backend for headless console use.
//!
//! Bridges stdin/stdout to the console messages so the interpreter can be
//! driven without a graphical front end, e.g. on a dedicated server.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use bevy::prelude::*;

use crate::core::{ConsoleInputEvent, ConsoleOutputEvent, OutputLevel};

/// Plugin that adds terminal (stdin/stdout) console support.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        let _handle = spawn_stdin_reader(sender);

        app.insert_resource(StdinReceiver(Mutex::new(receiver)))
            .insert_resource(TerminalConfig::default())
            .add_systems(Update, (read_stdin, write_stdout));
    }
}

/// Configuration for terminal behavior.
#[derive(Resource)]
pub struct TerminalConfig {
    /// Whether to use colored output (ANSI escape codes).
    pub colored: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        // Disabled by default - causes issues on some terminals
        Self { colored: false }
    }
}

#[derive(Resource)]
struct StdinReceiver(Mutex<Receiver<String>>);

fn spawn_stdin_reader(sender: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        let handle = stdin.lock();

        for line in handle.lines().map_while(Result::ok) {
            let text = line.trim().to_string();
            if !text.is_empty() && sender.send(text).is_err() {
                break;
            }
        }
    })
}

fn read_stdin(receiver: Res<StdinReceiver>, mut events: MessageWriter<ConsoleInputEvent>) {
    let Ok(rx) = receiver.0.lock() else { return };
    while let Ok(line) = rx.try_recv() {
        events.write(ConsoleInputEvent::new(line));
    }
}

fn write_stdout(mut events: MessageReader<ConsoleOutputEvent>, config: Res<TerminalConfig>) {
    for event in events.read() {
        if config.colored {
            print_colored(&event.message, event.level);
        } else {
            println!("{}", event.message);
        }
        let _ = io::stdout().flush();
    }
}

fn print_colored(message: &str, level: OutputLevel) {
    let color = match level {
        OutputLevel::Info => "\x1b[0m",
        OutputLevel::Warning => "\x1b[33m",
        OutputLevel::Error => "\x1b[31m",
        OutputLevel::Success => "\x1b[32m",
        OutputLevel::Command => "\x1b[36m",
    };
    println!("{}{}\x1b[0m", color, message);
}
