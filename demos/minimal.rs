//! Minimal headless console example.
//!
//! Demonstrates driving the console programmatically without any UI:
//! registering a command with typed parameters, submitting input through
//! messages and printing the structured output.
//!
//! Run with: `cargo run --example minimal`

use bevy::prelude::*;
use bevy_devconsole::prelude::*;
// Disambiguate from `bevy::prelude::Command` (an ECS trait) which the glob
// imports also bring into scope.
use bevy_devconsole::prelude::Command;

fn main() {
    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(ConsolePlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, process_outputs)
        .add_systems(Update, send_test_commands.run_if(run_once))
        .run();
}

fn setup(mut console: Console) {
    console.register_command(
        Command::new("greet")
            .help("Greet someone")
            .param(ParamSpec::new("name", ParamType::String).help("Who to greet"))
            .action(|values, world| {
                let name = values[0].as_str().unwrap_or("World").to_string();
                world
                    .resource_mut::<OutputQueue>()
                    .success(format!("Hello, {}!", name));
                Ok(())
            })
            .default_action(|world| {
                world.resource_mut::<OutputQueue>().info("Hello, World!");
                Ok(())
            }),
    );

    println!("Console initialized with {} commands.", console.len());
}

/// Send some test commands programmatically.
fn send_test_commands(mut events: MessageWriter<ConsoleInputEvent>) {
    println!("\n--- Sending test commands ---");

    // Query form (no parameters)
    events.write(ConsoleInputEvent::new("greet"));

    // Parameterized form; trailing words aggregate into the last parameter
    events.write(ConsoleInputEvent::new("greet Dear Developer"));

    // Built-ins
    events.write(ConsoleInputEvent::new("help greet"));
    events.write(ConsoleInputEvent::new("commands"));

    // An unknown command reports an error but never panics
    events.write(ConsoleInputEvent::new("frobnicate"));
}

/// Print console output messages.
fn process_outputs(mut events: MessageReader<ConsoleOutputEvent>) {
    for event in events.read() {
        let prefix = match event.level {
            OutputLevel::Info => "[INFO]",
            OutputLevel::Warning => "[WARN]",
            OutputLevel::Error => "[ERROR]",
            OutputLevel::Success => "[OK]",
            OutputLevel::Command => "[$]",
        };
        println!("{} {}", prefix, event.message);
    }
}
