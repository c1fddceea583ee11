//! Interactive terminal console example.
//!
//! Runs the console against stdin/stdout, the way a dedicated server would.
//! Type `devconsole` for instructions, `commands` for a list, `quit` to exit.
//!
//! Run with: `cargo run --example terminal --features terminal`

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy_devconsole::prelude::*;
use bevy_devconsole::terminal::TerminalConfig;

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(50))),
        )
        .add_plugins(ConsolePlugin)
        .insert_resource(TerminalConfig { colored: true })
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut console: Console) {
    console.register_command(
        Command::new("add")
            .help("Add two numbers")
            .param(ParamSpec::new("a", ParamType::Float))
            .param(ParamSpec::new("b", ParamType::Float))
            .action(|values, world| {
                let a = values[0].as_float().unwrap_or_default();
                let b = values[1].as_float().unwrap_or_default();
                world
                    .resource_mut::<OutputQueue>()
                    .info(format!("{} + {} = {}", a, b, a + b));
                Ok(())
            }),
    );

    println!("Developer console ready. Type 'devconsole' for instructions.");
}
