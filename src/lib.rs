//! An embeddable developer console command engine for Bevy.
//!
//! bevy_devconsole provides the interpreter half of an in-game console:
//!
//! - **Command**: Named actions with typed parameters, aliases and help text
//! - **CommandTable**: Registry with collision-checked names and aliases
//! - **TypeConverters**: Extensible string-to-value conversion registry
//! - **ConsoleState**: Command history and live name suggestions
//! - **dispatch**: Tokenize, resolve, convert, invoke - synchronously
//!
//! Rendering is deliberately not included; output flows through structured
//! [`ConsoleOutputEvent`] messages for whatever front end the application
//! brings.
//!
//! # Features
//!
//! - `terminal`: stdin/stdout backend for headless builds and dedicated servers
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_devconsole::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ConsolePlugin)
//!         .add_systems(Startup, setup_console)
//!         .run();
//! }
//!
//! fn setup_console(mut console: Console) {
//!     console.register_command(
//!         Command::new("gravity")
//!             .help("Query or set world gravity")
//!             .param(ParamSpec::new("value", ParamType::Float))
//!             .action(|values, world| {
//!                 let value = values[0].as_float().unwrap_or_default();
//!                 world.resource_mut::<OutputQueue>()
//!                     .success(format!("Gravity set to {}.", value));
//!                 Ok(())
//!             })
//!             .default_action(|world| {
//!                 world.resource_mut::<OutputQueue>().info("Gravity: 9.81.");
//!                 Ok(())
//!             }),
//!     );
//! }
//! ```

use bevy::prelude::*;

// Core module (always available, zero optional deps)
pub mod core;

// Re-export core types at crate root for convenience
pub use core::{
    Command, CommandAction, CommandActions, CommandError, CommandMeta, CommandResult,
    CommandTable, Console, ConsoleClearEvent, ConsoleEventsPlugin, ConsoleInputEvent,
    ConsoleOutputEvent, ConsoleRef, ConsoleState, ConvertError, DefaultAction, DispatchError,
    EnumSpec, HISTORY_CAPACITY, HistoryBuffer, OutputLevel, OutputQueue, PERMANENT_COMMANDS,
    ParamSpec, ParamType, ParamValue, Suggestions, TypeConverters, dispatch, reconcile, tokenize,
};

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

#[cfg(feature = "terminal")]
pub use terminal::{TerminalConfig, TerminalPlugin};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::ConsolePlugin;
    pub use crate::core::{
        Command, CommandError, CommandResult, Console, ConsoleClearEvent, ConsoleInputEvent,
        ConsoleOutputEvent, ConsoleRef, ConsoleState, EnumSpec, OutputLevel, OutputQueue,
        ParamSpec, ParamType, ParamValue, dispatch,
    };
}

/// Main console plugin.
///
/// Registers the console resources and messages, seeds the built-in commands
/// at startup and runs the input pipeline every update:
/// 1. `queue_console_input`: read input messages, queue raw lines
/// 2. `run_pending_input`: dispatch each line with exclusive `World` access
/// 3. `flush_console_output`: forward buffered output to message writers
#[derive(Default)]
pub struct ConsolePlugin;

impl Plugin for ConsolePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CommandTable>()
            .init_resource::<CommandActions>()
            .init_resource::<TypeConverters>()
            .init_resource::<ConsoleState>()
            .init_resource::<OutputQueue>()
            .init_resource::<PendingInput>()
            .add_plugins(core::ConsoleEventsPlugin);

        app.add_systems(Startup, register_builtin_commands);

        app.add_systems(
            Update,
            (queue_console_input, run_pending_input, flush_console_output).chain(),
        );

        #[cfg(feature = "terminal")]
        app.add_plugins(terminal::TerminalPlugin);
    }
}

/// Raw input lines awaiting dispatch.
#[derive(Resource, Default)]
struct PendingInput(Vec<String>);

/// System that queues submitted input for dispatch.
fn queue_console_input(
    mut input_events: MessageReader<ConsoleInputEvent>,
    mut pending: ResMut<PendingInput>,
) {
    for event in input_events.read() {
        pending.0.push(event.input.clone());
    }
}

/// Exclusive system that dispatches queued input.
fn run_pending_input(world: &mut World) {
    let queue = std::mem::take(&mut world.resource_mut::<PendingInput>().0);
    for raw in queue {
        // Blank submissions are dropped before they reach the interpreter.
        if raw.trim().is_empty() {
            continue;
        }
        dispatch(world, &raw);
    }
}

/// System that forwards buffered output to message writers.
fn flush_console_output(
    mut output: ResMut<OutputQueue>,
    mut output_events: MessageWriter<ConsoleOutputEvent>,
    mut clear_events: MessageWriter<ConsoleClearEvent>,
) {
    for message in output.drain() {
        output_events.write(message);
    }
    if output.take_clear_request() {
        clear_events.write(ConsoleClearEvent);
    }
}

/// Format a `SystemTime` as an HH:MM:SS string.
fn format_time(t: std::time::SystemTime) -> String {
    let duration = t
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}

/// Register the built-in console commands.
fn register_builtin_commands(mut console: Console) {
    // devconsole - instructions on how to use the console
    console.register_command(
        Command::new("devconsole")
            .help("Display instructions on how to use the developer console")
            .default_action(|world| {
                let mut output = world.resource_mut::<OutputQueue>();
                output.info(format!(
                    "- Developer console (v{}) -",
                    env!("CARGO_PKG_VERSION")
                ));
                output.info("Use commands to display a list of available commands.");
                output.info("Use help <commandName> to display information about a specific command.");
                output.info("Use UP / DOWN to cycle through command history or suggested commands.");
                output.info("Use TAB to autocomplete a suggested command.");
                Ok(())
            }),
    );

    // print - write a message to the console
    console.register_command(
        Command::new("print")
            .alias("echo")
            .help("Display a message in the developer console")
            .param(ParamSpec::new("message", ParamType::String).help("Message to display"))
            .action(|values, world| {
                let message = values[0].as_str().unwrap_or_default().to_string();
                world.resource_mut::<OutputQueue>().info(message);
                Ok(())
            }),
    );

    // clear - clear the console log
    console.register_command(
        Command::new("clear")
            .help("Clear the developer console")
            .default_action(|world| {
                world.resource_mut::<OutputQueue>().request_clear();
                Ok(())
            }),
    );

    // reset - reset the console session state
    console.register_command(
        Command::new("reset")
            .help("Reset the console session state, clearing history and input")
            .default_action(|world| {
                world.resource_mut::<ConsoleState>().reset();
                world
                    .resource_mut::<OutputQueue>()
                    .success("Console session state reset.");
                Ok(())
            }),
    );

    // help - usage summary, or details about one command
    console.register_command(
        Command::new("help")
            .alias("info")
            .help("Display information about a specified command")
            .param(
                ParamSpec::new("commandName", ParamType::String)
                    .help("Name of the command to get information about"),
            )
            .action(|values, world| {
                let name = values[0].as_str().unwrap_or_default().to_string();
                let lines = {
                    let table = world.resource::<CommandTable>();
                    table.lookup(&name).map(describe_command)
                };

                match lines {
                    Some(lines) => {
                        let mut output = world.resource_mut::<OutputQueue>();
                        for line in lines {
                            output.info(line);
                        }
                        Ok(())
                    }
                    None => Err(CommandError::new(format!(
                        "Unknown command name specified: \"{}\". Use commands for a list of all commands.",
                        name
                    ))),
                }
            })
            .default_action(|world| {
                let mut output = world.resource_mut::<OutputQueue>();
                output.info("Use help <commandName> to display information about a specific command.");
                output.info("Use commands to display a list of available commands.");
                Ok(())
            }),
    );

    // commands - sorted list of everything registered
    console.register_command(
        Command::new("commands")
            .help("Display a sorted list of all available commands")
            .default_action(|world| {
                let mut names: Vec<&str> = world.resource::<CommandTable>().names().collect();
                names.sort_unstable();
                let listing = names.join(", ");

                let mut output = world.resource_mut::<OutputQueue>();
                output.info("- Commands -");
                output.info(listing);
                Ok(())
            }),
    );

    // consoleversion - crate version
    console.register_command(
        Command::new("consoleversion")
            .help("Display the developer console version")
            .default_action(|world| {
                world.resource_mut::<OutputQueue>().info(format!(
                    "Developer console version: {}.",
                    env!("CARGO_PKG_VERSION")
                ));
                Ok(())
            }),
    );

    // quit - exit the application immediately
    console.register_command(
        Command::new("quit")
            .alias("exit")
            .help("Exit the application")
            .default_action(|_world| std::process::exit(0)),
    );

    // path - executable location
    console.register_command(
        Command::new("path")
            .help("Display the path to the application executable")
            .default_action(|world| {
                let path = std::env::current_exe()
                    .map_err(|e| CommandError::new(format!("Could not resolve the application path: {}.", e)))?;
                world
                    .resource_mut::<OutputQueue>()
                    .info(format!("Application path: {}.", path.display()));
                Ok(())
            }),
    );

    // time - current clock time
    console.register_command(
        Command::new("time")
            .help("Display the current time")
            .default_action(|world| {
                let now = format_time(std::time::SystemTime::now());
                world
                    .resource_mut::<OutputQueue>()
                    .info(format!("Current time: {}.", now));
                Ok(())
            }),
    );

    // echoinput - query or set whether submitted input is echoed
    console.register_command(
        Command::new("echoinput")
            .help("Query, enable or disable echoing submitted input in the console")
            .param(
                ParamSpec::new("enabled", ParamType::Bool)
                    .help("Whether submitted input should be echoed"),
            )
            .action(|values, world| {
                let enabled = values[0].as_bool().unwrap_or_default();
                world.resource_mut::<ConsoleState>().echo_input = enabled;
                world.resource_mut::<OutputQueue>().success(format!(
                    "{} echoing submitted input.",
                    if enabled { "Enabled" } else { "Disabled" }
                ));
                Ok(())
            })
            .default_action(|world| {
                let enabled = world.resource::<ConsoleState>().echo_input;
                world
                    .resource_mut::<OutputQueue>()
                    .info(format!("Echo input: {}.", enabled));
                Ok(())
            }),
    );
}

/// Build the help listing for one command.
fn describe_command(meta: &CommandMeta) -> Vec<String> {
    let mut lines = vec![format!("- {} -", meta.name())];

    if !meta.help_text().is_empty() {
        lines.push(format!("{}.", meta.help_text()));
    }
    if !meta.aliases().is_empty() {
        let aliases: Vec<&str> = meta.aliases().iter().map(|a| &**a).collect();
        lines.push(format!("Aliases: {}.", aliases.join(", ")));
    }
    if !meta.params().is_empty() {
        lines.push(format!("Syntax: {}.", meta.syntax()));
        for param in meta.params() {
            if !param.help_text().is_empty() {
                lines.push(format!(" {}: {}.", param.name(), param.help_text()));
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tracks test command invocations.
    #[derive(Resource, Default)]
    struct TestCommandExecuted {
        count: usize,
        last_values: Vec<String>,
    }

    /// Captures everything the console emits.
    #[derive(Resource, Default)]
    struct CapturedOutput(Vec<ConsoleOutputEvent>);

    fn capture_output(
        mut reader: MessageReader<ConsoleOutputEvent>,
        mut captured: ResMut<CapturedOutput>,
    ) {
        for event in reader.read() {
            captured.0.push(event.clone());
        }
    }

    /// Build the test app. Startup has not run yet; tests add their own
    /// startup systems first and then call `app.update()` once.
    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ConsolePlugin);
        app.init_resource::<TestCommandExecuted>();
        app.init_resource::<CapturedOutput>();
        app.add_systems(Update, capture_output.after(flush_console_output));
        app
    }

    /// Dispatch directly against the app world, returning the result.
    fn run(app: &mut App, input: &str) -> bool {
        let ok = dispatch(app.world_mut(), input);
        // Flush output to the capture system.
        app.update();
        ok
    }

    fn captured_errors(app: &App) -> Vec<String> {
        app.world()
            .resource::<CapturedOutput>()
            .0
            .iter()
            .filter(|m| m.level == OutputLevel::Error)
            .map(|m| m.message.clone())
            .collect()
    }

    /// Queue raw input through the message pipeline.
    fn submit(app: &mut App, input: &str) {
        app.world_mut()
            .resource_mut::<Messages<ConsoleInputEvent>>()
            .write(ConsoleInputEvent::new(input));
    }

    #[test]
    fn test_command_execution_via_input_event() {
        let mut app = test_app();

        app.add_systems(Startup, |mut console: Console| {
            console.register_command(
                Command::new("test_cmd")
                    .param(ParamSpec::new("first", ParamType::String))
                    .param(ParamSpec::new("rest", ParamType::String))
                    .action(|values, world| {
                        let mut tracker = world.resource_mut::<TestCommandExecuted>();
                        tracker.count += 1;
                        tracker.last_values = values
                            .iter()
                            .map(|v| v.as_str().unwrap_or_default().to_string())
                            .collect();
                        Ok(())
                    }),
            );
        });
        app.update();

        submit(&mut app, "test_cmd arg1 arg2");
        app.update();

        let tracker = app.world().resource::<TestCommandExecuted>();
        assert_eq!(tracker.count, 1, "Command should have been executed once");
        assert_eq!(tracker.last_values, vec!["arg1", "arg2"]);
    }

    #[test]
    fn test_blank_input_is_dropped() {
        let mut app = test_app();
        app.update();

        submit(&mut app, "   ");
        app.update();

        assert!(app.world().resource::<ConsoleState>().history().is_empty());
        assert!(captured_errors(&app).is_empty());
    }

    #[test]
    fn test_print_greedy_tail() {
        let mut app = test_app();
        app.update();

        assert!(run(&mut app, "print hello world"));
        assert!(run(&mut app, r#"print "hello world""#));

        let infos: Vec<String> = app
            .world()
            .resource::<CapturedOutput>()
            .0
            .iter()
            .filter(|m| m.level == OutputLevel::Info)
            .map(|m| m.message.clone())
            .collect();
        assert_eq!(infos, vec!["hello world", "hello world"]);
    }

    #[test]
    fn test_print_via_alias() {
        let mut app = test_app();
        app.update();

        assert!(run(&mut app, "echo hi"));
        // Aliases are matched exactly; an uppercased alias is unknown.
        assert!(!run(&mut app, "ECHO hi"));
    }

    #[test]
    fn test_help_dual_form() {
        let mut app = test_app();
        app.update();

        assert!(run(&mut app, "help"));
        assert!(run(&mut app, "help print"));

        assert!(!run(&mut app, "help bogus"));
        let errors = captured_errors(&app);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Unknown command name"));
    }

    #[test]
    fn test_unknown_command_reports_and_returns_false() {
        let mut app = test_app();
        app.update();

        assert!(!run(&mut app, "frobnicate 1 2 3"));
        let errors = captured_errors(&app);
        assert!(errors[0].contains("Could not find the specified command"));
        assert!(errors[0].contains("frobnicate"));
    }

    #[test]
    fn test_clear_command_emits_clear_event() {
        let mut app = test_app();
        app.update();

        assert!(run(&mut app, "clear"));

        let clear_events = app
            .world()
            .resource::<Messages<ConsoleClearEvent>>();
        assert!(!clear_events.is_empty());
    }

    #[test]
    fn test_permanent_command_cannot_be_unregistered() {
        let mut app = test_app();
        app.update();

        let removed = {
            let world = app.world_mut();
            let mut table = world.remove_resource::<CommandTable>().unwrap();
            let mut actions = world.remove_resource::<CommandActions>().unwrap();
            let removed = crate::core::unregister(&mut table, &mut actions, "clear");
            world.insert_resource(table);
            world.insert_resource(actions);
            removed
        };
        assert!(!removed);

        // Still resolvable and dispatchable afterward.
        assert!(run(&mut app, "clear"));
    }

    #[test]
    fn test_unregister_ordinary_command() {
        let mut app = test_app();

        app.add_systems(Startup, |mut console: Console| {
            console.register_command(Command::new("greet").default_action(|_| Ok(())));
        });
        app.update();

        let world = app.world_mut();
        let mut table = world.remove_resource::<CommandTable>().unwrap();
        let mut actions = world.remove_resource::<CommandActions>().unwrap();
        assert!(crate::core::unregister(&mut table, &mut actions, "greet"));
        // Removing an unknown command is a successful no-op.
        assert!(crate::core::unregister(&mut table, &mut actions, "greet"));
        world.insert_resource(table);
        world.insert_resource(actions);

        assert!(!run(&mut app, "greet"));
    }

    #[test]
    fn test_alias_conflict_rejected_and_table_unchanged() {
        let mut app = test_app();

        let conflict_check = |mut console: Console| {
            let before = console.len();
            // "wipe" aliases the existing permanent command "clear".
            let accepted = console.register_command(
                Command::new("wipe").alias("clear").default_action(|_| Ok(())),
            );
            assert!(!accepted);
            assert_eq!(console.len(), before);
            assert!(console.lookup("wipe").is_none());
        };
        app.add_systems(Startup, conflict_check.after(register_builtin_commands));
        app.update();
    }

    #[test]
    fn test_suggestions_for_c_prefix() {
        let mut app = test_app();

        app.add_systems(Update, |mut console: Console| {
            if console.input().is_empty() {
                console.on_input_changed("c");
                let candidates = console.suggestions().candidates();
                assert_eq!(candidates, &["clear", "commands", "consoleversion"]);
            }
        });
        app.update();
    }

    #[test]
    fn test_suggestion_cycle_and_accept() {
        let mut app = test_app();

        app.add_systems(Update, |mut console: Console| {
            if !console.input().is_empty() {
                return;
            }
            console.on_input_changed("Co");
            assert_eq!(console.suggestions().candidates(), &["Commands", "Consoleversion"]);

            console.cycle_suggestions(1);
            assert!(console.accept_suggestion());
            assert_eq!(console.input(), "Consoleversion");
        });
        app.update();
    }

    #[test]
    fn test_history_navigation_via_console_param() {
        let mut app = test_app();
        app.update();

        run(&mut app, "print one");
        run(&mut app, "print two");

        app.add_systems(Update, |mut console: Console| {
            if console.history().len() != 2 {
                return;
            }
            assert_eq!(console.cycle_history(1), Some("print two"));
            assert_eq!(console.cycle_history(1), Some("print one"));
            // Past the oldest entry nothing changes.
            assert_eq!(console.cycle_history(1), None);
            assert_eq!(console.input(), "print one");
        });
        app.update();
    }

    #[test]
    fn test_echoinput_toggle_with_numeric_bool() {
        let mut app = test_app();
        app.update();

        assert!(run(&mut app, "echoinput 0"));
        assert!(!app.world().resource::<ConsoleState>().echo_input);

        // With echo disabled, no Command-level output is produced.
        let before = app
            .world()
            .resource::<CapturedOutput>()
            .0
            .iter()
            .filter(|m| m.level == OutputLevel::Command)
            .count();
        run(&mut app, "echoinput true");
        let after = app
            .world()
            .resource::<CapturedOutput>()
            .0
            .iter()
            .filter(|m| m.level == OutputLevel::Command)
            .count();
        assert_eq!(before, after);
        assert!(app.world().resource::<ConsoleState>().echo_input);

        assert!(!run(&mut app, "echoinput maybe"));
        assert!(captured_errors(&app)[0].contains("<enabled: bool>"));
    }

    #[test]
    fn test_custom_type_converter_end_to_end() {
        let mut app = test_app();

        app.add_systems(Startup, |mut console: Console| {
            console.register_type_converter(ParamType::Custom("vec2"), |s| {
                let (x, y) = s.split_once(',')?;
                let pair: (f32, f32) = (x.parse().ok()?, y.parse().ok()?);
                Some(ParamValue::Custom(std::sync::Arc::new(pair)))
            });
            console.register_command(
                Command::new("warp")
                    .param(ParamSpec::new("to", ParamType::Custom("vec2")))
                    .action(|values, world| {
                        let to = values[0]
                            .downcast_ref::<(f32, f32)>()
                            .copied()
                            .ok_or_else(|| CommandError::new("Bad destination."))?;
                        let mut tracker = world.resource_mut::<TestCommandExecuted>();
                        tracker.count += 1;
                        tracker.last_values = vec![format!("{},{}", to.0, to.1)];
                        Ok(())
                    }),
            );
        });
        app.update();

        assert!(run(&mut app, "warp 3,4"));
        assert_eq!(
            app.world().resource::<TestCommandExecuted>().last_values,
            vec!["3,4"]
        );
        assert!(!run(&mut app, "warp nowhere"));
    }

    #[test]
    fn test_enum_parameter_end_to_end() {
        let mut app = test_app();

        app.add_systems(Startup, |mut console: Console| {
            console.register_enum(
                EnumSpec::new("weather")
                    .variant("clear", 0)
                    .variant("rain", 1)
                    .variant("storm", 2),
            );
            console.register_command(
                Command::new("weather")
                    .param(ParamSpec::new("kind", ParamType::Enum("weather")))
                    .action(|values, world| {
                        let mut tracker = world.resource_mut::<TestCommandExecuted>();
                        tracker.count += 1;
                        tracker.last_values =
                            vec![values[0].as_enum().unwrap_or_default().to_string()];
                        Ok(())
                    }),
            );
        });
        app.update();

        assert!(run(&mut app, "weather Storm"));
        assert_eq!(
            app.world().resource::<TestCommandExecuted>().last_values,
            vec!["2"]
        );
        assert!(run(&mut app, "weather 1"));
        assert_eq!(
            app.world().resource::<TestCommandExecuted>().last_values,
            vec!["1"]
        );
        assert!(!run(&mut app, "weather sleet"));
    }

    #[test]
    fn test_reset_clears_session() {
        let mut app = test_app();
        app.update();

        run(&mut app, "print one");
        run(&mut app, "print two");
        assert_eq!(app.world().resource::<ConsoleState>().history().len(), 2);

        assert!(run(&mut app, "reset"));
        assert!(app.world().resource::<ConsoleState>().history().is_empty());
    }

    #[test]
    fn test_commands_listing_is_sorted() {
        let mut app = test_app();
        app.update();

        assert!(run(&mut app, "commands"));
        let listing = app
            .world()
            .resource::<CapturedOutput>()
            .0
            .iter()
            .filter(|m| m.level == OutputLevel::Info)
            .map(|m| m.message.clone())
            .find(|m| m.contains("clear"))
            .expect("commands output missing");

        let clear_pos = listing.find("clear").unwrap();
        let print_pos = listing.find("print").unwrap();
        assert!(clear_pos < print_pos);
    }
}
