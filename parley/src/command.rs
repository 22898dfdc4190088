/*!
Commands and programs: the layer between the parser and `main`.

A [`Context`] carries a command's name, description, and arguments, and
turns parse failures and help requests into ready-to-print messages. A
[`Program`] dispatches its first argument to one of several named commands,
each getting a sub-context of its own. [`run`] executes a command and maps
the outcome to an exit code.
 */

use std::{collections::BTreeMap, error::Error as StdError, process::ExitCode};

use indent_write::fmt::IndentWriter;
use log::{debug, error};
use thiserror::Error;

use crate::{
    errors::ParseError,
    help::{self, HelpLayout},
    optional::Optional,
    parser::{Outcome, Parser},
    positional::Positional,
};

/// Everything that can end a command early.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    /// Help was requested. This isn't a failure: the message should be
    /// printed to standard output and the process should exit successfully.
    #[error("{0}")]
    Help(String),

    /// The command line was malformed. Displays as the parse error followed
    /// by the command's usage line.
    #[error("{source}\n{usage}")]
    Parse {
        #[source]
        source: ParseError,
        usage: String,
    },

    #[error("{command} expected a command.\n\n{commands}")]
    MissingCommand { command: String, commands: String },

    #[error("unknown command name `{0}`")]
    UnknownCommand(String),

    /// The command itself failed
    #[error("{command}: {source}")]
    Failed {
        command: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl CommandError {
    #[inline]
    #[must_use]
    pub fn is_help(&self) -> bool {
        matches!(self, Self::Help(_))
    }
}

/// A runnable command
pub type Command = Box<dyn Fn(Context) -> Result<(), CommandError>>;

/// The name, description, and arguments given to a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub name: String,
    pub description: String,
    pub args: Vec<String>,
}

impl Context {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /**
    Parse this context's arguments into the given declarations.

    A help request comes back as [`CommandError::Help`], holding the usage
    line and the help tables; a parse failure comes back as
    [`CommandError::Parse`], holding the error and the usage line.
    */
    pub fn parse<'a>(
        &self,
        positional: &mut Positional<'a>,
        optional: &mut Optional<'a>,
    ) -> Result<(), CommandError> {
        let outcome = Parser::new(positional, optional).parse(&self.args);
        let layout = HelpLayout::default();
        let usage = || help::synopsis(&self.name, positional, optional, &layout);

        match outcome {
            Ok(Outcome::Complete) => Ok(()),
            Ok(Outcome::HelpRequested) => {
                let help = help::help(positional, optional).with_layout(layout);
                Err(CommandError::Help(format!("{}\n{help}", usage())))
            }
            Err(source) => {
                debug!(command = self.name, error:% = source; "parse failed");
                Err(CommandError::Parse {
                    source,
                    usage: usage(),
                })
            }
        }
    }

    /// Attribute a failure to this command
    pub fn raise(&self, error: impl Into<Box<dyn StdError + Send + Sync>>) -> CommandError {
        CommandError::Failed {
            command: self.name.clone(),
            source: error.into(),
        }
    }
}

/// A set of named commands, dispatched by the first argument.
#[derive(Default)]
pub struct Program {
    commands: BTreeMap<String, (String, Command)>,
}

impl Program {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. A later command with the same name replaces an earlier
    /// one.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        command: impl Fn(Context) -> Result<(), CommandError> + 'static,
    ) {
        self.commands
            .insert(name.into(), (description.into(), Box::new(command)));
    }

    /// The `available commands:` table, sorted by name
    #[must_use]
    pub fn list_commands(&self) -> String {
        let layout = HelpLayout::default();
        let mut out = String::from("available commands:\n");

        {
            let mut out = IndentWriter::new("  ", &mut out);

            self.commands
                .iter()
                .try_for_each(|(name, (description, _))| {
                    help::row(&mut out, name, description, &layout)
                })
                .expect("Writing to String buffer is infallible");
        }

        // Every row ends with a newline; the table itself doesn't
        out.truncate(out.trim_end().len());
        out
    }

    /// Route `context` to the command named by its first argument.
    pub fn dispatch(&self, context: Context) -> Result<(), CommandError> {
        let Some((head, tail)) = context.args.split_first() else {
            return Err(CommandError::MissingCommand {
                command: context.name,
                commands: self.list_commands(),
            });
        };

        if head.starts_with("-h") || head == "--help" {
            return Err(CommandError::Help(format!(
                "{}: {}\n\n{}",
                context.name,
                context.description,
                self.list_commands()
            )));
        }

        let (description, command) = self
            .commands
            .get(head)
            .ok_or_else(|| CommandError::UnknownCommand(head.clone()))?;

        debug!(command = head; "dispatching");

        command(Context::new(
            format!("{} {head}", context.name),
            description.as_str(),
            tail.iter().cloned(),
        ))
    }

    /// Turn the whole program into a single command
    #[must_use]
    pub fn into_command(self) -> Command {
        Box::new(move |context| self.dispatch(context))
    }
}

/**
Run a command and map its outcome to an exit code: help goes to standard
output with a successful exit, anything else goes to standard error with a
failing one.
*/
pub fn run(context: Context, command: impl FnOnce(Context) -> Result<(), CommandError>) -> ExitCode {
    ExitCode::from(report(command(context)))
}

fn report(result: Result<(), CommandError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(CommandError::Help(text)) => {
            println!("{text}");
            0
        }
        Err(err) => {
            error!(error:% = err; "command failed");
            eprintln!("{err}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    fn greeter(context: Context) -> Result<(), CommandError> {
        let (mut loud, mut name) = (false, String::new());

        {
            let mut opt = Optional::new();
            opt.switch('l', "loud", &mut loud, "shout the greeting");

            let mut pos = Positional::new();
            pos.string("name", &mut name, "who to greet");

            context.parse(&mut pos, &mut opt)?;
        }

        match name.as_str() {
            "nobody" => Err(context.raise("nobody to greet")),
            _ => Ok(()),
        }
    }

    #[test]
    fn help_request_carries_usage_and_help() {
        let context = Context::new("greet", "say hello", ["-h"]);
        let error = greeter(context).unwrap_err();

        let CommandError::Help(text) = error else {
            panic!("expected a help request, got {error:?}");
        };

        assert!(text.starts_with("usage: greet [-h | --help] [<args>] <name>\n"));
        assert!(text.contains("positional arguments:"));
        assert!(text.contains("-l, --loud"));
    }

    #[test]
    fn parse_failure_carries_usage() {
        let error = greeter(Context::new("greet", "say hello", ["--bogus"])).unwrap_err();

        assert!(!error.is_help());
        assert_eq!(
            error.to_string(),
            "unknown flag `--bogus`\nusage: greet [-h | --help] [<args>] <name>"
        );
    }

    #[test]
    fn raise_prefixes_the_command_name() {
        let error = greeter(Context::new("greet", "say hello", ["nobody"])).unwrap_err();
        assert_eq!(error.to_string(), "greet: nobody to greet");
    }

    #[test]
    fn program_dispatches_by_name() {
        let seen = Rc::new(RefCell::new(None));

        let mut program = Program::new();
        program.add("greet", "say hello", greeter);
        program.add("record", "remember the context", {
            let seen = Rc::clone(&seen);
            move |context: Context| {
                *seen.borrow_mut() = Some(context);
                Ok(())
            }
        });

        program
            .dispatch(Context::new("tool", "a tool", ["record", "a", "-b"]))
            .unwrap();

        assert_eq!(
            seen.borrow().as_ref(),
            Some(&Context::new("tool record", "remember the context", ["a", "-b"]))
        );
    }

    #[test]
    fn program_errors() {
        let mut program = Program::new();
        program.add("greet", "say hello", greeter);

        let error = program
            .dispatch(Context::new("tool", "a tool", Vec::<String>::new()))
            .unwrap_err();
        assert!(matches!(error, CommandError::MissingCommand { .. }));

        let error = program
            .dispatch(Context::new("tool", "a tool", ["frobnicate"]))
            .unwrap_err();
        assert_eq!(error.to_string(), "unknown command name `frobnicate`");

        let error = program
            .dispatch(Context::new("tool", "a tool", ["--help"]))
            .unwrap_err();
        assert!(error.is_help());
    }

    #[test]
    fn command_list() {
        let mut program = Program::new();
        program.add("zip", "compress things", |_| Ok(()));
        program.add("add", "add things", |_| Ok(()));

        assert_eq!(
            program.list_commands(),
            concat!(
                "available commands:\n",
                "  add                   add things\n",
                "  zip                   compress things",
            )
        );
    }

    #[test]
    fn outcomes_map_to_exit_statuses() {
        let ok = report(greeter(Context::new("greet", "", ["alice"])));
        assert_eq!(ok, 0);

        let help = report(greeter(Context::new("greet", "", ["--help"])));
        assert_eq!(help, 0);

        let failed = report(greeter(Context::new("greet", "", Vec::<String>::new())));
        assert_eq!(failed, 1);
    }
}
