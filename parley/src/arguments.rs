use std::path::Path;

use crate::{
    command::Context,
    errors::ParseError,
    optional::Optional,
    parser::{Outcome, Parser},
    positional::Positional,
};

/// Helper type for loading arguments from the environment.
///
/// This type exists for roughly two purposes: to provide a convenient owned
/// container for the arguments retrieved from [`std::env`], and to be an
/// object that a [`Parser`] can borrow tokens from. Arguments that aren't
/// valid UTF-8 are converted lossily.
#[derive(Debug, Clone)]
pub struct LoadedArguments {
    arguments: Vec<String>,
}

impl LoadedArguments {
    pub fn from_env() -> Self {
        Self::new(std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// Load an explicit argument list. The first item is the program name.
    pub fn new(arguments: impl IntoIterator<Item = String>) -> Self {
        Self {
            arguments: arguments.into_iter().collect(),
        }
    }

    /// The program name, as given
    pub fn argv0(&self) -> &str {
        self.arguments.first().map_or("", String::as_str)
    }

    /// Every argument after the program name
    pub fn tokens(&self) -> &[String] {
        self.arguments.get(1..).unwrap_or(&[])
    }

    /// A [`Context`] named after the final component of the program name
    pub fn context(&self, description: impl Into<String>) -> Context {
        let argv0 = self.argv0();
        let name = Path::new(argv0)
            .file_name()
            .map_or_else(|| argv0.into(), |name| name.to_string_lossy());

        Context::new(name, description, self.tokens().iter().cloned())
    }

    pub fn parse<'a>(
        &self,
        positional: &mut Positional<'a>,
        optional: &mut Optional<'a>,
    ) -> Result<Outcome, ParseError> {
        Parser::new(positional, optional).parse(self.tokens())
    }
}
