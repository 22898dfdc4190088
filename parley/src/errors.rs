/*!
Error types for everything that can go wrong while parsing a command line.

Registration mistakes (duplicate names and the like) are programming errors
and panic at registration time; they never show up here.
 */

use std::{
    fmt, io,
    num::{ParseFloatError, ParseIntError},
    path::PathBuf,
};

use joinery::JoinableIterator;
use thiserror::Error;

/// The broad category of a [`ConversionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    NotABool,
    NotAnInt,
    NotAFloat,
    CannotOpen,
}

/// A token couldn't be converted into the type of the value it was bound to.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversionError {
    #[error("`{text}` cannot be interpreted as a boolean")]
    NotABool { text: String },

    #[error("`{text}` cannot be interpreted as an integer: {source}")]
    NotAnInt {
        text: String,
        #[source]
        source: ParseIntError,
    },

    #[error("`{text}` cannot be interpreted as a float: {source}")]
    NotAFloat {
        text: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("cannot open `{}`: {source}", .path.display())]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConversionError {
    #[must_use]
    pub fn kind(&self) -> ConversionKind {
        match self {
            Self::NotABool { .. } => ConversionKind::NotABool,
            Self::NotAnInt { .. } => ConversionKind::NotAnInt,
            Self::NotAFloat { .. } => ConversionKind::NotAFloat,
            Self::CannotOpen { .. } => ConversionKind::CannotOpen,
        }
    }
}

/// The declared argument a conversion failure belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// An optional argument, by long name
    Flag(String),

    /// An ordered positional argument, by name
    Positional(String),

    /// The trailing input file slot
    Input,

    /// The trailing output file slot
    Output,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Flag(name) => write!(f, "flag `--{name}`"),
            Target::Positional(name) => write!(f, "positional argument `{name}`"),
            Target::Input => f.write_str("input file"),
            Target::Output => f.write_str("output file"),
        }
    }
}

/**
A malformed command line. The parser stops at the first of these it finds,
so there is always exactly one actionable message per invocation.
*/
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("unknown flag `--{0}`")]
    UnknownFlag(String),

    #[error("unknown shorthand `{0}`")]
    UnknownShorthand(char),

    /// A flag that needs a value was followed by another flag, or by nothing
    #[error("value not given for flag `--{0}`")]
    MissingValue(String),

    #[error("in {target}: {source}")]
    Conversion {
        target: Target,
        #[source]
        source: ConversionError,
    },

    /// A shorthand in the middle of a cluster (`x` in `-xv`) is bound to an
    /// argument that isn't a boolean switch
    #[error("flag `--{flag}` for shorthand `{short}` is not boolean")]
    NotBoolean { short: char, flag: String },

    #[error("missing positional argument(s): `{}`", .names.iter().join_with("`, `"))]
    MissingPositional { names: Vec<String> },

    #[error("extraneous arguments: `{}`", .tokens.iter().join_with("`, `"))]
    ExtraneousArguments { tokens: Vec<String> },
}

impl ParseError {
    pub(crate) fn conversion(target: Target) -> impl FnOnce(ConversionError) -> Self {
        move |source| Self::Conversion { target, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            ParseError::UnknownFlag("bogus".to_owned()).to_string(),
            "unknown flag `--bogus`"
        );
        assert_eq!(
            ParseError::NotBoolean {
                short: 'n',
                flag: "name".to_owned()
            }
            .to_string(),
            "flag `--name` for shorthand `n` is not boolean"
        );
        assert_eq!(
            ParseError::MissingPositional {
                names: vec!["int".to_owned(), "string".to_owned()]
            }
            .to_string(),
            "missing positional argument(s): `int`, `string`"
        );
        assert_eq!(
            ParseError::ExtraneousArguments {
                tokens: vec!["a".to_owned()]
            }
            .to_string(),
            "extraneous arguments: `a`"
        );
    }

    #[test]
    fn conversion_is_scoped_to_its_target() {
        let error = ParseError::conversion(Target::Flag("count".to_owned()))(
            ConversionError::NotABool {
                text: "maybe".to_owned(),
            },
        );

        assert_eq!(
            error.to_string(),
            "in flag `--count`: `maybe` cannot be interpreted as a boolean"
        );
    }
}
