/*!
The parser: walks a token stream, binds flags as it finds them, and hands
whatever plain values are left over to the positional slots.

Plain values can't be bound as they're found, because a value token might
turn out to belong to a list flag to its left, or be needed by a positional
slot. They're collected as "extra" tokens and reconciled once the whole
stream has been scanned: one per named slot, in order, then at most one each
for the input and output file slots. Anything still left is an error.

List flags are greedy, but never so greedy that the positional slots starve:
a list keeps consuming the values that immediately follow it only while the
number of plain values remaining anywhere in the stream exceeds the number
of named positional slots.
 */

use std::iter;

use log::{debug, trace};
use parley_parser::{LongOption, ShortCluster, ShortFlag, Token, TokenStream};

use crate::{
    errors::{ParseError, Target},
    optional::Optional,
    positional::Positional,
    value::ValueKind,
};

/// The result of a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// Every token was bound. Values that weren't mentioned keep their
    /// defaults.
    Complete,

    /// `--help` or `-h` appeared somewhere on the command line. Nothing was
    /// bound; the caller should print usage and help and exit successfully.
    HelpRequested,
}

/**
Binds a token stream to one [`Positional`] and one [`Optional`] declaration.

The parser holds no state of its own; everything it does is a mutation of the
values the declarations are bound to. Those mutations are never reset, so
a pair of declarations should be parsed once.
*/
#[derive(Debug)]
pub struct Parser<'p, 'a> {
    positional: &'p mut Positional<'a>,
    optional: &'p mut Optional<'a>,
}

impl<'p, 'a> Parser<'p, 'a> {
    pub fn new(positional: &'p mut Positional<'a>, optional: &'p mut Optional<'a>) -> Self {
        Self {
            positional,
            optional,
        }
    }

    /**
    Parse `tokens`, which should exclude the program name. Stops at the first
    error.

    A help request anywhere in the stream takes precedence over everything
    else, including errors in earlier tokens.
    */
    pub fn parse<S>(&mut self, tokens: &[S]) -> Result<Outcome, ParseError>
    where
        S: AsRef<str>,
    {
        let mut stream = TokenStream::new(tokens);

        if stream.requests_help() {
            debug!("help requested");
            return Ok(Outcome::HelpRequested);
        }

        let mut extra = Vec::new();

        while let Some(token) = stream.next() {
            trace!(token:?; "classified token");

            match token {
                Token::Long(LongOption {
                    name,
                    argument: Some(argument),
                }) => self.set_inline(name, argument)?,
                Token::Long(LongOption {
                    name,
                    argument: None,
                }) => self.consume(name, &mut stream)?,
                Token::Short(cluster) => self.short_cluster(cluster, &mut stream)?,
                Token::Value(value) => extra.push(value),
            }
        }

        self.reconcile(extra)?;

        Ok(Outcome::Complete)
    }

    /// `--name=value`: the value is applied directly, whatever kind of value
    /// the flag holds. A list gets one element.
    fn set_inline(&mut self, name: &str, text: &str) -> Result<(), ParseError> {
        let argument = self
            .optional
            .get_mut(name)
            .ok_or_else(|| ParseError::UnknownFlag(name.to_owned()))?;

        trace!(flag = name, value = text; "inline value");

        argument
            .value_mut()
            .set(text)
            .map_err(ParseError::conversion(Target::Flag(name.to_owned())))
    }

    /// `--name` (or the last shorthand of a cluster): take as many of the
    /// following tokens as the flag's value wants.
    fn consume<S>(&mut self, name: &str, stream: &mut TokenStream<'_, S>) -> Result<(), ParseError>
    where
        S: AsRef<str>,
    {
        let reserved = self.positional.len();

        let value = self
            .optional
            .get_mut(name)
            .ok_or_else(|| ParseError::UnknownFlag(name.to_owned()))?
            .value_mut();

        let target = || Target::Flag(name.to_owned());

        match value.kind() {
            ValueKind::Switch => value.set("true").map_err(ParseError::conversion(target())),

            ValueKind::Single => {
                let text = stream
                    .take_value()
                    .ok_or_else(|| ParseError::MissingValue(name.to_owned()))?;

                value.set(text).map_err(ParseError::conversion(target()))
            }

            ValueKind::List => {
                let mut available = stream.remaining_values();
                let mut consumed = 0usize;

                while available > reserved {
                    let Some(text) = stream.take_value() else {
                        break;
                    };

                    value.set(text).map_err(ParseError::conversion(target()))?;
                    available -= 1;
                    consumed += 1;
                }

                debug!(flag = name, consumed, reserved; "list flag consumed values");
                Ok(())
            }
        }
    }

    /// `-abc`: every shorthand but the last must be a switch; the last one
    /// behaves like its long form. The whole cluster is checked, left to
    /// right, before any of it is applied.
    fn short_cluster<S>(
        &mut self,
        cluster: ShortCluster<'_>,
        stream: &mut TokenStream<'_, S>,
    ) -> Result<(), ParseError>
    where
        S: AsRef<str>,
    {
        let longs = cluster
            .flags()
            .map(|flag| self.check_shorthand(flag))
            .collect::<Result<Vec<_>, _>>()?;

        longs
            .into_iter()
            .try_for_each(|long| self.consume(long, stream))
    }

    /// Resolve one shorthand of a cluster to its long name
    fn check_shorthand(
        &self,
        ShortFlag { option, last }: ShortFlag,
    ) -> Result<&'a str, ParseError> {
        let long = self
            .optional
            .resolve(option)
            .ok_or(ParseError::UnknownShorthand(option))?;

        let is_switch = self
            .optional
            .get(long)
            .is_some_and(|argument| argument.value().is_boolean());

        match last || is_switch {
            true => Ok(long),
            false => Err(ParseError::NotBoolean {
                short: option,
                flag: long.to_owned(),
            }),
        }
    }

    fn reconcile(&mut self, extra: Vec<&str>) -> Result<(), ParseError> {
        trace!(extra:?; "reconciling leftover tokens");

        if extra.len() < self.positional.len() {
            let names = self
                .positional
                .iter()
                .skip(extra.len())
                .map(|(name, _)| name.to_owned())
                .collect();

            return Err(ParseError::MissingPositional { names });
        }

        let mut extra = extra.into_iter();

        for ((name, argument), text) in iter::zip(self.positional.iter_mut(), &mut extra) {
            argument
                .value_mut()
                .set(text)
                .map_err(ParseError::conversion(Target::Positional(name.to_owned())))?;
        }

        if let Some(input) = self.positional.input_slot_mut()
            && let Some(text) = extra.next()
        {
            input
                .value_mut()
                .set(text)
                .map_err(ParseError::conversion(Target::Input))?;
        }

        if let Some(output) = self.positional.output_slot_mut()
            && let Some(text) = extra.next()
        {
            output
                .value_mut()
                .set(text)
                .map_err(ParseError::conversion(Target::Output))?;
        }

        let tokens: Vec<String> = extra.map(str::to_owned).collect();

        match tokens.is_empty() {
            true => Ok(()),
            false => Err(ParseError::ExtraneousArguments { tokens }),
        }
    }
}
