#![no_std]

/*!
Low-level classification of command line tokens. Decides whether a token is
a long option, a cluster of shorthand flags, or a plain value, and provides a
cursor over the token stream. Nothing here knows which flags are declared;
that happens in `parley` itself. Usually this is too low level to use
directly.
*/

mod populated_str;

use core::fmt::{self, Debug};

use populated_str::PopulatedStr;

/// The three ways a single token can be read, independent of which arguments
/// have been declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `--name` or `--name=value`; never exactly `--`
    Long,

    /// `-abc`; never exactly `-`
    Short,

    /// Everything else, including the literal tokens `--` and `-`
    Value,
}

impl TokenKind {
    /// Classify a token. This is pure and context free.
    #[inline]
    #[must_use]
    pub fn of(token: &str) -> Self {
        match token.as_bytes() {
            b"--" | b"-" => TokenKind::Value,
            [b'-', b'-', ..] => TokenKind::Long,
            [b'-', ..] => TokenKind::Short,
            _ => TokenKind::Value,
        }
    }
}

/**
A long option, as it appeared on the command line. Given `--path=bar`, the
`name` is `path` and the `argument` is `bar`; given `--path`, there is no
argument.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongOption<'arg> {
    pub name: &'arg str,
    pub argument: Option<&'arg str>,
}

impl<'arg> LongOption<'arg> {
    fn new(option: &'arg str) -> Self {
        match split_once(option, b'=') {
            Some((name, argument)) => Self {
                name,
                argument: Some(argument),
            },
            None => Self {
                name: option,
                argument: None,
            },
        }
    }
}

/**
One or more shorthand flags sharing a single leading `-`, such as `-xvf`.
A cluster is never empty.
*/
#[derive(Clone, Copy)]
pub struct ShortCluster<'arg>(&'arg PopulatedStr);

impl<'arg> ShortCluster<'arg> {
    /// Iterate over the characters of the cluster, marking the last one.
    #[inline]
    pub fn flags(&self) -> ShortFlags<'arg> {
        ShortFlags {
            rest: self.0.get(),
        }
    }

    /// The characters of the cluster, without the leading `-`
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'arg str {
        self.0.get()
    }

    /// The first character of the cluster
    #[inline]
    #[must_use]
    pub fn first(&self) -> char {
        self.0.split_first().0
    }
}

impl Debug for ShortCluster<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{:?}", self.0.get())
    }
}

/// A single shorthand character from a [`ShortCluster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortFlag {
    pub option: char,

    /// True if this is the final character of its cluster. Only the final
    /// flag in a cluster may take a value from the following tokens.
    pub last: bool,
}

/// Iterator over the flags in a [`ShortCluster`]
#[derive(Debug, Clone)]
pub struct ShortFlags<'arg> {
    rest: &'arg str,
}

impl Iterator for ShortFlags<'_> {
    type Item = ShortFlag;

    fn next(&mut self) -> Option<ShortFlag> {
        let (option, rest) = PopulatedStr::new(self.rest)?.split_first();
        self.rest = rest;

        Some(ShortFlag {
            option,
            last: rest.is_empty(),
        })
    }
}

/// A classified token.
#[derive(Debug, Clone, Copy)]
pub enum Token<'arg> {
    Long(LongOption<'arg>),
    Short(ShortCluster<'arg>),
    Value(&'arg str),
}

impl<'arg> Token<'arg> {
    #[must_use]
    pub fn classify(token: &'arg str) -> Self {
        match TokenKind::of(token) {
            TokenKind::Long => Token::Long(LongOption::new(&token[2..])),
            TokenKind::Short => match PopulatedStr::new(&token[1..]) {
                Some(cluster) => Token::Short(ShortCluster(cluster)),
                // Unreachable in practice: `-` alone classifies as a value
                None => Token::Value(token),
            },
            TokenKind::Value => Token::Value(token),
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Long(_) => TokenKind::Long,
            Token::Short(_) => TokenKind::Short,
            Token::Value(_) => TokenKind::Value,
        }
    }

    /// True for exactly `--help`, or for any shorthand cluster containing `h`.
    /// `--help=...` is not a help request.
    #[must_use]
    pub fn requests_help(&self) -> bool {
        match *self {
            Token::Long(LongOption {
                name: "help",
                argument: None,
            }) => true,
            Token::Short(cluster) => cluster.flags().any(|flag| flag.option == 'h'),
            _ => false,
        }
    }
}

/**
A cursor over the raw tokens of a command line, front to back. The stream
hands out tokens one at a time and lets a caller look ahead at what's left,
which is what greedy list consumption needs: a list flag has to know how many
plain values remain in the *entire* rest of the stream, not just the ones
immediately following it.

The stream operates entirely on borrowed data; the `'arg` lifetime refers to
the caller's token storage.
*/
#[derive(Debug, Clone)]
pub struct TokenStream<'arg, S> {
    tokens: &'arg [S],
}

impl<'arg, S> TokenStream<'arg, S>
where
    S: AsRef<str>,
{
    /// Create a new stream. The tokens should *exclude* the program name.
    #[inline]
    #[must_use]
    pub fn new(tokens: &'arg [S]) -> Self {
        Self { tokens }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The kind of the next token, without consuming it
    #[inline]
    #[must_use]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens
            .first()
            .map(|token| TokenKind::of(token.as_ref()))
    }

    /// Take the next token, unclassified
    #[inline]
    pub fn take(&mut self) -> Option<&'arg str> {
        let (head, tail) = self.tokens.split_first()?;
        self.tokens = tail;
        Some(head.as_ref())
    }

    /// Take the next token only if it is a plain value
    #[inline]
    pub fn take_value(&mut self) -> Option<&'arg str> {
        match self.peek_kind()? {
            TokenKind::Value => self.take(),
            TokenKind::Long | TokenKind::Short => None,
        }
    }

    /// Count the plain values anywhere in the remainder of the stream
    #[must_use]
    pub fn remaining_values(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| TokenKind::of(token.as_ref()) == TokenKind::Value)
            .count()
    }

    /// True if any remaining token is a request for help
    #[must_use]
    pub fn requests_help(&self) -> bool {
        self.tokens
            .iter()
            .any(|token| Token::classify(token.as_ref()).requests_help())
    }
}

impl<'arg, S> Iterator for TokenStream<'arg, S>
where
    S: AsRef<str>,
{
    type Item = Token<'arg>;

    #[inline]
    fn next(&mut self) -> Option<Token<'arg>> {
        self.take().map(Token::classify)
    }
}

fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    // `delimiter` is ASCII, so both halves land on char boundaries
    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}
