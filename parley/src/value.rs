/*!
The [`Value`] capability: anything that can be set from a command line token
and rendered back to text.

Values are bound by mutable reference. A caller declares its own variables,
registers `&mut` borrows of them with a [`Positional`][crate::Positional] or
[`Optional`][crate::Optional], parses, and then reads the variables once the
declarations are dropped. Whatever a variable held before parsing is its
default.
*/

use core::fmt;

use crate::errors::ConversionError;

/// How a value consumes tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A boolean. As a flag, its presence alone means "on" and it never
    /// consumes a following token.
    Switch,

    /// Exactly one token.
    Single,

    /// Any number of tokens, appended one at a time.
    List,
}

/**
A value that can be parsed from command line tokens.

The parser never inspects the concrete type behind a value; everything it
needs to know is expressed through [`kind`][Value::kind].
*/
pub trait Value {
    /**
    Convert `text` and store it. Scalar values replace whatever they held;
    list values append one element per call.
    */
    fn set(&mut self, text: &str) -> Result<(), ConversionError>;

    /// Render the current value for display in help messages.
    fn render(&self) -> String;

    fn kind(&self) -> ValueKind {
        ValueKind::Single
    }

    #[inline]
    fn is_boolean(&self) -> bool {
        self.kind() == ValueKind::Switch
    }

    #[inline]
    fn is_list(&self) -> bool {
        self.kind() == ValueKind::List
    }

    /// The number of elements held by a list value; `None` for scalars.
    fn len(&self) -> Option<usize> {
        None
    }
}

impl<T> Value for &mut T
where
    T: Value + ?Sized,
{
    #[inline]
    fn set(&mut self, text: &str) -> Result<(), ConversionError> {
        (**self).set(text)
    }

    #[inline]
    fn render(&self) -> String {
        (**self).render()
    }

    #[inline]
    fn kind(&self) -> ValueKind {
        (**self).kind()
    }

    #[inline]
    fn len(&self) -> Option<usize> {
        (**self).len()
    }
}

/// A [`Value`] paired with its human readable usage string.
pub struct Argument<'a> {
    value: Box<dyn Value + 'a>,
    usage: &'a str,
}

impl<'a> Argument<'a> {
    pub fn new(value: impl Value + 'a, usage: &'a str) -> Self {
        Self {
            value: Box::new(value),
            usage,
        }
    }

    #[inline]
    #[must_use]
    pub fn usage(&self) -> &'a str {
        self.usage
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &(dyn Value + 'a) {
        &*self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut (dyn Value + 'a) {
        &mut *self.value
    }
}

impl fmt::Debug for Argument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argument")
            .field("value", &self.value.render())
            .field("kind", &self.value.kind())
            .field("usage", &self.usage)
            .finish()
    }
}
