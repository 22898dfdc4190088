use std::collections::HashMap;

use indexmap::IndexMap;

use crate::{
    handle::ReadHandle,
    value::{Argument, Value},
};

/**
The optional arguments (flags) of a command, keyed by long name, with an
alias table from shorthand characters to long names.

`--help` and `-h` are reserved for help requests and can't be registered.
Registering a long name or shorthand twice is a programming error and panics.
*/
#[derive(Debug, Default)]
pub struct Optional<'a> {
    args: IndexMap<&'a str, Argument<'a>>,
    alias: HashMap<char, &'a str>,
}

impl<'a> Optional<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flag bound to any [`Value`]. `short` may be a `char` or
    /// `None` if the flag has no shorthand.
    ///
    /// # Panics
    ///
    /// If `long` or `short` is already registered, or either is reserved for
    /// help.
    pub fn register(
        &mut self,
        short: impl Into<Option<char>>,
        long: &'a str,
        value: impl Value + 'a,
        usage: &'a str,
    ) {
        let short = short.into();

        assert!(long != "help", "`--help` is reserved for help requests");
        assert!(
            !self.args.contains_key(long),
            "optional argument with long name `{long}` already exists"
        );

        if let Some(short) = short {
            assert!(short != 'h', "`-h` is reserved for help requests");

            if let Some(existing) = self.alias.get(&short) {
                panic!(
                    "optional argument with short name `{short}` already exists for long name `{existing}`"
                );
            }

            self.alias.insert(short, long);
        }

        self.args.insert(long, Argument::new(value, usage));
    }

    /// A boolean switch, off unless given
    pub fn switch(
        &mut self,
        short: impl Into<Option<char>>,
        long: &'a str,
        value: &'a mut bool,
        usage: &'a str,
    ) {
        self.register(short, long, value, usage)
    }

    pub fn int(
        &mut self,
        short: impl Into<Option<char>>,
        long: &'a str,
        value: &'a mut i64,
        usage: &'a str,
    ) {
        self.register(short, long, value, usage)
    }

    pub fn float(
        &mut self,
        short: impl Into<Option<char>>,
        long: &'a str,
        value: &'a mut f64,
        usage: &'a str,
    ) {
        self.register(short, long, value, usage)
    }

    pub fn string(
        &mut self,
        short: impl Into<Option<char>>,
        long: &'a str,
        value: &'a mut String,
        usage: &'a str,
    ) {
        self.register(short, long, value, usage)
    }

    /// A flag that collects every value given to it
    pub fn string_list(
        &mut self,
        short: impl Into<Option<char>>,
        long: &'a str,
        value: &'a mut Vec<String>,
        usage: &'a str,
    ) {
        self.register(short, long, value, usage)
    }

    /// A flag that opens every path given to it for reading
    pub fn open_list(
        &mut self,
        short: impl Into<Option<char>>,
        long: &'a str,
        value: &'a mut Vec<ReadHandle>,
        usage: &'a str,
    ) {
        self.register(short, long, value, usage)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    #[must_use]
    pub fn get(&self, long: &str) -> Option<&Argument<'a>> {
        self.args.get(long)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, long: &str) -> bool {
        self.args.contains_key(long)
    }

    /// The long name a shorthand character stands for
    #[inline]
    #[must_use]
    pub fn resolve(&self, short: char) -> Option<&'a str> {
        self.alias.get(&short).copied()
    }

    /// The shorthand character for a long name, if it has one
    #[must_use]
    pub fn short_for(&self, long: &str) -> Option<char> {
        self.alias
            .iter()
            .find_map(|(&short, &target)| (target == long).then_some(short))
    }

    /// Every flag as `(short, long, argument)`, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (Option<char>, &'a str, &Argument<'a>)> {
        self.args
            .iter()
            .map(|(&long, argument)| (self.short_for(long), long, argument))
    }

    pub(crate) fn get_mut(&mut self, long: &str) -> Option<&mut Argument<'a>> {
        self.args.get_mut(long)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_long_names() {
        let (mut verbose, mut quiet, mut items) = (false, false, Vec::new());
        let mut opt = Optional::new();

        opt.switch('v', "verbose", &mut verbose, "print more");
        opt.switch(None, "quiet", &mut quiet, "print less");
        opt.string_list('i', "items", &mut items, "items to collect");

        assert_eq!(opt.len(), 3);
        assert_eq!(opt.resolve('v'), Some("verbose"));
        assert_eq!(opt.resolve('q'), None);
        assert_eq!(opt.short_for("items"), Some('i'));
        assert_eq!(opt.short_for("quiet"), None);
        assert!(opt.get("items").unwrap().value().is_list());
        assert!(opt.contains("quiet"));
    }

    #[test]
    #[should_panic(expected = "optional argument with long name `verbose` already exists")]
    fn duplicate_long_name_panics() {
        let (mut a, mut b) = (false, false);
        let mut opt = Optional::new();

        opt.switch('v', "verbose", &mut a, "");
        opt.switch('w', "verbose", &mut b, "");
    }

    #[test]
    #[should_panic(expected = "optional argument with short name `v` already exists")]
    fn duplicate_short_name_panics() {
        let (mut a, mut b) = (false, false);
        let mut opt = Optional::new();

        opt.switch('v', "verbose", &mut a, "");
        opt.switch('v', "version", &mut b, "");
    }

    #[test]
    #[should_panic(expected = "reserved for help")]
    fn help_shorthand_is_reserved() {
        let mut a = false;
        let mut opt = Optional::new();

        opt.switch('h', "human", &mut a, "");
    }
}
