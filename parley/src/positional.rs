use indexmap::IndexMap;

use crate::{
    handle::{ReadHandle, WriteHandle},
    value::{Argument, Value},
};

/**
The positional arguments of a command: an ordered list of named slots, plus
at most one trailing input file slot and one trailing output file slot.

Named slots are filled in the order they were registered and are all
required. The input and output slots are filled afterwards, only if tokens
are left over; otherwise they keep their defaults (standard input and
standard output for the file handles).

Registering the same name twice, or declaring a second input or output slot,
is a programming error and panics.
*/
#[derive(Debug, Default)]
pub struct Positional<'a> {
    args: IndexMap<&'a str, Argument<'a>>,
    input: Option<Argument<'a>>,
    output: Option<Argument<'a>>,
}

impl<'a> Positional<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named slot bound to any [`Value`].
    ///
    /// # Panics
    ///
    /// If `name` is already registered.
    pub fn register(&mut self, name: &'a str, value: impl Value + 'a, usage: &'a str) {
        assert!(
            !self.args.contains_key(name),
            "positional argument with name `{name}` already exists"
        );

        self.args.insert(name, Argument::new(value, usage));
    }

    pub fn bool(&mut self, name: &'a str, value: &'a mut bool, usage: &'a str) {
        self.register(name, value, usage)
    }

    pub fn int(&mut self, name: &'a str, value: &'a mut i64, usage: &'a str) {
        self.register(name, value, usage)
    }

    pub fn float(&mut self, name: &'a str, value: &'a mut f64, usage: &'a str) {
        self.register(name, value, usage)
    }

    pub fn string(&mut self, name: &'a str, value: &'a mut String, usage: &'a str) {
        self.register(name, value, usage)
    }

    /// A file that must exist, opened for reading
    pub fn open(&mut self, name: &'a str, value: &'a mut ReadHandle, usage: &'a str) {
        self.register(name, value, usage)
    }

    /// A file created (or truncated) for writing
    pub fn create(&mut self, name: &'a str, value: &'a mut WriteHandle, usage: &'a str) {
        self.register(name, value, usage)
    }

    /// Declare the trailing input file slot. When no token is left over for
    /// it, `value` is left alone, which by default means standard input.
    ///
    /// # Panics
    ///
    /// If an input slot was already declared.
    pub fn input(&mut self, value: &'a mut ReadHandle, usage: &'a str) {
        assert!(self.input.is_none(), "input file argument already exists");
        self.input = Some(Argument::new(value, usage));
    }

    /// Declare the trailing output file slot. When no token is left over for
    /// it, `value` is left alone, which by default means standard output.
    ///
    /// # Panics
    ///
    /// If an output slot was already declared.
    pub fn output(&mut self, value: &'a mut WriteHandle, usage: &'a str) {
        assert!(self.output.is_none(), "output file argument already exists");
        self.output = Some(Argument::new(value, usage));
    }

    /// The number of named slots. The input and output slots don't count.
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
    pub fn get(&self, name: &str) -> Option<&Argument<'a>> {
        self.args.get(name)
    }

    /// The named slots, in the order they are filled
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &Argument<'a>)> {
        self.args.iter().map(|(&name, argument)| (name, argument))
    }

    #[inline]
    #[must_use]
    pub fn input_slot(&self) -> Option<&Argument<'a>> {
        self.input.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn output_slot(&self) -> Option<&Argument<'a>> {
        self.output.as_ref()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (&'a str, &mut Argument<'a>)> {
        self.args.iter_mut().map(|(&name, argument)| (name, argument))
    }

    pub(crate) fn input_slot_mut(&mut self) -> Option<&mut Argument<'a>> {
        self.input.as_mut()
    }

    pub(crate) fn output_slot_mut(&mut self) -> Option<&mut Argument<'a>> {
        self.output.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_keep_registration_order() {
        let (mut flag, mut count, mut name) = (false, 0, String::new());
        let mut pos = Positional::new();
        assert_eq!(pos.len(), 0);

        pos.bool("bool", &mut flag, "boolean value");
        assert_eq!(pos.len(), 1);
        pos.int("int", &mut count, "integer value");
        pos.string("string", &mut name, "string value");
        assert_eq!(pos.len(), 3);

        let names: Vec<&str> = pos.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["bool", "int", "string"]);
        assert_eq!(pos.get("int").unwrap().usage(), "integer value");
    }

    #[test]
    fn file_slots_are_not_counted() {
        let mut input = ReadHandle::default();
        let mut output = WriteHandle::default();
        let mut pos = Positional::new();

        pos.input(&mut input, "file to read");
        pos.output(&mut output, "file to write");

        assert!(pos.is_empty());
        assert_eq!(pos.input_slot().unwrap().value().render(), "<stdin>");
        assert_eq!(pos.output_slot().unwrap().value().render(), "<stdout>");
    }

    #[test]
    #[should_panic(expected = "positional argument with name `bool` already exists")]
    fn duplicate_name_panics() {
        let (mut a, mut b) = (false, false);
        let mut pos = Positional::new();

        pos.bool("bool", &mut a, "boolean value");
        pos.bool("bool", &mut b, "boolean value");
    }

    #[test]
    #[should_panic(expected = "input file argument already exists")]
    fn second_input_slot_panics() {
        let (mut a, mut b) = (ReadHandle::default(), ReadHandle::default());
        let mut pos = Positional::new();

        pos.input(&mut a, "first");
        pos.input(&mut b, "second");
    }
}
