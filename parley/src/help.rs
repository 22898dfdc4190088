/*!
Usage and help text, rendered from a [`Positional`] and an [`Optional`].

Overall structure:

```text
usage: command [-h | --help] [<args>] <name> [<infile>] [<outfile>]

positional arguments:
  <name>                what the name is for
  [<infile>]            input file

optional arguments:
  -n <count>, --count <count>
                        how many (value: 3)
  -v, --verbose         print more (value: false)
```
 */

use core::fmt::{self, Display, Write};

use indent_write::fmt::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::{lazy_format, make_lazy_format};
use textwrap::{Options, WordSplitter, WrapAlgorithm};

use crate::{optional::Optional, positional::Positional, value::ValueKind};

/// Column widths used when rendering help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpLayout {
    /// The column at which descriptions start
    pub column: usize,

    /// The width descriptions are wrapped to
    pub width: usize,

    /// The width the usage synopsis is wrapped to
    pub usage_width: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            column: 24,
            width: 55,
            usage_width: 72,
        }
    }
}

/// The argument synopsis, such as `[-h | --help] [<args>] <path>`
pub fn usage<'h>(positional: &'h Positional<'_>, optional: &'h Optional<'_>) -> impl Display + 'h {
    make_lazy_format!(|f| {
        f.write_str("[-h | --help]")?;

        if !optional.is_empty() {
            f.write_str(" [<args>]")?;
        }

        positional
            .iter()
            .try_for_each(|(name, _)| write!(f, " <{name}>"))?;

        if positional.input_slot().is_some() {
            f.write_str(" [<infile>]")?;
        }

        if positional.output_slot().is_some() {
            f.write_str(" [<outfile>]")?;
        }

        Ok(())
    })
}

/// The full `usage: <command> ...` line, wrapped to the layout's usage width.
/// Continuation lines line up under the first argument.
pub fn synopsis(
    command: &str,
    positional: &Positional<'_>,
    optional: &Optional<'_>,
    layout: &HelpLayout,
) -> String {
    let prefix = format!("usage: {command} ");
    let indent = " ".repeat(prefix.chars().count());

    let options = Options::new(layout.usage_width)
        .initial_indent(&prefix)
        .subsequent_indent(&indent)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .break_words(false);

    textwrap::fill(&usage(positional, optional).to_string(), options)
}

/// The help tables for every declared argument, using the default layout
pub fn help<'h, 'a>(positional: &'h Positional<'a>, optional: &'h Optional<'a>) -> Help<'h, 'a> {
    Help {
        positional,
        optional,
        layout: HelpLayout::default(),
    }
}

/// Help tables for a pair of declarations. Render it with [`Display`].
#[derive(Debug, Clone, Copy)]
pub struct Help<'h, 'a> {
    positional: &'h Positional<'a>,
    optional: &'h Optional<'a>,
    layout: HelpLayout,
}

impl Help<'_, '_> {
    #[must_use]
    pub fn with_layout(self, layout: HelpLayout) -> Self {
        Self { layout, ..self }
    }
}

impl Display for Help<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positional = self.positional;
        let layout = &self.layout;

        let has_positional = !positional.is_empty()
            || positional.input_slot().is_some()
            || positional.output_slot().is_some();

        if has_positional {
            section(f, "positional arguments", |out| {
                positional.iter().try_for_each(|(name, argument)| {
                    row(out, lazy_format!("<{name}>"), argument.usage(), layout)
                })?;

                if let Some(input) = positional.input_slot() {
                    row(out, "[<infile>]", input.usage(), layout)?;
                }

                if let Some(output) = positional.output_slot() {
                    row(out, "[<outfile>]", output.usage(), layout)?;
                }

                Ok(())
            })?;
        }

        if !self.optional.is_empty() {
            let mut options: Vec<_> = self.optional.iter().collect();

            // Sorted by shorthand where there is one, otherwise by the first
            // letter of the long name, so `-a` and `--apple` sit together
            options.sort_by_key(|&(short, long, _)| {
                (short.or_else(|| long.chars().next()), short.is_none(), long)
            });

            section(f, "optional arguments", |out| {
                options.iter().try_for_each(|&(short, long, argument)| {
                    let value = argument.value();
                    let description = match argument.usage() {
                        "" => format!("(value: {})", value.render()),
                        usage => format!("{usage} (value: {})", value.render()),
                    };

                    row(out, option_label(short, long, value.kind()), &description, layout)
                })
            })?;
        }

        Ok(())
    }
}

/// The rendered forms of a flag. List flags show every way they can repeat.
fn option_label(short: Option<char>, long: &str, kind: ValueKind) -> impl Display + '_ {
    lazy_format!(match ((kind, short)) {
        (ValueKind::Switch, None) => "--{long}",
        (ValueKind::Switch, Some(short)) => "-{short}, --{long}",
        (ValueKind::Single, None) => "--{long} <{long}>",
        (ValueKind::Single, Some(short)) => "-{short} <{long}>, --{long} <{long}>",
        (ValueKind::List, None) => (
            "--{long} <{long}> [<{long}> ...],\n--{long} <{long}> [--{long} <{long}> ...]"
        ),
        (ValueKind::List, Some(short)) => (
            "-{short} <{long}> [<{long}> ...],\n\
             -{short} <{long}> [-{short} <{long}> ...],\n\
             --{long} <{long}> [<{long}> ...],\n\
             --{long} <{long}> [--{long} <{long}> ...]"
        ),
    })
}

/// Write a section by writing a newline, then the `header`, then an
/// indented `body`.
fn section<W: Write>(
    out: &mut W,
    header: &str,
    body: impl FnOnce(&mut IndentWriter<'static, &mut W>) -> fmt::Result,
) -> fmt::Result {
    writeln!(out, "\n{header}:")?;
    body(&mut IndentWriter::new("  ", out))
}

/// Describe an item by printing its label, followed by its wrapped
/// description lined up at the description column. Labels too wide for
/// that, or spanning several lines, put the description on its own line.
pub(crate) fn row(
    out: &mut impl Write,
    label: impl Display,
    description: &str,
    layout: &HelpLayout,
) -> fmt::Result {
    // The section's indent already accounts for the first two columns
    let pad = layout.column.saturating_sub(2);
    let label = label.to_string();

    if description.is_empty() {
        return writeln!(out, "{label}");
    }

    let lines = textwrap::wrap(
        description,
        Options::new(layout.width).wrap_algorithm(WrapAlgorithm::FirstFit),
    );
    let separator = lazy_format!("\n{:pad$}", "");
    let description = lines.iter().join_with(&separator);

    if label.chars().count() < pad && !label.contains('\n') {
        writeln!(out, "{label:pad$}{description}")
    } else {
        writeln!(out, "{label}\n{:pad$}{description}", "")
    }
}
