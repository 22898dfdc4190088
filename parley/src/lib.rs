/*!
A flag-style command line arguments parser. Declare the positional and
optional arguments of a command, bind each one to a variable of your own,
and parse; the variables end up holding what was given on the command line,
or keep their defaults if nothing was.

```
use parley::{Optional, Outcome, Parser, Positional};

let mut verbose = false;
let mut files: Vec<String> = Vec::new();
let mut output = String::from("out.txt");

{
    let mut opt = Optional::new();
    opt.switch('v', "verbose", &mut verbose, "print more");
    opt.string_list('f', "files", &mut files, "files to include");

    let mut pos = Positional::new();
    pos.string("output", &mut output, "where to write");

    let outcome = Parser::new(&mut pos, &mut opt)
        .parse(&["-vf", "a.txt", "b.txt", "result.txt"])
        .unwrap();

    assert_eq!(outcome, Outcome::Complete);
}

assert!(verbose);
assert_eq!(files, ["a.txt", "b.txt"]);
assert_eq!(output, "result.txt");
```

Token classification itself lives in [`parley_parser`]; the [`command`]
module covers everything between the parser and `main`, including help
requests and subcommands.
*/

pub mod arguments;
pub mod command;
pub mod errors;
pub mod handle;
pub mod help;
mod impls;
pub mod optional;
pub mod parser;
pub mod positional;
pub mod value;

pub use errors::{ConversionError, ConversionKind, ParseError, Target};
pub use handle::{ReadHandle, WriteHandle};
pub use optional::Optional;
pub use parley_parser::TokenKind;
pub use parser::{Outcome, Parser};
pub use positional::Positional;
pub use value::{Argument, Value, ValueKind};
