mod error;

use std::{
    io::{BufRead, BufReader, Write},
    process::ExitCode,
};

use anyhow::Context as _;
use lazy_format::lazy_format;
use log::{debug, info};
use parley::{
    Optional, Positional, ReadHandle, WriteHandle,
    arguments::LoadedArguments,
    command::{self, CommandError, Context, Program},
};

use crate::error::DemoError;

fn greet(context: Context) -> Result<(), CommandError> {
    let (mut loud, mut times, mut greeting) = (false, 1, String::from("Hello"));
    let mut name = String::new();

    {
        let mut opt = Optional::new();
        opt.switch('l', "loud", &mut loud, "shout the greeting");
        opt.int('t', "times", &mut times, "how many times to greet");
        opt.string('g', "greeting", &mut greeting, "the word to greet with");

        let mut pos = Positional::new();
        pos.string("name", &mut name, "who to greet");

        context.parse(&mut pos, &mut opt)?;
    }

    if name.is_empty() {
        return Err(context.raise(DemoError::EmptyName));
    }

    let times = usize::try_from(times).map_err(|_| context.raise(DemoError::NegativeTimes(times)))?;
    let line = lazy_format!("{greeting}, {name}!").to_string();
    let line = match loud {
        true => line.to_uppercase(),
        false => line,
    };

    for _ in 0..times {
        println!("{line}");
    }

    Ok(())
}

fn cat(context: Context) -> Result<(), CommandError> {
    let (mut number, mut files, mut output) = (false, Vec::new(), WriteHandle::default());

    {
        let mut opt = Optional::new();
        opt.switch('n', "number", &mut number, "number every output line");
        opt.open_list('f', "files", &mut files, "files to concatenate, in order");

        let mut pos = Positional::new();
        pos.output(&mut output, "where to write; standard output if absent");

        context.parse(&mut pos, &mut opt)?;
    }

    if files.is_empty() {
        files.push(ReadHandle::default());
    }

    debug!(files = files.len(), output:% = output; "concatenating");

    concatenate(&mut files, number, &mut output).map_err(|err| context.raise(err))
}

fn concatenate(files: &mut [ReadHandle], number: bool, output: &mut impl Write) -> anyhow::Result<()> {
    let mut line_number = 0;

    for file in files {
        let name = file.to_string();

        for line in BufReader::new(file).lines() {
            let line = line.with_context(|| format!("failed to read from {name}"))?;
            line_number += 1;

            match number {
                true => writeln!(output, "{line_number:6}\t{line}")?,
                false => writeln!(output, "{line}")?,
            }
        }
    }

    output.flush().context("failed to flush output")
}

fn count(context: Context) -> Result<(), CommandError> {
    let (mut min, mut require) = (0, false);
    let mut input = ReadHandle::default();

    {
        let mut opt = Optional::new();
        opt.int('m', "min-length", &mut min, "only count lines at least this long");
        opt.switch('r', "require", &mut require, "fail if no line was counted");

        let mut pos = Positional::new();
        pos.input(&mut input, "file to read; standard input if absent");

        context.parse(&mut pos, &mut opt)?;
    }

    let path = input.to_string();
    let counted = count_lines(&mut input, min).map_err(|err| context.raise(err))?;

    if require && counted == 0 {
        return Err(context.raise(DemoError::NothingCounted { path, min }));
    }

    println!("{counted}");
    Ok(())
}

fn count_lines(input: &mut ReadHandle, min: i64) -> anyhow::Result<usize> {
    let min = usize::try_from(min).unwrap_or(0);
    let mut counted = 0;

    for line in BufReader::new(input).lines() {
        if line.context("failed to read input")?.chars().count() >= min {
            counted += 1;
        }
    }

    Ok(counted)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let arguments = LoadedArguments::from_env();
    info!(argv0 = arguments.argv0(); "starting");

    let mut program = Program::new();
    program.add("greet", "say hello to someone", greet);
    program.add("cat", "concatenate files", cat);
    program.add("count", "count the lines of a file", count);

    command::run(
        arguments.context("a handful of small text tools"),
        program.into_command(),
    )
}
