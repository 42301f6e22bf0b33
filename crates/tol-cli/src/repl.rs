//! Interactive query loop.
//!
//! Every input line replaces the active query and prints its results.
//! Lines starting with `:` are commands:
//!
//! | Command       | Effect                                   |
//! |---------------|------------------------------------------|
//! | `:load PATH`  | Upload another file                      |
//! | `:reset`      | Clear the file, records and query        |
//! | `:state`      | Show the pipeline state                  |
//! | `:quit`       | Leave the loop (end of input also works) |

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::commands::{Pipeline, load_file, render_load};
use crate::settings::OutputFormat;
use crate::summary::render_results;

const PROMPT: &str = "> ";

#[derive(Debug, PartialEq, Eq)]
enum ReplCommand<'a> {
    Query(&'a str),
    Load(&'a str),
    Reset,
    State,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> ReplCommand<'_> {
    let Some(command) = line.strip_prefix(':') else {
        return ReplCommand::Query(line);
    };
    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command.trim(), ""),
    };
    match name {
        "load" | "l" => ReplCommand::Load(argument),
        "reset" => ReplCommand::Reset,
        "state" => ReplCommand::State,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(name),
    }
}

/// Run the query loop until `:quit` or end of input.
pub fn run_repl<R, W>(
    pipeline: &mut Pipeline,
    format: OutputFormat,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    write_prompt(out)?;
    for line in input.lines() {
        let line = line.context("read input")?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        match parse_line(line) {
            ReplCommand::Quit => break,
            ReplCommand::Query(query) => {
                pipeline.set_query(query);
                let results = pipeline.results();
                writeln!(out, "{}", render_results(query, &results, format))?;
            }
            ReplCommand::Load("") => writeln!(out, "usage: :load PATH")?,
            ReplCommand::Load(path) => {
                let path = Path::new(path);
                let outcome = load_file(pipeline, path);
                writeln!(out, "{}", render_load(pipeline, path, &outcome, format))?;
            }
            ReplCommand::Reset => {
                pipeline.reset();
                writeln!(out, "Cleared.")?;
            }
            ReplCommand::State => write_state(pipeline, out)?,
            ReplCommand::Unknown(name) => {
                writeln!(out, "unknown command :{name} (try :load, :reset, :state, :quit)")?;
            }
        }
        write_prompt(out)?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_prompt<W: Write>(out: &mut W) -> Result<()> {
    write!(out, "{PROMPT}")?;
    out.flush().context("flush prompt")
}

fn write_state<W: Write>(pipeline: &Pipeline, out: &mut W) -> Result<()> {
    writeln!(out, "state: {:?}", pipeline.state())?;
    writeln!(out, "file: {}", pipeline.selected_file().unwrap_or("-"))?;
    let index = pipeline.index();
    writeln!(out, "records: {}", index.len())?;
    writeln!(out, "territories: {}", index.distinct_keys())?;
    if let Some(failure) = pipeline.failure() {
        writeln!(out, "failure: {failure}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("west"), ReplCommand::Query("west"));
        assert_eq!(parse_line(""), ReplCommand::Query(""));
        assert_eq!(parse_line(":load a b.csv"), ReplCommand::Load("a b.csv"));
        assert_eq!(parse_line(":load"), ReplCommand::Load(""));
        assert_eq!(parse_line(":reset"), ReplCommand::Reset);
        assert_eq!(parse_line(":q"), ReplCommand::Quit);
        assert_eq!(parse_line(":frob"), ReplCommand::Unknown("frob"));
    }

    #[test]
    fn test_query_keeps_surrounding_spaces() {
        assert_eq!(parse_line(" west "), ReplCommand::Query(" west "));
    }
}
