//! User confirmation handling.

use std::io::{self, BufRead, Write};

/// Answer to a yes/no question. Anything that is not an explicit yes is
/// treated as [`Decision::No`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
}

impl Decision {
    /// Maps one input line to a decision. Only a case-insensitive `y` or
    /// `yes` counts as yes; empty input and anything else is no.
    pub fn from_line(line: &str) -> Self {
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
            Decision::Yes
        } else {
            Decision::No
        }
    }
}

/// Prints `message` and reads exactly one line from `input`. Never
/// re-prompts; end-of-stream reads as an empty line, so the answer
/// defaults to no.
pub fn ask<R: BufRead, W: Write>(
    message: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<Decision> {
    write!(output, "{} ", message)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(Decision::from_line(&line))
}
