//! Operator prompt on stdin/stdout.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

/// Print `question` and read one line. Returns `None` at end of input.
///
/// The answer is read as raw bytes and decoded lossily, so invalid UTF-8 is
/// just another answer rather than an error. The returned line keeps its
/// terminator; callers decide how to compare it.
pub fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<Option<String>> {
    write!(output, "{question} ").context("write prompt")?;
    output.flush().context("flush prompt")?;

    let mut line = Vec::new();
    let n = input.read_until(b'\n', &mut line).context("read answer")?;
    if n == 0 {
        writeln!(output).context("write newline")?;
        return Ok(None);
    }
    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}
