//! Terminal confirmation prompts.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use super::RealRuntime;

/// Ask a y/N question on `output` and read the answer from `input`.
/// Anything other than `y`/`yes` (case-insensitive), including end of input, is a no.
pub(crate) fn confirm_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        writeln!(output)?;
        return Ok(false);
    }

    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

impl RealRuntime {
    pub(crate) fn confirm_impl(&self, prompt: &str) -> Result<bool> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        confirm_with_io(prompt, &mut stdin.lock(), &mut stdout)
    }
}
