//! Terminal input: free-text prompts and yes/no confirmation.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use areg_models::Confirm;

/// Print `prompt` on stderr and read one line from stdin, without the
/// trailing newline.
pub fn read_line(prompt: &str) -> Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt}").context("failed to write prompt")?;
    stderr.flush().context("failed to write prompt")?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Use `value` if given, otherwise ask for it.
pub fn value_or_prompt(value: Option<&str>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v.to_string()),
        None => read_line(prompt),
    }
}

/// Whether a typed answer means yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Confirmation on the terminal, skipped by `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfirm {
    pub assume_yes: bool,
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match read_line(&format!("{prompt} [y/N] ")) {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                tracing::warn!(error = %e, "could not read confirmation; treating as no");
                false
            }
        }
    }
}
