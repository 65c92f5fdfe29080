//! Interactive input.
//!
//! Commands never touch the terminal directly. They ask a [`Prompter`] for
//! lines and masked secrets and hand it their user-facing output, so the
//! same flows run against a terminal or a scripted session.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Input, Password};
use spark_package_core::License;

/// Source of user input and sink for user-facing output.
pub trait Prompter {
    /// Shows `prompt` and reads one line, without its line terminator.
    ///
    /// # Errors
    ///
    /// Returns an error if input is exhausted or cannot be read.
    fn line(&mut self, prompt: &str) -> Result<String>;

    /// Like [`Prompter::line`] but the answer is not echoed.
    ///
    /// # Errors
    ///
    /// Returns an error if input is exhausted or cannot be read.
    fn secret(&mut self, prompt: &str) -> Result<String>;

    /// Prints a line of output.
    fn say(&mut self, text: &str);
}

/// Prompts on the controlling terminal, or reads stdin lines when piped.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn interactive() -> bool {
        io::stdin().is_terminal() && io::stdout().is_terminal()
    }

    /// Prints all but the last line of a multi-line prompt and returns the last.
    fn split_prompt(prompt: &str) -> &str {
        match prompt.rsplit_once('\n') {
            Some((head, tail)) => {
                println!("{head}");
                tail
            }
            None => prompt,
        }
    }

    fn read_stdin_line(prompt: &str) -> Result<String> {
        print!("{prompt}");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if read == 0 {
            bail!("Unexpected end of input");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn line(&mut self, prompt: &str) -> Result<String> {
        if !Self::interactive() {
            return Self::read_stdin_line(prompt);
        }
        let prompt = Self::split_prompt(prompt);
        let answer = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.trim_end())
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        if !Self::interactive() {
            return Self::read_stdin_line(prompt);
        }
        let prompt = Self::split_prompt(prompt);
        let answer = Password::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.trim_end())
            .allow_empty_password(true)
            .interact()?;
        Ok(answer)
    }

    fn say(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Asks for a license until a valid menu index is entered.
///
/// # Errors
///
/// Returns an error if input runs out before a valid answer.
pub fn select_license(prompter: &mut dyn Prompter) -> Result<License> {
    let menu = License::selection_menu();
    loop {
        let answer = prompter.line(&menu)?;
        let license = answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(License::from_selection);
        match license {
            Some(license) => return Ok(license),
            None => prompter.say(&format!(
                "Please enter a value between 1-{}",
                License::ALL.len()
            )),
        }
    }
}

/// Replays canned answers and records everything shown to the user.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    /// Prompts and output, in order.
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push(prompt.to_string());
        self.answers
            .pop_front()
            .with_context(|| format!("No scripted answer for prompt: {prompt}"))
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn line(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_license() {
        let mut prompter = ScriptedPrompter::new(["8"]);
        assert_eq!(select_license(&mut prompter).unwrap(), License::Mit);
        assert!(prompter.transcript[0].starts_with("Please select a license"));
    }

    #[test]
    fn test_select_license_reprompts() {
        let mut prompter = ScriptedPrompter::new(["0", "12", "mit", " 11 "]);
        assert_eq!(select_license(&mut prompter).unwrap(), License::Undecided);

        let warnings = prompter
            .transcript
            .iter()
            .filter(|line| *line == "Please enter a value between 1-11")
            .count();
        assert_eq!(warnings, 3);
    }

    #[test]
    fn test_select_license_out_of_input() {
        let mut prompter = ScriptedPrompter::new(["99"]);
        assert!(select_license(&mut prompter).is_err());
    }
}
