//! Asking the user for input.
//!
//! Prompts go through a [`LineSource`], so the same retry logic drives the
//! real console and scripted test input.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crate::error::PromptError;

/// Something that can show a prompt and hand back one line of input.
pub trait LineSource {
    /// Show `prompt` and return the next line without its terminator, or
    /// `None` once input is exhausted.
    fn request_line(&mut self, prompt: &str) -> Result<Option<String>, PromptError>;
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn request_line(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        (**self).request_line(prompt)
    }
}

/// Line source backed by a reader/writer pair, normally stdin and stdout.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl ConsoleInput<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> LineSource for ConsoleInput<R, W> {
    fn request_line(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        self.writer.write_all(prompt.as_bytes())?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Replays a fixed list of answers and remembers every prompt shown.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl LineSource for ScriptedInput {
    fn request_line(&mut self, prompt: &str) -> Result<Option<String>, PromptError> {
        self.prompts.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// Ask the user to pick one of `choices`, shown numbered from 1.
///
/// Returns the 0-based index of the pick. Unclear answers are asked again.
pub fn prompt_for_choice<S, C>(
    source: &mut S,
    prompt: &str,
    choices: &[C],
) -> Result<usize, PromptError>
where
    S: LineSource + ?Sized,
    C: AsRef<str>,
{
    let menu = choices
        .iter()
        .enumerate()
        .map(|(i, choice)| format!("{}) {}", i + 1, choice.as_ref()))
        .collect::<Vec<_>>()
        .join("\n");
    let question = format!("{prompt}\n{menu}\n");
    let max_choice = choices.len();

    let mut text = question.clone();
    loop {
        let answer = source
            .request_line(&text)?
            .ok_or(PromptError::NoChoiceMade)?;

        match answer.trim().parse::<usize>() {
            Ok(pick) if (1..=max_choice).contains(&pick) => return Ok(pick - 1),
            _ => {
                text = format!(
                    "\nUnclear input, was expecting a value between 1 and {max_choice}, \
                     got {answer}. Please try again\n{question}"
                );
            }
        }
    }
}

/// Ask a yes/no question. Anything other than y/Y/n/N is asked again.
pub fn prompt_yes_or_no<S>(source: &mut S, prompt: &str) -> Result<bool, PromptError>
where
    S: LineSource + ?Sized,
{
    let question = format!("{prompt}\n(Y/N)? ");
    let mut text = question.clone();
    loop {
        let answer = source
            .request_line(&text)?
            .ok_or(PromptError::NoChoiceMade)?;

        match answer.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => text = format!("Unclear input, expecting y/Y/n/N. Please try again.\n{question}"),
        }
    }
}
