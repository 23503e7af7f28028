//! Interactive prompt handling.
//!
//! Prompts read one answer at a time from the operator. On a terminal the
//! [`DialoguerPrompter`] uses `dialoguer`; when stdin is piped it falls back
//! to reading plain lines so answers can be scripted.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;

use crate::errors::CoreError;

/// Masked (no-echo) input is not available on this terminal.
///
/// Callers detect it with `downcast_ref` and retry with visible input.
#[derive(Debug, thiserror::Error)]
#[error("masked input unsupported: {0}")]
pub struct MaskedInputUnsupported(pub String);

/// Check if a prompt error means masked input is unavailable.
pub fn is_masked_input_unsupported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<MaskedInputUnsupported>().is_some()
}

/// Check if a prompt error means the operator interrupted it.
pub fn is_interrupted(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::PromptInterrupted)
    )
}

/// Map a failed masked read to the error callers act on.
///
/// Only failures of the terminal layer itself (no tty to open, terminal
/// modes that cannot be changed) become [`MaskedInputUnsupported`] and allow
/// the visible fallback. An interrupted read is [`CoreError::PromptInterrupted`];
/// anything else is [`CoreError::Prompt`].
pub fn password_error(err: io::Error) -> anyhow::Error {
    match err.kind() {
        io::ErrorKind::Interrupted => CoreError::PromptInterrupted.into(),
        io::ErrorKind::Unsupported | io::ErrorKind::NotConnected => {
            MaskedInputUnsupported(err.to_string()).into()
        }
        // tty open and termios calls fail with an OS error code
        _ if err.raw_os_error().is_some() => MaskedInputUnsupported(err.to_string()).into(),
        _ => CoreError::Prompt(err.to_string()).into(),
    }
}

fn input_error(err: io::Error) -> anyhow::Error {
    if err.kind() == io::ErrorKind::Interrupted {
        CoreError::PromptInterrupted.into()
    } else {
        CoreError::Prompt(err.to_string()).into()
    }
}

/// Trait for interactive terminal prompts.
pub trait Prompter: Send + Sync + std::fmt::Debug {
    /// Prompt for one line of visible input.
    fn input(&self, prompt: &str) -> Result<String>;

    /// Prompt for masked input (hidden).
    ///
    /// Fails with [`MaskedInputUnsupported`] when input cannot be hidden.
    fn password(&self, prompt: &str) -> Result<String>;
}

/// Dialoguer-based prompter implementation.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    /// Create a new prompter.
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        if !io::stdin().is_terminal() {
            let stdin = io::stdin();
            let mut reader = stdin.lock();
            let mut stderr = io::stderr();
            return read_plain_line(prompt, &mut reader, &mut stderr);
        }
        Ok(dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| input_error(e.into()))?)
    }

    fn password(&self, prompt: &str) -> Result<String> {
        if !io::stdin().is_terminal() {
            return Err(MaskedInputUnsupported("stdin is not a terminal".to_string()).into());
        }
        Ok(dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| password_error(e.into()))?)
    }
}

/// Write `prompt: ` and read a single line, without the line terminator.
///
/// # Errors
///
/// Returns [`CoreError::Prompt`] at end of input, or the I/O error.
pub fn read_plain_line<R: BufRead, W: Write>(
    prompt: &str,
    reader: &mut R,
    writer: &mut W,
) -> Result<String> {
    write!(writer, "{prompt}: ")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(CoreError::Prompt("unexpected end of input".to_string()).into());
    }
    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(trimmed.to_string())
}

/// Stub prompter for testing that returns pre-configured answers.
///
/// Answers are consumed in order; an exhausted queue behaves like a closed
/// stdin. Every prompt text is recorded in `prompts`.
#[derive(Debug, Default)]
pub struct StubPrompter {
    /// Pre-configured visible input answers.
    pub input_answers: std::sync::Mutex<Vec<String>>,
    /// Pre-configured masked input answers.
    pub password_answers: std::sync::Mutex<Vec<String>>,
    /// When set, `password` fails as if the terminal cannot hide input.
    pub masked_unsupported: std::sync::atomic::AtomicBool,
    /// When set, every prompt fails as if the operator pressed Ctrl-C.
    pub interrupted: std::sync::atomic::AtomicBool,
    /// Prompts shown so far.
    pub prompts: std::sync::Mutex<Vec<String>>,
}

impl StubPrompter {
    /// Queue visible answers.
    pub fn push_inputs<I, S>(&self, answers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_answers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .extend(answers.into_iter().map(Into::into));
    }

    /// Number of prompts shown so far.
    pub fn prompt_count(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    fn record(&self, prompt: &str) -> Result<()> {
        self.prompts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(prompt.to_string());
        if self.interrupted.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(CoreError::PromptInterrupted.into());
        }
        Ok(())
    }

    fn next(queue: &std::sync::Mutex<Vec<String>>) -> Result<String> {
        let mut answers = queue
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if answers.is_empty() {
            Err(CoreError::Prompt("unexpected end of input".to_string()).into())
        } else {
            Ok(answers.remove(0))
        }
    }
}

impl Prompter for StubPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        self.record(prompt)?;
        Self::next(&self.input_answers)
    }

    fn password(&self, prompt: &str) -> Result<String> {
        self.record(prompt)?;
        if self
            .masked_unsupported
            .load(std::sync::atomic::Ordering::SeqCst)
        {
            return Err(MaskedInputUnsupported("stub terminal".to_string()).into());
        }
        Self::next(&self.password_answers)
    }
}
