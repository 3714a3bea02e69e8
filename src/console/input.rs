//! Raw line input/output behind the console.

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};
use tracing::{debug, instrument};

/// Error talking to the terminal.
#[derive(Debug, derive_more::Display)]
pub enum ConsoleError {
    /// Reading or writing failed.
    #[display("I/O error: {}", _0)]
    Io(io::Error),
    /// Input ended while a prompt was waiting for an answer.
    #[display("Input closed")]
    InputClosed,
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConsoleError::Io(err) => Some(err),
            ConsoleError::InputClosed => None,
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Line-oriented terminal access.
pub trait Prompter {
    /// Prints one line.
    fn say(&mut self, text: &str) -> Result<(), ConsoleError>;

    /// Reads one line without its line ending.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::InputClosed`] at end of input.
    fn read_line(&mut self) -> Result<String, ConsoleError>;

    /// Clears the screen. May be a no-op.
    fn clear_screen(&mut self) -> Result<(), ConsoleError>;
}

/// [`Prompter`] over any reader and writer.
///
/// Use [`LinePrompter::stdio`] for the real terminal; tests feed a script
/// through a `Cursor` and inspect the written bytes.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
    clear: bool,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Wraps a reader and writer. Screen clearing starts disabled.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            clear: false,
        }
    }

    /// Enables or disables screen clearing.
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    /// Consumes the prompter, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter on the process's stdin and stdout, clearing the screen between views.
    #[instrument]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout()).with_clear(true)
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ConsoleError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("Input stream ended");
            return Err(ConsoleError::InputClosed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']);
        Ok(trimmed.to_string())
    }

    fn clear_screen(&mut self) -> Result<(), ConsoleError> {
        if self.clear {
            execute!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}
