// Line-oriented terminal I/O
//
// The loops only talk to a `Prompter`, so the same code runs against the real
// terminal and against in-memory buffers in tests.

use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

use crate::error::{BankError, Result};

pub trait Prompter {
    /// Print one line of output
    fn say(&mut self, message: &str) -> Result<()>;

    /// Print `prompt` (no newline) and read one line of input without its
    /// line terminator. End of input is `InputClosed`.
    fn ask(&mut self, prompt: &str) -> Result<String>;

    /// Like `ask`, for values that should not be echoed. Masking is cosmetic;
    /// the value is returned as typed.
    fn ask_secret(&mut self, prompt: &str) -> Result<String> {
        self.ask(prompt)
    }
}

// ============================================================================
// LINE PROMPTER (any reader/writer pair)
// ============================================================================

pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        LinePrompter { reader, writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(BankError::InputClosed);
        }
        let answer = line.trim_end_matches(['\n', '\r']).to_string();
        Ok(answer)
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;
        self.read_line()
    }
}

// ============================================================================
// TERMINAL PROMPTER (stdin/stdout, masked PIN entry)
// ============================================================================

pub struct TerminalPrompter {
    lines: LinePrompter<StdinLock<'static>, Stdout>,
    mask_secrets: bool,
}

impl TerminalPrompter {
    /// Masking only applies when stdin is an interactive terminal; piped input
    /// is read line by line.
    pub fn new(mask_secrets: bool) -> Self {
        let stdin = io::stdin();
        let mask_secrets = mask_secrets && cfg!(feature = "masked-pin") && stdin.is_terminal();
        TerminalPrompter {
            lines: LinePrompter::new(stdin.lock(), io::stdout()),
            mask_secrets,
        }
    }

    pub fn masks_secrets(&self) -> bool {
        self.mask_secrets
    }

    #[cfg(feature = "masked-pin")]
    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        if self.mask_secrets {
            self.read_masked(prompt)
        } else {
            self.lines.ask(prompt)
        }
    }

    #[cfg(not(feature = "masked-pin"))]
    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.lines.ask(prompt)
    }

    #[cfg(feature = "masked-pin")]
    fn read_masked(&mut self, prompt: &str) -> Result<String> {
        use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

        let out = self.lines.writer_mut();
        write!(out, "{}", prompt)?;
        out.flush()?;

        enable_raw_mode()?;
        let secret = self.read_masked_keys();
        disable_raw_mode()?;

        writeln!(self.lines.writer_mut())?;
        secret
    }

    #[cfg(feature = "masked-pin")]
    fn read_masked_keys(&mut self) -> Result<String> {
        use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

        let mut secret = String::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            let out = self.lines.writer_mut();
            match key.code {
                KeyCode::Enter => return Ok(secret),
                KeyCode::Char('c') if ctrl => return Err(BankError::Interrupted),
                KeyCode::Char('d') if ctrl && secret.is_empty() => {
                    return Err(BankError::InputClosed)
                }
                KeyCode::Backspace => {
                    if secret.pop().is_some() {
                        write!(out, "\x08 \x08")?;
                        out.flush()?;
                    }
                }
                KeyCode::Char(c) if !ctrl => {
                    secret.push(c);
                    write!(out, "*")?;
                    out.flush()?;
                }
                _ => {}
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn say(&mut self, message: &str) -> Result<()> {
        self.lines.say(message)
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        self.lines.ask(prompt)
    }

    fn ask_secret(&mut self, prompt: &str) -> Result<String> {
        self.read_secret(prompt)
    }
}
