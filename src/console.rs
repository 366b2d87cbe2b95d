/*
 * @file console.rs
 * @brief Line-oriented terminal input and output
 * @author Kevin Thomas
 * @date 2025
 *
 * MIT License
 *
 * Copyright (c) 2025 Kevin Thomas
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Line-oriented console used by every interactive prompt.
//!
//! Generic over the reader and writer so tests can drive the prompts with a
//! scripted byte buffer instead of a terminal.

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use anyhow::{Context, Result};

/// Raised when the input stream ends while a prompt is waiting for a line.
#[derive(Debug, thiserror::Error)]
#[error("console input closed")]
pub struct InputClosed;

/// Blocking console bound to a line reader and an output sink.
pub struct Console<R, W> {
    input: R,
    output: W,
}

/// Console attached to the process's standard streams.
pub type StdConsole = Console<StdinLock<'static>, Stdout>;

/// Opens a console on stdin/stdout.
pub fn stdio() -> StdConsole {
    let stdin: Stdin = io::stdin();
    Console::new(stdin.lock(), io::stdout())
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wraps the given reader and writer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one full line.
    ///
    /// # Errors
    /// Returns an error if the output sink rejects the write.
    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line).context("Failed to write to console")?;
        self.output.flush().context("Failed to flush console")
    }

    /// Writes `text` without a trailing newline so input follows on the same line.
    pub fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text).context("Failed to write to console")?;
        self.output.flush().context("Failed to flush console")
    }

    /// Reads one line with surrounding whitespace removed.
    ///
    /// # Returns
    /// * `Ok(Some(String))` - The trimmed line (possibly empty).
    /// * `Ok(None)` - The input stream has ended.
    ///
    /// # Errors
    /// Returns an error if the underlying reader fails.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from console")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Reads one line, treating end of input as an error.
    ///
    /// # Errors
    /// Returns [`InputClosed`] when the stream has ended.
    pub fn require_line(&mut self) -> Result<String> {
        self.read_line()?.ok_or_else(|| InputClosed.into())
    }

    /// Returns the output sink, mainly so tests can inspect what was printed.
    pub fn output(&self) -> &W {
        &self.output
    }
}
