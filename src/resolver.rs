/*
 * @file resolver.rs
 * @brief Interactive preferred-language selection
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

//! Preferred-language negotiation.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::{debug, info};

use crate::catalog::{Catalog, LanguageCode};
use crate::console::Console;

/// Prompt printed before each attempt.
pub const LANGUAGE_PROMPT: &str =
    "Please enter your preferred language code (e.g., 'sw' for Swahili, 'en' for English):";

/// Asks for a language code until the user enters a supported one.
///
/// # Details
/// Each answer is trimmed and lowercased before the catalog check. Rejected
/// codes are named back to the user and the prompt repeats with no attempt
/// limit.
///
/// # Arguments
/// * `catalog` - The supported-language catalog.
/// * `console` - Where prompts go and answers come from.
///
/// # Returns
/// * `Ok(LanguageCode)` - The first supported code entered.
///
/// # Errors
/// Returns [`crate::console::InputClosed`] if input ends before a supported
/// code arrives, or any console I/O error.
pub fn resolve<R: BufRead, W: Write>(
    catalog: &Catalog,
    console: &mut Console<R, W>,
) -> Result<LanguageCode> {
    loop {
        console.say("")?;
        console.say(LANGUAGE_PROMPT)?;
        let answer = normalize(&console.require_line()?);
        if let Some(language) = catalog.lookup(&answer) {
            info!(language = %language, "preferred language selected");
            return Ok(language);
        }
        debug!(code = %answer, "unsupported language code");
        console.say(&rejection_message(&answer))?;
    }
}

/// Trims whitespace and lowercases a raw answer.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Builds the message shown when `code` is not in the catalog.
pub fn rejection_message(code: &str) -> String {
    format!(
        "Sorry, '{}' is not supported. Please choose from the available languages listed above.",
        code
    )
}
