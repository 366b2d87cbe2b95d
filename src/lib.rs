/*
 * @file lib.rs
 * @brief Karibu library root
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

//! Karibu - a multilingual text and voice chat assistant.
//!
//! This library provides a terminal chat assistant that uses:
//! - A catalog of Kenyan, international and Asian languages
//! - Google's free translate endpoint to bridge the user's language and English
//! - Gemini for conversational AI
//! - Google Cloud Speech and Translate TTS for voice mode
//!
//! # Example
//! ```no_run
//! use anyhow::Result;
//! use karibu::assistant;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     dotenv::dotenv().ok();
//!     assistant::run_chat_assistant().await
//! }
//! ```

pub mod ai;
pub mod assistant;
pub mod audio;
pub mod catalog;
pub mod config;
pub mod console;
pub mod iso639;
pub mod phrases;
pub mod resolver;
pub mod speech;
pub mod translate;

#[cfg(test)]
mod test_utils;
