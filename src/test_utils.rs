/*
 * @file test_utils.rs
 * @brief Scripted service doubles shared by the unit tests
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

//! Scripted doubles for every external capability.
//!
//! Each double is cheap to clone and shares its call log between clones, so
//! a test can hand one clone to the code under test and inspect another.

use std::collections::VecDeque;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::ai::{ChatModel, ModelError, Turn};
use crate::audio::Microphone;
use crate::console::Console;
use crate::speech::{
    AudioPlayer, RecognitionError, SpeechRecognizer, SpeechSynthesizer, SynthesisError,
};
use crate::translate::{TranslateError, Translator};

/// Console fed from a fixed script with output captured in memory.
pub type ScriptedConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

/// Builds a console whose input is `script`.
pub fn scripted_console(script: &str) -> ScriptedConsole {
    Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new())
}

/// Returns everything written to a scripted console.
pub fn printed(console: &ScriptedConsole) -> String {
    String::from_utf8_lossy(console.output()).to_string()
}

/// Translator that tags text with the target (`[sw] text`) or always fails.
#[derive(Clone, Default)]
pub struct ScriptedTranslator {
    fail: bool,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedTranslator {
    pub fn tagging() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn targets(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, target)| target.clone())
            .collect()
    }
}

#[async_trait]
impl Translator for ScriptedTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target.to_string()));
        if self.fail {
            return Err(TranslateError::Status(503));
        }
        Ok(format!("[{}] {}", target, text))
    }
}

/// Chat model that answers from a queue, or always fails.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    fail: bool,
    replies: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    history_lengths: Arc<Mutex<Vec<usize>>>,
}

impl ScriptedModel {
    pub fn replying<'a>(replies: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(str::to_string).collect())),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn history_lengths(&self) -> Vec<usize> {
        self.history_lengths.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn send(&self, history: &[Turn], text: &str) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(text.to_string());
        self.history_lengths.lock().unwrap().push(history.len());
        if self.fail {
            return Err(ModelError::Status {
                status: 500,
                body: "simulated outage".to_string(),
            });
        }
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ModelError::EmptyReply)
    }
}

/// Microphone returning canned sample buffers.
#[derive(Clone, Copy)]
pub enum FakeMicrophone {
    Loud,
    Silent,
    Broken,
}

impl FakeMicrophone {
    pub fn loud() -> Self {
        Self::Loud
    }

    pub fn silent() -> Self {
        Self::Silent
    }

    pub fn broken() -> Self {
        Self::Broken
    }
}

impl Microphone for FakeMicrophone {
    fn capture(&self, _window: Duration) -> anyhow::Result<Vec<i16>> {
        match self {
            Self::Loud => Ok(vec![i16::MAX / 2; 1600]),
            Self::Silent => Ok(vec![0; 1600]),
            Self::Broken => anyhow::bail!("No input device"),
        }
    }
}

/// Recognizer that plays back a script of outcomes.
#[derive(Clone, Default)]
pub struct ScriptedRecognizer {
    fallback: Option<String>,
    script: Arc<Mutex<VecDeque<Result<String, RecognitionError>>>>,
    languages: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRecognizer {
    /// Always hears `text`.
    pub fn hearing(text: &str) -> Self {
        Self {
            fallback: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Returns each outcome once, in order.
    pub fn script(outcomes: impl IntoIterator<Item = Result<String, RecognitionError>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            ..Self::default()
        }
    }

    pub fn languages(&self) -> Vec<String> {
        self.languages.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn recognize(&self, _wav: &[u8], language: &str) -> Result<String, RecognitionError> {
        self.languages.lock().unwrap().push(language.to_string());
        if let Some(outcome) = self.script.lock().unwrap().pop_front() {
            return outcome;
        }
        self.fallback
            .clone()
            .ok_or_else(|| RecognitionError::Other("script exhausted".to_string()))
    }
}

/// Synthesizer producing a fixed MP3 stub, or always failing.
#[derive(Clone, Default)]
pub struct ScriptedSynthesizer {
    fail: bool,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedSynthesizer {
    pub fn working() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }

    pub fn languages(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, language)| language.clone())
            .collect()
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));
        if self.fail {
            return Err(SynthesisError::Status(500));
        }
        Ok(b"ID3".to_vec())
    }
}

/// Player that records which files it was asked to play and whether they existed.
#[derive(Clone, Default)]
pub struct RecordingPlayer {
    played: Arc<Mutex<Vec<(PathBuf, bool)>>>,
}

impl RecordingPlayer {
    pub fn played(&self) -> Vec<(PathBuf, bool)> {
        self.played.lock().unwrap().clone()
    }
}

impl AudioPlayer for RecordingPlayer {
    fn play(&self, path: &Path) -> Result<(), SynthesisError> {
        self.played
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));
        Ok(())
    }
}
