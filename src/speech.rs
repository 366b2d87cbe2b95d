/*
 * @file speech.rs
 * @brief Speech recognition, speech synthesis and audio playback
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

//! Voice input and output.
//!
//! Recognition goes through Cloud Speech-to-Text, synthesis through the
//! Google Translate TTS endpoint, and playback through an external player
//! command. Every failure here is per-turn: callers log it and move on.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::audio::{self, Microphone, LISTEN_TIMEOUT, SAMPLE_RATE};
use crate::catalog::LanguageCode;
use crate::config::{self, AppConfig, SetupError};

/// Longest text the TTS endpoint accepts in one request.
const TTS_CHUNK_CHARS: usize = 100;

/// Recognition language used when a code has no explicit acoustic model.
const DEFAULT_ACOUSTIC_MODEL: &str = "en-US";

/// Acoustic models for languages the recognizer handles directly.
///
/// Kikuyu has no model of its own and is recognized as Kenyan English.
const ACOUSTIC_MODELS: &[(&str, &str)] = &[
    ("en", "en-US"),
    ("sw", "sw-KE"),
    ("ki", "en-KE"),
    ("fr", "fr-FR"),
    ("es", "es-ES"),
];

/// Synthesis voices for codes the TTS endpoint does not accept as-is.
///
/// Kenyan languages without a voice are read out in English.
const TTS_VOICES: &[(&str, &str)] = &[
    ("sw", "sw"),
    ("ki", "en"),
    ("luo", "en"),
    ("kam", "en"),
    ("zh-cn", "zh-CN"),
];

/// Why a voice turn produced no text.
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    /// The recognition service could not be reached or refused the request.
    #[error("Could not request results from speech recognition service: {0}")]
    Unreachable(String),

    /// The service understood nothing in the audio.
    #[error("Could not understand audio")]
    Unintelligible,

    /// Anything else, including microphone failures.
    #[error("Error in voice recognition: {0}")]
    Other(String),
}

/// Why a reply could not be spoken.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// Nothing to say.
    #[error("cannot speak empty text")]
    EmptyText,

    /// The synthesis request failed.
    #[error("speech synthesis request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The synthesis service answered with a non-success status.
    #[error("speech synthesis service returned HTTP {0}")]
    Status(u16),

    /// The audio file could not be written.
    #[error("failed to write synthesized audio: {0}")]
    Io(#[from] std::io::Error),

    /// The player command failed.
    #[error("audio player failed: {0}")]
    Player(String),
}

/// Returns the recognition language for a session language.
pub fn acoustic_model(language: &LanguageCode) -> &'static str {
    ACOUSTIC_MODELS
        .iter()
        .find(|(code, _)| *code == language.as_str())
        .map(|(_, model)| *model)
        .unwrap_or(DEFAULT_ACOUSTIC_MODEL)
}

/// Returns the synthesis language for a session language.
pub fn tts_language(language: &LanguageCode) -> &'static str {
    TTS_VOICES
        .iter()
        .find(|(code, _)| *code == language.as_str())
        .map(|(_, voice)| *voice)
        .unwrap_or(language.as_str())
}

/// A speech-to-text capability.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribes a 16 kHz mono WAV payload spoken in `language`.
    ///
    /// # Errors
    /// Returns a [`RecognitionError`] describing why no text was produced.
    async fn recognize(&self, wav: &[u8], language: &str) -> Result<String, RecognitionError>;
}

/// A text-to-speech capability producing MP3 bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes `text` in `language`.
    ///
    /// # Errors
    /// Returns a [`SynthesisError`] on any transport or status problem.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError>;
}

/// Plays an audio file to completion.
pub trait AudioPlayer: Send + Sync {
    /// Plays the file at `path`, blocking until playback ends.
    ///
    /// # Errors
    /// Returns [`SynthesisError::Player`] if playback fails.
    fn play(&self, path: &Path) -> Result<(), SynthesisError>;
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

/// Client for Cloud Speech-to-Text `speech:recognize`.
pub struct GoogleSpeechRecognizer {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleSpeechRecognizer {
    /// Creates a client against `base_url`.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechRecognizer {
    async fn recognize(&self, wav: &[u8], language: &str) -> Result<String, RecognitionError> {
        let body = json!({
            "config": {
                "encoding": "LINEAR16",
                "sampleRateHertz": SAMPLE_RATE,
                "languageCode": language,
            },
            "audio": {
                "content": base64::engine::general_purpose::STANDARD.encode(wav),
            },
        });
        let response = self
            .client
            .post(format!("{}/v1/speech:recognize", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|err| RecognitionError::Unreachable(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RecognitionError::Unreachable(format!(
                "recognition request failed: HTTP {}",
                status.as_u16()
            )));
        }
        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|err| RecognitionError::Other(err.to_string()))?;
        let transcript = parsed
            .results
            .iter()
            .filter_map(|result| result.alternatives.first())
            .map(|alternative| alternative.transcript.trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if transcript.is_empty() {
            return Err(RecognitionError::Unintelligible);
        }
        Ok(transcript)
    }
}

/// Client for the Google Translate `translate_tts` endpoint.
pub struct GoogleTts {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTts {
    /// Creates a client against `base_url`.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, SynthesisError> {
        let chunks = split_for_tts(text, TTS_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        let total = chunks.len().to_string();
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let response = self
                .client
                .get(format!("{}/translate_tts", self.base_url))
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", language),
                    ("q", chunk.as_str()),
                    ("idx", idx.as_str()),
                    ("total", total.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?;
            let status = response.status();
            if !status.is_success() {
                return Err(SynthesisError::Status(status.as_u16()));
            }
            audio.extend_from_slice(&response.bytes().await?);
        }
        Ok(audio)
    }
}

/// Splits `text` into pieces of at most `max_chars` characters.
///
/// # Details
/// Breaks on whitespace where possible; a single word longer than the limit
/// is cut at character boundaries.
pub fn split_for_tts(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if word_len > max_chars {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Plays audio by running an external command with the file path.
pub struct CommandPlayer {
    program: String,
}

impl CommandPlayer {
    /// Uses `program` (e.g. `afplay`, `mpg123`) as the player.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl AudioPlayer for CommandPlayer {
    fn play(&self, path: &Path) -> Result<(), SynthesisError> {
        let status = Command::new(&self.program)
            .arg(path)
            .status()
            .map_err(|err| SynthesisError::Player(format!("{}: {}", self.program, err)))?;
        if !status.success() {
            return Err(SynthesisError::Player(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}

/// RAII guard that removes the synthesized audio file at scope exit.
struct TempAudioGuard {
    path: PathBuf,
}

impl TempAudioGuard {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl Drop for TempAudioGuard {
    fn drop(&mut self) {
        fs::remove_file(&self.path).ok();
    }
}

/// Voice-mode I/O: microphone, recognizer, synthesizer and player.
pub struct Voice {
    microphone: Box<dyn Microphone>,
    recognizer: Box<dyn SpeechRecognizer>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    player: Box<dyn AudioPlayer>,
    output_path: PathBuf,
}

impl Voice {
    /// Assembles voice I/O from its parts.
    pub fn new(
        microphone: Box<dyn Microphone>,
        recognizer: Box<dyn SpeechRecognizer>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        player: Box<dyn AudioPlayer>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            microphone,
            recognizer,
            synthesizer,
            player,
            output_path: output_path.into(),
        }
    }

    /// Builds the Google-backed voice stack from configuration.
    ///
    /// # Errors
    /// Returns [`SetupError::MicrophoneUnavailable`] when no input device can
    /// be opened, or [`SetupError::MissingCredential`] when no API key is set.
    pub fn from_config(client: reqwest::Client, cfg: &AppConfig) -> Result<Self, SetupError> {
        audio::ensure_input_device()
            .map_err(|err| SetupError::MicrophoneUnavailable(err.to_string()))?;
        let api_key = config::google_api_key()?;
        Ok(Self::new(
            Box::new(audio::DefaultMicrophone),
            Box::new(GoogleSpeechRecognizer::new(
                client.clone(),
                cfg.speech_base_url.clone(),
                api_key,
            )),
            Box::new(GoogleTts::new(client, cfg.tts_base_url.clone())),
            Box::new(CommandPlayer::new(cfg.audio_player.clone())),
            cfg.tts_output_path.clone(),
        ))
    }

    /// Captures one utterance and transcribes it.
    ///
    /// # Details
    /// The microphone is open for [`LISTEN_TIMEOUT`]. A silent capture is
    /// reported the way a recognizer reports a listen timeout.
    ///
    /// # Errors
    /// Returns a [`RecognitionError`]; callers treat it as an empty turn.
    pub async fn listen(&self, language: &LanguageCode) -> Result<String, RecognitionError> {
        let samples = self
            .microphone
            .capture(LISTEN_TIMEOUT)
            .map_err(|err| RecognitionError::Other(err.to_string()))?;
        if !audio::contains_speech(&samples) {
            return Err(RecognitionError::Other(
                "listening timed out while waiting for phrase to start".to_string(),
            ));
        }
        let wav =
            audio::encode_wav(&samples).map_err(|err| RecognitionError::Other(err.to_string()))?;
        let model = acoustic_model(language);
        debug!(model, bytes = wav.len(), "sending audio for recognition");
        self.recognizer.recognize(&wav, model).await
    }

    /// Speaks `text`, logging rather than returning any failure.
    pub async fn speak(&self, text: &str, language: &LanguageCode) {
        if let Err(err) = self.try_speak(text, language).await {
            warn!(error = %err, "text-to-speech error");
        }
    }

    /// Synthesizes, writes, plays and deletes one audio file.
    async fn try_speak(&self, text: &str, language: &LanguageCode) -> Result<(), SynthesisError> {
        if text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }
        let voice = tts_language(language);
        let audio = self.synthesizer.synthesize(text, voice).await?;
        let _guard = TempAudioGuard::new(&self.output_path);
        fs::write(&self.output_path, audio)?;
        self.player.play(&self.output_path)
    }
}
