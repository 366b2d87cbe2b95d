/*
 * @file ai.rs
 * @brief Gemini chat client and the per-run chat session
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

//! Generative-AI chat.
//!
//! This module handles interaction with Gemini's `generateContent` API and
//! keeps the English conversation history for the run.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::catalog::LanguageCode;
use crate::config::{self, AppConfig, SetupError};
use crate::phrases::Phrase;
use crate::translate::TranslationBridge;

/// Failures reported by a chat model backend.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The request never produced a response.
    #[error("model request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("model service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The service answered but produced no text (e.g. a blocked prompt).
    #[error("model returned an empty reply")]
    EmptyReply,
}

/// One completed exchange, stored in English.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// What the user said, translated to English.
    pub input: String,
    /// What the model answered, in English.
    pub output: String,
}

/// A stateless chat completion capability.
///
/// The caller owns the history and passes it on every call.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends `history` followed by `text` and returns the model's reply.
    ///
    /// # Errors
    /// Returns a [`ModelError`] on any transport, status or payload problem.
    async fn send(&self, history: &[Turn], text: &str) -> Result<String, ModelError>;
}

/// Message content in Gemini's wire format.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

/// A text part inside [`Content`].
#[derive(Clone, Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Request body for `generateContent`.
#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

/// Response body of `generateContent`.
#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Content {
    fn text(role: &str, text: &str) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

/// Client for the Gemini REST API.
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client for `model` against `base_url`.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds a client from configuration and the environment credential.
    ///
    /// # Errors
    /// Returns [`SetupError::MissingCredential`] when no API key is set.
    pub fn from_config(client: reqwest::Client, cfg: &AppConfig) -> Result<Self, SetupError> {
        let api_key = config::google_api_key()?;
        Ok(Self::new(
            client,
            cfg.gemini_base_url.clone(),
            cfg.gemini_model.clone(),
            api_key,
        ))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Converts the history plus the new utterance into Gemini `contents`.
fn build_contents(history: &[Turn], text: &str) -> Vec<Content> {
    let mut contents = Vec::with_capacity(history.len() * 2 + 1);
    for turn in history {
        contents.push(Content::text("user", &turn.input));
        contents.push(Content::text("model", &turn.output));
    }
    contents.push(Content::text("user", text));
    contents
}

/// Joins the text parts of the first candidate.
fn reply_text(response: GenerateResponse) -> Result<String, ModelError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ModelError::EmptyReply);
    }
    Ok(text)
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn send(&self, history: &[Turn], text: &str) -> Result<String, ModelError> {
        let request = GenerateRequest {
            contents: build_contents(history, text),
        };
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: GenerateResponse = response.json().await?;
        reply_text(parsed)
    }
}

/// Conversation state for a single run.
///
/// # Details
/// Owns the append-only English history and the session language. Only
/// turns the model actually answered are recorded.
pub struct ChatSession {
    model: Box<dyn ChatModel>,
    language: LanguageCode,
    history: Vec<Turn>,
}

impl ChatSession {
    /// Opens a session with empty history.
    pub fn initialize(model: Box<dyn ChatModel>, language: LanguageCode) -> Self {
        Self {
            model,
            language,
            history: Vec::new(),
        }
    }

    /// Returns the session language.
    pub fn language(&self) -> LanguageCode {
        self.language
    }

    /// Returns the completed turns, oldest first.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Runs one turn and returns the reply in the session language.
    ///
    /// # Details
    /// Non-English input is translated to English, sent with the history,
    /// and the reply translated back. Translation failures degrade to the
    /// untranslated text; a model failure is logged and answered with the
    /// localized apology. This never returns an error.
    pub async fn converse(&mut self, bridge: &TranslationBridge, user_text: &str) -> String {
        let english_input = if self.language.is_english() {
            user_text.to_string()
        } else {
            bridge.to_english(user_text).await.into_text()
        };

        let reply = match self.model.send(&self.history, &english_input).await {
            Ok(reply) => reply,
            Err(err) => {
                error!(error = %err, "error getting bot response");
                return bridge
                    .localize(Phrase::Apology.english(), &self.language)
                    .await;
            }
        };
        debug!(turns = self.history.len() + 1, "model replied");
        self.history.push(Turn {
            input: english_input,
            output: reply.clone(),
        });

        if self.language.is_english() {
            reply
        } else {
            bridge.translate(&reply, &self.language).await.into_text()
        }
    }
}
