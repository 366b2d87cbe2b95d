/*
 * @file translate.rs
 * @brief Translation service client and fail-open translation bridge
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

//! Translation between the user's language and English.
//!
//! [`TranslationBridge`] never fails: when the service errors, the original
//! text comes back wrapped in [`Translation::Fallback`] so callers can see
//! the degraded path but still carry on with the turn.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::catalog::LanguageCode;

/// Failures reported by a translation backend.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The request never produced a response.
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("translation service returned HTTP {0}")]
    Status(u16),

    /// The response body did not have the expected shape.
    #[error("unexpected translation payload: {0}")]
    Payload(String),
}

/// A machine translation capability.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `text` into the service-level language tag `target`.
    ///
    /// # Errors
    /// Returns a [`TranslateError`] on any transport or payload problem.
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;
}

/// Client for Google's public `translate_a/single` endpoint.
pub struct GoogleTranslator {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslator {
    /// Creates a client against `base_url` (no trailing slash).
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.base_url))
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }
        let payload: Value = response.json().await?;
        parse_translation(&payload)
    }
}

/// Extracts the translated text from a `translate_a/single` payload.
///
/// # Details
/// The payload is a nested array whose first element lists sentence
/// segments; the translated text of each segment is at index 0.
///
/// # Errors
/// Returns [`TranslateError::Payload`] if no segment text is present.
pub fn parse_translation(payload: &Value) -> Result<String, TranslateError> {
    let segments = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Payload("missing sentence list".to_string()))?;
    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        return Err(TranslateError::Payload("no translated segments".to_string()));
    }
    Ok(text)
}

/// Outcome of a bridge translation.
#[derive(Debug)]
pub enum Translation {
    /// The service returned a translation.
    Translated(String),
    /// The service failed; `text` is the untouched input.
    Fallback {
        /// The original, untranslated text.
        text: String,
        /// Why the service call failed.
        reason: TranslateError,
    },
}

impl Translation {
    /// Returns the text to show, translated or not.
    pub fn into_text(self) -> String {
        match self {
            Self::Translated(text) | Self::Fallback { text, .. } => text,
        }
    }
}

/// Maps a catalog code to the tag the translation service expects.
///
/// Only simplified Chinese differs: the service wants `zh-CN`.
pub fn service_code(language: &LanguageCode) -> &'static str {
    if *language == LanguageCode::SIMPLIFIED_CHINESE {
        "zh-CN"
    } else {
        language.as_str()
    }
}

/// Fail-open wrapper around a [`Translator`].
pub struct TranslationBridge {
    translator: Box<dyn Translator>,
}

impl TranslationBridge {
    /// Wraps `translator`.
    pub fn new(translator: Box<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Translates `text` into `target`.
    ///
    /// # Details
    /// Failures are logged and turned into [`Translation::Fallback`] carrying
    /// the original text. There is no retry and no cache.
    pub async fn translate(&self, text: &str, target: &LanguageCode) -> Translation {
        let tag = service_code(target);
        match self.translator.translate(text, tag).await {
            Ok(translated) => {
                debug!(language = tag, "translated text");
                Translation::Translated(translated)
            }
            Err(reason) => {
                warn!(language = tag, error = %reason, "translation error, keeping original text");
                Translation::Fallback {
                    text: text.to_string(),
                    reason,
                }
            }
        }
    }

    /// Translates `text` into English.
    pub async fn to_english(&self, text: &str) -> Translation {
        self.translate(text, &LanguageCode::ENGLISH).await
    }

    /// Renders English `text` for a session in `language`.
    ///
    /// # Details
    /// English sessions skip the service entirely.
    pub async fn localize(&self, text: &str, language: &LanguageCode) -> String {
        if language.is_english() {
            return text.to_string();
        }
        self.translate(text, language).await.into_text()
    }
}
