/*
 * @file config.rs
 * @brief Runtime configuration and credential loading
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

//! Runtime configuration.
//!
//! Defaults are baked in; an optional `config.json` in the working directory
//! overrides them, and a few environment variables override both. The
//! Google API key only ever comes from the environment (or `.env`).

use std::{env, fs, io, path::Path};

use serde::Deserialize;
use tracing::{debug, warn};

/// Path to the JSON configuration file that holds runtime defaults.
pub const CONFIG_PATH: &str = "config.json";

/// Environment variable carrying the Gemini and Cloud Speech credential.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Environment override for [`AppConfig::gemini_model`].
pub const MODEL_VAR: &str = "KARIBU_GEMINI_MODEL";

/// Environment override for [`AppConfig::audio_player`].
pub const PLAYER_VAR: &str = "KARIBU_AUDIO_PLAYER";

/// Errors that abort startup before the chat loop begins.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// A required credential is not present in the environment.
    #[error("missing credential: {name} is not set")]
    MissingCredential {
        /// Name of the environment variable that was looked up.
        name: &'static str,
    },

    /// Voice mode was chosen but no microphone can be opened.
    #[error("microphone unavailable: {0}")]
    MicrophoneUnavailable(String),

    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Strongly typed representation of `config.json`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Gemini model name used for every turn.
    pub gemini_model: String,
    /// Base URL of the Gemini REST API.
    pub gemini_base_url: String,
    /// Base URL of the translation endpoint.
    pub translate_base_url: String,
    /// Base URL of the Cloud Speech-to-Text API.
    pub speech_base_url: String,
    /// Base URL of the text-to-speech endpoint.
    pub tts_base_url: String,
    /// Command used to play synthesized MP3 files.
    pub audio_player: String,
    /// Transient file the synthesized audio is written to.
    pub tts_output_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gemini_model: "gemini-pro".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            translate_base_url: "https://translate.googleapis.com".to_string(),
            speech_base_url: "https://speech.googleapis.com".to_string(),
            tts_base_url: "https://translate.google.com".to_string(),
            audio_player: default_audio_player().to_string(),
            tts_output_path: "output.mp3".to_string(),
        }
    }
}

impl AppConfig {
    /// Applies environment overrides on top of the file values.
    ///
    /// # Arguments
    /// * `lookup` - Variable reader, normally [`std::env::var`].
    ///
    /// # Returns
    /// * `Self` - The configuration with non-empty overrides applied.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(model) = lookup(MODEL_VAR).filter(|value| !value.trim().is_empty()) {
            self.gemini_model = model.trim().to_string();
        }
        if let Some(player) = lookup(PLAYER_VAR).filter(|value| !value.trim().is_empty()) {
            self.audio_player = player.trim().to_string();
        }
        self
    }
}

/// Loads configuration from `config.json` and the environment.
pub fn load_app_config() -> AppConfig {
    load_app_config_from(Path::new(CONFIG_PATH)).with_overrides(|name| env::var(name).ok())
}

/// Loads configuration from `path`, falling back to baked defaults.
///
/// # Details
/// A missing file is normal and only noted at debug level; an unreadable or
/// malformed file is logged as a warning. Either way the defaults are used.
pub fn load_app_config_from(path: &Path) -> AppConfig {
    match fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config parse error, using defaults");
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            AppConfig::default()
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "config load error, using defaults");
            AppConfig::default()
        }
    }
}

/// Reads the Google API key from the environment.
///
/// # Errors
/// Returns [`SetupError::MissingCredential`] when the variable is unset or blank.
pub fn google_api_key() -> Result<String, SetupError> {
    api_key_from(|name| env::var(name).ok())
}

fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Result<String, SetupError> {
    lookup(API_KEY_VAR)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(SetupError::MissingCredential { name: API_KEY_VAR })
}

/// Builds the HTTP client shared by every service.
///
/// # Errors
/// Returns [`SetupError::HttpClient`] if TLS initialisation fails.
pub fn http_client() -> Result<reqwest::Client, SetupError> {
    reqwest::Client::builder()
        .user_agent(concat!("karibu/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(SetupError::HttpClient)
}

fn default_audio_player() -> &'static str {
    if cfg!(target_os = "macos") {
        "afplay"
    } else {
        "mpg123"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_app_config_from(&dir.path().join("config.json"));
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.gemini_model, "gemini-pro");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"gemini_model": "gemini-1.5-flash"}}"#).unwrap();
        let cfg = load_app_config_from(file.path());
        assert_eq!(cfg.gemini_model, "gemini-1.5-flash");
        assert_eq!(cfg.tts_output_path, "output.mp3");
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert_eq!(load_app_config_from(file.path()), AppConfig::default());
    }

    #[test]
    fn environment_overrides_win() {
        let cfg = AppConfig::default().with_overrides(|name| match name {
            MODEL_VAR => Some(" gemini-2.0-flash ".to_string()),
            PLAYER_VAR => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(cfg.gemini_model, "gemini-2.0-flash");
        assert_eq!(cfg.audio_player, default_audio_player());
    }

    #[test]
    fn api_key_must_be_present() {
        let err = api_key_from(|_| None).unwrap_err();
        assert!(err.to_string().contains(API_KEY_VAR));
        assert!(api_key_from(|_| Some("  ".to_string())).is_err());
        assert_eq!(api_key_from(|_| Some(" k ".to_string())).unwrap(), "k");
    }
}
