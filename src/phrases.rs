/*
 * @file phrases.rs
 * @brief Canned phrases for languages with weak machine translation
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

//! Canned phrase book.

use crate::catalog::LanguageCode;

/// Fixed messages the assistant speaks outside of model replies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phrase {
    /// Greeting shown once the session is ready.
    Welcome,
    /// Farewell shown when the user exits.
    Goodbye,
    /// Prompt asking for text or voice mode.
    ChooseFormat,
    /// Reply used when a turn fails.
    Apology,
}

impl Phrase {
    /// Returns the English source text that gets machine-translated when the
    /// phrase book has no entry for the session language.
    pub fn english(self) -> &'static str {
        match self {
            Self::Welcome => "Hello, how can I help you?",
            Self::Goodbye => "Goodbye! Take care!",
            Self::ChooseFormat => "Choose format: 1 for text, 2 for voice",
            Self::Apology => "I'm sorry, I couldn't process that request.",
        }
    }
}

/// Hand-written phrases for a single language.
#[derive(Clone, Copy, Debug)]
struct CannedPhrases {
    welcome: &'static str,
    goodbye: &'static str,
    choose_format: &'static str,
}

const ENTRIES: &[(&str, CannedPhrases)] = &[
    (
        "sw",
        CannedPhrases {
            welcome: "Karibu! Naweza kukusaidia vipi?",
            goodbye: "Kwaheri! Tutaonana tena!",
            choose_format: "Chagua muundo: 1 kwa maandishi, 2 kwa sauti",
        },
    ),
    (
        "ki",
        CannedPhrases {
            welcome: "Nĩ wega mũno! Ndĩ ngũteithia atĩa?",
            goodbye: "Nĩ wega! Tũgũcemania rĩngĩ!",
            choose_format: "Thuura njira: 1 kwa wandiki, 2 kwa mũgambo",
        },
    ),
];

/// Static lookup of canned phrases keyed by language.
#[derive(Clone, Debug)]
pub struct PhraseBook {
    entries: &'static [(&'static str, CannedPhrases)],
}

impl Default for PhraseBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PhraseBook {
    /// Creates the phrase book with the built-in Swahili and Kikuyu entries.
    pub fn builtin() -> Self {
        Self { entries: ENTRIES }
    }

    /// Returns the canned text for `phrase` in `language`, if one exists.
    ///
    /// # Returns
    /// * `Some(&str)` - Hand-written text that must be used verbatim.
    /// * `None` - Callers should translate [`Phrase::english`] instead.
    pub fn canned(&self, language: &LanguageCode, phrase: Phrase) -> Option<&'static str> {
        let (_, canned) = self
            .entries
            .iter()
            .find(|(code, _)| *code == language.as_str())?;
        match phrase {
            Phrase::Welcome => Some(canned.welcome),
            Phrase::Goodbye => Some(canned.goodbye),
            Phrase::ChooseFormat => Some(canned.choose_format),
            Phrase::Apology => None,
        }
    }
}
