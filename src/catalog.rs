/*
 * @file catalog.rs
 * @brief Supported-language catalog and display-name lookup
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

//! Supported-language catalog.
//!
//! The catalog is the only place a [`LanguageCode`] can be minted, so every
//! code that reaches translation, chat or speech has already been validated
//! against the supported set.

use std::fmt;

use crate::iso639;

/// Grouping used when the supported languages are listed to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    /// Regional languages of Kenya.
    Kenyan,
    /// Widely spoken European languages.
    International,
    /// Asian and Middle Eastern languages.
    Asian,
}

impl LanguageFamily {
    /// Returns the heading shown above the family's languages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Kenyan => "Kenyan",
            Self::International => "International",
            Self::Asian => "Asian",
        }
    }
}

/// A validated language code from the supported catalog.
///
/// # Details
/// Wraps the catalog's static token. There is no public constructor: obtain
/// one through [`Catalog::lookup`] or use [`LanguageCode::ENGLISH`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LanguageCode(&'static str);

impl LanguageCode {
    /// English, the pivot language of every conversation.
    pub const ENGLISH: LanguageCode = LanguageCode("en");

    /// Simplified Chinese, the only composite tag in the catalog.
    pub const SIMPLIFIED_CHINESE: LanguageCode = LanguageCode("zh-cn");

    /// Returns the lowercase token, e.g. `"sw"` or `"zh-cn"`.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Returns `true` for English, which needs no translation.
    pub fn is_english(&self) -> bool {
        *self == Self::ENGLISH
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

const KENYAN: &[LanguageCode] = &[
    LanguageCode("sw"),
    LanguageCode("ki"),
    LanguageCode("luo"),
    LanguageCode("kam"),
    LanguageCode("kln"),
    LanguageCode("guz"),
    LanguageCode("mer"),
    LanguageCode("luy"),
    LanguageCode("mas"),
    LanguageCode("tuv"),
    LanguageCode("saq"),
    LanguageCode("dav"),
    LanguageCode("pkm"),
    LanguageCode("rel"),
    LanguageCode("bor"),
];

const INTERNATIONAL: &[LanguageCode] = &[
    LanguageCode::ENGLISH,
    LanguageCode("fr"),
    LanguageCode("es"),
    LanguageCode("de"),
    LanguageCode("pt"),
    LanguageCode("it"),
];

const ASIAN: &[LanguageCode] = &[
    LanguageCode::SIMPLIFIED_CHINESE,
    LanguageCode("ja"),
    LanguageCode("ko"),
    LanguageCode("hi"),
    LanguageCode("ar"),
];

const FAMILIES: &[(LanguageFamily, &[LanguageCode])] = &[
    (LanguageFamily::Kenyan, KENYAN),
    (LanguageFamily::International, INTERNATIONAL),
    (LanguageFamily::Asian, ASIAN),
];

/// Names for languages the ISO registry lacks or names unhelpfully.
const NAME_OVERRIDES: &[(&str, &str)] = &[
    ("sw", "Swahili"),
    ("ki", "Kikuyu"),
    ("luo", "Luo"),
    ("kam", "Kamba"),
    ("kln", "Kalenjin"),
    ("guz", "Kisii"),
    ("mer", "Meru"),
    ("luy", "Luhya"),
    ("mas", "Maasai"),
    ("tuv", "Turkana"),
    ("saq", "Samburu"),
    ("dav", "Taita"),
    ("pkm", "Pokomo"),
    ("rel", "Rendille"),
    ("bor", "Borana"),
];

const KENYAN_REGIONS: &[(&str, &str)] = &[
    ("ki", "Central"),
    ("luo", "Nyanza"),
    ("kam", "Eastern"),
    ("kln", "Rift Valley"),
    ("guz", "Nyanza"),
    ("mer", "Eastern"),
    ("luy", "Western"),
    ("mas", "Rift Valley"),
    ("tuv", "Northern"),
    ("saq", "Central"),
    ("dav", "Coast"),
    ("pkm", "Coast"),
    ("rel", "Northern"),
    ("bor", "Northern"),
];

/// Read-only table of supported languages grouped by family.
///
/// # Details
/// Built once at startup and shared by reference with the resolver and the
/// chat runtime.
#[derive(Clone, Debug)]
pub struct Catalog {
    families: &'static [(LanguageFamily, &'static [LanguageCode])],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Creates the catalog of built-in Kenyan, international and Asian languages.
    pub fn builtin() -> Self {
        Self { families: FAMILIES }
    }

    /// Returns `true` when `code` belongs to any family.
    ///
    /// # Arguments
    /// * `code` - Already-normalized (lowercase, trimmed) code.
    pub fn is_supported(&self, code: &str) -> bool {
        self.lookup(code).is_some()
    }

    /// Validates `code` and returns the matching [`LanguageCode`].
    ///
    /// # Returns
    /// * `Some(LanguageCode)` - The code is in the catalog.
    /// * `None` - The code is unsupported.
    pub fn lookup(&self, code: &str) -> Option<LanguageCode> {
        self.codes().find(|candidate| candidate.as_str() == code)
    }

    /// Iterates over every supported code in family order.
    pub fn codes(&self) -> impl Iterator<Item = LanguageCode> + '_ {
        self.families_with_codes()
            .iter()
            .flat_map(|(_, codes)| codes.iter().copied())
    }

    /// Returns the families with their codes, both in display order.
    pub fn families_with_codes(&self) -> &[(LanguageFamily, &'static [LanguageCode])] {
        self.families
    }

    /// Resolves a human-readable name for `code`.
    ///
    /// # Details
    /// Tries the built-in overrides, then the ISO 639 registry chosen by code
    /// length, then the simplified-Chinese tag, and finally falls back to the
    /// uppercased code. Never fails.
    ///
    /// # Arguments
    /// * `code` - Any code, supported or not.
    ///
    /// # Returns
    /// * `String` - A non-empty name whenever `code` is non-empty.
    pub fn display_name(&self, code: &str) -> String {
        if let Some((_, name)) = NAME_OVERRIDES.iter().find(|(key, _)| *key == code) {
            return (*name).to_string();
        }
        let registry = match code.len() {
            2 => iso639::alpha2_name(code),
            3 => iso639::alpha3_name(code),
            _ if code == LanguageCode::SIMPLIFIED_CHINESE.as_str() => Some("Chinese (Simplified)"),
            _ => None,
        };
        registry
            .map(str::to_string)
            .unwrap_or_else(|| code.to_uppercase())
    }

    /// Returns the Kenyan region a regional language is mostly spoken in.
    pub fn region(&self, code: &str) -> Option<&'static str> {
        KENYAN_REGIONS
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, region)| *region)
    }

    /// Builds the language listing printed before the language prompt.
    ///
    /// # Returns
    /// * `String` - One section per family with one `  - Name (code)` line
    ///   per language; Kenyan entries carry their region when known.
    pub fn render_listing(&self) -> String {
        let mut listing = String::from("Available language families:\n");
        for (family, codes) in self.families_with_codes() {
            listing.push_str(&format!("\n{} Languages:\n", family.label()));
            for code in codes.iter() {
                let name = self.display_name(code.as_str());
                let region = match family {
                    LanguageFamily::Kenyan => self.region(code.as_str()),
                    _ => None,
                };
                match region {
                    Some(region) => {
                        listing.push_str(&format!("  - {} ({}) ({})\n", name, code, region))
                    }
                    None => listing.push_str(&format!("  - {} ({})\n", name, code)),
                }
            }
        }
        listing
    }
}
