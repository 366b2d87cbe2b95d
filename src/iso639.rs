/*
 * @file iso639.rs
 * @brief ISO 639 language registry used for display names
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

//! ISO 639 language registry.
//!
//! Two-letter identifiers resolve through ISO 639-1, three-letter ones
//! through ISO 639-2/3. Only English reference names are carried; callers
//! decide what to do with codes the registry does not know.

/// Returns the English reference name of an ISO 639-1 two-letter code.
///
/// # Arguments
/// * `code` - Lowercase two-letter identifier.
///
/// # Returns
/// * `Some(&str)` - The registry name.
/// * `None` - The code is not assigned in ISO 639-1.
pub fn alpha2_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "aa" => "Afar",
        "ab" => "Abkhazian",
        "af" => "Afrikaans",
        "ak" => "Akan",
        "am" => "Amharic",
        "an" => "Aragonese",
        "ar" => "Arabic",
        "as" => "Assamese",
        "av" => "Avaric",
        "ay" => "Aymara",
        "az" => "Azerbaijani",
        "ba" => "Bashkir",
        "be" => "Belarusian",
        "bg" => "Bulgarian",
        "bi" => "Bislama",
        "bm" => "Bambara",
        "bn" => "Bengali",
        "bo" => "Tibetan",
        "br" => "Breton",
        "bs" => "Bosnian",
        "ca" => "Catalan",
        "ce" => "Chechen",
        "ch" => "Chamorro",
        "co" => "Corsican",
        "cr" => "Cree",
        "cs" => "Czech",
        "cu" => "Church Slavic",
        "cv" => "Chuvash",
        "cy" => "Welsh",
        "da" => "Danish",
        "de" => "German",
        "dv" => "Dhivehi",
        "dz" => "Dzongkha",
        "ee" => "Ewe",
        "el" => "Modern Greek",
        "en" => "English",
        "eo" => "Esperanto",
        "es" => "Spanish",
        "et" => "Estonian",
        "eu" => "Basque",
        "fa" => "Persian",
        "ff" => "Fulah",
        "fi" => "Finnish",
        "fj" => "Fijian",
        "fo" => "Faroese",
        "fr" => "French",
        "fy" => "Western Frisian",
        "ga" => "Irish",
        "gd" => "Scottish Gaelic",
        "gl" => "Galician",
        "gn" => "Guarani",
        "gu" => "Gujarati",
        "gv" => "Manx",
        "ha" => "Hausa",
        "he" => "Hebrew",
        "hi" => "Hindi",
        "ho" => "Hiri Motu",
        "hr" => "Croatian",
        "ht" => "Haitian",
        "hu" => "Hungarian",
        "hy" => "Armenian",
        "hz" => "Herero",
        "ia" => "Interlingua",
        "id" => "Indonesian",
        "ie" => "Interlingue",
        "ig" => "Igbo",
        "ii" => "Sichuan Yi",
        "ik" => "Inupiaq",
        "io" => "Ido",
        "is" => "Icelandic",
        "it" => "Italian",
        "iu" => "Inuktitut",
        "ja" => "Japanese",
        "jv" => "Javanese",
        "ka" => "Georgian",
        "kg" => "Kongo",
        "ki" => "Kikuyu",
        "kj" => "Kuanyama",
        "kk" => "Kazakh",
        "kl" => "Kalaallisut",
        "km" => "Central Khmer",
        "kn" => "Kannada",
        "ko" => "Korean",
        "kr" => "Kanuri",
        "ks" => "Kashmiri",
        "ku" => "Kurdish",
        "kv" => "Komi",
        "kw" => "Cornish",
        "ky" => "Kirghiz",
        "la" => "Latin",
        "lb" => "Luxembourgish",
        "lg" => "Ganda",
        "li" => "Limburgan",
        "ln" => "Lingala",
        "lo" => "Lao",
        "lt" => "Lithuanian",
        "lu" => "Luba-Katanga",
        "lv" => "Latvian",
        "mg" => "Malagasy",
        "mh" => "Marshallese",
        "mi" => "Maori",
        "mk" => "Macedonian",
        "ml" => "Malayalam",
        "mn" => "Mongolian",
        "mr" => "Marathi",
        "ms" => "Malay",
        "mt" => "Maltese",
        "my" => "Burmese",
        "na" => "Nauru",
        "nb" => "Norwegian Bokmål",
        "nd" => "North Ndebele",
        "ne" => "Nepali",
        "ng" => "Ndonga",
        "nl" => "Dutch",
        "nn" => "Norwegian Nynorsk",
        "no" => "Norwegian",
        "nr" => "South Ndebele",
        "nv" => "Navajo",
        "ny" => "Nyanja",
        "oc" => "Occitan",
        "oj" => "Ojibwa",
        "om" => "Oromo",
        "or" => "Oriya",
        "os" => "Ossetian",
        "pa" => "Panjabi",
        "pi" => "Pali",
        "pl" => "Polish",
        "ps" => "Pushto",
        "pt" => "Portuguese",
        "qu" => "Quechua",
        "rm" => "Romansh",
        "rn" => "Rundi",
        "ro" => "Romanian",
        "ru" => "Russian",
        "rw" => "Kinyarwanda",
        "sa" => "Sanskrit",
        "sc" => "Sardinian",
        "sd" => "Sindhi",
        "se" => "Northern Sami",
        "sg" => "Sango",
        "si" => "Sinhala",
        "sk" => "Slovak",
        "sl" => "Slovenian",
        "sm" => "Samoan",
        "sn" => "Shona",
        "so" => "Somali",
        "sq" => "Albanian",
        "sr" => "Serbian",
        "ss" => "Swati",
        "st" => "Southern Sotho",
        "su" => "Sundanese",
        "sv" => "Swedish",
        "sw" => "Swahili",
        "ta" => "Tamil",
        "te" => "Telugu",
        "tg" => "Tajik",
        "th" => "Thai",
        "ti" => "Tigrinya",
        "tk" => "Turkmen",
        "tl" => "Tagalog",
        "tn" => "Tswana",
        "to" => "Tonga",
        "tr" => "Turkish",
        "ts" => "Tsonga",
        "tt" => "Tatar",
        "tw" => "Twi",
        "ty" => "Tahitian",
        "ug" => "Uighur",
        "uk" => "Ukrainian",
        "ur" => "Urdu",
        "uz" => "Uzbek",
        "ve" => "Venda",
        "vi" => "Vietnamese",
        "vo" => "Volapük",
        "wa" => "Walloon",
        "wo" => "Wolof",
        "xh" => "Xhosa",
        "yi" => "Yiddish",
        "yo" => "Yoruba",
        "za" => "Zhuang",
        "zh" => "Chinese",
        "zu" => "Zulu",
        _ => return None,
    };
    Some(name)
}

/// Returns the English reference name of an ISO 639-2/3 three-letter code.
///
/// Covers the bibliographic and terminology codes of the major languages
/// plus the East African languages the assistant offers.
pub fn alpha3_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "amh" => "Amharic",
        "ara" => "Arabic",
        "bor" => "Borôro",
        "ces" | "cze" => "Czech",
        "dan" => "Danish",
        "dav" => "Taita",
        "deu" | "ger" => "German",
        "ell" | "gre" => "Modern Greek",
        "eng" => "English",
        "fas" | "per" => "Persian",
        "fin" => "Finnish",
        "fra" | "fre" => "French",
        "guz" => "Gusii",
        "hau" => "Hausa",
        "heb" => "Hebrew",
        "hin" => "Hindi",
        "hun" => "Hungarian",
        "ibo" => "Igbo",
        "ind" => "Indonesian",
        "ita" => "Italian",
        "jpn" => "Japanese",
        "kam" => "Kamba (Kenya)",
        "kik" => "Kikuyu",
        "kin" => "Kinyarwanda",
        "kln" => "Kalenjin",
        "kor" => "Korean",
        "lug" => "Ganda",
        "luo" => "Luo (Kenya and Tanzania)",
        "luy" => "Luyia",
        "mas" => "Masai",
        "mer" => "Meru",
        "msa" | "may" => "Malay",
        "nld" | "dut" => "Dutch",
        "nor" => "Norwegian",
        "orm" => "Oromo",
        "pkm" => "Pokomo",
        "pol" => "Polish",
        "por" => "Portuguese",
        "rel" => "Rendille",
        "ron" | "rum" => "Romanian",
        "rus" => "Russian",
        "saq" => "Samburu",
        "som" => "Somali",
        "spa" => "Spanish",
        "swa" => "Swahili",
        "swe" => "Swedish",
        "tha" => "Thai",
        "tir" => "Tigrinya",
        "tur" => "Turkish",
        "tuv" => "Turkana",
        "ukr" => "Ukrainian",
        "urd" => "Urdu",
        "vie" => "Vietnamese",
        "xho" => "Xhosa",
        "yor" => "Yoruba",
        "zho" | "chi" => "Chinese",
        "zul" => "Zulu",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha2_codes_resolve() {
        assert_eq!(alpha2_name("en"), Some("English"));
        assert_eq!(alpha2_name("ja"), Some("Japanese"));
        assert_eq!(alpha2_name("ar"), Some("Arabic"));
        assert_eq!(alpha2_name("xx"), None);
    }

    #[test]
    fn alpha3_codes_resolve() {
        assert_eq!(alpha3_name("swa"), Some("Swahili"));
        assert_eq!(alpha3_name("ger"), Some("German"));
        assert_eq!(alpha3_name("deu"), Some("German"));
        assert_eq!(alpha3_name("qqq"), None);
    }

    #[test]
    fn lookups_are_case_sensitive() {
        assert_eq!(alpha2_name("EN"), None);
        assert_eq!(alpha3_name("ENG"), None);
    }
}
