//! Stopword filtering
//!
//! Stopword sets come from the `stop-words` crate, optionally extended with a
//! user supplied word list. The set is built once at startup and handed to the
//! tokenizer as an explicit value.

use std::path::Path;

use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

use crate::errors::ConfigError;

/// Languages accepted by [`StopwordFilter::for_languages`].
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "en", "de", "fr", "es", "it", "pt", "nl", "ru", "sv", "no", "da", "fi", "hu", "tr", "pl",
    "ar",
];

/// A set of words excluded from frequency analysis
#[derive(Debug, Clone, Default)]
pub struct StopwordFilter {
    /// Lowercased unless `case_sensitive` is set
    stopwords: FxHashSet<String>,
    case_sensitive: bool,
}

impl StopwordFilter {
    /// English stopwords, case-insensitive
    pub fn english() -> Self {
        Self {
            stopwords: Self::load_language(LANGUAGE::English),
            case_sensitive: false,
        }
    }

    /// Union of the stopword lists for every language code given.
    ///
    /// `"all"` expands to every supported language.
    pub fn for_languages<S: AsRef<str>>(languages: &[S]) -> Result<Self, ConfigError> {
        let mut stopwords = FxHashSet::default();
        for code in languages {
            let code = code.as_ref().trim();
            if code.is_empty() {
                continue;
            }
            if code.eq_ignore_ascii_case("all") {
                for lang in SUPPORTED_LANGUAGES {
                    if let Some(lang) = parse_language(lang) {
                        stopwords.extend(Self::load_language(lang));
                    }
                }
                continue;
            }
            let lang =
                parse_language(code).ok_or_else(|| ConfigError::UnknownLanguage(code.to_string()))?;
            stopwords.extend(Self::load_language(lang));
        }
        Ok(Self {
            stopwords,
            case_sensitive: false,
        })
    }

    /// Filter with exactly the given words
    pub fn from_list(words: &[&str]) -> Self {
        Self {
            stopwords: words.iter().map(|w| w.to_lowercase()).collect(),
            case_sensitive: false,
        }
    }

    /// No filtering at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Switch case sensitivity. Switching to insensitive re-folds the stored words.
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        if !case_sensitive && self.case_sensitive {
            self.stopwords = self.stopwords.iter().map(|w| w.to_lowercase()).collect();
        }
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            let word = word.as_ref();
            if self.case_sensitive {
                self.stopwords.insert(word.to_string());
            } else {
                self.stopwords.insert(word.to_lowercase());
            }
        }
    }

    /// Extend the set from a file with one word per line. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn extend_from_file(&mut self, path: &Path) -> Result<usize, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::StopwordFile {
            path: path.to_path_buf(),
            source,
        })?;
        let words: Vec<&str> = contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();
        self.add_stopwords(words.as_slice());
        Ok(words.len())
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        if self.case_sensitive {
            self.stopwords.contains(word)
        } else {
            self.stopwords.contains(&word.to_lowercase())
        }
    }

    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    fn load_language(lang: LANGUAGE) -> FxHashSet<String> {
        get(lang).iter().map(|s| s.to_string()).collect()
    }
}

fn parse_language(code: &str) -> Option<LANGUAGE> {
    let lang = match code.to_lowercase().as_str() {
        "en" | "english" => LANGUAGE::English,
        "de" | "german" => LANGUAGE::German,
        "fr" | "french" => LANGUAGE::French,
        "es" | "spanish" => LANGUAGE::Spanish,
        "it" | "italian" => LANGUAGE::Italian,
        "pt" | "portuguese" => LANGUAGE::Portuguese,
        "nl" | "dutch" => LANGUAGE::Dutch,
        "ru" | "russian" => LANGUAGE::Russian,
        "sv" | "swedish" => LANGUAGE::Swedish,
        "no" | "norwegian" => LANGUAGE::Norwegian,
        "da" | "danish" => LANGUAGE::Danish,
        "fi" | "finnish" => LANGUAGE::Finnish,
        "hu" | "hungarian" => LANGUAGE::Hungarian,
        "tr" | "turkish" => LANGUAGE::Turkish,
        "pl" | "polish" => LANGUAGE::Polish,
        "ar" | "arabic" => LANGUAGE::Arabic,
        _ => return None,
    };
    Some(lang)
}
