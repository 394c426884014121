//! Word tokenization with stopword and punctuation filtering

use once_cell::sync::Lazy;
use regex::Regex;

use super::stopwords::StopwordFilter;

/// Splits a sentence into its significant word tokens
pub trait WordTokenizer: Send + Sync {
    fn tokenize(&self, sentence: &str) -> Vec<String>;
}

// Words keep internal apostrophes and hyphens ("don't", "well-known");
// anything else that is not whitespace becomes a one-char token, keeping
// any trailing combining marks and joiners.
static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}_]+(?:['’\-][\p{L}\p{N}_]+)*|[^\s\p{L}\p{N}_][\p{M}\x{200D}]*")
        .expect("word regex is valid")
});

// Unicode punctuation plus ASCII symbols such as `$`, `+` and `|`. Emoji,
// currency and other symbols count as words.
static PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{P}[:punct:]]+$").expect("punctuation regex is valid"));

/// Raw word tokens of a sentence, punctuation included
pub fn split_words(sentence: &str) -> impl Iterator<Item = &str> {
    WORD_RE.find_iter(sentence).map(|m| m.as_str())
}

fn is_punctuation(token: &str) -> bool {
    PUNCT_RE.is_match(token)
}

/// Tokenizer that drops punctuation and stopwords, keeping token case
#[derive(Debug, Clone)]
pub struct FilteringTokenizer {
    stopwords: StopwordFilter,
}

impl FilteringTokenizer {
    pub fn new(stopwords: StopwordFilter) -> Self {
        Self { stopwords }
    }
}

impl Default for FilteringTokenizer {
    fn default() -> Self {
        Self::new(StopwordFilter::english())
    }
}

impl WordTokenizer for FilteringTokenizer {
    fn tokenize(&self, sentence: &str) -> Vec<String> {
        split_words(sentence)
            .filter(|t| !is_punctuation(t) && !self.stopwords.is_stopword(t))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_words_separates_punctuation() {
        let words: Vec<&str> = split_words("Hello, world! It's well-known.").collect();
        assert_eq!(words, vec!["Hello", ",", "world", "!", "It's", "well-known", "."]);
    }

    #[test]
    fn drops_stopwords_and_punctuation_but_keeps_case() {
        let tok = FilteringTokenizer::new(StopwordFilter::from_list(&["and", "are", "both"]));
        assert_eq!(
            tok.tokenize("Cats and dogs are both great pets."),
            vec!["Cats", "dogs", "great", "pets"]
        );
    }

    #[test]
    fn sentence_of_only_stopwords_is_empty() {
        let tok = FilteringTokenizer::default();
        assert!(tok.tokenize("the. a, an!").is_empty());
        assert!(tok.tokenize("The, AN").is_empty());
        assert!(tok.tokenize("?!...").is_empty());
    }

    #[test]
    fn emoji_and_symbols_are_tokens_but_punctuation_is_not() {
        let tok = FilteringTokenizer::new(StopwordFilter::empty());
        assert_eq!(tok.tokenize("🎉"), vec!["🎉"]);
        assert_eq!(tok.tokenize("Party 🎉, costs 5€..."), vec!["Party", "🎉", "costs", "5", "€"]);
        assert!(tok.tokenize(", ... — « » $ |").is_empty());
        assert!(is_punctuation(","));
        assert!(is_punctuation("..."));
        assert!(!is_punctuation("🎉"));
    }

    #[test]
    fn custom_stopwords_are_honoured() {
        let tok = FilteringTokenizer::new(StopwordFilter::from_list(&["lol"]));
        assert_eq!(tok.tokenize("LOL the bot works"), vec!["the", "bot", "works"]);
    }

    #[test]
    fn numbers_are_significant() {
        let tok = FilteringTokenizer::new(StopwordFilter::empty());
        assert_eq!(tok.tokenize("Version 2.0 shipped"), vec!["Version", "2", "0", "shipped"]);
    }
}
