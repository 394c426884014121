//! Rule-based sentence segmentation
//!
//! Splits after `.`, `!`, `?` and `…` when the next word does not continue
//! the sentence, and on blank lines. Common abbreviations and single-letter
//! initials do not end a sentence.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Splits raw text into an ordered sequence of sentences
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

static ABBREVIATIONS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "cf",
        "approx", "dept", "est", "fig", "inc", "ltd", "co", "corp", "no", "vol", "jan", "feb",
        "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "u.k",
        "a.m", "p.m",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSegmenter;

impl RuleSegmenter {
    pub fn new() -> Self {
        Self
    }

    fn is_boundary(chars: &[(usize, char)], term_start: usize, term_end: usize, after: usize) -> bool {
        let Some(&(_, next)) = chars.get(after) else {
            return true;
        };
        if !next.is_whitespace() {
            return false;
        }
        let following = chars[after..].iter().find(|(_, c)| !c.is_whitespace());
        match following {
            None => return true,
            Some((_, c)) if c.is_lowercase() => return false,
            Some(_) => {}
        }
        // Only a lone period can belong to an abbreviation.
        if term_end - term_start == 1 && chars[term_start].1 == '.' {
            let word = preceding_word(chars, term_start);
            let mut letters = word.chars();
            if let (Some(c), None) = (letters.next(), letters.next()) {
                if c.is_uppercase() {
                    return false;
                }
            }
            if ABBREVIATIONS.contains(word.to_lowercase().as_str()) {
                return false;
            }
        }
        true
    }
}

impl SentenceSegmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0usize;
        let mut i = 0usize;

        while i < chars.len() {
            let (pos, c) = chars[i];
            if c == '\n' && starts_blank_line(&chars, i) {
                push_trimmed(&mut sentences, &text[start..pos]);
                while i < chars.len() && chars[i].1.is_whitespace() {
                    i += 1;
                }
                start = chars.get(i).map_or(text.len(), |&(p, _)| p);
                continue;
            }
            if is_terminator(c) {
                let term_start = i;
                let mut j = i;
                while j < chars.len() && is_terminator(chars[j].1) {
                    j += 1;
                }
                let term_end = j;
                while j < chars.len() && is_closing(chars[j].1) {
                    j += 1;
                }
                if Self::is_boundary(&chars, term_start, term_end, j) {
                    let end = chars.get(j).map_or(text.len(), |&(p, _)| p);
                    push_trimmed(&mut sentences, &text[start..end]);
                    start = end;
                }
                i = j;
                continue;
            }
            i += 1;
        }
        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '’' | '”' | '»')
}

fn starts_blank_line(chars: &[(usize, char)], newline: usize) -> bool {
    chars[newline + 1..]
        .iter()
        .map(|&(_, c)| c)
        .find(|c| !matches!(c, ' ' | '\t' | '\r'))
        == Some('\n')
}

/// The word directly before `index`, without leading opening punctuation.
fn preceding_word(chars: &[(usize, char)], index: usize) -> String {
    let start = chars[..index]
        .iter()
        .rposition(|(_, c)| c.is_whitespace())
        .map_or(0, |p| p + 1);
    chars[start..index]
        .iter()
        .map(|&(_, c)| c)
        .skip_while(|c| matches!(c, '(' | '[' | '"' | '\'' | '“' | '‘' | '«'))
        .collect()
}

fn push_trimmed(out: &mut Vec<String>, raw: &str) {
    let s = raw.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}
