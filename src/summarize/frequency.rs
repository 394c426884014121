//! Word frequency model over one request's tokens

use rustc_hash::FxHashMap;

/// Occurrence count of every token in a document.
///
/// Keys are case-sensitive, exactly as produced by the tokenizer. Every key
/// has a count of at least 1.
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    counts: FxHashMap<String, usize>,
    max_frequency: usize,
}

impl FrequencyModel {
    /// Count every token of every sentence.
    pub fn build<T: AsRef<str>>(sentences: &[Vec<T>]) -> Self {
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        for token in sentences.iter().flatten() {
            let token = token.as_ref();
            match counts.get_mut(token) {
                Some(n) => *n += 1,
                None => {
                    counts.insert(token.to_string(), 1);
                }
            }
        }
        // Explicit reduction; map iteration order carries no meaning.
        let max_frequency = counts.values().copied().max().unwrap_or(0);
        Self {
            counts,
            max_frequency,
        }
    }

    /// Count of `token`, 0 when absent
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Greatest count in the model, 0 when empty
    pub fn max_frequency(&self) -> usize {
        self.max_frequency
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of token occurrences
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Tokens sharing the highest count, sorted for stable output
    pub fn most_frequent(&self) -> Vec<&str> {
        let mut top: Vec<&str> = self
            .counts
            .iter()
            .filter(|(_, n)| **n == self.max_frequency && **n > 0)
            .map(|(t, _)| t.as_str())
            .collect();
        top.sort_unstable();
        top
    }
}
