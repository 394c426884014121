//! Sentence importance from normalized word frequency

use super::frequency::FrequencyModel;

/// Mean normalized frequency of the sentence's tokens.
///
/// Each token contributes `count / max_frequency`, a value in `(0, 1]` when
/// the model was built from the whole document. Returns `None` for a sentence
/// without tokens: it is left out of ranking rather than scored 0.
pub fn score(tokens: &[String], model: &FrequencyModel) -> Option<f64> {
    if tokens.is_empty() {
        return None;
    }
    let max = model.max_frequency();
    if max == 0 {
        return None;
    }
    let max = max as f64;
    let total: f64 = tokens.iter().map(|t| model.count(t) as f64 / max).sum();
    Some(total / tokens.len() as f64)
}

/// Score every sentence, keeping sentence order
pub fn score_all(sentences: &[Vec<String>], model: &FrequencyModel) -> Vec<(usize, Option<f64>)> {
    sentences
        .iter()
        .enumerate()
        .map(|(i, tokens)| (i, score(tokens, model)))
        .collect()
}
