use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::errors::SummarizeError;
use crate::nlp::StopwordFilter;

pub mod extractive;
pub mod frequency;
pub mod scorer;
pub mod selector;

pub use extractive::{FrequencySummarizer, SentenceReport, SummaryReport};
pub use frequency::FrequencyModel;

pub const DEFAULT_SENTENCES: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SummarizeResult {
    pub summary: String,
    pub sentences_selected: usize,
    pub sentences_total: usize,
    /// Nothing could be scored and the input was returned unchanged
    pub fallback: bool,
}

pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str, num_sentences: usize) -> Result<SummarizeResult, SummarizeError>;
    fn explain(&self, text: &str, num_sentences: usize) -> Result<SummaryReport, SummarizeError>;
}

pub fn build_summarizer(stopwords: StopwordFilter) -> Arc<dyn Summarizer> {
    tracing::debug!(stopwords = stopwords.len(), "building frequency summarizer");
    Arc::new(FrequencySummarizer::with_stopwords(stopwords))
}

static ENGLISH: Lazy<FrequencySummarizer> =
    Lazy::new(|| FrequencySummarizer::with_stopwords(StopwordFilter::english()));

/// Summarize with English stopwords.
///
/// Never fails for any text; the empty string and stopword-only text come
/// back unchanged. Only `num_sentences == 0` is rejected.
pub fn summarize(text: &str, num_sentences: usize) -> Result<String, SummarizeError> {
    ENGLISH.summarize(text, num_sentences).map(|r| r.summary)
}
