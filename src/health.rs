use serde::Serialize;

use crate::summarize::Summarizer;

const SAMPLE_TEXT: &str = "Summaries pick frequent words. Frequent words make summaries. Filler.";

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub stopwords_loaded: bool,
    pub stopword_count: usize,
    pub default_sentences: usize,
    /// A fixed sample text produced a non-fallback summary
    pub sample_ok: bool,
}

pub fn check(
    summarizer: &dyn Summarizer,
    stopword_count: usize,
    default_sentences: usize,
) -> HealthReport {
    let sample_ok = summarizer
        .summarize(SAMPLE_TEXT, 1)
        .map(|r| !r.fallback && !r.summary.is_empty())
        .unwrap_or(false);
    HealthReport {
        stopwords_loaded: stopword_count > 0,
        stopword_count,
        default_sentences,
        sample_ok,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::StopwordFilter;
    use crate::summarize::build_summarizer;

    #[test]
    fn sample_summarizes_with_english_stopwords() {
        let stopwords = StopwordFilter::english();
        let count = stopwords.len();
        let report = check(build_summarizer(stopwords).as_ref(), count, 5);
        assert!(report.sample_ok);
        assert!(report.stopwords_loaded);
        assert_eq!(report.default_sentences, 5);
    }
}
