use serde::Serialize;

use crate::errors::SummarizeError;
use crate::nlp::{FilteringTokenizer, RuleSegmenter, SentenceSegmenter, StopwordFilter, WordTokenizer};
use crate::summarize::frequency::FrequencyModel;
use crate::summarize::{scorer, selector, SummarizeResult, Summarizer};

/// Picks the sentences whose words are most frequent across the text.
///
/// Stateless between calls; segmenter and tokenizer are read-only.
#[derive(Debug, Clone, Default)]
pub struct FrequencySummarizer<S = RuleSegmenter, T = FilteringTokenizer> {
    segmenter: S,
    tokenizer: T,
}

impl FrequencySummarizer {
    pub fn with_stopwords(stopwords: StopwordFilter) -> Self {
        Self::new(RuleSegmenter::new(), FilteringTokenizer::new(stopwords))
    }
}

impl<S: SentenceSegmenter, T: WordTokenizer> FrequencySummarizer<S, T> {
    pub fn new(segmenter: S, tokenizer: T) -> Self {
        Self {
            segmenter,
            tokenizer,
        }
    }

    fn analyze(&self, text: &str) -> Analysis {
        let sentences = self.segmenter.segment(text);
        let tokens: Vec<Vec<String>> = sentences.iter().map(|s| self.tokenizer.tokenize(s)).collect();
        let model = FrequencyModel::build(&tokens);
        let scores = scorer::score_all(&tokens, &model);
        tracing::debug!(
            sentences = sentences.len(),
            distinct_tokens = model.len(),
            max_frequency = model.max_frequency(),
            most_frequent = ?model.most_frequent(),
            "frequency model built"
        );
        Analysis {
            sentences,
            tokens,
            model,
            scores,
        }
    }
}

struct Analysis {
    sentences: Vec<String>,
    tokens: Vec<Vec<String>>,
    model: FrequencyModel,
    scores: Vec<(usize, Option<f64>)>,
}

impl Analysis {
    fn has_scores(&self) -> bool {
        self.scores.iter().any(|(_, s)| s.is_some())
    }
}

impl<S: SentenceSegmenter, T: WordTokenizer> FrequencySummarizer<S, T> {
    fn run(&self, text: &str, num_sentences: usize) -> Result<Run, SummarizeError> {
        if num_sentences == 0 {
            return Err(SummarizeError::InvalidSentenceCount(num_sentences));
        }
        let analysis = self.analyze(text);
        if !analysis.has_scores() {
            tracing::debug!(
                sentences = analysis.sentences.len(),
                "no scorable sentence, returning input"
            );
            let result = SummarizeResult {
                summary: text.to_string(),
                sentences_selected: analysis.sentences.len(),
                sentences_total: analysis.sentences.len(),
                fallback: true,
            };
            return Ok(Run {
                analysis,
                chosen: Vec::new(),
                result,
            });
        }
        let chosen = selector::select_indices(&analysis.scores, num_sentences);
        let summary = selector::join(&chosen, &analysis.sentences);
        let result = SummarizeResult {
            summary,
            sentences_selected: chosen.len(),
            sentences_total: analysis.sentences.len(),
            fallback: false,
        };
        Ok(Run {
            analysis,
            chosen,
            result,
        })
    }
}

struct Run {
    analysis: Analysis,
    chosen: Vec<usize>,
    result: SummarizeResult,
}

impl<S: SentenceSegmenter, T: WordTokenizer> Summarizer for FrequencySummarizer<S, T> {
    fn summarize(&self, text: &str, num_sentences: usize) -> Result<SummarizeResult, SummarizeError> {
        self.run(text, num_sentences).map(|run| run.result)
    }

    fn explain(&self, text: &str, num_sentences: usize) -> Result<SummaryReport, SummarizeError> {
        let Run {
            analysis,
            chosen,
            result,
        } = self.run(text, num_sentences)?;
        let ranked = selector::rank(&analysis.scores);
        let distinct_tokens = analysis.model.len();
        let max_frequency = analysis.model.max_frequency();

        let sentences = analysis
            .sentences
            .into_iter()
            .zip(analysis.tokens)
            .zip(analysis.scores)
            .map(|((text, tokens), (index, score))| SentenceReport {
                rank: ranked.iter().position(|&(i, _)| i == index).map(|p| p + 1),
                selected: chosen.binary_search(&index).is_ok(),
                index,
                text,
                tokens,
                score,
            })
            .collect();

        Ok(SummaryReport {
            summary: result.summary,
            fallback: result.fallback,
            num_sentences,
            distinct_tokens,
            max_frequency,
            sentences,
        })
    }
}

/// Per-sentence view of one summarization run
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub summary: String,
    pub fallback: bool,
    pub num_sentences: usize,
    pub distinct_tokens: usize,
    pub max_frequency: usize,
    pub sentences: Vec<SentenceReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentenceReport {
    pub index: usize,
    pub text: String,
    pub tokens: Vec<String>,
    /// Absent when the sentence has no significant tokens
    pub score: Option<f64>,
    /// 1-based position in the ranking
    pub rank: Option<usize>,
    pub selected: bool,
}
