//! Deterministic extractive summarization by word frequency.
//!
//! Sentences are scored by the mean normalized frequency of their
//! significant words; the best `k` are returned in document order.

pub mod config;
pub mod errors;
pub mod health;
pub mod logging;
pub mod mcp;
pub mod metrics;
pub mod nlp;
pub mod summarize;

pub use summarize::{summarize, FrequencySummarizer, SummarizeResult, Summarizer, DEFAULT_SENTENCES};
