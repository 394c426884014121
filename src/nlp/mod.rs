//! Natural language collaborators of the summarizer
//!
//! Sentence segmentation, word tokenization and stopword filtering.

pub mod segmenter;
pub mod stopwords;
pub mod tokenizer;

pub use segmenter::{RuleSegmenter, SentenceSegmenter};
pub use stopwords::StopwordFilter;
pub use tokenizer::{FilteringTokenizer, WordTokenizer};
