use std::path::PathBuf;

use clap::Parser;

use crate::errors::ConfigError;
use crate::nlp::StopwordFilter;
use crate::summarize::DEFAULT_SENTENCES;

#[derive(Debug, Clone, Parser)]
#[command(name = "freqsum-mcp")]
#[command(about = "MCP server that summarizes text by word frequency", long_about = None)]
pub struct AppConfig {
    /// Sentences returned when a request does not say
    #[arg(long, env = "SUMMARY_SENTENCES", default_value_t = DEFAULT_SENTENCES)]
    pub default_sentences: usize,

    /// Comma separated stopword language codes. Defaults to English only;
    /// "all" loads every supported language
    #[arg(
        long,
        env = "STOPWORD_LANGUAGES",
        value_delimiter = ',',
        default_value = "en"
    )]
    pub stopword_languages: Vec<String>,

    /// Extra stopwords, one per line
    #[arg(long, env = "STOPWORDS_FILE")]
    pub stopwords_file: Option<PathBuf>,

    /// Match stopwords exactly. By default matching ignores case, so "The"
    /// is filtered like "the"
    #[arg(long, env = "STOPWORDS_CASE_SENSITIVE")]
    pub case_sensitive_stopwords: bool,

    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value_t = 2000)]
    pub request_timeout_ms: u64,

    /// Summarize stdin once, print the result and exit
    #[arg(long)]
    pub once: bool,
}

impl AppConfig {
    pub fn from_env_and_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_sentences == 0 {
            return Err(ConfigError::InvalidSentenceCount(self.default_sentences));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Build the stopword set once; it is read-only afterwards.
    pub fn load_stopwords(&self) -> Result<StopwordFilter, ConfigError> {
        let mut filter = StopwordFilter::for_languages(self.stopword_languages.as_slice())?
            .with_case_sensitive(self.case_sensitive_stopwords);
        if let Some(path) = &self.stopwords_file {
            let added = filter.extend_from_file(path)?;
            tracing::info!(path = %path.display(), added, "loaded extra stopwords");
        }
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn parse(args: &[&str]) -> AppConfig {
        AppConfig::try_parse_from(std::iter::once("freqsum-mcp").chain(args.iter().copied()))
            .expect("args parse")
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = parse(&[]);
        assert_eq!(cfg.default_sentences, DEFAULT_SENTENCES);
        assert_eq!(cfg.stopword_languages, vec!["en".to_string()]);
        assert!(!cfg.once);
        cfg.validate().expect("valid");
    }

    #[test]
    fn help_states_stopword_defaults() {
        let help = AppConfig::command().render_help().to_string();
        let help = help.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(help.contains("Defaults to English only"));
        assert!(help.contains("\"all\" loads every supported language"));
        assert!(help.contains("matching ignores case"));
    }

    #[test]
    fn case_sensitive_flag_keeps_capitalized_stopwords() {
        let filter = parse(&[]).load_stopwords().unwrap();
        assert!(filter.is_stopword("The"));
        let filter = parse(&["--case-sensitive-stopwords"]).load_stopwords().unwrap();
        assert!(filter.is_stopword("the"));
        assert!(!filter.is_stopword("The"));
    }

    #[test]
    fn zero_sentences_and_timeout_are_rejected() {
        let cfg = parse(&["--default-sentences", "0"]);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidSentenceCount(0))));
        let cfg = parse(&["--request-timeout-ms", "0"]);
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn language_list_is_comma_separated() {
        let cfg = parse(&["--stopword-languages", "en,de"]);
        assert_eq!(cfg.stopword_languages, vec!["en", "de"]);
        let filter = cfg.load_stopwords().unwrap();
        assert!(filter.is_stopword("und"));
    }

    #[test]
    fn stopwords_file_extends_the_set() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "discord").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let cfg = parse(&["--stopwords-file", &path]);
        let filter = cfg.load_stopwords().unwrap();
        assert!(filter.is_stopword("Discord"));
        assert!(filter.is_stopword("the"));
    }

    #[test]
    fn unknown_language_fails_to_load() {
        let cfg = parse(&["--stopword-languages", "xx"]);
        assert!(cfg.load_stopwords().is_err());
    }
}
