use std::io::Read;
use std::process::ExitCode;
use std::time::Duration;

use freqsum_mcp::config::AppConfig;
use freqsum_mcp::logging;
use freqsum_mcp::mcp::{ServerSettings, StdioMcpServer};
use freqsum_mcp::summarize::{build_summarizer, Summarizer};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_logging();

    let cfg = AppConfig::from_env_and_args();
    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error=?e, "terminated with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    cfg.validate()?;
    let stopwords = cfg.load_stopwords()?;
    let stopword_count = stopwords.len();
    let summarizer = build_summarizer(stopwords);

    if cfg.once {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        let res = summarizer.summarize(&text, cfg.default_sentences)?;
        tracing::debug!(
            selected = res.sentences_selected,
            total = res.sentences_total,
            fallback = res.fallback,
            "one-shot summary"
        );
        // A fallback summary is the raw input and may already end the line.
        if res.summary.ends_with('\n') {
            print!("{}", res.summary);
        } else {
            println!("{}", res.summary);
        }
        return Ok(());
    }

    tracing::info!(
        stopwords = stopword_count,
        languages = ?cfg.stopword_languages,
        default_sentences = cfg.default_sentences,
        request_timeout_ms = cfg.request_timeout_ms,
        "MCP server startup complete"
    );
    let server = StdioMcpServer::new(
        summarizer,
        ServerSettings {
            default_sentences: cfg.default_sentences,
            request_timeout: Duration::from_millis(cfg.request_timeout_ms),
            stopword_count,
        },
    );
    // Not spawned: the run future holds the stdio locks and is not Send.
    tokio::select! {
        res = server.run() => res,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping");
            Ok(())
        }
    }
}
