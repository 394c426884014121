use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::errors::SummarizeError;
use crate::health;
use crate::metrics::ServerMetrics;
use crate::summarize::{SummarizeResult, Summarizer};

const SERVER_NAME: &str = env!("CARGO_PKG_NAME");
const METRICS_URI: &str = "mcp://freqsum-mcp/metrics";

const INVALID_PARAMS: i64 = -32602;
const METHOD_NOT_FOUND: i64 = -32601;
const TOOL_FAILED: i64 = -32001;

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub default_sentences: usize,
    pub request_timeout: Duration,
    pub stopword_count: usize,
}

pub struct StdioMcpServer {
    summarizer: Arc<dyn Summarizer>,
    metrics: Arc<ServerMetrics>,
    settings: ServerSettings,
}

/// Writes frames the way the client sent them: `Content-Length` headers, or
/// one JSON document per line once the client is seen sending raw JSON.
struct FrameWriter<W: Write> {
    inner: W,
    ndjson: bool,
}

impl StdioMcpServer {
    pub fn new(summarizer: Arc<dyn Summarizer>, settings: ServerSettings) -> Self {
        Self {
            summarizer,
            metrics: Arc::new(ServerMetrics::default()),
            settings,
        }
    }

    pub fn metrics(&self) -> Arc<ServerMetrics> {
        self.metrics.clone()
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let reader = std::io::BufReader::new(stdin.lock());
        let writer = std::io::BufWriter::new(stdout.lock());
        self.serve(reader, writer).await
    }

    /// Answer framed requests from `reader` until it is exhausted.
    pub async fn serve<R: BufRead, W: Write>(&self, mut reader: R, writer: W) -> anyhow::Result<()> {
        let force_ndjson = std::env::var("MCP_FORCE_NDJSON").ok().as_deref() == Some("1");
        let mut writer = FrameWriter {
            inner: writer,
            ndjson: force_ndjson,
        };
        tracing::info!("run loop started: waiting for framed MCP requests on stdin");
        loop {
            let (msg, raw) = match read_framed_message_buf(&mut reader) {
                Ok(m) => m,
                Err(e) => {
                    tracing::debug!(error=?e, "stdin closed or invalid frame");
                    break;
                }
            };
            writer.ndjson |= raw;
            let req: serde_json::Value = match serde_json::from_slice(&msg) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(error=?e, "invalid JSON");
                    continue;
                }
            };

            let method = req.get("method").and_then(|m| m.as_str()).unwrap_or("");
            let id_opt = req.get("id").cloned();
            let id_reply = id_opt.as_ref().filter(|v| !v.is_null()).cloned();
            tracing::info!(%method, id=?id_opt, "received request");
            // Notifications (no id) never get a reply.
            let Some(id) = id_reply else {
                continue;
            };
            match method {
                "initialize" => {
                    let params = req.get("params").cloned().unwrap_or(json!({}));
                    let client_proto = params
                        .get("protocolVersion")
                        .and_then(|x| x.as_str())
                        .unwrap_or("2024-11-05");
                    let result = json!({
                        "protocolVersion": client_proto,
                        "capabilities": {
                            "tools": {"list": true, "call": true},
                            "prompts": {"list": true},
                            "resources": {"list": true, "read": true, "subscribe": false}
                        },
                        "serverInfo": server_info()
                    });
                    writer.response(id, result)?;
                }
                "server/info" => {
                    writer.response(id, json!({"serverInfo": server_info()}))?;
                }
                "tools/list" => {
                    writer.response(id, json!({"tools": list_tools_schema()}))?;
                }
                "prompts/list" => {
                    writer.response(id, json!({"prompts": []}))?;
                }
                "resources/list" => {
                    let resources = vec![json!({
                        "uri": METRICS_URI,
                        "name": "Server metrics snapshot",
                        "description": "Summarization counters since startup",
                        "mimeType": "application/json"
                    })];
                    writer.response(id, json!({"resources": resources}))?;
                }
                "resources/read" => {
                    let params = req.get("params").cloned().unwrap_or(json!({}));
                    let uri = params.get("uri").and_then(|x| x.as_str()).unwrap_or("");
                    if uri != METRICS_URI {
                        writer.error(id, INVALID_PARAMS, "Unknown resource uri")?;
                        continue;
                    }
                    let text = serde_json::to_string_pretty(&self.metrics.snapshot())
                        .unwrap_or_else(|_| "{}".into());
                    let contents = vec![json!({
                        "uri": uri,
                        "mimeType": "application/json",
                        "text": text
                    })];
                    writer.response(id, json!({"contents": contents}))?;
                }
                "tools/call" => {
                    let params = req.get("params").cloned().unwrap_or(json!({}));
                    let name = params.get("name").and_then(|x| x.as_str()).unwrap_or("");
                    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
                    match self.dispatch_tool(name, arguments).await {
                        Ok(v) => {
                            writer.response(
                                id,
                                json!({"content": [{"type":"json","json": v}], "isError": false}),
                            )?;
                        }
                        Err(e) => {
                            tracing::warn!(tool=%name, error=%e, "tool call failed");
                            writer.error(id, error_code(&e), &format!("{}", e))?;
                        }
                    }
                }
                _ => {
                    writer.error(id, METHOD_NOT_FOUND, "method not found")?;
                }
            }
        }
        Ok(())
    }

    async fn dispatch_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> anyhow::Result<serde_json::Value> {
        match name {
            "summarize" => {
                let out = self.summarize_tool(arguments).await;
                self.record_failure(out)
            }
            "explain_summary" => {
                let out = self.explain_tool(arguments).await;
                self.record_failure(out)
            }
            "metrics" => Ok(serde_json::to_value(self.metrics.snapshot())?),
            "health_check" => {
                let report = health::check(
                    self.summarizer.as_ref(),
                    self.settings.stopword_count,
                    self.settings.default_sentences,
                );
                let mut v = serde_json::to_value(report)?;
                v["server"] = server_info();
                Ok(v)
            }
            _ => anyhow::bail!("unknown tool: {name}"),
        }
    }

    async fn summarize_tool(&self, arguments: serde_json::Value) -> anyhow::Result<serde_json::Value> {
        let SummarizeParams {
            text,
            num_sentences,
            quote,
        } = serde_json::from_value(arguments)?;
        let num_sentences = num_sentences.unwrap_or(self.settings.default_sentences);
        let request_id = Uuid::new_v4();
        let summarizer = self.summarizer.clone();
        let res = self
            .run_blocking(move || summarizer.summarize(&text, num_sentences))
            .await?;
        self.metrics.record(&res);
        tracing::info!(
            %request_id,
            num_sentences,
            selected = res.sentences_selected,
            total = res.sentences_total,
            fallback = res.fallback,
            "summary produced"
        );
        let summary = if quote {
            format!(">>> {}", res.summary)
        } else {
            res.summary
        };
        Ok(json!({
            "summary": summary,
            "sentences_selected": res.sentences_selected,
            "sentences_total": res.sentences_total,
            "fallback": res.fallback,
            "request_id": request_id
        }))
    }

    async fn explain_tool(&self, arguments: serde_json::Value) -> anyhow::Result<serde_json::Value> {
        let p: ExplainParams = serde_json::from_value(arguments)?;
        let num_sentences = p.num_sentences.unwrap_or(self.settings.default_sentences);
        let summarizer = self.summarizer.clone();
        let report = self
            .run_blocking(move || summarizer.explain(&p.text, num_sentences))
            .await?;
        let sentences_total = report.sentences.len();
        // A fallback hands back the whole input.
        let sentences_selected = if report.fallback {
            sentences_total
        } else {
            report.sentences.iter().filter(|s| s.selected).count()
        };
        self.metrics.record(&SummarizeResult {
            summary: String::new(),
            sentences_selected,
            sentences_total,
            fallback: report.fallback,
        });
        Ok(serde_json::to_value(report)?)
    }

    /// Count a failed summarizing call: bad arguments are rejections,
    /// timeouts and dead workers are failures.
    fn record_failure<T>(&self, out: anyhow::Result<T>) -> anyhow::Result<T> {
        if let Err(e) = &out {
            if error_code(e) == INVALID_PARAMS {
                self.metrics.record_rejected();
            } else {
                self.metrics.record_failed();
            }
        }
        out
    }

    /// Run a summarizer call off the async runtime, bounded by the request timeout.
    async fn run_blocking<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, SummarizeError> + Send + 'static,
    {
        let timeout = self.settings.request_timeout;
        let out = tokio::time::timeout(timeout, tokio::task::spawn_blocking(f))
            .await
            .map_err(|_| anyhow::anyhow!("summarization timed out after {}ms", timeout.as_millis()))???;
        Ok(out)
    }
}

impl<W: Write> FrameWriter<W> {
    fn response(&mut self, id: serde_json::Value, result: serde_json::Value) -> anyhow::Result<()> {
        let resp = json!({"jsonrpc":"2.0","id": id, "result": result});
        self.write_framed(&resp)
    }

    fn error(&mut self, id: serde_json::Value, code: i64, message: &str) -> anyhow::Result<()> {
        let resp = json!({"jsonrpc":"2.0","id": id, "error": {"code": code, "message": message}});
        self.write_framed(&resp)
    }

    fn write_framed(&mut self, v: &serde_json::Value) -> anyhow::Result<()> {
        write_framed(&mut self.inner, v, self.ndjson)
    }
}

fn server_info() -> serde_json::Value {
    json!({"name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION")})
}

/// Bad arguments are the caller's fault; anything else is a tool failure.
fn error_code(e: &anyhow::Error) -> i64 {
    if e.downcast_ref::<SummarizeError>().is_some() || e.downcast_ref::<serde_json::Error>().is_some() {
        INVALID_PARAMS
    } else {
        TOOL_FAILED
    }
}

fn list_tools_schema() -> Vec<serde_json::Value> {
    vec![
        json!({"name":"summarize","description":"Return the most representative sentences of a text, in original order","inputSchema":{"type":"object","required":["text"],"properties":{
            "text": {"type":"string"},
            "num_sentences": {"type":"integer","minimum":1},
            "quote": {"type":"boolean","description":"Prefix the summary with a '>>> ' block quote"}
        }}}),
        json!({"name":"explain_summary","description":"Per-sentence tokens, scores and ranks behind a summary","inputSchema":{"type":"object","required":["text"],"properties":{
            "text": {"type":"string"},
            "num_sentences": {"type":"integer","minimum":1}
        }}}),
        json!({"name":"metrics","description":"Return server summarization counters","inputSchema": {"type":"object","properties":{}}}),
        json!({"name":"health_check","description":"Check stopwords are loaded and a sample text summarizes","inputSchema": {"type":"object","properties":{}}}),
    ]
}

/// Read one request body. The flag is set when the client sent a bare JSON
/// line instead of a `Content-Length` frame.
fn read_framed_message_buf<R: BufRead>(bufreader: &mut R) -> anyhow::Result<(Vec<u8>, bool)> {
    let mut header = String::new();
    let mut content_length: Option<usize> = None;
    let mut header_lines: usize = 0;
    loop {
        header.clear();
        let n = bufreader.read_line(&mut header)?;
        if n == 0 {
            anyhow::bail!("eof");
        }
        let line = header.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            if header_lines == 0 {
                continue;
            }
            break;
        }
        header_lines += 1;
        tracing::trace!(%line, "framing header line");
        if header_lines == 1 && line.starts_with('{') && line.contains("\"jsonrpc\"") {
            tracing::debug!("detected raw JSON line without Content-Length; accepting as body");
            return Ok((line.as_bytes().to_vec(), true));
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = Some(value.trim().parse::<usize>()?);
            }
        }
    }
    let len = content_length.ok_or_else(|| anyhow::anyhow!("missing Content-Length"))?;
    let mut body = vec![0u8; len];
    bufreader.read_exact(&mut body)?;
    tracing::trace!(header_lines, content_length = len, "framed message parsed");
    Ok((body, false))
}

fn write_framed<W: Write>(writer: &mut W, v: &serde_json::Value, ndjson: bool) -> anyhow::Result<()> {
    let s = serde_json::to_string(v)?;
    if ndjson {
        writeln!(writer, "{}", s)?;
    } else {
        write!(writer, "Content-Length: {}\r\n\r\n{}", s.len(), s)?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct SummarizeParams {
    text: String,
    num_sentences: Option<usize>,
    #[serde(default)]
    quote: bool,
}

#[derive(Debug, Deserialize)]
struct ExplainParams {
    text: String,
    num_sentences: Option<usize>,
}
