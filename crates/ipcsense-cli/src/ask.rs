//! One-shot and interactive model queries

use ipcsense_llm::LlmClient;
use serde::Serialize;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Saved form of a one-shot query
#[derive(Debug, Serialize)]
struct SavedQuery<'a> {
    query: &'a str,
    result: &'a str,
}

/// Write `{query, result}` as pretty JSON
pub async fn save_result(path: &Path, query: &str, result: &str) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&SavedQuery { query, result })?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

fn is_exit(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}

/// Interactive session: one query per line until `exit`, `quit`, or EOF.
///
/// Model failures are printed and the session continues.
pub async fn run_repl<R, W>(client: &LlmClient, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    output
        .write_all(
            b"\n===== IPC Legal Analyzer =====\n\
              Type 'exit' or 'quit' to end the session\n\
              Type your legal query and press Enter\n\
              ==============================\n\n",
        )
        .await?;

    loop {
        output.write_all(b"Query: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(b"\nGoodbye!\n").await?;
            break;
        };

        let query = line.trim();
        if is_exit(query) {
            output.write_all(b"Goodbye!\n").await?;
            break;
        }
        if query.is_empty() {
            continue;
        }

        debug!("REPL query of {} chars", query.len());
        output.write_all(b"\nAnalyzing...\n\n").await?;
        let result = client.ask(query).await;
        output
            .write_all(format!("{}\n\n{}\n\n", result, "-".repeat(80)).as_bytes())
            .await?;
    }

    output.flush().await
}
