use crate::client::ChatPptClient;
use crate::server::handle_message;
use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Serves newline-delimited JSON-RPC over stdin/stdout until stdin closes.
///
/// Each message is handled on its own task so a slow remote call does not
/// hold up unrelated requests; replies are written by a single writer task.
pub async fn run(client: Arc<ChatPptClient>) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel::<Value>();
    let writer = tokio::spawn(write_responses(rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("serving MCP over stdio");

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "skipping malformed message");
                continue;
            }
        };

        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = handle_message(&client, &request).await {
                let _ = tx.send(response);
            }
        });
    }

    drop(tx);
    writer.await.context("response writer panicked")?
}

async fn write_responses(mut rx: mpsc::UnboundedReceiver<Value>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    while let Some(response) = rx.recv().await {
        let mut serialized =
            serde_json::to_string(&response).context("failed to serialize response")?;
        serialized.push('\n');
        stdout
            .write_all(serialized.as_bytes())
            .await
            .context("failed to write response")?;
        stdout.flush().await.context("failed to flush response")?;
    }
    Ok(())
}
