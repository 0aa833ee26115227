#[cfg(test)]
#[path = "wizard_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Message;
use crate::domain::models::StreamEvent;
use crate::domain::models::Transport;
use crate::domain::models::TransportName;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StreamRequest {
    session_id: String,
    messages: Vec<Message>,
}

pub struct Wizard {
    url: String,
    token: String,
    timeout: String,
    request_timeout: String,
}

impl Default for Wizard {
    fn default() -> Wizard {
        return Wizard {
            url: Config::get(ConfigKey::WizardURL),
            token: Config::get(ConfigKey::WizardToken),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
            request_timeout: Config::get(ConfigKey::RequestTimeout),
        };
    }
}

#[async_trait]
impl Transport for Wizard {
    fn name(&self) -> TransportName {
        return TransportName::Wizard;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(format!("{url}/api/health", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Wizard service is not running");
            bail!("Wizard service is not running");
        }

        let res = res.unwrap();
        if res.status() != 200 {
            tracing::error!(
                status = res.status().as_u16(),
                "Wizard service health check failed"
            );
            bail!("Wizard service health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn open_stream<'a>(
        &self,
        session_id: &str,
        history: &[Message],
        tx: &'a mpsc::UnboundedSender<StreamEvent>,
        cancel: CancellationToken,
    ) -> Result<()> {
        let req = StreamRequest {
            session_id: session_id.to_string(),
            messages: history.to_vec(),
        };

        let mut builder = reqwest::Client::new()
            .post(format!("{url}/api/interview/stream", url = self.url))
            // A stalled stream is resolved here rather than by the
            // session, which carries no watchdog of its own.
            .timeout(Duration::from_millis(self.request_timeout.parse::<u64>()?))
            .json(&req);

        if !self.token.is_empty() {
            builder = builder.bearer_auth(&self.token);
        }

        let res = builder.send().await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to open an interview stream"
            );
            bail!("Failed to open an interview stream");
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).lines();

        let mut saw_terminal = false;
        loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => {
                    // Dropping the reader closes the connection; the
                    // caller has already discarded the buffer locally.
                    tracing::debug!(session_id = session_id, "Stream cancelled");
                    return Ok(());
                }
                line = lines_reader.next_line() => line?,
            };

            let line = match line {
                Some(line) => line,
                None => break,
            };
            if line.trim().is_empty() {
                continue;
            }

            // A line that does not parse is treated the same as a
            // transport failure.
            let event: StreamEvent = serde_json::from_str(&line)?;
            tracing::debug!(body = ?event, "Stream event");

            let is_terminal = event.is_terminal();
            tx.send(event)?;
            if is_terminal {
                saw_terminal = true;
                break;
            }
        }

        if !saw_terminal {
            bail!("Stream ended without a terminal event");
        }

        return Ok(());
    }
}
