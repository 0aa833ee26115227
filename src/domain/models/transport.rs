use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::Message;
use super::StreamEvent;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TransportName {
    Wizard,
}

impl TransportName {
    pub fn parse(text: String) -> Option<TransportName> {
        return TransportName::iter().find(|e| return e.to_string() == text);
    }
}

#[async_trait]
pub trait Transport {
    /// Returns the name of the transport.
    fn name(&self) -> TransportName;

    /// Used at startup to verify all configurations are available to work
    /// with the remote wizard service.
    async fn health_check(&self) -> Result<()>;

    /// Opens one streamed interview turn for the given history. Events
    /// are passed through the channel in arrival order, and the stream
    /// ends with exactly one terminal event unless `cancel` fires first,
    /// in which case the request is dropped without a terminal event.
    async fn open_stream<'a>(
        &self,
        session_id: &str,
        history: &[Message],
        tx: &'a mpsc::UnboundedSender<StreamEvent>,
        cancel: CancellationToken,
    ) -> Result<()>;
}

pub type TransportBox = Arc<dyn Transport + Send + Sync>;
