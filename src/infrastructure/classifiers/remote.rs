#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ClassifierName;
use crate::domain::models::Message;
use crate::domain::models::TopicClassifier;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ClassifyRequest {
    topic_id: String,
    messages: Vec<Message>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ClassifyResponse {
    pub completed: bool,
}

pub struct Remote {
    url: String,
    token: String,
    timeout: String,
}

impl Default for Remote {
    fn default() -> Remote {
        return Remote {
            url: Config::get(ConfigKey::ClassifierURL),
            token: Config::get(ConfigKey::WizardToken),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

#[async_trait]
impl TopicClassifier for Remote {
    fn name(&self) -> ClassifierName {
        return ClassifierName::Remote;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(format!("{url}/api/health", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Topic classifier is not running");
            bail!("Topic classifier is not running");
        }

        let res = res.unwrap();
        if res.status() != 200 {
            tracing::error!(
                status = res.status().as_u16(),
                "Topic classifier health check failed"
            );
            bail!("Topic classifier health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn classify(&self, history: &[Message], topic_id: &str) -> Result<bool> {
        let req = ClassifyRequest {
            topic_id: topic_id.to_string(),
            messages: history.to_vec(),
        };

        let mut builder = reqwest::Client::new()
            .post(format!("{url}/api/topics/classify", url = self.url))
            .json(&req);

        if !self.token.is_empty() {
            builder = builder.bearer_auth(&self.token);
        }

        let res = builder.send().await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                topic = topic_id,
                "Failed to classify topic"
            );
            bail!("Failed to classify topic");
        }

        let body: ClassifyResponse = res.json().await?;
        tracing::debug!(topic = topic_id, completed = body.completed, "Classified");

        return Ok(body.completed);
    }
}
