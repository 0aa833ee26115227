use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::Message;

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ClassifierName {
    Keyword,
    Remote,
}

impl ClassifierName {
    pub fn parse(text: String) -> Option<ClassifierName> {
        return ClassifierName::iter().find(|e| return e.to_string() == text);
    }
}

#[async_trait]
pub trait TopicClassifier {
    /// Returns the name of the classifier.
    fn name(&self) -> ClassifierName;

    /// Used at startup to verify all configurations are available to work
    /// with the classifier.
    async fn health_check(&self) -> Result<()>;

    /// Returns whether the conversation so far has covered the given
    /// topic. Expected to be deterministic for a fixed history snapshot.
    async fn classify(&self, history: &[Message], topic_id: &str) -> Result<bool>;
}

pub type ClassifierBox = Arc<dyn TopicClassifier + Send + Sync>;
