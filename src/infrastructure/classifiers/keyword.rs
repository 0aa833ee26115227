#[cfg(test)]
#[path = "keyword_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::ClassifierName;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::TopicClassifier;

// A topic counts as covered once any user message mentions one of its
// keywords. Deliberately coarse; the remote classifier is the accurate
// option when the wizard service is reachable.
static KEYWORDS: &[(&str, &[&str])] = &[
    ("objectives", &["objective", "goal", "outcome", "aim"]),
    ("beneficiaries", &["beneficiar", "audience", "community", "serve"]),
    ("activities", &["activit", "deliverable", "workstream", "task"]),
    ("budget", &["budget", "cost", "funding", "expense"]),
    ("timeline", &["timeline", "schedule", "milestone", "deadline"]),
    ("risks", &["risk", "assumption", "mitigation", "contingency"]),
    ("evaluation", &["evaluat", "metric", "indicator", "measure"]),
];

#[derive(Default)]
pub struct Keyword {}

#[async_trait]
impl TopicClassifier for Keyword {
    fn name(&self) -> ClassifierName {
        return ClassifierName::Keyword;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn classify(&self, history: &[Message], topic_id: &str) -> Result<bool> {
        let keywords = match KEYWORDS.iter().find(|(id, _)| return *id == topic_id) {
            Some((_, keywords)) => keywords,
            None => bail!(format!("No keywords defined for topic {topic_id}")),
        };

        let covered = history
            .iter()
            .filter(|message| return message.role == Role::User)
            .any(|message| {
                let content = message.content.to_lowercase();
                return keywords.iter().any(|keyword| return content.contains(keyword));
            });

        return Ok(covered);
    }
}
