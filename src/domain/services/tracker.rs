#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;

use std::collections::BTreeSet;

use crate::domain::models::ClassifierBox;
use crate::domain::models::Message;
use crate::domain::models::ProgressSnapshot;
use crate::domain::models::TopicRubric;

pub struct TopicTracker {}

impl TopicTracker {
    /// Recomputes the snapshot in full from the conversation so far.
    /// Aggregation only; the completion judgement per topic is delegated
    /// to the classifier. A topic the classifier cannot judge counts as
    /// not completed, so recomputation never fails. An empty rubric has
    /// nothing blocking completion and passes the gate.
    pub async fn recompute(
        history: &[Message],
        rubric: &TopicRubric,
        classifier: &ClassifierBox,
    ) -> ProgressSnapshot {
        let mut completed: BTreeSet<String> = BTreeSet::new();

        for topic in &rubric.topics {
            match classifier.classify(history, &topic.id).await {
                Ok(true) => {
                    completed.insert(topic.id.to_string());
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(topic = topic.id.as_str(), error = ?err, "Topic classification failed");
                }
            }
        }

        let gate_passed = rubric
            .core_topics()
            .iter()
            .all(|topic| return completed.contains(&topic.id));

        return ProgressSnapshot {
            completed_count: completed.len(),
            completed_topics: completed,
            gate_passed,
        };
    }
}
