use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use super::TopicTracker;
use crate::domain::models::ClassifierBox;
use crate::domain::models::ClassifierName;
use crate::domain::models::Message;
use crate::domain::models::Topic;
use crate::domain::models::TopicClassifier;
use crate::domain::models::TopicRubric;

struct ScriptedClassifier {
    completed: Vec<&'static str>,
    failing: Vec<&'static str>,
}

impl ScriptedClassifier {
    fn boxed(completed: Vec<&'static str>, failing: Vec<&'static str>) -> ClassifierBox {
        return Arc::new(ScriptedClassifier { completed, failing });
    }
}

#[async_trait]
impl TopicClassifier for ScriptedClassifier {
    fn name(&self) -> ClassifierName {
        return ClassifierName::Keyword;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn classify(&self, _history: &[Message], topic_id: &str) -> Result<bool> {
        if self.failing.contains(&topic_id) {
            bail!(format!("cannot classify {topic_id}"));
        }
        return Ok(self.completed.contains(&topic_id));
    }
}

fn rubric() -> TopicRubric {
    return TopicRubric {
        topics: vec![
            Topic::new("objectives", "Objectives", true),
            Topic::new("budget", "Budget", true),
            Topic::new("timeline", "Timeline", false),
        ],
    };
}

#[tokio::test]
async fn it_passes_the_gate_when_all_core_topics_are_completed() {
    let classifier = ScriptedClassifier::boxed(vec!["objectives", "budget"], vec![]);
    let snapshot = TopicTracker::recompute(&[], &rubric(), &classifier).await;

    assert_eq!(snapshot.completed_count, 2);
    assert!(snapshot.is_completed("objectives"));
    assert!(snapshot.is_completed("budget"));
    assert!(snapshot.gate_passed);
}

#[tokio::test]
async fn it_blocks_the_gate_on_a_missing_core_topic() {
    let classifier = ScriptedClassifier::boxed(vec!["objectives", "timeline"], vec![]);
    let snapshot = TopicTracker::recompute(&[], &rubric(), &classifier).await;

    assert_eq!(snapshot.completed_count, 2);
    assert!(!snapshot.gate_passed);
}

#[tokio::test]
async fn it_ignores_supplementary_topics_for_the_gate() {
    let with_supplementary =
        ScriptedClassifier::boxed(vec!["objectives", "budget", "timeline"], vec![]);
    let without_supplementary = ScriptedClassifier::boxed(vec!["objectives", "budget"], vec![]);

    let first = TopicTracker::recompute(&[], &rubric(), &with_supplementary).await;
    let second = TopicTracker::recompute(&[], &rubric(), &without_supplementary).await;

    assert!(first.gate_passed);
    assert!(second.gate_passed);
    assert_eq!(first.completed_count, 3);
    assert_eq!(second.completed_count, 2);
}

#[tokio::test]
async fn it_treats_classifier_failures_as_not_completed() {
    let classifier = ScriptedClassifier::boxed(vec!["objectives", "budget"], vec!["budget"]);
    let snapshot = TopicTracker::recompute(&[], &rubric(), &classifier).await;

    assert_eq!(snapshot.completed_count, 1);
    assert!(!snapshot.is_completed("budget"));
    assert!(!snapshot.gate_passed);
}

#[tokio::test]
async fn it_passes_the_gate_for_an_empty_rubric() {
    let classifier = ScriptedClassifier::boxed(vec![], vec![]);
    let snapshot = TopicTracker::recompute(&[], &TopicRubric::default(), &classifier).await;

    assert_eq!(snapshot.completed_count, 0);
    assert!(snapshot.gate_passed);
}

#[tokio::test]
async fn it_returns_identical_snapshots_for_identical_inputs() {
    let classifier = ScriptedClassifier::boxed(vec!["objectives", "timeline"], vec![]);
    let history = vec![Message::new(
        crate::domain::models::Role::User,
        "Our objectives are clear.",
    )];

    let first = TopicTracker::recompute(&history, &rubric(), &classifier).await;
    let second = TopicTracker::recompute(&history, &rubric(), &classifier).await;

    assert_eq!(first, second);
}
