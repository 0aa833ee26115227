#[cfg(test)]
#[path = "rubric_test.rs"]
mod tests;

use anyhow::Context;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::fs;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// One subject area the interview is expected to cover. Core topics gate
/// completion; the rest are supplementary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub core: bool,
}

impl Topic {
    pub fn new(id: &str, label: &str, core: bool) -> Topic {
        return Topic {
            id: id.to_string(),
            label: label.to_string(),
            core,
        };
    }
}

/// The fixed, ordered catalogue of interview topics. Static for the
/// lifetime of a session, never mutated at runtime.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRubric {
    pub topics: Vec<Topic>,
}

impl TopicRubric {
    /// The built-in rubric for project plan interviews.
    pub fn project_plan() -> TopicRubric {
        return TopicRubric {
            topics: vec![
                Topic::new("objectives", "Objectives and outcomes", true),
                Topic::new("beneficiaries", "Beneficiaries and audience", true),
                Topic::new("activities", "Activities and deliverables", true),
                Topic::new("budget", "Budget and funding", true),
                Topic::new("timeline", "Timeline and milestones", false),
                Topic::new("risks", "Risks and assumptions", false),
                Topic::new("evaluation", "Evaluation and metrics", false),
            ],
        };
    }

    pub fn from_yaml(payload: &str) -> Result<TopicRubric> {
        let rubric: TopicRubric = serde_yaml::from_str(payload)?;
        return Ok(rubric);
    }

    /// Returns the rubric configured through `rubric-file`, falling back to
    /// the built-in project plan rubric when none is set.
    pub async fn active() -> Result<TopicRubric> {
        let rubric_file = Config::get(ConfigKey::RubricFile);
        if rubric_file.is_empty() {
            return Ok(TopicRubric::project_plan());
        }

        let payload = fs::read_to_string(&rubric_file)
            .await
            .with_context(|| return format!("Failed to read rubric file {rubric_file}"))?;

        return TopicRubric::from_yaml(&payload);
    }

    pub fn core_topics(&self) -> Vec<&Topic> {
        return self
            .topics
            .iter()
            .filter(|topic| return topic.core)
            .collect();
    }

    pub fn len(&self) -> usize {
        return self.topics.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.topics.is_empty();
    }
}
