use std::collections::BTreeSet;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Derived view of how much of the rubric the conversation has covered.
/// Always recomputed in full from history, never patched incrementally.
/// The ordered set keeps equal inputs producing identical snapshots.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub completed_topics: BTreeSet<String>,
    pub completed_count: usize,
    pub gate_passed: bool,
}

impl ProgressSnapshot {
    pub fn is_completed(&self, topic_id: &str) -> bool {
        return self.completed_topics.contains(topic_id);
    }
}
