use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One round of observed data: how many times each event type occurred
/// out of a single shared trial count.
///
/// Counts are unsigned by construction, so negative values cannot reach
/// the evaluator; coercion of raw user input lives in the supervisor's
/// adapter layer, not here.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Observation {
    /// Trial count shared by every event type in this evaluation.
    pub total_trials: u32,
    /// Observed occurrence count per event-type id. Missing ids read as 0.
    #[serde(default)]
    pub counts: HashMap<String, u32>,
}

impl Observation {
    pub fn new(total_trials: u32) -> Self {
        Self {
            total_trials,
            counts: HashMap::new(),
        }
    }

    /// Builder-style count setter.
    pub fn with_count(mut self, event_id: impl Into<String>, count: u32) -> Self {
        self.counts.insert(event_id.into(), count);
        self
    }

    pub fn set_count(&mut self, event_id: impl Into<String>, count: u32) {
        self.counts.insert(event_id.into(), count);
    }

    #[inline]
    pub fn count(&self, event_id: &str) -> u32 {
        self.counts.get(event_id).copied().unwrap_or(0)
    }
}
