//! Queue parameters — submission defaults.
//!
//! [`QueueParams`] groups the static parameters callers apply when
//! building drafts for the queue service. These are application-layer
//! concerns, not domain policy.

use queue_domain::DEFAULT_PRIORITY;
use serde::{Deserialize, Serialize};

/// Submission control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueParams {
    /// Priority given to submissions that do not specify one.
    pub default_priority: i32,
}

impl Default for QueueParams {
    fn default() -> Self {
        Self {
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

impl QueueParams {
    pub fn with_default_priority(mut self, priority: i32) -> Self {
        self.default_priority = priority;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(QueueParams::default().default_priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn test_builder() {
        let params = QueueParams::default().with_default_priority(3);
        assert_eq!(params.default_priority, 3);
    }
}
