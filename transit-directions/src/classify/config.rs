//! Batch classification configuration.

use serde::{Deserialize, Serialize};

/// What to do with a trip that cannot be classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Fail the whole batch
    #[default]
    Abort,
    /// Record the failure for that trip and carry on
    SkipTrip,
}

/// Configuration parameters for classifying a batch of trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifyConfig {
    /// Handling of unclassifiable trips.
    pub failure_policy: FailurePolicy,

    /// Minimum batch size for classifying trips in parallel.
    /// Smaller batches are classified on the calling thread.
    pub parallel_threshold: usize,
}

impl ClassifyConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(failure_policy: FailurePolicy, parallel_threshold: usize) -> Self {
        Self {
            failure_policy,
            parallel_threshold,
        }
    }

    /// Returns a copy with a different failure policy.
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Returns a copy with a different parallel threshold.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Abort,
            parallel_threshold: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_strict() {
        let config = ClassifyConfig::default();
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.parallel_threshold, 64);
    }

    #[test]
    fn builder_style_overrides() {
        let config = ClassifyConfig::default()
            .with_failure_policy(FailurePolicy::SkipTrip)
            .with_parallel_threshold(1);
        assert_eq!(config, ClassifyConfig::new(FailurePolicy::SkipTrip, 1));
    }

    #[test]
    fn deserialize_partial() {
        let config: ClassifyConfig =
            serde_json::from_str(r#"{ "failure_policy": "skip_trip" }"#).unwrap();
        assert_eq!(config.failure_policy, FailurePolicy::SkipTrip);
        assert_eq!(config.parallel_threshold, 64);

        let config: ClassifyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClassifyConfig::default());

        assert!(serde_json::from_str::<ClassifyConfig>(r#"{ "threads": 4 }"#).is_err());
    }
}
