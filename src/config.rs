//! Extraction configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Knobs supplied by the caller.
///
/// ```json
/// { "prefix_len": 10, "min_thread_len": 10, "include_root": true }
/// ```
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperConvoConfig {
    /// Number of messages of each thread (after sorting by time) to keep.
    pub prefix_len: usize,
    /// Threads shorter than this, after truncation, are skipped.
    pub min_thread_len: usize,
    /// `true`: one thread per conversation starting at its root.
    /// `false`: one thread per top-level reply.
    pub include_root: bool,
    /// Keep going when one thread fails to build, logging the failure.
    pub continue_on_error: bool,
}

impl Default for HyperConvoConfig {
    fn default() -> Self {
        Self {
            prefix_len: 10,
            min_thread_len: 10,
            include_root: true,
            continue_on_error: false,
        }
    }
}

impl HyperConvoConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prefix_len == 0 {
            return Err(Error::Config("prefix_len must be at least 1".into()));
        }
        if self.min_thread_len > self.prefix_len {
            tracing::warn!(
                prefix_len = self.prefix_len,
                min_thread_len = self.min_thread_len,
                "min_thread_len exceeds prefix_len; every thread will be skipped"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = HyperConvoConfig::default();
        assert_eq!(c.prefix_len, 10);
        assert_eq!(c.min_thread_len, 10);
        assert!(c.include_root);
        assert!(!c.continue_on_error);
    }

    #[test]
    fn test_from_json_partial() {
        let c = HyperConvoConfig::from_json(r#"{"min_thread_len": 3, "include_root": false}"#).unwrap();
        assert_eq!(c.prefix_len, 10);
        assert_eq!(c.min_thread_len, 3);
        assert!(!c.include_root);
    }

    #[test]
    fn test_rejects_zero_prefix() {
        assert!(matches!(HyperConvoConfig::from_json(r#"{"prefix_len": 0}"#), Err(Error::Config(_))));
        assert!(matches!(HyperConvoConfig::from_json("not json"), Err(Error::Json(_))));
    }
}
