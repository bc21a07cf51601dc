//! Stream settings and configuration.
//!
//! This module provides the `StreamSettings` type for configuring how a
//! response body is turned into messages.

use crate::errors::{CoreError, Result};
use crate::policy::DispatchPolicy;
use serde::{Deserialize, Serialize};

/// Default upper bound on a single buffered line, in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 16 * 1024 * 1024;

/// Settings for an SSE stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Maximum number of bytes buffered for one line.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// Event dispatch table.
    #[serde(default)]
    pub policy: DispatchPolicy,
}

fn default_max_line_length() -> usize {
    DEFAULT_MAX_LINE_LENGTH
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            policy: DispatchPolicy::default(),
        }
    }
}

impl StreamSettings {
    /// Create default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum line length.
    #[must_use]
    pub fn max_line_length(mut self, bytes: usize) -> Self {
        self.max_line_length = bytes;
        self
    }

    /// Set the dispatch policy.
    #[must_use]
    pub fn policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings for values the stream cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length == 0 {
            return Err(CoreError::Configuration(
                "max_line_length must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
