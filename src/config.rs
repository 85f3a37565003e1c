//! Site-wide configuration loaded from JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::page::{ContactConfig, TypewriterConfig};
use crate::particles::DemoConfig;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range.
    #[error("Invalid configuration value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}

/// Configuration for every interactive piece of the page. All fields are optional
/// in JSON and fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Particle demo.
    pub demo: DemoConfig,
    /// Hero typewriter.
    pub typewriter: TypewriterConfig,
    /// Contact form submission.
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.demo.validate()?;
        self.typewriter.validate()?;
        self.contact.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = SiteConfig::from_json("{}").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = SiteConfig::from_json(
            r#"{
                "demo": { "trail_alpha": 0.25, "seed": 9, "emitter": { "burst_count": 4 } },
                "contact": { "endpoint": "/contact" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.demo.trail_alpha, 0.25);
        assert_eq!(config.demo.seed, Some(9));
        assert_eq!(config.demo.emitter.burst_count, 4);
        assert_eq!(config.demo.emitter.shrink, 0.99);
        assert_eq!(config.contact.endpoint, "/contact");
        assert_eq!(config.typewriter, TypewriterConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = SiteConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_value() {
        let err = SiteConfig::from_json(r#"{ "demo": { "trail_alpha": 2.0 } }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "demo.trail_alpha"),
            other => panic!("unexpected error {other}"),
        }
    }
}
