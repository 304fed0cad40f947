use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::generate::DEFAULT_MAX_COUNT;
use crate::table::CategorySet;

/// Caller-side settings for an analyzer session.
///
/// Every field is optional in JSON; missing fields take the stock analyzer's values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerConfig {
    pub categories: CategorySet,
    /// Pre-filled "number of salespeople".
    pub default_count: usize,
    /// Pre-filled "total sales threshold".
    pub default_threshold: f64,
    pub max_count: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            categories: CategorySet::default(),
            default_count: 8,
            default_threshold: 25.0,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] TableError),
}

impl AnalyzerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.categories.is_empty() {
            return Err(TableError::EmptyCategories);
        }
        if self.default_count == 0 || self.max_count == 0 {
            return Err(TableError::InvalidCount("0".to_string()));
        }
        if self.default_count > self.max_count {
            return Err(TableError::CountTooLarge {
                count: self.default_count,
                max: self.max_count,
            });
        }
        if !self.default_threshold.is_finite() {
            return Err(TableError::InvalidThreshold(
                self.default_threshold.to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_is_default() {
        assert_eq!(
            AnalyzerConfig::from_json_str("{}").unwrap(),
            AnalyzerConfig::default()
        );
    }

    #[test]
    fn partial_override() {
        let config =
            AnalyzerConfig::from_json_str(r#"{"categories": ["Truck", "Van"], "defaultThreshold": 12}"#)
                .unwrap();
        assert_eq!(
            config.categories.names(),
            &["Truck".to_string(), "Van".to_string()]
        );
        assert_eq!(config.default_threshold, 12.0);
        assert_eq!(config.default_count, 8);
    }

    #[test]
    fn empty_categories_are_invalid() {
        let err = AnalyzerConfig::from_json_str(r#"{"categories": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(TableError::EmptyCategories)));
    }

    #[test]
    fn default_count_must_fit_under_max() {
        let err =
            AnalyzerConfig::from_json_str(r#"{"defaultCount": 50, "maxCount": 10}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(TableError::CountTooLarge { count: 50, max: 10 })
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            AnalyzerConfig::from_json_str("{"),
            Err(ConfigError::Json(_))
        ));
    }
}
