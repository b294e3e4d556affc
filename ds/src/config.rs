//! Search engine configuration

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DocError;

/// How much of each document `list_documents` shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreviewMode {
    /// First N characters of the content
    Chars(usize),
    /// First K lines of the content
    Lines(usize),
}

impl Default for PreviewMode {
    fn default() -> Self {
        Self::Chars(crate::DEFAULT_PREVIEW_CHARS)
    }
}

/// Tuning knobs for the match index and result formatting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Allowed edits as a fraction of the query length (0.0 = exact only)
    pub threshold: f64,

    /// Weight of matches in document content
    #[serde(rename = "content-weight")]
    pub content_weight: f64,

    /// Weight of matches in the document id
    #[serde(rename = "name-weight")]
    pub name_weight: f64,

    /// Characters of context on each side of a highlighted match
    #[serde(rename = "context-chars")]
    pub context_chars: usize,

    /// Listing preview size
    pub preview: PreviewMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: crate::DEFAULT_THRESHOLD,
            content_weight: crate::DEFAULT_CONTENT_WEIGHT,
            name_weight: crate::DEFAULT_NAME_WEIGHT,
            context_chars: crate::DEFAULT_CONTEXT_CHARS,
            preview: PreviewMode::default(),
        }
    }
}

impl SearchConfig {
    /// Check that every knob is in range
    pub fn validate(&self) -> Result<(), DocError> {
        debug!(?self, "SearchConfig::validate: called");
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(DocError::Build(format!(
                "threshold must be between 0.0 and 1.0, got {}",
                self.threshold
            )));
        }

        for (field, weight) in [("content-weight", self.content_weight), ("name-weight", self.name_weight)] {
            if !(weight > 0.0 && weight <= 1.0) {
                return Err(DocError::Build(format!(
                    "{} must be greater than 0.0 and at most 1.0, got {}",
                    field, weight
                )));
            }
        }

        let preview_size = match self.preview {
            PreviewMode::Chars(n) | PreviewMode::Lines(n) => n,
        };
        if preview_size == 0 {
            return Err(DocError::Build("preview size must be greater than 0".to_string()));
        }

        Ok(())
    }

    /// Maximum edit distance tolerated for a query of `query_len` characters
    ///
    /// Always strictly less than the query length, so every match consumes
    /// at least one character of the text.
    pub fn max_distance(&self, query_len: usize) -> usize {
        let allowed = (self.threshold * query_len as f64).floor() as usize;
        allowed.min(query_len.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = SearchConfig {
            threshold: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DocError::Build(_)));
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let config = SearchConfig {
            name_weight: 0.0,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().to_string().contains("name-weight"));
    }

    #[test]
    fn test_zero_preview_rejected() {
        let config = SearchConfig {
            preview: PreviewMode::Lines(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_distance_scales_with_query() {
        let config = SearchConfig::default();
        assert_eq!(config.max_distance(3), 0);
        assert_eq!(config.max_distance(4), 1);
        assert_eq!(config.max_distance(11), 2);
    }

    #[test]
    fn test_max_distance_never_reaches_query_len() {
        let config = SearchConfig {
            threshold: 1.0,
            ..Default::default()
        };
        assert_eq!(config.max_distance(5), 4);
        assert_eq!(config.max_distance(1), 0);
        assert_eq!(config.max_distance(0), 0);
    }
}
