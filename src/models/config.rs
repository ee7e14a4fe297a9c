use crate::processing::fuzzy::{AMBIGUITY_THRESHOLD, KEY_MATCH_THRESHOLD};
use crate::utils::{DocScanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TD3 line width; the parser only accepts lines of exactly this length.
pub const TD3_LINE_LENGTH: usize = 44;

/// Order in which MRZ candidate lines are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MrzOrdering {
    /// Highest `min_y` first: top of the page first with a bottom-left origin.
    DescendingY,
    /// Lowest `min_y` first, for OCR engines with a top-left origin.
    AscendingY,
}

/// Tunable constants of the extraction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Similarity a fragment must exceed to be read as a field label.
    pub key_match_threshold: f64,
    pub ambiguity_threshold: f64,
    pub mrz_min_line_length: usize,
    pub mrz_max_line_length: usize,
    /// Allowed deviation of each MRZ line length from the block mean.
    pub mrz_length_tolerance: f64,
    /// When set, every MRZ line must end below this normalized height.
    pub mrz_max_region_top: Option<f64>,
    pub mrz_ordering: MrzOrdering,
    /// Slack applied to the right-of / below tests of the spatial pairer.
    pub direction_tolerance: f64,
    /// Split a lone MRZ-shaped fragment in two (merged OCR lines).
    pub split_merged_mrz: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            key_match_threshold: KEY_MATCH_THRESHOLD,
            ambiguity_threshold: AMBIGUITY_THRESHOLD,
            mrz_min_line_length: 20,
            mrz_max_line_length: TD3_LINE_LENGTH,
            mrz_length_tolerance: 5.0,
            mrz_max_region_top: None,
            mrz_ordering: MrzOrdering::DescendingY,
            direction_tolerance: 0.01,
            split_merged_mrz: true,
        }
    }
}

impl ExtractionConfig {
    /// Loads a JSON config file; missing fields fall back to the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| DocScanError::io(path, e))?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: ExtractionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("key_match_threshold", self.key_match_threshold),
            ("ambiguity_threshold", self.ambiguity_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DocScanError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        // Anything read as a key must also be kept out of the value pool
        if self.ambiguity_threshold > self.key_match_threshold {
            return Err(DocScanError::InvalidConfig(format!(
                "ambiguity_threshold ({}) exceeds key_match_threshold ({})",
                self.ambiguity_threshold, self.key_match_threshold
            )));
        }

        if self.mrz_min_line_length > self.mrz_max_line_length {
            return Err(DocScanError::InvalidConfig(format!(
                "mrz_min_line_length ({}) exceeds mrz_max_line_length ({})",
                self.mrz_min_line_length, self.mrz_max_line_length
            )));
        }

        if self.mrz_max_line_length < TD3_LINE_LENGTH {
            return Err(DocScanError::InvalidConfig(format!(
                "mrz_max_line_length must be at least {} to admit TD3 lines",
                TD3_LINE_LENGTH
            )));
        }

        if self.mrz_length_tolerance < 0.0 || self.direction_tolerance < 0.0 {
            return Err(DocScanError::InvalidConfig(
                "tolerances must not be negative".to_string(),
            ));
        }

        if let Some(top) = self.mrz_max_region_top {
            if !(0.0..=1.0).contains(&top) {
                return Err(DocScanError::InvalidConfig(format!(
                    "mrz_max_region_top must be within [0, 1], got {}",
                    top
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExtractionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.key_match_threshold, 0.88);
        assert_eq!(config.mrz_min_line_length, 20);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ExtractionConfig::from_json(r#"{"mrz_min_line_length": 30, "mrz_ordering": "ascending_y"}"#).unwrap();
        assert_eq!(config.mrz_min_line_length, 30);
        assert_eq!(config.mrz_ordering, MrzOrdering::AscendingY);
        assert_eq!(config.direction_tolerance, 0.01);
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let result = ExtractionConfig::from_json(r#"{"key_match_threshold": 1.5}"#);
        assert!(matches!(result, Err(DocScanError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_ambiguity_above_key_threshold() {
        let result = ExtractionConfig::from_json(r#"{"key_match_threshold": 0.8, "ambiguity_threshold": 0.85}"#);
        assert!(matches!(result, Err(DocScanError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_short_max_line_length() {
        let result = ExtractionConfig::from_json(r#"{"mrz_max_line_length": 36}"#);
        assert!(matches!(result, Err(DocScanError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mrz_max_region_top": 0.3}}"#).unwrap();
        let config = ExtractionConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mrz_max_region_top, Some(0.3));
    }

    #[test]
    fn test_missing_file_reports_path() {
        match ExtractionConfig::from_file("/nonexistent/docscan.json") {
            Err(DocScanError::Io { path, .. }) => assert!(path.ends_with("docscan.json")),
            other => panic!("expected IO error, got {:?}", other),
        }
    }
}
