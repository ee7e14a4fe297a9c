use crate::models::{ExtractionConfig, MrzLine};
use log::debug;

/// Structural checks on a group of MRZ candidate lines.
pub struct MrzValidator;

impl MrzValidator {
    /// A block is 2 lines (TD3) or 3 lines (TD1, accepted here but never
    /// decoded) whose lengths all sit close to their mean.
    pub fn is_likely_mrz_block(lines: &[MrzLine], config: &ExtractionConfig) -> bool {
        if lines.len() != 2 && lines.len() != 3 {
            debug!("MRZ block rejected: {} candidate lines", lines.len());
            return false;
        }

        let lengths: Vec<f64> = lines.iter().map(|l| l.text.chars().count() as f64).collect();
        let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
        if !lengths.iter().all(|len| (len - mean).abs() < config.mrz_length_tolerance) {
            debug!("MRZ block rejected: uneven line lengths {:?}", lengths);
            return false;
        }

        if let Some(top) = config.mrz_max_region_top {
            if lines.iter().any(|l| l.bounding_box.max_y() >= top) {
                debug!("MRZ block rejected: lines extend above {}", top);
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rect;

    fn line(len: usize, y: f64) -> MrzLine {
        MrzLine {
            text: "<".repeat(len),
            bounding_box: Rect::new(0.05, y, 0.9, 0.04),
        }
    }

    #[test]
    fn test_two_equal_lines() {
        let config = ExtractionConfig::default();
        assert!(MrzValidator::is_likely_mrz_block(&[line(44, 0.1), line(44, 0.05)], &config));
    }

    #[test]
    fn test_line_count_bounds() {
        let config = ExtractionConfig::default();
        assert!(!MrzValidator::is_likely_mrz_block(&[line(44, 0.1)], &config));
        assert!(MrzValidator::is_likely_mrz_block(&[line(30, 0.2), line(30, 0.1), line(30, 0.0)], &config));
        assert!(!MrzValidator::is_likely_mrz_block(&[line(44, 0.3), line(44, 0.2), line(44, 0.1), line(44, 0.0)], &config));
    }

    #[test]
    fn test_uneven_lengths() {
        let config = ExtractionConfig::default();
        // mean 37, both lines 7 away
        assert!(!MrzValidator::is_likely_mrz_block(&[line(44, 0.1), line(30, 0.05)], &config));
        // mean 42, both lines 2 away
        assert!(MrzValidator::is_likely_mrz_block(&[line(44, 0.1), line(40, 0.05)], &config));
    }

    #[test]
    fn test_region_constraint() {
        let config = ExtractionConfig {
            mrz_max_region_top: Some(0.3),
            ..ExtractionConfig::default()
        };
        assert!(MrzValidator::is_likely_mrz_block(&[line(44, 0.1), line(44, 0.05)], &config));
        assert!(!MrzValidator::is_likely_mrz_block(&[line(44, 0.5), line(44, 0.05)], &config));
    }
}
