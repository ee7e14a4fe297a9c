use crate::models::{DocumentElement, ExtractionConfig, Rect, RecognizedKeyValue, TextObservation};
use crate::validation::FormatValidator;
use log::debug;

/// Pairs field labels with the nearest plausible value on labelled ID cards.
pub struct SpatialPairer<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> SpatialPairer<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        SpatialPairer { config }
    }

    /// One pair per label fragment that found a validated value, in input order.
    pub fn extract_key_value_pairs(&self, observations: &[TextObservation]) -> Vec<RecognizedKeyValue> {
        let threshold = self.config.key_match_threshold;

        // Fragments that read like any label can never be values. The looser
        // threshold also keeps half-legible labels out of the pool.
        let label_like: Vec<bool> = observations
            .iter()
            .map(|obs| DocumentElement::is_likely_key(&obs.text, self.config.ambiguity_threshold))
            .collect();

        let mut results = Vec::new();

        for (key_index, key_obs) in observations.iter().enumerate() {
            let element = match DocumentElement::match_key(&key_obs.text, threshold) {
                Some(element) => element,
                None => continue,
            };

            let candidates = observations
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != key_index && !label_like[*index])
                .map(|(_, obs)| obs);

            let best = match self.find_best_match(&key_obs.bounding_box, candidates) {
                Some(best) => best,
                None => {
                    debug!("{}: no candidate right of or below {:?}", element, key_obs.text);
                    continue;
                }
            };

            if !FormatValidator::is_valid_value(element, &best.text) {
                debug!("{}: nearest value {:?} fails validation, dropped", element, best.text);
                continue;
            }

            results.push(RecognizedKeyValue::paired(element, key_obs, best));
        }

        results
    }

    /// Nearest candidate, by center distance, that lies to the right of or below
    /// the key. The first of equally distant candidates wins.
    pub fn find_best_match<'o, I>(&self, key_box: &Rect, candidates: I) -> Option<&'o TextObservation>
    where
        I: IntoIterator<Item = &'o TextObservation>,
    {
        let mut best: Option<(&'o TextObservation, f64)> = None;

        for candidate in candidates {
            if !self.is_right_or_below(key_box, &candidate.bounding_box) {
                continue;
            }
            let distance = key_box.distance_to(&candidate.bounding_box);
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((candidate, distance)),
            }
        }

        best.map(|(candidate, _)| candidate)
    }

    /// Smaller `y` is lower on the page with the OCR engine's bottom-left origin.
    pub fn is_right_or_below(&self, key_box: &Rect, candidate: &Rect) -> bool {
        let tolerance = self.config.direction_tolerance;
        let is_right = candidate.min_x() > key_box.mid_x() - tolerance;
        let is_below = candidate.mid_y() < key_box.mid_y() - tolerance;
        is_right || is_below
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(text: &str, x: f64, y: f64, w: f64, h: f64) -> TextObservation {
        TextObservation::raw(text, Rect::new(x, y, w, h), 0.95)
    }

    fn pairs(observations: &[TextObservation]) -> Vec<RecognizedKeyValue> {
        let config = ExtractionConfig::default();
        SpatialPairer::new(&config).extract_key_value_pairs(observations)
    }

    #[test]
    fn test_value_to_the_right() {
        let observations = vec![
            obs("SURNAME", 0.10, 0.80, 0.15, 0.04),
            obs("DOE", 0.30, 0.80, 0.10, 0.04),
        ];
        let result = pairs(&observations);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].key, DocumentElement::Surname);
        assert_eq!(result[0].value.as_deref(), Some("DOE"));
        assert_eq!(result[0].key_observation.as_ref(), Some(&observations[0]));
        assert_eq!(result[0].value_observation.as_ref(), Some(&observations[1]));
    }

    #[test]
    fn test_value_below() {
        let observations = vec![
            obs("DATE OF BIRTH", 0.10, 0.60, 0.20, 0.04),
            obs("13/04/1990", 0.10, 0.54, 0.15, 0.04),
        ];
        let result = pairs(&observations);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].key, DocumentElement::DateOfBirth);
        assert_eq!(result[0].value.as_deref(), Some("13/04/1990"));
    }

    #[test]
    fn test_above_left_candidate_never_selected() {
        let config = ExtractionConfig::default();
        let pairer = SpatialPairer::new(&config);
        let key_box = Rect::new(0.50, 0.50, 0.10, 0.04);
        let above_left = obs("NEAR", 0.38, 0.53, 0.10, 0.04);
        let far_right = obs("FAR", 0.90, 0.50, 0.05, 0.04);

        assert!(!pairer.is_right_or_below(&key_box, &above_left.bounding_box));
        let chosen = pairer.find_best_match(&key_box, [&above_left, &far_right]);
        assert_eq!(chosen.map(|o| o.text.as_str()), Some("FAR"));
        assert!(pairer.find_best_match(&key_box, [&above_left]).is_none());
    }

    #[test]
    fn test_first_of_equal_distance_wins() {
        let config = ExtractionConfig::default();
        let pairer = SpatialPairer::new(&config);
        // binary fractions keep both distances exactly 0.375
        let key_box = Rect::new(0.25, 0.5, 0.25, 0.25);
        let right = obs("RIGHT", 0.625, 0.5, 0.25, 0.25);
        let below = obs("BELOW", 0.25, 0.125, 0.25, 0.25);
        let chosen = pairer.find_best_match(&key_box, [&right, &below]);
        assert_eq!(chosen.map(|o| o.text.as_str()), Some("RIGHT"));
        let chosen = pairer.find_best_match(&key_box, [&below, &right]);
        assert_eq!(chosen.map(|o| o.text.as_str()), Some("BELOW"));
    }

    #[test]
    fn test_failed_validation_drops_pair_without_fallback() {
        // The nearest value is not a date; the valid date further away is not used
        let observations = vec![
            obs("DATE OF BIRTH", 0.10, 0.60, 0.20, 0.04),
            obs("PRAHA", 0.35, 0.60, 0.10, 0.04),
            obs("13/04/1990", 0.10, 0.30, 0.15, 0.04),
        ];
        assert!(pairs(&observations).is_empty());
    }

    #[test]
    fn test_labels_are_not_consumed_as_values() {
        let observations = vec![
            obs("SURNAME", 0.10, 0.80, 0.15, 0.04),
            obs("GIVEN NAMES", 0.30, 0.80, 0.15, 0.04),
            obs("JANE", 0.50, 0.80, 0.10, 0.04),
        ];
        let result = pairs(&observations);
        for pair in &result {
            let value = pair.value_observation.as_ref().unwrap();
            assert!(!DocumentElement::is_likely_key(&value.text, 0.85));
        }
        // SURNAME skips the GIVEN NAMES label and lands on JANE
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].value.as_deref(), Some("JANE"));
        assert_eq!(result[1].key, DocumentElement::GivenNames);
        assert_eq!(result[1].value.as_deref(), Some("JANE"));
    }

    #[test]
    fn test_bilingual_labels_are_not_consumed_as_values() {
        let observations = vec![
            obs("MISTO NAROZENI / PLACE OF BIRTH", 0.10, 0.50, 0.30, 0.04),
            obs("STATNI OBCANSTVI / NATIONALITY", 0.45, 0.50, 0.30, 0.04),
            obs("CZE", 0.45, 0.25, 0.10, 0.04),
        ];
        let result = pairs(&observations);
        assert_eq!(result.len(), 2);
        for pair in &result {
            let value = pair.value_observation.as_ref().unwrap();
            assert!(
                DocumentElement::match_key(&value.text, 0.88).is_none(),
                "{} took label {}",
                pair.key,
                value.text
            );
            assert_eq!(value.text, "CZE");
        }
        assert_eq!(result[0].key, DocumentElement::PlaceOfBirth);
        assert_eq!(result[1].key, DocumentElement::Nationality);
    }

    #[test]
    fn test_duplicate_texts_are_distinct_fragments() {
        // Identical label text twice: each is excluded only by its own index
        let observations = vec![
            obs("SEX", 0.10, 0.50, 0.05, 0.04),
            obs("SEX", 0.60, 0.50, 0.05, 0.04),
            obs("F", 0.20, 0.50, 0.03, 0.04),
            obs("M", 0.70, 0.50, 0.03, 0.04),
        ];
        let result = pairs(&observations);
        let values: Vec<&str> = result.iter().filter_map(|p| p.value.as_deref()).collect();
        assert_eq!(values, vec!["F", "M"]);
    }

    #[test]
    fn test_half_legible_label_is_not_a_value() {
        // "DATE" scores between the two thresholds: not a key, not a value either
        let observations = vec![
            obs("DATE OF ISSUE", 0.10, 0.60, 0.20, 0.04),
            obs("DATE", 0.35, 0.60, 0.10, 0.04),
            obs("01/02/2020", 0.60, 0.60, 0.15, 0.04),
        ];
        let result = pairs(&observations);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].value.as_deref(), Some("01/02/2020"));
    }

    #[test]
    fn test_key_without_candidates_is_omitted() {
        let observations = vec![obs("NATIONALITY", 0.80, 0.10, 0.15, 0.04)];
        assert!(pairs(&observations).is_empty());
    }
}
