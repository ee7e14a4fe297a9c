// Fuzzy label matching for noisy OCR text.
// Jaro-Winkler weights shared prefixes, which suits printed field labels where
// OCR damage tends to hit the tail of a word.

use strsim::jaro_winkler;

/// Default threshold for deciding that a fragment is a field label.
pub const KEY_MATCH_THRESHOLD: f64 = 0.88;

/// Looser threshold for keeping label-looking fragments out of value pools.
pub const AMBIGUITY_THRESHOLD: f64 = 0.85;

/// Similarity in [0, 1]; identical strings score 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    jaro_winkler(a, b).clamp(0.0, 1.0)
}

/// Highest similarity between `text` and any synonym, 0.0 for an empty list.
pub fn best_synonym_score(text: &str, synonyms: &[&str]) -> f64 {
    synonyms
        .iter()
        .map(|synonym| similarity(text, synonym))
        .fold(0.0_f64, f64::max)
}

/// True iff the best synonym score is strictly above `threshold`.
pub fn matches_any_synonym(text: &str, synonyms: &[&str], threshold: f64) -> bool {
    best_synonym_score(text, synonyms) > threshold
}
