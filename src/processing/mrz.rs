use crate::models::{ExtractionConfig, MrzLine, MrzOrdering, ParsedMrz, TextObservation, TD3_LINE_LENGTH};
use crate::validation::MrzValidator;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    static ref MRZ_CHARSET: Regex = Regex::new(r"^[A-Z0-9]+$").unwrap();
}

/// Finds machine-readable-zone lines among OCR observations.
pub struct MrzDetector;

impl MrzDetector {
    /// Keeps fragments shaped like MRZ lines, in reading order.
    pub fn detect_mrz_lines(observations: &[TextObservation], config: &ExtractionConfig) -> Vec<MrzLine> {
        let mut lines: Vec<MrzLine> = observations
            .iter()
            .filter(|obs| Self::is_mrz_shaped(&obs.text, config))
            .map(MrzLine::from)
            .collect();

        match config.mrz_ordering {
            MrzOrdering::DescendingY => {
                lines.sort_by(|a, b| b.bounding_box.min_y().total_cmp(&a.bounding_box.min_y()))
            }
            MrzOrdering::AscendingY => {
                lines.sort_by(|a, b| a.bounding_box.min_y().total_cmp(&b.bounding_box.min_y()))
            }
        }

        lines
    }

    fn is_mrz_shaped(text: &str, config: &ExtractionConfig) -> bool {
        let length = text.chars().count();
        if length < config.mrz_min_line_length || length > config.mrz_max_line_length {
            return false;
        }

        // Filler characters are allowed anywhere; the rest must be A-Z / 0-9
        let without_filler = text.replace('<', "");
        MRZ_CHARSET.is_match(&without_filler)
    }

    /// Best-effort recovery of two MRZ lines that OCR returned as one fragment.
    /// The fragment is cut at its middle character; nothing guarantees the
    /// cut falls on the real line break.
    pub fn split_merged_line(line: &MrzLine) -> [MrzLine; 2] {
        let chars: Vec<char> = line.text.chars().collect();
        let mid = chars.len() / 2;
        [
            MrzLine {
                text: chars[..mid].iter().collect(),
                bounding_box: line.bounding_box,
            },
            MrzLine {
                text: chars[mid..].iter().collect(),
                bounding_box: line.bounding_box,
            },
        ]
    }

    /// Runs detection, the merged-line fallback and the block structure check.
    /// Returns the line texts ready for `MrzParser::parse`.
    pub fn candidate_block(observations: &[TextObservation], config: &ExtractionConfig) -> Option<Vec<String>> {
        let mut lines = Self::detect_mrz_lines(observations, config);
        debug!("Found {} MRZ-shaped lines", lines.len());

        if lines.len() == 1 && config.split_merged_mrz {
            debug!("Splitting single MRZ fragment of {} chars", lines[0].text.chars().count());
            lines = Self::split_merged_line(&lines[0]).to_vec();
        }

        if !MrzValidator::is_likely_mrz_block(&lines, config) {
            return None;
        }

        Some(lines.into_iter().map(|l| l.text).collect())
    }
}

/// Decodes TD3 (2 x 44) machine-readable zones by fixed character offsets.
/// Check digits are not verified.
pub struct MrzParser;

impl MrzParser {
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Option<ParsedMrz> {
        if lines.len() != 2 {
            return None;
        }

        let line1: Vec<char> = lines[0].as_ref().chars().collect();
        let line2: Vec<char> = lines[1].as_ref().chars().collect();
        if line1.len() != TD3_LINE_LENGTH || line2.len() != TD3_LINE_LENGTH {
            debug!("TD3 parse rejected: line lengths {} and {}", line1.len(), line2.len());
            return None;
        }

        let slice = |line: &[char], start: usize, end: usize| -> String { line[start..end].iter().collect() };

        let name_field = slice(&line1, 5, TD3_LINE_LENGTH);
        let (surname, given_names) = match name_field.split_once("<<") {
            Some((surname, given)) => (Self::clean_name(surname), Self::clean_name(given)),
            None => (Self::clean_name(&name_field), String::new()),
        };

        Some(ParsedMrz {
            document_type: Self::strip_filler(&slice(&line1, 0, 2)),
            country_code: slice(&line1, 2, 5),
            surname,
            given_names,
            passport_number: Self::strip_filler(&slice(&line2, 0, 9)),
            nationality: slice(&line2, 10, 13),
            date_of_birth: slice(&line2, 13, 19),
            sex: slice(&line2, 20, 21),
            expiration_date: slice(&line2, 21, 27),
            raw_lines: vec![line1.iter().collect(), line2.iter().collect()],
        })
    }

    fn strip_filler(field: &str) -> String {
        field.replace('<', "")
    }

    /// Turns `<` separators into single spaces.
    fn clean_name(name: &str) -> String {
        name.replace('<', " ").split_whitespace().collect::<Vec<&str>>().join(" ")
    }
}
