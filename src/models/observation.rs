use crate::utils::{DocScanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Axis-aligned box in normalized unit-square coordinates.
/// `(x, y)` is the bottom-left corner, so a smaller `y` is lower on the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Euclidean distance between the two box centers.
    pub fn distance_to(&self, other: &Rect) -> f64 {
        let dx = self.mid_x() - other.mid_x();
        let dy = self.mid_y() - other.mid_y();
        (dx * dx + dy * dy).sqrt()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    fn is_well_formed(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// One recognized text fragment as handed over by the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextObservation {
    pub text: String,
    pub bounding_box: Rect,
    #[serde(default = "full_confidence")]
    pub confidence: f32,
}

fn full_confidence() -> f32 {
    1.0
}

impl TextObservation {
    /// Builds an observation from raw OCR text, trimming and upper-casing it.
    pub fn new(text: &str, bounding_box: Rect, confidence: f32) -> Self {
        Self::raw(text.trim().to_uppercase(), bounding_box, confidence)
    }

    /// Builds an observation from text that is already normalized.
    pub fn raw(text: impl Into<String>, bounding_box: Rect, confidence: f32) -> Self {
        TextObservation {
            text: text.into(),
            bounding_box,
            confidence: clamp_confidence(confidence),
        }
    }

    /// Returns a copy with trimmed, upper-cased text and a clamped confidence.
    pub fn normalized(&self) -> Self {
        Self::new(&self.text, self.bounding_box, self.confidence)
    }
}

fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

/// Reads an OCR dump (a JSON array of observations) and normalizes every entry.
pub fn load_observations<P: AsRef<Path>>(path: P) -> Result<Vec<TextObservation>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| DocScanError::io(path, e))?;
    parse_observations(&contents)
}

/// Parses the JSON form of an OCR dump.
pub fn parse_observations(json: &str) -> Result<Vec<TextObservation>> {
    let observations: Vec<TextObservation> = serde_json::from_str(json)?;

    observations
        .iter()
        .enumerate()
        .map(|(index, obs)| {
            if !obs.bounding_box.is_well_formed() {
                return Err(DocScanError::InvalidObservation(format!(
                    "observation {} ({:?}) has a malformed bounding box",
                    index, obs.text
                )));
            }
            Ok(obs.normalized())
        })
        .collect()
}
