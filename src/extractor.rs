use crate::models::*;
use crate::processing::{Classification, DocumentClassifier};
use crate::utils::Result;
use log::debug;

/// Public entry point of the engine: OCR observations in, document type and
/// fields out. Holds only immutable configuration, so one extractor can be
/// shared between threads.
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor {
    config: ExtractionConfig,
}

impl DocumentExtractor {
    pub fn new() -> Self {
        DocumentExtractor::default()
    }

    /// Fails with `InvalidConfig` when the tunables cannot work together.
    pub fn with_config(config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(DocumentExtractor { config })
    }

    // Main extraction function that orchestrates classification and decoding
    pub fn extract(&self, observations: &[TextObservation]) -> ExtractionResult {
        debug!("Extracting fields from {} observations", observations.len());

        match DocumentClassifier::new(&self.config).classify(observations) {
            Classification::PassportMrz(parsed) => ExtractionResult {
                document_type: DocumentType::PassportMrz,
                fields: parsed.to_key_values(),
                mrz: Some(parsed),
            },
            Classification::IdCard(fields) => ExtractionResult {
                document_type: DocumentType::IdCard,
                fields,
                mrz: None,
            },
            Classification::Unknown => ExtractionResult::unknown(),
        }
    }

    /// Extracts from the observations whose boxes overlap `region`, typically
    /// the document rectangle found by an upstream detector.
    pub fn extract_in_region(&self, observations: &[TextObservation], region: &Rect) -> ExtractionResult {
        let inside: Vec<TextObservation> = observations
            .iter()
            .filter(|obs| region.intersects(&obs.bounding_box))
            .cloned()
            .collect();

        debug!("{} of {} observations inside region of interest", inside.len(), observations.len());
        self.extract(&inside)
    }
}

/// Extracts with the default configuration.
pub fn extract(observations: &[TextObservation]) -> ExtractionResult {
    DocumentExtractor::new().extract(observations)
}
