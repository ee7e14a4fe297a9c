use super::mrz::{MrzDetector, MrzParser};
use super::spatial::SpatialPairer;
use crate::models::{DocumentType, ExtractionConfig, ParsedMrz, RecognizedKeyValue, TextObservation};
use log::{debug, info};

/// Terminal state of one classification pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    PassportMrz(ParsedMrz),
    IdCard(Vec<RecognizedKeyValue>),
    Unknown,
}

impl Classification {
    pub fn document_type(&self) -> DocumentType {
        match self {
            Classification::PassportMrz(_) => DocumentType::PassportMrz,
            Classification::IdCard(_) => DocumentType::IdCard,
            Classification::Unknown => DocumentType::Unknown,
        }
    }
}

/// Decides between an MRZ passport, a labelled ID card and an unknown
/// document. The MRZ path is tried first and falls through to label pairing
/// within the same call.
pub struct DocumentClassifier<'a> {
    config: &'a ExtractionConfig,
}

impl<'a> DocumentClassifier<'a> {
    pub fn new(config: &'a ExtractionConfig) -> Self {
        DocumentClassifier { config }
    }

    pub fn classify(&self, observations: &[TextObservation]) -> Classification {
        if let Some(parsed) = self.try_mrz(observations) {
            info!("Classified as passport via MRZ ({} {})", parsed.document_type, parsed.country_code);
            return Classification::PassportMrz(parsed);
        }

        let pairs = SpatialPairer::new(self.config).extract_key_value_pairs(observations);
        if pairs.iter().any(RecognizedKeyValue::has_value) {
            info!("Classified as ID card with {} key-value pairs", pairs.len());
            return Classification::IdCard(pairs);
        }

        info!("Unable to classify {} observations", observations.len());
        Classification::Unknown
    }

    fn try_mrz(&self, observations: &[TextObservation]) -> Option<ParsedMrz> {
        let block = MrzDetector::candidate_block(observations, self.config)?;
        let parsed = MrzParser::parse(&block);
        if parsed.is_none() {
            debug!("MRZ block of {} lines did not decode as TD3, trying labels", block.len());
        }
        parsed
    }
}
