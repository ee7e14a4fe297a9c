pub mod extractor;
pub mod models;
pub mod processing;
pub mod utils;
pub mod validation;

pub use extractor::{extract, DocumentExtractor};
pub use models::{DocumentElement, DocumentType, ExtractionConfig, ExtractionResult, Rect, RecognizedKeyValue, TextObservation};
pub use utils::DocScanError;
