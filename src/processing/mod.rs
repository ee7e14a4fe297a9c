pub mod batch;
pub mod classifier;
pub mod fuzzy;
pub mod mrz;
pub mod spatial;

pub use batch::{batch_extract, BatchEntry};
pub use classifier::{Classification, DocumentClassifier};
pub use mrz::{MrzDetector, MrzParser};
pub use spatial::SpatialPairer;
