pub mod config;
pub mod data;
pub mod observation;
pub mod schema;

pub use config::{ExtractionConfig, MrzOrdering, TD3_LINE_LENGTH};
pub use data::*;
pub use observation::{load_observations, parse_observations, Rect, TextObservation};
pub use schema::{Alignment, DocumentElement};
