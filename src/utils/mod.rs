pub mod error;

pub use error::{DocScanError, Result};
