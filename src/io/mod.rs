//! Input helpers.
//!
//! - CSV ingest of attribute records for batch prediction (`batch`)

pub mod batch;

pub use batch::*;
