//! Category registry and one-hot feature encoding.

pub mod encoder;
pub mod registry;

pub use encoder::*;
pub use registry::*;
