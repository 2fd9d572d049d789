//! Hypercube assembly and region reduction module

mod reduce;
pub mod types;

pub use reduce::{SpectralSignature, region_signature};
pub use types::{Hypercube, PixelBox, Region};
