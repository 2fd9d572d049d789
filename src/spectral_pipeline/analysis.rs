//! Analysis orchestration module
//!
//! This module contains the end-to-end pipeline from mosaic frames on disk
//! to spectral signatures and collected profiles.

mod pipeline;
#[cfg(test)]
mod tests;

pub use pipeline::SpectralPipeline;
