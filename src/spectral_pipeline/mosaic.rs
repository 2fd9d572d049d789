//! Mosaic frame reading module
//!
//! This module provides format-agnostic loading of raw mosaic frames.

mod reader;
mod image_reader;
pub mod types;

pub use reader::MosaicReader;
pub use image_reader::ImageCrateReader;
pub use types::MosaicImage;
