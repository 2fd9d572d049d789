//! Mosaic frame reader implementation using the image library.
//!
//! The capture side stores frames as ordinary grayscale rasters (PNG, JPEG,
//! or TIFF), so any format the image crate decodes is accepted. Color input
//! is collapsed to luma, matching the grayscale read the capture chain uses.

use tracing::debug;

use crate::spectral_pipeline::common::error::{Result, SpectralError};
use crate::spectral_pipeline::mosaic::reader::MosaicReader;
use crate::spectral_pipeline::mosaic::types::MosaicImage;

/// Mosaic frame reader backed by the image crate.
pub struct ImageCrateReader;

impl MosaicReader for ImageCrateReader {
    fn read_mosaic(&self, data: &[u8]) -> Result<MosaicImage> {
        debug!("Decoding mosaic frame, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| SpectralError::SourceUnreadable(e.to_string()))?;

        // RAW8 frames decode as 8-bit luma already; anything else is
        // converted down to a single channel.
        let gray = decoded.to_luma8();
        let width = gray.width() as usize;
        let height = gray.height() as usize;

        debug!("Decoded mosaic frame: {}x{}", width, height);

        Ok(MosaicImage::new(width, height, gray.into_raw()))
    }
}
