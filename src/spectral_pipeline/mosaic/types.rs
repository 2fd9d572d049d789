//! Mosaic frame data types

/// A single raw frame from the snapshot-mosaic sensor.
///
/// The sensor delivers RAW8: one 8-bit intensity sample per pixel, with the
/// repeating filter pattern laid out across the grid. No spectral meaning is
/// attached at this stage.
#[derive(Debug, Clone)]
pub struct MosaicImage {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Row-major pixel data, `width * height` samples
    pub data: Vec<u8>,
}

impl MosaicImage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self { width, height, data }
    }
}
