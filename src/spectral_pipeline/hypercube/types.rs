//! Hypercube and region types

use ndarray::{Array3, ArrayView2, Axis};
use tracing::debug;

use crate::spectral_pipeline::common::error::{Result, SpectralError};
use crate::spectral_pipeline::demosaic::types::BandSet;

/// A band-major stack of demosaiced planes: shape
/// `(num_bands, height, width)`, with the wavelength axis carried alongside
/// in the same order. Owns its storage; nothing aliases back to the source
/// frame or band set.
#[derive(Debug, Clone)]
pub struct Hypercube {
    wavelengths: Vec<u16>,
    data: Array3<u8>,
}

impl Hypercube {
    /// Stacks a band set into a single 3D array. Band axis order is exactly
    /// the iteration order of the input; callers relying on ascending
    /// wavelengths must demosaic with sorting enabled.
    ///
    /// All-or-nothing: an empty set or heterogeneous plane shapes abort
    /// assembly with `InconsistentBandShapes`.
    pub fn assemble(bands: &BandSet) -> Result<Self> {
        let first = bands.iter().next().ok_or_else(|| {
            SpectralError::InconsistentBandShapes("band set is empty".to_string())
        })?;

        let (height, width) = first.plane.dim();
        let num_bands = bands.len();

        for band in bands.iter() {
            if band.plane.dim() != (height, width) {
                return Err(SpectralError::InconsistentBandShapes(format!(
                    "band {} nm has shape {}x{}, expected {}x{}",
                    band.wavelength,
                    band.plane.dim().0,
                    band.plane.dim().1,
                    height,
                    width
                )));
            }
        }

        debug!("Assembling hypercube: {} bands of {}x{}", num_bands, height, width);

        let mut data = Array3::<u8>::zeros((num_bands, height, width));
        let mut wavelengths = Vec::with_capacity(num_bands);
        for (mut slot, band) in data.axis_iter_mut(Axis(0)).zip(bands.iter()) {
            slot.assign(&band.plane);
            wavelengths.push(band.wavelength);
        }

        Ok(Self { wavelengths, data })
    }

    pub fn num_bands(&self) -> usize {
        self.data.dim().0
    }

    pub fn height(&self) -> usize {
        self.data.dim().1
    }

    pub fn width(&self) -> usize {
        self.data.dim().2
    }

    /// Wavelength labels along the band axis, in band order.
    pub fn wavelengths(&self) -> &[u16] {
        &self.wavelengths
    }

    pub fn band(&self, index: usize) -> ArrayView2<'_, u8> {
        self.data.index_axis(Axis(0), index)
    }
}

/// A rectangular box in raw pixel coordinates, as delivered by a region
/// selection collaborator. Corners are inclusive-exclusive: `[x1, x2)` by
/// `[y1, y2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl PixelBox {
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Converts to mosaic-block coordinates by truncating division with the
    /// mosaic period. Truncation discards sub-block precision and can
    /// collapse a small box to a degenerate region; callers are expected to
    /// skip such boxes.
    pub fn to_region(&self, period: usize) -> Region {
        Region {
            x1: self.x1 / period,
            y1: self.y1 / period,
            x2: self.x2 / period,
            y2: self.y2 / period,
        }
    }
}

/// A rectangular sub-window of a hypercube in mosaic-block coordinates
/// (raw pixel coordinates already divided by the mosaic period).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Region {
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// The whole extent of a plane with the given dimensions.
    pub fn full_plane(height: usize, width: usize) -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: width,
            y2: height,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    pub fn fits_within(&self, height: usize, width: usize) -> bool {
        self.x2 <= width && self.y2 <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral_pipeline::demosaic::types::Band;
    use ndarray::Array2;

    fn band(wavelength: u16, height: usize, width: usize, fill: u8) -> Band {
        Band {
            wavelength,
            plane: Array2::from_elem((height, width), fill),
        }
    }

    #[test]
    fn assembles_in_iteration_order() {
        let set = BandSet::from_bands(vec![
            band(700, 2, 3, 10),
            band(650, 2, 3, 20),
            band(900, 2, 3, 30),
        ]);
        let cube = Hypercube::assemble(&set).unwrap();

        assert_eq!(cube.num_bands(), 3);
        assert_eq!(cube.height(), 2);
        assert_eq!(cube.width(), 3);
        assert_eq!(cube.wavelengths(), &[700, 650, 900]);
        assert_eq!(cube.band(0)[(0, 0)], 10);
        assert_eq!(cube.band(1)[(1, 2)], 20);
        assert_eq!(cube.band(2)[(0, 1)], 30);
    }

    #[test]
    fn rejects_empty_band_set() {
        let set = BandSet::from_bands(vec![]);
        assert!(matches!(
            Hypercube::assemble(&set),
            Err(SpectralError::InconsistentBandShapes(_))
        ));
    }

    #[test]
    fn rejects_heterogeneous_plane_shapes() {
        let set = BandSet::from_bands(vec![band(700, 2, 3, 0), band(650, 3, 3, 0)]);
        assert!(matches!(
            Hypercube::assemble(&set),
            Err(SpectralError::InconsistentBandShapes(_))
        ));
    }

    #[test]
    fn pixel_box_truncates_toward_zero() {
        let region = PixelBox::new(7, 9, 23, 14).to_region(5);
        assert_eq!(region, Region::new(1, 1, 4, 2));
    }

    #[test]
    fn small_pixel_box_collapses_to_degenerate_region() {
        // Both corners land in the same mosaic block after truncation.
        let region = PixelBox::new(6, 6, 9, 9).to_region(5);
        assert!(region.is_degenerate());
    }
}
