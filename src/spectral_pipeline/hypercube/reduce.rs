use ndarray::s;

use crate::spectral_pipeline::common::error::{Result, SpectralError};
use crate::spectral_pipeline::hypercube::types::{Hypercube, Region};

/// Per-band mean intensity over one region of one frame, paired with the
/// wavelength axis in band order. Transient: computed on demand, never
/// mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralSignature {
    pub wavelengths: Vec<u16>,
    pub values: Vec<f64>,
}

impl SpectralSignature {
    pub fn num_bands(&self) -> usize {
        self.values.len()
    }

    /// (wavelength, mean intensity) pairs in band order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, f64)> + '_ {
        self.wavelengths
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }
}

/// Reduces a block-space region of a hypercube to one mean per band.
///
/// Degenerate regions (zero width or height) and regions extending past the
/// plane bounds are rejected with `EmptyRegion` rather than producing NaNs
/// or a zero-length reduction.
pub fn region_signature(cube: &Hypercube, region: &Region) -> Result<SpectralSignature> {
    if region.is_degenerate() {
        return Err(SpectralError::EmptyRegion(format!(
            "degenerate region ({}, {})..({}, {})",
            region.x1, region.y1, region.x2, region.y2
        )));
    }
    if !region.fits_within(cube.height(), cube.width()) {
        return Err(SpectralError::EmptyRegion(format!(
            "region ({}, {})..({}, {}) exceeds plane {}x{}",
            region.x1,
            region.y1,
            region.x2,
            region.y2,
            cube.height(),
            cube.width()
        )));
    }

    let count = ((region.x2 - region.x1) * (region.y2 - region.y1)) as f64;
    let values = (0..cube.num_bands())
        .map(|i| {
            let sum = cube
                .band(i)
                .slice(s![region.y1..region.y2, region.x1..region.x2])
                .iter()
                .map(|&v| f64::from(v))
                .sum::<f64>();
            sum / count
        })
        .collect();

    Ok(SpectralSignature {
        wavelengths: cube.wavelengths().to_vec(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral_pipeline::demosaic::types::{Band, BandSet};
    use ndarray::Array2;

    /// Two 4x5 bands: one a row-major ramp, one constant.
    fn test_cube() -> Hypercube {
        let ramp = Array2::from_shape_fn((4, 5), |(y, x)| (y * 5 + x) as u8);
        let flat = Array2::from_elem((4, 5), 100);
        let set = BandSet::from_bands(vec![
            Band { wavelength: 675, plane: ramp },
            Band { wavelength: 951, plane: flat },
        ]);
        Hypercube::assemble(&set).unwrap()
    }

    #[test]
    fn reduces_region_to_per_band_means() {
        let cube = test_cube();
        let sig = region_signature(&cube, &Region::new(1, 1, 3, 3)).unwrap();

        assert_eq!(sig.wavelengths, vec![675, 951]);
        // Ramp values in the window: 6, 7, 11, 12.
        assert_eq!(sig.values[0], 9.0);
        assert_eq!(sig.values[1], 100.0);
    }

    #[test]
    fn reduction_is_deterministic() {
        let cube = test_cube();
        let region = Region::new(0, 0, 5, 4);
        let first = region_signature(&cube, &region).unwrap();
        let second = region_signature(&cube, &region).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_pixel_region_returns_raw_value() {
        let cube = test_cube();
        let sig = region_signature(&cube, &Region::new(2, 3, 3, 4)).unwrap();
        assert_eq!(sig.values[0], 17.0);
        assert_eq!(sig.values[1], 100.0);
    }

    #[test]
    fn rejects_degenerate_region() {
        let cube = test_cube();
        for region in [Region::new(2, 1, 2, 3), Region::new(1, 3, 4, 3)] {
            let result = region_signature(&cube, &region);
            assert!(matches!(result, Err(SpectralError::EmptyRegion(_))));
        }
    }

    #[test]
    fn rejects_out_of_bounds_region() {
        let cube = test_cube();
        let result = region_signature(&cube, &Region::new(0, 0, 6, 4));
        assert!(matches!(result, Err(SpectralError::EmptyRegion(_))));
    }
}
