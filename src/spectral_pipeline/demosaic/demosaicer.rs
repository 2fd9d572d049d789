use ndarray::{ArrayView2, s};
use tracing::debug;

use crate::spectral_pipeline::common::error::{Result, SpectralError};
use crate::spectral_pipeline::demosaic::types::{AnalysisConfig, Band, BandSet};
use crate::spectral_pipeline::mosaic::types::MosaicImage;

/// Splits a raw mosaic frame into wavelength-labeled band planes.
///
/// The sensor repeats a `period x period` unit of distinct physical filters
/// across the frame. Demosaicing crops the frame to the valid acquisition
/// window, then extracts the strided subsampling for each of the
/// `period * period` offsets and labels it with the wavelength the sensor's
/// band layout assigns to that offset.
pub struct Demosaicer {
    config: AnalysisConfig,
}

impl Demosaicer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let geometry = &config.sensor.geometry;
        if geometry.period == 0 {
            return Err(SpectralError::InvalidGeometry(
                "mosaic period must be nonzero".to_string(),
            ));
        }
        if geometry.period != config.sensor.wavelengths.period() {
            return Err(SpectralError::InvalidGeometry(format!(
                "geometry period {} does not match wavelength map period {}",
                geometry.period,
                config.sensor.wavelengths.period()
            )));
        }
        if geometry.row_start >= geometry.row_end || geometry.col_start >= geometry.col_end {
            return Err(SpectralError::InvalidGeometry(format!(
                "crop window [{}, {})x[{}, {}) is inverted or empty",
                geometry.row_start, geometry.row_end, geometry.col_start, geometry.col_end
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Pure transform: one mosaic frame in, one `BandSet` out. Band order is
    /// ascending wavelength when `sort_bands` is set, raw row-major
    /// offset-scan order otherwise.
    pub fn demosaic(&self, image: &MosaicImage) -> Result<BandSet> {
        let geometry = &self.config.sensor.geometry;
        let period = geometry.period;

        if geometry.row_end > image.height || geometry.col_end > image.width {
            return Err(SpectralError::InvalidGeometry(format!(
                "crop window [{}, {})x[{}, {}) exceeds frame {}x{}",
                geometry.row_start,
                geometry.row_end,
                geometry.col_start,
                geometry.col_end,
                image.height,
                image.width
            )));
        }

        let frame = ArrayView2::from_shape((image.height, image.width), &image.data)
            .map_err(|e| SpectralError::InvalidGeometry(e.to_string()))?;

        // Discard the sensor border before anything else; only the window
        // carries valid signal.
        let cropped = frame.slice(s![
            geometry.row_start..geometry.row_end,
            geometry.col_start..geometry.col_end
        ]);

        let cropped_height = geometry.cropped_height();
        let cropped_width = geometry.cropped_width();
        if cropped_height % period != 0 || cropped_width % period != 0 {
            return Err(SpectralError::InvalidGeometry(format!(
                "cropped dimensions {}x{} are not divisible by mosaic period {}",
                cropped_height, cropped_width, period
            )));
        }

        let block_rows = cropped_height / period;
        let block_cols = cropped_width / period;

        debug!(
            "Demosaicing {}x{} frame into {} bands of {}x{}",
            image.height,
            image.width,
            period * period,
            block_rows,
            block_cols
        );

        let stride = period as isize;
        let mut bands = Vec::with_capacity(period * period);
        for row_offset in 0..period {
            for col_offset in 0..period {
                let plane = cropped
                    .slice(s![row_offset..; stride, col_offset..; stride])
                    .to_owned();

                // Unreachable given the divisibility check above, but a wrong
                // shape here means silent corruption downstream.
                let (rows, cols) = plane.dim();
                if (rows, cols) != (block_rows, block_cols) {
                    return Err(SpectralError::BandShapeMismatch(
                        row_offset, col_offset, block_rows, block_cols, rows, cols,
                    ));
                }

                bands.push(Band {
                    wavelength: self
                        .config
                        .sensor
                        .wavelengths
                        .wavelength(row_offset, col_offset),
                    plane,
                });
            }
        }

        let mut set = BandSet::from_bands(bands);
        if self.config.sort_bands {
            set.sort_by_wavelength();
        }
        Ok(set)
    }
}
