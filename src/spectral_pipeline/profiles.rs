//! Persistence of collected spectral profiles
//!
//! The aggregate output of a labeling session: one intensity matrix per
//! sample class plus the wavelength axis, persisted as an NPZ archive with
//! named members so downstream plotting can reload them unchanged.

use std::fs::File;
use std::path::Path;

use ndarray::{Array1, Array2};
use ndarray_npy::{NpzReader, NpzWriter};
use tracing::{debug, info};

use crate::spectral_pipeline::common::error::{Result, SpectralError};

/// Collected spectral signatures for a positive/negative sample pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralProfiles {
    /// One row per positive sample, one column per band
    pub positives: Array2<f64>,
    /// One row per negative sample, one column per band
    pub negatives: Array2<f64>,
    /// Wavelength axis (nm) in band order
    pub spectral_range: Array1<f64>,
}

impl SpectralProfiles {
    /// Writes the three arrays to an NPZ archive. Reloading with [`load`]
    /// reproduces them element for element.
    ///
    /// [`load`]: SpectralProfiles::load
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Saving spectral profiles to {}", path.display());

        let file = File::create(path)?;
        let mut npz = NpzWriter::new(file);
        npz.add_array("positives", &self.positives)
            .map_err(|e| SpectralError::Archive(e.to_string()))?;
        npz.add_array("negatives", &self.negatives)
            .map_err(|e| SpectralError::Archive(e.to_string()))?;
        npz.add_array("spectral_range", &self.spectral_range)
            .map_err(|e| SpectralError::Archive(e.to_string()))?;
        npz.finish()
            .map_err(|e| SpectralError::Archive(e.to_string()))?;

        info!(
            "Saved {} positive and {} negative profiles to {}",
            self.positives.nrows(),
            self.negatives.nrows(),
            path.display()
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading spectral profiles from {}", path.display());

        let file = File::open(path)?;
        let mut npz =
            NpzReader::new(file).map_err(|e| SpectralError::Archive(e.to_string()))?;
        let positives: Array2<f64> = npz
            .by_name("positives.npy")
            .map_err(|e| SpectralError::Archive(e.to_string()))?;
        let negatives: Array2<f64> = npz
            .by_name("negatives.npy")
            .map_err(|e| SpectralError::Archive(e.to_string()))?;
        let spectral_range: Array1<f64> = npz
            .by_name("spectral_range.npy")
            .map_err(|e| SpectralError::Archive(e.to_string()))?;

        Ok(Self {
            positives,
            negatives,
            spectral_range,
        })
    }
}
