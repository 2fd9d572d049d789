use std::path::Path;

use ndarray::{Array1, Array2};
use tracing::{info, instrument, warn};

use crate::spectral_pipeline::{
    common::error::{Result, SpectralError},
    demosaic::{AnalysisConfig, Demosaicer},
    hypercube::{Hypercube, PixelBox, Region, SpectralSignature, region_signature},
    mosaic::{ImageCrateReader, MosaicReader},
    profiles::SpectralProfiles,
};

/// End-to-end pipeline: decode a mosaic frame, demosaic it, assemble the
/// hypercube, and reduce a region to a spectral signature.
///
/// Every call recomputes the hypercube from scratch; nothing is cached
/// between frames.
pub struct SpectralPipeline<R: MosaicReader> {
    reader: R,
    demosaicer: Demosaicer,
}

impl SpectralPipeline<ImageCrateReader> {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        Self::with_custom(ImageCrateReader, config)
    }
}

impl<R: MosaicReader> SpectralPipeline<R> {
    pub fn with_custom(reader: R, config: AnalysisConfig) -> Result<Self> {
        Ok(Self {
            reader,
            demosaicer: Demosaicer::new(config)?,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.demosaicer.config()
    }

    /// Wavelength axis (nm) in the band order this pipeline produces.
    pub fn wavelength_axis(&self) -> Vec<u16> {
        let sensor = &self.config().sensor;
        let period = sensor.geometry.period;
        let mut axis: Vec<u16> = (0..period)
            .flat_map(|r| (0..period).map(move |c| sensor.wavelengths.wavelength(r, c)))
            .collect();
        if self.config().sort_bands {
            axis.sort_unstable();
        }
        axis
    }

    /// Decodes and demosaics one frame into a hypercube.
    pub fn hypercube(&self, input_data: &[u8]) -> Result<Hypercube> {
        let mosaic = {
            let _span = tracing::info_span!("decode_mosaic").entered();
            self.reader.read_mosaic(input_data)?
        };

        let bands = {
            let _span = tracing::info_span!("demosaic",
                width = mosaic.width,
                height = mosaic.height
            )
            .entered();
            self.demosaicer.demosaic(&mosaic)?
        };

        let _span = tracing::info_span!("assemble_hypercube").entered();
        Hypercube::assemble(&bands)
    }

    /// Reduces a raw-pixel box of one frame to a spectral signature. The box
    /// is converted to block space by truncating division with the mosaic
    /// period before reduction.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn signature_for_box(
        &self,
        input_data: &[u8],
        pixel_box: PixelBox,
    ) -> Result<SpectralSignature> {
        let cube = self.hypercube(input_data)?;
        let region = pixel_box.to_region(self.config().sensor.geometry.period);
        region_signature(&cube, &region)
    }

    /// Reduces the whole frame to a spectral signature (one mean per band
    /// over the entire plane).
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn signature_full_frame(&self, input_data: &[u8]) -> Result<SpectralSignature> {
        let cube = self.hypercube(input_data)?;
        let region = Region::full_plane(cube.height(), cube.width());
        region_signature(&cube, &region)
    }

    pub fn signature_for_box_file<P: AsRef<Path>>(
        &self,
        path: P,
        pixel_box: PixelBox,
    ) -> Result<SpectralSignature> {
        let data = read_input(path.as_ref())?;
        self.signature_for_box(&data, pixel_box)
    }

    pub fn signature_full_frame_file<P: AsRef<Path>>(&self, path: P) -> Result<SpectralSignature> {
        let data = read_input(path.as_ref())?;
        self.signature_full_frame(&data)
    }

    /// Collects signatures for labeled positive and negative samples into a
    /// persistable profile set.
    ///
    /// Boxes that collapse to a degenerate region after block-space
    /// conversion are skipped with a warning, matching the labeling
    /// session's skip-and-continue policy. Decode and geometry failures
    /// abort the collection.
    pub fn collect_profiles<P: AsRef<Path>>(
        &self,
        positives: &[(P, PixelBox)],
        negatives: &[(P, PixelBox)],
    ) -> Result<SpectralProfiles> {
        let positives = self.collect_class("positive", positives)?;
        let negatives = self.collect_class("negative", negatives)?;
        let spectral_range = Array1::from_iter(
            self.wavelength_axis().into_iter().map(f64::from),
        );

        Ok(SpectralProfiles {
            positives,
            negatives,
            spectral_range,
        })
    }

    fn collect_class<P: AsRef<Path>>(
        &self,
        label: &str,
        samples: &[(P, PixelBox)],
    ) -> Result<Array2<f64>> {
        let num_bands = self.wavelength_axis().len();
        let period = self.config().sensor.geometry.period;

        let mut rows = Vec::new();
        for (path, pixel_box) in samples {
            let path = path.as_ref();
            if pixel_box.to_region(period).is_degenerate() {
                warn!(
                    "Skipping {} sample {}: box {:?} is empty in block space",
                    label,
                    path.display(),
                    pixel_box
                );
                continue;
            }

            let signature = self.signature_for_box_file(path, *pixel_box)?;
            rows.push(signature.values);
        }

        info!("Collected {} {} samples", rows.len(), label);

        let num_rows = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Array2::from_shape_vec((num_rows, num_bands), flat).map_err(|e| {
            SpectralError::InconsistentBandShapes(format!(
                "{} sample matrix: {}",
                label, e
            ))
        })
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| SpectralError::SourceUnreadable(format!("{}: {}", path.display(), e)))
}
