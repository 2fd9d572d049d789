//! Sensor description and demosaicing configuration types

use ndarray::Array2;

/// Side length of the repeating mosaic unit on the supported sensor family.
pub const MOSAIC_PERIOD: usize = 5;

/// Acquisition geometry of the sensor: the window of the raw frame that
/// carries valid signal, and the mosaic repeat period.
///
/// Rows outside `[row_start, row_end)` and columns outside
/// `[col_start, col_end)` are border artifacts and are discarded before
/// demosaicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorGeometry {
    /// First valid row (inclusive)
    pub row_start: usize,
    /// One past the last valid row
    pub row_end: usize,
    /// First valid column (inclusive)
    pub col_start: usize,
    /// One past the last valid column
    pub col_end: usize,
    /// Mosaic repeat period in both axes
    pub period: usize,
}

impl SensorGeometry {
    pub fn cropped_height(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn cropped_width(&self) -> usize {
        self.col_end - self.col_start
    }
}

impl Default for SensorGeometry {
    /// Geometry of the Ximea 5x5 NIR sensor revision: valid signal occupies
    /// rows [3, 1083) and columns [0, 2045) of the raw frame, giving a
    /// 1080x2045 cropped image.
    fn default() -> Self {
        Self {
            row_start: 3,
            row_end: 1083,
            col_start: 0,
            col_end: 2045,
            period: MOSAIC_PERIOD,
        }
    }
}

/// Fixed table assigning a wavelength (nm) to each (row, col) offset within
/// the repeating mosaic unit. A hardware constant of the sensor model
/// revision, not derived data; all 25 entries are distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavelengthMap {
    table: [[u16; MOSAIC_PERIOD]; MOSAIC_PERIOD],
}

impl WavelengthMap {
    /// Band layout of the Ximea 5x5 NIR mosaic sensor.
    pub const XIMEA_NIR_5X5: WavelengthMap = WavelengthMap {
        table: [
            [886, 896, 877, 867, 951],
            [793, 806, 782, 769, 675],
            [743, 757, 730, 715, 690],
            [926, 933, 918, 910, 946],
            [846, 857, 836, 824, 941],
        ],
    };

    pub fn wavelength(&self, row_offset: usize, col_offset: usize) -> u16 {
        self.table[row_offset][col_offset]
    }

    pub fn period(&self) -> usize {
        MOSAIC_PERIOD
    }
}

impl Default for WavelengthMap {
    fn default() -> Self {
        Self::XIMEA_NIR_5X5
    }
}

/// Full sensor description: acquisition geometry plus the band layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorConfig {
    pub geometry: SensorGeometry,
    pub wavelengths: WavelengthMap,
}

/// Configuration for mosaic analysis
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Sensor the frames come from
    pub sensor: SensorConfig,
    /// Whether to order bands by ascending wavelength (true) or keep raw
    /// row-major offset-scan order (false)
    pub sort_bands: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sensor: SensorConfig::default(),
            sort_bands: true,
        }
    }
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }
}

/// Builder for AnalysisConfig
#[derive(Default)]
pub struct AnalysisConfigBuilder {
    sensor: Option<SensorConfig>,
    sort_bands: Option<bool>,
}

impl AnalysisConfigBuilder {
    pub fn sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn sort_bands(mut self, sort: bool) -> Self {
        self.sort_bands = Some(sort);
        self
    }

    pub fn build(self) -> AnalysisConfig {
        let default = AnalysisConfig::default();
        AnalysisConfig {
            sensor: self.sensor.unwrap_or(default.sensor),
            sort_bands: self.sort_bands.unwrap_or(default.sort_bands),
        }
    }
}

/// One demosaiced spectral band: the wavelength label and its plane of
/// samples, one per mosaic repeat unit.
#[derive(Debug, Clone)]
pub struct Band {
    pub wavelength: u16,
    pub plane: Array2<u8>,
}

/// An ordered collection of demosaiced bands. Iteration order is the band
/// order downstream consumers see; the demosaicer controls it via the
/// `sort_bands` flag.
#[derive(Debug, Clone)]
pub struct BandSet {
    bands: Vec<Band>,
}

impl BandSet {
    pub fn from_bands(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Band> {
        self.bands.iter()
    }

    /// Wavelength labels in iteration order.
    pub fn wavelengths(&self) -> Vec<u16> {
        self.bands.iter().map(|b| b.wavelength).collect()
    }

    /// Looks up a band plane by its wavelength label.
    pub fn plane(&self, wavelength: u16) -> Option<&Array2<u8>> {
        self.bands
            .iter()
            .find(|b| b.wavelength == wavelength)
            .map(|b| &b.plane)
    }

    pub(crate) fn sort_by_wavelength(&mut self) {
        self.bands.sort_by_key(|b| b.wavelength);
    }
}
