//! Multispectral analysis pipeline module
//!
//! This module provides a structured approach to snapshot-mosaic image
//! analysis, with separate modules for mosaic reading, demosaicing,
//! hypercube assembly, region reduction, and profile persistence.

pub mod mosaic;
pub mod demosaic;
pub mod hypercube;
pub mod profiles;
pub mod analysis;
pub mod common;

pub use common::{
    SpectralError,
    Result,
};

pub use mosaic::{
    MosaicImage,
    MosaicReader,
    ImageCrateReader,
};

pub use demosaic::{
    AnalysisConfig,
    AnalysisConfigBuilder,
    Band,
    BandSet,
    Demosaicer,
    SensorConfig,
    SensorGeometry,
    WavelengthMap,
};

pub use hypercube::{
    Hypercube,
    PixelBox,
    Region,
    SpectralSignature,
    region_signature,
};

pub use profiles::{
    SpectralProfiles,
};

pub use analysis::{
    SpectralPipeline,
};
