//! Demosaicing module for splitting snapshot-mosaic frames into band planes

mod demosaicer;
pub mod types;

pub use demosaicer::Demosaicer;
pub use types::{
    AnalysisConfig, AnalysisConfigBuilder, Band, BandSet, SensorConfig, SensorGeometry,
    WavelengthMap,
};
