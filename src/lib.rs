pub mod logger;
pub mod spectral_pipeline;
