use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpectralError {
    #[error("Failed to decode source image: {0}")]
    SourceUnreadable(String),

    #[error("Invalid mosaic geometry: {0}")]
    InvalidGeometry(String),

    #[error("Band plane shape mismatch at offset ({0}, {1}): expected {2}x{3}, got {4}x{5}")]
    BandShapeMismatch(usize, usize, usize, usize, usize, usize),

    #[error("Inconsistent band shapes: {0}")]
    InconsistentBandShapes(String),

    #[error("Empty or out-of-bounds region: {0}")]
    EmptyRegion(String),

    #[error("Failed to read or write profile archive: {0}")]
    Archive(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SpectralError>;
