use crate::spectral_pipeline::common::error::Result;
use crate::spectral_pipeline::mosaic::types::MosaicImage;

pub trait MosaicReader {
    fn read_mosaic(&self, data: &[u8]) -> Result<MosaicImage>;
}
