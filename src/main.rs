use ximea_spectral_rs::logger;
use ximea_spectral_rs::spectral_pipeline::{AnalysisConfig, SpectralPipeline};

use anyhow::Result;
use tracing::{error, info};

fn main() -> Result<()> {
    logger::init();

    info!("Starting ximea_spectral...");

    let config = AnalysisConfig::builder()
        .sort_bands(true)
        .build();
    let pipeline = SpectralPipeline::new(config)?;

    info!("Spectral analysis pipeline initialized");
    info!(
        "Band order: {}",
        if pipeline.config().sort_bands {
            "ascending wavelength"
        } else {
            "offset scan"
        }
    );

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        info!("Usage: ximea_spectral_rs <mosaic-image>...");
        return Ok(());
    }

    for path in &paths {
        match pipeline.signature_full_frame_file(path) {
            Ok(signature) => {
                info!("Full-frame signature for {}:", path);
                for (wavelength, mean) in signature.iter() {
                    info!("  {} nm: {:.2}", wavelength, mean);
                }
            }
            Err(e) => error!("Analysis failed for {}: {}", path, e),
        }
    }

    Ok(())
}
