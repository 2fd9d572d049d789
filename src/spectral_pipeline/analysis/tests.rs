#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{GrayImage, Luma};

    use crate::spectral_pipeline::analysis::pipeline::SpectralPipeline;
    use crate::spectral_pipeline::common::error::{Result, SpectralError};
    use crate::spectral_pipeline::demosaic::types::{
        AnalysisConfig, SensorConfig, SensorGeometry,
    };
    use crate::spectral_pipeline::hypercube::types::PixelBox;
    use crate::spectral_pipeline::mosaic::{MosaicImage, MosaicReader};

    struct MockReader {
        should_fail: bool,
        mock_data: Option<MosaicImage>,
    }

    impl MosaicReader for MockReader {
        fn read_mosaic(&self, _data: &[u8]) -> Result<MosaicImage> {
            if self.should_fail {
                return Err(SpectralError::SourceUnreadable(
                    "Mock decode error".to_string(),
                ));
            }
            Ok(self
                .mock_data
                .clone()
                .unwrap_or_else(|| MosaicImage::new(10, 10, mock_frame_data())))
        }
    }

    /// 10x10 frame where pixel (row, col) = (row % 5) * 5 + col % 5, so the
    /// band at offset (r, c) is uniform with value r * 5 + c.
    fn mock_frame_data() -> Vec<u8> {
        let mut data = vec![0u8; 100];
        for row in 0..10 {
            for col in 0..10 {
                data[row * 10 + col] = ((row % 5) * 5 + col % 5) as u8;
            }
        }
        data
    }

    /// Sensor config with no border crop and a 10x10 valid window, so the
    /// mock frame demosaics into 25 bands of 2x2.
    fn small_sensor() -> SensorConfig {
        SensorConfig {
            geometry: SensorGeometry {
                row_start: 0,
                row_end: 10,
                col_start: 0,
                col_end: 10,
                period: 5,
            },
            ..Default::default()
        }
    }

    fn small_config(sort_bands: bool) -> AnalysisConfig {
        AnalysisConfig::builder()
            .sensor(small_sensor())
            .sort_bands(sort_bands)
            .build()
    }

    /// Expected (wavelength, mean) pairs for the mock frame, sorted by
    /// wavelength.
    fn expected_sorted_signature() -> Vec<(u16, f64)> {
        let map = SensorConfig::default().wavelengths;
        let mut pairs: Vec<(u16, f64)> = (0..5)
            .flat_map(|r| (0..5).map(move |c| (map.wavelength(r, c), (r * 5 + c) as f64)))
            .collect();
        pairs.sort_by_key(|&(wavelength, _)| wavelength);
        pairs
    }

    #[test]
    fn test_config_builder() {
        let config = AnalysisConfig::builder()
            .sensor(small_sensor())
            .sort_bands(false)
            .build();

        assert!(!config.sort_bands);
        assert_eq!(config.sensor.geometry.row_end, 10);
        assert_eq!(config.sensor.geometry.period, 5);
    }

    #[test]
    fn test_full_frame_signature() {
        let reader = MockReader {
            should_fail: false,
            mock_data: None,
        };
        let pipeline = SpectralPipeline::with_custom(reader, small_config(true)).unwrap();

        let signature = pipeline.signature_full_frame(b"fake frame data").unwrap();

        assert_eq!(signature.num_bands(), 25);
        let actual: Vec<(u16, f64)> = signature.iter().collect();
        assert_eq!(actual, expected_sorted_signature());
    }

    #[test]
    fn test_reader_failure() {
        let reader = MockReader {
            should_fail: true,
            mock_data: None,
        };
        let pipeline = SpectralPipeline::with_custom(reader, small_config(true)).unwrap();

        let result = pipeline.signature_full_frame(b"fake frame data");
        assert!(matches!(result, Err(SpectralError::SourceUnreadable(_))));
    }

    #[test]
    fn test_geometry_failure() {
        let reader = MockReader {
            should_fail: false,
            mock_data: Some(MosaicImage::new(7, 7, vec![0u8; 49])),
        };
        let pipeline = SpectralPipeline::with_custom(reader, small_config(true)).unwrap();

        let result = pipeline.signature_full_frame(b"fake frame data");
        assert!(matches!(result, Err(SpectralError::InvalidGeometry(_))));
    }

    #[test]
    fn test_box_signature_uses_block_space() {
        let reader = MockReader {
            should_fail: false,
            mock_data: None,
        };
        let pipeline = SpectralPipeline::with_custom(reader, small_config(true)).unwrap();

        // The whole 10x10 frame in pixel space is 2x2 in block space; every
        // band is uniform so the means match the full-frame signature.
        let signature = pipeline
            .signature_for_box(b"fake frame data", PixelBox::new(0, 0, 10, 10))
            .unwrap();
        let actual: Vec<(u16, f64)> = signature.iter().collect();
        assert_eq!(actual, expected_sorted_signature());
    }

    #[test]
    fn test_degenerate_box_is_rejected() {
        let reader = MockReader {
            should_fail: false,
            mock_data: None,
        };
        let pipeline = SpectralPipeline::with_custom(reader, small_config(true)).unwrap();

        // Both corners truncate into the same mosaic block.
        let result = pipeline.signature_for_box(b"fake frame data", PixelBox::new(2, 2, 4, 4));
        assert!(matches!(result, Err(SpectralError::EmptyRegion(_))));
    }

    #[test]
    fn test_wavelength_axis_orders() {
        let reader = MockReader {
            should_fail: false,
            mock_data: None,
        };
        let sorted = SpectralPipeline::with_custom(reader, small_config(true)).unwrap();
        let axis = sorted.wavelength_axis();
        assert!(axis.windows(2).all(|w| w[0] < w[1]));

        let reader = MockReader {
            should_fail: false,
            mock_data: None,
        };
        let raw = SpectralPipeline::with_custom(reader, small_config(false)).unwrap();
        assert_eq!(&raw.wavelength_axis()[..5], &[886, 896, 877, 867, 951]);
    }

    fn write_mock_frame_png(path: &std::path::Path) {
        let data = mock_frame_data();
        let img = GrayImage::from_fn(10, 10, |x, y| Luma([data[(y * 10 + x) as usize]]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        std::fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_collect_profiles_skips_degenerate_boxes() {
        let dir = tempfile::tempdir().unwrap();
        let frame_a = dir.path().join("a.png");
        let frame_b = dir.path().join("b.png");
        write_mock_frame_png(&frame_a);
        write_mock_frame_png(&frame_b);

        let pipeline = SpectralPipeline::new(small_config(true)).unwrap();

        let full = PixelBox::new(0, 0, 10, 10);
        let collapsing = PixelBox::new(2, 2, 4, 4);
        let positives = vec![(frame_a.clone(), full), (frame_b.clone(), collapsing)];
        let negatives = vec![(frame_b, full)];

        let profiles = pipeline.collect_profiles(&positives, &negatives).unwrap();

        // The degenerate positive box is skipped, not an error.
        assert_eq!(profiles.positives.dim(), (1, 25));
        assert_eq!(profiles.negatives.dim(), (1, 25));

        let expected: Vec<f64> = expected_sorted_signature()
            .into_iter()
            .map(|(_, v)| v)
            .collect();
        assert_eq!(profiles.positives.row(0).to_vec(), expected);
        assert_eq!(profiles.negatives.row(0).to_vec(), expected);

        let axis: Vec<f64> = profiles.spectral_range.to_vec();
        assert_eq!(axis[0], 675.0);
        assert_eq!(axis[24], 951.0);
    }

    #[test]
    fn test_collect_profiles_propagates_unreadable_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");

        let pipeline = SpectralPipeline::new(small_config(true)).unwrap();
        let samples = vec![(missing, PixelBox::new(0, 0, 10, 10))];

        let result = pipeline.collect_profiles(&samples, &[]);
        assert!(matches!(result, Err(SpectralError::SourceUnreadable(_))));
    }
}
