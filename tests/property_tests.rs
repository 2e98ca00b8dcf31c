mod common;

use common::{corrupt_source, png_source};
use img_batcher::batch::{output_name, run_batch, NullProgress};
use img_batcher::model::Dimensions;
use img_batcher::sink::{BufferSink, Delivery};
use img_batcher::transform::{scaled_dimensions, TargetFormat, TransformSpec};
use proptest::prelude::*;

proptest! {
    #[test]
    fn spec_accepts_quality_in_range(quality in 1u8..=100u8) {
        let spec = TransformSpec::convert_only(TargetFormat::WebP, Some(quality));
        prop_assert!(spec.is_ok());
    }

    #[test]
    fn spec_rejects_quality_out_of_range(quality in 0u8..=255u8) {
        let result = TransformSpec::convert_only(TargetFormat::WebP, Some(quality));
        if quality == 0 || quality > 100 {
            prop_assert!(result.is_err());
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn spec_rejects_scale_out_of_range(scale in 0u8..=255u8) {
        let result = TransformSpec::resize(scale, TargetFormat::WebP, None);
        if scale == 0 || scale > 100 {
            prop_assert!(result.is_err());
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn output_name_webp_strips_extension(
        stem in "[a-zA-Z0-9_-]{1,12}",
        ext in prop::sample::select(&["jpg", "jpeg", "png", "webp", "gif"])
    ) {
        let original = format!("{}.{}", stem, ext);
        prop_assert_eq!(
            output_name(&original, TargetFormat::WebP),
            format!("{}.webp", stem)
        );
    }

    #[test]
    fn output_name_original_keeps_extension(
        stem in "[a-zA-Z0-9_-]{1,12}",
        ext in prop::sample::select(&["jpg", "jpeg", "png", "webp", "gif"])
    ) {
        let original = format!("{}.{}", stem, ext);
        prop_assert_eq!(output_name(&original, TargetFormat::Original), original);
    }

    #[test]
    fn scaled_dimensions_round_each_axis(
        width in 1u32..=4000u32,
        height in 1u32..=4000u32,
        scale in 1u8..=100u8
    ) {
        let scaled = scaled_dimensions(Dimensions::new(width, height), scale);
        let expected_w = width as f64 * scale as f64 / 100.0;
        let expected_h = height as f64 * scale as f64 / 100.0;
        prop_assert!((scaled.width as f64 - expected_w).abs() <= 0.5);
        prop_assert!((scaled.height as f64 - expected_h).abs() <= 0.5);
    }

    #[test]
    fn scaled_dimensions_full_scale_is_identity(
        width in 1u32..=4000u32,
        height in 1u32..=4000u32
    ) {
        let dims = Dimensions::new(width, height);
        prop_assert_eq!(scaled_dimensions(dims, 100), dims);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    // Batch laws hold for any mix of decodable and corrupt inputs.
    #[test]
    fn batch_accounting_invariants(corrupt_flags in prop::collection::vec(any::<bool>(), 1..6)) {
        let sources: Vec<_> = corrupt_flags
            .iter()
            .enumerate()
            .map(|(i, &corrupt)| {
                let name = format!("img{}.png", i);
                if corrupt {
                    corrupt_source(&name)
                } else {
                    png_source(&name, 4, 4)
                }
            })
            .collect();

        let spec = TransformSpec::convert_only(TargetFormat::WebP, Some(80)).unwrap();
        let mut sink = BufferSink::new();
        let (summary, delivery) = run_batch(&sources, &spec, &mut sink, &NullProgress).unwrap();

        prop_assert_eq!(summary.total_files, sources.len());
        prop_assert_eq!(
            summary.successful_count + summary.failed_count,
            summary.total_files
        );
        prop_assert_eq!(summary.results.len(), sources.len());
        for (i, (result, source)) in summary.results.iter().zip(&sources).enumerate() {
            prop_assert_eq!(result.original_name(), &source.name);
            prop_assert_eq!(result.is_success(), !corrupt_flags[i]);
        }

        prop_assert!(matches!(delivery, Some(Delivery::Buffered(_))));
        if let Some(Delivery::Buffered(blobs)) = delivery {
            prop_assert_eq!(blobs.len(), summary.successful_count);
        }
    }
}
