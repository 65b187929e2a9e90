//! End-to-end evaluation scenarios on synthetic captures.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use scan_qa_core::{
    evaluate_quality, DocumentOptions, Finding, QualityEvaluator, QualityOptions,
    SideStripOptions, SizeTier,
};
use scan_qa_test_support::SyntheticRasterBuilder as Builder;

fn tags(findings: &[Finding]) -> Vec<String> {
    findings.iter().map(ToString::to_string).collect()
}

#[test]
fn test_blank_frame_reports_missing_edges_only() {
    let raster = Builder::raster(Builder::uniform(3000, 4000, 128));
    let report = QualityEvaluator::default().evaluate(&raster);

    assert!(!report.ok);
    assert_eq!(tags(&report.reasons), vec!["document_edges_not_found"]);
    assert!(report.warnings.is_empty());
    assert_eq!(report.metrics.size_tier, SizeTier::Excellent);
    assert_eq!(report.metrics.short_edge, 3000);
    assert_eq!(report.metrics.blur_score, Some(0.0));

    let brightness = report.metrics.brightness.expect("brightness metrics");
    assert!((brightness.mean - 128.0).abs() < 1e-9);
    let document = report.metrics.document.expect("document metrics");
    assert!(document.edge_pixel_ratio.abs() < f64::EPSILON);
}

#[test]
fn test_clean_capture_passes() {
    let raster = Builder::raster(Builder::framed_document(3000, 4000));
    let report = QualityEvaluator::default().evaluate(&raster);

    assert!(report.ok, "reasons: {:?}", tags(&report.reasons));
    assert!(report.warnings.is_empty(), "warnings: {:?}", tags(&report.warnings));
    assert_eq!(report.metrics.size_tier, SizeTier::Excellent);
    assert!(report.metrics.blur_score.unwrap() > 120.0);

    let document = report.metrics.document.unwrap();
    assert_eq!(document.cropped, Some(false));
    assert!(document.coverage_ratio.unwrap() > 0.55);
}

#[test]
fn test_two_page_spread_is_rejected_by_gutter() {
    let raster = Builder::raster(Builder::two_page_spread(300, 400));
    let report = QualityEvaluator::default().evaluate(&raster);

    assert_eq!(
        tags(&report.reasons),
        vec!["size_too_small:300", "multiple_documents_detected:gutter"]
    );
    let multiple = report.metrics.document.unwrap().multiple.unwrap();
    assert!(multiple.gutter_detected);
}

#[test]
fn test_side_strip_is_rejected_when_enabled() {
    let raster = Builder::raster(Builder::side_strip_capture(300, 400));
    let options = QualityOptions {
        document: DocumentOptions {
            side_strip: SideStripOptions {
                enabled: true,
                ..SideStripOptions::default()
            },
            ..DocumentOptions::default()
        },
        ..QualityOptions::default()
    };

    let report = evaluate_quality(&raster, &options);
    assert_eq!(
        tags(&report.reasons),
        vec!["size_too_small:300", "document_side_strip_detected"]
    );
    let strip = report.metrics.document.unwrap().side_strip.unwrap();
    assert!(strip.detected);
    assert!(strip.boundary_column.is_some());

    let default_report = QualityEvaluator::default().evaluate(&raster);
    assert_eq!(tags(&default_report.reasons), vec!["size_too_small:300"]);
}

#[test]
fn test_blurred_capture_is_rejected_for_blur() {
    let raster = Builder::raster(Builder::blurred_document(1200, 1600, 4.0));
    let report = QualityEvaluator::default().evaluate(&raster);

    let reasons: Vec<&str> = report.reasons.iter().map(Finding::tag).collect();
    assert_eq!(reasons, vec!["blur_score_below_threshold"]);
    assert_eq!(tags(&report.warnings), vec!["size_low:1200"]);
    assert!(report.metrics.blur_score.unwrap() < 120.0);
}

#[test]
fn test_dark_capture_has_one_brightness_reason() {
    let raster = Builder::raster(Builder::dark_document(300, 400, 40));
    let report = QualityEvaluator::default().evaluate(&raster);

    let brightness: Vec<&str> = report
        .reasons
        .iter()
        .filter(|f| f.is_brightness())
        .map(Finding::tag)
        .collect();
    assert_eq!(brightness, vec!["brightness_mean_low"]);
}

#[test]
fn test_disabling_framing_only_removes_framing_output() {
    let raster = Builder::raster(Builder::two_page_spread(300, 400));
    let with = QualityEvaluator::default().evaluate(&raster);
    let without = evaluate_quality(
        &raster,
        &QualityOptions {
            document: DocumentOptions {
                enabled: false,
                ..DocumentOptions::default()
            },
            ..QualityOptions::default()
        },
    );

    assert!(without.metrics.document.is_none());
    assert!(!without.reasons.iter().any(Finding::is_document));
    assert_eq!(tags(&without.reasons), vec!["size_too_small:300"]);
    assert_eq!(with.metrics.blur_score, without.metrics.blur_score);
    assert_eq!(with.metrics.brightness, without.metrics.brightness);
}

#[test]
fn test_report_serializes_with_camel_case_and_string_tags() {
    let raster = Builder::raster(Builder::uniform(40, 40, 128));
    let report = QualityEvaluator::default().evaluate(&raster);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["ok"], false);
    assert_eq!(json["reasons"][0], "size_too_small:40");
    assert_eq!(json["metrics"]["shortEdge"], 40);
    assert_eq!(json["metrics"]["sizeTier"], "reject");
    assert_eq!(json["metrics"]["document"]["edgePixelRatio"], 0.0);
    assert!(json["metrics"]["document"]["coverageRatio"].is_null());
}

#[test]
fn test_uniform_rasters_score_zero_blur() {
    let options = QualityOptions {
        document: DocumentOptions {
            enabled: false,
            ..DocumentOptions::default()
        },
        ..QualityOptions::default()
    };
    for value in [20u8, 128, 240] {
        let raster = Builder::raster(Builder::uniform(64, 64, value));
        let report = evaluate_quality(&raster, &options);
        assert_eq!(report.metrics.blur_score, Some(0.0));
        assert!(report.has_reason("blur_score_below_threshold"));
    }
}
