//! End-to-end tests of the TGA/DSC workup: files on disk in, features out.

use std::fs;
use std::path::Path;

use material_workup::config::ThermalConfig;
use material_workup::data::model::SampleCategory;
use material_workup::pipeline::{run_thermal, ThermalFeatures};
use tempfile::tempdir;

const PREAMBLE: &str =
    "Sample\nInstrument\nOperator\nMethod\nAtmosphere\nFlow\nPan\nSize\nComment\n";

fn write_export(dir: &Path, name: &str, rows: &[(f64, &str, f64)]) {
    let mut text = String::from(PREAMBLE);
    text.push_str("°C,W/g,%\n");
    for (t, heat, mass) in rows {
        text.push_str(&format!("{t},{heat},{mass}\n"));
    }
    fs::write(dir.join(name), text).unwrap();
}

/// Thermal workup with every row kept.
fn full_resolution(dir: &Path) -> ThermalConfig {
    ThermalConfig {
        input_directory: dir.to_path_buf(),
        downsample_stride: 1,
        ..ThermalConfig::default()
    }
}

#[test]
fn test_features_match_reference() {
    let dir = tempdir().unwrap();
    write_export(
        dir.path(),
        "coated-laser.csv",
        &[
            (10.0, "0", 100.0),
            (20.0, "1", 98.0),
            (30.0, "3", 95.0),
            (40.0, "1", 95.5),
            (50.0, "0", 96.0),
            (60.0, "2", 90.0),
            (70.0, "0", 85.0),
        ],
    );

    let reports = run_thermal(&full_resolution(dir.path())).unwrap();
    assert_eq!(reports.len(), 1);

    let report = &reports[0];
    assert_eq!(report.sample.label, "Coated laser");
    assert_eq!(report.sample.category, SampleCategory::CoatedLaser);
    assert_eq!(
        report.features,
        ThermalFeatures {
            dsc_peaks: vec![30.0, 60.0],
            dsc_troughs: vec![50.0],
            tga_inflections: vec![30.0, 40.0],
        }
    );

    let expected_pct = 0.0247 / 0.0515 * 100.0;
    assert!((report.reference_percent.unwrap() - expected_pct).abs() < 1e-9);
}

#[test]
fn test_samples_processed_in_name_order() {
    let dir = tempdir().unwrap();
    let rows = [
        (10.0, "1", 100.0),
        (20.0, "0", 99.0),
        (30.0, "1", 98.0),
        (40.0, "0", 97.0),
        (50.0, "1", 96.0),
    ];
    write_export(dir.path(), "uncoated.csv", &rows);
    write_export(dir.path(), "coated-oven.csv", &rows);
    fs::write(dir.path().join("notes.txt"), "not a sample").unwrap();

    let reports = run_thermal(&full_resolution(dir.path())).unwrap();
    let labels: Vec<_> = reports.iter().map(|r| r.sample.label.as_str()).collect();
    assert_eq!(labels, vec!["Coated oven", "Uncoated"]);

    let uncoated = &reports[1];
    assert_eq!(uncoated.features.dsc_peaks, vec![30.0]);
    assert_eq!(uncoated.features.dsc_troughs, vec![20.0, 40.0]);
    assert!(uncoated.features.tga_inflections.is_empty());
    assert_eq!(uncoated.reference_percent, None);
    assert!(reports[0].reference_percent.is_some());
}

#[test]
fn test_default_stride_and_malformed_cells() {
    let dir = tempdir().unwrap();
    let mut rows = Vec::new();
    for i in 0..30 {
        let t = i as f64;
        let (heat, mass) = match i {
            0 => ("0", 100.0),
            10 => ("5", 90.0),
            20 => ("1", 95.0),
            // dropped by the stride, so the bad cell never matters
            5 => ("n/a", 100.0),
            _ => ("0", 100.0),
        };
        rows.push((t, heat, mass));
    }
    write_export(dir.path(), "reference.csv", &rows);

    let config = ThermalConfig {
        input_directory: dir.path().to_path_buf(),
        ..ThermalConfig::default()
    };
    let reports = run_thermal(&config).unwrap();
    let report = &reports[0];

    assert_eq!(report.sample.category, SampleCategory::Unrecognized);
    assert_eq!(report.sample.temperature, vec![Some(0.0), Some(10.0), Some(20.0)]);
    assert_eq!(report.features.dsc_peaks, vec![10.0]);
    assert!(report.features.dsc_troughs.is_empty());
    assert_eq!(report.features.tga_inflections, vec![10.0]);
}

#[test]
fn test_nan_mass_reading_adds_no_inflections() {
    let dir = tempdir().unwrap();
    write_export(
        dir.path(),
        "uncoated.csv",
        &[
            (10.0, "0", 100.0),
            (20.0, "0", 99.0),
            (30.0, "0", f64::NAN),
            (40.0, "0", 97.0),
            (50.0, "0", 96.0),
        ],
    );

    let reports = run_thermal(&full_resolution(dir.path())).unwrap();
    let report = &reports[0];
    assert_eq!(report.sample.mass_percent[2], None);
    assert!(report.features.tga_inflections.is_empty());
}

#[test]
fn test_missing_directory_aborts() {
    let dir = tempdir().unwrap();
    let config = full_resolution(&dir.path().join("missing"));
    let err = run_thermal(&config).unwrap_err();
    assert!(format!("{err:#}").contains("does not exist"));
}

#[test]
fn test_unreadable_sample_aborts_whole_run() {
    let dir = tempdir().unwrap();
    write_export(dir.path(), "a-good.csv", &[(1.0, "0", 100.0), (2.0, "0", 99.0)]);
    fs::write(dir.path().join("b-broken.csv"), "too short\n").unwrap();

    let err = run_thermal(&full_resolution(dir.path())).unwrap_err();
    assert!(format!("{err:#}").contains("b-broken.csv"));
}
