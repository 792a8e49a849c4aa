//! The two workups as plain functions: directory in, per-sample reports out.
//!
//! Nothing here draws. The chart window (or the log, in headless mode)
//! consumes the reports afterwards.

use std::path::Path;

use anyhow::{Context, Result};

use crate::analysis::{
    downsample, find_inflections, find_peaks, find_troughs, linear_fit, moving_average, positions,
    range_mask, trapezoid, LinearFit,
};
use crate::config::{TensileConfig, ThermalConfig};
use crate::data::loader::{
    list_sample_files, load_tensile_sample, load_thermal_sample, TensileColumns,
};
use crate::data::model::{TensileSample, ThermalSample};
use crate::error::FitError;

// ---------------------------------------------------------------------------
// TGA / DSC
// ---------------------------------------------------------------------------

/// Temperatures at which features were detected in one thermal sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermalFeatures {
    /// Local maxima of heat flow.
    pub dsc_peaks: Vec<f64>,
    /// Local minima of heat flow.
    pub dsc_troughs: Vec<f64>,
    /// Sign changes of d(mass %)/dT.
    pub tga_inflections: Vec<f64>,
}

/// Result of the thermal workup for one file.
#[derive(Debug, Clone)]
pub struct ThermalReport {
    /// The sample after stride downsampling.
    pub sample: ThermalSample,
    pub features: ThermalFeatures,
    /// Substrate mass-% drawn as a horizontal line on the TGA panel.
    pub reference_percent: Option<f64>,
}

/// Downsample one thermal sample and extract its features.
pub fn analyze_thermal_sample(sample: &ThermalSample, config: &ThermalConfig) -> ThermalReport {
    let stride = config.downsample_stride;
    let reduced = ThermalSample {
        label: sample.label.clone(),
        category: sample.category,
        temperature: downsample(&sample.temperature, stride),
        heat_flow: downsample(&sample.heat_flow, stride),
        mass_percent: downsample(&sample.mass_percent, stride),
    };

    let t = &reduced.temperature;
    let features = ThermalFeatures {
        dsc_peaks: positions(&find_peaks(&reduced.heat_flow), t),
        dsc_troughs: positions(&find_troughs(&reduced.heat_flow), t),
        tga_inflections: positions(&find_inflections(&reduced.mass_percent, t), t),
    };

    ThermalReport {
        reference_percent: config.reference_masses.percent_for(reduced.category),
        sample: reduced,
        features,
    }
}

/// Run the thermal workup over every `*.csv` file in `config.input_directory`.
pub fn run_thermal(config: &ThermalConfig) -> Result<Vec<ThermalReport>> {
    run_thermal_in(&config.input_directory, config)
}

/// Same as [`run_thermal`] with an explicit directory.
pub fn run_thermal_in(dir: &Path, config: &ThermalConfig) -> Result<Vec<ThermalReport>> {
    let files = list_sample_files(dir, "csv")
        .with_context(|| format!("listing thermal samples in {}", dir.display()))?;

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        let sample = load_thermal_sample(path, config.header_rows)
            .with_context(|| format!("loading {}", path.display()))?;
        let report = analyze_thermal_sample(&sample, config);
        log_thermal(&report);
        reports.push(report);
    }
    log::info!("Thermal workup: {} samples from {}", reports.len(), dir.display());
    Ok(reports)
}

fn log_thermal(report: &ThermalReport) {
    let f = &report.features;
    log::info!(
        "{} [{}]: {} points, DSC peaks {:?}, troughs {:?}, TGA inflections {:?}",
        report.sample.label,
        report.sample.category,
        report.sample.len(),
        f.dsc_peaks,
        f.dsc_troughs,
        f.tga_inflections
    );
    if let Some(pct) = report.reference_percent {
        log::info!("{}: reference substrate mass {pct:.2}%", report.sample.label);
    }
}

// ---------------------------------------------------------------------------
// Tensile
// ---------------------------------------------------------------------------

/// Result of the tensile workup for one specimen.
#[derive(Debug, Clone)]
pub struct TensileReport {
    /// The specimen after moving-average smoothing.
    pub sample: TensileSample,
    /// Points inside the strain window used for the modulus fit.
    pub fit_mask: Vec<bool>,
    /// Young's modulus fit; its slope is the modulus in N/mm².
    pub fit: std::result::Result<LinearFit, FitError>,
    /// Area under the smoothed stress–strain curve, in N/mm².
    pub toughness: f64,
}

impl TensileReport {
    /// Young's modulus, when the fit succeeded.
    pub fn modulus(&self) -> Option<f64> {
        self.fit.as_ref().ok().map(|f| f.slope)
    }

    /// Legend text: name, modulus and toughness to two decimals.
    pub fn legend(&self) -> String {
        let ym = match self.modulus() {
            Some(slope) => format!("{slope:.2}"),
            None => "n/a".to_string(),
        };
        format!(
            "{} (YM: {ym}, Toughness: {:.2})",
            self.sample.name, self.toughness
        )
    }

    /// Strain values inside the fit window, in file order.
    pub fn fit_strains(&self) -> Vec<f64> {
        self.sample
            .strain
            .iter()
            .zip(&self.fit_mask)
            .filter(|(_, keep)| **keep)
            .filter_map(|(s, _)| *s)
            .collect()
    }
}

/// Smooth one tensile specimen, fit its elastic region and integrate it.
pub fn analyze_tensile_sample(sample: &TensileSample, config: &TensileConfig) -> TensileReport {
    let window = config.smoothing_window;
    let smoothed = TensileSample {
        name: sample.name.clone(),
        strain: moving_average(&sample.strain, window),
        stress: moving_average(&sample.stress, window),
    };

    let fit_mask = range_mask(&smoothed.strain, config.fit_strain_bounds);
    let fit = linear_fit(&smoothed.strain, &smoothed.stress, &fit_mask);
    let toughness = trapezoid(&smoothed.stress, &smoothed.strain);

    TensileReport {
        sample: smoothed,
        fit_mask,
        fit,
        toughness,
    }
}

/// Run the tensile workup over every `*.txt` file in `config.input_directory`.
pub fn run_tensile(config: &TensileConfig) -> Result<Vec<TensileReport>> {
    run_tensile_in(&config.input_directory, config)
}

/// Same as [`run_tensile`] with an explicit directory.
pub fn run_tensile_in(dir: &Path, config: &TensileConfig) -> Result<Vec<TensileReport>> {
    let files = list_sample_files(dir, "txt")
        .with_context(|| format!("listing tensile samples in {}", dir.display()))?;

    let columns = TensileColumns {
        load: &config.load_column,
        strain: &config.strain_column,
    };

    let mut reports = Vec::with_capacity(files.len());
    for path in &files {
        let sample =
            load_tensile_sample(path, config.header_rows, columns, config.sample_dimensions)
                .with_context(|| format!("loading {}", path.display()))?;
        let report = analyze_tensile_sample(&sample, config);
        match &report.fit {
            Ok(fit) => log::info!("{} ({} points in fit)", report.legend(), fit.points),
            Err(e) => log::warn!("{}: modulus unavailable: {e}", report.sample.name),
        }
        reports.push(report);
    }
    log::info!("Tensile workup: {} samples from {}", reports.len(), dir.display());
    Ok(reports)
}
