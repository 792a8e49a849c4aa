//! TOML configuration for a workup run.
//!
//! Every field has a default matching the lab's standard setup, so a config
//! file only needs the values that differ:
//!
//! ```toml
//! output = "window"
//!
//! [thermal]
//! input_directory = "data/mcl"
//! downsample_stride = 10
//!
//! [thermal.reference_masses.laser]
//! paper_g = 0.0247
//! total_g = 0.0515
//!
//! [tensile]
//! input_directory = "data/tensile"
//! smoothing_window = 5
//! fit_strain_bounds = [0.001, 0.003]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::model::{SampleCategory, SampleDimensions};
use crate::error::WorkupError;

/// Where the results of a run go.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Interactive chart window.
    #[default]
    Window,
    /// Per-sample features written to the log, no window.
    Log,
}

/// Root of a `workup.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkupConfig {
    pub output: OutputTarget,
    pub thermal: ThermalConfig,
    pub tensile: TensileConfig,
}

/// Settings for the TGA/DSC workup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThermalConfig {
    pub input_directory: PathBuf,
    /// Metadata lines before the column header row.
    pub header_rows: usize,
    pub downsample_stride: usize,
    pub show_dsc_lines: bool,
    pub show_tga_lines: bool,
    pub reference_masses: ReferenceMasses,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from("."),
            header_rows: 9,
            downsample_stride: 10,
            show_dsc_lines: false,
            show_tga_lines: false,
            reference_masses: ReferenceMasses::default(),
        }
    }
}

/// Weighed masses of a coated sample, in grams.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceMass {
    /// Mass of the paper substrate alone.
    pub paper_g: f64,
    /// Mass of substrate plus coating.
    pub total_g: f64,
}

impl ReferenceMass {
    /// Substrate share of the total mass, in percent.
    pub fn paper_percent(&self) -> f64 {
        self.paper_g / self.total_g * 100.0
    }
}

/// Reference masses for the coated sample categories.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceMasses {
    pub laser: Option<ReferenceMass>,
    pub oven: Option<ReferenceMass>,
}

impl Default for ReferenceMasses {
    fn default() -> Self {
        Self {
            laser: Some(ReferenceMass {
                paper_g: 0.0247,
                total_g: 0.0515,
            }),
            oven: Some(ReferenceMass {
                paper_g: 0.0279,
                total_g: 0.0603,
            }),
        }
    }
}

impl ReferenceMasses {
    /// Reference mass-% drawn on the TGA panel for a category, if any.
    pub fn percent_for(&self, category: SampleCategory) -> Option<f64> {
        let mass = match category {
            SampleCategory::CoatedLaser => self.laser,
            SampleCategory::CoatedOven => self.oven,
            SampleCategory::Uncoated | SampleCategory::Unrecognized => None,
        };
        mass.map(|m| m.paper_percent())
    }
}

/// Settings for the tensile workup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TensileConfig {
    pub input_directory: PathBuf,
    pub header_rows: usize,
    pub smoothing_window: usize,
    /// Inclusive strain range used for the Young's modulus fit.
    pub fit_strain_bounds: (f64, f64),
    pub load_column: String,
    pub strain_column: String,
    pub sample_dimensions: SampleDimensions,
}

impl Default for TensileConfig {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from("."),
            header_rows: 4,
            smoothing_window: 5,
            fit_strain_bounds: (0.001, 0.003),
            load_column: "Load".to_string(),
            strain_column: "Strain 1".to_string(),
            sample_dimensions: SampleDimensions::default(),
        }
    }
}

impl WorkupConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Reject settings the pipelines cannot work with.
    pub fn validate(&self) -> std::result::Result<(), WorkupError> {
        let invalid = |msg: String| Err(WorkupError::InvalidConfig(msg));

        if self.thermal.downsample_stride == 0 {
            return invalid("thermal.downsample_stride must be at least 1".into());
        }
        for (name, mass) in [
            ("laser", self.thermal.reference_masses.laser),
            ("oven", self.thermal.reference_masses.oven),
        ] {
            if let Some(mass) = mass {
                if !(mass.total_g > 0.0) {
                    return invalid(format!(
                        "thermal.reference_masses.{name}.total_g must be positive"
                    ));
                }
            }
        }

        let tensile = &self.tensile;
        if tensile.smoothing_window == 0 {
            return invalid("tensile.smoothing_window must be at least 1".into());
        }
        let (lo, hi) = tensile.fit_strain_bounds;
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return invalid(format!("tensile.fit_strain_bounds [{lo}, {hi}] is empty"));
        }
        let dims = tensile.sample_dimensions;
        if !(dims.thickness_cm > 0.0 && dims.width_cm > 0.0) {
            return invalid("tensile.sample_dimensions must be positive".into());
        }
        Ok(())
    }
}
