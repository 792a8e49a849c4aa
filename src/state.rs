use std::path::{Path, PathBuf};

use anyhow::Result;
use eframe::egui::Color32;

use material_workup::color::generate_palette;
use material_workup::config::WorkupConfig;
use material_workup::pipeline::{self, TensileReport, ThermalReport};

// ---------------------------------------------------------------------------
// Which workup the window shows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workup {
    Thermal,
    Tensile,
}

/// Reports of the most recent run.
pub enum Reports {
    Thermal(Vec<ThermalReport>),
    Tensile {
        reports: Vec<TensileReport>,
        /// One colour per report, same order.
        colors: Vec<Color32>,
    },
}

impl Reports {
    /// Run the selected workup with the directory stored in `config`.
    pub fn compute(workup: Workup, config: &WorkupConfig) -> Result<Self> {
        Ok(match workup {
            Workup::Thermal => Reports::Thermal(pipeline::run_thermal(&config.thermal)?),
            Workup::Tensile => {
                let reports = pipeline::run_tensile(&config.tensile)?;
                let colors = generate_palette(reports.len());
                Reports::Tensile { reports, colors }
            }
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Reports::Thermal(r) => r.len(),
            Reports::Tensile { reports, .. } => reports.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: WorkupConfig,
    pub workup: Workup,
    pub reports: Reports,

    /// Vertical lines at DSC peaks and troughs.
    pub show_dsc_lines: bool,
    /// Vertical lines at TGA inflections.
    pub show_tga_lines: bool,
    /// Dashed modulus fit over each tensile curve.
    pub show_fit_lines: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: WorkupConfig, workup: Workup, reports: Reports) -> Self {
        Self {
            show_dsc_lines: config.thermal.show_dsc_lines,
            show_tga_lines: config.thermal.show_tga_lines,
            show_fit_lines: true,
            config,
            workup,
            reports,
            status_message: None,
        }
    }

    pub fn input_directory(&self) -> &Path {
        match self.workup {
            Workup::Thermal => &self.config.thermal.input_directory,
            Workup::Tensile => &self.config.tensile.input_directory,
        }
    }

    /// Point the current workup at another directory and re-run it.
    pub fn open_directory(&mut self, dir: PathBuf) {
        match self.workup {
            Workup::Thermal => self.config.thermal.input_directory = dir,
            Workup::Tensile => self.config.tensile.input_directory = dir,
        }
        self.reload();
    }

    /// Re-run the workup. On failure the previous reports stay on screen.
    pub fn reload(&mut self) {
        match Reports::compute(self.workup, &self.config) {
            Ok(reports) => {
                self.reports = reports;
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to run workup: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
