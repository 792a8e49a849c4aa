//! # material-workup
//!
//! Reduce a folder of TGA/DSC or tensile exports and chart the results.
//!
//! ```bash
//! # TGA/DSC exports (*.csv), peak and inflection markers on
//! material-workup thermal data/mcl --show-dsc-lines --show-tga-lines
//!
//! # Tensile exports (*.txt), print results instead of opening a window
//! material-workup --headless tensile data/tensile --window 5
//!
//! # Everything from a config file
//! material-workup -c workup.toml thermal
//! ```

mod app;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eframe::egui;

use material_workup::config::{OutputTarget, WorkupConfig};

use app::WorkupApp;
use state::{AppState, Reports, Workup};

/// Materials characterization workup: TGA/DSC and tensile curves
#[derive(Parser)]
#[command(name = "material-workup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log per-sample results instead of opening the chart window
    #[arg(long, global = true)]
    headless: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// TGA/DSC workup over a folder of *.csv exports
    Thermal {
        /// Folder with the exports (overrides the config file)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Keep every Nth row before peak detection
        #[arg(short, long)]
        stride: Option<usize>,

        /// Mark DSC peaks and troughs
        #[arg(long)]
        show_dsc_lines: bool,

        /// Mark TGA inflection points
        #[arg(long)]
        show_tga_lines: bool,
    },

    /// Tensile workup over a folder of tab-delimited *.txt exports
    Tensile {
        /// Folder with the exports (overrides the config file)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Moving-average window applied to stress and strain
        #[arg(short, long)]
        window: Option<usize>,

        /// Lower strain bound of the modulus fit
        #[arg(long)]
        fit_min: Option<f64>,

        /// Upper strain bound of the modulus fit
        #[arg(long)]
        fit_max: Option<f64>,
    },
}

/// Fold command line overrides into the loaded configuration.
fn apply_overrides(config: &mut WorkupConfig, cli: &Cli) -> Workup {
    if cli.headless {
        config.output = OutputTarget::Log;
    }
    match &cli.command {
        Commands::Thermal {
            dir,
            stride,
            show_dsc_lines,
            show_tga_lines,
        } => {
            let thermal = &mut config.thermal;
            if let Some(dir) = dir {
                thermal.input_directory = dir.clone();
            }
            if let Some(stride) = stride {
                thermal.downsample_stride = *stride;
            }
            thermal.show_dsc_lines |= show_dsc_lines;
            thermal.show_tga_lines |= show_tga_lines;
            Workup::Thermal
        }
        Commands::Tensile {
            dir,
            window,
            fit_min,
            fit_max,
        } => {
            let tensile = &mut config.tensile;
            if let Some(dir) = dir {
                tensile.input_directory = dir.clone();
            }
            if let Some(window) = window {
                tensile.smoothing_window = *window;
            }
            if let Some(lo) = fit_min {
                tensile.fit_strain_bounds.0 = *lo;
            }
            if let Some(hi) = fit_max {
                tensile.fit_strain_bounds.1 = *hi;
            }
            Workup::Tensile
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 if cli.headless => "info",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &cli.config {
        Some(path) => WorkupConfig::from_file(path)?,
        None => WorkupConfig::default(),
    };
    let workup = apply_overrides(&mut config, &cli);
    config.validate().context("checking configuration")?;

    // Any failure here aborts the run before a window is opened.
    let reports = Reports::compute(workup, &config)?;

    if config.output == OutputTarget::Log {
        return Ok(());
    }

    let state = AppState::new(config, workup, reports);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Material Workup",
        options,
        Box::new(|_cc| Ok(Box::new(WorkupApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))
}
