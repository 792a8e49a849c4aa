use eframe::egui::{Color32, Ui};
use egui_plot::{HLine, Legend, Line, LineStyle, Plot, PlotUi, VLine};

use material_workup::color::category_color;
use material_workup::data::model::Series;
use material_workup::pipeline::{TensileReport, ThermalReport};

use crate::state::{AppState, Reports};

/// Opacity of the feature reference lines.
const MARKER_ALPHA: f32 = 0.7;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the chart(s) for whatever the last run produced.
pub fn workup_plot(ui: &mut Ui, state: &AppState) {
    if state.reports.is_empty() {
        let dir = state.input_directory().display().to_string();
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!("No samples found in {dir}  (File → Open folder…)"));
        });
        return;
    }

    match &state.reports {
        Reports::Thermal(reports) => {
            ui.columns(2, |columns: &mut [Ui]| {
                dsc_panel(&mut columns[0], reports, state.show_dsc_lines);
                tga_panel(&mut columns[1], reports, state.show_tga_lines);
            });
        }
        Reports::Tensile { reports, colors } => {
            tensile_panel(ui, reports, colors, state.show_fit_lines);
        }
    }
}

/// Pair up two aligned series, skipping rows where either value is missing.
fn series_points(x: &Series, y: &Series) -> Vec<[f64; 2]> {
    x.iter()
        .zip(y)
        .filter_map(|(xi, yi)| Some([(*xi)?, (*yi)?]))
        .collect()
}

fn vlines(plot_ui: &mut PlotUi, xs: &[f64], color: Color32) {
    for &x in xs {
        plot_ui.vline(
            VLine::new(x)
                .color(color.gamma_multiply(MARKER_ALPHA))
                .style(LineStyle::dashed_loose()),
        );
    }
}

// ---------------------------------------------------------------------------
// Thermal panels
// ---------------------------------------------------------------------------

fn dsc_panel(ui: &mut Ui, reports: &[ThermalReport], show_lines: bool) {
    ui.heading("DSC Data");
    Plot::new("dsc_plot")
        .legend(Legend::default())
        .x_axis_label("Temperature (°C)")
        .y_axis_label("Heat Flow (W/g)")
        .show(ui, |plot_ui| {
            for report in reports {
                let sample = &report.sample;
                let color = category_color(sample.category);
                plot_ui.line(
                    Line::new(series_points(&sample.temperature, &sample.heat_flow))
                        .name(&sample.label)
                        .color(color),
                );
                if show_lines {
                    vlines(plot_ui, &report.features.dsc_peaks, color);
                    vlines(plot_ui, &report.features.dsc_troughs, color);
                }
            }
        });
}

fn tga_panel(ui: &mut Ui, reports: &[ThermalReport], show_lines: bool) {
    ui.heading("TGA Data");
    Plot::new("tga_plot")
        .legend(Legend::default())
        .x_axis_label("Temperature (°C)")
        .y_axis_label("Weight (%)")
        .show(ui, |plot_ui| {
            for report in reports {
                let sample = &report.sample;
                let color = category_color(sample.category);
                plot_ui.line(
                    Line::new(series_points(&sample.temperature, &sample.mass_percent))
                        .name(&sample.label)
                        .color(color),
                );
                if show_lines {
                    vlines(plot_ui, &report.features.tga_inflections, color);
                }
                if let Some(pct) = report.reference_percent {
                    plot_ui.hline(
                        HLine::new(pct)
                            .color(color.gamma_multiply(MARKER_ALPHA))
                            .style(LineStyle::dashed_loose()),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Tensile panel
// ---------------------------------------------------------------------------

fn tensile_panel(ui: &mut Ui, reports: &[TensileReport], colors: &[Color32], show_fit: bool) {
    ui.heading("Stress-Strain Curves");
    Plot::new("tensile_plot")
        .legend(Legend::default())
        .x_axis_label("Strain (mm/mm)")
        .y_axis_label("Stress (N/mm^2)")
        .show_grid(true)
        .show(ui, |plot_ui| {
            for (report, &color) in reports.iter().zip(colors) {
                let sample = &report.sample;
                plot_ui.line(
                    Line::new(series_points(&sample.strain, &sample.stress))
                        .name(report.legend())
                        .color(color)
                        .width(3.0),
                );

                let Ok(fit) = &report.fit else {
                    continue;
                };
                if show_fit {
                    let points: Vec<[f64; 2]> = report
                        .fit_strains()
                        .into_iter()
                        .map(|s| [s, fit.predict(s)])
                        .collect();
                    plot_ui.line(
                        Line::new(points)
                            .color(Color32::BLACK)
                            .style(LineStyle::dashed_loose())
                            .width(3.0),
                    );
                }
            }
        });
}
