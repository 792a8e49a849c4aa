use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use material_workup::color::category_color;
use material_workup::pipeline::{TensileReport, ThermalReport};

use crate::state::{AppState, Reports, Workup};

// ---------------------------------------------------------------------------
// Left side panel – per-sample results
// ---------------------------------------------------------------------------

/// Render the left panel listing what was found in each sample.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Samples");
    ui.separator();

    if state.reports.is_empty() {
        ui.label("No samples loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match &state.reports {
            Reports::Thermal(reports) => {
                for report in reports {
                    thermal_summary(ui, report);
                }
            }
            Reports::Tensile { reports, colors } => {
                for (report, &color) in reports.iter().zip(colors) {
                    tensile_summary(ui, report, color);
                }
            }
        });
}

fn format_positions(xs: &[f64]) -> String {
    if xs.is_empty() {
        return "none".to_string();
    }
    xs.iter()
        .map(|x| format!("{x:.1}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn thermal_summary(ui: &mut Ui, report: &ThermalReport) {
    let sample = &report.sample;
    let color = category_color(sample.category);
    let f = &report.features;

    egui::CollapsingHeader::new(RichText::new(&sample.label).strong().color(color))
        .id_salt(&sample.label)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Category: {}", sample.category));
            ui.label(format!("Points: {}", sample.len()));
            ui.label(format!("DSC peaks (°C): {}", format_positions(&f.dsc_peaks)));
            ui.label(format!("DSC troughs (°C): {}", format_positions(&f.dsc_troughs)));
            ui.label(format!(
                "TGA inflections (°C): {}",
                format_positions(&f.tga_inflections)
            ));
            if let Some(pct) = report.reference_percent {
                ui.label(format!("Substrate mass: {pct:.2} %"));
            }
        });
}

fn tensile_summary(ui: &mut Ui, report: &TensileReport, color: Color32) {
    let name = &report.sample.name;
    egui::CollapsingHeader::new(RichText::new(name).strong().color(color))
        .id_salt(name)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            match &report.fit {
                Ok(fit) => {
                    ui.label(format!("Young's modulus: {:.2} N/mm²", fit.slope));
                    ui.label(format!(
                        "Fit: {} points, intercept {:.4}",
                        fit.points, fit.intercept
                    ));
                }
                Err(e) => {
                    ui.label(
                        RichText::new(format!("Modulus unavailable: {e}")).color(Color32::RED),
                    );
                }
            }
            ui.label(format!("Toughness: {:.2} N/mm²", report.toughness));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} samples from {}",
            state.reports.len(),
            state.input_directory().display()
        ));

        ui.separator();

        match state.workup {
            Workup::Thermal => {
                ui.checkbox(&mut state.show_dsc_lines, "DSC peaks/troughs");
                ui.checkbox(&mut state.show_tga_lines, "TGA inflections");
            }
            Workup::Tensile => {
                ui.checkbox(&mut state.show_fit_lines, "Modulus fit");
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open sample folder")
        .set_directory(state.input_directory())
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Opening {}", dir.display());
        state.open_directory(dir);
    }
}
