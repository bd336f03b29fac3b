use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};
use serde::Serialize;

use crate::data::model::SiteSelection;
use crate::state::{DashboardState, PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP};

// ---------------------------------------------------------------------------
// Left side panel – input widgets
// ---------------------------------------------------------------------------

/// Render the left panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    let current = state.site().clone();
    let mut picked: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in state.site_options() {
                if ui
                    .selectable_label(current.label() == option, &option)
                    .clicked()
                {
                    picked = Some(SiteSelection::from_label(&option));
                }
            }
        });
    if let Some(site) = picked {
        state.select_site(site);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload Mass (kg)");
    let range = state.payload_range();
    let (mut low, mut high) = (range.low, range.high);
    let bounds = PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX;

    // Untouched handles keep the dataset's observed bounds, even past the track.
    let low_moved = ui
        .add(
            egui::Slider::new(&mut low, bounds.clone())
                .step_by(PAYLOAD_SLIDER_STEP)
                .clamping(egui::SliderClamping::Never)
                .suffix(" kg")
                .text("from"),
        )
        .changed();
    let high_moved = ui
        .add(
            egui::Slider::new(&mut high, bounds)
                .step_by(PAYLOAD_SLIDER_STEP)
                .clamping(egui::SliderClamping::Never)
                .suffix(" kg")
                .text("to"),
        )
        .changed();
    state.move_payload_handles(low_moved.then_some(low), high_moved.then_some(high));

    // Slider marks every 1000 kg.
    ui.horizontal_wrapped(|ui: &mut Ui| {
        let mut mark = PAYLOAD_SLIDER_MIN;
        while mark <= PAYLOAD_SLIDER_MAX {
            ui.small(format!("{mark:.0}kg"));
            mark += PAYLOAD_SLIDER_STEP;
        }
    });

    if let Some(ds) = &state.dataset {
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!(
                "Observed payloads: {:.0} – {:.0} kg",
                ds.min_payload, ds.max_payload
            ))
            .weak(),
        );
    }

    // ---- Booster legend ----
    if let Some(cm) = &state.booster_colors {
        ui.separator();
        egui::CollapsingHeader::new(RichText::new(&cm.column).strong())
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                egui::ScrollArea::vertical()
                    .max_height(240.0)
                    .show(ui, |ui: &mut Ui| {
                        for (label, color) in cm.legend_entries() {
                            ui.label(RichText::new(label).color(color));
                        }
                    });
            });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(state.pie.is_some(), egui::Button::new("Export pie chart…"))
                .clicked()
            {
                if let Some(pie) = &state.pie {
                    export_dialog(&mut state.status_message, "pie_chart.json", pie);
                }
                ui.close_menu();
            }
            if ui
                .add_enabled(
                    state.scatter.is_some(),
                    egui::Button::new("Export scatter chart…"),
                )
                .clicked()
            {
                if let Some(scatter) = &state.scatter {
                    export_dialog(&mut state.status_message, "scatter_chart.json", scatter);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} in scatter",
                ds.len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut DashboardState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

fn export_dialog<T: Serialize>(status: &mut Option<String>, default_name: &str, chart: &T) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .set_file_name(default_name)
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match write_json(&path, chart) {
            Ok(()) => {
                log::info!("Exported chart data to {}", path.display());
                *status = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                *status = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Write a chart spec as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: &Path, chart: &T) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), chart).context("writing chart JSON")?;
    Ok(())
}
