use eframe::egui;

use crate::data::model::LaunchDataset;
use crate::state::DashboardState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: DashboardState,
}

impl DashboardApp {
    pub fn new(dataset: LaunchDataset) -> Self {
        let mut state = DashboardState::default();
        state.set_dataset(dataset);
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site + payload inputs ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts + table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("SpaceX Launch Records Dashboard")
                        .size(28.0)
                        .color(egui::Color32::from_rgb(0x50, 0x3D, 0x36))
                        .strong(),
                );
            });
            plot::charts(ui, &self.state);
            if let Some(scatter) = &self.state.scatter {
                ui.separator();
                table::records_table(ui, &scatter.rows);
            }
        });
    }
}
