use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
}

impl LaunchDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dropdown + payload slider ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: pie above scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.label(
                    RichText::new(DASHBOARD_TITLE)
                        .size(32.0)
                        .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
                );
            });
            ui.add_space(8.0);

            let pie_height = (ui.available_height() * 0.45).max(160.0);
            plot::success_pie_chart(ui, &self.state, pie_height);
            ui.add_space(8.0);
            plot::payload_scatter_chart(ui, &self.state);
        });
    }
}
