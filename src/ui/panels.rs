use eframe::egui::{self, Color32, RichText, Slider, SliderClamping, Ui};

use crate::data::filter::SiteSelection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let sites = dataset.sites.clone();

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    let mut selected = state.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut selected, SiteSelection::All, "All Sites");
            for site in &sites {
                ui.selectable_value(&mut selected, SiteSelection::Site(site.clone()), site.as_str());
            }
        });
    state.select_site(selected);

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range slider ----
    ui.strong("Payload range (Kg):");
    let slider = state.slider;
    let mut low = state.payload_low;
    let mut high = state.payload_high;
    // Edits-only clamping: the handles keep the dataset's own bounds until
    // the user drags them onto the step grid.
    let low_changed = ui
        .add(
            Slider::new(&mut low, slider.min..=slider.max)
                .clamping(SliderClamping::Edits)
                .step_by(slider.step)
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(
            Slider::new(&mut high, slider.min..=slider.max)
                .clamping(SliderClamping::Edits)
                .step_by(slider.step)
                .text("to"),
        )
        .changed();
    ui.horizontal(|ui: &mut Ui| {
        for mark in slider.marks() {
            ui.small(format!("{mark:.0}"));
        }
    });
    if low_changed || high_changed {
        state.set_payload_range(low, high);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Summary ----
    let counts = state.outcome_counts;
    ui.label(format!("Successes: {}", counts.success));
    ui.label(format!("Failures: {}", counts.failure));
    ui.label(format!("Points in range: {}", state.visible_indices.len()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches from {} sites loaded",
                ds.len(),
                ds.sites.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Replace the dataset from a user-picked file. A failure keeps the current
/// dataset and surfaces the error in the top bar.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} with sites {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.sites
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
