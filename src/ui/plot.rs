use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::outcome_color;
use crate::data::filter::{pie_title, scatter_title};
use crate::state::AppState;

/// Arc segments per full turn of the pie.
const PIE_RESOLUTION: usize = 128;

// ---------------------------------------------------------------------------
// Pie chart: success vs. failure for the selected site
// ---------------------------------------------------------------------------

/// Render the success/failure pie chart.
pub fn success_pie_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(pie_title(&state.site)).strong());
    });

    let counts = state.outcome_counts;
    let total = counts.total();
    if total == 0 {
        ui.allocate_ui([ui.available_width(), height].into(), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No launches for this selection");
            });
        });
        return;
    }

    Plot::new("success_pie_chart")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (outcome, n) in counts.slices() {
                let frac = n as f64 / total as f64;
                let end = start + frac;

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge_points(start, end)))
                        .name(outcome.to_string())
                        .fill_color(outcome_color(outcome))
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let [lx, ly] = unit_point((start + end) / 2.0, 0.6);
                plot_ui.text(
                    Text::new(PlotPoint::new(lx, ly), format!("{:.1}%", frac * 100.0))
                        .color(Color32::WHITE),
                );

                start = end;
            }
        });
}

/// Point on a circle of `radius`, `frac` of a turn clockwise from 12 o'clock.
fn unit_point(frac: f64, radius: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * frac;
    [radius * angle.cos(), radius * angle.sin()]
}

/// Outline of a unit-radius wedge between two fractions of a full turn.
fn wedge_points(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) * PIE_RESOLUTION as f64).ceil() as usize).max(1);
    let mut points = Vec::with_capacity(steps + 2);
    // A full circle needs no centre vertex.
    if end - start < 1.0 {
        points.push([0.0, 0.0]);
    }
    for i in 0..=steps {
        let f = start + (end - start) * i as f64 / steps as f64;
        points.push(unit_point(f, 1.0));
    }
    points
}

// ---------------------------------------------------------------------------
// Scatter chart: payload vs. outcome, coloured by booster category
// ---------------------------------------------------------------------------

/// Render the payload/outcome scatter chart.
pub fn payload_scatter_chart(ui: &mut Ui, state: &AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(scatter_title(&state.site)).strong());
    });

    let Some(dataset) = &state.dataset else {
        return;
    };
    let range = state.payload_range();

    Plot::new("success_payload_scatter_chart")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(range.low)
        .include_x(range.high)
        .include_y(-0.1)
        .include_y(1.1)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let Some(color_map) = &state.color_map else {
                return;
            };

            // One series per booster category so each gets a single legend entry.
            for (category, color) in color_map.legend_entries() {
                let points: Vec<[f64; 2]> = state
                    .visible_indices
                    .iter()
                    .map(|&idx| &dataset.records[idx])
                    .filter(|rec| rec.booster_version_category == category)
                    .map(|rec| [rec.payload_mass_kg, rec.outcome.class()])
                    .collect();

                if points.is_empty() {
                    continue;
                }

                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&category)
                        .color(color)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
