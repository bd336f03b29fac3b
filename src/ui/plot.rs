use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::ColorMap;
use crate::data::chart::{PieChartSpec, PieSlice, ScatterChartSpec};
use crate::state::DashboardState;

/// Radius of the donut hole relative to the outer radius.
const PIE_HOLE: f64 = 0.3;
/// Largest angle covered by one polygon; keeps every piece convex.
const MAX_SEGMENT: f64 = TAU / 180.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render both charts stacked in the central panel.
pub fn charts(ui: &mut Ui, state: &DashboardState) {
    let (Some(pie), Some(scatter)) = (&state.pie, &state.scatter) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch dataset to begin  (File → Open…)");
        });
        return;
    };

    let chart_height = ((ui.available_height() - 120.0) / 2.0).max(200.0);

    ui.heading(&pie.title);
    pie_chart(ui, pie, chart_height);
    ui.separator();

    ui.heading(&scatter.title);
    if let Some(colors) = &state.booster_colors {
        scatter_chart(ui, scatter, colors, chart_height);
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// A slice laid out on the unit circle, clockwise from twelve o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub fraction: f64,
    pub start: f64,
    pub end: f64,
}

impl Wedge {
    /// Convex quads (outer arc → inner arc) tiling the donut segment.
    pub fn segments(&self) -> Vec<[[f64; 2]; 4]> {
        let span = self.end - self.start;
        let n = (span.abs() / MAX_SEGMENT).ceil().max(1.0) as usize;
        (0..n)
            .map(|i| {
                let a = self.start + span * i as f64 / n as f64;
                let b = self.start + span * (i + 1) as f64 / n as f64;
                [polar(1.0, a), polar(1.0, b), polar(PIE_HOLE, b), polar(PIE_HOLE, a)]
            })
            .collect()
    }

    pub fn label_anchor(&self) -> [f64; 2] {
        polar((1.0 + PIE_HOLE) / 2.0, (self.start + self.end) / 2.0)
    }
}

fn polar(r: f64, angle: f64) -> [f64; 2] {
    [r * angle.cos(), r * angle.sin()]
}

/// Lay slices out in order, clockwise from the top.
pub fn layout_wedges(slices: &[PieSlice]) -> Vec<Wedge> {
    let total: usize = slices.iter().map(|s| s.count).sum();
    if total == 0 {
        return Vec::new();
    }
    let mut angle = FRAC_PI_2;
    slices
        .iter()
        .map(|s| {
            let fraction = s.count as f64 / total as f64;
            let start = angle;
            angle -= fraction * TAU;
            Wedge {
                label: s.label.clone(),
                fraction,
                start,
                end: angle,
            }
        })
        .collect()
}

fn pie_chart(ui: &mut Ui, pie: &PieChartSpec, height: f32) {
    if pie.slices.is_empty() {
        ui.label(RichText::new("No launches for this selection.").weak());
        return;
    }

    ui.label(RichText::new(format!("{} launches", pie.total())).weak());
    let wedges = layout_wedges(&pie.slices);
    let colors = ColorMap::new(
        pie.group_field.column(),
        wedges.iter().map(|w| w.label.as_str()),
    );

    Plot::new("success_pie_chart")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for wedge in &wedges {
                let color = colors.color_for(&wedge.label);
                for quad in wedge.segments() {
                    let poly = Polygon::new(PlotPoints::from(quad.to_vec()))
                        .name(&wedge.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, color));
                    plot_ui.polygon(poly);
                }
                let [x, y] = wedge.label_anchor();
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x, y),
                        format!("{:.1}%", wedge.fraction * 100.0),
                    )
                    .color(Color32::WHITE),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Marker radius for a payload mass, relative to the heaviest visible one.
pub fn marker_radius(mass: f64, max_mass: f64) -> f32 {
    if max_mass <= 0.0 {
        return 3.0;
    }
    (3.0 + 9.0 * (mass / max_mass)) as f32
}

fn scatter_chart(ui: &mut Ui, scatter: &ScatterChartSpec, colors: &ColorMap, height: f32) {
    let max_mass = scatter
        .rows
        .iter()
        .map(|r| r.payload_mass_kg)
        .fold(0.0, f64::max);

    Plot::new("success_payload_scatter_chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(scatter.encoding.x)
        .y_axis_label(scatter.encoding.y)
        .include_y(-0.5)
        .include_y(1.5)
        .include_x(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                String::new()
            } else {
                format!("{name}\npayload: {:.0} kg\nclass: {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for rec in &scatter.rows {
                let point = Points::new(PlotPoints::from(vec![[
                    rec.payload_mass_kg,
                    rec.class as f64,
                ]]))
                .name(&rec.booster_version)
                .color(colors.color_for(&rec.booster_version))
                .radius(marker_radius(rec.payload_mass_kg, max_mass))
                .filled(true);
                plot_ui.points(point);
            }
        });
}
