use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points, Polygon};

use crate::data::chart::wedge_polygon;
use crate::data::model::{OutcomeClass, SiteSelector};
use crate::state::AppState;

/// Vertex count of a full pie circle.
const PIE_SEGMENTS: usize = 128;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x3c, 0xa5, 0x5c);
const FAILURE_COLOR: Color32 = Color32::from_rgb(0xd6, 0x4b, 0x4b);

// ---------------------------------------------------------------------------
// Success pie (upper half of the central panel)
// ---------------------------------------------------------------------------

/// Render the success pie for the current site selection.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let pie = &state.pie;
    ui.strong(&pie.title);

    if pie.is_empty() {
        ui.label("No launches for this selection.");
        return;
    }

    let success_label = OutcomeClass::Success.to_string();

    Plot::new("success_pie")
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
            for slice in &pie.slices {
                let color = match state.site {
                    SiteSelector::All => state.site_colors.color_for(&slice.label),
                    SiteSelector::Site(_) if slice.label == success_label => SUCCESS_COLOR,
                    SiteSelector::Site(_) => FAILURE_COLOR,
                };
                let points: PlotPoints = wedge_polygon(start, slice.fraction, PIE_SEGMENTS)
                    .into_iter()
                    .collect();
                let name = format!(
                    "{}: {} ({:.1}%)",
                    slice.label,
                    slice.count,
                    slice.fraction * 100.0
                );
                plot_ui.polygon(
                    Polygon::new(points)
                        .name(name)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );
                start += slice.fraction;
            }
        });
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter (lower half of the central panel)
// ---------------------------------------------------------------------------

/// Render the payload/outcome scatter, one colour per booster category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    let scatter = &state.scatter;
    ui.strong(&scatter.title);

    // Hover text names the launch site of the nearest point.
    let hover_points: Vec<(String, f64, f64, String)> = scatter
        .series
        .iter()
        .flat_map(|s| {
            s.points
                .iter()
                .map(|p| (s.booster.clone(), p.payload_mass_kg, p.class, p.site.clone()))
        })
        .collect();

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(0.0)
        .include_x(state.slider_max_kg)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value| {
            let site = hover_points
                .iter()
                .filter(|(booster, ..)| booster == name)
                .min_by(|a, b| {
                    let da = (a.1 - value.x).abs() + (a.2 - value.y).abs();
                    let db = (b.1 - value.x).abs() + (b.2 - value.y).abs();
                    da.total_cmp(&db)
                })
                .map(|(.., site)| site.as_str())
                .unwrap_or("");
            if name.is_empty() {
                format!("{:.0} kg, class {:.0}", value.x, value.y)
            } else {
                format!("{name} @ {site}\n{:.0} kg, class {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for series in &scatter.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.payload_mass_kg, p.class])
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&series.booster)
                        .color(state.booster_colors.color_for(&series.booster))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
