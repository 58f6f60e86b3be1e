use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::model::{SiteSelector, ALL_SITES};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // ---- Launch site dropdown ----
    ui.strong("Launch site");
    let mut choice: Option<String> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(state.site.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.site == SiteSelector::All, SiteSelector::All.label())
                .clicked()
            {
                choice = Some(ALL_SITES.to_string());
            }
            for site in state.dataset.sites() {
                let selected = matches!(&state.site, SiteSelector::Site(s) if s == site);
                if ui.selectable_label(selected, site).clicked() {
                    choice = Some(site.clone());
                }
            }
        });
    if let Some(value) = choice {
        state.select_site(&value).ok();
    }
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let mut low = state.payload.min();
    let mut high = state.payload.max();
    let range = 0.0..=state.slider_max_kg;

    let low_changed = ui
        .add(
            Slider::new(&mut low, range.clone())
                .step_by(state.step_kg)
                .text("from"),
        )
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut high, range).step_by(state.step_kg).text("to"))
        .changed();

    if low_changed || high_changed {
        state.set_payload_bounds(low, high).ok();
    }

    if ui.small_button("Reset range").clicked() {
        let (min, max) = (state.dataset.min_payload(), state.dataset.max_payload());
        state.set_payload_bounds(min, max).ok();
    }
    ui.separator();

    // ---- Dataset summary ----
    ui.label(format!(
        "Recorded payloads: {:.0} – {:.0} kg",
        state.dataset.min_payload(),
        state.dataset.max_payload()
    ));
    ui.label(format!("{} launch sites", state.dataset.sites().len()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} visible",
            state.dataset.len(),
            state.visible_count()
        ));

        ui.separator();

        ui.label(format!(
            "Site: {}  |  Payload: {:.0}–{:.0} kg",
            state.site.label(),
            state.payload.min(),
            state.payload.max()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
