use crate::app::RoadmapApp;
use crate::model::Granularity;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top menu bar and zoom controls.
pub fn show_toolbar(app: &mut RoadmapApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  "), |ui| {
            if ui.button(format!("{}  Add Task...", icons::PLUS)).clicked() {
                app.open_add_form();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Import JSON...").clicked() {
                app.import_json();
                ui.close_menu();
            }
            if ui.button("  Export JSON...").clicked() {
                app.export_json();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Reset to Sample Roadmap").clicked() {
                app.reset_to_sample();
                ui.close_menu();
            }
        });

        ui.separator();

        let config = *app.zoom.config();

        let zoom_out = egui::Button::new(format!("{} Zoom out", icons::MAGNIFYING_GLASS_MINUS));
        if ui.add_enabled(app.zoom.can_zoom_out(), zoom_out).clicked() {
            app.zoom.zoom_out();
        }

        let mut requested = app.zoom.scale();
        let slider = egui::Slider::new(&mut requested, config.min..=config.max)
            .step_by(f64::from(config.step))
            .show_value(false);
        if ui.add_sized([192.0, 18.0], slider).changed() {
            app.zoom.set_scale(requested);
        }

        let zoom_in = egui::Button::new(format!("{} Zoom in", icons::MAGNIFYING_GLASS_PLUS));
        if ui.add_enabled(app.zoom.can_zoom_in(), zoom_in).clicked() {
            app.zoom.zoom_in();
        }

        ui.label(RichText::new(scale_caption(app.zoom.scale(), app.zoom.granularity())).weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let add = egui::Button::new(format!("{} Add Task", icons::PLUS));
            if ui.add(add).clicked() {
                app.open_add_form();
            }
        });
    });
}

/// `"50px/day"`, with the grid mode appended when it is not per-day.
fn scale_caption(scale: f32, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => format!("{scale}px/day"),
        other => format!("{scale}px/day ({})", other.label()),
    }
}
