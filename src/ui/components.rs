//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use crate::types::UnitOfMeasure;
use eframe::egui;

/// Small caps-style label rendered above a form input
pub fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_SECTION)
                .color(theme::TEXT_DIM),
        )
        .selectable(false),
    );
}

/// Unit-of-measure dropdown. Returns true if the selection changed.
pub fn measure_selector(
    ui: &mut egui::Ui,
    id_salt: &str,
    selected: &mut UnitOfMeasure,
    width: f32,
) -> bool {
    let mut changed = false;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected.label())
        .width(width)
        .show_ui(ui, |ui| {
            for measure in UnitOfMeasure::ALL {
                if ui
                    .selectable_value(selected, measure, measure.label())
                    .changed()
                {
                    changed = true;
                }
            }
        });
    changed
}

/// Square icon button used in table rows. Returns true if clicked.
pub fn icon_button(ui: &mut egui::Ui, icon: &str, color: egui::Color32) -> bool {
    let size = 22.0;
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter()
            .rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
    }
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(14.0),
        color,
    );
    response.clicked()
}
