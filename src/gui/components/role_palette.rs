use eframe::egui;

use crate::board::roles_list;
use crate::gui::constants::*;
use crate::input::DragPayload;

/// Role chips; draggable onto slots when drag input is enabled
pub fn ui(ui: &mut egui::Ui, drag_enabled: bool) {
    ui.group(|ui| {
        ui.label(egui::RichText::new("Funções").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal_wrapped(|ui| {
            for role in roles_list() {
                let chip = |ui: &mut egui::Ui| {
                    egui::Frame::new()
                        .fill(role.category.accent().with_alpha(0x33).to_color32())
                        .stroke(egui::Stroke::new(1.0, role.category.accent().to_color32()))
                        .corner_radius(4.0)
                        .inner_margin(egui::Margin::symmetric(8, 4))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(role.label)
                                    .color(role.category.accent().to_color32())
                                    .strong(),
                            );
                        });
                };
                if drag_enabled {
                    let id = egui::Id::new("role_chip").with(role.id);
                    ui.dnd_drag_source(id, DragPayload::role(role.label), chip);
                } else {
                    chip(ui);
                }
            }
        });

        if !drag_enabled {
            ui.add_space(ITEM_SPACING);
            ui.label(egui::RichText::new("Toque num slot para escolher a função").weak());
        }
    });
}
