use eframe::egui;

use crate::board::{Slot, roles_list};
use crate::gui::constants::*;

pub enum SelectionAction {
    None,
    PickName(String),
    PickRole(String),
    Dismiss,
}

/// Window listing the whole pool and the whole role catalog for the active slot
pub fn show(ctx: &egui::Context, slot: &Slot, pool: &[String]) -> SelectionAction {
    let mut action = SelectionAction::None;
    let mut open = true;

    egui::Window::new(format!("Selecionar: {}", slot.label))
        .id(egui::Id::new("selection_surface"))
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            if let Some(name) = &slot.assigned_name {
                ui.label(format!("Atual: {name}"));
                ui.add_space(ITEM_SPACING);
            }

            ui.label(egui::RichText::new("Função").strong());
            ui.horizontal_wrapped(|ui| {
                for role in roles_list() {
                    let selected = slot.assigned_role.as_deref() == Some(role.label);
                    let text = egui::RichText::new(role.label).color(role.category.accent().to_color32());
                    if ui.selectable_label(selected, text).clicked() {
                        action = SelectionAction::PickRole(role.label.to_string());
                    }
                }
            });

            ui.add_space(SECTION_SPACING);
            ui.label(egui::RichText::new("Jogador").strong());
            egui::ScrollArea::vertical()
                .id_salt("selection_pool")
                .max_height(320.0)
                .show(ui, |ui| {
                    if pool.is_empty() {
                        ui.label(egui::RichText::new("Nenhum jogador na lista").weak());
                    }
                    for name in pool {
                        let selected = slot.assigned_name.as_deref() == Some(name.as_str());
                        if ui.selectable_label(selected, name).clicked() {
                            action = SelectionAction::PickName(name.clone());
                        }
                    }
                });

            ui.add_space(ITEM_SPACING);
            if ui.button("Fechar").clicked() {
                action = SelectionAction::Dismiss;
            }
        });

    if !open || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = SelectionAction::Dismiss;
    }
    action
}
