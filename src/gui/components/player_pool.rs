use eframe::egui;

use crate::board::PlayerPool;
use crate::gui::constants::*;
use crate::input::DragPayload;

/// Text field contents for the "add player" input
#[derive(Default)]
pub struct PlayerPoolState {
    new_name: String,
}

pub fn ui(ui: &mut egui::Ui, pool: &mut PlayerPool, state: &mut PlayerPoolState, drag_enabled: bool) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(format!("Jogadores ({})", pool.len())).strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.new_name)
                    .hint_text("Nick do jogador")
                    .desired_width(180.0),
            );
            let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("➕").clicked() || submitted) && pool.add(&state.new_name).is_some() {
                state.new_name.clear();
                response.request_focus();
            }
        });

        ui.add_space(ITEM_SPACING);

        if pool.is_empty() {
            ui.label(egui::RichText::new("Nenhum jogador no banco").weak());
        }

        let mut to_remove = None;
        egui::ScrollArea::vertical()
            .id_salt("player_pool")
            .max_height(260.0)
            .show(ui, |ui| {
                for (idx, name) in pool.names().iter().enumerate() {
                    ui.horizontal(|ui| {
                        let row = |ui: &mut egui::Ui| {
                            ui.label(egui::RichText::new("☰").weak());
                            ui.label(name);
                        };
                        if drag_enabled {
                            let id = egui::Id::new("pool_player").with(idx);
                            ui.dnd_drag_source(id, DragPayload::name(name.as_str()), row);
                        } else {
                            row(ui);
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("🗑").on_hover_text("Remover").clicked() {
                                to_remove = Some(idx);
                            }
                        });
                    });
                }
            });

        if let Some(idx) = to_remove {
            pool.remove(idx);
        }
    });
}
