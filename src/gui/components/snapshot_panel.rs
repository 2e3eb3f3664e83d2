use eframe::egui;

use crate::gui::constants::*;
use crate::snapshots::SavedRoster;

pub enum SnapshotAction {
    None,
    Save(String),
    Load(String),
    Delete(String),
}

/// Saved rosters list with save, load and delete-confirm dialogs
#[derive(Default)]
pub struct SnapshotPanel {
    save_name: String,
    show_save_dialog: bool,
    pending_delete: Option<(String, String)>,
}

impl SnapshotPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, saved: &[SavedRoster], roster_name: &str) -> SnapshotAction {
        let mut action = SnapshotAction::None;

        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Elencos salvos").strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("💾 Salvar").clicked() {
                        self.save_name = roster_name.to_string();
                        self.show_save_dialog = true;
                    }
                });
            });
            ui.add_space(ITEM_SPACING);

            if saved.is_empty() {
                ui.label(egui::RichText::new("Nenhum elenco salvo").weak());
            }

            egui::ScrollArea::vertical()
                .id_salt("saved_rosters")
                .max_height(220.0)
                .show(ui, |ui| {
                    for roster in saved {
                        ui.horizontal(|ui| {
                            ui.vertical(|ui| {
                                ui.label(&roster.name);
                                ui.label(
                                    egui::RichText::new(
                                        roster
                                            .timestamp
                                            .with_timezone(&chrono::Local)
                                            .format("%d/%m/%Y %H:%M")
                                            .to_string(),
                                    )
                                    .small()
                                    .weak(),
                                );
                            });
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button("🗑").on_hover_text("Excluir").clicked() {
                                    self.pending_delete = Some((roster.id.clone(), roster.name.clone()));
                                }
                                if ui.small_button("Carregar").clicked() {
                                    action = SnapshotAction::Load(roster.id.clone());
                                }
                            });
                        });
                        ui.separator();
                    }
                });
        });

        if self.show_save_dialog {
            action = self.save_dialog(ui.ctx());
        }
        if self.pending_delete.is_some() {
            action = self.delete_confirm_dialog(ui.ctx());
        }
        action
    }

    fn save_dialog(&mut self, ctx: &egui::Context) -> SnapshotAction {
        let mut action = SnapshotAction::None;

        egui::Window::new("Salvar elenco")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Nome:");
                ui.add(egui::TextEdit::singleline(&mut self.save_name).hint_text("ELENCO"));
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("Salvar").clicked() {
                        action = SnapshotAction::Save(self.save_name.clone());
                        self.show_save_dialog = false;
                    }
                    if ui.button("Cancelar").clicked() {
                        self.show_save_dialog = false;
                    }
                });
            });

        action
    }

    fn delete_confirm_dialog(&mut self, ctx: &egui::Context) -> SnapshotAction {
        let mut action = SnapshotAction::None;
        let Some((id, name)) = self.pending_delete.clone() else {
            return action;
        };

        egui::Window::new("Confirmar exclusão")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Excluir o elenco '{name}'?"));
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("Excluir").clicked() {
                        action = SnapshotAction::Delete(id.clone());
                        self.pending_delete = None;
                    }
                    if ui.button("Cancelar").clicked() {
                        self.pending_delete = None;
                    }
                });
            });

        action
    }
}
