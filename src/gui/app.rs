//! Roster editor window: owns the board manager and wires every panel to it

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};
use eframe::{NativeOptions, egui};
use tracing::{error, info, warn};

use crate::board::{BoardError, BoardManager, DuplicateOutcome, ImageTarget, PlayerPool, Revision, SlotId};
use crate::config::AppConfig;
use crate::input::{InputMode, SlotMutator, TapSelect, drop_on};
use crate::jobs::{ImageRequest, JobResult, JobRunner};
use crate::scene::{HitTarget, Scene, build_scene};
use crate::snapshots::SnapshotStore;
use crate::storage::JsonFileStore;

use super::board_view::{BoardAction, BoardView};
use super::components::image_picker;
use super::components::player_pool::{self, PlayerPoolState};
use super::components::role_palette;
use super::components::selection_surface::{self, SelectionAction};
use super::components::snapshot_panel::{SnapshotAction, SnapshotPanel};
use super::constants::*;

const ROSTER_NAME_FIELD: &str = "roster_name_field";

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

pub struct RosterApp {
    config: AppConfig,
    manager: BoardManager,
    pool: PlayerPool,
    pool_state: PlayerPoolState,
    tap: TapSelect,
    touch_seen: bool,
    snapshots: SnapshotStore<JsonFileStore>,
    snapshot_panel: SnapshotPanel,
    board_view: BoardView,
    jobs: JobRunner,
    scene_cache: Option<((Revision, Option<SlotId>), Scene)>,
    roster_name_edit: String,
    roster_name_synced_at: Option<Revision>,
    capturing: bool,
    pending_images: usize,
    show_reset_confirm: bool,
    status_message: Option<StatusMessage>,
    /// Validation failures the user must acknowledge
    blocking_notice: Option<String>,
}

impl RosterApp {
    pub fn new(config: AppConfig, jobs: JobRunner) -> Self {
        let data_dir = config.data_dir();
        info!(data_dir = %data_dir.display(), input_mode = ?config.input_mode, "Initializing roster editor");

        Self {
            manager: BoardManager::new(config.board),
            pool: PlayerPool::new(&config.pool.players),
            pool_state: PlayerPoolState::default(),
            tap: TapSelect::new(),
            touch_seen: false,
            snapshots: SnapshotStore::open(JsonFileStore::new(data_dir)),
            snapshot_panel: SnapshotPanel::new(),
            board_view: BoardView::new(),
            jobs,
            scene_cache: None,
            roster_name_edit: String::new(),
            roster_name_synced_at: None,
            capturing: false,
            pending_images: 0,
            show_reset_confirm: false,
            status_message: None,
            blocking_notice: None,
            config,
        }
    }

    fn input_mode(&self) -> InputMode {
        self.config.input_mode.resolve(self.touch_seen)
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage { text: text.into(), color: NOTICE_INFO });
    }

    fn warning(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage { text: text.into(), color: NOTICE_WARNING });
    }

    fn failure(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage { text: text.into(), color: NOTICE_ERROR });
    }

    fn report_board_error(&mut self, err: BoardError) {
        match err {
            BoardError::NoAvailableSlot { .. } => {
                self.blocking_notice = Some("Não há slot vazio disponível para duplicar.".to_string());
            }
            other => self.failure(format!("Edição recusada: {other}")),
        }
    }

    fn handle_edit(&mut self, result: Result<(), BoardError>) {
        if let Err(e) = result {
            self.report_board_error(e);
        }
    }

    fn slot_label(&self, slot: SlotId) -> String {
        self.manager
            .current()
            .slot(slot)
            .map(|s| s.label.clone())
            .unwrap_or_else(|| format!("#{slot}"))
    }

    fn apply_board_action(&mut self, ctx: &egui::Context, action: BoardAction) {
        match action {
            BoardAction::Drop { slot, payload } => {
                let result = drop_on(&mut self.manager, slot, payload);
                self.handle_edit(result);
            }
            BoardAction::Activate(slot) => self.tap.activate(slot),
            BoardAction::Clear(slot) => {
                let result = SlotMutator::clear(&mut self.manager, slot);
                self.handle_edit(result);
            }
            BoardAction::Duplicate(slot) => match SlotMutator::duplicate(&mut self.manager, slot) {
                Ok(DuplicateOutcome::Copied { target }) => {
                    let label = self.slot_label(target);
                    self.info(format!("Copiado para {label}"));
                }
                Ok(DuplicateOutcome::NothingToCopy) => {}
                Err(e) => self.report_board_error(e),
            },
            BoardAction::PickImage(target) => {
                if let Some(path) = image_picker::pick_png(target) {
                    self.request_image(target, path);
                }
            }
            BoardAction::EditRosterName => {
                ctx.memory_mut(|m| m.request_focus(egui::Id::new(ROSTER_NAME_FIELD)));
            }
        }
    }

    fn request_image(&mut self, target: ImageTarget, path: PathBuf) {
        let ticket = match self.manager.image_ticket(target) {
            Ok(ticket) => ticket,
            Err(e) => {
                self.report_board_error(e);
                return;
            }
        };
        self.jobs.decode_image(ImageRequest { ticket, path }, self.config.images.max_bytes);
        self.pending_images += 1;
        self.info("Carregando imagem...");
    }

    fn start_export(&mut self) {
        if self.capturing {
            return;
        }
        let board = self.manager.current();
        let scene = build_scene(board, None);
        self.jobs.export(
            scene,
            self.config.export_options(),
            self.config.export_dir(),
            board.roster_name().to_string(),
        );
        self.capturing = true;
        self.info("Exportando imagem...");
    }

    fn poll_jobs(&mut self) {
        while let Some(result) = self.jobs.poll() {
            match result {
                JobResult::Image { request, result } => {
                    self.pending_images = self.pending_images.saturating_sub(1);
                    match result {
                        Ok(image) => match self.manager.apply_async(&request.ticket, image) {
                            Ok(true) => self.info("Imagem aplicada"),
                            Ok(false) => self.warning("Imagem descartada: o slot mudou durante o carregamento"),
                            Err(e) => self.report_board_error(e),
                        },
                        Err(e) => {
                            warn!(path = %request.path.display(), error = %e, "Image load failed");
                            self.failure(format!("Falha ao carregar imagem: {e}"));
                        }
                    }
                }
                JobResult::Export(result) => {
                    self.capturing = false;
                    match result {
                        Ok(path) => self.info(format!("Imagem exportada: {}", path.display())),
                        Err(e) => self.failure(format!("Falha na exportação: {e:#}")),
                    }
                }
            }
        }
    }

    fn apply_snapshot_action(&mut self, action: SnapshotAction) {
        match action {
            SnapshotAction::None => {}
            SnapshotAction::Save(name) => match self.snapshots.save_current(&name, self.manager.current()) {
                Ok(saved) => self.info(format!("Elenco '{}' salvo", saved.name)),
                Err(e) => {
                    error!(error = %e, "Failed to save snapshot");
                    self.failure(format!("Falha ao salvar: {e}"));
                }
            },
            SnapshotAction::Load(id) => {
                let result = self
                    .snapshots
                    .load(&id)
                    .map_err(|e| e.to_string())
                    .and_then(|board| self.manager.load_board(board).map(|_| ()).map_err(|e| e.to_string()));
                match result {
                    Ok(()) => {
                        self.tap.dismiss();
                        self.info("Elenco carregado");
                    }
                    Err(e) => self.failure(format!("Falha ao carregar elenco: {e}")),
                }
            }
            SnapshotAction::Delete(id) => match self.snapshots.delete(&id) {
                Ok(()) => self.info("Elenco excluído"),
                Err(e) => self.failure(format!("Falha ao excluir: {e}")),
            },
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let redo = ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::COMMAND | egui::Modifiers::SHIFT, egui::Key::Z)
                || i.consume_key(egui::Modifiers::COMMAND, egui::Key::Y)
        });
        if redo {
            self.manager.redo();
        } else if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z)) {
            self.manager.undo();
        }
    }

    /// OS file dropped on the window: route by what is under the pointer
    fn handle_dropped_files(&mut self, ctx: &egui::Context, pointer_target: Option<HitTarget>) {
        let dropped: Vec<PathBuf> =
            ctx.input(|i| i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect());
        let Some((path, ignored)) = first_dropped(dropped) else {
            return;
        };
        if ignored > 0 {
            warn!(path = %path.display(), ignored, "Several files dropped, using the first");
        }
        let target = match pointer_target {
            Some(HitTarget::Logo) => Some(ImageTarget::Logo),
            Some(
                HitTarget::SlotCard(slot)
                | HitTarget::SlotInfo(slot)
                | HitTarget::SlotIcon(slot)
                | HitTarget::ClearSlot(slot)
                | HitTarget::DuplicateSlot(slot),
            ) => Some(ImageTarget::Slot(slot)),
            _ => self.tap.active().map(ImageTarget::Slot),
        };
        match target {
            Some(target) => {
                self.request_image(target, path);
                if ignored > 0 {
                    self.warning(format!("Apenas um arquivo por vez: {ignored} arquivo(s) ignorado(s)"));
                }
            }
            None => self.warning("Solte a imagem sobre o retrato de um slot"),
        }
    }

    fn sync_roster_name(&mut self, ctx: &egui::Context) {
        let revision = self.manager.revision();
        let editing = ctx.memory(|m| m.has_focus(egui::Id::new(ROSTER_NAME_FIELD)));
        if self.roster_name_synced_at != Some(revision) && !editing {
            self.roster_name_edit = self.manager.current().roster_name().to_string();
            self.roster_name_synced_at = Some(revision);
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Escalação");
            ui.add_space(SECTION_SPACING);

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.roster_name_edit)
                    .id(egui::Id::new(ROSTER_NAME_FIELD))
                    .hint_text("NOME DO ELENCO")
                    .desired_width(220.0),
            );
            if response.lost_focus() && self.roster_name_edit != self.manager.current().roster_name() {
                self.manager.set_roster_name(self.roster_name_edit.clone());
                self.roster_name_synced_at = Some(self.manager.revision());
            }

            ui.separator();

            if ui
                .add_enabled(self.manager.can_undo(), egui::Button::new("↶ Desfazer"))
                .on_hover_text("Ctrl+Z")
                .clicked()
            {
                self.manager.undo();
            }
            if ui
                .add_enabled(self.manager.can_redo(), egui::Button::new("↷ Refazer"))
                .on_hover_text("Ctrl+Y")
                .clicked()
            {
                self.manager.redo();
            }
            ui.label(
                egui::RichText::new(format!(
                    "{}/{}",
                    self.manager.history_cursor() + 1,
                    self.manager.history_len()
                ))
                .weak(),
            );

            ui.separator();

            let has_logo = self.manager.current().team_logo().is_some();
            if ui
                .add_enabled(has_logo, egui::Button::new("Remover logo"))
                .on_hover_text("Pode ser desfeito com Ctrl+Z")
                .clicked()
            {
                self.manager.set_team_logo(None);
                self.info("Logo removido");
            }
            if ui.button("🔄 Resetar").clicked() {
                self.show_reset_confirm = true;
            }
            let export_label = if self.capturing { "Exportando..." } else { "📷 Exportar PNG" };
            if ui.add_enabled(!self.capturing, egui::Button::new(export_label)).clicked() {
                self.start_export();
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mode = match self.input_mode() {
                    InputMode::TapSelect => "Modo: toque",
                    _ => "Modo: arrastar",
                };
                ui.label(egui::RichText::new(mode).weak());
            });
        });
    }

    fn dialogs(&mut self, ctx: &egui::Context) {
        if let Some(active) = self.tap.active() {
            match self.manager.current().slot(active).cloned() {
                Some(slot) => match selection_surface::show(ctx, &slot, self.pool.names()) {
                    SelectionAction::None => {}
                    SelectionAction::PickName(name) => {
                        let result = self.tap.pick_name(&mut self.manager, &name);
                        self.handle_edit(result);
                    }
                    SelectionAction::PickRole(role) => {
                        let result = self.tap.pick_role(&mut self.manager, &role);
                        self.handle_edit(result);
                    }
                    SelectionAction::Dismiss => self.tap.dismiss(),
                },
                None => {
                    error!(slot = active, "Active slot is not on the board");
                    self.tap.dismiss();
                }
            }
        }

        if self.show_reset_confirm {
            egui::Window::new("Confirmar reset")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Limpar todos os slots, o nome e o logo do elenco?");
                    ui.label(egui::RichText::new("Pode ser desfeito com Ctrl+Z").weak());
                    ui.add_space(ITEM_SPACING);
                    ui.horizontal(|ui| {
                        if ui.button("Resetar").clicked() {
                            self.manager.reset_all();
                            self.tap.dismiss();
                            self.show_reset_confirm = false;
                        }
                        if ui.button("Cancelar").clicked() {
                            self.show_reset_confirm = false;
                        }
                    });
                });
        }

        if let Some(text) = self.blocking_notice.clone() {
            egui::Modal::new(egui::Id::new("blocking_notice")).show(ctx, |ui| {
                ui.label(egui::RichText::new("Aviso").strong());
                ui.add_space(ITEM_SPACING);
                ui.label(text);
                ui.add_space(ITEM_SPACING);
                if ui.button("OK").clicked() {
                    self.blocking_notice = None;
                }
            });
        }
    }
}

impl eframe::App for RosterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_jobs();
        if !self.touch_seen && ctx.input(|i| i.any_touches()) {
            info!("Touch input detected");
            self.touch_seen = true;
        }
        self.handle_shortcuts(ctx);
        self.sync_roster_name(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            self.toolbar(ui);
            ui.add_space(ITEM_SPACING);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            match &self.status_message {
                Some(message) => ui.colored_label(message.color, &message.text),
                None => ui.label(egui::RichText::new("Pronto").weak()),
            };
        });

        let drag_enabled = self.input_mode().drag_enabled();
        let mut snapshot_action = SnapshotAction::None;
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(SIDEBAR_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add_space(ITEM_SPACING);
                    player_pool::ui(ui, &mut self.pool, &mut self.pool_state, drag_enabled);
                    ui.add_space(SECTION_SPACING);
                    role_palette::ui(ui, drag_enabled);
                    ui.add_space(SECTION_SPACING);
                    snapshot_action = self.snapshot_panel.ui(
                        ui,
                        self.snapshots.list(),
                        self.manager.current().roster_name(),
                    );
                });
            });
        self.apply_snapshot_action(snapshot_action);

        let key = (self.manager.revision(), self.tap.active());
        if self.scene_cache.as_ref().map(|(cached, _)| *cached) != Some(key) {
            self.scene_cache = Some((key, build_scene(self.manager.current(), self.tap.active())));
        }

        let mut board_response = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                if let Some((_, scene)) = &self.scene_cache {
                    board_response = Some(self.board_view.ui(ui, scene, key.0));
                }
            });
        });

        if let Some(response) = board_response {
            self.handle_dropped_files(ctx, response.pointer_target);
            for action in response.actions {
                self.apply_board_action(ctx, action);
            }
        }

        self.dialogs(ctx);

        if self.capturing || self.pending_images > 0 {
            ctx.request_repaint_after(Duration::from_millis(JOB_POLL_INTERVAL_MS));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!(saved_rosters = self.snapshots.list().len(), "Roster editor exiting");
    }
}

/// First dropped path and how many others were left out
fn first_dropped(paths: Vec<PathBuf>) -> Option<(PathBuf, usize)> {
    let ignored = paths.len().saturating_sub(1);
    paths.into_iter().next().map(|path| (path, ignored))
}

pub fn run_gui(config: AppConfig, jobs: JobRunner) -> Result<()> {
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Roster Board")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let app = RosterApp::new(config, jobs);
    eframe::run_native(
        "Roster Board",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow!("Failed to launch roster editor: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_dropped_counts_ignored_files() {
        assert_eq!(first_dropped(Vec::new()), None);
        assert_eq!(first_dropped(vec![PathBuf::from("a.png")]), Some((PathBuf::from("a.png"), 0)));
        assert_eq!(
            first_dropped(vec![PathBuf::from("a.png"), PathBuf::from("b.png"), PathBuf::from("c.png")]),
            Some((PathBuf::from("a.png"), 2))
        );
    }
}
