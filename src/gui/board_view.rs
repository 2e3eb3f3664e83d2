//! Paints a board scene and turns pointer input on it into board actions

use std::collections::{HashMap, HashSet};

use eframe::egui::{self, Align2, ColorImage, FontId, Pos2, Sense, Stroke, StrokeKind, TextureHandle, TextureOptions};
use tracing::warn;

use crate::board::{ImageTarget, Revision, SlotId};
use crate::color::palette;
use crate::image::ImageRef;
use crate::input::DragPayload;
use crate::scene::{HitTarget, Rect, Scene, Shape, TextAlign};

use super::constants::*;

/// Something the user did on the board, applied by the app
#[derive(Debug, Clone, PartialEq)]
pub enum BoardAction {
    Drop { slot: SlotId, payload: DragPayload },
    Activate(SlotId),
    Clear(SlotId),
    Duplicate(SlotId),
    PickImage(ImageTarget),
    EditRosterName,
}

pub struct BoardResponse {
    pub actions: Vec<BoardAction>,
    /// Hit target under the pointer, for routing OS file drops
    pub pointer_target: Option<HitTarget>,
}

/// Maps board points onto the allocated screen rect
#[derive(Clone, Copy)]
struct Viewport {
    origin: Pos2,
    zoom: f32,
}

impl Viewport {
    fn to_screen(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.origin + egui::vec2(rect.x * self.zoom, rect.y * self.zoom),
            egui::vec2(rect.width * self.zoom, rect.height * self.zoom),
        )
    }

    fn to_board(&self, pos: Pos2) -> (f32, f32) {
        ((pos.x - self.origin.x) / self.zoom, (pos.y - self.origin.y) / self.zoom)
    }
}

#[derive(Default)]
pub struct BoardView {
    textures: HashMap<ImageRef, Option<TextureHandle>>,
    textures_revision: Option<Revision>,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, scene: &Scene, revision: Revision) -> BoardResponse {
        self.prune_textures(scene, revision);

        let zoom = (ui.available_width() / scene.width).clamp(0.4, 1.0);
        let (response, painter) =
            ui.allocate_painter(egui::vec2(scene.width * zoom, scene.height * zoom), Sense::hover());
        let view = Viewport { origin: response.rect.min, zoom };

        painter.rect_filled(response.rect, 0.0, palette::ZINC_950.to_color32());
        for element in &scene.elements {
            self.paint(ui.ctx(), &painter, &element.shape, view);
        }

        let mut actions = Vec::new();
        let pointer = ui
            .input(|i| i.pointer.latest_pos())
            .filter(|pos| response.rect.contains(*pos));
        let pointer_target = pointer.and_then(|pos| {
            let (x, y) = view.to_board(pos);
            scene.hit_test(x, y)
        });

        if egui::DragAndDrop::has_payload_of_type::<DragPayload>(ui.ctx()) {
            let card = pointer.and_then(|pos| {
                let (x, y) = view.to_board(pos);
                scene.hit_targets().find_map(|(hit, rect)| match hit {
                    HitTarget::SlotCard(slot) if rect.contains(x, y) => Some((slot, rect)),
                    _ => None,
                })
            });
            if let Some((slot, rect)) = card {
                painter.rect_stroke(
                    view.to_screen(rect).expand(3.0),
                    CARD_ROUNDING * zoom,
                    Stroke::new(2.0, DROP_HIGHLIGHT),
                    StrokeKind::Outside,
                );
                if ui.input(|i| i.pointer.any_released())
                    && let Some(payload) = egui::DragAndDrop::take_payload::<DragPayload>(ui.ctx())
                {
                    actions.push(BoardAction::Drop { slot, payload: (*payload).clone() });
                }
            }
        }

        // registered in paint order so the topmost element wins the click
        for (idx, element) in scene.elements.iter().enumerate() {
            let Some(hit) = element.hit else {
                continue;
            };
            let Some(action) = click_action(hit) else {
                continue;
            };
            let clicked = ui
                .interact(
                    view.to_screen(element.shape.rect()),
                    ui.id().with(("board_hit", idx)),
                    Sense::click(),
                )
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .clicked();
            if clicked {
                actions.push(action);
            }
        }

        BoardResponse { actions, pointer_target }
    }

    fn paint(&mut self, ctx: &egui::Context, painter: &egui::Painter, shape: &Shape, view: Viewport) {
        let rect = view.to_screen(shape.rect());
        match shape {
            Shape::Fill { color, .. } => {
                painter.rect_filled(rect, CARD_ROUNDING * view.zoom, color.to_color32());
            }
            Shape::Stroke { color, width, .. } => {
                painter.rect_stroke(
                    rect,
                    CARD_ROUNDING * view.zoom,
                    Stroke::new(width * view.zoom, color.to_color32()),
                    StrokeKind::Inside,
                );
            }
            Shape::Text { text, size, color, align, .. } => {
                let (pos, anchor) = match align {
                    TextAlign::Left => (rect.left_center(), Align2::LEFT_CENTER),
                    TextAlign::Center => (rect.center(), Align2::CENTER_CENTER),
                };
                painter.with_clip_rect(rect).text(
                    pos,
                    anchor,
                    text,
                    FontId::proportional(size * view.zoom),
                    color.to_color32(),
                );
            }
            Shape::Image { image, .. } => {
                if let Some(texture) = self.texture(ctx, image) {
                    let [w, h] = texture.size();
                    painter.image(texture.id(), rect, cover_uv(rect, w as f32, h as f32), egui::Color32::WHITE);
                }
            }
        }
    }

    fn texture(&mut self, ctx: &egui::Context, image: &ImageRef) -> Option<&TextureHandle> {
        if !self.textures.contains_key(image) {
            let texture = match image.decode() {
                Ok(decoded) => Some(ctx.load_texture(
                    "board-image",
                    ColorImage::from_rgba_unmultiplied(
                        [decoded.width as usize, decoded.height as usize],
                        &decoded.rgba,
                    ),
                    TextureOptions::LINEAR,
                )),
                Err(e) => {
                    warn!(error = %e, "Failed to decode board image for display");
                    None
                }
            };
            self.textures.insert(image.clone(), texture);
        }
        self.textures.get(image).and_then(Option::as_ref)
    }

    /// Drop textures no longer on the board, once per board revision
    fn prune_textures(&mut self, scene: &Scene, revision: Revision) {
        if self.textures_revision == Some(revision) {
            return;
        }
        self.textures_revision = Some(revision);
        let live: HashSet<&ImageRef> = scene
            .elements
            .iter()
            .filter_map(|e| match &e.shape {
                Shape::Image { image, .. } => Some(image),
                _ => None,
            })
            .collect();
        self.textures.retain(|image, _| live.contains(image));
    }
}

/// Action for a click on `hit`. The card body only receives drops; tap
/// selection starts from the info region.
fn click_action(hit: HitTarget) -> Option<BoardAction> {
    match hit {
        HitTarget::SlotCard(_) => None,
        HitTarget::SlotInfo(slot) => Some(BoardAction::Activate(slot)),
        HitTarget::SlotIcon(slot) => Some(BoardAction::PickImage(ImageTarget::Slot(slot))),
        HitTarget::ClearSlot(slot) => Some(BoardAction::Clear(slot)),
        HitTarget::DuplicateSlot(slot) => Some(BoardAction::Duplicate(slot)),
        HitTarget::Logo => Some(BoardAction::PickImage(ImageTarget::Logo)),
        HitTarget::RosterName => Some(BoardAction::EditRosterName),
    }
}

/// UV sub-rect that scales the texture to cover `rect`, center-cropped
fn cover_uv(rect: egui::Rect, tex_w: f32, tex_h: f32) -> egui::Rect {
    let cover = (rect.width() / tex_w).max(rect.height() / tex_h);
    let span_u = (rect.width() / (tex_w * cover)).min(1.0);
    let span_v = (rect.height() / (tex_h * cover)).min(1.0);
    let (u0, v0) = ((1.0 - span_u) / 2.0, (1.0 - span_v) / 2.0);
    egui::Rect::from_min_max(egui::pos2(u0, v0), egui::pos2(u0 + span_u, v0 + span_v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_uv_crops_long_axis() {
        let rect = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0));
        let uv = cover_uv(rect, 200.0, 100.0);
        assert!((uv.min.x - 0.25).abs() < 1e-4);
        assert!((uv.max.x - 0.75).abs() < 1e-4);
        assert_eq!(uv.min.y, 0.0);
        assert_eq!(uv.max.y, 1.0);
    }

    #[test]
    fn test_card_body_click_does_nothing() {
        assert_eq!(click_action(HitTarget::SlotCard(3)), None);
        assert_eq!(click_action(HitTarget::SlotInfo(3)), Some(BoardAction::Activate(3)));
        assert_eq!(
            click_action(HitTarget::SlotIcon(3)),
            Some(BoardAction::PickImage(ImageTarget::Slot(3)))
        );
        assert_eq!(click_action(HitTarget::Logo), Some(BoardAction::PickImage(ImageTarget::Logo)));
    }

    #[test]
    fn test_viewport_round_trip() {
        let view = Viewport { origin: egui::pos2(10.0, 20.0), zoom: 0.5 };
        let screen = view.to_screen(Rect::new(100.0, 40.0, 20.0, 10.0));
        assert_eq!(screen.min, egui::pos2(60.0, 40.0));
        assert_eq!(screen.width(), 10.0);
        assert_eq!(view.to_board(screen.min), (100.0, 40.0));
    }
}
