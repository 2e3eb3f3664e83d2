use anyhow::{Context, Result};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::color::HexColor;
use crate::image::{DecodedImage, ImageRef, encode_png};
use crate::scene::{Rect, Scene, Shape, TextAlign};

use super::font::FontRenderer;
use super::{Capture, ExportOptions};

/// RGBA8 pixel buffer, not premultiplied
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, background: HexColor) -> Self {
        let px = background.to_rgba();
        let rgba = px.iter().copied().cycle().take(width as usize * height as usize * 4).collect();
        Self { width, height, rgba }
    }

    #[cfg(test)]
    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [self.rgba[idx], self.rgba[idx + 1], self.rgba[idx + 2], self.rgba[idx + 3]]
    }

    /// Source-over blend of `src` at `coverage` (0..=255)
    fn blend(&mut self, x: i64, y: i64, src: [u8; 4], coverage: u8) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let sa = src[3] as f32 / 255.0 * coverage as f32 / 255.0;
        if sa <= 0.0 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 4) as usize;
        let dst = &mut self.rgba[idx..idx + 4];
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        for c in 0..3 {
            let blended = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
            dst[c] = blended.round().clamp(0.0, 255.0) as u8;
        }
        dst[3] = (out_a * 255.0).round() as u8;
    }

    fn fill(&mut self, rect: PixelRect, color: HexColor) {
        let rgba = color.to_rgba();
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                self.blend(x, y, rgba, 0xFF);
            }
        }
    }
}

/// Rect in device pixels, half-open
#[derive(Debug, Clone, Copy)]
struct PixelRect {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl PixelRect {
    fn scaled(rect: Rect, scale: f32) -> Self {
        Self {
            x0: (rect.x * scale).round() as i64,
            y0: (rect.y * scale).round() as i64,
            x1: (rect.right() * scale).round() as i64,
            y1: (rect.bottom() * scale).round() as i64,
        }
    }

    fn width(&self) -> i64 {
        self.x1 - self.x0
    }

    fn height(&self) -> i64 {
        self.y1 - self.y0
    }
}

/// Software rasterizer for board scenes
pub struct Rasterizer {
    font: Option<FontRenderer>,
}

impl Rasterizer {
    /// Rasterizer using the configured font, falling back to system fonts.
    /// With no usable font at all, text is skipped.
    pub fn new(font_name: &str) -> Self {
        match FontRenderer::resolve(font_name) {
            Ok(font) => Self { font: Some(font) },
            Err(e) => {
                warn!(error = ?e, "No font available, exported text will be missing");
                Self::without_font()
            }
        }
    }

    pub fn without_font() -> Self {
        Self { font: None }
    }

    /// Paint the exported elements of `scene` onto a canvas
    pub fn rasterize(&self, scene: &Scene, options: &ExportOptions) -> Canvas {
        let scale = options.scale();
        let width = (scene.width * scale).ceil().max(1.0) as u32;
        let height = (scene.height * scale).ceil().max(1.0) as u32;
        let mut canvas = Canvas::new(width, height, options.background);
        let mut images: HashMap<&ImageRef, Option<DecodedImage>> = HashMap::new();

        for element in scene.exported() {
            match &element.shape {
                Shape::Fill { rect, color } => canvas.fill(PixelRect::scaled(*rect, scale), *color),
                Shape::Stroke { rect, color, width } => {
                    stroke(&mut canvas, PixelRect::scaled(*rect, scale), *color, (width * scale).round().max(1.0) as i64)
                }
                Shape::Text { rect, text, size, color, align } => {
                    self.text(&mut canvas, *rect, text, size * scale, *color, *align, scale)
                }
                Shape::Image { rect, image } => {
                    let decoded = images.entry(image).or_insert_with(|| match image.decode() {
                        Ok(decoded) => Some(decoded),
                        Err(e) => {
                            warn!(error = %e, "Skipping undecodable image in export");
                            None
                        }
                    });
                    if let Some(decoded) = decoded {
                        draw_image(&mut canvas, PixelRect::scaled(*rect, scale), decoded);
                    }
                }
            }
        }

        debug!(width, height, scale, "Rasterized scene");
        canvas
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &self,
        canvas: &mut Canvas,
        rect: Rect,
        text: &str,
        size: f32,
        color: HexColor,
        align: TextAlign,
        scale: f32,
    ) {
        let Some(font) = &self.font else {
            return;
        };
        let run = font.render(text, size);
        if run.is_empty() {
            return;
        }
        let clip = PixelRect::scaled(rect, scale);
        let x0 = match align {
            TextAlign::Left => clip.x0,
            TextAlign::Center => clip.x0 + (clip.width() - run.width as i64) / 2,
        };
        let y0 = clip.y0 + (clip.height() - run.height as i64) / 2;
        let rgba = color.to_rgba();

        for gy in 0..run.height {
            for gx in 0..run.width {
                let (x, y) = (x0 + gx as i64, y0 + gy as i64);
                if x < clip.x0 || x >= clip.x1 || y < clip.y0 || y >= clip.y1 {
                    continue;
                }
                canvas.blend(x, y, rgba, run.coverage[gy * run.width + gx]);
            }
        }
    }
}

fn stroke(canvas: &mut Canvas, rect: PixelRect, color: HexColor, width: i64) {
    let width = width.min(rect.width() / 2).min(rect.height() / 2).max(1);
    let PixelRect { x0, y0, x1, y1 } = rect;
    canvas.fill(PixelRect { x0, y0, x1, y1: y0 + width }, color);
    canvas.fill(PixelRect { x0, y0: y1 - width, x1, y1 }, color);
    canvas.fill(PixelRect { x0, y0: y0 + width, x1: x0 + width, y1: y1 - width }, color);
    canvas.fill(PixelRect { x0: x1 - width, y0: y0 + width, x1, y1: y1 - width }, color);
}

/// Nearest-neighbour blit, scaled to cover `rect` and center-cropped
fn draw_image(canvas: &mut Canvas, rect: PixelRect, image: &DecodedImage) {
    if rect.width() <= 0 || rect.height() <= 0 {
        return;
    }
    let (rw, rh) = (rect.width() as f32, rect.height() as f32);
    let cover = (rw / image.width as f32).max(rh / image.height as f32);
    // fraction of the source visible along each axis
    let span_u = rw / (image.width as f32 * cover);
    let span_v = rh / (image.height as f32 * cover);
    let (u0, v0) = ((1.0 - span_u) / 2.0, (1.0 - span_v) / 2.0);

    for y in rect.y0..rect.y1 {
        let v = v0 + ((y - rect.y0) as f32 + 0.5) / rh * span_v;
        for x in rect.x0..rect.x1 {
            let u = u0 + ((x - rect.x0) as f32 + 0.5) / rw * span_u;
            canvas.blend(x, y, image.sample(u, v), 0xFF);
        }
    }
}

impl Capture for Rasterizer {
    fn capture(&self, scene: &Scene, options: &ExportOptions) -> Result<Vec<u8>> {
        let canvas = self.rasterize(scene, options);
        encode_png(canvas.width, canvas.height, &canvas.rgba).context("Failed to encode PNG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::slot::initial_board;
    use crate::board::{Assignment, BoardManager};
    use crate::color::palette;
    use crate::scene::{Element, HitTarget, build_scene};

    fn options() -> ExportOptions {
        ExportOptions::new(2.0, palette::ZINC_950)
    }

    fn scene_with(elements: Vec<Element>) -> Scene {
        Scene { width: 20.0, height: 10.0, elements }
    }

    #[test]
    fn test_canvas_at_least_double_size() {
        let scene = build_scene(&initial_board(), None);
        let canvas = Rasterizer::without_font().rasterize(&scene, &options());
        assert_eq!(canvas.width, (scene.width * 2.0).ceil() as u32);
        assert_eq!(canvas.height, (scene.height * 2.0).ceil() as u32);
        assert_eq!(canvas.rgba.len(), (canvas.width * canvas.height * 4) as usize);
    }

    #[test]
    fn test_background_fills_canvas() {
        let canvas = Rasterizer::without_font().rasterize(&scene_with(vec![]), &options());
        assert_eq!(canvas.pixel(0, 0), [0x09, 0x09, 0x0B, 0xFF]);
        assert_eq!(canvas.pixel(39, 19), [0x09, 0x09, 0x0B, 0xFF]);
    }

    #[test]
    fn test_interaction_only_elements_not_drawn() {
        let red = Shape::Fill { rect: Rect::new(0.0, 0.0, 10.0, 10.0), color: palette::RED_500 };
        let white = Shape::Fill { rect: Rect::new(10.0, 0.0, 10.0, 10.0), color: palette::WHITE };
        let scene = scene_with(vec![
            Element::control(red).with_hit(HitTarget::ClearSlot(1)),
            Element::visual(white),
        ]);
        let canvas = Rasterizer::without_font().rasterize(&scene, &options());

        assert_eq!(canvas.pixel(5, 5), [0x09, 0x09, 0x0B, 0xFF]);
        assert_eq!(canvas.pixel(30, 5), [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_scaling_doubles_coordinates() {
        let scene = scene_with(vec![Element::visual(Shape::Fill {
            rect: Rect::new(5.0, 0.0, 5.0, 5.0),
            color: palette::WHITE,
        })]);
        let canvas = Rasterizer::without_font().rasterize(&scene, &ExportOptions::new(3.0, palette::ZINC_950));
        assert_eq!(canvas.pixel(14, 0), [0x09, 0x09, 0x0B, 0xFF]);
        assert_eq!(canvas.pixel(15, 0), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(canvas.pixel(29, 14), [0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(canvas.pixel(30, 14), [0x09, 0x09, 0x0B, 0xFF]);
    }

    #[test]
    fn test_translucent_fill_blends() {
        let scene = scene_with(vec![Element::visual(Shape::Fill {
            rect: Rect::new(0.0, 0.0, 20.0, 10.0),
            color: palette::WHITE.with_alpha(0x80),
        })]);
        let px = Rasterizer::without_font().rasterize(&scene, &options()).pixel(0, 0);
        assert!(px[0] > 0x70 && px[0] < 0x90, "{px:?}");
        assert_eq!(px[3], 0xFF);
    }

    #[test]
    fn test_image_drawn_into_rect() {
        let png = encode_png(1, 1, &[0, 255, 0, 255]).unwrap();
        let image = ImageRef::from_png_bytes(&png);
        let mut manager = BoardManager::default();
        manager.assign(1, Assignment::Image(image.clone())).unwrap();
        let scene = build_scene(manager.current(), None);

        let canvas = Rasterizer::without_font().rasterize(&scene, &options());
        let rect = scene.rect_of(HitTarget::SlotIcon(1)).unwrap();
        let (cx, cy) = rect.center();
        assert_eq!(canvas.pixel((cx * 2.0) as u32, (cy * 2.0) as u32), [0, 255, 0, 255]);
    }

    #[test]
    fn test_placeholder_text_absent_from_export() {
        let Ok(font) = FontRenderer::from_system_font() else {
            return;
        };
        let rasterizer = Rasterizer { font: Some(font) };
        // only a placeholder: the exported canvas must stay blank
        let scene = scene_with(vec![Element::control(Shape::Text {
            rect: Rect::new(0.0, 0.0, 20.0, 10.0),
            text: "ARRASTE".into(),
            size: 8.0,
            color: palette::WHITE,
            align: TextAlign::Center,
        })]);
        let canvas = rasterizer.rasterize(&scene, &options());
        assert!(canvas.rgba.chunks_exact(4).all(|px| px == [0x09, 0x09, 0x0B, 0xFF]));
    }

    #[test]
    fn test_capture_produces_png() {
        let scene = build_scene(&initial_board(), None);
        let png = Rasterizer::without_font().capture(&scene, &options()).unwrap();
        let decoded = crate::image::decode_png(&png).unwrap();
        assert_eq!(decoded.width, (scene.width * 2.0).ceil() as u32);
    }
}
