//! TrueType text rasterization using fontdue (pure Rust)

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::font_discovery::find_font_path;

/// Rasterized text as an 8-bit coverage mask
#[derive(Debug, Default)]
pub struct GlyphRun {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

impl GlyphRun {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug)]
pub struct FontRenderer {
    font: Font,
}

impl FontRenderer {
    pub fn from_path(path: &Path) -> Result<Self> {
        let font_data = fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font: {}", e))?;
        info!(path = %path.display(), "Loaded export font");
        Ok(Self { font })
    }

    pub fn from_font_name(font_name: &str) -> Result<Self> {
        let path = find_font_path(font_name)
            .with_context(|| format!("Failed to resolve font '{}'", font_name))?;
        Self::from_path(&path)
    }

    /// Configured font when given, otherwise a bold sans from fontconfig,
    /// otherwise well-known install paths
    pub fn resolve(font_name: &str) -> Result<Self> {
        if !font_name.trim().is_empty() {
            match Self::from_font_name(font_name) {
                Ok(renderer) => return Ok(renderer),
                Err(e) => warn!(font = font_name, error = ?e, "Configured export font unavailable, using system font"),
            }
        }
        Self::from_system_font()
    }

    pub fn from_system_font() -> Result<Self> {
        for name in ["DejaVu Sans Bold", "Liberation Sans Bold", "Sans"] {
            if let Ok(renderer) = Self::from_font_name(name) {
                return Ok(renderer);
            }
        }

        let font_paths = [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
        ];
        for path in &font_paths {
            if let Ok(renderer) = Self::from_path(&PathBuf::from(path)) {
                return Ok(renderer);
            }
        }

        Err(anyhow::anyhow!(
            "Could not find any system fonts. Tried fontconfig and hardcoded paths: {:?}",
            font_paths
        ))
    }

    /// Rasterize a single line of text at `size` pixels
    pub fn render(&self, text: &str, size: f32) -> GlyphRun {
        let mut glyphs = Vec::new();
        let mut x = 0.0f32;
        let mut max_ascent = 0i32;
        let mut max_descent = 0i32;

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, size);
            max_ascent = max_ascent.max(metrics.height as i32 + metrics.ymin);
            max_descent = max_descent.max(-metrics.ymin);
            glyphs.push((x.round() as i32 + metrics.xmin, metrics, bitmap));
            x += metrics.advance_width;
        }

        let width = x.ceil() as usize;
        let height = (max_ascent + max_descent).max(0) as usize;
        if width == 0 || height == 0 {
            return GlyphRun::default();
        }

        let mut coverage = vec![0u8; width * height];
        for (x_offset, metrics, bitmap) in glyphs {
            let top = max_ascent - (metrics.height as i32 + metrics.ymin);
            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let px = x_offset + gx as i32;
                    let py = top + gy as i32;
                    if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                        continue;
                    }
                    let idx = py as usize * width + px as usize;
                    coverage[idx] = coverage[idx].max(bitmap[gy * metrics.width + gx]);
                }
            }
        }

        GlyphRun { width, height, coverage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_when_font_available() {
        let Ok(renderer) = FontRenderer::from_system_font() else {
            return;
        };
        let run = renderer.render("BLACK", 20.0);
        assert!(!run.is_empty());
        assert_eq!(run.coverage.len(), run.width * run.height);
        assert!(run.coverage.iter().any(|&c| c > 0));
        assert!(renderer.render("", 20.0).is_empty());
        assert!(renderer.render("BLACK", 40.0).width > run.width);
    }

    #[test]
    fn test_missing_font_file() {
        assert!(FontRenderer::from_path(Path::new("/nonexistent/font.ttf")).is_err());
    }
}
