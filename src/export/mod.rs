//! Board export: rasterize a scene to PNG and write it to the export directory
//!
//! Export works from a [`Scene`], never from the board itself, so anything the
//! layout marks `interaction_only` (buttons, placeholders, hints) cannot leak
//! into the image.

mod font;
mod font_discovery;
mod raster;

pub use raster::Rasterizer;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::color::HexColor;
use crate::constants::config::APP_DIR;
use crate::constants::export::{FILE_PREFIX, MAX_SCALE, MIN_SCALE, TIMESTAMP_FORMAT};
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    scale: f32,
    pub background: HexColor,
}

impl ExportOptions {
    pub fn new(scale: f32, background: HexColor) -> Self {
        let scale = if scale.is_finite() { scale.clamp(MIN_SCALE, MAX_SCALE) } else { MIN_SCALE };
        Self { scale, background }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

/// Capability that turns a scene into encoded image bytes
pub trait Capture {
    fn capture(&self, scene: &Scene, options: &ExportOptions) -> Result<Vec<u8>>;
}

/// Default export directory (`$XDG_PICTURES_DIR/roster-board` or platform equivalent)
pub fn default_export_dir() -> PathBuf {
    let mut path = dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// `escalacao-<roster name>-<timestamp>.png`, whitespace runs in the name
/// collapsed to '-'
pub fn export_file_name(roster_name: &str, timestamp: DateTime<Local>) -> String {
    let name = roster_name
        .split_whitespace()
        .map(|part| {
            part.chars()
                .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
                .collect::<String>()
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let name = if name.is_empty() { "elenco".to_string() } else { name };
    format!("{FILE_PREFIX}-{name}-{}.png", timestamp.format(TIMESTAMP_FORMAT))
}

/// Capture `scene` and write the PNG into `dir`, returning the written path
pub fn export_scene(
    capture: &dyn Capture,
    scene: &Scene,
    options: &ExportOptions,
    dir: &Path,
    roster_name: &str,
    timestamp: DateTime<Local>,
) -> Result<PathBuf> {
    let png = capture.capture(scene, options).context("Failed to capture board")?;
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {:?}", dir))?;
    let path = dir.join(export_file_name(roster_name, timestamp));
    fs::write(&path, &png).with_context(|| format!("Failed to write {:?}", path))?;
    info!(path = %path.display(), bytes = png.len(), scale = options.scale(), "Exported board image");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::slot::initial_board;
    use crate::color::palette;
    use crate::scene::build_scene;
    use chrono::TimeZone;

    struct FailingCapture;

    impl Capture for FailingCapture {
        fn capture(&self, _scene: &Scene, _options: &ExportOptions) -> Result<Vec<u8>> {
            Err(anyhow::anyhow!("surface lost"))
        }
    }

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 18, 30, 5).unwrap()
    }

    #[test]
    fn test_scale_never_below_two() {
        assert_eq!(ExportOptions::new(1.0, palette::ZINC_950).scale(), 2.0);
        assert_eq!(ExportOptions::new(f32::NAN, palette::ZINC_950).scale(), 2.0);
        assert_eq!(ExportOptions::new(3.0, palette::ZINC_950).scale(), 3.0);
        assert_eq!(ExportOptions::new(50.0, palette::ZINC_950).scale(), MAX_SCALE);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("LOUD  Academy", at()),
            "escalacao-LOUD-Academy-20260314-183005.png"
        );
        assert_eq!(export_file_name("   ", at()), "escalacao-elenco-20260314-183005.png");
        assert_eq!(export_file_name("A/B", at()), "escalacao-AB-20260314-183005.png");
    }

    #[test]
    fn test_export_scene_writes_png() {
        let dir = std::env::temp_dir().join(format!("roster-board-export-{}", std::process::id()));
        let scene = build_scene(&initial_board(), None);
        let options = ExportOptions::new(2.0, palette::ZINC_950);
        let path = export_scene(&Rasterizer::without_font(), &scene, &options, &dir, "TIME", at()).unwrap();

        assert_eq!(path.file_name().unwrap(), "escalacao-TIME-20260314-183005.png");
        let decoded = crate::image::decode_png(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(decoded.width, (scene.width * 2.0).ceil() as u32);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_capture_writes_nothing() {
        let dir = std::env::temp_dir().join(format!("roster-board-export-fail-{}", std::process::id()));
        let scene = build_scene(&initial_board(), None);
        let options = ExportOptions::new(2.0, palette::ZINC_950);
        assert!(export_scene(&FailingCapture, &scene, &options, &dir, "TIME", at()).is_err());
        assert!(!dir.exists());
    }
}
