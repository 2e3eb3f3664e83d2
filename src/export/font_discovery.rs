//! Font discovery via fontconfig
//!
//! Resolves a font name such as "DejaVu Sans Bold" to a file path

use anyhow::{Context, Result};
use fontconfig::{Fontconfig, Pattern};
use std::ffi::CString;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Style suffixes recognised at the end of a font name, longest first so that
/// "SemiBold" is not mistaken for "Bold"
const KNOWN_STYLES: &[&str] = &[
    "Condensed Bold",
    "SemiBold Italic",
    "Bold Italic",
    "Black Italic",
    "ExtraBold",
    "SemiBold",
    "Italic",
    "Bold",
    "Medium",
    "Black",
    "Regular",
    "Condensed",
];

/// Split "Family Style" into family and optional style
fn split_style(font_name: &str) -> (&str, Option<&'static str>) {
    for style in KNOWN_STYLES {
        if let Some(prefix) = font_name.strip_suffix(style) {
            if prefix.is_empty() || prefix.ends_with(' ') {
                return (prefix.trim(), Some(style));
            }
        }
    }
    (font_name, None)
}

/// Find the font file fontconfig picks for `font_name`. Fails when fontconfig
/// falls back to a different family.
pub fn find_font_path(font_name: &str) -> Result<PathBuf> {
    let fc = Fontconfig::new().context("Failed to initialize fontconfig")?;
    let (family, style) = split_style(font_name);

    let mut pattern = Pattern::new(&fc);
    let family_cstr =
        CString::new(family).with_context(|| format!("Invalid family name: {}", family))?;
    pattern.add_string(fontconfig::FC_FAMILY, &family_cstr);
    if let Some(style) = style {
        let style_cstr =
            CString::new(style).with_context(|| format!("Invalid style name: {}", style))?;
        pattern.add_string(fontconfig::FC_STYLE, &style_cstr);
    }

    let matched = pattern.font_match();
    if let Some(matched_family) = matched.get_string(fontconfig::FC_FAMILY) {
        // generic aliases ("Sans", "Monospace") always resolve to a concrete family
        let generic = matches!(family, "Sans" | "Serif" | "Monospace" | "sans-serif");
        if !generic && !matched_family.eq_ignore_ascii_case(family) {
            warn!(
                requested = font_name,
                matched_family, "Fontconfig returned a different family, font may not be installed"
            );
            return Err(anyhow::anyhow!(
                "Font '{}' not found - fontconfig returned family '{}' instead",
                font_name,
                matched_family
            ));
        }
    }

    let path = PathBuf::from(
        matched
            .filename()
            .with_context(|| format!("No font file found for '{}'", font_name))?,
    );
    if !path.exists() {
        return Err(anyhow::anyhow!("Font file path '{}' does not exist", path.display()));
    }

    debug!(font = font_name, family, style = ?style, path = %path.display(), "Resolved font path");
    Ok(path)
}
