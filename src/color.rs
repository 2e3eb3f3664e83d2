//! Hex color parsing shared by the config, the board scene and the exporter

use eframe::egui::Color32;

/// 32-bit ARGB color parsed from `#RRGGBB` / `#AARRGGBB` strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor(u32);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Same color with the alpha channel replaced
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (alpha as u32) << 24)
    }

    /// Parse a hex string. 6-digit input gets full opacity, the `#` is optional.
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self(0xFF00_0000 | value)),
            8 => Some(Self(value)),
            _ => None,
        }
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// `[r, g, b, a]`, not premultiplied
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.red(), self.green(), self.blue(), self.alpha())
    }
}

/// Palette used by the board scene
pub mod palette {
    use super::HexColor;

    pub const ZINC_950: HexColor = HexColor::rgb(0x09, 0x09, 0x0B);
    pub const ZINC_900: HexColor = HexColor::rgb(0x18, 0x18, 0x1B);
    pub const ZINC_800: HexColor = HexColor::rgb(0x27, 0x27, 0x2A);
    pub const ZINC_600: HexColor = HexColor::rgb(0x52, 0x52, 0x5B);
    pub const ZINC_500: HexColor = HexColor::rgb(0x71, 0x71, 0x7A);
    pub const WHITE: HexColor = HexColor::rgb(0xFF, 0xFF, 0xFF);
    pub const YELLOW_500: HexColor = HexColor::rgb(0xEA, 0xB3, 0x08);
    pub const RED_500: HexColor = HexColor::rgb(0xEF, 0x44, 0x44);
    pub const ORANGE_500: HexColor = HexColor::rgb(0xF9, 0x73, 0x16);
    pub const CYAN_500: HexColor = HexColor::rgb(0x06, 0xB6, 0xD4);
    pub const PURPLE_500: HexColor = HexColor::rgb(0xA8, 0x55, 0xF7);
}
