//! GUI-specific constants for layout and notice colors

/// Editor window dimensions
pub const WINDOW_WIDTH: f32 = 1380.0;
pub const WINDOW_HEIGHT: f32 = 900.0;
pub const WINDOW_MIN_WIDTH: f32 = 900.0;
pub const WINDOW_MIN_HEIGHT: f32 = 600.0;

/// Sidebar holding the pool, roles and saved rosters
pub const SIDEBAR_WIDTH: f32 = 300.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Board card corner rounding, in board points
pub const CARD_ROUNDING: f32 = 6.0;

/// Notice colors
pub const NOTICE_INFO: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const NOTICE_WARNING: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);
pub const NOTICE_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);

/// Drop highlight while a drag payload hovers a card
pub const DROP_HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(0xEA, 0xB3, 0x08);

/// Repaint interval while background jobs are pending
pub const JOB_POLL_INTERVAL_MS: u64 = 100;
