//! Sidebar panels and dialogs of the roster editor

pub mod image_picker;
pub mod player_pool;
pub mod role_palette;
pub mod selection_surface;
pub mod snapshot_panel;
