//! Native file picker for slot portraits and the team logo

use std::path::PathBuf;

use rfd::FileDialog;
use tracing::debug;

use crate::board::ImageTarget;

fn dialog_title(target: ImageTarget) -> String {
    match target {
        ImageTarget::Slot(slot) => format!("Imagem do jogador (slot {slot})"),
        ImageTarget::Logo => "Logo do time".to_string(),
    }
}

/// Blocks until the user picks a PNG or cancels
pub fn pick_png(target: ImageTarget) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title(dialog_title(target))
        .add_filter("PNG", &["png"]);
    if let Some(dir) = dirs::picture_dir() {
        dialog = dialog.set_directory(dir);
    }
    let picked = dialog.pick_file();
    if picked.is_none() {
        debug!(image_target = ?target, "Image pick cancelled");
    }
    picked
}
