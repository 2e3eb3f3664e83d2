//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Configuration file location
pub mod config {
    /// Directory name under the platform config/data/picture dirs
    pub const APP_DIR: &str = "roster-board";

    /// Config file name
    pub const FILENAME: &str = "config.toml";

    /// Environment variable overriding the log level
    pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

    /// Environment variable overriding the storage directory
    pub const ENV_DATA_DIR: &str = "ROSTER_BOARD_DATA_DIR";
}

/// Board layout constants
pub mod board {
    /// Fixed caption and role of the coach slot
    pub const COACH_LABEL: &str = "COACH";

    /// Caption prefix for starter slots ("JOGADOR 1", "JOGADOR 2", ...)
    pub const STARTER_LABEL_PREFIX: &str = "JOGADOR";

    /// Caption prefix for reserve slots
    pub const RESERVE_LABEL_PREFIX: &str = "RESERVA";

    pub const DEFAULT_STARTERS: u8 = 5;
    pub const DEFAULT_RESERVES: u8 = 2;
    pub const MAX_STARTERS: u8 = 10;
    pub const MAX_RESERVES: u8 = 10;
}

/// Snapshot persistence constants
pub mod storage {
    /// Key holding the serialized collection of saved rosters
    pub const SAVED_ROSTERS_KEY: &str = "roster-board.saved-rosters";

    /// Name prefix used when a roster is saved with a blank name
    pub const DEFAULT_SNAPSHOT_PREFIX: &str = "ELENCO";
}

/// Image export constants
pub mod export {
    /// Minimum capture scale (export is always at least 2x)
    pub const MIN_SCALE: f32 = 2.0;

    /// Upper bound to keep capture buffers reasonable
    pub const MAX_SCALE: f32 = 4.0;

    /// File name prefix for exported boards
    pub const FILE_PREFIX: &str = "escalacao";

    /// Default capture background (zinc-950)
    pub const DEFAULT_BACKGROUND: &str = "#09090B";

    /// Timestamp format appended to the export file name
    pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
}

/// Slot image constants
pub mod images {
    /// Default upper bound for a picked image file
    pub const DEFAULT_MAX_BYTES: u64 = 4 * 1024 * 1024;

    /// Data URI prefix for stored PNG images
    pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";
}
