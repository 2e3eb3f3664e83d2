//! Assignment input: drag-and-drop and tap-to-select adapters
//!
//! Neither adapter touches the board directly. Both drive a [`SlotMutator`],
//! which the board manager implements; tests drive them with a recorder.

mod drag;
mod tap;

pub use drag::{DragPayload, drop_on};
pub use tap::TapSelect;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::board::{Assignment, BoardError, BoardManager, DuplicateOutcome, SlotId};

/// The narrow set of edits input adapters may perform
pub trait SlotMutator {
    fn assign(&mut self, slot: SlotId, assignment: Assignment) -> Result<(), BoardError>;
    fn clear(&mut self, slot: SlotId) -> Result<(), BoardError>;
    fn duplicate(&mut self, source: SlotId) -> Result<DuplicateOutcome, BoardError>;
}

/// Unknown slot ids are defects in the caller; log them loudly
fn log_defect<T>(result: &Result<T, BoardError>) {
    if let Err(e @ BoardError::UnknownSlot(_)) = result {
        error!(error = %e, "Input referenced a slot that does not exist");
    }
}

impl SlotMutator for BoardManager {
    fn assign(&mut self, slot: SlotId, assignment: Assignment) -> Result<(), BoardError> {
        let result = BoardManager::assign(self, slot, assignment).map(|_| ());
        log_defect(&result);
        result
    }

    fn clear(&mut self, slot: SlotId) -> Result<(), BoardError> {
        let result = BoardManager::clear(self, slot).map(|_| ());
        log_defect(&result);
        result
    }

    fn duplicate(&mut self, source: SlotId) -> Result<DuplicateOutcome, BoardError> {
        let result = BoardManager::duplicate(self, source);
        log_defect(&result);
        result
    }
}

/// Which assignment adapter the board offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Drag-and-drop until touch input is seen, then tap-to-select
    #[default]
    Auto,
    #[serde(rename = "drag")]
    #[value(name = "drag")]
    DragDrop,
    #[serde(rename = "tap")]
    #[value(name = "tap")]
    TapSelect,
}

impl InputMode {
    /// Settle `Auto` against what the input devices have shown so far
    pub fn resolve(self, touch_seen: bool) -> InputMode {
        match self {
            InputMode::Auto if touch_seen => InputMode::TapSelect,
            InputMode::Auto => InputMode::DragDrop,
            other => other,
        }
    }

    /// Pool entries and role chips can be dragged onto slots
    pub fn drag_enabled(self) -> bool {
        self != InputMode::TapSelect
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every call and applies nothing
    #[derive(Debug, Default)]
    pub(crate) struct Recorder {
        pub calls: Vec<(SlotId, Assignment)>,
    }

    impl SlotMutator for Recorder {
        fn assign(&mut self, slot: SlotId, assignment: Assignment) -> Result<(), BoardError> {
            self.calls.push((slot, assignment));
            Ok(())
        }

        fn clear(&mut self, _slot: SlotId) -> Result<(), BoardError> {
            Ok(())
        }

        fn duplicate(&mut self, _source: SlotId) -> Result<DuplicateOutcome, BoardError> {
            Ok(DuplicateOutcome::NothingToCopy)
        }
    }

    #[test]
    fn test_resolve_auto() {
        assert_eq!(InputMode::Auto.resolve(false), InputMode::DragDrop);
        assert_eq!(InputMode::Auto.resolve(true), InputMode::TapSelect);
        assert_eq!(InputMode::DragDrop.resolve(true), InputMode::DragDrop);
        assert_eq!(InputMode::TapSelect.resolve(false), InputMode::TapSelect);
    }

    #[test]
    fn test_input_mode_toml_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: InputMode,
        }
        let parsed: Wrapper = toml::from_str("mode = \"tap\"").unwrap();
        assert_eq!(parsed.mode, InputMode::TapSelect);
        let parsed: Wrapper = toml::from_str("mode = \"drag\"").unwrap();
        assert_eq!(parsed.mode, InputMode::DragDrop);
        let parsed: Wrapper = toml::from_str("mode = \"auto\"").unwrap();
        assert_eq!(parsed.mode, InputMode::Auto);
    }

    #[test]
    fn test_manager_unknown_slot_is_error() {
        let mut manager = BoardManager::default();
        let result = SlotMutator::assign(&mut manager, 99, Assignment::Name("X".into()));
        assert_eq!(result, Err(BoardError::UnknownSlot(99)));
        assert_eq!(manager.history_len(), 1);
    }
}
