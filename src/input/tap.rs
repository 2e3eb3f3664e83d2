use tracing::debug;

use crate::board::{Assignment, BoardError, SlotId};

use super::SlotMutator;

/// Tap-to-select state: at most one active slot at a time
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TapSelect {
    active: Option<SlotId>,
}

impl TapSelect {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<SlotId> {
        self.active
    }

    /// Open the selection surface for `slot`, replacing any previous selection
    pub fn activate(&mut self, slot: SlotId) {
        debug!(slot, previous = ?self.active, "Activated slot");
        self.active = Some(slot);
    }

    /// Assign a name to the active slot and close the selection
    pub fn pick_name(&mut self, mutator: &mut impl SlotMutator, name: &str) -> Result<(), BoardError> {
        let Some(slot) = self.active else {
            return Ok(());
        };
        let result = mutator.assign(slot, Assignment::Name(name.to_string()));
        self.active = None;
        result
    }

    /// Assign a role to the active slot; the selection stays open
    pub fn pick_role(&mut self, mutator: &mut impl SlotMutator, role: &str) -> Result<(), BoardError> {
        let Some(slot) = self.active else {
            return Ok(());
        };
        mutator.assign(slot, Assignment::Role(role.to_string()))
    }

    pub fn dismiss(&mut self) {
        if let Some(slot) = self.active.take() {
            debug!(slot, "Dismissed slot selection");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardManager;
    use crate::input::tests::Recorder;

    #[test]
    fn test_pick_name_clears_selection() {
        let mut tap = TapSelect::new();
        let mut recorder = Recorder::default();
        tap.activate(3);
        tap.pick_name(&mut recorder, "BLACK").unwrap();
        assert_eq!(tap.active(), None);
        assert_eq!(recorder.calls, vec![(3, Assignment::Name("BLACK".into()))]);
    }

    #[test]
    fn test_pick_role_keeps_selection() {
        let mut tap = TapSelect::new();
        let mut manager = BoardManager::default();
        tap.activate(3);
        tap.pick_role(&mut manager, "CPT").unwrap();
        tap.pick_role(&mut manager, "SNIPER").unwrap();
        assert_eq!(tap.active(), Some(3));
        tap.pick_name(&mut manager, "BLACK").unwrap();

        let slot = manager.current().slot(3).unwrap();
        assert_eq!(slot.assigned_role.as_deref(), Some("SNIPER"));
        assert_eq!(slot.assigned_name.as_deref(), Some("BLACK"));
        assert_eq!(tap.active(), None);
    }

    #[test]
    fn test_single_active_slot() {
        let mut tap = TapSelect::new();
        tap.activate(1);
        tap.activate(4);
        assert_eq!(tap.active(), Some(4));
    }

    #[test]
    fn test_dismiss_does_not_mutate() {
        let mut tap = TapSelect::new();
        let mut recorder = Recorder::default();
        tap.activate(2);
        tap.dismiss();
        assert_eq!(tap.active(), None);
        tap.pick_name(&mut recorder, "BLACK").unwrap();
        tap.pick_role(&mut recorder, "CPT").unwrap();
        assert!(recorder.calls.is_empty());
    }

    #[test]
    fn test_failed_name_pick_still_closes() {
        let mut tap = TapSelect::new();
        let mut manager = BoardManager::default();
        tap.activate(77);
        assert_eq!(tap.pick_name(&mut manager, "X"), Err(BoardError::UnknownSlot(77)));
        assert_eq!(tap.active(), None);
        assert_eq!(manager.history_len(), 1);
    }
}
