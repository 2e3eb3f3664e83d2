//! Board value type
//!
//! A `Board` is never mutated once published: every edit goes through one of
//! the `with_*` methods below, which return a fresh value and leave `self`
//! untouched. The manager keeps old values around as history entries.

use serde::{Deserialize, Serialize};

use crate::image::ImageRef;

use super::BoardError;
use super::slot::{Slot, SlotField, SlotId};

/// A value to put into one field of one slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    Name(String),
    Role(String),
    Image(ImageRef),
}

impl Assignment {
    pub fn field(&self) -> SlotField {
        match self {
            Assignment::Name(_) => SlotField::Name,
            Assignment::Role(_) => SlotField::Role,
            Assignment::Image(_) => SlotField::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    slots: Vec<Slot>,
    #[serde(default)]
    roster_name: String,
    #[serde(default)]
    team_logo: Option<ImageRef>,
}

impl Board {
    pub(super) fn from_slots(slots: Vec<Slot>) -> Self {
        Self {
            slots,
            roster_name: String::new(),
            team_logo: None,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn roster_name(&self) -> &str {
        &self.roster_name
    }

    pub fn team_logo(&self) -> Option<&ImageRef> {
        self.team_logo.as_ref()
    }

    /// Check the structural invariants: exactly one coach slot, unique ids
    pub fn validate(&self) -> Result<(), BoardError> {
        let coaches = self.slots.iter().filter(|s| s.is_coach()).count();
        if coaches != 1 {
            return Err(BoardError::CoachCount(coaches));
        }
        for (idx, slot) in self.slots.iter().enumerate() {
            if self.slots[..idx].iter().any(|other| other.id == slot.id) {
                return Err(BoardError::DuplicateSlotId(slot.id));
            }
        }
        Ok(())
    }

    fn position(&self, id: SlotId) -> Result<usize, BoardError> {
        self.slots
            .iter()
            .position(|slot| slot.id == id)
            .ok_or(BoardError::UnknownSlot(id))
    }

    /// Copy of the board with a single slot replaced by `f(slot)`
    fn with_slot<F>(&self, id: SlotId, f: F) -> Result<Board, BoardError>
    where
        F: FnOnce(&Slot) -> Slot,
    {
        let idx = self.position(id)?;
        let mut next = self.clone();
        next.slots[idx] = f(&self.slots[idx]);
        Ok(next)
    }

    /// Replace only the targeted field of the targeted slot
    pub fn with_assignment(&self, id: SlotId, assignment: Assignment) -> Result<Board, BoardError> {
        self.with_slot(id, |slot| {
            let mut slot = slot.clone();
            match assignment {
                Assignment::Name(name) => slot.assigned_name = Some(name),
                Assignment::Role(role) => slot.assigned_role = Some(role),
                Assignment::Image(image) => slot.assigned_image = Some(image),
            }
            slot
        })
    }

    pub fn with_cleared_slot(&self, id: SlotId) -> Result<Board, BoardError> {
        self.with_slot(id, Slot::cleared)
    }

    /// First empty slot of the same kind as `source`, in registry order
    pub fn duplicate_target(&self, source: SlotId) -> Result<Option<SlotId>, BoardError> {
        let idx = self.position(source)?;
        let kind = self.slots[idx].kind;
        Ok(self
            .slots
            .iter()
            .find(|slot| slot.kind == kind && slot.id != source && !slot.has_name())
            .map(|slot| slot.id))
    }

    /// Copy name, role and image from `source` into `target`
    pub fn with_copied_slot(&self, source: SlotId, target: SlotId) -> Result<Board, BoardError> {
        let from = self.slots[self.position(source)?].clone();
        self.with_slot(target, |slot| Slot {
            assigned_name: from.assigned_name.clone(),
            assigned_role: from.assigned_role.clone(),
            assigned_image: from.assigned_image.clone(),
            ..slot.clone()
        })
    }

    /// Every slot cleared plus roster metadata back to defaults
    pub fn reset(&self) -> Board {
        Board {
            slots: self.slots.iter().map(Slot::cleared).collect(),
            roster_name: String::new(),
            team_logo: None,
        }
    }

    pub fn with_roster_name(&self, name: String) -> Board {
        Board {
            roster_name: name,
            ..self.clone()
        }
    }

    pub fn with_team_logo(&self, logo: Option<ImageRef>) -> Board {
        Board {
            team_logo: logo,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::slot::initial_board;

    #[test]
    fn test_assignment_touches_only_target_field() {
        let board = initial_board()
            .with_assignment(1, Assignment::Role("SNIPER".into()))
            .unwrap();
        let next = board.with_assignment(1, Assignment::Name("BLACK".into())).unwrap();

        let slot = next.slot(1).unwrap();
        assert_eq!(slot.assigned_name.as_deref(), Some("BLACK"));
        assert_eq!(slot.assigned_role.as_deref(), Some("SNIPER"));
        // previous value untouched
        assert_eq!(board.slot(1).unwrap().assigned_name, None);
        assert_eq!(next.slot(2), board.slot(2));
    }

    #[test]
    fn test_unknown_slot_is_error() {
        let board = initial_board();
        assert_eq!(
            board.with_assignment(42, Assignment::Name("X".into())),
            Err(BoardError::UnknownSlot(42))
        );
        assert_eq!(board.with_cleared_slot(42), Err(BoardError::UnknownSlot(42)));
        assert_eq!(board.duplicate_target(42), Err(BoardError::UnknownSlot(42)));
    }

    #[test]
    fn test_duplicate_target_same_kind_first_empty() {
        let board = initial_board()
            .with_assignment(1, Assignment::Name("FNX".into()))
            .unwrap()
            .with_assignment(2, Assignment::Name("GUIME".into()))
            .unwrap();
        assert_eq!(board.duplicate_target(2).unwrap(), Some(3));
        // coach has no other coach slot
        assert_eq!(board.duplicate_target(0).unwrap(), None);
    }

    #[test]
    fn test_reset_clears_metadata() {
        let board = initial_board()
            .with_assignment(0, Assignment::Name("COACH BRN".into()))
            .unwrap()
            .with_roster_name("LINE A".into());
        let reset = board.reset();
        assert_eq!(reset, initial_board());
    }

    #[test]
    fn test_validate() {
        assert_eq!(initial_board().validate(), Ok(()));

        let mut slots = initial_board().slots().to_vec();
        slots.remove(0);
        assert_eq!(Board::from_slots(slots).validate(), Err(BoardError::CoachCount(0)));

        let mut slots = initial_board().slots().to_vec();
        slots[2].id = 1;
        assert_eq!(
            Board::from_slots(slots).validate(),
            Err(BoardError::DuplicateSlotId(1))
        );
    }
}
