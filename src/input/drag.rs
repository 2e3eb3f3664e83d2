use tracing::debug;

use crate::board::{Assignment, BoardError, SlotId};

use super::SlotMutator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Name,
    Role,
}

/// What a drag gesture carries from the pool or role palette to a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    pub kind: PayloadKind,
    pub value: String,
}

impl DragPayload {
    pub fn name(value: impl Into<String>) -> Self {
        Self { kind: PayloadKind::Name, value: value.into() }
    }

    pub fn role(value: impl Into<String>) -> Self {
        Self { kind: PayloadKind::Role, value: value.into() }
    }

    fn into_assignment(self) -> Assignment {
        match self.kind {
            PayloadKind::Name => Assignment::Name(self.value),
            PayloadKind::Role => Assignment::Role(self.value),
        }
    }
}

/// Drop `payload` on `slot`, overwriting whatever the matching field held
pub fn drop_on(
    mutator: &mut impl SlotMutator,
    slot: SlotId,
    payload: DragPayload,
) -> Result<(), BoardError> {
    debug!(slot, kind = ?payload.kind, value = %payload.value, "Drop on slot");
    mutator.assign(slot, payload.into_assignment())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardManager;
    use crate::input::tests::Recorder;

    #[test]
    fn test_payload_kind_selects_field() {
        let mut recorder = Recorder::default();
        drop_on(&mut recorder, 1, DragPayload::name("BLACK")).unwrap();
        drop_on(&mut recorder, 1, DragPayload::role("CPT")).unwrap();
        assert_eq!(
            recorder.calls,
            vec![
                (1, Assignment::Name("BLACK".into())),
                (1, Assignment::Role("CPT".into())),
            ]
        );
    }

    #[test]
    fn test_name_drop_keeps_role() {
        let mut manager = BoardManager::default();
        drop_on(&mut manager, 2, DragPayload::role("SNIPER")).unwrap();
        drop_on(&mut manager, 2, DragPayload::name("BLACK")).unwrap();
        drop_on(&mut manager, 2, DragPayload::name("WHITE")).unwrap();

        let slot = manager.current().slot(2).unwrap();
        assert_eq!(slot.assigned_name.as_deref(), Some("WHITE"));
        assert_eq!(slot.assigned_role.as_deref(), Some("SNIPER"));
        assert_eq!(manager.history_len(), 4);
    }

    #[test]
    fn test_drop_on_coach_overwrites_role() {
        let mut manager = BoardManager::default();
        drop_on(&mut manager, 0, DragPayload::role("CPT")).unwrap();
        assert_eq!(manager.current().slot(0).unwrap().assigned_role.as_deref(), Some("CPT"));
    }

    #[test]
    fn test_drop_on_unknown_slot() {
        let mut manager = BoardManager::default();
        assert_eq!(
            drop_on(&mut manager, 42, DragPayload::name("BLACK")),
            Err(BoardError::UnknownSlot(42))
        );
        assert_eq!(manager.history_len(), 1);
    }
}
