//! Roster board domain: slot registry, role catalog, board values, history
//! and the state manager that ties them together.

pub mod history;
pub mod manager;
pub mod pool;
pub mod roles;
pub mod slot;
pub mod state;

pub use history::Revision;
pub use manager::{BoardManager, DuplicateOutcome, ImageTicket};
pub use pool::PlayerPool;
pub use roles::{find_role_by_label, roles_list};
pub use slot::{BoardLayout, Slot, SlotId, SlotSection};
pub use state::{Assignment, Board};

/// Errors raised by board edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// An operation referenced a slot id that is not on the board (a defect)
    #[error("slot {0} does not exist on this board")]
    UnknownSlot(SlotId),

    /// Duplicate found no empty slot of the same kind
    #[error("no empty slot available to duplicate slot {slot} into")]
    NoAvailableSlot { slot: SlotId },

    #[error("board must have exactly one coach slot, found {0}")]
    CoachCount(usize),

    #[error("slot id {0} appears more than once")]
    DuplicateSlotId(SlotId),
}

/// Destination of an asynchronously decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    Slot(SlotId),
    Logo,
}
