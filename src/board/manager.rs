//! Board state manager: owns the live board and its undo history
//!
//! Every forward edit builds a new `Board` and pushes it onto the history in
//! one step, so a failed edit never leaves a half-applied board behind.

use tracing::{debug, error, info, warn};

use crate::image::ImageRef;

use super::history::{History, Revision};
use super::slot::{BoardLayout, Slot, SlotId, initial_board};
use super::state::{Assignment, Board};
use super::{BoardError, ImageTarget};

/// Result of a successful `duplicate` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateOutcome {
    /// Source content was copied into `target`
    Copied { target: SlotId },
    /// Source slot has no name, nothing happened
    NothingToCopy,
}

/// Content of an image target, compared when an async image completes
#[derive(Debug, Clone, PartialEq)]
enum TargetContent {
    Slot(Slot),
    Logo(Option<ImageRef>),
}

/// Issued when an image file is picked, redeemed by `apply_async`
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTicket {
    pub target: ImageTarget,
    /// Board revision live when the file was picked
    pub requested_at: Revision,
    expected: TargetContent,
}

#[derive(Debug)]
pub struct BoardManager {
    history: History,
}

impl BoardManager {
    pub fn new(layout: BoardLayout) -> Self {
        info!(starters = layout.starters, reserves = layout.reserves, "Creating board manager");
        Self {
            history: History::new(layout.initial_board()),
        }
    }

    pub fn current(&self) -> &Board {
        self.history.current()
    }

    /// Revision of the board currently displayed
    pub fn revision(&self) -> Revision {
        self.history.current_revision()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    fn commit(&mut self, board: Board) -> &Board {
        self.history.push(board);
        debug!(
            revision = self.history.current_revision(),
            cursor = self.history.cursor(),
            "Committed board edit"
        );
        self.history.current()
    }

    pub fn assign(&mut self, slot: SlotId, assignment: Assignment) -> Result<&Board, BoardError> {
        let field = assignment.field();
        let next = self.current().with_assignment(slot, assignment)?;
        debug!(slot, field = ?field, "Assigned slot field");
        Ok(self.commit(next))
    }

    pub fn clear(&mut self, slot: SlotId) -> Result<&Board, BoardError> {
        let next = self.current().with_cleared_slot(slot)?;
        debug!(slot, "Cleared slot");
        Ok(self.commit(next))
    }

    pub fn duplicate(&mut self, source: SlotId) -> Result<DuplicateOutcome, BoardError> {
        let board = self.current();
        let has_name = board
            .slot(source)
            .ok_or(BoardError::UnknownSlot(source))?
            .has_name();
        if !has_name {
            return Ok(DuplicateOutcome::NothingToCopy);
        }

        let Some(target) = board.duplicate_target(source)? else {
            warn!(source, "No empty slot available for duplicate");
            return Err(BoardError::NoAvailableSlot { slot: source });
        };

        let next = board.with_copied_slot(source, target)?;
        debug!(source, target, "Duplicated slot");
        self.commit(next);
        Ok(DuplicateOutcome::Copied { target })
    }

    pub fn undo(&mut self) -> &Board {
        if self.history.undo() {
            debug!(cursor = self.history.cursor(), "Undo");
        }
        self.current()
    }

    pub fn redo(&mut self) -> &Board {
        if self.history.redo() {
            debug!(cursor = self.history.cursor(), "Redo");
        }
        self.current()
    }

    /// Clear every slot and the roster metadata as a single history entry
    pub fn reset_all(&mut self) -> &Board {
        let next = self.current().reset();
        info!("Reset whole board");
        self.commit(next)
    }

    pub fn set_roster_name(&mut self, name: impl Into<String>) -> &Board {
        let next = self.current().with_roster_name(name.into());
        self.commit(next)
    }

    pub fn set_team_logo(&mut self, logo: Option<ImageRef>) -> &Board {
        let next = self.current().with_team_logo(logo);
        self.commit(next)
    }

    /// Replace the live board (e.g. from a snapshot) and restart history from it
    pub fn load_board(&mut self, board: Board) -> Result<&Board, BoardError> {
        board.validate()?;
        self.history.reset_to(board);
        info!(revision = self.history.current_revision(), "Loaded board, history reset");
        Ok(self.current())
    }

    fn target_content(&self, target: ImageTarget) -> Result<TargetContent, BoardError> {
        match target {
            ImageTarget::Slot(slot) => self
                .current()
                .slot(slot)
                .cloned()
                .map(TargetContent::Slot)
                .ok_or(BoardError::UnknownSlot(slot)),
            ImageTarget::Logo => Ok(TargetContent::Logo(self.current().team_logo().cloned())),
        }
    }

    /// Record what `target` holds right now so a later image result can tell
    /// whether it is still wanted
    pub fn image_ticket(&self, target: ImageTarget) -> Result<ImageTicket, BoardError> {
        let expected = self.target_content(target).inspect_err(|e| {
            error!(image_target = ?target, error = %e, "Image requested for a missing slot");
        })?;
        Ok(ImageTicket { target, requested_at: self.revision(), expected })
    }

    /// Apply a decoded image for `ticket`.
    ///
    /// Returns `Ok(false)` without touching anything when the target no longer
    /// holds what it held at request time. Edits to other slots do not count.
    pub fn apply_async(&mut self, ticket: &ImageTicket, image: ImageRef) -> Result<bool, BoardError> {
        let current = self.target_content(ticket.target)?;
        if current != ticket.expected {
            warn!(
                image_target = ?ticket.target,
                requested_at = ticket.requested_at,
                current = self.revision(),
                "Discarding stale image result"
            );
            return Ok(false);
        }
        match ticket.target {
            ImageTarget::Slot(slot) => {
                self.assign(slot, Assignment::Image(image))?;
            }
            ImageTarget::Logo => {
                self.set_team_logo(Some(image));
            }
        }
        Ok(true)
    }
}

impl Default for BoardManager {
    fn default() -> Self {
        Self { history: History::new(initial_board()) }
    }
}
