//! Linear undo/redo log of board values with a cursor

use super::state::Board;

pub type Revision = u64;

#[derive(Debug, Clone)]
struct Entry {
    revision: Revision,
    board: Board,
}

/// Append-only log of boards plus the index of the displayed one.
///
/// Invariant: `cursor < entries.len()`, and `entries` is never empty.
/// Revisions are handed out from a counter that only grows, so a revision
/// number identifies one history entry for the life of the `History`.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Entry>,
    cursor: usize,
    next_revision: Revision,
}

impl History {
    pub fn new(initial: Board) -> Self {
        Self {
            entries: vec![Entry { revision: 0, board: initial }],
            cursor: 0,
            next_revision: 1,
        }
    }

    pub fn current(&self) -> &Board {
        &self.entries[self.cursor].board
    }

    pub fn current_revision(&self) -> Revision {
        self.entries[self.cursor].revision
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    fn allocate_revision(&mut self) -> Revision {
        let revision = self.next_revision;
        self.next_revision += 1;
        revision
    }

    /// Drop everything after the cursor, append `board` and move onto it
    pub fn push(&mut self, board: Board) -> &Board {
        self.entries.truncate(self.cursor + 1);
        let revision = self.allocate_revision();
        self.entries.push(Entry { revision, board });
        self.cursor = self.entries.len() - 1;
        self.current()
    }

    /// Step back one entry. Returns false when already at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one entry. Returns false when already at the newest entry.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Replace the whole log with a single entry holding `board`
    pub fn reset_to(&mut self, board: Board) {
        let revision = self.allocate_revision();
        self.entries = vec![Entry { revision, board }];
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::slot::initial_board;

    fn named(name: &str) -> Board {
        initial_board().with_roster_name(name.to_string())
    }

    #[test]
    fn test_push_advances_cursor() {
        let mut history = History::new(initial_board());
        history.push(named("B1"));
        history.push(named("B2"));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().roster_name(), "B2");
    }

    #[test]
    fn test_undo_redo_bounds() {
        let mut history = History::new(initial_board());
        assert!(!history.undo());
        assert!(!history.redo());

        history.push(named("B1"));
        assert!(history.undo());
        assert_eq!(history.current(), &initial_board());
        assert!(!history.undo());
        assert!(history.redo());
        assert_eq!(history.current().roster_name(), "B1");
        assert!(!history.redo());
    }

    #[test]
    fn test_push_after_undo_discards_redo_tail() {
        let mut history = History::new(initial_board());
        history.push(named("B1"));
        history.push(named("B2"));
        history.undo();
        history.push(named("B3"));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert!(!history.redo());
        assert_eq!(history.current().roster_name(), "B3");
    }

    #[test]
    fn test_revisions_never_reused() {
        let mut history = History::new(initial_board());
        history.push(named("B1"));
        let first = history.current_revision();
        history.undo();
        history.push(named("B2"));
        assert_ne!(history.current_revision(), first);

        history.reset_to(named("LOADED"));
        assert_eq!(history.len(), 1);
        assert!(history.current_revision() > first);
    }
}
