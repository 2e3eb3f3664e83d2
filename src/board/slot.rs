//! Slot registry: the fixed structure of a roster board
//!
//! A board always holds one coach slot followed by the starters and the
//! reserves. Slot ids are assigned here, in registry order, and never change
//! for the lifetime of a board definition.

use serde::{Deserialize, Serialize};

use crate::constants::board::{
    COACH_LABEL, DEFAULT_RESERVES, DEFAULT_STARTERS, MAX_RESERVES, MAX_STARTERS,
    RESERVE_LABEL_PREFIX, STARTER_LABEL_PREFIX,
};
use crate::image::ImageRef;

use super::state::Board;

pub type SlotId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotKind {
    Coach,
    Player,
}

/// Where a slot is drawn on the board (layout only, no effect on editing rules)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotSection {
    Coach,
    Starter,
    Reserve,
}

/// The editable fields of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotField {
    Name,
    Role,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub kind: SlotKind,
    pub section: SlotSection,
    pub label: String,
    #[serde(default)]
    pub assigned_name: Option<String>,
    #[serde(default)]
    pub assigned_role: Option<String>,
    #[serde(default)]
    pub assigned_image: Option<ImageRef>,
}

impl Slot {
    fn new(id: SlotId, kind: SlotKind, section: SlotSection, label: String) -> Self {
        Self {
            id,
            kind,
            section,
            label,
            assigned_name: None,
            assigned_role: Self::default_role(kind),
            assigned_image: None,
        }
    }

    /// Role a slot holds when empty: coach slots always fall back to "COACH"
    pub fn default_role(kind: SlotKind) -> Option<String> {
        match kind {
            SlotKind::Coach => Some(COACH_LABEL.to_string()),
            SlotKind::Player => None,
        }
    }

    pub fn is_coach(&self) -> bool {
        self.kind == SlotKind::Coach
    }

    pub fn has_name(&self) -> bool {
        self.assigned_name.is_some()
    }

    /// Copy of this slot with all content reset to the empty state
    pub fn cleared(&self) -> Self {
        Self {
            assigned_name: None,
            assigned_role: Self::default_role(self.kind),
            assigned_image: None,
            ..self.clone()
        }
    }
}

/// Number of starter and reserve slots on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    #[serde(default = "default_starters")]
    pub starters: u8,
    #[serde(default = "default_reserves")]
    pub reserves: u8,
}

fn default_starters() -> u8 {
    DEFAULT_STARTERS
}

fn default_reserves() -> u8 {
    DEFAULT_RESERVES
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            starters: DEFAULT_STARTERS,
            reserves: DEFAULT_RESERVES,
        }
    }
}

impl BoardLayout {
    /// Clamp counts into the supported range, returning true if anything changed
    pub fn clamp(&mut self) -> bool {
        let starters = self.starters.clamp(1, MAX_STARTERS);
        let reserves = self.reserves.min(MAX_RESERVES);
        let changed = starters != self.starters || reserves != self.reserves;
        self.starters = starters;
        self.reserves = reserves;
        changed
    }

    pub fn slot_count(&self) -> usize {
        1 + self.starters as usize + self.reserves as usize
    }

    /// Build the canonical empty board for this layout
    pub fn initial_board(&self) -> Board {
        let mut slots = Vec::with_capacity(self.slot_count());
        slots.push(Slot::new(
            0,
            SlotKind::Coach,
            SlotSection::Coach,
            COACH_LABEL.to_string(),
        ));

        let mut next_id: SlotId = 1;
        for n in 1..=self.starters {
            slots.push(Slot::new(
                next_id,
                SlotKind::Player,
                SlotSection::Starter,
                format!("{STARTER_LABEL_PREFIX} {n}"),
            ));
            next_id += 1;
        }
        for n in 1..=self.reserves {
            slots.push(Slot::new(
                next_id,
                SlotKind::Player,
                SlotSection::Reserve,
                format!("{RESERVE_LABEL_PREFIX} {n}"),
            ));
            next_id += 1;
        }

        Board::from_slots(slots)
    }
}

/// The canonical empty board for the default layout
pub fn initial_board() -> Board {
    BoardLayout::default().initial_board()
}
