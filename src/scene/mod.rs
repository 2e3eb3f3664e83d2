//! Board scene: the board laid out as a flat list of drawable elements
//!
//! The GUI paints a `Scene` and routes pointer input through its hit targets;
//! the exporter rasterizes the same `Scene` minus every element flagged
//! `interaction_only`. Coordinates are logical points with the origin at the
//! top-left corner of the board region.

mod layout;

pub use layout::build_scene;

use crate::board::SlotId;
use crate::color::HexColor;
use crate::image::ImageRef;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[cfg(test)]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn shrink(&self, by: f32) -> Rect {
        Rect::new(
            self.x + by,
            self.y + by,
            (self.width - 2.0 * by).max(0.0),
            (self.height - 2.0 * by).max(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Fill {
        rect: Rect,
        color: HexColor,
    },
    Stroke {
        rect: Rect,
        color: HexColor,
        width: f32,
    },
    Text {
        rect: Rect,
        text: String,
        size: f32,
        color: HexColor,
        align: TextAlign,
    },
    Image {
        rect: Rect,
        image: ImageRef,
    },
}

impl Shape {
    pub fn rect(&self) -> Rect {
        match self {
            Shape::Fill { rect, .. }
            | Shape::Stroke { rect, .. }
            | Shape::Text { rect, .. }
            | Shape::Image { rect, .. } => *rect,
        }
    }
}

/// What a pointer interaction on an element means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// Whole card: drop zone for drag payloads
    SlotCard(SlotId),
    /// Name tag and role badge: tap-to-select activation
    SlotInfo(SlotId),
    /// Portrait region: image file affordance
    SlotIcon(SlotId),
    ClearSlot(SlotId),
    DuplicateSlot(SlotId),
    Logo,
    RosterName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    /// Buttons, hints and hover affordances: drawn on screen, never exported
    pub interaction_only: bool,
    pub hit: Option<HitTarget>,
}

impl Element {
    pub fn visual(shape: Shape) -> Self {
        Self { shape, interaction_only: false, hit: None }
    }

    pub fn control(shape: Shape) -> Self {
        Self { shape, interaction_only: true, hit: None }
    }

    pub fn with_hit(mut self, hit: HitTarget) -> Self {
        self.hit = Some(hit);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub elements: Vec<Element>,
}

impl Scene {
    /// Elements that make it into a static capture
    pub fn exported(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.interaction_only)
    }

    /// Elements carrying a hit target, topmost first
    pub fn hit_targets(&self) -> impl Iterator<Item = (HitTarget, Rect)> + '_ {
        self.elements
            .iter()
            .rev()
            .filter_map(|e| e.hit.map(|hit| (hit, e.shape.rect())))
    }

    /// Topmost hit target under a point
    pub fn hit_test(&self, x: f32, y: f32) -> Option<HitTarget> {
        self.hit_targets()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(hit, _)| hit)
    }

    #[cfg(test)]
    pub fn rect_of(&self, target: HitTarget) -> Option<Rect> {
        self.hit_targets()
            .find(|(hit, _)| *hit == target)
            .map(|(_, rect)| rect)
    }
}
