use crate::board::{Board, Slot, SlotId, SlotSection, find_role_by_label};
use crate::color::{HexColor, palette};

use super::{Element, HitTarget, Rect, Scene, Shape, TextAlign};

/// Fixed board geometry in logical points
pub mod metrics {
    pub const BOARD_WIDTH: f32 = 1000.0;
    pub const PADDING: f32 = 32.0;
    pub const HEADER_HEIGHT: f32 = 72.0;
    pub const LOGO_SIZE: f32 = 64.0;
    pub const CARD_WIDTH: f32 = 160.0;
    pub const CARD_HEIGHT: f32 = 224.0;
    pub const CARD_GAP: f32 = 28.0;
    pub const ROW_GAP: f32 = 44.0;
    pub const BADGE_HEIGHT: f32 = 24.0;
    pub const NAME_TAG_HEIGHT: f32 = 64.0;
    pub const BUTTON_SIZE: f32 = 24.0;
    pub const SECTION_LABEL_HEIGHT: f32 = 28.0;
    /// Names longer than this get the small font
    pub const LONG_NAME_CHARS: usize = 12;
}

use metrics::*;

const ROLE_PLACEHOLDER: &str = "ARRASTE A FUNÇÃO";
const NAME_PLACEHOLDER: &str = "ARRASTE NOME";
const ROSTER_NAME_PLACEHOLDER: &str = "NOME DO ELENCO";
const RESERVES_CAPTION: &str = "RESERVAS";

fn text(rect: Rect, text: impl Into<String>, size: f32, color: HexColor, align: TextAlign) -> Shape {
    Shape::Text {
        rect,
        text: text.into(),
        size,
        color,
        align,
    }
}

/// Lay out `board` as a scene. `active` highlights the tap-selected slot.
pub fn build_scene(board: &Board, active: Option<SlotId>) -> Scene {
    let mut elements = Vec::new();
    let mut y = PADDING;

    header(board, y, &mut elements);
    y += HEADER_HEIGHT + ROW_GAP;

    let coaches: Vec<&Slot> = board.slots().iter().filter(|s| s.section == SlotSection::Coach).collect();
    let starters: Vec<&Slot> = board.slots().iter().filter(|s| s.section == SlotSection::Starter).collect();
    let reserves: Vec<&Slot> = board.slots().iter().filter(|s| s.section == SlotSection::Reserve).collect();

    y = card_rows(&coaches, y, active, &mut elements);
    y = card_rows(&starters, y, active, &mut elements);

    if !reserves.is_empty() {
        elements.push(Element::visual(text(
            Rect::new(PADDING, y, BOARD_WIDTH - 2.0 * PADDING, SECTION_LABEL_HEIGHT),
            RESERVES_CAPTION,
            14.0,
            palette::ZINC_500,
            TextAlign::Center,
        )));
        y += SECTION_LABEL_HEIGHT + BADGE_HEIGHT;
        y = card_rows(&reserves, y, active, &mut elements);
    }

    Scene {
        width: BOARD_WIDTH,
        height: y - ROW_GAP + PADDING,
        elements,
    }
}

fn header(board: &Board, y: f32, out: &mut Vec<Element>) {
    let logo = Rect::new(PADDING, y + (HEADER_HEIGHT - LOGO_SIZE) / 2.0, LOGO_SIZE, LOGO_SIZE);
    out.push(Element::visual(Shape::Fill { rect: logo, color: palette::ZINC_900 }));
    match board.team_logo() {
        Some(image) => out.push(
            Element::visual(Shape::Image { rect: logo, image: image.clone() }).with_hit(HitTarget::Logo),
        ),
        None => {
            out.push(Element::visual(Shape::Stroke { rect: logo, color: palette::ZINC_800, width: 1.0 }));
            out.push(
                Element::control(text(logo, "+ LOGO", 12.0, palette::ZINC_600, TextAlign::Center))
                    .with_hit(HitTarget::Logo),
            );
        }
    }

    let name_rect = Rect::new(
        logo.right() + 20.0,
        y,
        BOARD_WIDTH - logo.right() - 20.0 - PADDING,
        HEADER_HEIGHT,
    );
    let name = board.roster_name().trim();
    if name.is_empty() {
        out.push(
            Element::control(text(name_rect, ROSTER_NAME_PLACEHOLDER, 32.0, palette::ZINC_600, TextAlign::Left))
                .with_hit(HitTarget::RosterName),
        );
    } else {
        out.push(
            Element::visual(text(name_rect, name.to_uppercase(), 32.0, palette::WHITE, TextAlign::Left))
                .with_hit(HitTarget::RosterName),
        );
    }
}

/// Lay cards out centered, wrapping to as many rows as needed. Returns the y
/// below the last row.
fn card_rows(slots: &[&Slot], mut y: f32, active: Option<SlotId>, out: &mut Vec<Element>) -> f32 {
    if slots.is_empty() {
        return y;
    }
    let usable = BOARD_WIDTH - 2.0 * PADDING;
    let per_row = (((usable + CARD_GAP) / (CARD_WIDTH + CARD_GAP)) as usize).max(1);

    for row in slots.chunks(per_row) {
        let row_width = row.len() as f32 * CARD_WIDTH + (row.len() - 1) as f32 * CARD_GAP;
        let mut x = (BOARD_WIDTH - row_width) / 2.0;
        for slot in row {
            card(slot, Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT), active == Some(slot.id), out);
            x += CARD_WIDTH + CARD_GAP;
        }
        y += CARD_HEIGHT + ROW_GAP;
    }
    y
}

fn card(slot: &Slot, rect: Rect, active: bool, out: &mut Vec<Element>) {
    let named = slot.assigned_name.as_deref();
    let accent = slot
        .assigned_role
        .as_deref()
        .and_then(find_role_by_label)
        .map(|role| role.category.accent());

    // body
    out.push(Element::visual(Shape::Fill { rect, color: palette::ZINC_950 }).with_hit(HitTarget::SlotCard(slot.id)));
    out.push(Element::visual(Shape::Stroke {
        rect,
        color: if named.is_some() { palette::YELLOW_500 } else { palette::ZINC_800 },
        width: 2.0,
    }));

    // portrait
    let portrait = Rect::new(
        rect.x + 8.0,
        rect.y + BADGE_HEIGHT / 2.0 + 8.0,
        rect.width - 16.0,
        rect.height - NAME_TAG_HEIGHT - BADGE_HEIGHT / 2.0 - 16.0,
    );
    match &slot.assigned_image {
        Some(image) => out.push(
            Element::visual(Shape::Image { rect: portrait, image: image.clone() })
                .with_hit(HitTarget::SlotIcon(slot.id)),
        ),
        None => {
            out.push(
                Element::visual(text(portrait, slot.label.clone(), 16.0, palette::ZINC_800, TextAlign::Center))
                    .with_hit(HitTarget::SlotIcon(slot.id)),
            );
            out.push(Element::control(text(
                Rect::new(portrait.right() - 28.0, portrait.y, 28.0, 24.0),
                "📷",
                14.0,
                palette::ZINC_600,
                TextAlign::Center,
            )));
        }
    }

    // name tag
    let tag = Rect::new(rect.x, rect.bottom() - NAME_TAG_HEIGHT, rect.width, NAME_TAG_HEIGHT);
    out.push(
        Element::visual(Shape::Fill {
            rect: tag.shrink(2.0),
            color: if named.is_some() { palette::ZINC_900 } else { palette::ZINC_950 },
        })
        .with_hit(HitTarget::SlotInfo(slot.id)),
    );
    match named {
        Some(name) => {
            let size = if name.chars().count() > LONG_NAME_CHARS { 14.0 } else { 20.0 };
            out.push(Element::visual(text(tag, name, size, palette::WHITE, TextAlign::Center)));
            let clear = Rect::new(
                tag.right() - BUTTON_SIZE - 4.0,
                tag.y + (tag.height - BUTTON_SIZE) / 2.0,
                BUTTON_SIZE,
                BUTTON_SIZE,
            );
            let duplicate = Rect::new(tag.x + 4.0, clear.y, BUTTON_SIZE, BUTTON_SIZE);
            out.push(Element::control(Shape::Fill { rect: clear, color: palette::ZINC_800 }));
            out.push(
                Element::control(text(clear, "🗑", 12.0, palette::RED_500, TextAlign::Center))
                    .with_hit(HitTarget::ClearSlot(slot.id)),
            );
            out.push(Element::control(Shape::Fill { rect: duplicate, color: palette::ZINC_800 }));
            out.push(
                Element::control(text(duplicate, "📋", 12.0, palette::ZINC_500, TextAlign::Center))
                    .with_hit(HitTarget::DuplicateSlot(slot.id)),
            );
        }
        None => out.push(Element::control(text(
            tag,
            NAME_PLACEHOLDER,
            11.0,
            palette::ZINC_600,
            TextAlign::Center,
        ))),
    }

    // role badge, straddling the top edge
    let badge = Rect::new(rect.x + 16.0, rect.y - BADGE_HEIGHT / 2.0, rect.width - 32.0, BADGE_HEIGHT);
    let (badge_fill, badge_stroke) = match accent {
        Some(color) => (color.with_alpha(0x33), color),
        None => (palette::ZINC_950, palette::ZINC_800),
    };
    out.push(
        Element::visual(Shape::Fill { rect: badge, color: badge_fill }).with_hit(HitTarget::SlotInfo(slot.id)),
    );
    out.push(Element::visual(Shape::Stroke { rect: badge, color: badge_stroke, width: 1.0 }));
    match slot.assigned_role.as_deref() {
        Some(role) => out.push(Element::visual(text(
            badge,
            role,
            11.0,
            accent.unwrap_or(palette::ZINC_500),
            TextAlign::Center,
        ))),
        None => out.push(Element::control(text(
            badge,
            ROLE_PLACEHOLDER,
            9.0,
            palette::ZINC_600,
            TextAlign::Center,
        ))),
    }

    if active {
        out.push(Element::control(Shape::Stroke {
            rect: rect.shrink(-4.0),
            color: palette::YELLOW_500,
            width: 3.0,
        }));
    }
}
