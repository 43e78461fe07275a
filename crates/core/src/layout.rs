//! Layout module - declarative tableau descriptions and the initial deal.
//!
//! A [`TableauLayout`] comes from an external layout source (JSON in the
//! assets crate) and is immutable after load. [`deal_mine`] turns it plus a
//! shuffled draw pile into the initial mine: one card per slot, in slot
//! order, with occluder lists wired in a second pass because a later slot
//! may occlude an earlier one.

use std::collections::HashMap;

use arrayvec::ArrayVec;
use thiserror::Error;

use prospector_types::{
    CardId, CardState, Vec2, DECK_SIZE, DISCARD_DEPTH_BASE, DISCARD_DEPTH_STEP, DRAW_DEPTH_STEP,
    TARGET_DEPTH,
};

use crate::deck::{Card, SlotInfo};

/// Where and how deep a card renders. The session owns placements and
/// rewrites them on every pile transition; the presentation layer only
/// reads them out of snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    /// Sort order; larger values render above smaller ones.
    pub depth: i32,
}

/// One mine slot from the layout description.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSlot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Whether the card dealt here starts face-up.
    pub face_up: bool,
    /// Tableau row; doubles as the slot's depth order.
    pub row: u8,
    /// Slot ids whose cards keep this slot's card face-down.
    pub hidden_by: Vec<u32>,
}

/// Anchor for the draw or discard pile.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PileAnchor {
    pub x: f32,
    pub y: f32,
    /// Per-card x offset so the player can see how many cards remain.
    pub stagger_x: f32,
}

/// Complete tableau description: mine slots plus pile anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct TableauLayout {
    /// Scales slot and anchor positions into layout units.
    pub multiplier: Vec2,
    pub slots: Vec<LayoutSlot>,
    pub draw_pile: PileAnchor,
    pub discard_pile: PileAnchor,
}

/// Structural problems in a layout description. Raised at load time; a
/// round never starts from a malformed layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no slots")]
    Empty,
    #[error("layout has {0} slots, more than the {max} a deck can fill", max = DECK_SIZE - 1)]
    TooManySlots(usize),
    #[error("duplicate slot id {0}")]
    DuplicateSlotId(u32),
    #[error("slot {slot} lists itself as an occluder")]
    SelfOccluder { slot: u32 },
    #[error("slot {slot} lists unknown occluder slot id {occluder}")]
    UnknownOccluder { slot: u32, occluder: u32 },
}

/// Problems while dealing the mine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DealError {
    #[error("draw pile exhausted while dealing slot {slot}")]
    EmptyDrawPile { slot: u32 },
    #[error("slot {slot} references occluder slot {occluder} that was never dealt")]
    UnresolvedOccluder { slot: u32, occluder: u32 },
}

impl TableauLayout {
    /// Validate the slot graph. The deck must cover every slot and still
    /// have a card left for the initial target.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.slots.is_empty() {
            return Err(LayoutError::Empty);
        }
        if self.slots.len() > DECK_SIZE - 1 {
            return Err(LayoutError::TooManySlots(self.slots.len()));
        }

        let mut ids = std::collections::HashSet::with_capacity(self.slots.len());
        for slot in &self.slots {
            if !ids.insert(slot.id) {
                return Err(LayoutError::DuplicateSlotId(slot.id));
            }
        }
        for slot in &self.slots {
            for &occluder in &slot.hidden_by {
                if occluder == slot.id {
                    return Err(LayoutError::SelfOccluder { slot: slot.id });
                }
                if !ids.contains(&occluder) {
                    return Err(LayoutError::UnknownOccluder {
                        slot: slot.id,
                        occluder,
                    });
                }
            }
        }
        Ok(())
    }

    /// Placement for a card sitting in a mine slot.
    pub fn slot_placement(&self, slot: &LayoutSlot) -> Placement {
        Placement {
            x: self.multiplier.x * slot.x,
            y: self.multiplier.y * slot.y,
            depth: i32::from(slot.row),
        }
    }

    /// Placement for the `index`-th card of the draw pile (0 = front).
    pub fn draw_placement(&self, index: usize) -> Placement {
        Placement {
            x: self.multiplier.x * self.draw_pile.x + self.draw_pile.stagger_x * index as f32,
            y: self.multiplier.y * self.draw_pile.y,
            depth: DRAW_DEPTH_STEP * index as i32,
        }
    }

    /// Placement for a newly discarded card, stacking above the `count - 1`
    /// cards already there.
    pub fn discard_placement(&self, count: usize) -> Placement {
        Placement {
            x: self.multiplier.x * self.discard_pile.x,
            y: self.multiplier.y * self.discard_pile.y,
            depth: DISCARD_DEPTH_BASE + DISCARD_DEPTH_STEP * count as i32,
        }
    }

    /// The target sits on the discard anchor, above everything in the pile.
    pub fn target_placement(&self) -> Placement {
        Placement {
            x: self.multiplier.x * self.discard_pile.x,
            y: self.multiplier.y * self.discard_pile.y,
            depth: TARGET_DEPTH,
        }
    }
}

/// Deal the mine: pop one card off the front of `draw_pile` per slot, in
/// slot order, then wire occluder slot-ids to card ids.
///
/// The caller guarantees the draw pile covers the layout (validated at
/// load); running out of cards mid-deal is reported, not asserted, so a
/// bad layout fails the round start instead of corrupting state.
pub fn deal_mine(
    layout: &TableauLayout,
    draw_pile: &mut ArrayVec<CardId, DECK_SIZE>,
    cards: &mut [Card],
) -> Result<ArrayVec<CardId, DECK_SIZE>, DealError> {
    let mut mine = ArrayVec::new();
    let mut by_slot: HashMap<u32, CardId> = HashMap::with_capacity(layout.slots.len());

    // First pass: place a card in every slot.
    for slot in &layout.slots {
        if draw_pile.is_empty() {
            return Err(DealError::EmptyDrawPile { slot: slot.id });
        }
        let id = draw_pile.remove(0);
        let card = &mut cards[id.index()];
        card.face_up = slot.face_up;
        card.state = CardState::Mine;
        card.placement = layout.slot_placement(slot);
        card.slot = Some(SlotInfo {
            slot_id: slot.id,
            row: slot.row,
            hidden_by: Vec::with_capacity(slot.hidden_by.len()),
        });
        by_slot.insert(slot.id, id);
        mine.push(id);
    }

    // Second pass: resolve occluder slot ids, now that every slot is dealt.
    for slot in &layout.slots {
        let mut hidden_by = Vec::with_capacity(slot.hidden_by.len());
        for &occluder in &slot.hidden_by {
            let occluder_id = *by_slot
                .get(&occluder)
                .ok_or(DealError::UnresolvedOccluder {
                    slot: slot.id,
                    occluder,
                })?;
            hidden_by.push(occluder_id);
        }
        let card_id = by_slot[&slot.id];
        if let Some(info) = cards[card_id.index()].slot.as_mut() {
            info.hidden_by = hidden_by;
        }
    }

    Ok(mine)
}
