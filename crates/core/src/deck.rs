//! Deck module - card storage and seeded shuffling.
//!
//! Cards live in one dense table indexed by [`CardId`]; piles hold ids, never
//! cards, so ownership transfer between piles is a single state update.
//! Shuffling uses a small LCG so a seed reproduces the whole deal.

use prospector_types::{CardId, CardState, Rank, Suit, DECK_SIZE};

use crate::layout::Placement;

/// Tableau-specific card data, present only once a card is dealt into the
/// mine. One concrete card type with an optional extension; there is no
/// tableau subtype to downcast to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotInfo {
    /// Layout slot this card was dealt into.
    pub slot_id: u32,
    /// Tableau row, used for depth ordering (higher rows render above).
    pub row: u8,
    /// Cards that keep this one face-down while they remain in the mine.
    pub hidden_by: Vec<CardId>,
}

/// A playing card and its full in-round state.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
    pub state: CardState,
    pub slot: Option<SlotInfo>,
    pub placement: Placement,
}

impl Card {
    fn new(id: CardId, suit: Suit, rank: Rank) -> Self {
        Self {
            id,
            suit,
            rank,
            face_up: false,
            state: CardState::DrawPile,
            slot: None,
            placement: Placement::default(),
        }
    }
}

/// Build the 52-card deck in suit-major order, all face-down in the draw
/// pile. Ids are table positions and never change; ordering randomness
/// belongs to the pile, not the table.
pub fn full_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for value in 1..=13u8 {
            let id = CardId(cards.len() as u8);
            let rank = Rank::new(value).unwrap_or(Rank::ACE);
            cards.push(Card::new(id, suit, rank));
        }
    }
    cards
}

/// Seeded LCG used to shuffle the draw pile.
///
/// Numerical Recipes constants; not cryptographic, but deterministic per
/// seed, which is what replays and tests need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckRng {
    state: u32,
}

impl DeckRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would never leave zero.
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }

    /// Fisher-Yates, uniform over permutations.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            items.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}
