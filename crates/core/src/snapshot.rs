//! Render snapshots: everything the presentation layer needs, copied out of
//! the session so the renderer never touches live game state.

use prospector_types::{CardId, CardState, Rank, RoundStatus, Suit};

/// One card, flattened for rendering and hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSnapshot {
    pub id: CardId,
    pub suit: Suit,
    pub rank: Rank,
    pub face_up: bool,
    pub state: CardState,
    pub x: f32,
    pub y: f32,
    pub depth: i32,
    pub playable: bool,
}

/// One floating score in flight, in normalized screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatSnapshot {
    pub value: i64,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    /// The parked run head renders emphasized.
    pub held: bool,
}

/// Full render state for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub cards: Vec<CardSnapshot>,
    pub target: Option<CardId>,
    pub draw_count: u32,
    pub status: RoundStatus,
    /// Displayed scoreboard total (trails the committed score while
    /// animations are in flight).
    pub scoreboard: i64,
    pub score: i64,
    pub score_run: i64,
    pub score_this_round: i64,
    pub chain: u32,
    pub high_score: i64,
    pub floats: Vec<FloatSnapshot>,
}

impl GameSnapshot {
    /// Look up a card by id.
    pub fn card(&self, id: CardId) -> Option<&CardSnapshot> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Mine cards currently accepting clicks, left to right.
    pub fn playable(&self) -> Vec<CardId> {
        let mut ids: Vec<(f32, CardId)> = self
            .cards
            .iter()
            .filter(|c| c.playable)
            .map(|c| (c.x, c.id))
            .collect();
        ids.sort_by(|a, b| a.0.total_cmp(&b.0));
        ids.into_iter().map(|(_, id)| id).collect()
    }
}
