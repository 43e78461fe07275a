//! Session module - the tableau state machine.
//!
//! `GameSession` owns the card table, the three piles, the target, the
//! score keeper, and the feedback coordinator. Every public operation runs
//! to completion before the next event is processed; score-affecting
//! events fan out to scoring and feedback in the order they occur.
//!
//! Card states always mirror pile membership: the only way a card moves is
//! through the transition methods here, and each of them updates both.

use arrayvec::ArrayVec;
use log::error;
use thiserror::Error;

use prospector_types::{CardId, CardState, RoundStatus, ScoreEvent, Vec2, DECK_SIZE};

use crate::deck::{full_deck, Card, DeckRng};
use crate::feedback::FloatingScores;
use crate::layout::{deal_mine, DealError, LayoutError, TableauLayout};
use crate::scoring::{HighScoreStore, ScoreKeeper};
use crate::snapshot::{CardSnapshot, FloatSnapshot, GameSnapshot};

/// Why a session could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewGameError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Deal(#[from] DealError),
}

/// One Prospector game: a round in progress plus the score state that
/// survives between rounds. A plain owned value; construct it once and
/// pass it by reference to collaborators.
#[derive(Debug)]
pub struct GameSession {
    layout: TableauLayout,
    cards: Vec<Card>,
    draw_pile: ArrayVec<CardId, DECK_SIZE>,
    mine: ArrayVec<CardId, DECK_SIZE>,
    discard_pile: ArrayVec<CardId, DECK_SIZE>,
    target: Option<CardId>,
    status: RoundStatus,
    scores: ScoreKeeper,
    floats: FloatingScores,
    seed: u32,
}

impl GameSession {
    /// Validate the layout, shuffle a fresh deck, deal the mine, and turn
    /// the first draw card into the target.
    pub fn new(
        seed: u32,
        layout: TableauLayout,
        store: Box<dyn HighScoreStore>,
    ) -> Result<Self, NewGameError> {
        layout.validate()?;

        let mut session = Self {
            layout,
            cards: Vec::new(),
            draw_pile: ArrayVec::new(),
            mine: ArrayVec::new(),
            discard_pile: ArrayVec::new(),
            target: None,
            status: RoundStatus::InProgress,
            scores: ScoreKeeper::new(store),
            floats: FloatingScores::new(),
            seed,
        };
        session.deal(seed)?;
        Ok(session)
    }

    /// Start a new round on the same session, keeping score carry-over and
    /// the persisted high score.
    pub fn restart(&mut self, seed: u32) -> Result<(), DealError> {
        self.deal(seed)
    }

    fn deal(&mut self, seed: u32) -> Result<(), DealError> {
        self.seed = seed;
        self.scores.begin_round();
        self.floats.reset(self.scores.score());

        self.cards = full_deck();
        self.draw_pile = (0..DECK_SIZE as u8).map(CardId).collect();
        DeckRng::new(seed).shuffle(&mut self.draw_pile);
        self.mine.clear();
        self.discard_pile.clear();
        self.target = None;
        self.status = RoundStatus::InProgress;

        self.mine = deal_mine(&self.layout, &mut self.draw_pile, &mut self.cards)?;

        // The initial target comes off the draw pile without a score event.
        match self.draw() {
            Some(first) => self.move_to_target(first),
            // Validation caps slots at DECK_SIZE - 1, so a card remains.
            None => return Err(DealError::EmptyDrawPile { slot: u32::MAX }),
        }
        self.restack_draw_pile();
        Ok(())
    }

    /// Pull the front card of the draw pile. Callers check emptiness; an
    /// empty pile here is a caller bug.
    fn draw(&mut self) -> Option<CardId> {
        if self.draw_pile.is_empty() {
            debug_assert!(false, "draw from an empty pile");
            error!("draw from an empty pile ignored");
            return None;
        }
        Some(self.draw_pile.remove(0))
    }

    /// Make `id` the target; any previous target goes to the discard pile
    /// first, keeping its place in discard order.
    fn move_to_target(&mut self, id: CardId) {
        if let Some(old) = self.target.take() {
            self.move_to_discard(old);
        }
        let placement = self.layout.target_placement();
        let card = &mut self.cards[id.index()];
        card.state = CardState::Target;
        card.face_up = true;
        card.placement = placement;
        self.target = Some(id);
    }

    /// Append `id` to the discard pile, stacking it above the previous top.
    fn move_to_discard(&mut self, id: CardId) {
        self.discard_pile.push(id);
        let placement = self.layout.discard_placement(self.discard_pile.len());
        let card = &mut self.cards[id.index()];
        card.state = CardState::Discard;
        card.face_up = true;
        card.placement = placement;
    }

    /// Re-stagger the remaining draw pile so its size stays readable.
    fn restack_draw_pile(&mut self) {
        for (index, id) in self.draw_pile.iter().enumerate() {
            let card = &mut self.cards[id.index()];
            card.face_up = false;
            card.placement = self.layout.draw_placement(index);
        }
    }

    /// Recompute mine visibility: a card is face-up once no occluder of its
    /// slot remains in the mine. Runs after every mine removal.
    fn refresh_mine_face_ups(&mut self) {
        for i in 0..self.mine.len() {
            let id = self.mine[i];
            let covered = self.occluded(id);
            self.cards[id.index()].face_up = !covered;
        }
    }

    fn occluded(&self, id: CardId) -> bool {
        match &self.cards[id.index()].slot {
            Some(info) => info
                .hidden_by
                .iter()
                .any(|h| self.cards[h.index()].state == CardState::Mine),
            None => false,
        }
    }

    /// A mine card accepts clicks once it is face-up and uncovered.
    pub fn is_playable(&self, id: CardId) -> bool {
        let card = &self.cards[id.index()];
        card.state == CardState::Mine && card.face_up && !self.occluded(id)
    }

    fn matches_target(&self, id: CardId) -> bool {
        match self.target {
            Some(target) => self.cards[id.index()]
                .rank
                .is_adjacent(self.cards[target.index()].rank),
            None => false,
        }
    }

    /// Try to mine a card. Valid only for a playable mine card whose rank
    /// is cyclically adjacent to the target; anything else is a silent
    /// no-op (the click is simply not allowed, not an error).
    ///
    /// `click` is the interaction point in normalized screen coordinates,
    /// used as the floating score's launch point.
    pub fn attempt_mine(&mut self, id: CardId, click: Vec2) -> bool {
        if self.status.is_over() {
            return false;
        }
        if !self.is_playable(id) || !self.matches_target(id) {
            return false;
        }

        let Some(position) = self.mine.iter().position(|&m| m == id) else {
            debug_assert!(false, "playable card {id} missing from mine pile");
            error!("mine pile lost track of {id}");
            return false;
        };
        self.mine.remove(position);
        self.move_to_target(id);
        self.refresh_mine_face_ups();
        self.tally(ScoreEvent::Mine, click);
        self.check_round_over();
        true
    }

    /// Turn the next draw card into the target. No-op when the pile is
    /// empty: the round stalls into a loss instead of reshuffling the
    /// discard pile.
    pub fn draw_next(&mut self) -> bool {
        if self.status.is_over() || self.draw_pile.is_empty() {
            return false;
        }
        let Some(id) = self.draw() else {
            return false;
        };
        self.move_to_target(id);
        self.restack_draw_pile();
        self.tally(ScoreEvent::Draw, Vec2::ZERO);
        self.check_round_over();
        true
    }

    /// Advance floating-score animations by `elapsed_ms`.
    pub fn tick(&mut self, elapsed_ms: u32) {
        self.floats.tick(elapsed_ms);
    }

    fn tally(&mut self, event: ScoreEvent, click: Vec2) {
        let outcome = self.scores.tally(event);
        self.floats.on_score_event(event, outcome.chain, click);
    }

    fn has_valid_play(&self) -> bool {
        self.mine
            .iter()
            .any(|&id| self.is_playable(id) && self.matches_target(id))
    }

    /// Emit exactly one terminal event once a terminal condition holds.
    fn check_round_over(&mut self) {
        if self.status.is_over() {
            return;
        }
        if self.mine.is_empty() {
            self.status = RoundStatus::Won;
            self.tally(ScoreEvent::GameWin, Vec2::ZERO);
        } else if self.draw_pile.is_empty() && !self.has_valid_play() {
            self.status = RoundStatus::Lost;
            self.tally(ScoreEvent::GameLoss, Vec2::ZERO);
        }
    }

    pub fn round_status(&self) -> RoundStatus {
        self.status
    }

    pub fn score(&self) -> i64 {
        self.scores.score()
    }

    pub fn score_run(&self) -> i64 {
        self.scores.score_run()
    }

    pub fn score_this_round(&self) -> i64 {
        self.scores.score_this_round()
    }

    pub fn chain(&self) -> u32 {
        self.scores.chain()
    }

    pub fn high_score(&self) -> i64 {
        self.scores.high_score()
    }

    /// The displayed scoreboard total; trails `score()` while floating
    /// scores are still in flight.
    pub fn scoreboard_score(&self) -> i64 {
        self.floats.scoreboard().score()
    }

    pub fn target(&self) -> Option<CardId> {
        self.target
    }

    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn mine_len(&self) -> usize {
        self.mine.len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn floats(&self) -> &FloatingScores {
        &self.floats
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Fill a reusable snapshot for the presentation layer.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cards.clear();
        out.cards.extend(self.cards.iter().map(|card| CardSnapshot {
            id: card.id,
            suit: card.suit,
            rank: card.rank,
            face_up: card.face_up,
            state: card.state,
            x: card.placement.x,
            y: card.placement.y,
            depth: card.placement.depth,
            playable: self.is_playable(card.id),
        }));

        out.target = self.target;
        out.draw_count = self.draw_pile.len() as u32;
        out.status = self.status;
        out.scoreboard = self.scoreboard_score();
        out.score = self.scores.score();
        out.score_run = self.scores.score_run();
        out.score_this_round = self.scores.score_this_round();
        out.chain = self.scores.chain();
        out.high_score = self.scores.high_score();

        out.floats.clear();
        out.floats.extend(self.floats.visible().map(|float| {
            let pos = float.pos();
            FloatSnapshot {
                value: float.value(),
                x: pos.x,
                y: pos.y,
                font_size: float.font_size(),
                held: float.phase() == crate::feedback::FloatPhase::HeldAtRun,
            }
        }));
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutSlot, PileAnchor};
    use crate::scoring::MemoryStore;
    use prospector_types::{Rank, DRAW_DEPTH_STEP};

    fn slot(id: u32, x: f32, row: u8, face_up: bool, hidden_by: &[u32]) -> LayoutSlot {
        LayoutSlot {
            id,
            x,
            y: f32::from(row),
            face_up,
            row,
            hidden_by: hidden_by.to_vec(),
        }
    }

    /// One peak covered by two of the three bottom cards.
    fn pyramid_layout() -> TableauLayout {
        TableauLayout {
            multiplier: Vec2::new(1.0, 1.0),
            slots: vec![
                slot(0, 0.0, 1, false, &[1, 2]),
                slot(1, -0.5, 0, true, &[]),
                slot(2, 0.5, 0, true, &[]),
                slot(3, 1.5, 0, true, &[]),
            ],
            draw_pile: PileAnchor {
                x: 3.0,
                y: -2.0,
                stagger_x: 0.1,
            },
            discard_pile: PileAnchor {
                x: -3.0,
                y: -2.0,
                stagger_x: 0.0,
            },
        }
    }

    fn session() -> GameSession {
        GameSession::new(1, pyramid_layout(), Box::new(MemoryStore::new())).unwrap()
    }

    /// Force a known position: `mine_ranks` maps onto the layout slots in
    /// order, `target_rank` replaces the dealt target, and the draw pile is
    /// trimmed to `draw_len` cards of rank 9 (adjacent to nothing tested).
    fn rigged_session(mine_ranks: &[u8], target_rank: u8, draw_len: usize) -> GameSession {
        let mut s = session();

        let mine_ids: Vec<CardId> = s.mine.iter().copied().collect();
        for (&id, &rank) in mine_ids.iter().zip(mine_ranks) {
            s.cards[id.index()].rank = Rank::new(rank).unwrap();
        }
        let target = s.target.unwrap();
        s.cards[target.index()].rank = Rank::new(target_rank).unwrap();

        while s.draw_pile.len() > draw_len {
            let id = s.draw_pile.pop().unwrap();
            s.move_to_discard(id);
        }
        for &id in &s.draw_pile {
            s.cards[id.index()].rank = Rank::new(9).unwrap();
        }
        s
    }

    fn pile_census(s: &GameSession) -> (usize, usize, usize, usize) {
        let by_state = |state: CardState| s.cards.iter().filter(|c| c.state == state).count();
        (
            by_state(CardState::DrawPile),
            by_state(CardState::Mine),
            by_state(CardState::Target),
            by_state(CardState::Discard),
        )
    }

    fn assert_invariants(s: &GameSession) {
        let (draw, mine, target, discard) = pile_census(s);
        assert_eq!(draw + mine + target + discard, DECK_SIZE);
        assert_eq!(draw, s.draw_pile.len());
        assert_eq!(mine, s.mine.len());
        assert_eq!(discard, s.discard_pile.len());
        assert_eq!(target, usize::from(s.target.is_some()));

        // Pile membership and card state agree card by card.
        for &id in &s.draw_pile {
            assert_eq!(s.cards[id.index()].state, CardState::DrawPile);
        }
        for &id in &s.mine {
            assert_eq!(s.cards[id.index()].state, CardState::Mine);
        }
        for &id in &s.discard_pile {
            assert_eq!(s.cards[id.index()].state, CardState::Discard);
        }
    }

    #[test]
    fn deal_partitions_the_deck() {
        let s = session();
        assert_invariants(&s);
        assert_eq!(s.mine_len(), 4);
        assert_eq!(s.draw_pile_len(), DECK_SIZE - 5);
        assert_eq!(s.discard_pile_len(), 0);
        assert!(s.target.is_some());
        assert_eq!(s.round_status(), RoundStatus::InProgress);
    }

    #[test]
    fn deal_is_deterministic_per_seed() {
        let a = session();
        let b = session();
        assert_eq!(a.snapshot(), b.snapshot());

        let c = GameSession::new(2, pyramid_layout(), Box::new(MemoryStore::new())).unwrap();
        assert_ne!(a.snapshot(), c.snapshot());
    }

    #[test]
    fn covered_card_is_unplayable_until_freed() {
        let mut s = rigged_session(&[6, 4, 5, 9], 5, 10);
        let covered = s.mine[0];
        let left = s.mine[1];
        let right = s.mine[2];

        assert!(!s.is_playable(covered));
        assert!(s.is_playable(left));

        // One occluder gone is not enough.
        assert!(s.attempt_mine(left, Vec2::ZERO));
        assert!(!s.is_playable(covered));
        assert!(!s.attempt_mine(covered, Vec2::ZERO));

        // Removing the last occluder flips the card face-up and playable.
        assert!(s.attempt_mine(right, Vec2::ZERO));
        assert!(s.cards[covered.index()].face_up);
        assert!(s.is_playable(covered));
        assert!(s.attempt_mine(covered, Vec2::ZERO));

        assert_invariants(&s);
    }

    #[test]
    fn freeing_a_card_has_no_other_side_effects() {
        let mut s = rigged_session(&[6, 4, 5, 9], 5, 10);
        let covered = s.mine[0];
        let bystander = s.mine[3];

        assert!(s.attempt_mine(s.mine[1], Vec2::ZERO));
        assert!(s.attempt_mine(s.mine[1], Vec2::ZERO));

        assert!(s.is_playable(covered));
        // The unrelated bottom card kept its rank, visibility, and spot.
        let card = &s.cards[bystander.index()];
        assert_eq!(card.rank, Rank::new(9).unwrap());
        assert_eq!(card.state, CardState::Mine);
        assert!(card.face_up);
    }

    #[test]
    fn mining_requires_cyclic_adjacency() {
        let mut s = rigged_session(&[9, 1, 13, 7], 13, 10);
        let ace = s.mine[1];
        let king = s.mine[2];
        let seven = s.mine[3];

        // Neither 7 nor a matching king is adjacent to the king target.
        assert!(!s.attempt_mine(seven, Vec2::ZERO));
        assert!(!s.attempt_mine(king, Vec2::ZERO));

        // Ace wraps onto king, king wraps back onto ace.
        assert!(s.attempt_mine(ace, Vec2::ZERO));
        assert_eq!(s.target(), Some(ace));
        assert!(s.attempt_mine(king, Vec2::ZERO));

        assert_invariants(&s);
    }

    #[test]
    fn rejected_clicks_change_nothing() {
        let mut s = rigged_session(&[8, 2, 3, 4], 12, 10);
        let before = s.snapshot();

        // Nothing in the mine is adjacent to a queen.
        for id in before.playable() {
            assert!(!s.attempt_mine(id, Vec2::ZERO));
        }
        // The covered peak is rejected outright.
        assert!(!s.attempt_mine(s.mine[0], Vec2::ZERO));

        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn mined_card_becomes_target_and_old_target_discards() {
        let mut s = rigged_session(&[8, 4, 6, 11], 5, 10);
        let old_target = s.target().unwrap();
        let four = s.mine[1];
        let discards_before = s.discard_pile_len();

        assert!(s.attempt_mine(four, Vec2::ZERO));
        assert_eq!(s.target(), Some(four));
        assert_eq!(s.cards[four.index()].state, CardState::Target);
        assert_eq!(s.cards[old_target.index()].state, CardState::Discard);
        assert_eq!(s.discard_pile_len(), discards_before + 1);

        // Discard stacking: every discard sits above the previous top, and
        // the target renders above the whole pile.
        let depths: Vec<i32> = s
            .discard_pile
            .iter()
            .map(|id| s.cards[id.index()].placement.depth)
            .collect();
        for pair in depths.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!(s.cards[four.index()].placement.depth > *depths.last().unwrap());

        assert_invariants(&s);
    }

    #[test]
    fn draw_next_rotates_the_target() {
        let mut s = session();
        let old_target = s.target().unwrap();
        let draw_before = s.draw_pile_len();
        let front = s.draw_pile[0];

        assert!(s.draw_next());
        assert_eq!(s.target(), Some(front));
        assert_eq!(s.cards[old_target.index()].state, CardState::Discard);
        assert_eq!(s.draw_pile_len(), draw_before - 1);

        // Remaining draw cards restack face-down from the front.
        for (i, &id) in s.draw_pile.iter().enumerate() {
            let card = &s.cards[id.index()];
            assert!(!card.face_up);
            assert_eq!(card.placement.depth, DRAW_DEPTH_STEP * i as i32);
        }
        assert_invariants(&s);
    }

    #[test]
    fn draw_breaks_the_chain_and_folds_the_run() {
        let mut s = rigged_session(&[11, 4, 5, 6], 5, 10);

        assert!(s.attempt_mine(s.mine[1], Vec2::ZERO));
        assert!(s.attempt_mine(s.mine[1], Vec2::ZERO));
        assert!(s.attempt_mine(s.mine[1], Vec2::ZERO));
        assert_eq!(s.chain(), 3);
        assert_eq!(s.score_run(), 6);
        assert_eq!(s.score(), 0);

        assert!(s.draw_next());
        assert_eq!(s.chain(), 0);
        assert_eq!(s.score_run(), 0);
        assert_eq!(s.score(), 6);
    }

    #[test]
    fn draw_from_empty_pile_is_rejected() {
        let mut s = rigged_session(&[8, 4, 6, 5], 5, 0);
        assert_eq!(s.draw_pile_len(), 0);
        // Valid plays remain, so the round is still live.
        assert_eq!(s.round_status(), RoundStatus::InProgress);
        assert!(!s.draw_next());
        assert_invariants(&s);
    }

    #[test]
    fn emptying_the_mine_wins_the_round() {
        let mut s = rigged_session(&[2, 4, 3, 1], 5, 10);
        let peak = s.mine[0];

        assert!(s.attempt_mine(s.mine[1], Vec2::ZERO)); // 4 on 5
        assert!(s.attempt_mine(s.mine[1], Vec2::ZERO)); // 3 on 4
        assert!(s.attempt_mine(peak, Vec2::ZERO)); // freed 2 on 3
        assert_eq!(s.mine_len(), 1);
        assert!(s.attempt_mine(s.mine[0], Vec2::ZERO)); // ace on 2

        assert_eq!(s.round_status(), RoundStatus::Won);
        assert_eq!(s.mine_len(), 0);
        // Chain 1+2+3+4, folded by the win event.
        assert_eq!(s.score(), 10);
        assert_eq!(s.score_run(), 0);
        assert_eq!(s.score_this_round(), 10);
        assert_eq!(s.high_score(), 10);
    }

    #[test]
    fn finished_round_ignores_further_actions() {
        let mut s = rigged_session(&[2, 4, 3, 1], 5, 10);
        let peak = s.mine[0];
        s.attempt_mine(s.mine[1], Vec2::ZERO);
        s.attempt_mine(s.mine[1], Vec2::ZERO);
        s.attempt_mine(peak, Vec2::ZERO);
        s.attempt_mine(s.mine[0], Vec2::ZERO);
        assert_eq!(s.round_status(), RoundStatus::Won);
        let score = s.score();

        assert!(!s.draw_next());
        assert_eq!(s.score(), score);
        assert_eq!(s.round_status(), RoundStatus::Won);
    }

    #[test]
    fn stalled_round_with_empty_draw_pile_is_lost() {
        // Clear everything but a queen, then let the last draw (a 9, per
        // the rig) strand it: queen is not adjacent to 9 and the pile is
        // empty afterwards.
        let mut s = rigged_session(&[12, 4, 6, 5], 7, 1);

        assert!(s.attempt_mine(s.mine[2], Vec2::ZERO)); // 6 on 7
        assert!(s.attempt_mine(s.mine[2], Vec2::ZERO)); // 5 on 6
        assert!(s.attempt_mine(s.mine[1], Vec2::ZERO)); // 4 on 5
        assert_eq!(s.mine_len(), 1);
        assert_eq!(s.round_status(), RoundStatus::InProgress);

        assert!(s.draw_next());
        assert_eq!(s.round_status(), RoundStatus::Lost);
        assert_eq!(s.draw_pile_len(), 0);
        assert!(s.mine_len() > 0);
        assert_eq!(s.score_run(), 0);
        assert_invariants(&s);
    }

    #[test]
    fn lone_unmatched_card_with_empty_draw_pile_is_a_loss() {
        // Mine reduced to a single rank-5 card, target 7, nothing to draw.
        let mut s = rigged_session(&[8, 4, 6, 5], 7, 0);
        while s.mine.len() > 1 {
            let id = s.mine.remove(0);
            s.move_to_discard(id);
        }
        s.refresh_mine_face_ups();
        let lone = s.mine[0];
        assert_eq!(s.cards[lone.index()].rank, Rank::new(5).unwrap());
        assert!(s.is_playable(lone));
        assert!(!s.matches_target(lone));

        s.check_round_over();
        assert_eq!(s.round_status(), RoundStatus::Lost);
        assert_invariants(&s);
    }

    #[test]
    fn restart_keeps_high_score_and_applies_carry_over() {
        let mut s = rigged_session(&[2, 4, 3, 1], 5, 10);
        let peak = s.mine[0];
        s.attempt_mine(s.mine[1], Vec2::ZERO);
        s.attempt_mine(s.mine[1], Vec2::ZERO);
        s.attempt_mine(peak, Vec2::ZERO);
        s.attempt_mine(s.mine[0], Vec2::ZERO);
        assert_eq!(s.round_status(), RoundStatus::Won);
        let total = s.score();

        s.restart(99).unwrap();
        assert_eq!(s.round_status(), RoundStatus::InProgress);
        assert_eq!(s.mine_len(), 4);
        assert_eq!(s.score(), total);
        assert_eq!(s.scoreboard_score(), total);
        assert_eq!(s.chain(), 0);
        assert_eq!(s.high_score(), total);
        assert_invariants(&s);
    }

    #[test]
    fn scoreboard_reconciles_after_animations_drain() {
        let mut s = rigged_session(&[11, 4, 5, 6], 5, 10);
        s.attempt_mine(s.mine[1], Vec2::new(0.2, 0.3));
        s.attempt_mine(s.mine[1], Vec2::new(0.4, 0.2));
        s.draw_next();

        assert_eq!(s.score(), 3);
        assert_ne!(s.scoreboard_score(), s.score());

        for _ in 0..200 {
            s.tick(16);
        }
        assert_eq!(s.scoreboard_score(), s.score());
        assert!(s.floats().drained());
    }

    #[test]
    fn mined_cards_never_return_to_the_mine() {
        let mut s = rigged_session(&[8, 4, 6, 5], 5, 10);
        let four = s.mine[1];
        assert!(s.attempt_mine(four, Vec2::ZERO));

        for _ in 0..10 {
            let _ = s.draw_next();
        }
        assert_ne!(s.cards[four.index()].state, CardState::Mine);
        assert!(!s.mine.contains(&four));
    }

    #[test]
    fn snapshot_reflects_playability_and_piles() {
        let s = session();
        let snap = s.snapshot();

        assert_eq!(snap.cards.len(), DECK_SIZE);
        assert_eq!(snap.draw_count as usize, s.draw_pile_len());
        assert_eq!(snap.target, s.target());

        for card in &snap.cards {
            assert_eq!(card.playable, s.is_playable(card.id));
        }
        // The covered peak is never playable at deal time.
        let peak = snap.card(s.mine[0]).unwrap();
        assert!(!peak.playable);
    }
}
