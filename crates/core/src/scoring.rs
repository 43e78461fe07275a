//! Scoring module - the chained scoring state machine.
//!
//! Pure event math: a `Mine` grows the chain and the pending run, any other
//! event folds the run into the committed score exactly once and resets the
//! chain. Round results additionally settle the carry-over and the persisted
//! high score.

use std::fmt;

use log::{debug, info};

use prospector_types::ScoreEvent;

/// Persisted high-score storage. The file-backed implementation lives in
/// the assets crate; writes are single-writer and fire-and-forget.
pub trait HighScoreStore: fmt::Debug {
    fn load(&mut self) -> Option<i64>;
    fn save(&mut self, score: i64);
}

/// In-memory store, for tests and headless sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryStore {
    value: Option<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: i64) -> Self {
        Self { value: Some(value) }
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Option<i64> {
        self.value
    }

    fn save(&mut self, score: i64) {
        self.value = Some(score);
    }
}

/// What a single tally did, for event fan-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TallyOutcome {
    /// Chain length after the event (0 unless the event was `Mine`).
    pub chain: u32,
    /// Run points folded into the committed score by this event.
    pub folded: i64,
    /// Whether this event produced a new persisted high score.
    pub new_high: bool,
}

/// Chained scoring state. Lives across rounds; `begin_round` applies the
/// carry-over from the previous round.
#[derive(Debug)]
pub struct ScoreKeeper {
    chain: u32,
    score_run: i64,
    score: i64,
    score_from_prev_round: i64,
    score_this_round: i64,
    high_score: i64,
    store: Box<dyn HighScoreStore>,
}

impl ScoreKeeper {
    pub fn new(mut store: Box<dyn HighScoreStore>) -> Self {
        let high_score = store.load().unwrap_or(0);
        Self {
            chain: 0,
            score_run: 0,
            score: 0,
            score_from_prev_round: 0,
            score_this_round: 0,
            high_score,
            store,
        }
    }

    /// Start a round: a won round's total carries forward, a lost round
    /// starts from zero (`score_from_prev_round` was reset at the loss).
    pub fn begin_round(&mut self) {
        self.chain = 0;
        self.score_run = 0;
        self.score = self.score_from_prev_round;
        self.score_this_round = 0;
    }

    /// Apply one score event.
    pub fn tally(&mut self, event: ScoreEvent) -> TallyOutcome {
        let mut outcome = TallyOutcome::default();

        match event {
            ScoreEvent::Mine => {
                self.chain += 1;
                self.score_run += i64::from(self.chain);
                outcome.chain = self.chain;
            }
            ScoreEvent::Draw | ScoreEvent::GameWin | ScoreEvent::GameLoss => {
                outcome.folded = self.score_run;
                self.score += self.score_run;
                self.score_run = 0;
                self.chain = 0;
            }
        }

        match event {
            ScoreEvent::GameWin => {
                self.score_this_round = self.score - self.score_from_prev_round;
                info!(
                    "round won, round score {}, total {}",
                    self.score_this_round, self.score
                );
                // A win carries the total into the next round.
                self.score_from_prev_round = self.score;
                outcome.new_high = self.settle_high_score();
            }
            ScoreEvent::GameLoss => {
                info!("round lost, final score {}", self.score);
                self.score_from_prev_round = 0;
                outcome.new_high = self.settle_high_score();
            }
            _ => {
                debug!(
                    "score event {}: score {} run {} chain {}",
                    event.as_str(),
                    self.score,
                    self.score_run,
                    self.chain
                );
            }
        }

        outcome
    }

    /// Ties update too, matching the original comparison.
    fn settle_high_score(&mut self) -> bool {
        if self.score >= self.high_score {
            self.high_score = self.score;
            self.store.save(self.score);
            info!("new high score {}", self.high_score);
            true
        } else {
            false
        }
    }

    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn score_run(&self) -> i64 {
        self.score_run
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn score_this_round(&self) -> i64 {
        self.score_this_round
    }

    pub fn score_from_prev_round(&self) -> i64 {
        self.score_from_prev_round
    }

    pub fn high_score(&self) -> i64 {
        self.high_score
    }
}
