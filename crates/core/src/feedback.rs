//! Feedback module - floating score animations and the displayed scoreboard.
//!
//! Score events become small, time-sliced animations: each `Mine` spawns a
//! floating delta that travels from the click point to the run anchor. The
//! first float of a run is the **head**; it stays at the anchor and absorbs
//! the deltas of every later float. When the run breaks (draw, win, loss)
//! the head flies a second leg to the scoreboard and commits its total.
//!
//! Each float is an explicit phase machine (`ToRun → HeldAtRun → ToBoard →
//! Committed`); there is no completion-callback chaining, so totals always
//! reconcile once the animations drain.

use log::error;

use prospector_types::{
    ScoreEvent, Vec2, FLOAT_DURATION_MS, FS_FONTS_TO_BOARD, FS_FONTS_TRAVEL, FS_FONT_HELD,
    FS_POS_END, FS_POS_MID, FS_POS_MID2, FS_POS_RUN,
};

/// Animation phase of one floating score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatPhase {
    /// First leg, toward the run anchor.
    ToRun,
    /// Head parked at the run anchor, accumulating the run.
    HeldAtRun,
    /// Head's second leg, toward the scoreboard.
    ToBoard,
    /// Delta applied to the scoreboard; the float is gone.
    Committed,
}

/// One animated score delta.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingScore {
    value: i64,
    points: Vec<Vec2>,
    font_sizes: [f32; 3],
    duration_ms: u32,
    elapsed_ms: u32,
    phase: FloatPhase,
}

impl FloatingScore {
    fn new(value: i64, points: Vec<Vec2>, font_sizes: [f32; 3]) -> Self {
        Self {
            value,
            points,
            font_sizes,
            duration_ms: FLOAT_DURATION_MS,
            elapsed_ms: 0,
            phase: FloatPhase::ToRun,
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn phase(&self) -> FloatPhase {
        self.phase
    }

    fn progress(&self) -> f32 {
        match self.phase {
            FloatPhase::ToRun | FloatPhase::ToBoard => {
                (self.elapsed_ms as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
            }
            FloatPhase::HeldAtRun | FloatPhase::Committed => 1.0,
        }
    }

    /// Current position along the curve, in normalized screen coordinates.
    pub fn pos(&self) -> Vec2 {
        bezier(&self.points, self.progress())
    }

    /// Current font size along the keyframes.
    pub fn font_size(&self) -> f32 {
        bezier1(&self.font_sizes, self.progress())
    }

    /// Advance an animating float; true once its leg completed.
    fn advance(&mut self, elapsed_ms: u32) -> bool {
        if !matches!(self.phase, FloatPhase::ToRun | FloatPhase::ToBoard) {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        self.elapsed_ms >= self.duration_ms
    }

    fn relaunch_to_board(&mut self) {
        self.points = vec![FS_POS_RUN, FS_POS_MID2, FS_POS_END];
        self.font_sizes = FS_FONTS_TO_BOARD;
        self.elapsed_ms = 0;
        self.phase = FloatPhase::ToBoard;
    }
}

/// Evaluate a Bezier curve over arbitrary control points (de Casteljau).
pub fn bezier(points: &[Vec2], u: f32) -> Vec2 {
    match points {
        [] => Vec2::ZERO,
        [p] => *p,
        _ => {
            let mut scratch = points.to_vec();
            let mut n = scratch.len();
            while n > 1 {
                for i in 0..n - 1 {
                    scratch[i] = scratch[i].lerp(scratch[i + 1], u);
                }
                n -= 1;
            }
            scratch[0]
        }
    }
}

/// Quadratic Bezier over three scalar keyframes.
fn bezier1(k: &[f32; 3], u: f32) -> f32 {
    let v = 1.0 - u;
    v * v * k[0] + 2.0 * v * u * k[1] + u * u * k[2]
}

/// The displayed running total. Only committed floats change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    score: i64,
}

impl Scoreboard {
    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn set(&mut self, score: i64) {
        self.score = score;
    }

    fn add(&mut self, delta: i64) {
        self.score += delta;
    }
}

/// Coordinator for every floating score in flight.
#[derive(Debug, Default)]
pub struct FloatingScores {
    head: Option<FloatingScore>,
    run_flights: Vec<FloatingScore>,
    board_flights: Vec<FloatingScore>,
    scoreboard: Scoreboard,
}

impl FloatingScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all animations and reset the displayed total (round start).
    pub fn reset(&mut self, carried_score: i64) {
        self.head = None;
        self.run_flights.clear();
        self.board_flights.clear();
        self.scoreboard.set(carried_score);
    }

    /// Route one score event into animations. `chain` is the chain length
    /// after the event; `click` is the interaction point for mine events.
    pub fn on_score_event(&mut self, event: ScoreEvent, chain: u32, click: Vec2) {
        match event {
            ScoreEvent::Mine => self.spawn_mine_float(chain, click),
            ScoreEvent::Draw | ScoreEvent::GameWin | ScoreEvent::GameLoss => self.close_run(),
        }
    }

    fn spawn_mine_float(&mut self, chain: u32, click: Vec2) {
        let points = vec![click, FS_POS_MID, FS_POS_RUN];
        let mut float = FloatingScore::new(i64::from(chain), points, FS_FONTS_TRAVEL);

        if self.head.is_none() {
            // First of the run: stick around at the anchor, larger.
            float.font_sizes[2] = FS_FONT_HELD;
            self.head = Some(float);
        } else {
            self.run_flights.push(float);
        }
    }

    /// The run broke: send the head to the scoreboard with the whole run.
    fn close_run(&mut self) {
        let Some(mut head) = self.head.take() else {
            debug_assert!(self.run_flights.is_empty());
            return;
        };
        // Floats still flying toward the anchor fold in now, so the board
        // leg carries the full run no matter how the timing fell.
        for float in self.run_flights.drain(..) {
            head.value += float.value();
        }
        head.relaunch_to_board();
        self.board_flights.push(head);
    }

    /// Advance all animations; returns the delta committed to the
    /// scoreboard during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> i64 {
        if let Some(head) = self.head.as_mut() {
            if head.advance(elapsed_ms) {
                head.phase = FloatPhase::HeldAtRun;
            }
        }

        let mut arrived = 0;
        self.run_flights.retain_mut(|float| {
            if float.advance(elapsed_ms) {
                arrived += float.value();
                false
            } else {
                true
            }
        });
        if arrived != 0 {
            match self.head.as_mut() {
                Some(head) => head.value += arrived,
                // Unreachable: closing a run drains the flights first.
                None => error!("floating score arrived with no run head; {arrived} points dropped"),
            }
        }

        let mut committed = 0;
        self.board_flights.retain_mut(|float| {
            if float.advance(elapsed_ms) {
                float.phase = FloatPhase::Committed;
                committed += float.value();
                false
            } else {
                true
            }
        });
        self.scoreboard.add(committed);
        committed
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn head(&self) -> Option<&FloatingScore> {
        self.head.as_ref()
    }

    /// Every float currently worth drawing.
    pub fn visible(&self) -> impl Iterator<Item = &FloatingScore> {
        self.head
            .iter()
            .chain(self.run_flights.iter())
            .chain(self.board_flights.iter())
    }

    /// True when no animation is pending except a parked head.
    pub fn drained(&self) -> bool {
        self.run_flights.is_empty()
            && self.board_flights.is_empty()
            && self
                .head
                .as_ref()
                .map_or(true, |h| h.phase() == FloatPhase::HeldAtRun)
    }
}
