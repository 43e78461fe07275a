//! Core types shared across the Prospector workspace.
//! This crate contains pure data types with no external dependencies.

/// Number of cards in a standard deck (one per suit and rank).
pub const DECK_SIZE: usize = 52;

/// Fixed timestep for the runner and animation ticks (milliseconds).
pub const TICK_MS: u32 = 16;

/// Flight time of one floating-score leg (milliseconds).
pub const FLOAT_DURATION_MS: u32 = 750;

/// Normalized screen anchors for the floating-score curves.
///
/// The first leg travels click → `FS_POS_MID` → `FS_POS_RUN`; the board
/// leg travels `FS_POS_RUN` → `FS_POS_MID2` → `FS_POS_END`.
pub const FS_POS_MID: Vec2 = Vec2::new(0.5, 0.90);
pub const FS_POS_RUN: Vec2 = Vec2::new(0.5, 0.75);
pub const FS_POS_MID2: Vec2 = Vec2::new(0.4, 1.0);
pub const FS_POS_END: Vec2 = Vec2::new(0.5, 0.95);

/// Font-size keyframes for a floating score in flight.
pub const FS_FONTS_TRAVEL: [f32; 3] = [10.0, 56.0, 10.0];
/// Final font size of the run head while it waits at the run anchor.
pub const FS_FONT_HELD: f32 = 48.0;
/// Font-size keyframes for the head's leg toward the scoreboard.
pub const FS_FONTS_TO_BOARD: [f32; 3] = [48.0, 56.0, 10.0];

/// Depth sorting (larger values render above smaller ones).
pub const TARGET_DEPTH: i32 = 0;
pub const DISCARD_DEPTH_BASE: i32 = -200;
pub const DISCARD_DEPTH_STEP: i32 = 3;
pub const DRAW_DEPTH_STEP: i32 = -10;

/// Card suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn as_char(&self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Clubs => "clubs",
            Suit::Diamonds => "diamonds",
            Suit::Hearts => "hearts",
            Suit::Spades => "spades",
        }
    }

    /// Red suits render differently from black ones.
    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }
}

/// Card rank, 1 (ace) through 13 (king).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const KING: Rank = Rank(13);

    /// Construct a rank; `None` outside 1..=13.
    pub fn new(value: u8) -> Option<Self> {
        (1..=13).contains(&value).then_some(Rank(value))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Cyclic adjacency: ranks one apart match, and ace wraps to king.
    pub fn is_adjacent(&self, other: Rank) -> bool {
        let diff = (u32::from(self.0) + 13 - u32::from(other.0)) % 13;
        diff == 1 || diff == 12
    }

    pub fn as_str(&self) -> &'static str {
        match self.0 {
            1 => "A",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            6 => "6",
            7 => "7",
            8 => "8",
            9 => "9",
            10 => "10",
            11 => "J",
            12 => "Q",
            _ => "K",
        }
    }
}

/// Dense card identity: index into the session's card table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardId(pub u8);

impl CardId {
    pub fn index(&self) -> usize {
        usize::from(self.0)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which pile currently owns a card.
///
/// Must always mirror actual pile membership; the session keeps the two
/// in sync on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardState {
    DrawPile,
    Mine,
    Target,
    Discard,
}

impl CardState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardState::DrawPile => "drawpile",
            CardState::Mine => "mine",
            CardState::Target => "target",
            CardState::Discard => "discard",
        }
    }
}

/// Discrete scoring events posted by the tableau state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreEvent {
    Draw,
    Mine,
    GameWin,
    GameLoss,
}

impl ScoreEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreEvent::Draw => "draw",
            ScoreEvent::Mine => "mine",
            ScoreEvent::GameWin => "gameWin",
            ScoreEvent::GameLoss => "gameLoss",
        }
    }
}

/// Round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }
}

/// Player actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorLeft,
    CursorRight,
    PlayCursor,
    DrawNext,
    Restart,
}

/// 2D point, in layout units or normalized screen coordinates depending
/// on context.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, other: Vec2, u: f32) -> Vec2 {
        Vec2::new(self.x + (other.x - self.x) * u, self.y + (other.y - self.y) * u)
    }
}
