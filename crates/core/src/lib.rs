//! Core game logic for Prospector - pure, deterministic, and testable.
//!
//! This crate contains the tableau state machine, the chained scoring
//! engine, and the floating-score feedback coordinator. It has **zero
//! dependencies** on UI, filesystem, or I/O, making it:
//!
//! - **Deterministic**: the same seed and layout reproduce the same round
//! - **Testable**: every rule has unit tests next to it
//! - **Portable**: runs headless or behind any presentation layer
//!
//! # Module structure
//!
//! - [`deck`]: card table, 52-card deck construction, seeded shuffling
//! - [`layout`]: declarative tableau descriptions and the initial deal
//! - [`session`]: the tableau state machine (piles, occlusion, adjacency)
//! - [`scoring`]: chain / run / score math and high-score persistence
//! - [`feedback`]: floating-score animations and the displayed scoreboard
//! - [`snapshot`]: flattened render state for the presentation layer
//!
//! # Game rules
//!
//! A shuffled deck deals one card into every layout slot (the "mine");
//! the next card becomes the target. A mine card can be played once no
//! occluding card remains above it and its rank is cyclically adjacent to
//! the target (ace and king wrap). Each play grows a chain worth its own
//! length in points; drawing a new target folds the pending run into the
//! score and resets the chain. The round is won when the mine empties and
//! lost when the draw pile is empty with no playable match.
//!
//! # Example
//!
//! ```
//! use prospector_core::{GameSession, MemoryStore, TableauLayout, LayoutSlot, PileAnchor};
//! use prospector_types::Vec2;
//!
//! let layout = TableauLayout {
//!     multiplier: Vec2::new(1.0, 1.0),
//!     slots: vec![LayoutSlot {
//!         id: 0,
//!         x: 0.0,
//!         y: 0.0,
//!         face_up: true,
//!         row: 0,
//!         hidden_by: vec![],
//!     }],
//!     draw_pile: PileAnchor { x: 2.0, y: -2.0, stagger_x: 0.1 },
//!     discard_pile: PileAnchor { x: -2.0, y: -2.0, stagger_x: 0.0 },
//! };
//!
//! let session = GameSession::new(7, layout, Box::new(MemoryStore::new())).unwrap();
//! assert_eq!(session.snapshot().cards.len(), 52);
//! ```

pub mod deck;
pub mod feedback;
pub mod layout;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use prospector_types as types;

// Re-export commonly used types for convenience
pub use deck::{full_deck, Card, DeckRng, SlotInfo};
pub use feedback::{bezier, FloatPhase, FloatingScore, FloatingScores, Scoreboard};
pub use layout::{
    deal_mine, DealError, LayoutError, LayoutSlot, PileAnchor, Placement, TableauLayout,
};
pub use scoring::{HighScoreStore, MemoryStore, ScoreKeeper, TallyOutcome};
pub use session::{GameSession, NewGameError};
pub use snapshot::{CardSnapshot, FloatSnapshot, GameSnapshot};
