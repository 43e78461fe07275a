//! Terminal presentation for Prospector.
//!
//! A small framebuffer, a diff-based renderer, and a view that turns core
//! snapshots into styled cells and answers hit-test queries for clicks.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use prospector_core as core;
pub use prospector_types as types;

pub use fb::{Cell, Frame, Rgb, Style};
pub use game_view::{is_draw_pile_card, GameView, Viewport};
pub use renderer::TerminalRenderer;
