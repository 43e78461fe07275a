//! Terminal input for Prospector.
//!
//! Maps `crossterm` key and mouse events into [`prospector_types::GameAction`]
//! values; the runner decides what a click hits via the view's hit-testing.

pub mod map;

pub use prospector_types as types;

pub use map::{handle_key_event, mouse_click, should_quit};
