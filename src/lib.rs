//! Prospector (workspace facade crate).
//!
//! This package keeps a single `prospector::{core,assets,input,term,types}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use prospector_assets as assets;
pub use prospector_core as core;
pub use prospector_input as input;
pub use prospector_term as term;
pub use prospector_types as types;
