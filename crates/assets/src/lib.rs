//! Asset loading for Prospector: the JSON tableau layout and the persisted
//! high score. Everything here fails fast with descriptive errors; the
//! core crate stays free of I/O.

pub mod layout_json;
pub mod prefs;

pub use layout_json::{
    default_layout, layout_to_json_string, parse_layout, JsonLayout, JsonPile, JsonSlot, JsonVec2,
    DEFAULT_LAYOUT_JSON,
};
pub use prefs::HighScoreFile;
