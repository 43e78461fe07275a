//! Layout asset parsing.
//!
//! The on-disk format mirrors the original JSON layout file: a position
//! multiplier, one entry per mine slot (with `faceup`, `hiddenby`, and a
//! `"Row N"` layer name), and anchors for the draw and discard piles.
//! Malformed files fail here, at load time, with a descriptive error; the
//! round never starts from a bad layout.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use prospector_core::layout::{LayoutSlot, PileAnchor, TableauLayout};
use prospector_types::Vec2;

/// The default tableau: three peaks over a ten-card open row.
pub const DEFAULT_LAYOUT_JSON: &str = include_str!("../data/layout.json");

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsonVec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSlot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    #[serde(rename = "faceup", default)]
    pub face_up: bool,
    /// Sorting layer name; the trailing digit is the tableau row.
    pub layer: String,
    #[serde(rename = "hiddenby", default)]
    pub hidden_by: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPile {
    pub x: f32,
    pub y: f32,
    #[serde(rename = "xstagger", default)]
    pub stagger_x: f32,
    pub layer: String,
}

/// Top-level layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonLayout {
    pub multiplier: JsonVec2,
    pub slots: Vec<JsonSlot>,
    #[serde(rename = "drawPile")]
    pub draw_pile: JsonPile,
    #[serde(rename = "discardPile")]
    pub discard_pile: JsonPile,
}

/// Parse and validate a layout file.
pub fn parse_layout(json: &str) -> Result<TableauLayout> {
    let parsed: JsonLayout =
        serde_json::from_str(json).context("malformed layout JSON")?;
    let layout = to_tableau(&parsed)?;
    layout.validate().context("invalid layout")?;
    Ok(layout)
}

/// The embedded default layout. Infallible in practice; the error path
/// exists so a broken build asset fails loudly instead of panicking.
pub fn default_layout() -> Result<TableauLayout> {
    parse_layout(DEFAULT_LAYOUT_JSON).context("embedded default layout is broken")
}

fn to_tableau(json: &JsonLayout) -> Result<TableauLayout> {
    let mut slots = Vec::with_capacity(json.slots.len());
    for slot in &json.slots {
        slots.push(LayoutSlot {
            id: slot.id,
            x: slot.x,
            y: slot.y,
            face_up: slot.face_up,
            row: layer_row(&slot.layer)
                .with_context(|| format!("slot {}: bad layer {:?}", slot.id, slot.layer))?,
            hidden_by: slot.hidden_by.clone(),
        });
    }
    Ok(TableauLayout {
        multiplier: Vec2::new(json.multiplier.x, json.multiplier.y),
        slots,
        draw_pile: anchor(&json.draw_pile),
        discard_pile: anchor(&json.discard_pile),
    })
}

fn anchor(pile: &JsonPile) -> PileAnchor {
    PileAnchor {
        x: pile.x,
        y: pile.y,
        stagger_x: pile.stagger_x,
    }
}

/// Row number from a `"Row N"` layer name (its trailing digit).
fn layer_row(layer: &str) -> Result<u8> {
    match layer.chars().last().and_then(|c| c.to_digit(10)) {
        Some(row) => Ok(row as u8),
        None => bail!("layer name must end in a row digit"),
    }
}

/// Serialize a tableau back into the on-disk format.
pub fn layout_to_json_string(layout: &TableauLayout) -> Result<String> {
    let json = JsonLayout {
        multiplier: JsonVec2 {
            x: layout.multiplier.x,
            y: layout.multiplier.y,
        },
        slots: layout
            .slots
            .iter()
            .map(|slot| JsonSlot {
                id: slot.id,
                x: slot.x,
                y: slot.y,
                face_up: slot.face_up,
                layer: format!("Row {}", slot.row),
                hidden_by: slot.hidden_by.clone(),
            })
            .collect(),
        draw_pile: JsonPile {
            x: layout.draw_pile.x,
            y: layout.draw_pile.y,
            stagger_x: layout.draw_pile.stagger_x,
            layer: "Draw".to_string(),
        },
        discard_pile: JsonPile {
            x: layout.discard_pile.x,
            y: layout.discard_pile.y,
            stagger_x: layout.discard_pile.stagger_x,
            layer: "Discard".to_string(),
        },
    };
    serde_json::to_string_pretty(&json).context("serializing layout")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_parses_and_validates() {
        let layout = default_layout().unwrap();
        assert_eq!(layout.slots.len(), 28);

        // Ten open bottom cards, everything else starts covered.
        let open = layout.slots.iter().filter(|s| s.face_up).count();
        assert_eq!(open, 10);
        for slot in &layout.slots {
            assert_eq!(slot.face_up, slot.hidden_by.is_empty());
        }
    }

    #[test]
    fn default_layout_rows_come_from_layer_names() {
        let layout = default_layout().unwrap();
        let peaks = layout.slots.iter().filter(|s| s.row == 0).count();
        let bottom = layout.slots.iter().filter(|s| s.row == 3).count();
        assert_eq!(peaks, 3);
        assert_eq!(bottom, 10);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(parse_layout("not json").is_err());
        assert!(parse_layout("{}").is_err());
    }

    #[test]
    fn bad_layer_name_is_rejected_with_slot_context() {
        let json = r#"{
            "multiplier": {"x": 1.0, "y": 1.0},
            "slots": [{"id": 7, "x": 0.0, "y": 0.0, "faceup": true, "layer": "Row"}],
            "drawPile": {"x": 1.0, "y": 0.0, "xstagger": 0.1, "layer": "Draw"},
            "discardPile": {"x": -1.0, "y": 0.0, "layer": "Discard"}
        }"#;
        let err = format!("{:#}", parse_layout(json).unwrap_err());
        assert!(err.contains("slot 7"), "{err}");
    }

    #[test]
    fn unknown_occluder_fails_validation() {
        let json = r#"{
            "multiplier": {"x": 1.0, "y": 1.0},
            "slots": [
                {"id": 0, "x": 0.0, "y": 0.0, "faceup": true, "layer": "Row 0", "hiddenby": [42]}
            ],
            "drawPile": {"x": 1.0, "y": 0.0, "xstagger": 0.1, "layer": "Draw"},
            "discardPile": {"x": -1.0, "y": 0.0, "layer": "Discard"}
        }"#;
        assert!(parse_layout(json).is_err());
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "multiplier": {"x": 1.0, "y": 1.0},
            "slots": [{"id": 0, "x": 0.0, "y": 0.0, "layer": "Row 0"}],
            "drawPile": {"x": 1.0, "y": 0.0, "layer": "Draw"},
            "discardPile": {"x": -1.0, "y": 0.0, "layer": "Discard"}
        }"#;
        let layout = parse_layout(json).unwrap();
        assert!(!layout.slots[0].face_up);
        assert!(layout.slots[0].hidden_by.is_empty());
        assert_eq!(layout.draw_pile.stagger_x, 0.0);
    }

    #[test]
    fn round_trips_to_an_identical_tableau() {
        let layout = default_layout().unwrap();
        let json = layout_to_json_string(&layout).unwrap();
        let reloaded = parse_layout(&json).unwrap();
        assert_eq!(layout, reloaded);
    }
}
