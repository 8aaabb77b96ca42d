use super::{TilePoint, TILE_SIZE_PX};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Raw authored placement, as it appears in a world-object document. The
/// pixel position is the authoring tool's; the grid tile is derived from it.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub properties: serde_json::Map<String, Value>,
}

impl PlacementRecord {
    fn tile(&self) -> TilePoint {
        TilePoint {
            x: (self.x / TILE_SIZE_PX).floor() as i32,
            y: (self.y / TILE_SIZE_PX).floor() as i32,
        }
    }

    fn string_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldObject {
    /// Enterable door; `interior` names the interior it leads to.
    Door { tile: TilePoint, interior: String },
    Sign { tile: TilePoint, text: String },
    Npc {
        tile: TilePoint,
        id: String,
        text: Option<String>,
        tint: Option<u32>,
    },
    Spawn { tile: TilePoint, name: String },
    /// Interior walk-off tile that returns to the overworld.
    Exit { tile: TilePoint },
}

impl WorldObject {
    pub fn tile(&self) -> TilePoint {
        match self {
            WorldObject::Door { tile, .. }
            | WorldObject::Sign { tile, .. }
            | WorldObject::Npc { tile, .. }
            | WorldObject::Spawn { tile, .. }
            | WorldObject::Exit { tile } => *tile,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldObjectError {
    #[error("unknown object kind '{kind}' for object '{name}'")]
    UnknownKind { kind: String, name: String },
    #[error("door at tile ({x}, {y}) has no interior name")]
    DoorWithoutInterior { x: i32, y: i32 },
    #[error("tint '{raw}' on npc '{name}' is not a number or 0x-prefixed hex string")]
    InvalidTint { name: String, raw: String },
}

/// Validate raw placements into typed world objects. Runs once at scene
/// load; any failure here is fatal for the scene.
pub fn parse_world_objects(
    records: &[PlacementRecord],
) -> Result<Vec<WorldObject>, WorldObjectError> {
    let mut objects = Vec::with_capacity(records.len());
    for record in records {
        let tile = record.tile();
        let object = match record.kind.as_str() {
            "door" => {
                if record.name.trim().is_empty() {
                    return Err(WorldObjectError::DoorWithoutInterior {
                        x: tile.x,
                        y: tile.y,
                    });
                }
                WorldObject::Door {
                    tile,
                    interior: record.name.clone(),
                }
            }
            "sign" => {
                let text = match record.string_property("text").map(str::trim) {
                    Some(text) if !text.is_empty() => text.to_string(),
                    _ => "...".to_string(),
                };
                WorldObject::Sign { tile, text }
            }
            "npc" => {
                let text = record
                    .string_property("text")
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .map(str::to_string);
                WorldObject::Npc {
                    tile,
                    id: record.name.clone(),
                    text,
                    tint: parse_tint(record)?,
                }
            }
            "spawn" => WorldObject::Spawn {
                tile,
                name: record.name.clone(),
            },
            "exit" => WorldObject::Exit { tile },
            other => {
                return Err(WorldObjectError::UnknownKind {
                    kind: other.to_string(),
                    name: record.name.clone(),
                })
            }
        };
        objects.push(object);
    }
    Ok(objects)
}

fn parse_tint(record: &PlacementRecord) -> Result<Option<u32>, WorldObjectError> {
    let Some(value) = record.properties.get("tint") else {
        return Ok(None);
    };
    if let Some(number) = value.as_u64() {
        return Ok(Some(number as u32));
    }
    if let Some(raw) = value.as_str() {
        if let Some(hex) = raw.strip_prefix("0x") {
            if let Ok(parsed) = u32::from_str_radix(hex, 16) {
                return Ok(Some(parsed));
            }
        }
        return Err(WorldObjectError::InvalidTint {
            name: record.name.clone(),
            raw: raw.to_string(),
        });
    }
    Err(WorldObjectError::InvalidTint {
        name: record.name.clone(),
        raw: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: &str, name: &str, x: f32, y: f32) -> PlacementRecord {
        PlacementRecord {
            kind: kind.to_string(),
            name: name.to_string(),
            x,
            y,
            properties: serde_json::Map::new(),
        }
    }

    fn with_property(mut record: PlacementRecord, key: &str, value: Value) -> PlacementRecord {
        record.properties.insert(key.to_string(), value);
        record
    }

    #[test]
    fn pixel_positions_map_to_containing_tile() {
        let objects =
            parse_world_objects(&[record("door", "padua_home", 40.0, 71.9)]).unwrap();
        assert_eq!(
            objects,
            vec![WorldObject::Door {
                tile: TilePoint::new(2, 4),
                interior: "padua_home".to_string(),
            }]
        );
    }

    #[test]
    fn door_without_interior_name_is_an_error() {
        let result = parse_world_objects(&[record("door", "  ", 32.0, 32.0)]);
        assert_eq!(
            result,
            Err(WorldObjectError::DoorWithoutInterior { x: 2, y: 2 })
        );
    }

    #[test]
    fn blank_sign_text_falls_back_to_ellipsis() {
        let sign = with_property(
            record("sign", "sign_a", 0.0, 0.0),
            "text",
            Value::String("   ".to_string()),
        );
        let objects = parse_world_objects(&[sign]).unwrap();
        assert_eq!(
            objects,
            vec![WorldObject::Sign {
                tile: TilePoint::new(0, 0),
                text: "...".to_string(),
            }]
        );
    }

    #[test]
    fn npc_tint_accepts_numbers_and_hex_strings() {
        let numeric = with_property(
            record("npc", "ash", 16.0, 16.0),
            "tint",
            Value::Number(0xff00ff_u64.into()),
        );
        let hex = with_property(
            record("npc", "birch", 32.0, 16.0),
            "tint",
            Value::String("0x33aa77".to_string()),
        );
        let objects = parse_world_objects(&[numeric, hex]).unwrap();
        let tints: Vec<Option<u32>> = objects
            .iter()
            .map(|object| match object {
                WorldObject::Npc { tint, .. } => *tint,
                _ => None,
            })
            .collect();
        assert_eq!(tints, vec![Some(0xff00ff), Some(0x33aa77)]);
    }

    #[test]
    fn npc_tint_rejects_malformed_values() {
        let bad = with_property(
            record("npc", "cedar", 0.0, 0.0),
            "tint",
            Value::String("magenta".to_string()),
        );
        assert_eq!(
            parse_world_objects(&[bad]),
            Err(WorldObjectError::InvalidTint {
                name: "cedar".to_string(),
                raw: "magenta".to_string(),
            })
        );
    }

    #[test]
    fn unknown_kinds_are_rejected_at_load() {
        let result = parse_world_objects(&[record("fountain", "plaza", 0.0, 0.0)]);
        assert_eq!(
            result,
            Err(WorldObjectError::UnknownKind {
                kind: "fountain".to_string(),
                name: "plaza".to_string(),
            })
        );
    }

    #[test]
    fn records_deserialize_from_placement_json() {
        let json = r#"[
            {"type": "npc", "name": "ash", "x": 160, "y": 128,
             "properties": {"text": "Hello there."}},
            {"type": "spawn", "name": "player_spawn", "x": 160, "y": 160}
        ]"#;
        let records: Vec<PlacementRecord> = serde_json::from_str(json).unwrap();
        let objects = parse_world_objects(&records).unwrap();
        assert_eq!(
            objects[0],
            WorldObject::Npc {
                tile: TilePoint::new(10, 8),
                id: "ash".to_string(),
                text: Some("Hello there.".to_string()),
                tint: None,
            }
        );
        assert_eq!(objects[1].tile(), TilePoint::new(10, 10));
    }
}
