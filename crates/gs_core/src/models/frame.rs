//! Frame records: one row per player per observed tick.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role a team holds for a round. Closed set; the wire labels are the
/// conventional short forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Attacking side ("T" on the wire).
    #[serde(rename = "T", alias = "attack")]
    Attack,
    /// Defending side ("CT" on the wire).
    #[serde(rename = "CT", alias = "defense")]
    Defense,
}

impl Side {
    /// Wire label, matching the serde representation.
    pub fn label(&self) -> &'static str {
        match self {
            Side::Attack => "T",
            Side::Defense => "CT",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "T" | "ATTACK" => Ok(Side::Attack),
            "CT" | "DEFENSE" => Ok(Side::Defense),
            other => Err(format!("unknown side: {} (expected T or CT)", other)),
        }
    }
}

/// One carried item in a frame's inventory snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    /// Coarse category label (Rifle, SMG, Pistol, ...). Every downstream
    /// consumer keys on this; a missing value is a data-integrity error, not
    /// something to default over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_class: Option<String>,
}

/// One observed player state at one tick.
///
/// A player appears at most once per (round_num, tick); `seconds` is
/// non-decreasing with `tick` within a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRow {
    pub round_num: u32,
    pub tick: i64,
    /// Elapsed seconds within the round.
    pub seconds: f64,
    /// Unique within a round; may recur across rounds.
    pub player: String,
    pub team: String,
    pub side: Side,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Named map region baked into the data, distinct from the query polygon.
    pub area_name: String,
    pub is_alive: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryItem>>,
}

/// A frame plus the derived columns added by the annotation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedFrame {
    pub row: FrameRow,
    /// True iff (x, y) lies within the configured polygon and z within the
    /// configured range.
    pub is_inside: bool,
    /// Weapon-class labels carried in this frame, duplicates preserved.
    pub weapon_classes: Vec<String>,
}
