//! Frame loading from disk formats.
//!
//! The engine is format-agnostic; these loaders are the only place an
//! on-disk layout is named. Both produce plain [`FrameRow`]s for
//! [`crate::table::GameStateTable::new`].
//!
//! CSV carries the nested inventory as an embedded JSON array string (an
//! empty cell means no inventory). JSON input is either a top-level array or
//! newline-delimited objects.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{FrameRow, InventoryItem, Side};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed inventory cell at line {line}: {message}")]
    MalformedInventory { line: u64, message: String },
}

/// CSV row as it appears on disk; the inventory cell is parsed separately.
#[derive(Debug, Deserialize)]
struct CsvFrame {
    round_num: u32,
    tick: i64,
    seconds: f64,
    player: String,
    team: String,
    side: Side,
    x: f64,
    y: f64,
    z: f64,
    area_name: String,
    is_alive: bool,
    #[serde(default)]
    inventory: Option<String>,
}

/// Load frames from a CSV file with a header row.
pub fn load_frames_csv(path: &Path) -> Result<Vec<FrameRow>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();

    for (idx, record) in reader.deserialize::<CsvFrame>().enumerate() {
        let raw = record?;
        // Header occupies line 1.
        let line = idx as u64 + 2;

        let inventory = match raw.inventory.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(cell) => Some(serde_json::from_str::<Vec<InventoryItem>>(cell).map_err(
                |err| LoadError::MalformedInventory {
                    line,
                    message: err.to_string(),
                },
            )?),
        };

        rows.push(FrameRow {
            round_num: raw.round_num,
            tick: raw.tick,
            seconds: raw.seconds,
            player: raw.player,
            team: raw.team,
            side: raw.side,
            x: raw.x,
            y: raw.y,
            z: raw.z,
            area_name: raw.area_name,
            is_alive: raw.is_alive,
            inventory,
        });
    }

    log::info!("loaded {} frames from {}", rows.len(), path.display());
    Ok(rows)
}

/// Load frames from JSON: a top-level array, or one object per line.
pub fn load_frames_json(path: &Path) -> Result<Vec<FrameRow>, LoadError> {
    let contents = fs::read_to_string(path)?;
    let trimmed = contents.trim_start();

    let rows = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<FrameRow>>(trimmed)?
    } else {
        let mut rows = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            rows.push(serde_json::from_str::<FrameRow>(line)?);
        }
        rows
    };

    log::info!("loaded {} frames from {}", rows.len(), path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV_FIXTURE: &str = "\
round_num,tick,seconds,player,team,side,x,y,z,area_name,is_alive,inventory
16,1280,10.0,P1,Team2,T,-2100.5,600.25,300.0,Mid,true,\"[{\"\"weapon_class\"\":\"\"Rifle\"\"},{\"\"weapon_class\"\":\"\"Pistol\"\"}]\"
16,1344,10.5,P2,Team2,T,-2000.0,550.0,310.0,Mid,false,
";

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_csv_with_embedded_inventory() {
        let file = write_temp(CSV_FIXTURE);
        let rows = load_frames_csv(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "P1");
        assert_eq!(rows[0].side, Side::Attack);
        let items = rows[0].inventory.as_ref().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].weapon_class.as_deref(), Some("Rifle"));

        assert!(!rows[1].is_alive);
        assert!(rows[1].inventory.is_none(), "empty cell means no inventory");
    }

    #[test]
    fn test_load_csv_malformed_inventory_names_line() {
        let fixture = "\
round_num,tick,seconds,player,team,side,x,y,z,area_name,is_alive,inventory
1,0,0.0,P1,Team1,CT,0,0,0,Mid,true,not-json
";
        let file = write_temp(fixture);
        let err = load_frames_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInventory { line: 2, .. }));
    }

    #[test]
    fn test_load_json_array() {
        let fixture = r#"[
            {"round_num": 1, "tick": 0, "seconds": 0.0, "player": "P1",
             "team": "Team1", "side": "CT", "x": 1.0, "y": 2.0, "z": 3.0,
             "area_name": "Mid", "is_alive": true,
             "inventory": [{"weapon_class": "SMG"}]}
        ]"#;
        let file = write_temp(fixture);
        let rows = load_frames_json(file.path()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].side, Side::Defense);
        assert_eq!(
            rows[0].inventory.as_ref().unwrap()[0].weapon_class.as_deref(),
            Some("SMG")
        );
    }

    #[test]
    fn test_load_json_lines() {
        let fixture = concat!(
            r#"{"round_num": 1, "tick": 0, "seconds": 0.0, "player": "P1", "team": "Team1", "side": "T", "x": 0, "y": 0, "z": 0, "area_name": "Mid", "is_alive": true}"#,
            "\n\n",
            r#"{"round_num": 1, "tick": 64, "seconds": 0.5, "player": "P2", "team": "Team1", "side": "T", "x": 1, "y": 1, "z": 1, "area_name": "Mid", "is_alive": true}"#,
            "\n",
        );
        let file = write_temp(fixture);
        let rows = load_frames_json(file.path()).unwrap();

        assert_eq!(rows.len(), 2, "blank lines are skipped");
        assert_eq!(rows[1].tick, 64);
    }

    #[test]
    fn test_csv_and_json_agree() {
        let csv_file = write_temp(CSV_FIXTURE);
        let from_csv = load_frames_csv(csv_file.path()).unwrap();

        let json = serde_json::to_string(&from_csv).unwrap();
        let json_file = write_temp(&json);
        let from_json = load_frames_json(json_file.path()).unwrap();

        assert_eq!(from_csv, from_json);
    }
}
