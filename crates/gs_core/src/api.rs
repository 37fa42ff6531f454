//! JSON query API.
//!
//! String-in/string-out entry points so host layers (CLI, FFI, scripting)
//! can drive queries without touching the model types. Requests carry a
//! `schema_version` that must match [`SCHEMA_VERSION`].

use serde::{Deserialize, Serialize};

use crate::analysis::{RoundStaging, StagingParams};
use crate::error::{AnalysisError, Result};
use crate::models::{AnnotatedFrame, Side};
use crate::table::GameStateTable;

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub query: QueryKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryKind {
    ChokepointUsage {
        team: String,
        side: Side,
    },
    StagingTimer {
        team: String,
        side: Side,
        area: String,
        target_classes: Vec<String>,
        min_players: usize,
    },
    DensitySamples {
        team: String,
        side: Side,
        area: String,
    },
}

/// One retained row of the chokepoint-usage result. A summary view: which
/// frame of a (round, player) pair was retained carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub round_num: u32,
    pub player: String,
    pub tick: i64,
    pub seconds: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub area_name: String,
}

impl From<&AnnotatedFrame> for UsageEntry {
    fn from(frame: &AnnotatedFrame) -> Self {
        UsageEntry {
            round_num: frame.row.round_num,
            player: frame.row.player.clone(),
            tick: frame.row.tick,
            seconds: frame.row.seconds,
            x: frame.row.x,
            y: frame.row.y,
            z: frame.row.z,
            area_name: frame.row.area_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryResponse {
    ChokepointUsage {
        schema_version: u8,
        entries: Vec<UsageEntry>,
    },
    StagingTimer {
        schema_version: u8,
        rounds: Vec<RoundStaging>,
        /// `null` means no qualifying round, spelled out rather than NaN.
        mean_seconds: Option<f64>,
    },
    DensitySamples {
        schema_version: u8,
        team: String,
        side: Side,
        area: String,
        samples: Vec<(f64, f64)>,
    },
}

/// Parse `request`, run it against `table`, serialize the response.
pub fn run_query_json(table: &GameStateTable, request: &str) -> Result<String> {
    let request: QueryRequest = serde_json::from_str(request)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(AnalysisError::SchemaVersionMismatch {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let response = match request.query {
        QueryKind::ChokepointUsage { team, side } => QueryResponse::ChokepointUsage {
            schema_version: SCHEMA_VERSION,
            entries: table
                .chokepoint_usage(&team, side)
                .into_iter()
                .map(UsageEntry::from)
                .collect(),
        },
        QueryKind::StagingTimer {
            team,
            side,
            area,
            target_classes,
            min_players,
        } => {
            let report = table.staging_timer(&StagingParams {
                team,
                side,
                area,
                target_classes,
                min_players,
            })?;
            QueryResponse::StagingTimer {
                schema_version: SCHEMA_VERSION,
                rounds: report.rounds,
                mean_seconds: report.mean_seconds,
            }
        }
        QueryKind::DensitySamples { team, side, area } => {
            let samples = table.density_samples(&team, side, &area);
            QueryResponse::DensitySamples {
                schema_version: SCHEMA_VERSION,
                team,
                side,
                area,
                samples,
            }
        }
    };

    Ok(serde_json::to_string(&response)?)
}
