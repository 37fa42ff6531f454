//! # gs_core - Round-Based Match Telemetry Analysis Engine
//!
//! Ingests positional telemetry from a multiplayer match (per-tick player
//! position, team, side, inventory, area) and answers fixed analytical
//! questions:
//! - whether a team routes through a caller-defined chokepoint region
//! - how long a team takes to stage N weapon-qualified players into an area
//! - the spatial density of a team's alive presence in an area
//!
//! ## Pipeline
//! raw frames -> one-pass annotation ([`GameStateTable::new`]) -> read-only
//! queries ([`analysis`]). The table is built once per dataset and never
//! mutated afterwards; every query produces a new, independent result
//! collection.

pub mod analysis;
pub mod api;
pub mod data;
pub mod error;
pub mod geometry;
pub mod inventory;
pub mod models;
pub mod table;

pub use analysis::{
    chokepoint_usage, density_doc, density_samples, staging_timer, DensityDoc, DensitySink,
    RoundStaging, StagingParams, StagingReport,
};
pub use api::{run_query_json, QueryKind, QueryRequest, QueryResponse, UsageEntry, SCHEMA_VERSION};
pub use data::{load_frames_csv, load_frames_json, LoadError};
pub use error::{AnalysisError, Result};
pub use geometry::{Polygon, RegionSpec, Vertex, ZRange};
pub use inventory::extract_weapon_classes;
pub use models::{AnnotatedFrame, FrameRow, InventoryItem, Side};
pub use table::GameStateTable;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
