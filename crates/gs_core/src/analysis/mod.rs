//! # Analysis Module
//!
//! Read-only queries over the annotated frame table.
//!
//! ## Submodules
//!
//! - `chokepoint` - distinct (round, player) traffic through the region
//! - `staging` - time until N weapon-qualified players co-occupy an area
//! - `density` - alive presence samples for a rendering sink
//!
//! Every query is a pure read: filters and aggregations produce new
//! collections, the table itself is never touched.

pub mod chokepoint;
pub mod density;
pub mod staging;

pub use chokepoint::chokepoint_usage;
pub use density::{density_doc, density_samples, DensityDoc, DensitySink};
pub use staging::{staging_timer, RoundStaging, StagingParams, StagingReport};
