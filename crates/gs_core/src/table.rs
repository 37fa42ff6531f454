//! The annotated frame table: one-pass derivation, immutable afterwards.

use crate::analysis::{self, DensityDoc, StagingParams, StagingReport};
use crate::error::Result;
use crate::geometry::RegionSpec;
use crate::inventory::extract_weapon_classes;
use crate::models::{AnnotatedFrame, FrameRow, Side};

/// Immutable table of annotated telemetry frames.
///
/// Built once per dataset: the constructor runs the single annotation pass
/// (region membership + weapon-class extraction) and the result is read-only
/// for the lifetime of the process. Queries borrow frames; nothing writes
/// back, so the derivation is idempotent by construction.
#[derive(Debug)]
pub struct GameStateTable {
    frames: Vec<AnnotatedFrame>,
    region: RegionSpec,
}

impl GameStateTable {
    /// Annotate `rows` against `region`. O(R·V) for R rows and V polygon
    /// vertices. Fails on the first malformed inventory item.
    pub fn new(rows: Vec<FrameRow>, region: RegionSpec) -> Result<Self> {
        let mut frames = Vec::with_capacity(rows.len());
        for row in rows {
            let weapon_classes = extract_weapon_classes(&row)?;
            let is_inside = region.contains(row.x, row.y, row.z);
            frames.push(AnnotatedFrame {
                row,
                is_inside,
                weapon_classes,
            });
        }

        log::debug!(
            "annotated {} frames against a {}-vertex region",
            frames.len(),
            region.polygon().vertices().len()
        );

        Ok(Self { frames, region })
    }

    pub fn frames(&self) -> &[AnnotatedFrame] {
        &self.frames
    }

    pub fn region(&self) -> &RegionSpec {
        &self.region
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// See [`analysis::chokepoint_usage`].
    pub fn chokepoint_usage(&self, team: &str, side: Side) -> Vec<&AnnotatedFrame> {
        analysis::chokepoint_usage(&self.frames, team, side)
    }

    /// See [`analysis::staging_timer`].
    pub fn staging_timer(&self, params: &StagingParams) -> Result<StagingReport> {
        analysis::staging_timer(&self.frames, params)
    }

    /// See [`analysis::density_samples`].
    pub fn density_samples(&self, team: &str, side: Side, area: &str) -> Vec<(f64, f64)> {
        analysis::density_samples(&self.frames, team, side, area)
    }

    /// See [`analysis::density_doc`].
    pub fn density_doc(&self, team: &str, side: Side, area: &str) -> Result<DensityDoc> {
        analysis::density_doc(&self.frames, team, side, area)
    }
}
