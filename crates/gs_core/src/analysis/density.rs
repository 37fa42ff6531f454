//! Density sampling: alive presence points handed off to a rendering sink.
//!
//! The density estimate itself (KDE, histogram, whatever the sink chooses)
//! is not computed here. This module's contract is the correct, filtered
//! sample set, and refusing to hand a sink an empty one.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::models::{AnnotatedFrame, Side};

/// Filtered (x, y) presence samples: alive frames matching team, side and
/// named area. May be empty; emptiness only becomes an error at the
/// [`density_doc`] hand-off.
pub fn density_samples(
    frames: &[AnnotatedFrame],
    team: &str,
    side: Side,
    area: &str,
) -> Vec<(f64, f64)> {
    frames
        .iter()
        .filter(|f| {
            f.row.is_alive && f.row.side == side && f.row.team == team && f.row.area_name == area
        })
        .map(|f| (f.row.x, f.row.y))
        .collect()
}

/// Sample collection packaged for a rendering sink, with the query context a
/// renderer needs for labeling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityDoc {
    pub team: String,
    pub side: Side,
    pub area: String,
    pub samples: Vec<(f64, f64)>,
}

impl DensityDoc {
    /// Axis-aligned bounds of the sample set as ((min_x, min_y),
    /// (max_x, max_y)), or `None` for a (hand-built) empty doc.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let (first, rest) = self.samples.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for &(x, y) in rest {
            min.0 = min.0.min(x);
            min.1 = min.1.min(y);
            max.0 = max.0.max(x);
            max.1 = max.1.max(y);
        }
        Some((min, max))
    }
}

/// Build the document handed to a [`DensitySink`].
///
/// A density estimate over zero points is undefined, so an empty sample set
/// is rejected here with an explicit error instead of flowing through.
pub fn density_doc(
    frames: &[AnnotatedFrame],
    team: &str,
    side: Side,
    area: &str,
) -> Result<DensityDoc> {
    let samples = density_samples(frames, team, side, area);
    if samples.is_empty() {
        return Err(AnalysisError::EmptyDensitySample {
            team: team.to_string(),
            side: side.to_string(),
            area: area.to_string(),
        });
    }

    log::debug!(
        "density doc {}/{} in {}: {} samples",
        team,
        side,
        area,
        samples.len()
    );

    Ok(DensityDoc {
        team: team.to_string(),
        side,
        area: area.to_string(),
        samples,
    })
}

/// Rendering collaborator. Implementations own the estimate and the visual;
/// the engine guarantees the doc it passes is non-empty and correctly
/// filtered.
pub trait DensitySink {
    fn render(&mut self, doc: &DensityDoc) -> std::io::Result<()>;
}
