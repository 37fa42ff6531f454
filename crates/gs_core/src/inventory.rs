//! Inventory flattening: per-row nested item records to weapon-class labels.

use fxhash::FxHashSet;

use crate::error::{AnalysisError, Result};
use crate::models::FrameRow;

/// Flatten a frame's inventory snapshot into its weapon-class labels.
///
/// An absent or empty inventory yields an empty vec. Duplicate classes are
/// preserved: only membership is tested today, but collapsing them here would
/// silently change semantics for any count-based consumer.
///
/// An item without a `weapon_class` surfaces as
/// [`AnalysisError::MissingWeaponClass`]; defaulting it would corrupt the
/// staging query downstream.
pub fn extract_weapon_classes(row: &FrameRow) -> Result<Vec<String>> {
    let Some(items) = row.inventory.as_deref() else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .map(|item| {
            item.weapon_class
                .clone()
                .ok_or_else(|| AnalysisError::MissingWeaponClass {
                    round_num: row.round_num,
                    player: row.player.clone(),
                })
        })
        .collect()
}

/// Any-of membership test between a frame's classes and a target set.
pub fn has_any_class(classes: &[String], targets: &FxHashSet<&str>) -> bool {
    classes.iter().any(|c| targets.contains(c.as_str()))
}
