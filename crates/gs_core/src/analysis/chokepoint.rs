//! Chokepoint usage: which (round, player) pairs ever routed through the
//! configured region.

use fxhash::FxHashSet;

use crate::models::{AnnotatedFrame, Side};

/// Distinct (round, player) entries observed inside the region while
/// matching `team` and `side`.
///
/// Once a player's presence in a round is established, further frames for
/// that (round, player) add nothing, so the first occurrence is retained and
/// the rest dropped. Original row order is preserved, which keeps the output
/// stable; callers must not read meaning into which frame of a pair was
/// retained. An empty result is a valid outcome: no usage observed.
pub fn chokepoint_usage<'a>(
    frames: &'a [AnnotatedFrame],
    team: &str,
    side: Side,
) -> Vec<&'a AnnotatedFrame> {
    let mut seen: FxHashSet<(u32, &str)> = FxHashSet::default();
    let mut entries = Vec::new();

    for frame in frames {
        if !frame.is_inside || frame.row.side != side || frame.row.team != team {
            continue;
        }
        if seen.insert((frame.row.round_num, frame.row.player.as_str())) {
            entries.push(frame);
        }
    }

    log::debug!(
        "chokepoint usage for {}/{}: {} distinct (round, player) entries",
        team,
        side,
        entries.len()
    );
    entries
}
