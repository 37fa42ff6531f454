//! Staging timer: when the Nth weapon-qualified player first stands in the
//! target area, averaged across rounds.
//!
//! ## Algorithm (per round, rounds independent)
//! 1. Filter to team, side, area, and weapon-class intersection
//! 2. Stable sort by `tick` (ties keep original row order)
//! 3. Deduplicate by player, first occurrence after the sort
//! 4. Round value = `seconds` at the min_players-th distinct player
//! 5. Mean over qualifying rounds; rounds below the threshold are excluded,
//!    never zero-filled

use std::collections::BTreeMap;

use fxhash::FxHashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::inventory::has_any_class;
use crate::models::{AnnotatedFrame, Side};

/// Rounds above this count are reduced in parallel; below it the sequential
/// path avoids the thread-pool overhead.
const PARALLEL_ROUND_THRESHOLD: usize = 32;

/// Query-level configuration for the staging timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingParams {
    pub team: String,
    pub side: Side,
    /// Named map area, e.g. "BombsiteB".
    pub area: String,
    /// Weapon classes that qualify a player (any-of membership).
    pub target_classes: Vec<String>,
    /// How many distinct qualifying players must have been present.
    pub min_players: usize,
}

/// The threshold crossing for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStaging {
    pub round_num: u32,
    /// Seconds at which the min_players-th distinct qualifier first appeared
    /// (the moment the threshold is crossed, not the first player's time).
    pub seconds: f64,
}

/// Aggregated staging result across rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingReport {
    /// Qualifying rounds in ascending round order.
    pub rounds: Vec<RoundStaging>,
    /// Arithmetic mean over qualifying rounds. `None` means no round ever
    /// reached the threshold; callers must handle it, it is not an error.
    pub mean_seconds: Option<f64>,
}

/// Run the staging-timer query. `min_players` is 1-indexed: 2 means "the
/// moment a second distinct qualifying player is present".
pub fn staging_timer(frames: &[AnnotatedFrame], params: &StagingParams) -> Result<StagingReport> {
    if params.min_players == 0 {
        return Err(AnalysisError::InvalidMinPlayers { value: 0 });
    }

    // Recomputed from the target set on every call; qualification is never
    // stored on the table, so calls with different targets cannot interfere.
    let targets: FxHashSet<&str> = params.target_classes.iter().map(String::as_str).collect();

    // Partition by round. Pushing in table order keeps each group in
    // original row order, which the stable sort below relies on.
    let mut by_round: BTreeMap<u32, Vec<&AnnotatedFrame>> = BTreeMap::new();
    for frame in frames {
        if frame.row.side != params.side
            || frame.row.team != params.team
            || frame.row.area_name != params.area
            || !has_any_class(&frame.weapon_classes, &targets)
        {
            continue;
        }
        by_round.entry(frame.row.round_num).or_default().push(frame);
    }

    let groups: Vec<(u32, Vec<&AnnotatedFrame>)> = by_round.into_iter().collect();

    // Rounds are independent partitions; the merge is deterministic either
    // way because groups stay in ascending round order.
    let per_round: Vec<Option<RoundStaging>> = if groups.len() > PARALLEL_ROUND_THRESHOLD {
        groups
            .par_iter()
            .map(|(round, group)| round_staging(*round, group, params.min_players))
            .collect()
    } else {
        groups
            .iter()
            .map(|(round, group)| round_staging(*round, group, params.min_players))
            .collect()
    };

    let rounds: Vec<RoundStaging> = per_round.into_iter().flatten().collect();
    let mean_seconds = if rounds.is_empty() {
        None
    } else {
        Some(rounds.iter().map(|r| r.seconds).sum::<f64>() / rounds.len() as f64)
    };

    log::debug!(
        "staging timer {}/{} in {}: {} qualifying round(s), mean {:?}",
        params.team,
        params.side,
        params.area,
        rounds.len(),
        mean_seconds
    );

    Ok(StagingReport {
        rounds,
        mean_seconds,
    })
}

/// Reduce one round: stable sort by tick, walk distinct players in order of
/// first qualifying presence, report the moment the threshold is crossed.
fn round_staging(
    round_num: u32,
    group: &[&AnnotatedFrame],
    min_players: usize,
) -> Option<RoundStaging> {
    let mut ordered: Vec<&AnnotatedFrame> = group.to_vec();
    // Stable: frames sharing a tick keep their original order, which is the
    // documented tie-break for identical timestamps.
    ordered.sort_by_key(|f| f.row.tick);

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for frame in ordered {
        if seen.insert(frame.row.player.as_str()) && seen.len() == min_players {
            return Some(RoundStaging {
                round_num,
                seconds: frame.row.seconds,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FrameRow;

    fn make_frame(
        round_num: u32,
        tick: i64,
        seconds: f64,
        player: &str,
        classes: &[&str],
    ) -> AnnotatedFrame {
        AnnotatedFrame {
            row: FrameRow {
                round_num,
                tick,
                seconds,
                player: player.to_string(),
                team: "Team2".to_string(),
                side: Side::Attack,
                x: 0.0,
                y: 0.0,
                z: 0.0,
                area_name: "BombsiteB".to_string(),
                is_alive: true,
                inventory: None,
            },
            is_inside: false,
            weapon_classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn params(min_players: usize) -> StagingParams {
        StagingParams {
            team: "Team2".to_string(),
            side: Side::Attack,
            area: "BombsiteB".to_string(),
            target_classes: vec!["Rifle".to_string(), "SMG".to_string()],
            min_players,
        }
    }

    #[test]
    fn test_min_players_zero_rejected() {
        let err = staging_timer(&[], &params(0)).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_threshold_crossed_at_nth_player_by_time() {
        // P1 arrives at 10s, P2 at 15s, P3 at 12s. Sorted by tick the second
        // distinct qualifier is P3, so the answer is 12.0, not P2's 15.0.
        let frames = vec![
            make_frame(1, 1280, 10.0, "P1", &["Rifle"]),
            make_frame(1, 1920, 15.0, "P2", &["SMG"]),
            make_frame(1, 1536, 12.0, "P3", &["Rifle"]),
        ];

        let report = staging_timer(&frames, &params(2)).unwrap();
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.rounds[0].seconds, 12.0);
        assert_eq!(report.mean_seconds, Some(12.0));
    }

    #[test]
    fn test_round_with_exactly_min_players_uses_last_qualifier() {
        let frames = vec![
            make_frame(1, 100, 5.0, "P1", &["Rifle"]),
            make_frame(1, 400, 9.0, "P2", &["SMG"]),
        ];

        let report = staging_timer(&frames, &params(2)).unwrap();
        assert_eq!(
            report.rounds[0].seconds, 9.0,
            "time of the 2nd distinct player, not the 1st"
        );
    }

    #[test]
    fn test_repeat_frames_of_same_player_do_not_count() {
        let frames = vec![
            make_frame(1, 100, 5.0, "P1", &["Rifle"]),
            make_frame(1, 200, 6.0, "P1", &["Rifle"]),
            make_frame(1, 300, 7.0, "P1", &["Rifle"]),
        ];

        let report = staging_timer(&frames, &params(2)).unwrap();
        assert!(report.rounds.is_empty(), "one distinct player never crosses 2");
        assert_eq!(report.mean_seconds, None);
    }

    #[test]
    fn test_underfilled_rounds_excluded_not_zero_filled() {
        // Round 1 qualifies at 12.0s; round 2 has a single qualifier and must
        // be excluded from the mean entirely.
        let frames = vec![
            make_frame(1, 100, 10.0, "P1", &["Rifle"]),
            make_frame(1, 200, 12.0, "P2", &["SMG"]),
            make_frame(2, 100, 3.0, "P1", &["Rifle"]),
        ];

        let report = staging_timer(&frames, &params(2)).unwrap();
        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.mean_seconds, Some(12.0), "12.0, not (12.0 + 0) / 2");
    }

    #[test]
    fn test_weapon_filter_recomputed_per_call() {
        let frames = vec![
            make_frame(1, 100, 4.0, "P1", &["Pistol"]),
            make_frame(1, 200, 6.0, "P2", &["Rifle"]),
            make_frame(1, 300, 8.0, "P3", &["Pistol"]),
        ];

        let rifles = staging_timer(&frames, &params(2)).unwrap();
        assert!(rifles.rounds.is_empty(), "only P2 carries a target class");

        let mut pistols = params(2);
        pistols.target_classes = vec!["Pistol".to_string()];
        let report = staging_timer(&frames, &pistols).unwrap();
        assert_eq!(report.rounds[0].seconds, 8.0);

        // And the first query still sees the same data afterwards.
        let rifles_again = staging_timer(&frames, &params(2)).unwrap();
        assert_eq!(rifles_again, rifles, "no cross-call interference");
    }

    #[test]
    fn test_identical_tick_tie_break_is_original_order() {
        let frames = vec![
            make_frame(1, 100, 5.0, "P1", &["Rifle"]),
            make_frame(1, 100, 5.0, "P2", &["Rifle"]),
            make_frame(1, 100, 5.0, "P3", &["Rifle"]),
        ];

        let report = staging_timer(&frames, &params(2)).unwrap();
        assert_eq!(report.rounds[0].seconds, 5.0);
    }

    #[test]
    fn test_filters_exclude_other_team_side_area() {
        let mut other_team = make_frame(1, 100, 5.0, "X1", &["Rifle"]);
        other_team.row.team = "Team1".to_string();
        let mut other_side = make_frame(1, 110, 5.1, "X2", &["Rifle"]);
        other_side.row.side = Side::Defense;
        let mut other_area = make_frame(1, 120, 5.2, "X3", &["Rifle"]);
        other_area.row.area_name = "BombsiteA".to_string();

        let frames = vec![
            other_team,
            other_side,
            other_area,
            make_frame(1, 200, 7.0, "P1", &["Rifle"]),
            make_frame(1, 300, 9.0, "P2", &["Rifle"]),
        ];

        let report = staging_timer(&frames, &params(2)).unwrap();
        assert_eq!(report.rounds[0].seconds, 9.0);
    }

    #[test]
    fn test_parallel_path_matches_sequential_semantics() {
        // Enough rounds to cross PARALLEL_ROUND_THRESHOLD. Round r qualifies
        // at r seconds, so the mean is the mean of 1..=40.
        let mut frames = Vec::new();
        for round in 1..=40u32 {
            frames.push(make_frame(round, 100, round as f64 - 0.5, "P1", &["Rifle"]));
            frames.push(make_frame(round, 200, round as f64, "P2", &["SMG"]));
        }

        let report = staging_timer(&frames, &params(2)).unwrap();
        assert_eq!(report.rounds.len(), 40);

        let rounds: Vec<u32> = report.rounds.iter().map(|r| r.round_num).collect();
        let mut sorted = rounds.clone();
        sorted.sort_unstable();
        assert_eq!(rounds, sorted, "ascending round order regardless of schedule");

        let expected = (1..=40).map(f64::from).sum::<f64>() / 40.0;
        assert!((report.mean_seconds.unwrap() - expected).abs() < 1e-9);
    }
}
