//! Per-tick collision resolution.
//!
//! Order matters and is fixed: projectiles against obstacles and pursuers
//! first, then the player against pursuers, then the player against
//! obstacles. Anything removed in an earlier pass is gone for later ones.

use crate::entities::{Body, GameState};
use crate::geometry::Rect;

/// What happened during one resolution pass. Scoring and lives are applied
/// by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub obstacles_shot: u32,
    pub pursuers_shot: u32,
    /// The player touched a pursuer (which is now removed).
    pub player_hit: bool,
    /// The player touched an obstacle (which is now removed).
    pub player_stuck: bool,
}

pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = resolve_shots(state);

    let player = state.player.bounds();
    if let Some(i) = first_overlap(&player, state.pursuers.iter().map(Body::bounds)) {
        state.pursuers.remove(i);
        report.player_hit = true;
    }
    if let Some(i) = first_overlap(&player, state.obstacles.iter().map(Body::bounds)) {
        state.obstacles.remove(i);
        report.player_stuck = true;
    }

    report
}

/// Each projectile takes out at most one target: the first obstacle it
/// overlaps, otherwise the first pursuer. A target already hit this pass is
/// skipped, so two projectiles cannot score the same kill.
fn resolve_shots(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();

    let mut used_projectiles = vec![false; state.projectiles.len()];
    let mut hit_obstacles = vec![false; state.obstacles.len()];
    let mut hit_pursuers = vec![false; state.pursuers.len()];

    for (pi, projectile) in state.projectiles.iter().enumerate() {
        let shot = projectile.bounds();

        let obstacle = state
            .obstacles
            .iter()
            .enumerate()
            .find(|(oi, o)| !hit_obstacles[*oi] && shot.overlaps(&o.bounds()))
            .map(|(oi, _)| oi);
        if let Some(oi) = obstacle {
            hit_obstacles[oi] = true;
            used_projectiles[pi] = true;
            report.obstacles_shot += 1;
            continue;
        }

        let pursuer = state
            .pursuers
            .iter()
            .enumerate()
            .find(|(ei, e)| !hit_pursuers[*ei] && shot.overlaps(&e.bounds()))
            .map(|(ei, _)| ei);
        if let Some(ei) = pursuer {
            hit_pursuers[ei] = true;
            used_projectiles[pi] = true;
            report.pursuers_shot += 1;
        }
    }

    retain_unmarked(&mut state.projectiles, &used_projectiles);
    retain_unmarked(&mut state.obstacles, &hit_obstacles);
    retain_unmarked(&mut state.pursuers, &hit_pursuers);

    report
}

/// Index of the first rect in `others` overlapping `target`.
pub fn first_overlap(target: &Rect, others: impl IntoIterator<Item = Rect>) -> Option<usize> {
    others.into_iter().position(|r| target.overlaps(&r))
}

fn retain_unmarked<T>(items: &mut Vec<T>, removed: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !removed[idx];
        idx += 1;
        keep
    });
}
