//! Randomised enemy placement.
//!
//! Candidates are drawn uniformly from the spawn band (below the HUD, above
//! the bottom margin) and rejected until they are far enough from the player
//! on both axes. Sampling gives up after `spawn_attempts` tries so a crowded
//! arena cannot stall the tick.

use rand::Rng;

use crate::entities::{GameState, Obstacle, Pursuer};
use crate::geometry::Point;

/// What a spawn wave actually placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub pursuer: bool,
    pub obstacle: bool,
}

/// Sample a point whose per-axis distance from `player` exceeds
/// `min_distance` on both x and y. `None` once `attempts` are used up.
pub fn find_spawn_point(
    state: &GameState,
    min_distance: f32,
    rng: &mut impl Rng,
) -> Option<Point> {
    let cfg = &state.config;
    let arena = &cfg.arena;
    let x_max = arena.width as i32;
    let y_min = arena.hud_height as i32;
    let y_max = (arena.height - cfg.spawn_bottom_margin) as i32;
    if x_max <= 0 || y_max <= y_min {
        return None;
    }

    let player = state.player.pos;
    for _ in 0..cfg.spawn_attempts {
        let candidate = Point::new(
            rng.gen_range(0..x_max) as f32,
            rng.gen_range(y_min..y_max) as f32,
        );
        if (candidate.x - player.x).abs() > min_distance
            && (candidate.y - player.y).abs() > min_distance
        {
            return Some(candidate);
        }
    }
    None
}

/// One spawn event: at most one pursuer and one obstacle, each only while
/// its collection is under capacity.
pub fn spawn_wave(state: &mut GameState, rng: &mut impl Rng) -> SpawnReport {
    let mut report = SpawnReport::default();

    if state.pursuers.len() < state.config.max_pursuers {
        match find_spawn_point(state, state.config.pursuer_min_distance, rng) {
            Some(pos) => {
                let cfg = &state.config;
                state.pursuers.push(Pursuer::new(
                    pos,
                    state.player.pos,
                    cfg.pursuer_speed,
                    cfg.pursuer_size,
                ));
                report.pursuer = true;
            }
            None => log::debug!("pursuer spawn skipped: no free spot"),
        }
    }

    if state.obstacles.len() < state.max_obstacles {
        match find_spawn_point(state, state.config.obstacle_min_distance, rng) {
            Some(pos) => {
                state
                    .obstacles
                    .push(Obstacle::new(pos, state.config.obstacle_size));
                report.obstacle = true;
            }
            None => log::debug!("obstacle spawn skipped: no free spot"),
        }
    }

    report
}
