use arena_shooter::collision::*;
use arena_shooter::compute::init_state;
use arena_shooter::config::GameConfig;
use arena_shooter::entities::*;
use arena_shooter::geometry::{Point, Rect, Size};

fn make_state() -> GameState {
    let mut config = GameConfig::default();
    config.instruction_pages = 0;
    config.start_pursuer = None;
    init_state(config)
}

/// A projectile sitting still at `pos` (velocity is irrelevant to `resolve`).
fn shot_at(x: f32, y: f32) -> Projectile {
    Projectile::new(Point::new(x, y), Point::new(x + 1.0, y), 7.0, Size::new(4, 4))
}

fn pursuer_at(x: f32, y: f32) -> Pursuer {
    Pursuer::new(Point::new(x, y), Point::new(400.0, 300.0), 2.75, Size::new(20, 20))
}

fn obstacle_at(x: f32, y: f32) -> Obstacle {
    Obstacle::new(Point::new(x, y), Size::new(15, 15))
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[test]
fn projectile_kills_pursuer() {
    let mut s = make_state();
    s.pursuers.push(pursuer_at(100.0, 100.0));
    s.projectiles.push(shot_at(105.0, 105.0));

    let report = resolve(&mut s);
    assert_eq!(report.pursuers_shot, 1);
    assert_eq!(report.obstacles_shot, 0);
    assert!(s.pursuers.is_empty());
    assert!(s.projectiles.is_empty());
}

#[test]
fn one_projectile_removes_at_most_one_target() {
    let mut s = make_state();
    // two pursuers stacked on the same spot
    s.pursuers.push(pursuer_at(100.0, 100.0));
    s.pursuers.push(pursuer_at(102.0, 102.0));
    s.projectiles.push(shot_at(108.0, 108.0));

    let report = resolve(&mut s);
    assert_eq!(report.pursuers_shot, 1);
    assert_eq!(s.pursuers.len(), 1);
    assert!(s.projectiles.is_empty());
}

#[test]
fn target_is_not_scored_twice() {
    let mut s = make_state();
    s.pursuers.push(pursuer_at(100.0, 100.0));
    s.projectiles.push(shot_at(105.0, 105.0));
    s.projectiles.push(shot_at(110.0, 110.0));

    let report = resolve(&mut s);
    assert_eq!(report.pursuers_shot, 1);
    assert!(s.pursuers.is_empty());
    // the second shot found nothing left to hit and keeps flying
    assert_eq!(s.projectiles.len(), 1);
    assert_eq!(s.projectiles[0].pos, Point::new(110.0, 110.0));
}

#[test]
fn obstacle_takes_the_hit_before_pursuer() {
    let mut s = make_state();
    s.obstacles.push(obstacle_at(100.0, 100.0));
    s.pursuers.push(pursuer_at(100.0, 100.0));
    s.projectiles.push(shot_at(105.0, 105.0));

    let report = resolve(&mut s);
    assert_eq!(report.obstacles_shot, 1);
    assert_eq!(report.pursuers_shot, 0);
    assert!(s.obstacles.is_empty());
    assert_eq!(s.pursuers.len(), 1);
}

#[test]
fn miss_changes_nothing() {
    let mut s = make_state();
    s.obstacles.push(obstacle_at(100.0, 100.0));
    s.pursuers.push(pursuer_at(600.0, 100.0));
    s.projectiles.push(shot_at(300.0, 100.0));

    let report = resolve(&mut s);
    assert_eq!(report, CollisionReport::default());
    assert_eq!(s.obstacles.len(), 1);
    assert_eq!(s.pursuers.len(), 1);
    assert_eq!(s.projectiles.len(), 1);
}

#[test]
fn untouched_entities_keep_their_order() {
    let mut s = make_state();
    s.pursuers.push(pursuer_at(50.0, 50.0));
    s.pursuers.push(pursuer_at(100.0, 100.0));
    s.pursuers.push(pursuer_at(700.0, 50.0));
    s.projectiles.push(shot_at(105.0, 105.0));

    resolve(&mut s);
    let xs: Vec<f32> = s.pursuers.iter().map(|p| p.pos.x).collect();
    assert_eq!(xs, vec![50.0, 700.0]);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_hit_removes_only_first_pursuer() {
    let mut s = make_state();
    s.pursuers.push(pursuer_at(405.0, 305.0));
    s.pursuers.push(pursuer_at(395.0, 295.0));

    let report = resolve(&mut s);
    assert!(report.player_hit);
    assert_eq!(s.pursuers.len(), 1);
    assert_eq!(s.pursuers[0].pos, Point::new(395.0, 295.0));
}

#[test]
fn player_touching_obstacle_gets_stuck() {
    let mut s = make_state();
    s.obstacles.push(obstacle_at(410.0, 310.0));

    let report = resolve(&mut s);
    assert!(report.player_stuck);
    assert!(!report.player_hit);
    assert!(s.obstacles.is_empty());
}

#[test]
fn shot_pursuer_cannot_also_hit_player() {
    let mut s = make_state();
    s.pursuers.push(pursuer_at(405.0, 305.0));
    s.projectiles.push(shot_at(410.0, 310.0));

    let report = resolve(&mut s);
    assert_eq!(report.pursuers_shot, 1);
    assert!(!report.player_hit);
}

#[test]
fn edge_contact_is_not_a_hit() {
    let mut s = make_state();
    // player box spans 400..420; this pursuer starts exactly at 420
    s.pursuers.push(pursuer_at(420.0, 300.0));
    let report = resolve(&mut s);
    assert!(!report.player_hit);
    assert_eq!(s.pursuers.len(), 1);
}

// ── first_overlap ─────────────────────────────────────────────────────────────

#[test]
fn first_overlap_picks_lowest_index() {
    let target = Rect { x: 0, y: 0, w: 10, h: 10 };
    let others = [
        Rect { x: 50, y: 50, w: 5, h: 5 },
        Rect { x: 5, y: 5, w: 5, h: 5 },
        Rect { x: 1, y: 1, w: 5, h: 5 },
    ];
    assert_eq!(first_overlap(&target, others), Some(1));
    assert_eq!(first_overlap(&target, [] as [Rect; 0]), None);
}
