use arena_shooter::compute::init_state;
use arena_shooter::config::{Arena, GameConfig};
use arena_shooter::entities::*;
use arena_shooter::geometry::{angle_to, distance, Point, Size};

fn arena() -> Arena {
    GameConfig::default().arena
}

fn ctx(arena: &Arena, player: Point) -> TickContext<'_> {
    TickContext { arena, player }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_applies_velocity() {
    let a = arena();
    let mut p = Player::new(Point::new(400.0, 300.0), Size::new(20, 20));
    p.velocity = Velocity::new(3.0, 0.0);
    p.advance(&ctx(&a, p.pos));
    assert_eq!(p.pos, Point::new(403.0, 300.0));
}

#[test]
fn player_diagonal_is_not_normalised() {
    let a = arena();
    let mut p = Player::new(Point::new(400.0, 300.0), Size::new(20, 20));
    p.velocity = Velocity::new(2.0, 2.0);
    p.advance(&ctx(&a, p.pos));
    assert_eq!(p.pos, Point::new(402.0, 302.0));
}

#[test]
fn player_clamps_to_left_and_hud() {
    let a = arena();
    let mut p = Player::new(Point::new(1.0, 31.0), Size::new(20, 20));
    p.velocity = Velocity::new(-3.0, -3.0);
    p.advance(&ctx(&a, p.pos));
    assert_eq!(p.pos, Point::new(0.0, 30.0));
}

#[test]
fn player_box_stays_inside_right_and_bottom() {
    let a = arena();
    let mut p = Player::new(Point::new(779.0, 579.0), Size::new(20, 20));
    p.velocity = Velocity::new(3.0, 3.0);
    p.advance(&ctx(&a, p.pos));
    let b = p.bounds();
    assert_eq!((b.right(), b.bottom()), (800, 600));
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_moves_at_fixed_speed_toward_target() {
    let p = Projectile::new(Point::new(100.0, 100.0), Point::new(200.0, 100.0), 7.0, Size::new(4, 4));
    assert!((p.velocity.dx - 7.0).abs() < 1e-4);
    assert!(p.velocity.dy.abs() < 1e-4);

    let diag = Projectile::new(Point::new(0.0, 0.0), Point::new(30.0, 40.0), 7.0, Size::new(4, 4));
    let speed = diag.velocity.dx.hypot(diag.velocity.dy);
    assert!((speed - 7.0).abs() < 1e-4);
    assert!(diag.velocity.dy > 0.0); // heading down the screen
}

#[test]
fn projectile_does_not_retarget() {
    let a = arena();
    let mut p = Projectile::new(Point::new(100.0, 300.0), Point::new(200.0, 300.0), 7.0, Size::new(4, 4));
    let v = p.velocity;
    for i in 0..10 {
        // player wandering around must not matter
        p.advance(&ctx(&a, Point::new(i as f32 * 50.0, 500.0)));
    }
    assert_eq!(p.velocity, v);
    assert!((p.pos.x - 170.0).abs() < 1e-3);
    assert!((p.pos.y - 300.0).abs() < 1e-3);
}

#[test]
fn projectile_outside_only_past_margin() {
    let a = arena();
    let mut p = Projectile::new(Point::new(-9.0, 300.0), Point::new(-100.0, 300.0), 7.0, Size::new(4, 4));
    assert!(!p.is_outside(&a, 10.0));
    p.pos.x = -11.0;
    assert!(p.is_outside(&a, 10.0));
    p.pos = Point::new(400.0, 611.0);
    assert!(p.is_outside(&a, 10.0));
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[test]
fn obstacle_never_moves() {
    let a = arena();
    let mut o = Obstacle::new(Point::new(50.0, 60.0), Size::new(15, 15));
    o.advance(&ctx(&a, Point::new(400.0, 300.0)));
    assert_eq!(o.pos, Point::new(50.0, 60.0));
}

// ── Pursuer ───────────────────────────────────────────────────────────────────

#[test]
fn pursuer_starts_aimed_at_player() {
    let player = Point::new(400.0, 300.0);
    let e = Pursuer::new(Point::new(200.0, 200.0), player, 2.75, Size::new(20, 20));
    assert_eq!(e.heading, angle_to(Point::new(200.0, 200.0), player));
}

#[test]
fn pursuer_follows_teleported_player() {
    let a = arena();
    let mut e = Pursuer::new(Point::new(100.0, 100.0), Point::new(400.0, 100.0), 2.75, Size::new(20, 20));
    e.advance(&ctx(&a, Point::new(400.0, 100.0)));
    assert!(e.heading.abs() < 1e-4);

    let teleported = Point::new(100.0, 500.0);
    let before = e.pos;
    e.advance(&ctx(&a, teleported));
    assert_eq!(e.heading, angle_to(before, teleported));
    assert!(e.pos.y > before.y);
}

#[test]
fn pursuer_homes_in_on_stationary_player() {
    let a = arena();
    let player = Point::new(400.0, 300.0);
    let mut e = Pursuer::new(Point::new(200.0, 200.0), player, 2.75, Size::new(20, 20));
    let mut last = distance(e.pos, player);
    for _ in 0..60 {
        e.advance(&ctx(&a, player));
        let d = distance(e.pos, player);
        assert!(d < last, "distance went from {} to {}", last, d);
        last = d;
    }
}

// ── GameState ─────────────────────────────────────────────────────────────────

#[test]
fn sprites_cover_every_entity_player_first() {
    let mut config = GameConfig::default();
    config.start_pursuer = None;
    let mut s = init_state(config);
    s.obstacles.push(Obstacle::new(Point::new(10.0, 40.0), Size::new(15, 15)));
    s.pursuers.push(Pursuer::new(Point::new(50.0, 50.0), s.player.pos, 2.75, Size::new(20, 20)));
    s.projectiles.push(Projectile::new(s.player.pos, Point::new(0.0, 0.0), 7.0, Size::new(4, 4)));

    let sprites = s.sprites();
    assert_eq!(sprites.len(), 4);
    assert_eq!(sprites[0].kind, EntityKind::Player);
    assert_eq!(sprites[0].bounds, s.player.bounds());
    let kinds: Vec<EntityKind> = sprites.iter().map(|s| s.kind).collect();
    assert!(kinds.contains(&EntityKind::Obstacle));
    assert!(kinds.contains(&EntityKind::Pursuer));
    assert!(kinds.contains(&EntityKind::Projectile));
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(GameConfig::default());
    let mut cloned = original.clone();

    cloned.player.pos.x = 99.0;
    cloned.score = 999;
    cloned.obstacles.push(Obstacle::new(Point::new(5.0, 50.0), Size::new(15, 15)));

    assert_eq!(original.player.pos.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.obstacles.is_empty());
}
