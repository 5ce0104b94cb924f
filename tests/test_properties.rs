use std::f32::consts::TAU;

use arena_shooter::config::GameConfig;
use arena_shooter::entities::*;
use arena_shooter::geometry::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn angle_is_always_in_range(
        ax in -2000.0f32..2000.0, ay in -2000.0f32..2000.0,
        bx in -2000.0f32..2000.0, by in -2000.0f32..2000.0,
    ) {
        let a = angle_to(Point::new(ax, ay), Point::new(bx, by));
        prop_assert!(a >= 0.0 && a < TAU, "angle {} out of range", a);
    }

    #[test]
    fn project_inverts_angle_to(
        ax in 0.0f32..800.0, ay in 0.0f32..600.0,
        bx in 0.0f32..800.0, by in 0.0f32..600.0,
    ) {
        let (a, b) = (Point::new(ax, ay), Point::new(bx, by));
        let p = project(a, angle_to(a, b), distance(a, b));
        prop_assert!((p.x - b.x).abs() < 0.01, "{:?} vs {:?}", p, b);
        prop_assert!((p.y - b.y).abs() < 0.01, "{:?} vs {:?}", p, b);
    }

    #[test]
    fn player_never_leaves_play_field(
        x in 0.0f32..780.0, y in 30.0f32..580.0,
        dx in -1000.0f32..1000.0, dy in -1000.0f32..1000.0,
    ) {
        let config = GameConfig::default();
        let arena = config.arena;
        let mut p = Player::new(Point::new(x, y), config.player_size);
        p.velocity = Velocity::new(dx, dy);
        p.advance(&TickContext { arena: &arena, player: p.pos });

        let b = p.bounds();
        prop_assert!(b.x >= 0 && b.right() <= 800);
        prop_assert!(b.y >= 30 && b.bottom() <= 600);
    }

    #[test]
    fn projectile_travels_in_a_straight_line(
        ox in 0.0f32..800.0, oy in 30.0f32..600.0,
        tx in 0.0f32..800.0, ty in 30.0f32..600.0,
        n in 1usize..100,
        wander in 0.0f32..800.0,
    ) {
        let arena = GameConfig::default().arena;
        let origin = Point::new(ox, oy);
        let mut shot = Projectile::new(origin, Point::new(tx, ty), 7.0, Size::new(4, 4));
        let v = shot.velocity;
        for i in 0..n {
            let player = Point::new((wander + i as f32 * 13.0) % 800.0, 300.0);
            shot.advance(&TickContext { arena: &arena, player });
        }
        let expected = Point::new(ox + n as f32 * v.dx, oy + n as f32 * v.dy);
        prop_assert!((shot.pos.x - expected.x).abs() < 0.05);
        prop_assert!((shot.pos.y - expected.y).abs() < 0.05);
    }
}
