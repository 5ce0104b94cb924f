//! All game entity types plus the master game state.
//!
//! Entities share two small capabilities: `Body` (where am I, how big am I)
//! and `Advance` (move one tick). Game rules live in `compute`.

use crate::config::{Arena, GameConfig};
use crate::geometry::{angle_to, project, Point, Rect, Size};
use crate::timers::{Countdown, Repeating};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Instructions,
    Playing,
    GameOver,
}

/// Tag used by the renderer to tell entity kinds apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Projectile,
    Obstacle,
    Pursuer,
}

/// Per-tick inputs an entity may need to move.
#[derive(Clone, Copy, Debug)]
pub struct TickContext<'a> {
    pub arena: &'a Arena,
    /// Player position at the moment the entity advances.
    pub player: Point,
}

pub trait Body {
    fn position(&self) -> Point;
    fn size(&self) -> Size;

    fn bounds(&self) -> Rect {
        Rect::at(self.position(), self.size())
    }
}

pub trait Advance {
    fn advance(&mut self, ctx: &TickContext);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { dx: 0.0, dy: 0.0 };

    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Point,
    pub velocity: Velocity,
    pub size: Size,
}

impl Player {
    pub fn new(pos: Point, size: Size) -> Self {
        Self {
            pos,
            velocity: Velocity::ZERO,
            size,
        }
    }
}

impl Body for Player {
    fn position(&self) -> Point {
        self.pos
    }

    fn size(&self) -> Size {
        self.size
    }
}

impl Advance for Player {
    /// Apply the velocity intent, then keep the whole box inside the play
    /// field (below the HUD band).
    fn advance(&mut self, ctx: &TickContext) {
        let arena = ctx.arena;
        let max_x = (arena.width - self.size.w as f32).max(0.0);
        let max_y = (arena.height - self.size.h as f32).max(arena.hud_height);
        self.pos.x = (self.pos.x + self.velocity.dx).clamp(0.0, max_x);
        self.pos.y = (self.pos.y + self.velocity.dy).clamp(arena.hud_height, max_y);
    }
}

// ── Projectile ────────────────────────────────────────────────────────────────

/// A shot fired toward a fixed point. Positions are floats so the aim angle
/// survives the integer rects used for collisions.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Point,
    /// Fixed at creation; a projectile never re-aims.
    pub velocity: Velocity,
    pub size: Size,
}

impl Projectile {
    pub fn new(origin: Point, target: Point, speed: f32, size: Size) -> Self {
        let step = project(Point::default(), angle_to(origin, target), speed);
        Self {
            pos: origin,
            velocity: Velocity::new(step.x, step.y),
            size,
        }
    }

    /// True once the projectile's rect has left the arena grown by `margin`.
    pub fn is_outside(&self, arena: &Arena, margin: f32) -> bool {
        let r = self.bounds();
        let (x, y) = (r.x as f32, r.y as f32);
        x < -margin || y < -margin || x > arena.width + margin || y > arena.height + margin
    }
}

impl Body for Projectile {
    fn position(&self) -> Point {
        self.pos
    }

    fn size(&self) -> Size {
        self.size
    }
}

impl Advance for Projectile {
    fn advance(&mut self, _ctx: &TickContext) {
        self.pos.x += self.velocity.dx;
        self.pos.y += self.velocity.dy;
    }
}

// ── Obstacle ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub pos: Point,
    pub size: Size,
}

impl Obstacle {
    pub fn new(pos: Point, size: Size) -> Self {
        Self { pos, size }
    }
}

impl Body for Obstacle {
    fn position(&self) -> Point {
        self.pos
    }

    fn size(&self) -> Size {
        self.size
    }
}

impl Advance for Obstacle {
    fn advance(&mut self, _ctx: &TickContext) {}
}

// ── Pursuer ───────────────────────────────────────────────────────────────────

/// Homing enemy: re-aims at the player every tick.
#[derive(Clone, Debug)]
pub struct Pursuer {
    pub pos: Point,
    /// Radians, Cartesian convention (see `geometry::angle_to`).
    pub heading: f32,
    pub speed: f32,
    pub size: Size,
}

impl Pursuer {
    pub fn new(pos: Point, target: Point, speed: f32, size: Size) -> Self {
        Self {
            pos,
            heading: angle_to(pos, target),
            speed,
            size,
        }
    }
}

impl Body for Pursuer {
    fn position(&self) -> Point {
        self.pos
    }

    fn size(&self) -> Size {
        self.size
    }
}

impl Advance for Pursuer {
    fn advance(&mut self, ctx: &TickContext) {
        self.heading = angle_to(self.pos, ctx.player);
        self.pos = project(self.pos, self.heading, self.speed);
    }
}

// ── Drawable view ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub kind: EntityKind,
    pub bounds: Rect,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the simulation owns. The tick loop holds the only copy and
/// lends it out by reference.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub status: GameStatus,
    /// Zero-based page while in `Instructions`.
    pub instruction_page: u32,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    pub pursuers: Vec<Pursuer>,
    pub score: u32,
    pub lives: u32,
    /// 1-based level index.
    pub level: u32,
    /// Obstacle capacity; some levels raise it.
    pub max_obstacles: usize,
    pub spawn_timer: Repeating,
    /// Player cannot move while active.
    pub stuck: Countdown,
    /// Simulation is frozen while active (after a pursuer hit).
    pub hit_pause: Countdown,
    /// Runs while the pointer button is held.
    pub autofire: Repeating,
    /// Last pointer position reported by the input adapter.
    pub pointer: Point,
    /// Simulation ticks since the current run started.
    pub ticks: u64,
}

impl GameState {
    /// Every visible entity, player first.
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(
            1 + self.obstacles.len() + self.pursuers.len() + self.projectiles.len(),
        );
        sprites.push(Sprite {
            kind: EntityKind::Player,
            bounds: self.player.bounds(),
        });
        sprites.extend(self.obstacles.iter().map(|o| Sprite {
            kind: EntityKind::Obstacle,
            bounds: o.bounds(),
        }));
        sprites.extend(self.pursuers.iter().map(|p| Sprite {
            kind: EntityKind::Pursuer,
            bounds: p.bounds(),
        }));
        sprites.extend(self.projectiles.iter().map(|p| Sprite {
            kind: EntityKind::Projectile,
            bounds: p.bounds(),
        }));
        sprites
    }
}
