//! Game rules: the state machine and the fixed-tick step.
//!
//! Every public function takes the one `GameState` by reference (and, where
//! needed, an RNG handle). Randomness only comes from the injected RNG so a
//! seeded generator makes a run reproducible.

use rand::Rng;

use crate::adapter::{HeldKeys, InputEvent, InputSource, Key};
use crate::collision::{self, CollisionReport};
use crate::config::GameConfig;
use crate::entities::{
    Advance, GameState, GameStatus, Player, Projectile, Pursuer, TickContext, Velocity,
};
use crate::geometry::Point;
use crate::spawn;
use crate::timers::{Countdown, Repeating};

/// Whether the outer loop should keep going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the input adapter reports for one tick.
#[derive(Clone, Debug, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
    pub pointer: Point,
}

impl TickInput {
    pub fn from_source(source: &mut impl InputSource) -> Self {
        Self {
            events: source.poll_events(),
            held: source.held_keys(),
            pointer: source.pointer(),
        }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh state sitting on the first instruction page. With no instruction
/// pages configured the game starts immediately. The configured start
/// pursuer is only placed here, never on restart.
pub fn init_state(config: GameConfig) -> GameState {
    let mut state = GameState {
        player: Player::new(config.player_start(), config.player_size),
        projectiles: Vec::new(),
        obstacles: Vec::new(),
        pursuers: Vec::new(),
        score: 0,
        lives: config.lives,
        level: 1,
        max_obstacles: config.max_obstacles,
        spawn_timer: Repeating::default(),
        stuck: Countdown::default(),
        hit_pause: Countdown::default(),
        autofire: Repeating::default(),
        pointer: config.arena.center(),
        ticks: 0,
        status: GameStatus::Instructions,
        instruction_page: 0,
        config,
    };
    if let Some(pos) = state.config.start_pursuer {
        let cfg = &state.config;
        state.pursuers.push(Pursuer::new(
            pos,
            state.player.pos,
            cfg.pursuer_speed,
            cfg.pursuer_size,
        ));
    }
    if state.config.instruction_pages == 0 {
        start_playing(&mut state);
    }
    state
}

fn start_playing(state: &mut GameState) {
    state.status = GameStatus::Playing;
    let interval = state.config.ticks(state.config.spawn_interval_ms);
    state.spawn_timer.set_interval(interval);
}

/// Back to a brand-new run: score, lives, level, capacities and timers reset,
/// every mobile entity cleared and the player recentred.
pub fn restart(state: &mut GameState) {
    let cfg = &state.config;
    state.player = Player::new(cfg.player_start(), cfg.player_size);
    state.projectiles.clear();
    state.obstacles.clear();
    state.pursuers.clear();
    state.score = 0;
    state.lives = cfg.lives;
    state.level = 1;
    state.max_obstacles = cfg.max_obstacles;
    state.stuck.clear();
    state.hit_pause.clear();
    state.autofire.stop();
    state.ticks = 0;
    start_playing(state);
    log::info!("game restarted");
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Eight-way movement. Diagonals move two units per axis and straight lines
/// three, so diagonals are not normalised.
pub fn velocity_intent(held: HeldKeys, config: &GameConfig) -> Velocity {
    let s = config.player_straight_speed;
    let d = config.player_diagonal_speed;
    match (held.up, held.down, held.left, held.right) {
        (true, _, true, _) => Velocity::new(-d, -d),
        (true, _, _, true) => Velocity::new(d, -d),
        (_, true, true, _) => Velocity::new(-d, d),
        (_, true, _, true) => Velocity::new(d, d),
        (true, _, _, _) => Velocity::new(0.0, -s),
        (_, true, _, _) => Velocity::new(0.0, s),
        (_, _, true, _) => Velocity::new(-s, 0.0),
        (_, _, _, true) => Velocity::new(s, 0.0),
        _ => Velocity::ZERO,
    }
}

/// Fire one projectile from the player's corner toward `target`.
pub fn shoot(state: &mut GameState, target: Point) {
    let cfg = &state.config;
    state.projectiles.push(Projectile::new(
        state.player.pos,
        target,
        cfg.projectile_speed,
        cfg.projectile_size,
    ));
}

pub fn handle_event(state: &mut GameState, event: InputEvent) -> Flow {
    match (state.status, event) {
        (_, InputEvent::Quit) => return Flow::Quit,

        (GameStatus::Instructions, InputEvent::PointerDown(_)) => {
            state.instruction_page += 1;
            if state.instruction_page >= state.config.instruction_pages {
                start_playing(state);
                log::info!("instructions done, game started");
            }
        }

        (GameStatus::Playing, InputEvent::PointerDown(pos)) => {
            state.pointer = pos;
            shoot(state, pos);
            let interval = state.config.ticks(state.config.autofire_ms);
            state.autofire.set_interval(interval);
        }
        (GameStatus::Playing, InputEvent::PointerUp) => state.autofire.stop(),

        (GameStatus::GameOver, InputEvent::KeyDown(Key::Restart)) => restart(state),

        // Movement is read from the held-key snapshot, not from edges.
        _ => {}
    }
    Flow::Continue
}

// ── Per-tick step ────────────────────────────────────────────────────────────

/// One full loop iteration: events, movement intent, auto-fire, simulation.
pub fn step(state: &mut GameState, input: &TickInput, rng: &mut impl Rng) -> Flow {
    state.pointer = input.pointer;

    for &event in &input.events {
        if handle_event(state, event) == Flow::Quit {
            return Flow::Quit;
        }
    }

    if state.status == GameStatus::Playing {
        state.player.velocity = if state.stuck.is_active() {
            Velocity::ZERO
        } else {
            velocity_intent(input.held, &state.config)
        };

        // held fire waits out the hit pause instead of stacking shots
        if !state.hit_pause.is_active() && state.autofire.tick() {
            let target = state.pointer;
            shoot(state, target);
        }

        tick(state, rng);
    }

    Flow::Continue
}

/// Advance the simulation by one tick. A no-op outside `Playing`.
pub fn tick(state: &mut GameState, rng: &mut impl Rng) -> CollisionReport {
    if state.status != GameStatus::Playing {
        return CollisionReport::default();
    }
    state.ticks += 1;

    // ── 1. Status timers ─────────────────────────────────────────────────────
    if state.stuck.tick() {
        log::debug!("player no longer stuck");
    }
    if state.hit_pause.is_active() {
        state.hit_pause.tick();
        return CollisionReport::default();
    }

    // ── 2. Spawning ──────────────────────────────────────────────────────────
    if state.spawn_timer.tick() {
        spawn::spawn_wave(state, rng);
    }

    // ── 3. Movement ──────────────────────────────────────────────────────────
    if state.stuck.is_active() {
        state.player.velocity = Velocity::ZERO;
    }
    let arena = state.config.arena;
    let ctx = TickContext {
        arena: &arena,
        player: state.player.pos,
    };
    state.player.advance(&ctx);

    // Pursuers chase where the player is now, after its own move.
    let ctx = TickContext {
        arena: &arena,
        player: state.player.pos,
    };
    for pursuer in &mut state.pursuers {
        pursuer.advance(&ctx);
    }
    for obstacle in &mut state.obstacles {
        obstacle.advance(&ctx);
    }
    for projectile in &mut state.projectiles {
        projectile.advance(&ctx);
    }
    let margin = state.config.despawn_margin;
    state
        .projectiles
        .retain(|p| !p.is_outside(&arena, margin));

    // ── 4. Collisions ────────────────────────────────────────────────────────
    let report = collision::resolve(state);
    apply_collisions(state, &report);

    // ── 5. Progression ───────────────────────────────────────────────────────
    if state.status == GameStatus::Playing {
        check_level_up(state);
    }

    report
}

/// Turn a collision report into score, lives and status effects.
pub fn apply_collisions(state: &mut GameState, report: &CollisionReport) {
    let cfg = &state.config;
    let gained = report.obstacles_shot * cfg.obstacle_points
        + report.pursuers_shot * cfg.pursuer_points;
    if gained > 0 {
        state.score = state.score.saturating_add(gained);
        log::debug!(
            "{} obstacle(s), {} pursuer(s) shot, score {}",
            report.obstacles_shot,
            report.pursuers_shot,
            state.score
        );
    }

    if report.player_hit {
        state.lives = state.lives.saturating_sub(1);
        let pause = state.config.ticks(state.config.hit_pause_ms);
        state.hit_pause.start(pause);
        log::debug!("player hit by pursuer, {} lives left", state.lives);
        if state.lives == 0 {
            game_over(state);
        }
    }

    if report.player_stuck {
        let stuck = state.config.ticks(state.config.stuck_ms);
        state.stuck.start(stuck);
        state.player.velocity = Velocity::ZERO;
        log::debug!("player stuck on obstacle");
    }
}

fn game_over(state: &mut GameState) {
    state.status = GameStatus::GameOver;
    state.spawn_timer.stop();
    state.autofire.stop();
    log::info!("game over, final score {}", state.score);
}

/// Unlock the next level if its score threshold is met. At most one level
/// per call; levels never go back down.
pub fn check_level_up(state: &mut GameState) -> bool {
    let next = state.level as usize - 1;
    let Some(rule) = state.config.levels.get(next) else {
        return false;
    };
    if state.score < rule.score {
        return false;
    }

    let interval = state.config.ticks(rule.spawn_interval_ms);
    if let Some(cap) = rule.max_obstacles {
        state.max_obstacles = cap;
    }
    state.spawn_timer.set_interval(interval);
    state.level += 1;
    log::info!("level {} reached at score {}", state.level, state.score);
    true
}
