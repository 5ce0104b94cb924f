//! Arena shooter core.
//!
//! - `geometry`: angle and projection math
//! - `entities`: player, projectiles, obstacles, pursuers and the game state
//! - `timers`: tick countdowns standing in for platform timer events
//! - `collision` / `spawn`: per-tick hit resolution and enemy placement
//! - `compute`: the state machine and the fixed-tick step
//! - `config`: tunables and the `Full` / `Lite` presets
//! - `adapter` / `clock`: contracts towards the presentation layer

pub mod adapter;
pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod spawn;
pub mod timers;
