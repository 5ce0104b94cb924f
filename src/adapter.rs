//! Contracts between the simulation and the presentation layer.
//!
//! The core never touches a device or a screen: an `InputSource` hands it
//! events and a snapshot of held keys / pointer, and a `Renderer` receives a
//! `Frame` describing what to draw.

use crate::entities::{GameState, GameStatus, Sprite};
use crate::geometry::Point;

/// Keys the game cares about. Adapters map physical keys onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Restart after game over.
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    PointerDown(Point),
    PointerUp,
}

/// Directional keys held at the moment of the query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

pub trait InputSource {
    /// Drain every event that arrived since the previous call.
    fn poll_events(&mut self) -> Vec<InputEvent>;
    fn held_keys(&self) -> HeldKeys;
    fn pointer(&self) -> Point;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
}

/// One frame's worth of drawing instructions.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub status: GameStatus,
    pub instruction_page: u32,
    pub instruction_pages: u32,
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
}

impl Frame {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            status: state.status,
            instruction_page: state.instruction_page,
            instruction_pages: state.config.instruction_pages,
            sprites: state.sprites(),
            hud: Hud {
                score: state.score,
                lives: state.lives,
                level: state.level,
            },
        }
    }
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame) -> std::io::Result<()>;
}
