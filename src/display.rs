//! Terminal rendering. All terminal output lives here.
//!
//! The logical arena is scaled onto whatever grid the terminal offers.
//! No game logic is performed; this module only translates a `Frame` into
//! terminal commands.

use std::io::Write;

use arena_shooter::adapter::{Frame, Hud, Renderer};
use arena_shooter::config::Arena;
use arena_shooter::entities::{EntityKind, GameStatus, Sprite};
use arena_shooter::geometry::Point;
use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LEVEL: Color = Color::Green;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Blue;
const C_PURSUER: Color = Color::Red;
const C_OBSTACLE: Color = Color::Magenta;
const C_PROJECTILE: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

// ── Arena to terminal mapping ─────────────────────────────────────────────────

/// Maps arena units to terminal cells and back.
///
/// Row 0 is the HUD, row 1 and `rows - 2` are the border, the last row holds
/// the controls hint. The arena's own HUD band is not drawn; the play field
/// (`hud_height..height`) fills the space between the borders.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub arena: Arena,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, arena: Arena) -> Self {
        Self { cols, rows, arena }
    }

    pub fn current(arena: Arena) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(cols, rows, arena))
    }

    fn inner_cols(&self) -> f32 {
        f32::from(self.cols.saturating_sub(2).max(1))
    }

    fn inner_rows(&self) -> f32 {
        f32::from(self.rows.saturating_sub(4).max(1))
    }

    fn field_height(&self) -> f32 {
        (self.arena.height - self.arena.hud_height).max(1.0)
    }

    /// Cell containing the arena point `(x, y)`, clamped into the play area.
    pub fn to_cell(&self, x: f32, y: f32) -> (u16, u16) {
        let col = (x / self.arena.width * self.inner_cols()).floor();
        let row = ((y - self.arena.hud_height) / self.field_height() * self.inner_rows()).floor();
        let col = col.clamp(0.0, self.inner_cols() - 1.0) as u16 + 1;
        let row = row.clamp(0.0, self.inner_rows() - 1.0) as u16 + 2;
        (col, row)
    }

    /// Arena point at the centre of a terminal cell.
    pub fn to_arena(&self, col: u16, row: u16) -> Point {
        let col = f32::from(col.saturating_sub(1)) + 0.5;
        let row = f32::from(row.saturating_sub(2)) + 0.5;
        Point::new(
            (col / self.inner_cols() * self.arena.width).clamp(0.0, self.arena.width),
            (self.arena.hud_height + row / self.inner_rows() * self.field_height())
                .clamp(self.arena.hud_height, self.arena.height),
        )
    }
}

// ── Renderer ──────────────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    arena: Arena,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, arena: Arena) -> Self {
        Self { out, arena }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    /// Render one complete frame.
    fn draw(&mut self, frame: &Frame) -> std::io::Result<()> {
        let view = Viewport::current(self.arena)?;
        let out = &mut self.out;
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        match frame.status {
            GameStatus::Instructions => {
                draw_border(out, &view)?;
                draw_instructions(out, &view, frame.instruction_page, frame.instruction_pages)?;
            }
            GameStatus::Playing | GameStatus::GameOver => {
                draw_border(out, &view)?;
                draw_hud(out, &view, &frame.hud)?;
                for sprite in &frame.sprites {
                    draw_sprite(out, &view, sprite)?;
                }
                draw_controls_hint(out, &view)?;
                if frame.status == GameStatus::GameOver {
                    draw_game_over(out, &view, &frame.hud)?;
                }
            }
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let h = view.rows;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {}", hud.score)))?;

    let level_str = format!("[ LEVEL {} ]", hud.level);
    let lx = (view.cols / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&level_str))?;

    let lives_str = format!("Lives: x{}", hud.lives);
    let rx = view.cols.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill every cell the sprite's bounds touch (at least one).
fn draw_sprite<W: Write>(out: &mut W, view: &Viewport, sprite: &Sprite) -> std::io::Result<()> {
    let (glyph, color) = match sprite.kind {
        EntityKind::Player => ("█", C_PLAYER),
        EntityKind::Pursuer => ("▓", C_PURSUER),
        EntityKind::Obstacle => ("■", C_OBSTACLE),
        EntityKind::Projectile => ("•", C_PROJECTILE),
    };

    let b = sprite.bounds;
    let (c0, r0) = view.to_cell(b.x as f32, b.y as f32);
    let (c1, r1) = view.to_cell((b.right() - 1) as f32, (b.bottom() - 1) as f32);

    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(glyph.repeat(usize::from(c1 - c0) + 1)))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("Arrows / WASD : Move   Mouse : Aim + Shoot   Q : Quit"))?;
    Ok(())
}

// ── Instruction pages ─────────────────────────────────────────────────────────

const INSTRUCTION_PAGES: &[&[&str]] = &[&[
    "INSTRUCTIONS",
    "",
    "Move with the arrow keys or WASD.",
    "Aim with the mouse, click to shoot.",
    "Hold the button for automatic fire.",
    "",
    "Red chasers hunt you down: touching one costs a life.",
    "Purple blocks stand still: touching one leaves you stuck.",
    "Each chaser shot is worth 10 points.",
]];

fn draw_instructions<W: Write>(
    out: &mut W,
    view: &Viewport,
    page: u32,
    pages: u32,
) -> std::io::Result<()> {
    let lines = INSTRUCTION_PAGES
        .get(page as usize)
        .copied()
        .unwrap_or(INSTRUCTION_PAGES[INSTRUCTION_PAGES.len() - 1]);

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2 + 1);
    out.queue(style::SetForegroundColor(Color::White))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*line))?;
    }

    let footer = format!("Page {} of {} - click to continue", page + 1, pages.max(1));
    let col = cx.saturating_sub(footer.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, start_row + lines.len() as u16 + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(&footer))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: &Viewport, hud: &Hud) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", hud.score);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        ("SPACE - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
