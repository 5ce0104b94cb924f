mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter};
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use arena_shooter::adapter::{Frame, HeldKeys, InputEvent, InputSource, Key, Renderer};
use arena_shooter::clock::FrameClock;
use arena_shooter::compute::{init_state, step, Flow, TickInput};
use arena_shooter::config::{Arena, GameConfig};
use arena_shooter::geometry::Point;

use display::{TerminalRenderer, Viewport};

/// Log file used when `RUST_LOG` is set (stderr is unusable in raw mode).
const LOG_ENV: &str = "ARENA_SHOOTER_LOG";
const DEFAULT_LOG_FILE: &str = "arena_shooter.log";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is at least 15 Hz, so 8 frames (about 133 ms at
/// 60 Hz) are refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

// ── Input adapter ─────────────────────────────────────────────────────────────

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Char(' ') => Some(Key::Restart),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Turns crossterm events into game input.
///
/// Held keys are tracked as "frame last seen" per key: keyboard-enhanced
/// terminals (kitty protocol) send real releases, classic terminals only
/// send repeated presses and the key expires after `HOLD_WINDOW` frames of
/// silence.
struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<Key, u64>,
    frame: u64,
    pointer: Point,
    arena: Arena,
}

impl TerminalInput {
    fn new(rx: mpsc::Receiver<Event>, arena: Arena) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
            pointer: arena.center(),
            arena,
        }
    }

    fn is_held(&self, key: Key) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn pointer_at(&self, column: u16, row: u16) -> Point {
        match Viewport::current(self.arena) {
            Ok(view) => view.to_arena(column, row),
            Err(_) => self.pointer,
        }
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frame += 1;
        let mut events = Vec::new();

        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        if is_quit(code, modifiers) {
                            events.push(InputEvent::Quit);
                        } else if let Some(key) = map_key(code) {
                            self.key_frame.insert(key, self.frame);
                            events.push(InputEvent::KeyDown(key));
                        }
                    }
                    KeyEventKind::Repeat => {
                        if let Some(key) = map_key(code) {
                            self.key_frame.insert(key, self.frame);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(key) = map_key(code) {
                            self.key_frame.remove(&key);
                            events.push(InputEvent::KeyUp(key));
                        }
                    }
                },
                Event::Mouse(MouseEvent { kind, column, row, .. }) => match kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pointer = self.pointer_at(column, row);
                        events.push(InputEvent::PointerDown(self.pointer));
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        self.pointer = self.pointer_at(column, row);
                        events.push(InputEvent::PointerUp);
                    }
                    MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                        self.pointer = self.pointer_at(column, row);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        events
    }

    fn held_keys(&self) -> HeldKeys {
        HeldKeys {
            up: self.is_held(Key::Up),
            down: self.is_held(Key::Down),
            left: self.is_held(Key::Left),
            right: self.is_held(Key::Right),
        }
    }

    fn pointer(&self) -> Point {
        self.pointer
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run(config: GameConfig, input: &mut TerminalInput) -> std::io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut renderer = TerminalRenderer::new(BufWriter::new(stdout()), config.arena);
    let mut clock = FrameClock::new(config.tick_rate);
    let mut state = init_state(config);

    loop {
        let tick_input = TickInput::from_source(input);
        if step(&mut state, &tick_input, &mut rng) == Flow::Quit {
            break;
        }
        renderer.draw(&Frame::from_state(&state))?;
        clock.wait_next();
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let path = std::env::var(LOG_ENV).unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    match std::fs::File::create(&path) {
        Ok(file) => env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init(),
        Err(err) => eprintln!("logging disabled: cannot create {}: {}", path, err),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let config = GameConfig::from_env()?;
    log::info!("arena shooter starting ({:?} preset)", config.preset);

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped, program exiting
            }
        }
    });

    let mut input = TerminalInput::new(rx, config.arena);
    let result = run(config, &mut input);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("arena shooter exiting");
    result.map_err(Into::into)
}
