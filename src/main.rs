mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use money_shooter::audio::{self, AudioSink, Silent, TerminalBell};
use money_shooter::compute::{fire, init_state, new_round, resize, set_aim, spawn_wave, tick};
use money_shooter::config::Config;
use money_shooter::entities::{GameEvent, RoundState};
use money_shooter::input::{cell_to_world, resolve_press, viewport, PointerAction};
use money_shooter::popups::PopupBoard;
use money_shooter::scheduler::{SpawnTimer, SPAWN_INTERVAL};
use money_shooter::storage::{self, FileHighScore, HighScoreStore, MemoryHighScore};

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs only go to a file, and only
/// when one was asked for.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Everything the loop talks to besides the round itself.
struct Collaborators {
    rng: StdRng,
    audio: Box<dyn AudioSink>,
    store: Box<dyn HighScoreStore>,
    popups: PopupBoard,
}

impl Collaborators {
    /// Hand a frame's events to popups, audio and storage.
    fn route(&mut self, events: &[GameEvent], now: Instant) {
        self.popups.absorb(events, now);
        audio::dispatch(self.audio.as_mut(), events);
        storage::persist(self.store.as_mut(), events);
    }
}

/// Apply one pointer press: fire, or start over from the summary screen.
fn press(
    state: &mut RoundState,
    x: f32,
    y: f32,
    events: &mut Vec<GameEvent>,
) -> Option<PointerAction> {
    let action = resolve_press(state, x, y)?;
    match action {
        PointerAction::Fire => {
            let (next, fired) = fire(state);
            *state = next;
            events.extend(fired);
        }
        PointerAction::NewRound => *state = new_round(state),
    }
    Some(action)
}

/// Runs until the player quits.
///
/// Input is drained without blocking at the top of every frame.  The
/// spawn timer runs on wall-clock time, the simulation on frames; both are
/// driven from this one thread so the round has a single owner.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut RoundState,
    rx: &mpsc::Receiver<Event>,
    ctx: &mut Collaborators,
    frame: Duration,
) -> std::io::Result<()> {
    let mut spawn_timer = SpawnTimer::new(SPAWN_INTERVAL, Instant::now());

    loop {
        let frame_start = Instant::now();
        let mut events: Vec<GameEvent> = Vec::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') => {
                            let (next, fired) = fire(state);
                            *state = next;
                            events.extend(fired);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter
                            if state.is_over() =>
                        {
                            *state = new_round(state);
                            ctx.popups.clear();
                        }
                        _ => {}
                    }
                }
                Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                    let (x, y) = cell_to_world(column, row);
                    match kind {
                        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                            *state = set_aim(state, x, y);
                        }
                        MouseEventKind::Down(MouseButton::Left) => {
                            *state = set_aim(state, x, y);
                            if press(state, x, y, &mut events) == Some(PointerAction::NewRound) {
                                ctx.popups.clear();
                            }
                        }
                        _ => {}
                    }
                }
                Event::Resize(columns, rows) => {
                    let (width, height) = viewport(columns, rows);
                    *state = resize(state, width, height);
                }
                _ => {}
            }
        }

        let now = Instant::now();
        if spawn_timer.poll(now) {
            *state = spawn_wave(state, &mut ctx.rng);
        }

        let (next, ticked) = tick(state);
        *state = next;
        events.extend(ticked);

        ctx.route(&events, now);
        ctx.popups.prune(now);

        display::render(out, state, &ctx.popups, now)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_logging(config.log_file.as_deref())?;

    let store: Box<dyn HighScoreStore> = if config.no_save {
        Box::new(MemoryHighScore::default())
    } else {
        Box::new(FileHighScore::new(config.high_score_path()))
    };
    let audio: Box<dyn AudioSink> = if config.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::new(stdout()))
    };
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut ctx = Collaborators {
        rng,
        audio,
        store,
        popups: PopupBoard::new(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("cannot enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &mut ctx, &config);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    ctx: &mut Collaborators,
    config: &Config,
) -> anyhow::Result<()> {
    let high_score = ctx.store.load();
    let (columns, rows) = terminal::size().context("cannot query terminal size")?;
    let (width, height) = viewport(columns, rows);
    let mut state = init_state(width, height, high_score);
    info!(width, height, high_score, fps = config.fps, "game started");

    game_loop(out, &mut state, rx, ctx, config.frame_duration())?;

    info!(score = state.score, high_score = state.high_score, "game closed");
    Ok(())
}
