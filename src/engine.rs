//! Simulation engine: the dedicated tick thread and its lifecycle
//!
//! Two threads cooperate. The simulation thread owns the `GameState`
//! outright (it is moved in on resume and handed back through the join on
//! pause) and is the only writer of entity data. The control thread posts
//! intent through single-field atomics that the simulation thread reads at
//! the top of each tick; a one-tick-stale value is acceptable.
//!
//! Lifecycle is Stopped -> Running -> Stopped. Pausing preserves the entity
//! collections but no mid-tick state; the elapsed-time clock is set once on
//! the first-ever resume and keeps running across pauses.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, mpsc};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rand::{Rng as _, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::TICK_INTERVAL;
use crate::difficulty::Difficulty;
use crate::render::{Frame, RenderSink};
use crate::sim::{FieldSize, GameState, TickEvent, TickInput, tick};

/// Terminal notification, delivered at most once per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    /// Wall-clock milliseconds survived
    pub elapsed_ms: u64,
}

/// Sentinel for "no pointer sample since last tick"
const POINTER_NONE: i32 = i32::MIN;

/// Intent posted by the control thread, consumed at tick boundaries.
#[derive(Debug)]
struct ControlIntent {
    running: AtomicBool,
    /// Latest absolute pointer y, `POINTER_NONE` when already consumed
    pointer_y: AtomicI32,
    move_up: AtomicBool,
    move_down: AtomicBool,
    field_width: AtomicI32,
    field_height: AtomicI32,
}

impl ControlIntent {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            pointer_y: AtomicI32::new(POINTER_NONE),
            move_up: AtomicBool::new(false),
            move_down: AtomicBool::new(false),
            field_width: AtomicI32::new(0),
            field_height: AtomicI32::new(0),
        }
    }
}

/// Everything the simulation thread owns while running.
struct Worker {
    state: GameState,
    sink: Box<dyn RenderSink>,
    rng: Pcg32,
    /// One-shot: taken when the terminal collision fires
    game_over_tx: Option<mpsc::Sender<GameOver>>,
    player_name: String,
}

impl Worker {
    /// The tick loop. Runs until the control thread clears the running flag
    /// or the game ends; returns itself so the engine can resume later.
    fn run(mut self, intent: Arc<ControlIntent>, start: Instant) -> Self {
        while intent.running.load(Ordering::Acquire) {
            let now_ms = start.elapsed().as_millis() as u64;

            // Consume control intent at the tick boundary
            self.state.set_field(FieldSize::new(
                intent.field_width.load(Ordering::Acquire),
                intent.field_height.load(Ordering::Acquire),
            ));
            let input = TickInput {
                pointer_y: match intent.pointer_y.swap(POINTER_NONE, Ordering::AcqRel) {
                    POINTER_NONE => None,
                    y => Some(y),
                },
                move_up: intent.move_up.load(Ordering::Acquire),
                move_down: intent.move_down.load(Ordering::Acquire),
            };

            let events = tick(&mut self.state, &input, now_ms, &mut self.rng);
            for event in &events {
                match event {
                    TickEvent::EnemySpawned => {
                        log::debug!("enemy spawned ({} live)", self.state.enemies.len());
                    }
                    TickEvent::EnemyDestroyed => log::debug!("enemy destroyed"),
                    TickEvent::GameOver => {
                        log::info!("game over after {now_ms}ms");
                        if let Some(tx) = self.game_over_tx.take() {
                            let _ = tx.send(GameOver { elapsed_ms: now_ms });
                        }
                        intent.running.store(false, Ordering::Release);
                    }
                    TickEvent::ShotFired => {}
                }
            }

            // All mutation for this tick is done; hand off to the renderer
            self.sink.present(Frame {
                player: self.state.player.as_ref(),
                enemies: &self.state.enemies,
                bullets: &self.state.bullets,
                elapsed_ms: now_ms,
                player_name: &self.player_name,
            });

            // Fixed delay, not delay-minus-elapsed: tick rate degrades
            // under load instead of staying wall-clock accurate
            std::thread::sleep(TICK_INTERVAL);
        }
        self
    }
}

/// Handle owned by the control thread.
///
/// `configure` before the first `resume`; bind `resume`/`pause` to the host
/// surface's visible/hidden transitions.
pub struct Engine {
    intent: Arc<ControlIntent>,
    /// Present while stopped
    worker: Option<Worker>,
    /// Present while the tick thread exists
    thread: Option<JoinHandle<Worker>>,
    /// Set once, on the first-ever resume
    started_at: Option<Instant>,
    game_over_rx: Option<mpsc::Receiver<GameOver>>,
}

impl Engine {
    pub fn new(sink: Box<dyn RenderSink>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            intent: Arc::new(ControlIntent::new()),
            worker: Some(Worker {
                state: GameState::new(Difficulty::default()),
                sink,
                rng: Pcg32::seed_from_u64(rand::rng().random()),
                game_over_tx: Some(tx),
                player_name: String::new(),
            }),
            thread: None,
            started_at: None,
            game_over_rx: Some(rx),
        }
    }

    /// Set pilot name and difficulty. Call before the first `resume`;
    /// ignored while the simulation thread is running.
    pub fn configure(&mut self, player_name: impl Into<String>, difficulty: Difficulty) {
        match self.worker.as_mut() {
            Some(worker) => {
                worker.player_name = player_name.into();
                worker.state.difficulty = difficulty;
                log::info!(
                    "configured pilot {:?}, difficulty {}",
                    worker.player_name,
                    difficulty.as_str()
                );
            }
            None => log::warn!("configure ignored while running"),
        }
    }

    /// Reseed the RNG for a reproducible run. Ignored while running.
    pub fn set_seed(&mut self, seed: u64) {
        if let Some(worker) = self.worker.as_mut() {
            worker.rng = Pcg32::seed_from_u64(seed);
        }
    }

    /// One-shot receiver for the terminal collision notification.
    pub fn take_game_over_events(&mut self) -> Option<mpsc::Receiver<GameOver>> {
        self.game_over_rx.take()
    }

    /// Field geometry from the host surface, at init and on resize.
    pub fn set_field(&self, width: i32, height: i32) {
        self.intent.field_width.store(width, Ordering::Release);
        self.intent.field_height.store(height, Ordering::Release);
    }

    /// Absolute pointer position; applied at the next tick boundary.
    pub fn set_pointer_y(&self, y: i32) {
        self.intent.pointer_y.store(y, Ordering::Release);
    }

    pub fn set_moving_up(&self, held: bool) {
        self.intent.move_up.store(held, Ordering::Release);
    }

    pub fn set_moving_down(&self, held: bool) {
        self.intent.move_down.store(held, Ordering::Release);
    }

    /// Start or resume the tick thread. No-op if a thread already exists
    /// (including one that ended itself on game over - `pause` first).
    pub fn resume(&mut self) {
        if self.thread.is_some() {
            log::debug!("resume ignored: thread already exists");
            return;
        }
        let Some(worker) = self.worker.take() else {
            return;
        };
        let start = *self.started_at.get_or_insert_with(Instant::now);
        self.intent.running.store(true, Ordering::Release);

        let intent = Arc::clone(&self.intent);
        match std::thread::Builder::new()
            .name("starlane-sim".into())
            .spawn(move || worker.run(intent, start))
        {
            Ok(handle) => {
                log::info!("simulation resumed");
                self.thread = Some(handle);
            }
            Err(e) => {
                log::error!("failed to spawn simulation thread: {e}");
                self.intent.running.store(false, Ordering::Release);
            }
        }
    }

    /// Stop the tick thread and block until it has fully exited. When this
    /// returns, no tick is in flight and the entity collections are
    /// preserved for the next `resume`.
    pub fn pause(&mut self) {
        self.intent.running.store(false, Ordering::Release);
        if let Some(handle) = self.thread.take() {
            match handle.join() {
                Ok(worker) => {
                    log::info!("simulation paused");
                    self.worker = Some(worker);
                }
                // Non-fatal scheduling hiccup; the state is lost but the
                // engine stays usable as a handle
                Err(_) => log::error!("simulation thread panicked"),
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some() && self.intent.running.load(Ordering::Acquire)
    }

    /// Wall-clock time since the game first resumed (keeps growing across
    /// pauses); zero before the first resume.
    pub fn elapsed(&self) -> Duration {
        self.started_at.map(|s| s.elapsed()).unwrap_or_default()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.pause();
    }
}
