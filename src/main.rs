//! Starlane entry point
//!
//! Headless demo run: starts the engine with a logging render sink, sweeps
//! the craft up and down from the control thread, and reports how long the
//! pilot survived.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use starlane::render::NullSink;
use starlane::{Difficulty, Engine, Frame, RenderSink, RunConfig};

/// Logs a one-line HUD summary once per second of game time.
#[derive(Default)]
struct HudSink {
    last_logged_s: u64,
}

impl RenderSink for HudSink {
    fn present(&mut self, frame: Frame<'_>) {
        let seconds = frame.elapsed_ms / 1000;
        if seconds > self.last_logged_s {
            self.last_logged_s = seconds;
            log::info!(
                "t={}s pilot={} enemies={} bullets={}",
                seconds,
                frame.player_name,
                frame.enemies.len(),
                frame.bullets.len(),
            );
        }
    }
}

fn config_path() -> PathBuf {
    std::env::var_os("STARLANE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("starlane.json"))
}

fn main() {
    env_logger::init();

    let config = RunConfig::load(&config_path());
    // Difficulty can be overridden on the command line
    let difficulty = std::env::args()
        .nth(1)
        .and_then(|s| Difficulty::from_str(&s))
        .unwrap_or(config.difficulty);

    log::info!(
        "starting: pilot {:?}, difficulty {}",
        config.player_name,
        difficulty.as_str()
    );

    let sink: Box<dyn RenderSink> = if std::env::var_os("STARLANE_QUIET").is_some() {
        Box::new(NullSink)
    } else {
        Box::new(HudSink::default())
    };

    let mut engine = Engine::new(sink);
    engine.configure(&config.player_name, difficulty);
    if let Some(seed) = config.seed {
        engine.set_seed(seed);
    }
    engine.set_field(1920, 1080);

    let game_over = engine.take_game_over_events().expect("fresh engine");
    engine.resume();

    let deadline = Instant::now() + Duration::from_secs(600);
    let outcome = loop {
        match game_over.recv_timeout(Duration::from_millis(50)) {
            Ok(over) => break Some(over),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if Instant::now() >= deadline {
                    break None;
                }
                // Sweep the craft so the demo run isn't static
                let t = engine.elapsed().as_secs_f32();
                let y = (540.0 + (t * 0.8).sin() * 400.0) as i32;
                engine.set_pointer_y(y);
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => break None,
        }
    };

    engine.pause();
    match outcome {
        Some(over) => log::info!(
            "pilot {:?} survived {:.1}s",
            config.player_name,
            over.elapsed_ms as f32 / 1000.0
        ),
        None => log::info!("run ended without a terminal collision"),
    }
}
