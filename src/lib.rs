//! Starlane - a side-scrolling survival shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, tick function)
//! - `difficulty`: Difficulty profiles and elapsed-time scaling
//! - `engine`: Simulation thread with pause/resume lifecycle
//! - `render`: Render sink boundary (per-tick frame snapshots)
//! - `config`: Run configuration (player name, difficulty, seed)

pub mod config;
pub mod difficulty;
pub mod engine;
pub mod render;
pub mod sim;

pub use config::RunConfig;
pub use difficulty::Difficulty;
pub use engine::{Engine, GameOver};
pub use render::{Frame, RenderSink};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Fixed delay slept after every tick (~60 ticks/second)
    pub const TICK_INTERVAL: Duration = Duration::from_millis(17);

    /// Player craft dimensions (pixels)
    pub const PLAYER_WIDTH: i32 = 150;
    pub const PLAYER_HEIGHT: i32 = 150;
    /// Player vertical speed (pixels per tick)
    pub const PLAYER_SPEED: i32 = 20;
    /// Gap between the player's right edge and the field's right edge
    pub const PLAYER_EDGE_MARGIN: i32 = 50;

    /// Enemy dimensions (pixels)
    pub const ENEMY_WIDTH: i32 = 120;
    pub const ENEMY_HEIGHT: i32 = 120;
    /// Enemy base speed before difficulty/time scaling (pixels per tick)
    pub const ENEMY_BASE_SPEED: i32 = 10;

    /// Bullet dimensions (pixels)
    pub const BULLET_WIDTH: i32 = 50;
    pub const BULLET_HEIGHT: i32 = 10;
    /// Bullet speed (pixels per tick, toward decreasing x)
    pub const BULLET_SPEED: i32 = 30;
    /// Bullets spawn this far ahead of the player's leading edge
    pub const MUZZLE_OFFSET: i32 = 20;

    /// Minimum wall-clock gap between shots (auto-fire cadence)
    pub const FIRE_INTERVAL_MS: u64 = 400;

    /// Difficulty ramp: +10% every 10 seconds, unbounded
    pub const RAMP_STEP_MS: f32 = 10_000.0;
    pub const RAMP_STEP_GAIN: f32 = 0.1;
}
