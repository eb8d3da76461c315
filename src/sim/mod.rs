//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and testable:
//! - Fixed timestep only
//! - Injected RNG only
//! - Game time passed in as milliseconds, never sampled internally
//! - No rendering or threading dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, Rect, resolve};
pub use spawn::{AutoFire, SpawnController};
pub use state::{Bullet, Enemy, FieldSize, GameState, Player};
pub use tick::{TickEvent, TickInput, tick};
