//! Render sink boundary
//!
//! The simulation thread hands a borrowed snapshot of the live entities to
//! the sink once per tick, after all mutation for that tick. A sink that
//! blocks stalls the loop by design (single thread per frame).

use crate::sim::{Bullet, Enemy, Player};

/// Everything a renderer needs to draw one frame.
#[derive(Debug)]
pub struct Frame<'a> {
    pub player: Option<&'a Player>,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    /// Wall-clock milliseconds since the game first resumed
    pub elapsed_ms: u64,
    pub player_name: &'a str,
}

/// Per-tick frame consumer, implemented by the host's rendering surface.
pub trait RenderSink: Send {
    fn present(&mut self, frame: Frame<'_>);
}

/// Sink that discards every frame. Useful for headless runs and tests.
#[derive(Debug, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: Frame<'_>) {}
}
