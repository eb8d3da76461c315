//! Spawn and auto-fire timers
//!
//! Both controllers compare wall-clock game time (milliseconds since the
//! game started) against their last-fired timestamp. The spawn gap shrinks
//! with elapsed time; the fire cadence is fixed.

use rand::Rng;

use super::state::{Enemy, FieldSize};
use crate::consts::FIRE_INTERVAL_MS;
use crate::difficulty::Difficulty;

/// Decides when a new enemy enters the field.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnController {
    last_spawn_ms: u64,
}

impl SpawnController {
    /// Spawn one enemy if the (time-decayed) interval has elapsed.
    ///
    /// Returns `None` while the interval is still open or the field
    /// geometry is invalid. There is no cap on concurrent enemies: the
    /// interval bounds the entry rate and retirement drains the set.
    pub fn maybe_spawn(
        &mut self,
        now_ms: u64,
        difficulty: Difficulty,
        field: FieldSize,
        rng: &mut impl Rng,
    ) -> Option<Enemy> {
        if !field.is_valid() {
            return None;
        }
        let interval = difficulty.effective_spawn_interval_ms(now_ms);
        if now_ms - self.last_spawn_ms > interval {
            self.last_spawn_ms = now_ms;
            return Some(Enemy::spawn(field, rng));
        }
        None
    }
}

/// Fixed-cadence auto-fire timer, independent of difficulty.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoFire {
    last_shot_ms: u64,
}

impl AutoFire {
    /// True once per `FIRE_INTERVAL_MS` window.
    pub fn should_fire(&mut self, now_ms: u64) -> bool {
        if now_ms - self.last_shot_ms > FIRE_INTERVAL_MS {
            self.last_shot_ms = now_ms;
            return true;
        }
        false
    }
}
