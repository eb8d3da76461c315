//! Difficulty profiles and elapsed-time scaling
//!
//! A profile is chosen once before the game starts and never mutated.
//! On top of the profile, difficulty ramps with elapsed game time:
//! spawn intervals shrink and enemy speed grows, with no ceiling.

use serde::{Deserialize, Serialize};

use crate::consts::{ENEMY_BASE_SPEED, RAMP_STEP_GAIN, RAMP_STEP_MS};

/// Difficulty profile selected at game start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Base gap between enemy spawns, before time scaling (milliseconds)
    pub fn spawn_interval_ms(&self) -> u64 {
        match self {
            Difficulty::Easy => 2000,
            Difficulty::Medium => 1500,
            Difficulty::Hard => 800,
        }
    }

    /// Enemy speed multiplier relative to the base speed
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    /// Spawn interval after time scaling: shrinks as the game goes on.
    pub fn effective_spawn_interval_ms(&self, elapsed_ms: u64) -> u64 {
        (self.spawn_interval_ms() as f32 / time_multiplier(elapsed_ms)) as u64
    }

    /// Instantaneous enemy speed in pixels per tick.
    ///
    /// Recomputed every tick for every live enemy, so all enemies share the
    /// same speed at a given tick regardless of when they spawned.
    pub fn enemy_speed(&self, elapsed_ms: u64) -> i32 {
        (ENEMY_BASE_SPEED as f32 * self.speed_multiplier() * time_multiplier(elapsed_ms)) as i32
    }
}

/// Elapsed-time difficulty ramp: 1.0 at start, +10% per 10 seconds, unbounded.
#[inline]
pub fn time_multiplier(elapsed_ms: u64) -> f32 {
    1.0 + (elapsed_ms as f32 / RAMP_STEP_MS) * RAMP_STEP_GAIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn profile_constants() {
        assert_eq!(Difficulty::Easy.spawn_interval_ms(), 2000);
        assert_eq!(Difficulty::Medium.spawn_interval_ms(), 1500);
        assert_eq!(Difficulty::Hard.spawn_interval_ms(), 800);
        assert_eq!(Difficulty::Easy.speed_multiplier(), 1.0);
        assert_eq!(Difficulty::Medium.speed_multiplier(), 1.5);
        assert_eq!(Difficulty::Hard.speed_multiplier(), 2.0);
    }

    #[test]
    fn ramp_starts_at_one() {
        assert_eq!(time_multiplier(0), 1.0);
        // +10% after 10 seconds
        assert!((time_multiplier(10_000) - 1.1).abs() < 1e-6);
        // Unbounded: keeps growing
        assert!(time_multiplier(600_000) > 6.9);
    }

    #[test]
    fn enemy_speed_scales() {
        assert_eq!(Difficulty::Easy.enemy_speed(0), 10);
        assert_eq!(Difficulty::Hard.enemy_speed(0), 20);
        // Easy at 10s: 10 * 1.0 * 1.1 = 11
        assert_eq!(Difficulty::Easy.enemy_speed(10_000), 11);
    }

    #[test]
    fn from_str_round_trips() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    proptest! {
        #[test]
        fn time_multiplier_non_decreasing(a in 0u64..100_000_000, b in 0u64..100_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(time_multiplier(lo) <= time_multiplier(hi));
        }

        #[test]
        fn spawn_interval_non_increasing(a in 0u64..100_000_000, b in 0u64..100_000_000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                prop_assert!(d.effective_spawn_interval_ms(hi) <= d.effective_spawn_interval_ms(lo));
            }
        }
    }
}
