//! Game state and entity types
//!
//! Player, Enemy and Bullet are a closed variant set: they share the
//! "position + extent + one movement axis" shape but each has its own
//! movement policy. Bounding boxes are derived from position and extent on
//! demand, so a stale box between movement and collision testing is
//! impossible by construction.

use glam::IVec2;
use rand::Rng;

use super::collision::Rect;
use super::spawn::{AutoFire, SpawnController};
use crate::consts::*;
use crate::difficulty::Difficulty;

/// Field geometry supplied by the host surface.
///
/// May be zero (or negative) at startup; the simulation defers player
/// creation and spawning until both dimensions are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldSize {
    pub width: i32,
    pub height: i32,
}

impl FieldSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// The player craft. One per running game, fixed x, moves vertically.
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner (pixels)
    pub pos: IVec2,
    pub extent: IVec2,
    /// Key-hold control flags, posted by the control thread
    pub moving_up: bool,
    pub moving_down: bool,
}

impl Player {
    /// Place the craft near the right edge, vertically centered.
    pub fn new(field: FieldSize) -> Self {
        let extent = IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: IVec2::new(
                field.width - extent.x - PLAYER_EDGE_MARGIN,
                field.height / 2 - extent.y / 2,
            ),
            extent,
            moving_up: false,
            moving_down: false,
        }
    }

    /// Advance one tick: apply the hold flags, then clamp to the field.
    pub fn update(&mut self, field: FieldSize) {
        if self.moving_up {
            self.pos.y -= PLAYER_SPEED;
        }
        if self.moving_down {
            self.pos.y += PLAYER_SPEED;
        }
        self.clamp_y(field);
    }

    /// Pointer-style control: recenter the craft on the given y, re-clamp.
    pub fn set_absolute_y(&mut self, y: i32, field: FieldSize) {
        self.pos.y = y - self.extent.y / 2;
        self.clamp_y(field);
    }

    fn clamp_y(&mut self, field: FieldSize) {
        let max_y = field.height - self.extent.y;
        self.pos.y = self.pos.y.clamp(0, max_y.max(0));
    }

    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_pos_extent(self.pos, self.extent)
    }
}

/// A hostile craft. Spawns fully off-field on the left, crosses toward +x.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: IVec2,
    pub extent: IVec2,
}

impl Enemy {
    /// Spawn at `x = -width` with a randomized vertical position.
    ///
    /// The vertical range collapses to length 1 when the field is shorter
    /// than the enemy, so the draw is always valid.
    pub fn spawn(field: FieldSize, rng: &mut impl Rng) -> Self {
        let extent = IVec2::new(ENEMY_WIDTH, ENEMY_HEIGHT);
        let max_y = (field.height - extent.y).max(1);
        Self {
            pos: IVec2::new(-extent.x, rng.random_range(0..max_y)),
            extent,
        }
    }

    /// Advance one tick at the supplied instantaneous speed.
    ///
    /// Speed is not stored on the enemy: it is recomputed from the active
    /// difficulty profile and elapsed time every tick (see `Difficulty`).
    pub fn update(&mut self, speed: i32) {
        self.pos.x += speed;
    }

    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_pos_extent(self.pos, self.extent)
    }

    #[cfg(test)]
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            extent: IVec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
        }
    }
}

/// A player shot. Fixed speed, travels toward -x.
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: IVec2,
    pub extent: IVec2,
}

impl Bullet {
    /// Spawn just ahead of the player's leading edge, at its vertical center.
    pub fn fired_by(player: &Player) -> Self {
        Self {
            pos: IVec2::new(
                player.pos.x - MUZZLE_OFFSET,
                player.pos.y + player.extent.y / 2,
            ),
            extent: IVec2::new(BULLET_WIDTH, BULLET_HEIGHT),
        }
    }

    /// Advance one tick.
    pub fn update(&mut self) {
        self.pos.x -= BULLET_SPEED;
    }

    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_pos_extent(self.pos, self.extent)
    }

    #[cfg(test)]
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            extent: IVec2::new(BULLET_WIDTH, BULLET_HEIGHT),
        }
    }
}

/// Complete simulation state, exclusively owned by the simulation thread.
#[derive(Debug, Clone)]
pub struct GameState {
    pub difficulty: Difficulty,
    pub field: FieldSize,
    /// Created once the field geometry becomes valid
    pub player: Option<Player>,
    /// Unordered live sets; membership matters, ordering does not
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub spawner: SpawnController,
    pub autofire: AutoFire,
    /// Terminal flag: once set, ticks are no-ops
    pub over: bool,
}

impl GameState {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            field: FieldSize::default(),
            player: None,
            enemies: Vec::new(),
            bullets: Vec::new(),
            spawner: SpawnController::default(),
            autofire: AutoFire::default(),
            over: false,
        }
    }

    /// Record new field geometry from the host surface.
    pub fn set_field(&mut self, field: FieldSize) {
        self.field = field;
    }

    /// Create the player once the field geometry is known and valid.
    pub fn ensure_player(&mut self) {
        if self.player.is_none() && self.field.is_valid() {
            self.player = Some(Player::new(self.field));
        }
    }
}
