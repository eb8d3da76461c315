//! Fixed timestep simulation tick
//!
//! `tick` is pure with respect to its inputs: control intent, game time in
//! milliseconds and an injected RNG. The engine thread calls it once per
//! tick; tests drive it directly with a seeded RNG and synthetic clocks.

use rand::Rng;

use super::collision::{remove_indices, resolve};
use super::state::{Bullet, GameState};

/// Control intent consumed at the top of a tick.
///
/// The control thread posts these between ticks; the simulation tolerates a
/// one-tick-stale value. An absolute pointer position is applied before the
/// hold flags in the tick it arrives in.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Absolute vertical pointer position, if one arrived since last tick
    pub pointer_y: Option<i32>,
    /// Discrete key-hold flags
    pub move_up: bool,
    pub move_down: bool,
}

/// Side effects of one tick, for host hooks (sound, HUD, teardown).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    ShotFired,
    EnemySpawned,
    EnemyDestroyed,
    /// Terminal player/enemy collision; emitted at most once per game
    GameOver,
}

/// Advance the simulation by one tick.
///
/// Tick order: player movement, auto-fire, bullet movement and retirement,
/// enemy spawning, enemy movement and retirement, collision resolution.
/// Movement always precedes collision evaluation; off-field enemies are
/// retired before any collision test. A terminal collision ends the tick
/// immediately.
pub fn tick(
    state: &mut GameState,
    input: &TickInput,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Vec<TickEvent> {
    let mut events = Vec::new();

    if state.over || !state.field.is_valid() {
        return events;
    }
    state.ensure_player();

    let GameState {
        difficulty,
        field,
        player,
        enemies,
        bullets,
        spawner,
        autofire,
        over,
    } = state;
    let Some(player) = player.as_mut() else {
        return events;
    };

    // 1. Player movement
    if let Some(y) = input.pointer_y {
        player.set_absolute_y(y, *field);
    }
    player.moving_up = input.move_up;
    player.moving_down = input.move_down;
    player.update(*field);

    // 2. Auto-fire
    if autofire.should_fire(now_ms) {
        bullets.push(Bullet::fired_by(player));
        events.push(TickEvent::ShotFired);
    }

    // 3. Bullet movement, then retirement past the trailing edge
    for bullet in bullets.iter_mut() {
        bullet.update();
    }
    bullets.retain(|b| b.pos.x >= 0);

    // 4. Enemy spawning
    if let Some(enemy) = spawner.maybe_spawn(now_ms, *difficulty, *field, rng) {
        enemies.push(enemy);
        events.push(TickEvent::EnemySpawned);
    }

    // 5. Enemy movement at the shared instantaneous speed, then retirement.
    // Retirement runs before any collision test so an off-field enemy cannot
    // collide in the tick it leaves.
    let speed = difficulty.enemy_speed(now_ms);
    for enemy in enemies.iter_mut() {
        enemy.update(speed);
    }
    enemies.retain(|e| e.pos.x <= field.width);

    // 6. Collision resolution: decide in a read-only pass, then apply
    let outcome = resolve(player, enemies, bullets);
    if outcome.terminal {
        *over = true;
        events.push(TickEvent::GameOver);
        return events;
    }
    for _ in &outcome.dead_enemies {
        events.push(TickEvent::EnemyDestroyed);
    }
    remove_indices(enemies, &outcome.dead_enemies);
    remove_indices(bullets, &outcome.spent_bullets);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::sim::state::{Enemy, FieldSize};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ready_state() -> GameState {
        let mut state = GameState::new(Difficulty::Easy);
        state.set_field(FieldSize::new(1000, 800));
        state.ensure_player();
        state
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn noop_before_geometry_is_valid() {
        let mut state = GameState::new(Difficulty::Easy);
        let events = tick(&mut state, &TickInput::default(), 5000, &mut rng());
        assert!(events.is_empty());
        assert!(state.player.is_none());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn autofire_after_cadence_elapses() {
        let mut state = ready_state();
        let events = tick(&mut state, &TickInput::default(), 100, &mut rng());
        assert!(!events.contains(&TickEvent::ShotFired));
        assert!(state.bullets.is_empty());

        let events = tick(&mut state, &TickInput::default(), 401, &mut rng());
        assert!(events.contains(&TickEvent::ShotFired));
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn first_enemy_spawns_after_interval() {
        let mut state = ready_state();
        tick(&mut state, &TickInput::default(), 1900, &mut rng());
        assert!(state.enemies.is_empty());

        let events = tick(&mut state, &TickInput::default(), 2001, &mut rng());
        assert!(events.contains(&TickEvent::EnemySpawned));
        assert_eq!(state.enemies.len(), 1);
        // New enemies are advanced in their spawn tick
        let speed = Difficulty::Easy.enemy_speed(2001);
        assert_eq!(state.enemies[0].pos.x, -120 + speed);
    }

    #[test]
    fn bullet_retired_past_left_edge() {
        let mut state = ready_state();
        state.bullets.push(crate::sim::state::Bullet::at(-1, 100));
        state.enemies.push(Enemy::at(400, 400));
        tick(&mut state, &TickInput::default(), 100, &mut rng());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn enemy_retired_past_right_edge_before_collisions() {
        let mut state = ready_state();
        // Enemy already beyond the right edge, with a bullet sitting on it:
        // retirement wins, so the bullet survives and no kill is reported.
        state.enemies.push(Enemy::at(1001, 300));
        state
            .bullets
            .push(crate::sim::state::Bullet::at(1100, 320));
        let events = tick(&mut state, &TickInput::default(), 100, &mut rng());
        assert!(state.enemies.is_empty());
        assert!(!events.contains(&TickEvent::EnemyDestroyed));
        assert!(!events.contains(&TickEvent::GameOver));
    }

    #[test]
    fn bullet_and_enemy_destroy_each_other() {
        let mut state = ready_state();
        state.enemies.push(Enemy::at(500, 100));
        state.bullets.push(crate::sim::state::Bullet::at(600, 120));
        let events = tick(&mut state, &TickInput::default(), 100, &mut rng());
        assert!(events.contains(&TickEvent::EnemyDestroyed));
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn player_collision_ends_the_game() {
        let mut state = ready_state();
        let player_pos = state.player.as_ref().unwrap().pos;
        state.enemies.push(Enemy::at(player_pos.x - 10, player_pos.y));
        let events = tick(&mut state, &TickInput::default(), 100, &mut rng());
        assert!(events.contains(&TickEvent::GameOver));
        assert!(state.over);
        // The colliding enemy is left in place; the tick ended immediately
        assert_eq!(state.enemies.len(), 1);

        // Terminal state: further ticks are no-ops and never re-report
        let events = tick(&mut state, &TickInput::default(), 200, &mut rng());
        assert!(events.is_empty());
    }

    #[test]
    fn pointer_applied_before_hold_flags() {
        let mut state = ready_state();
        let input = TickInput {
            pointer_y: Some(100),
            move_up: false,
            move_down: true,
        };
        tick(&mut state, &input, 100, &mut rng());
        // Recentered on y=100, then the down flag applied its step
        assert_eq!(state.player.as_ref().unwrap().pos.y, 100 - 75 + 20);
    }

    #[test]
    fn hold_flags_move_the_player() {
        let mut state = ready_state();
        let start_y = state.player.as_ref().unwrap().pos.y;
        let input = TickInput {
            move_up: true,
            ..Default::default()
        };
        tick(&mut state, &input, 100, &mut rng());
        assert_eq!(state.player.as_ref().unwrap().pos.y, start_y - 20);
    }

    #[test]
    fn bounding_boxes_never_stale_across_a_tick() {
        let mut state = ready_state();
        state.enemies.push(Enemy::at(200, 100));
        state.bullets.push(crate::sim::state::Bullet::at(700, 700));
        tick(&mut state, &TickInput::default(), 100, &mut rng());
        for enemy in &state.enemies {
            assert_eq!(enemy.bounding_box().min, enemy.pos);
            assert_eq!(enemy.bounding_box().max, enemy.pos + enemy.extent);
        }
        for bullet in &state.bullets {
            assert_eq!(bullet.bounding_box().min, bullet.pos);
        }
    }
}
