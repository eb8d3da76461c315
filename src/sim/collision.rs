//! Axis-aligned collision detection and per-tick resolution
//!
//! Everything here works on integer pixel rectangles. Overlap requires a
//! strictly positive intersection area on both axes: rectangles that merely
//! touch along an edge do not collide.

use glam::IVec2;

use super::state::{Bullet, Enemy, Player};

/// Axis-aligned bounding box, top-left `min`, exclusive bottom-right `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min: IVec2,
    pub max: IVec2,
}

impl Rect {
    /// Build a rect from a top-left position and a width/height extent.
    #[inline]
    pub fn from_pos_extent(pos: IVec2, extent: IVec2) -> Self {
        Self {
            min: pos,
            max: pos + extent,
        }
    }

    /// Strict AABB overlap: true iff the intersection area is positive.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// Decisions from one collision pass, applied by the caller after the pass.
///
/// Indices refer to the collections as they were when `resolve` ran; the
/// caller must apply removals without advancing the simulation in between.
#[derive(Debug, Clone, Default)]
pub struct CollisionOutcome {
    /// Player/enemy overlap found - the run is over
    pub terminal: bool,
    /// Enemies destroyed by bullets (indices in bullet order)
    pub dead_enemies: Vec<usize>,
    /// Bullets spent on those enemies (indices, ascending)
    pub spent_bullets: Vec<usize>,
}

/// Read-only collision pass over the live collections.
///
/// A player/enemy overlap is terminal and short-circuits: no bullet pairs
/// are evaluated for that tick. Otherwise each bullet destroys at most the
/// first enemy it overlaps, and both are marked for removal.
pub fn resolve(player: &Player, enemies: &[Enemy], bullets: &[Bullet]) -> CollisionOutcome {
    let player_box = player.bounding_box();

    for enemy in enemies {
        if player_box.intersects(&enemy.bounding_box()) {
            return CollisionOutcome {
                terminal: true,
                ..Default::default()
            };
        }
    }

    let mut outcome = CollisionOutcome::default();
    for (bi, bullet) in bullets.iter().enumerate() {
        let bullet_box = bullet.bounding_box();
        for (ei, enemy) in enemies.iter().enumerate() {
            if outcome.dead_enemies.contains(&ei) {
                continue;
            }
            if bullet_box.intersects(&enemy.bounding_box()) {
                outcome.dead_enemies.push(ei);
                outcome.spent_bullets.push(bi);
                // One kill per bullet per tick
                break;
            }
        }
    }
    outcome
}

/// Remove the given indices from `items` without reordering the rest.
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    for &idx in sorted.iter().rev() {
        items.remove(idx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FieldSize;

    fn rect(l: i32, t: i32, r: i32, b: i32) -> Rect {
        Rect {
            min: IVec2::new(l, t),
            max: IVec2::new(r, b),
        }
    }

    #[test]
    fn overlapping_rects_intersect() {
        // Player vs enemy boxes from a real terminal collision
        let player = rect(900, 390, 1050, 540);
        let enemy = rect(900, 400, 1020, 520);
        assert!(player.intersects(&enemy));
        assert!(enemy.intersects(&player));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        let a = rect(0, 0, 10, 10);
        assert!(!a.intersects(&rect(20, 0, 30, 10)));
        assert!(!a.intersects(&rect(0, 20, 10, 30)));
    }

    #[test]
    fn edge_touching_is_not_a_collision() {
        let a = rect(0, 0, 10, 10);
        // Shared vertical edge at x=10
        assert!(!a.intersects(&rect(10, 0, 20, 10)));
        // Shared horizontal edge at y=10
        assert!(!a.intersects(&rect(0, 10, 10, 20)));
        // Shared corner
        assert!(!a.intersects(&rect(10, 10, 20, 20)));
    }

    #[test]
    fn containment_intersects() {
        let outer = rect(0, 0, 100, 100);
        let inner = rect(40, 40, 60, 60);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    fn field() -> FieldSize {
        FieldSize::new(1000, 800)
    }

    #[test]
    fn player_enemy_overlap_is_terminal() {
        let player = Player::new(field());
        let mut enemy = Enemy::at(player.pos.x, player.pos.y);
        let outcome = resolve(&player, &[enemy.clone()], &[]);
        assert!(outcome.terminal);
        assert!(outcome.dead_enemies.is_empty());

        // Terminal short-circuits the bullet pass even if a bullet overlaps too
        let bullet = Bullet::at(enemy.pos.x, enemy.pos.y);
        let outcome = resolve(&player, &[enemy.clone()], &[bullet]);
        assert!(outcome.terminal);
        assert!(outcome.spent_bullets.is_empty());

        // Moved away: no longer terminal
        enemy.pos.x = -500;
        let outcome = resolve(&player, &[enemy], &[]);
        assert!(!outcome.terminal);
    }

    #[test]
    fn bullet_destroys_at_most_one_enemy() {
        let player = Player::new(field());
        // Two enemies stacked on the same spot, one bullet through them
        let enemies = vec![Enemy::at(100, 100), Enemy::at(100, 100)];
        let bullets = vec![Bullet::at(110, 120)];
        let outcome = resolve(&player, &enemies, &bullets);
        assert!(!outcome.terminal);
        assert_eq!(outcome.dead_enemies, vec![0]);
        assert_eq!(outcome.spent_bullets, vec![0]);
    }

    #[test]
    fn two_bullets_two_enemies() {
        let player = Player::new(field());
        let enemies = vec![Enemy::at(100, 100), Enemy::at(100, 400)];
        let bullets = vec![Bullet::at(110, 120), Bullet::at(110, 420)];
        let outcome = resolve(&player, &enemies, &bullets);
        assert_eq!(outcome.dead_enemies, vec![0, 1]);
        assert_eq!(outcome.spent_bullets, vec![0, 1]);
    }

    #[test]
    fn remove_indices_preserves_survivors() {
        let mut items = vec!['a', 'b', 'c', 'd', 'e'];
        remove_indices(&mut items, &[1, 3]);
        assert_eq!(items, vec!['a', 'c', 'e']);

        // Kill order follows bullet order, so indices can arrive unsorted
        let mut items = vec!['a', 'b', 'c', 'd', 'e'];
        remove_indices(&mut items, &[3, 1]);
        assert_eq!(items, vec!['a', 'c', 'e']);
    }
}
