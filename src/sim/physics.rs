//! Physics collaborator
//!
//! The simulation never moves bodies or tests shapes itself: it asks a
//! [`Physics`] implementation to integrate velocities and report overlaps.
//! [`ArcadePhysics`] is a small reference implementation (Euler steps and
//! axis-aligned boxes) for headless runs and tests.

use glam::Vec2;

use super::collision::Overlap;
use super::registry::{BodyKind, Collection, Registry};
use super::state::Player;
use crate::consts::*;
use crate::tuning::Tuning;

/// Position integration and overlap reporting
pub trait Physics {
    /// Advance the player and every registered body by `dt` seconds
    fn integrate(&mut self, player: &mut Player, registry: &mut Registry, dt: f32);

    /// Report the (player-bullet, enemy) and (enemy-bullet, player) pairs whose
    /// bounds currently intersect
    fn overlaps(&self, player: &Player, registry: &Registry) -> Vec<Overlap>;
}

/// Axis-aligned box overlap test
#[inline]
fn boxes_overlap(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    let d = (a - b).abs();
    d.x < a_half.x + b_half.x && d.y < a_half.y + b_half.y
}

fn half_extent(kind: &BodyKind) -> Vec2 {
    let (x, y) = match kind {
        BodyKind::PlayerBullet => PLAYER_BULLET_HALF_EXTENT,
        BodyKind::EnemyBullet => ENEMY_BULLET_HALF_EXTENT,
        BodyKind::Enemy(_) => ENEMY_HALF_EXTENT,
    };
    Vec2::new(x, y)
}

/// Reference arcade physics: constant velocities, player kept inside the
/// horizontal world bounds, box overlaps
#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    pub world_width: f32,
    pub player_half: Vec2,
}

impl Default for ArcadePhysics {
    fn default() -> Self {
        Self::new(WORLD_WIDTH)
    }
}

impl ArcadePhysics {
    pub fn new(world_width: f32) -> Self {
        Self {
            world_width,
            player_half: Vec2::new(PLAYER_HALF_EXTENT.0, PLAYER_HALF_EXTENT.1),
        }
    }

    /// Physics sized to a session's world
    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.world_width)
    }
}

impl Physics for ArcadePhysics {
    fn integrate(&mut self, player: &mut Player, registry: &mut Registry, dt: f32) {
        let min_x = self.player_half.x;
        let max_x = (self.world_width - self.player_half.x).max(min_x);
        player.pos.x = (player.pos.x + player.vel_x * dt).clamp(min_x, max_x);

        for collection in Collection::ALL {
            registry.for_each_mut(collection, |_, body| {
                body.pos += body.vel * dt;
            });
        }
    }

    fn overlaps(&self, player: &Player, registry: &Registry) -> Vec<Overlap> {
        let mut pairs = Vec::new();

        for (bullet, b) in registry.iter(Collection::PlayerBullets) {
            for (enemy, e) in registry.iter(Collection::Enemies) {
                if boxes_overlap(b.pos, half_extent(&b.kind), e.pos, half_extent(&e.kind)) {
                    pairs.push(Overlap::BulletEnemy { bullet, enemy });
                }
            }
        }

        for (bullet, b) in registry.iter(Collection::EnemyBullets) {
            if boxes_overlap(b.pos, half_extent(&b.kind), player.pos, self.player_half) {
                pairs.push(Overlap::EnemyBulletPlayer { bullet });
            }
        }

        pairs
    }
}
