//! Collision resolution
//!
//! The physics collaborator reports which pairs overlap; this module decides
//! what those overlaps mean: kills and score, hits and lives, game over.

use serde::{Deserialize, Serialize};

use super::registry::Handle;
use super::state::{GameEvent, GameState, SoundEffect};

/// An overlapping pair reported by the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlap {
    /// A player bullet touches an enemy
    BulletEnemy { bullet: Handle, enemy: Handle },
    /// An enemy bullet touches the player
    EnemyBulletPlayer { bullet: Handle },
}

/// Apply one frame's overlaps in order.
///
/// A pair naming a body that is already gone (destroyed earlier in the pass,
/// or by anything before it) counts as resolved and is skipped, so every body
/// contributes its effects at most once. Once the game is over the rest of the
/// pass is dropped.
///
/// Returns the number of pairs that had an effect.
pub fn resolve_overlaps(state: &mut GameState, overlaps: &[Overlap]) -> usize {
    let mut resolved = 0;
    for overlap in overlaps {
        if !state.is_running() {
            break;
        }
        let applied = match *overlap {
            Overlap::BulletEnemy { bullet, enemy } => bullet_hits_enemy(state, bullet, enemy),
            Overlap::EnemyBulletPlayer { bullet } => bullet_hits_player(state, bullet),
        };
        if applied {
            resolved += 1;
        }
    }
    resolved
}

fn bullet_hits_enemy(state: &mut GameState, bullet: Handle, enemy: Handle) -> bool {
    if !state.registry.contains(bullet) || !state.registry.contains(enemy) {
        return false;
    }
    state.destroy(bullet);
    state.destroy(enemy);
    state.emit(GameEvent::PlaySound(SoundEffect::Hit));

    state.score = state.score.saturating_add(state.tuning.score_per_kill);
    state.stats.enemies_destroyed += 1;
    state.refresh_score_display();
    log::debug!("Enemy destroyed, score {}", state.score);
    true
}

fn bullet_hits_player(state: &mut GameState, bullet: Handle) -> bool {
    if !state.destroy(bullet) {
        return false;
    }
    state.emit(GameEvent::PlaySound(SoundEffect::Hit));

    state.lives -= 1;
    state.stats.hits_taken += 1;
    if state.lives >= 0 {
        state.hide_life_indicator(state.lives as usize);
    }
    log::debug!("Player hit, {} lives left", state.lives.max(0));

    if state.lives <= 0 {
        state.enter_game_over();
    }
    true
}
