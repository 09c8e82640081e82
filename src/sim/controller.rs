//! Player controller
//!
//! Turns held inputs into player velocity and rate-limited shots.

use glam::Vec2;

use super::registry::{Body, Collection, Handle};
use super::state::{GameEvent, GameState, SoundEffect};

/// Held inputs for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Idle/demo mode - the autopilot plays instead
    pub idle_mode: bool,
}

/// Autopilot dead-zone: closer than this horizontally counts as lined up
const AUTOPILOT_DEAD_ZONE: f32 = 6.0;

/// Apply one frame of input at simulated time `now_ms`.
///
/// Returns the handle of the bullet fired this frame, if any.
pub fn apply_input(state: &mut GameState, input: &TickInput, now_ms: f64) -> Option<Handle> {
    if !state.is_running() {
        return None;
    }
    let input = if input.idle_mode {
        autopilot(state)
    } else {
        *input
    };

    let speed = state.tuning.player_speed;
    state.player.vel_x = if input.left {
        -speed
    } else if input.right {
        speed
    } else {
        0.0
    };

    if !input.fire || now_ms <= state.player.last_fired + state.tuning.fire_rate_ms {
        return None;
    }

    let origin = state.player.pos - Vec2::new(0.0, state.tuning.player_bullet_offset);
    let bullet = state.spawn(Body::player_bullet(origin, state.tuning.player_bullet_speed));
    state.emit(GameEvent::PlaySound(SoundEffect::Shoot));
    state.player.last_fired = now_ms;
    state.stats.shots_fired += 1;
    log::trace!("Player fired at t={now_ms:.0}ms from x={:.1}", origin.x);
    Some(bullet)
}

/// Pick inputs for idle/demo mode.
///
/// Steers under the horizontally nearest enemy that is still above the player
/// and keeps the trigger held.
pub fn autopilot(state: &GameState) -> TickInput {
    let player = state.player.pos;
    let target = state
        .registry
        .iter(Collection::Enemies)
        .filter(|(_, e)| e.pos.y < player.y)
        .min_by(|(_, a), (_, b)| {
            let da = (a.pos.x - player.x).abs();
            let db = (b.pos.x - player.x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(_, e)| e.pos.x);

    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };
    if let Some(x) = target {
        let dx = x - player.x;
        if dx < -AUTOPILOT_DEAD_ZONE {
            input.left = true;
        } else if dx > AUTOPILOT_DEAD_ZONE {
            input.right = true;
        }
    }
    input
}
