//! Hit resolution for pointer taps

use glam::Vec2;

use super::layout::Layout;
use super::particles::{Burst, spawn_burst};
use super::rng::RandomSource;
use super::state::{GameEvent, GameState, Hole, HoleKind};

/// First active hole (in grid order) whose hit circle contains `point`
pub fn resolve(holes: &[Hole], layout: &Layout, point: Vec2) -> Option<usize> {
    holes
        .iter()
        .position(|h| h.is_active() && layout.hit_test(h.position, point))
}

/// Apply a tap at `point` (canvas px)
///
/// Returns `None` when no round is running. A tap that misses every active
/// hole yields `GameEvent::Miss` and leaves the state untouched.
pub fn tap<R: RandomSource>(state: &mut GameState<R>, point: Vec2) -> Option<GameEvent> {
    if !state.is_running() {
        return None;
    }

    let Some(index) = resolve(&state.holes, &state.layout, point) else {
        return Some(GameEvent::Miss);
    };

    let now = state.now_ms;
    let tuning = &state.tuning;
    let hole = &mut state.holes[index];
    let origin = state.layout.burst_origin(hole.position);
    let dpr = state.layout.dpr;

    let event = match hole.kind {
        HoleKind::Bonus => {
            state
                .round
                .board
                .set_multiplier(tuning.bonus_multiplier, tuning.bonus_duration_ms, now);
            spawn_burst(
                &mut state.particles,
                origin,
                Burst::bonus(dpr),
                &mut state.fx_rng,
                state.max_particles,
            );
            GameEvent::Bonus {
                hole: index,
                multiplier: state.round.board.multiplier.value,
            }
        }
        _ => {
            let points = state.round.board.add_score(tuning.hit_score);
            spawn_burst(
                &mut state.particles,
                origin,
                Burst::hit(dpr),
                &mut state.fx_rng,
                state.max_particles,
            );
            GameEvent::Hit {
                hole: index,
                points,
            }
        }
    };

    hole.clear(now);
    hole.recently_hit_until = now + tuning.hit_flash_ms;
    Some(event)
}
