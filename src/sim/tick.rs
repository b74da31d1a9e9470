//! Simulation tick
//!
//! One call per fixed step: taps, clock, expiry, multiplier, spawning.

use glam::Vec2;

use super::clock::{self, ClockOutcome};
use super::hit;
use super::particles;
use super::rng::RandomSource;
use super::spawn::run_scheduler;
use super::state::{GameEvent, GameState};

/// Input gathered since the previous tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer-down positions in canvas pixels, oldest first
    pub taps: Vec<Vec2>,
}

/// Advance the game state by `dt_ms`, returning everything that happened
pub fn tick<R: RandomSource>(
    state: &mut GameState<R>,
    input: &TickInput,
    dt_ms: f64,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }

    // Taps happened before this step's time passes
    for &point in &input.taps {
        events.extend(hit::tap(state, point));
    }

    let dt = clock::sanitize_delta(dt_ms);
    state.now_ms += dt;
    let now = state.now_ms;

    particles::advance(&mut state.particles, dt, state.layout.dpr);

    match clock::advance(&mut state.round, dt) {
        ClockOutcome::Expired => {
            let score = state.round.score();
            log::info!("Round ended with score {score}");
            events.push(GameEvent::Ended { score });
            return events;
        }
        ClockOutcome::Stopped => return events,
        ClockOutcome::Ticking => {}
    }

    for (index, hole) in state.holes.iter_mut().enumerate() {
        if hole.expire_if_due(now) {
            log::debug!("Hole {index} expired");
            events.push(GameEvent::Expired { hole: index });
        }
    }

    if state.round.board.expire_multiplier(now) {
        events.push(GameEvent::MultiplierExpired);
    }

    let intensity = state.intensity();
    let spawned = run_scheduler(
        &mut state.holes,
        now,
        intensity,
        &state.tuning,
        &mut state.rng,
    );
    events.extend(
        spawned
            .into_iter()
            .map(|(hole, kind)| GameEvent::Spawned { hole, kind }),
    );

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT_MS;
    use crate::sim::layout::Layout;
    use crate::sim::rng::SequenceRandom;
    use crate::sim::state::{HoleKind, RoundPhase};
    use crate::tuning::Tuning;

    fn quiet_state() -> GameState<SequenceRandom> {
        // 0.99 never passes a spawn roll
        let mut state = GameState::with_rng(
            5,
            Tuning::default(),
            Layout::default(),
            SequenceRandom::constant(0.99),
        );
        state.start();
        state
    }

    #[test]
    fn test_tick_does_nothing_before_start() {
        let mut state = GameState::new(1, Tuning::default(), Layout::default());
        let events = tick(&mut state, &TickInput::default(), SIM_DT_MS);
        assert!(events.is_empty());
        assert_eq!(state.now_ms, 0.0);
        assert_eq!(state.round.phase, RoundPhase::Ready);
    }

    #[test]
    fn test_natural_expiry_sets_cooldown_from_clear_time() {
        let mut state = quiet_state();
        state.activate_hole(3, HoleKind::Primary, 100.0);
        let mut expired_at = None;
        for _ in 0..10 {
            let events = tick(&mut state, &TickInput::default(), SIM_DT_MS);
            if events.contains(&GameEvent::Expired { hole: 3 }) {
                expired_at = Some(state.now_ms);
                break;
            }
        }
        let expired_at = expired_at.expect("hole should expire");
        assert!(expired_at > 100.0);
        assert!(!state.holes[3].is_active());
        assert!(state.holes[3].cooldown_until > expired_at);
    }

    #[test]
    fn test_no_respawn_in_the_same_tick_as_expiry() {
        // Always spawn when eligible
        let mut state = GameState::with_rng(
            5,
            Tuning::default(),
            Layout::default(),
            SequenceRandom::constant(0.0),
        );
        state.start();
        let events = tick(&mut state, &TickInput::default(), SIM_DT_MS);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::Spawned { .. }))
                .count(),
            7
        );

        for _ in 0..120 {
            let events = tick(&mut state, &TickInput::default(), SIM_DT_MS);
            for e in &events {
                if let GameEvent::Expired { hole } = e {
                    assert!(state.holes[*hole].cooldown_until > state.now_ms);
                    assert!(!state.holes[*hole].is_active());
                }
            }
        }
    }

    #[test]
    fn test_multiplier_reverts_after_window() {
        let mut state = quiet_state();
        state.round.board.set_multiplier(2, 100.0, state.now_ms);
        let mut reverted = false;
        for _ in 0..10 {
            let events = tick(&mut state, &TickInput::default(), SIM_DT_MS);
            if events.contains(&GameEvent::MultiplierExpired) {
                assert!(state.now_ms > 100.0);
                reverted = true;
                break;
            }
            assert_eq!(state.round.multiplier().value, 2);
        }
        assert!(reverted);
        assert_eq!(state.round.multiplier().value, 1);
    }

    #[test]
    fn test_round_ends_once() {
        let mut state = quiet_state();
        let mut ended = 0;
        for _ in 0..2000 {
            let events = tick(&mut state, &TickInput::default(), SIM_DT_MS);
            ended += events
                .iter()
                .filter(|e| matches!(e, GameEvent::Ended { .. }))
                .count();
        }
        assert_eq!(ended, 1);
        assert_eq!(state.round.phase, RoundPhase::Ended);
        assert_eq!(state.round.time_remaining_ms, 0.0);
    }

    #[test]
    fn test_taps_in_input_resolve_before_time_passes() {
        let mut state = quiet_state();
        state.activate_hole(4, HoleKind::Primary, 10.0);
        let p = state.layout.hit_center(state.holes[4].position);
        let input = TickInput { taps: vec![p, p] };
        let events = tick(&mut state, &input, SIM_DT_MS);
        assert_eq!(events[0], GameEvent::Hit { hole: 4, points: 30 });
        assert_eq!(events[1], GameEvent::Miss);
        assert_eq!(state.round.score(), 30);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99_999, Tuning::default(), Layout::default());
        let mut b = GameState::new(99_999, Tuning::default(), Layout::default());
        a.start();
        b.start();
        for _ in 0..600 {
            let ea = tick(&mut a, &TickInput::default(), SIM_DT_MS);
            let eb = tick(&mut b, &TickInput::default(), SIM_DT_MS);
            assert_eq!(ea, eb);
        }
        for (ha, hb) in a.holes.iter().zip(b.holes.iter()) {
            assert_eq!(ha.kind, hb.kind);
            assert_eq!(ha.active_until, hb.active_until);
        }
    }
}
