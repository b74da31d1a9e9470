//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - Seeded RNG only (effects use their own stream)
//! - Stable iteration order (grid order)
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod clock;
pub mod hit;
pub mod layout;
pub mod particles;
pub mod rng;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autoplay::Autoplay;
pub use layout::Layout;
pub use particles::{Particle, ParticleKind};
pub use rng::{RandomSource, SequenceRandom};
pub use scoring::{Multiplier, ScoreBoard};
pub use state::{GameEvent, GameState, Hole, HoleKind, RoundPhase, RoundState, Snapshot};
pub use tick::{TickInput, tick};

#[cfg(test)]
mod properties {
    use glam::Vec2;
    use proptest::prelude::*;

    use super::*;
    use crate::tuning::Tuning;

    proptest! {
        #[test]
        fn time_remaining_never_increases(seed in any::<u64>(), deltas in prop::collection::vec(-50.0f64..120.0, 1..400)) {
            let mut state = GameState::new(seed, Tuning::default(), Layout::default());
            state.start();
            let mut last = state.round.time_remaining_ms;
            let mut ended = 0;
            for dt in deltas {
                let events = tick(&mut state, &TickInput::default(), dt);
                ended += events.iter().filter(|e| matches!(e, GameEvent::Ended { .. })).count();
                prop_assert!(state.round.time_remaining_ms <= last);
                prop_assert!(state.round.time_remaining_ms >= 0.0);
                last = state.round.time_remaining_ms;
            }
            prop_assert!(ended <= 1);
            prop_assert_eq!(ended == 1, state.round.phase == RoundPhase::Ended);
        }

        #[test]
        fn multiplier_is_one_or_two_and_holes_respect_cooldown(
            seed in any::<u64>(),
            taps in prop::collection::vec((0.0f32..1000.0, 0.0f32..1000.0), 0..200),
        ) {
            let mut state = GameState::new(seed, Tuning::default(), Layout::default());
            state.start();
            for (x, y) in taps {
                let input = TickInput { taps: vec![Vec2::new(x, y)] };
                tick(&mut state, &input, crate::consts::SIM_DT_MS);
                let m = state.round.multiplier();
                prop_assert!(m.value == 1 || m.value == 2);
                for hole in &state.holes {
                    if hole.is_active() {
                        prop_assert!(hole.active_until > hole.popped_at);
                        prop_assert!(state.now_ms >= hole.cooldown_until);
                    }
                }
            }
        }

        #[test]
        fn miss_changes_nothing(seed in any::<u64>(), x in -500.0f32..1500.0, y in -500.0f32..1500.0) {
            let mut state = GameState::new(seed, Tuning::default(), Layout::default());
            state.start();
            for _ in 0..90 {
                tick(&mut state, &TickInput::default(), crate::consts::SIM_DT_MS);
            }
            let point = Vec2::new(x, y);
            prop_assume!(hit::resolve(&state.holes, &state.layout, point).is_none());

            let score = state.round.score();
            let multiplier = state.round.multiplier();
            let holes = state.holes.clone();
            prop_assert_eq!(hit::tap(&mut state, point), Some(GameEvent::Miss));
            prop_assert_eq!(state.round.score(), score);
            prop_assert_eq!(state.round.multiplier(), multiplier);
            for (a, b) in holes.iter().zip(state.holes.iter()) {
                prop_assert_eq!(a.kind, b.kind);
                prop_assert_eq!(a.cooldown_until, b.cooldown_until);
                prop_assert_eq!(a.recently_hit_until, b.recently_hit_until);
            }
        }
    }
}
