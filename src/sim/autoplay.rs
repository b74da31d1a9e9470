//! Demo player
//!
//! Taps every active target once it has been visible for a reaction delay.
//! Used by the headless binary and for soak tests.

use glam::Vec2;

use super::state::{GameState, HoleKind};

#[derive(Debug, Clone, Copy)]
pub struct Autoplay {
    /// How long a target must be up before the bot reacts
    pub reaction_ms: f64,
    /// Whether the bot bothers with bonus items
    pub take_bonus: bool,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self {
            reaction_ms: 280.0,
            take_bonus: true,
        }
    }
}

impl Autoplay {
    /// Tap positions (canvas px) for this frame
    pub fn taps<R>(&self, state: &GameState<R>) -> Vec<Vec2> {
        let now = state.now_ms;
        state
            .holes
            .iter()
            .filter(|h| h.is_active())
            .filter(|h| self.take_bonus || h.kind != HoleKind::Bonus)
            .filter(|h| now - h.popped_at >= self.reaction_ms)
            .map(|h| state.layout.hit_center(h.position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::layout::Layout;
    use crate::sim::tick::{TickInput, tick};
    use crate::consts::SIM_DT_MS;
    use crate::tuning::Tuning;

    #[test]
    fn test_waits_for_reaction_delay() {
        let mut state = GameState::new(8, Tuning::default(), Layout::default());
        state.start();
        state.activate_hole(0, HoleKind::Primary, 900.0);
        let bot = Autoplay::default();
        assert!(bot.taps(&state).is_empty());
        state.now_ms += 300.0;
        assert_eq!(bot.taps(&state).len(), 1);
    }

    #[test]
    fn test_full_round_scores_points() {
        let mut state = GameState::new(2024, Tuning::default(), Layout::default());
        state.start();
        let bot = Autoplay {
            reaction_ms: 100.0,
            take_bonus: true,
        };
        while state.is_running() {
            let input = TickInput {
                taps: bot.taps(&state),
            };
            tick(&mut state, &input, SIM_DT_MS);
        }
        assert!(state.round.score() > 0);
        assert_eq!(state.round.score() % 30, 0);
    }
}
