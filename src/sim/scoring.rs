//! Score accumulation and the timed multiplier window

use serde::{Deserialize, Serialize};

/// Score multiplier with an absolute expiry on the round clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Multiplier {
    pub value: u32,
    pub expires_at: f64,
}

impl Multiplier {
    pub const BASE: Multiplier = Multiplier {
        value: 1,
        expires_at: 0.0,
    };

    pub fn is_boosted(&self) -> bool {
        self.value > 1
    }

    /// Milliseconds left in the window (0 when not boosted)
    pub fn remaining(&self, now: f64) -> f64 {
        if self.is_boosted() {
            (self.expires_at - now).max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::BASE
    }
}

/// Running score for one round
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBoard {
    pub score: u64,
    pub multiplier: Multiplier,
}

impl ScoreBoard {
    /// Add `base` points scaled by the current multiplier, returning the points awarded
    pub fn add_score(&mut self, base: u64) -> u64 {
        let points = base * u64::from(self.multiplier.value);
        self.score += points;
        points
    }

    /// Start a multiplier window, replacing any window already running
    pub fn set_multiplier(&mut self, value: u32, duration_ms: f64, now: f64) {
        self.multiplier = Multiplier {
            value: value.max(1),
            expires_at: now + duration_ms.max(0.0),
        };
    }

    /// Revert to x1 once `now` is strictly past the expiry. Returns true on revert.
    pub fn expire_multiplier(&mut self, now: f64) -> bool {
        if self.multiplier.is_boosted() && now > self.multiplier.expires_at {
            self.multiplier = Multiplier::BASE;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_score_respects_multiplier() {
        let mut board = ScoreBoard::default();
        assert_eq!(board.add_score(30), 30);
        board.set_multiplier(2, 8000.0, 0.0);
        assert_eq!(board.add_score(30), 60);
        assert_eq!(board.score, 90);
    }

    #[test]
    fn test_retrigger_resets_window() {
        let mut board = ScoreBoard::default();
        board.set_multiplier(2, 8000.0, 1000.0);
        board.set_multiplier(2, 8000.0, 5000.0);
        // Reset, not extended to 17000
        assert_eq!(board.multiplier.expires_at, 13_000.0);
    }

    #[test]
    fn test_expiry_is_strict() {
        let mut board = ScoreBoard::default();
        board.set_multiplier(2, 8000.0, 0.0);
        assert!(!board.expire_multiplier(8000.0));
        assert_eq!(board.multiplier.value, 2);
        assert!(board.expire_multiplier(8000.5));
        assert_eq!(board.multiplier, Multiplier::BASE);
        assert!(!board.expire_multiplier(9000.0));
    }
}
