//! Data-driven gameplay balance
//!
//! The difficulty curve itself is fixed (`intensity = 1 + progress * slope`);
//! only its constants live here.

use serde::{Deserialize, Serialize};

/// Half-open millisecond range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeMs {
    pub min: f64,
    pub max: f64,
}

impl RangeMs {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Length of one round
    pub round_duration_ms: f64,
    /// Per-tick spawn probability for an eligible hole at intensity 1.0
    pub base_spawn_rate: f64,
    /// Intensity gained over the whole round (1.0 -> 1.0 + slope)
    pub intensity_slope: f64,
    /// Chance that a spawn is a bonus target
    pub bonus_chance: f64,
    /// Primary target lifetime before intensity scaling
    pub primary_lifetime_ms: RangeMs,
    /// Bonus target lifetime before intensity scaling
    pub bonus_lifetime_ms: RangeMs,
    /// Respawn cooldown after a hole clears, before intensity scaling
    pub cooldown_ms: RangeMs,
    /// Points for a primary hit at x1
    pub hit_score: u64,
    /// Multiplier granted by a bonus hit
    pub bonus_multiplier: u32,
    /// Length of the multiplier window
    pub bonus_duration_ms: f64,
    /// Hit flash length
    pub hit_flash_ms: f64,
    /// Target pop-in animation length
    pub pop_duration_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            round_duration_ms: 30_000.0,
            base_spawn_rate: 0.016,
            intensity_slope: 1.2,
            bonus_chance: 0.16,
            primary_lifetime_ms: RangeMs::new(520.0, 900.0),
            bonus_lifetime_ms: RangeMs::new(650.0, 980.0),
            cooldown_ms: RangeMs::new(220.0, 520.0),
            hit_score: 30,
            bonus_multiplier: 2,
            bonus_duration_ms: 8_000.0,
            hit_flash_ms: 160.0,
            pop_duration_ms: 160.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Difficulty multiplier for a round with `remaining_ms` left
    pub fn intensity(&self, remaining_ms: f64) -> f64 {
        // A zero-length round is always at full pressure
        if self.round_duration_ms <= 0.0 {
            return 1.0 + self.intensity_slope;
        }
        let progress = (1.0 - remaining_ms / self.round_duration_ms).clamp(0.0, 1.0);
        1.0 + progress * self.intensity_slope
    }
}
