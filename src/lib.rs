//! Tap Frenzy - a timed tap-the-target reaction game
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (spawning, expiry, hits, scoring)
//! - `session`: Frame-driven orchestration around the simulation
//! - `render`: Pixel-space draw list for an external drawing layer
//! - `feedback`: Semantic event sink for audio/haptics
//! - `persistence`: Best score storage
//! - `settings` / `tuning`: Player preferences and gameplay balance

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod feedback;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use feedback::{FeedbackKind, FeedbackSink};
pub use persistence::BestScoreStore;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the session will simulate (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Shortest time a target stays up, whatever the tuning says
    pub const MIN_LIFETIME_MS: f64 = 1.0;

    /// Number of hole slots
    pub const HOLE_COUNT: usize = 7;
    /// Hole centres in normalized board coordinates: 3x2 grid plus one bottom slot
    pub const GRID: [(f32, f32); HOLE_COUNT] = [
        (0.2, 0.25),
        (0.5, 0.25),
        (0.8, 0.25),
        (0.2, 0.55),
        (0.5, 0.55),
        (0.8, 0.55),
        (0.5, 0.83),
    ];

    /// Hole sprite size as a fraction of the shorter canvas side
    pub const HOLE_SIZE_FRACTION: f32 = 0.18;
    /// Hit circle centre is raised by this fraction of hole size
    pub const HIT_OFFSET_FRACTION: f32 = 0.18;
    /// Hit circle radius as a fraction of hole size
    pub const HIT_RADIUS_FRACTION: f32 = 0.55;
    /// Particle bursts are emitted this fraction of hole size above centre
    pub const BURST_OFFSET_FRACTION: f32 = 0.25;
    /// Popped sprites are drawn at this fraction of hole size
    pub const POP_SIZE_FRACTION: f32 = 0.92;

    /// Maximum particles alive at once
    pub const MAX_PARTICLES: usize = 256;
}

/// Uniform interpolation between `min` and `max` for `t` in [0, 1)
#[inline]
pub fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + (max - min) * t
}

/// Overshooting ease used for the target pop-in animation
#[inline]
pub fn ease_out_back(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    let u = t - 1.0;
    1.0 + C3 * u * u * u + C1 * u * u
}

/// Squared-distance containment test for a circle
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance_squared(point) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_back_endpoints() {
        assert!(ease_out_back(0.0).abs() < 1e-5);
        assert!((ease_out_back(1.0) - 1.0).abs() < 1e-5);
        // Overshoots before settling
        assert!(ease_out_back(0.8) > 1.0);
    }

    #[test]
    fn test_circle_contains_edge() {
        let c = Vec2::new(10.0, 10.0);
        assert!(circle_contains(c, 5.0, Vec2::new(15.0, 10.0)));
        assert!(!circle_contains(c, 5.0, Vec2::new(15.1, 10.0)));
    }
}
