//! Cosmetic particle bursts
//!
//! Nothing here feeds back into gameplay. Motion is expressed per 60 Hz frame
//! and scaled by the actual step length.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Reference frame length the motion constants are tuned for
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Downward acceleration per frame, before DPR scaling
const GRAVITY: f32 = 0.12;
/// Fraction of launch speed added as upward bias
const LIFT: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Hit,
    Bonus,
}

impl ParticleKind {
    fn base_radius(self) -> f32 {
        match self {
            ParticleKind::Hit => 5.0,
            ParticleKind::Bonus => 7.0,
        }
    }
}

/// A single spark, in canvas pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per reference frame
    pub velocity: Vec2,
    pub radius: f32,
    pub age: f64,
    pub lifetime: f64,
    pub kind: ParticleKind,
}

impl Particle {
    /// Normalized age in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.lifetime <= 0.0 {
            return 1.0;
        }
        (self.age / self.lifetime).clamp(0.0, 1.0) as f32
    }

    /// Linear fade
    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    /// Radius shrinks to 60% over the lifetime
    pub fn draw_radius(&self) -> f32 {
        self.radius * (1.0 - self.progress() * 0.4)
    }

    pub fn is_dead(&self) -> bool {
        self.age >= self.lifetime
    }
}

/// Burst parameters for one hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub count: usize,
    /// Peak launch speed in px per frame
    pub power: f32,
    pub lifetime_ms: f64,
    pub kind: ParticleKind,
}

impl Burst {
    pub fn hit(dpr: f32) -> Self {
        Self {
            count: 10,
            power: 8.0 * dpr,
            lifetime_ms: 320.0,
            kind: ParticleKind::Hit,
        }
    }

    pub fn bonus(dpr: f32) -> Self {
        Self {
            count: 16,
            power: 10.0 * dpr,
            lifetime_ms: 420.0,
            kind: ParticleKind::Bonus,
        }
    }
}

/// Emit a burst at `origin`, never exceeding `cap` live particles
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    burst: Burst,
    rng: &mut impl RandomSource,
    cap: usize,
) {
    let room = cap.saturating_sub(particles.len());
    for _ in 0..burst.count.min(room) {
        let angle = rng.range(0.0, std::f64::consts::TAU) as f32;
        let speed = burst.power * (0.4 + rng.next_unit() as f32 * 0.6);
        let radius = burst.kind.base_radius() * (0.6 + rng.next_unit() as f32 * 0.8);
        particles.push(Particle {
            position: origin,
            velocity: Vec2::new(angle.cos() * speed, angle.sin() * speed - speed * LIFT),
            radius,
            age: 0.0,
            lifetime: burst.lifetime_ms,
            kind: burst.kind,
        });
    }
}

/// Age, cull, and move particles by `dt_ms`
pub fn advance(particles: &mut Vec<Particle>, dt_ms: f64, dpr: f32) {
    let frames = (dt_ms / FRAME_MS) as f32;
    for p in particles.iter_mut() {
        p.age += dt_ms;
    }
    particles.retain(|p| !p.is_dead());
    for p in particles.iter_mut() {
        p.velocity.y += GRAVITY * dpr * frames;
        p.position += p.velocity * frames;
    }
}
