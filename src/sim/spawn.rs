//! Spawn scheduler
//!
//! Each tick, every idle hole past its cooldown rolls independently to
//! activate. Pressure rises with intensity and lifetimes shrink with it.

use super::rng::RandomSource;
use super::state::{Hole, HoleKind};
use crate::tuning::Tuning;

/// Roll spawns for all eligible holes. Returns `(index, kind)` of each activation.
pub fn run_scheduler(
    holes: &mut [Hole],
    now: f64,
    intensity: f64,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Vec<(usize, HoleKind)> {
    let p_spawn = tuning.base_spawn_rate * intensity;
    let mut spawned = Vec::new();

    for (index, hole) in holes.iter_mut().enumerate() {
        if !hole.can_spawn(now) {
            continue;
        }
        if !rng.chance(p_spawn) {
            continue;
        }

        let kind = if rng.chance(tuning.bonus_chance) {
            HoleKind::Bonus
        } else {
            HoleKind::Primary
        };
        let range = match kind {
            HoleKind::Bonus => tuning.bonus_lifetime_ms,
            _ => tuning.primary_lifetime_ms,
        };
        let lifetime = rng.range(range.min, range.max) / intensity;
        let cooldown = rng.range(tuning.cooldown_ms.min, tuning.cooldown_ms.max) / intensity;

        hole.activate(kind, now, lifetime, cooldown);
        log::debug!("Hole {index} spawned {kind:?} for {lifetime:.0} ms");
        spawned.push((index, kind));
    }

    spawned
}
