//! Round state and core simulation types

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::Layout;
use super::particles::Particle;
use super::rng::{RandomSource, effects_rng, seeded};
use super::scoring::{Multiplier, ScoreBoard};
use crate::consts::*;
use crate::feedback::FeedbackKind;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round started yet
    #[default]
    Ready,
    /// Clock running, accepting taps
    Running,
    /// Time ran out (terminal until the next start)
    Ended,
}

/// What currently occupies a hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoleKind {
    #[default]
    None,
    /// Regular target, scores points
    Primary,
    /// Bonus item, grants the score multiplier
    Bonus,
}

/// One target slot on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hole {
    /// Normalized board position
    pub position: Vec2,
    pub kind: HoleKind,
    pub active_until: f64,
    /// Earliest time the scheduler may activate this hole again
    pub cooldown_until: f64,
    pub popped_at: f64,
    /// Visual hit flash window
    pub recently_hit_until: f64,
    /// Cooldown drawn at activation, applied when the hole clears
    pub pending_cooldown_ms: f64,
}

impl Hole {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            kind: HoleKind::None,
            active_until: 0.0,
            cooldown_until: 0.0,
            popped_at: 0.0,
            recently_hit_until: 0.0,
            pending_cooldown_ms: 0.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.kind != HoleKind::None
    }

    /// Idle and past its cooldown
    pub fn can_spawn(&self, now: f64) -> bool {
        !self.is_active() && now >= self.cooldown_until
    }

    /// Idle -> Active
    ///
    /// Lifetime is at least `MIN_LIFETIME_MS` and cooldown never negative, so
    /// `active_until > popped_at` holds for any tuning.
    pub fn activate(&mut self, kind: HoleKind, now: f64, lifetime_ms: f64, cooldown_ms: f64) {
        self.kind = kind;
        self.popped_at = now;
        self.active_until = now + lifetime_ms.max(MIN_LIFETIME_MS);
        self.pending_cooldown_ms = cooldown_ms.max(0.0);
    }

    /// Active -> Idle, starting the respawn cooldown from `now`
    pub fn clear(&mut self, now: f64) {
        self.kind = HoleKind::None;
        self.cooldown_until = now + self.pending_cooldown_ms;
        self.pending_cooldown_ms = 0.0;
    }

    /// Clear the hole if its lifetime has passed. Returns true if it expired.
    pub fn expire_if_due(&mut self, now: f64) -> bool {
        if self.is_active() && now > self.active_until {
            self.clear(now);
            return true;
        }
        false
    }

    pub fn is_flashing(&self, now: f64) -> bool {
        now < self.recently_hit_until
    }

    fn reset(&mut self) {
        *self = Self::new(self.position);
    }
}

/// Clock and score for one round
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: RoundPhase,
    pub duration_ms: f64,
    pub time_remaining_ms: f64,
    pub board: ScoreBoard,
}

impl RoundState {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            phase: RoundPhase::Ready,
            duration_ms,
            time_remaining_ms: duration_ms,
            board: ScoreBoard::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn score(&self) -> u64 {
        self.board.score
    }

    pub fn multiplier(&self) -> Multiplier {
        self.board.multiplier
    }

    /// Whole seconds left, rounded up, for the HUD
    pub fn seconds_left(&self) -> u32 {
        (self.time_remaining_ms.max(0.0) / 1000.0).ceil() as u32
    }
}

/// Something that happened during a tick or tap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned { hole: usize, kind: HoleKind },
    Expired { hole: usize },
    Hit { hole: usize, points: u64 },
    Bonus { hole: usize, multiplier: u32 },
    Miss,
    MultiplierExpired,
    Ended { score: u64 },
}

impl GameEvent {
    /// The presentation-layer notification for this event, if any
    pub fn feedback(&self) -> Option<FeedbackKind> {
        match self {
            GameEvent::Started => Some(FeedbackKind::Start),
            GameEvent::Hit { .. } => Some(FeedbackKind::Hit),
            GameEvent::Bonus { .. } => Some(FeedbackKind::Bonus),
            GameEvent::Miss => Some(FeedbackKind::Miss),
            GameEvent::Ended { .. } => Some(FeedbackKind::End),
            GameEvent::Spawned { .. } | GameEvent::Expired { .. } | GameEvent::MultiplierExpired => {
                None
            }
        }
    }
}

/// Complete simulation state for a session
///
/// Generic over the gameplay random source so spawn outcomes can be scripted.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub seed: u64,
    pub tuning: Tuning,
    pub layout: Layout,
    /// Round clock in ms; only advances while a round runs
    pub now_ms: f64,
    pub round: RoundState,
    pub holes: [Hole; HOLE_COUNT],
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub max_particles: usize,
    pub(crate) rng: R,
    pub(crate) fx_rng: Pcg32,
}

impl GameState<Pcg32> {
    /// Create a state whose gameplay RNG is seeded from `seed`
    pub fn new(seed: u64, tuning: Tuning, layout: Layout) -> Self {
        Self::with_rng(seed, tuning, layout, seeded(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    pub fn with_rng(seed: u64, tuning: Tuning, layout: Layout, rng: R) -> Self {
        let holes = GRID.map(|(x, y)| Hole::new(Vec2::new(x, y)));
        Self {
            seed,
            round: RoundState::new(tuning.round_duration_ms),
            tuning,
            layout,
            now_ms: 0.0,
            holes,
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            rng,
            fx_rng: effects_rng(seed),
        }
    }

    /// Reset round, holes and particles and start the clock
    pub fn start(&mut self) -> GameEvent {
        self.round = RoundState::new(self.tuning.round_duration_ms);
        self.round.phase = RoundPhase::Running;
        for hole in &mut self.holes {
            hole.reset();
        }
        self.particles.clear();
        log::info!("Round started (seed {}, {} ms)", self.seed, self.round.duration_ms);
        GameEvent::Started
    }

    pub fn is_running(&self) -> bool {
        self.round.is_running()
    }

    /// Current difficulty multiplier
    pub fn intensity(&self) -> f64 {
        self.tuning.intensity(self.round.time_remaining_ms)
    }

    /// Activate a hole directly, bypassing the scheduler
    ///
    /// Intended for replays and test drivers; uses the midpoint cooldown.
    pub fn activate_hole(&mut self, index: usize, kind: HoleKind, lifetime_ms: f64) {
        if kind == HoleKind::None {
            return;
        }
        let cooldown = (self.tuning.cooldown_ms.min + self.tuning.cooldown_ms.max) / 2.0
            / self.intensity();
        let now = self.now_ms;
        if let Some(hole) = self.holes.get_mut(index) {
            hole.activate(kind, now, lifetime_ms, cooldown);
        }
    }

    /// Serializable view for an external drawing layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.round.phase,
            now_ms: self.now_ms,
            time_remaining_ms: self.round.time_remaining_ms,
            seconds_left: self.round.seconds_left(),
            score: self.round.score(),
            multiplier: self.round.multiplier(),
            intensity: self.intensity(),
            holes: self.holes.clone(),
            particles: self.particles.clone(),
        }
    }
}

/// Point-in-time copy of everything the render sink needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: RoundPhase,
    pub now_ms: f64,
    pub time_remaining_ms: f64,
    pub seconds_left: u32,
    pub score: u64,
    pub multiplier: Multiplier,
    pub intensity: f64,
    pub holes: [Hole; HOLE_COUNT],
    pub particles: Vec<Particle>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready_and_idle() {
        let state = GameState::new(1, Tuning::default(), Layout::default());
        assert_eq!(state.round.phase, RoundPhase::Ready);
        assert!(state.holes.iter().all(|h| !h.is_active()));
        assert_eq!(state.holes[6].position, Vec2::new(0.5, 0.83));
    }

    #[test]
    fn test_start_resets_everything() {
        let mut state = GameState::new(1, Tuning::default(), Layout::default());
        state.start();
        state.activate_hole(2, HoleKind::Primary, 500.0);
        state.round.board.add_score(30);
        state.round.time_remaining_ms = 10.0;

        assert_eq!(state.start(), GameEvent::Started);
        assert!(state.is_running());
        assert_eq!(state.round.score(), 0);
        assert_eq!(state.round.time_remaining_ms, 30_000.0);
        assert!(!state.holes[2].is_active());
        assert_eq!(state.holes[2].cooldown_until, 0.0);
    }

    #[test]
    fn test_hole_cooldown_starts_on_clear() {
        let mut hole = Hole::new(Vec2::ZERO);
        hole.activate(HoleKind::Primary, 100.0, 600.0, 300.0);
        assert!(hole.is_active());
        assert!(hole.cooldown_until <= hole.popped_at);
        assert!(!hole.expire_if_due(700.0));
        assert!(hole.expire_if_due(701.0));
        assert_eq!(hole.cooldown_until, 1001.0);
        assert!(!hole.can_spawn(1000.0));
        assert!(hole.can_spawn(1001.0));
    }

    #[test]
    fn test_seconds_left_rounds_up() {
        let mut round = RoundState::new(30_000.0);
        assert_eq!(round.seconds_left(), 30);
        round.time_remaining_ms = 29_000.5;
        assert_eq!(round.seconds_left(), 30);
        round.time_remaining_ms = 0.0;
        assert_eq!(round.seconds_left(), 0);
    }
}
