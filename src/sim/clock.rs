//! Round timer

use super::state::{RoundPhase, RoundState};

/// Result of advancing the round timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockOutcome {
    /// Round is not running; nothing changed
    Stopped,
    /// Time remains
    Ticking,
    /// Time just ran out; the round is now Ended
    Expired,
}

/// Clamp a frame delta to a usable, non-negative duration
pub fn sanitize_delta(dt_ms: f64) -> f64 {
    if dt_ms.is_finite() && dt_ms > 0.0 {
        dt_ms
    } else {
        0.0
    }
}

/// Count the timer down by `dt_ms`, ending the round when it hits zero
pub fn advance(round: &mut RoundState, dt_ms: f64) -> ClockOutcome {
    if !round.is_running() {
        return ClockOutcome::Stopped;
    }

    round.time_remaining_ms = (round.time_remaining_ms - sanitize_delta(dt_ms)).max(0.0);
    if round.time_remaining_ms <= 0.0 {
        round.phase = RoundPhase::Ended;
        ClockOutcome::Expired
    } else {
        ClockOutcome::Ticking
    }
}
