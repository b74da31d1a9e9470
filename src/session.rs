//! Frame-driven session
//!
//! Owns the simulation state plus its collaborators (best-score store and
//! feedback sink). A host calls `frame` once per display frame and
//! `pointer_down` for input; everything else is internal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::feedback::FeedbackSink;
use crate::persistence::BestScoreStore;
use crate::settings::Settings;
use crate::sim::clock::sanitize_delta;
use crate::sim::{GameEvent, GameState, Layout, RoundPhase, TickInput, hit, tick};
use crate::tuning::Tuning;

/// Result of a finished round, for the game-over popup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: u64,
    pub best: u64,
    pub new_best: bool,
}

pub struct Session<S: BestScoreStore, F: FeedbackSink> {
    state: GameState,
    settings: Settings,
    store: S,
    feedback: F,
    best: u64,
    accumulator: f64,
    summary: Option<RoundSummary>,
}

impl<S: BestScoreStore, F: FeedbackSink> Session<S, F> {
    pub fn new(
        seed: u64,
        tuning: Tuning,
        layout: Layout,
        settings: Settings,
        store: S,
        feedback: F,
    ) -> Self {
        let best = store.load_best();
        log::info!("Session created (seed {seed}, best {best})");
        let mut state = GameState::new(seed, tuning, layout);
        state.max_particles = settings.max_particles();
        Self {
            state,
            settings,
            store,
            feedback,
            best,
            accumulator: 0.0,
            summary: None,
        }
    }

    /// Reset and begin a new round
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.summary = None;
        let event = self.state.start();
        self.dispatch(&[event]);
    }

    /// Advance by one display frame of `elapsed_ms`
    ///
    /// Runs fixed `SIM_DT_MS` steps for up to `MAX_FRAME_MS` of the delta;
    /// leftover step time carries to the next frame. Anything past the cap is
    /// applied as one catch-up step so the round clock keeps wall time.
    pub fn frame(&mut self, elapsed_ms: f64) -> Vec<GameEvent> {
        if !self.state.is_running() {
            return Vec::new();
        }
        let elapsed = sanitize_delta(elapsed_ms);
        let stepped = elapsed.min(MAX_FRAME_MS);
        self.accumulator += stepped;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            events.extend(tick(&mut self.state, &TickInput::default(), SIM_DT_MS));
            self.accumulator -= SIM_DT_MS;
            substeps += 1;
            if !self.state.is_running() {
                self.accumulator = 0.0;
                break;
            }
        }

        let overflow = elapsed - stepped;
        if overflow > 0.0 && self.state.is_running() {
            log::debug!("Frame of {elapsed:.0} ms over cap, catching up {overflow:.0} ms");
            events.extend(tick(&mut self.state, &TickInput::default(), overflow));
        }

        self.dispatch(&events);
        events
    }

    /// Pointer-down in client coordinates, with the canvas's client-space origin
    pub fn pointer_down(&mut self, client: Vec2, canvas_origin: Vec2) -> Option<GameEvent> {
        let point = self.state.layout.client_to_canvas(client, canvas_origin);
        self.tap(point)
    }

    /// Tap at a canvas-pixel position. Ignored unless a round is running.
    pub fn tap(&mut self, point: Vec2) -> Option<GameEvent> {
        let event = hit::tap(&mut self.state, point)?;
        self.dispatch(&[event]);
        Some(event)
    }

    pub fn resize(&mut self, layout: Layout) {
        self.state.layout = layout;
    }

    fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(kind) = event.feedback() {
                self.feedback.notify(kind);
            }
            if let GameEvent::Ended { score } = *event {
                self.finish_round(score);
            }
        }
    }

    fn finish_round(&mut self, score: u64) {
        let new_best = score > self.best;
        if new_best {
            log::info!("New best score: {score} (was {})", self.best);
            self.best = score;
            self.store.save_best(score);
        }
        self.summary = Some(RoundSummary {
            score,
            best: self.best,
            new_best,
        });
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for test drivers and replays
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.round.phase
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Summary of the last finished round, until the next start
    pub fn summary(&self) -> Option<RoundSummary> {
        self.summary
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.state.max_particles = settings.max_particles();
        self.settings = settings;
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }
}
