//! Semantic feedback notifications
//!
//! The core never plays sounds or buzzes the device itself. It reports what
//! happened and a presentation layer decides how that feels.

use serde::{Deserialize, Serialize};

/// Feedback event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedbackKind {
    Hit,
    Bonus,
    Miss,
    Start,
    End,
}

/// Haptic patterns a host may support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Selection,
    ImpactLight,
    ImpactMedium,
    Warning,
}

impl Haptic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Haptic::Selection => "selection",
            Haptic::ImpactLight => "light",
            Haptic::ImpactMedium => "medium",
            Haptic::Warning => "warning",
        }
    }
}

impl FeedbackKind {
    /// Haptic pattern for this event (end of round is silent)
    pub fn haptic(&self) -> Option<Haptic> {
        match self {
            FeedbackKind::Hit => Some(Haptic::ImpactLight),
            FeedbackKind::Bonus => Some(Haptic::ImpactMedium),
            FeedbackKind::Miss => Some(Haptic::Warning),
            FeedbackKind::Start => Some(Haptic::Selection),
            FeedbackKind::End => None,
        }
    }
}

/// Receiver for feedback events
///
/// Implementations must not fail: an unavailable device is a no-op.
pub trait FeedbackSink {
    fn notify(&mut self, kind: FeedbackKind);
}

impl<T: FeedbackSink + ?Sized> FeedbackSink for Box<T> {
    fn notify(&mut self, kind: FeedbackKind) {
        (**self).notify(kind);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn notify(&mut self, _kind: FeedbackKind) {}
}

/// Keeps every event, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    pub events: Vec<FeedbackKind>,
}

impl RecordingFeedback {
    pub fn count(&self, kind: FeedbackKind) -> usize {
        self.events.iter().filter(|&&k| k == kind).count()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&mut self, kind: FeedbackKind) {
        self.events.push(kind);
    }
}

/// Writes events to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn notify(&mut self, kind: FeedbackKind) {
        log::debug!("feedback: {kind:?}");
    }
}
