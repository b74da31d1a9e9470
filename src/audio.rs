//! Audio feedback using Web Audio API
//!
//! Tiny procedurally generated beeps - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{FeedbackKind, FeedbackSink};

/// One oscillator blip
#[derive(Debug, Clone, Copy)]
struct Tone {
    freq: f32,
    /// Seconds
    dur: f64,
    osc: OscillatorType,
    gain: f32,
    /// Frequency change over the tone
    slide: f32,
    /// Start offset in seconds
    delay: f64,
}

impl Tone {
    const fn new(freq: f32, dur: f64, osc: OscillatorType, gain: f32, slide: f32) -> Self {
        Self {
            freq,
            dur,
            osc,
            gain,
            slide,
            delay: 0.0,
        }
    }

    const fn after(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }
}

/// Audio manager for feedback events
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, volume: 1.0 }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set volume (0.0 - 1.0); 0 mutes
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play the sound for a feedback event
    pub fn play(&self, kind: FeedbackKind) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match kind {
            FeedbackKind::Hit => {
                self.beep(ctx, Tone::new(520.0, 0.05, OscillatorType::Triangle, 0.06, 180.0))
            }
            FeedbackKind::Bonus => {
                self.beep(ctx, Tone::new(660.0, 0.06, OscillatorType::Square, 0.045, 220.0));
                self.beep(
                    ctx,
                    Tone::new(880.0, 0.07, OscillatorType::Square, 0.04, 120.0).after(0.04),
                );
            }
            FeedbackKind::Miss => {
                self.beep(ctx, Tone::new(180.0, 0.07, OscillatorType::Sine, 0.04, -60.0))
            }
            FeedbackKind::Start => {
                self.beep(ctx, Tone::new(380.0, 0.08, OscillatorType::Triangle, 0.05, 160.0))
            }
            FeedbackKind::End => {
                self.beep(ctx, Tone::new(240.0, 0.12, OscillatorType::Sine, 0.04, -80.0))
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn beep(&self, ctx: &AudioContext, tone: Tone) {
        let Some((osc, gain)) = self.create_osc(ctx, tone.freq, tone.osc) else {
            return;
        };
        let t = ctx.current_time() + tone.delay;

        osc.frequency().set_value_at_time(tone.freq, t).ok();
        if tone.slide != 0.0 {
            osc.frequency()
                .linear_ramp_to_value_at_time(tone.freq + tone.slide, t + tone.dur)
                .ok();
        }
        gain.gain().set_value_at_time(tone.gain * self.volume, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + tone.dur)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + tone.dur).ok();
    }
}

impl FeedbackSink for AudioManager {
    fn notify(&mut self, kind: FeedbackKind) {
        self.play(kind);
    }
}
