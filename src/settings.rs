//! Player settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use crate::persistence::local::local_storage;
use crate::persistence::StorageError;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 48,
            QualityPreset::Medium => 128,
            QualityPreset::High => crate::consts::MAX_PARTICLES,
        }
    }

    /// Whether to draw the board vignette
    pub fn vignette_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Feedback ===
    /// Sound effects on tap/start/end
    pub sound: bool,
    /// Device vibration, when the host supports it
    pub haptics: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Visual Effects ===
    /// Hit particle bursts
    pub particles: bool,

    // === Accessibility ===
    /// Reduced motion (no pop overshoot, no glow)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            sound: true,
            haptics: true,
            master_volume: 0.8,
            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Flip sound on/off, returning the new value
    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.sound
    }

    /// Flip haptics on/off, returning the new value
    pub fn toggle_haptics(&mut self) -> bool {
        self.haptics = !self.haptics;
        self.haptics
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Effective master volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Saved preferences, or defaults when nothing usable is stored
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(Some(settings)) => {
                log::info!(
                    "Settings restored (sound {}, haptics {})",
                    settings.sound,
                    settings.haptics
                );
                settings
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Settings not loaded, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Persist after a toggle; failures only cost the preference
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            log::warn!("Settings not saved: {e}");
        }
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "tap_frenzy_settings";

    #[cfg(target_arch = "wasm32")]
    fn try_load() -> Result<Option<Self>, StorageError> {
        let raw = local_storage()?
            .get_item(Self::STORAGE_KEY)
            .map_err(|_| StorageError::Unavailable("LocalStorage read".into()))?;
        Ok(raw.map(|json| serde_json::from_str(&json)).transpose()?)
    }

    #[cfg(target_arch = "wasm32")]
    fn try_save(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        local_storage()?
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| StorageError::Unavailable("LocalStorage write".into()))
    }

    // Preferences only persist in the browser
    #[cfg(not(target_arch = "wasm32"))]
    fn try_load() -> Result<Option<Self>, StorageError> {
        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn try_save(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
