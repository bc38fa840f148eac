//! Player settings and preferences
//!
//! Persisted separately from the score book under its own storage key.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore, SETTINGS_KEY};

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Mute when the page loses focus
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (renderer skips shake and flashes)
    pub reduced_motion: bool,
    /// Show on-screen touch buttons
    pub touch_controls: bool,

    // === HUD ===
    /// Show the elapsed-time readout
    pub show_timer: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,

            reduced_motion: false,
            touch_controls: false,

            show_timer: true,
        }
    }
}

impl Settings {
    /// Gain applied to every sound effect
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = clamp_volume(vol);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = clamp_volume(vol);
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut settings: Self = persistence::load_or_default(store, SETTINGS_KEY);
        // Hand-edited storage can hold anything
        settings.master_volume = clamp_volume(settings.master_volume);
        settings.sfx_volume = clamp_volume(settings.sfx_volume);
        settings
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        persistence::save_or_log(store, SETTINGS_KEY, self);
        log::info!("Settings saved");
    }
}

fn clamp_volume(vol: f32) -> f32 {
    if vol.is_nan() { 0.0 } else { vol.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.set_sfx_volume(0.5);
        assert!((settings.effective_volume() - 0.4).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_volume_clamped() {
        let mut settings = Settings::default();
        settings.set_master_volume(3.0);
        assert_eq!(settings.master_volume, 1.0);
        settings.set_sfx_volume(-1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        settings.set_sfx_volume(f32::NAN);
        assert_eq!(settings.sfx_volume, 0.0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let mut store = MemoryStore::default();
        store
            .set(SETTINGS_KEY, r#"{"muted":true,"master_volume":7.0}"#)
            .unwrap();
        let settings = Settings::load(&store);
        assert!(settings.muted);
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 1.0);
        assert!(settings.show_timer);
    }

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::default();
        let mut settings = Settings::default();
        settings.reduced_motion = true;
        settings.set_master_volume(0.25);
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }
}
