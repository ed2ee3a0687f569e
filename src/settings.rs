//! Game settings and preferences
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::{PRESET_NAMES, Tuning};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Selected built-in profile
    pub profile: String,

    // === Audio ===
    /// Mute everything
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Background melody on/off
    pub music: bool,

    // === Visual Effects ===
    /// Particle effects (flaps, scores, pickups, crashes)
    pub particles: bool,
    /// Reduced motion (smaller particle bursts)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: "classic".to_string(),

            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            music: true,

            particles: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Flip mute, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Switch profile if `name` is a known preset
    pub fn select_profile(&mut self, name: &str) -> bool {
        let name = name.to_lowercase();
        if PRESET_NAMES.contains(&name.as_str()) {
            self.profile = name;
            true
        } else {
            false
        }
    }

    /// The selected preset with cosmetic preferences applied
    pub fn tuning(&self) -> Tuning {
        let mut tuning = Tuning::preset(&self.profile).unwrap_or_else(|| {
            log::warn!("Unknown profile '{}', using classic", self.profile);
            Tuning::classic()
        });
        self.apply_to(&mut tuning);
        tuning
    }

    /// Cosmetic preferences that live in the tuning profile
    pub fn apply_to(&self, tuning: &mut Tuning) {
        if !self.particles {
            tuning.max_particles = 0;
        } else if self.reduced_motion {
            let bursts = &mut tuning.bursts;
            for count in [
                &mut bursts.jump,
                &mut bursts.thrust,
                &mut bursts.score,
                &mut bursts.pickup,
                &mut bursts.crash,
            ] {
                *count = (*count / 2).max(1);
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "skyhop_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_classic() {
        let tuning = Settings::default().tuning();
        assert_eq!(tuning, Tuning::classic());
    }

    #[test]
    fn test_select_profile() {
        let mut settings = Settings::default();
        assert!(settings.select_profile("Deluxe"));
        assert_eq!(settings.profile, "deluxe");
        assert!(!settings.select_profile("hardcore"));
        assert_eq!(settings.profile, "deluxe");
        assert_eq!(settings.tuning().name, "deluxe");
    }

    #[test]
    fn test_toggle_mute() {
        let mut settings = Settings::default();
        assert!(settings.toggle_mute());
        assert!(!settings.toggle_mute());
    }

    #[test]
    fn test_particles_off_zeroes_cap() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.tuning().max_particles, 0);
    }

    #[test]
    fn test_reduced_motion_halves_bursts() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let bursts = settings.tuning().bursts;
        assert_eq!(bursts.jump, 2);
        assert_eq!(bursts.score, 5);
        assert_eq!(bursts.crash, 10);
    }

    #[test]
    fn test_unknown_profile_falls_back() {
        let settings = Settings {
            profile: "mystery".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.tuning().name, "classic");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "muted": true }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.profile, "classic");
    }
}
