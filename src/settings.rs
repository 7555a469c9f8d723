//! Game settings and preferences
//!
//! Persisted to LocalStorage on the web. Profile state is never stored here.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reward reveal pacing (milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealPacing {
    /// Delay after the rewards screen mounts before the first step reveals
    pub entry_delay_ms: u64,
    /// How long the continue button stays locked after a disclosure
    pub cta_delay_ms: u64,
    /// Pause between hiding one step and revealing the next
    pub transition_ms: u64,
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self {
            entry_delay_ms: REVEAL_ENTRY_DELAY_MS,
            cta_delay_ms: REVEAL_CTA_DELAY_MS,
            transition_ms: REVEAL_TRANSITION_MS,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Reward reveal timing
    #[serde(default)]
    pub reveal: RevealPacing,

    // === Audio / feedback ===
    pub sound: bool,
    pub haptics: bool,

    // === Accessibility ===
    /// Reduced motion (skip decorative delays)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal: RevealPacing::default(),
            sound: true,
            haptics: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective reveal pacing (respects reduced_motion)
    ///
    /// Reduced motion drops the entry and transition delays. The continue
    /// button lock stays: players must get time to see each reward.
    pub fn effective_reveal_pacing(&self) -> RevealPacing {
        if self.reduced_motion {
            RevealPacing {
                entry_delay_ms: 0,
                transition_ms: 0,
                ..self.reveal
            }
        } else {
            self.reveal
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "cricket_brawl_settings";

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
    fn test_reduced_motion_keeps_cta_lock() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let pacing = settings.effective_reveal_pacing();
        assert_eq!(pacing.entry_delay_ms, 0);
        assert_eq!(pacing.transition_ms, 0);
        assert_eq!(pacing.cta_delay_ms, REVEAL_CTA_DELAY_MS);
    }

    #[test]
    fn test_settings_json_without_reveal_uses_defaults() {
        let json = r#"{"sound":false,"haptics":true,"reduced_motion":false}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(!settings.sound);
        assert_eq!(settings.reveal, RevealPacing::default());
    }

    #[test]
    fn test_older_settings_with_extra_fields_still_load() {
        let json = r#"{"sound":true,"music_volume":0.2,"haptics":false,"reduced_motion":true}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(!settings.haptics);
        assert!(settings.reduced_motion);
    }
}
