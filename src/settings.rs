//! Player preferences
//!
//! Persisted separately from the game in LocalStorage. Only sound for now.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Background music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Answer / level-up cue volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            music_volume: 0.3,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    pub fn effective_music_volume(&self) -> f32 {
        self.effective(self.music_volume)
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        self.effective(self.sfx_volume)
    }

    fn effective(&self, channel: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * channel).clamp(0.0, 1.0)
        }
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Stored settings, or defaults when nothing usable is stored
    pub fn load() -> Self {
        Self::from_stored(read_stored().as_deref())
    }

    /// Persist for the next visit
    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => write_stored(&json),
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }

    fn from_stored(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Stored settings unreadable ({}), using defaults", e);
            Self::default()
        })
    }
}

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "quiz_arena_settings";

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn read_stored() -> Option<String> {
    local_storage()?.get_item(STORAGE_KEY).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn write_stored(json: &str) {
    let saved = local_storage().is_some_and(|s| s.set_item(STORAGE_KEY, json).is_ok());
    if !saved {
        log::warn!("LocalStorage unavailable, settings not saved");
    }
}

// Native builds have nowhere to keep settings
#[cfg(not(target_arch = "wasm32"))]
fn read_stored() -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
fn write_stored(_json: &str) {}
