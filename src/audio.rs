//! Sound cue playback
//!
//! The game only asks for cues through [`CuePlayer`]. Playback is
//! fire-and-forget: a failing cue is logged by the caller and the game goes on.

use crate::error::AudioError;
use crate::settings::Settings;
use crate::sim::Cue;

/// Something that can play game cues
pub trait CuePlayer {
    /// Start a cue. `Cue::Music` loops and is a no-op if already playing.
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;

    /// Stop the looping music
    fn stop_music(&mut self);

    /// Pick up changed volumes or mute
    fn apply_settings(&mut self, _settings: &Settings) {}
}

/// Plays nothing (headless runs, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_music(&mut self) {}
}

impl Cue {
    /// Audio file for this cue, relative to the page
    pub fn asset_path(&self) -> &'static str {
        match self {
            Cue::Music => "./audio/field.mp3",
            Cue::Correct => "./audio/seikai2.mp3",
            Cue::Wrong => "./audio/fuseikai2.mp3",
            Cue::LevelUp => "./audio/levelup.mp3",
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::HtmlAudioCuePlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use super::CuePlayer;
    use crate::error::AudioError;
    use crate::settings::Settings;
    use crate::sim::Cue;

    /// Cue player backed by preloaded `<audio>` elements
    pub struct HtmlAudioCuePlayer {
        music: Option<HtmlAudioElement>,
        correct: Option<HtmlAudioElement>,
        wrong: Option<HtmlAudioElement>,
        level_up: Option<HtmlAudioElement>,
        music_volume: f64,
        sfx_volume: f64,
    }

    fn load(cue: Cue) -> Option<HtmlAudioElement> {
        match HtmlAudioElement::new_with_src(cue.asset_path()) {
            Ok(el) => {
                el.set_preload("auto");
                el.set_loop(cue == Cue::Music);
                Some(el)
            }
            Err(e) => {
                log::warn!("Failed to create audio element for {:?}: {:?}", cue, e);
                None
            }
        }
    }

    impl HtmlAudioCuePlayer {
        pub fn new(settings: &Settings) -> Self {
            let mut player = Self {
                music: load(Cue::Music),
                correct: load(Cue::Correct),
                wrong: load(Cue::Wrong),
                level_up: load(Cue::LevelUp),
                music_volume: 0.0,
                sfx_volume: 0.0,
            };
            player.apply_settings(settings);
            player
        }

        fn element(&self, cue: Cue) -> Option<&HtmlAudioElement> {
            match cue {
                Cue::Music => self.music.as_ref(),
                Cue::Correct => self.correct.as_ref(),
                Cue::Wrong => self.wrong.as_ref(),
                Cue::LevelUp => self.level_up.as_ref(),
            }
        }
    }

    impl CuePlayer for HtmlAudioCuePlayer {
        fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
            let el = self
                .element(cue)
                .ok_or_else(|| AudioError::Unavailable(format!("{:?}", cue)))?;

            if cue == Cue::Music {
                if !el.paused() {
                    return Ok(());
                }
                el.set_volume(self.music_volume);
            } else {
                // Restart so quick repeats are all heard
                el.set_current_time(0.0);
                el.set_volume(self.sfx_volume);
            }

            let promise = el
                .play()
                .map_err(|e| AudioError::Playback(format!("{:?}", e)))?;
            // Autoplay rejections arrive asynchronously
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::warn!("Playback of {:?} blocked: {:?}", cue, e);
                }
            });
            Ok(())
        }

        fn stop_music(&mut self) {
            if let Some(music) = &self.music {
                if !music.paused() {
                    let _ = music.pause();
                }
            }
        }

        fn apply_settings(&mut self, settings: &Settings) {
            self.music_volume = settings.effective_music_volume() as f64;
            self.sfx_volume = settings.effective_sfx_volume() as f64;
            // Music may already be playing; cues pick the volume up on play
            if let Some(music) = &self.music {
                music.set_volume(self.music_volume);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_paths() {
        assert_eq!(Cue::Music.asset_path(), "./audio/field.mp3");
        assert_eq!(Cue::Correct.asset_path(), "./audio/seikai2.mp3");
        assert_eq!(Cue::Wrong.asset_path(), "./audio/fuseikai2.mp3");
        assert_eq!(Cue::LevelUp.asset_path(), "./audio/levelup.mp3");
    }
}
