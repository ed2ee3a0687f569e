//! Browser entry point
//!
//! JS owns the canvas and the animation frame; it forwards input, calls
//! `frame()` once per refresh and draws from the JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::app::Game;
use crate::audio::AudioManager;
use crate::persistence::LocalStorageStore;
use crate::platform::{InputLatch, InputSource};
use crate::settings::Settings;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Skyhop starting...");
}

fn source_from_code(code: u8) -> InputSource {
    match code {
        1 => InputSource::Pointer,
        2 => InputSource::Touch,
        _ => InputSource::Keyboard,
    }
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore, AudioManager>,
    input: InputLatch,
    settings: Settings,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, settings.tuning(), LocalStorageStore, AudioManager::new());
        Self::apply_audio_settings(&mut game, &settings);
        WebGame {
            game,
            input: InputLatch::new(),
            settings,
        }
    }

    fn apply_audio_settings(game: &mut Game<LocalStorageStore, AudioManager>, settings: &Settings) {
        let audio = game.audio_mut();
        audio.set_muted(settings.muted);
        audio.set_volumes(
            settings.master_volume,
            settings.sfx_volume,
            settings.music_volume,
        );
        game.set_music(settings.music && !settings.muted);
    }

    /// Input source went down (0 keyboard, 1 pointer, 2 touch)
    pub fn press(&mut self, source: u8) {
        self.game.audio_mut().resume();
        self.input.press(source_from_code(source));
    }

    pub fn release(&mut self, source: u8) {
        self.input.release(source_from_code(source));
    }

    /// Focus lost: nothing stays held
    pub fn blur(&mut self) {
        self.input.clear();
    }

    /// Start button / play-again button
    pub fn start(&mut self) -> bool {
        self.input.clear();
        self.game.start()
    }

    /// One display frame
    pub fn frame(&mut self) {
        let input = self.input.sample();
        self.game.frame(&input);
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.state.snapshot()).unwrap_or_default()
    }

    pub fn panels_json(&self) -> String {
        serde_json::to_string(&self.game.panels()).unwrap_or_default()
    }

    /// Flip mute; returns true when now muted
    pub fn toggle_mute(&mut self) -> bool {
        let muted = self.settings.toggle_mute();
        Self::apply_audio_settings(&mut self.game, &self.settings);
        if !muted {
            self.game.play_toggle();
        }
        self.settings.save();
        muted
    }

    /// Switch to a built-in profile by name (only outside of play)
    pub fn select_profile(&mut self, name: &str) -> bool {
        let Some(_) = Tuning::preset(name) else {
            return false;
        };
        let previous = self.settings.profile.clone();
        if !self.settings.select_profile(name) {
            return false;
        }
        if !self.game.select_profile(self.settings.tuning()) {
            self.settings.profile = previous;
            return false;
        }
        self.settings.save();
        true
    }

    pub fn profile(&self) -> String {
        self.settings.profile.clone()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
