//! Browser bridge
//!
//! The canvas renderer lives in JavaScript; it drives one `ArcadeHandle` from
//! `requestAnimationFrame`, reads the state as JSON and gets event names back
//! for captions and effects. Sound is played here.

use wasm_bindgen::prelude::*;

use crate::audio::AudioService;
use crate::persistence::{
    CloudSync, HttpSync, KeyValueStore, LocalStore, MemoryStore, NullSync,
};
use crate::session::{Arcade, ScoreKeeper};
use crate::settings::Settings;
use crate::sim::GameKind;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Frostbite Arcade loaded");
}

fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("LocalStorage unavailable ({}), scores will not persist", e);
            Box::new(MemoryStore::default())
        }
    }
}

fn events_json(names: Vec<&'static str>) -> String {
    serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
}

/// One cabinet on the page
#[wasm_bindgen]
pub struct ArcadeHandle {
    arcade: Arcade,
    audio: AudioService,
    settings: Settings,
    settings_store: Box<dyn KeyValueStore>,
}

#[wasm_bindgen]
impl ArcadeHandle {
    /// `game` is a game name (`village`, `ice_breaker`, ...); `sync_url`
    /// enables cloud upload of new records
    #[wasm_bindgen(constructor)]
    pub fn new(game: &str, seed: f64, sync_url: Option<String>) -> Result<ArcadeHandle, JsValue> {
        let kind = GameKind::parse(game)
            .ok_or_else(|| JsValue::from_str(&format!("unknown game '{}'", game)))?;

        let settings_store = open_store();
        let settings = Settings::load(settings_store.as_ref());

        let sync: Box<dyn CloudSync> = match sync_url {
            Some(url) => Box::new(HttpSync::new(url)),
            None => Box::new(NullSync),
        };
        let scores = ScoreKeeper::open(open_store(), sync);

        Ok(Self {
            arcade: Arcade::new(kind, seed as u64).with_scores(scores),
            audio: AudioService::new(&settings),
            settings,
            settings_store,
        })
    }

    pub fn game(&self) -> String {
        self.arcade.kind().as_str().to_string()
    }

    /// Start the run; call from the user gesture that dismissed the title
    pub fn start(&mut self, now_ms: f64) -> String {
        self.audio.unlock();
        self.arcade.start(now_ms, &mut self.audio);
        events_json(self.arcade.event_names())
    }

    /// Advance one frame; returns that frame's event names as JSON
    pub fn frame(&mut self, now_ms: f64) -> String {
        self.arcade.frame(now_ms, &mut self.audio);
        events_json(self.arcade.event_names())
    }

    pub fn state_json(&self) -> Result<String, JsValue> {
        self.arcade
            .state_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Keyboard press/release (`KeyboardEvent.key`)
    pub fn set_key(&mut self, key: &str, down: bool) -> bool {
        self.arcade.controls_mut().apply_key(key, down)
    }

    /// Pointer position already mapped to canvas space
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.arcade.set_pointer(x, y);
    }

    pub fn action(&mut self) -> String {
        self.audio.unlock();
        self.arcade.action(&mut self.audio);
        events_json(self.arcade.event_names())
    }

    pub fn reload(&mut self) -> String {
        self.arcade.secondary(&mut self.audio);
        events_json(self.arcade.event_names())
    }

    /// Leave a finished run; returns the summary JSON the first time
    pub fn press_continue(&mut self) -> Option<String> {
        let summary = self.arcade.press_continue()?;
        serde_json::to_string(&summary).ok()
    }

    pub fn best_score(&self) -> f64 {
        self.arcade
            .scores()
            .map(|s| s.book().best_all_time(self.arcade.kind()) as f64)
            .unwrap_or(0.0)
    }

    /// Replace the cabinet's game, keeping the score book
    pub fn switch_game(&mut self, game: &str, seed: f64) -> Result<(), JsValue> {
        let kind = GameKind::parse(game)
            .ok_or_else(|| JsValue::from_str(&format!("unknown game '{}'", game)))?;
        let scores = self.arcade.take_scores();
        let mut arcade = Arcade::new(kind, seed as u64);
        if let Some(scores) = scores {
            arcade = arcade.with_scores(scores);
        }
        self.arcade = arcade;
        Ok(())
    }

    pub fn restart(&mut self, seed: f64) {
        self.arcade.restart(seed as u64);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.apply_settings();
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.settings.set_master_volume(vol);
        self.apply_settings();
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.settings.set_sfx_volume(vol);
        self.apply_settings();
    }

    pub fn settings_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.settings).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Page hidden or blurred
    pub fn on_blur(&mut self) {
        if self.settings.mute_on_blur {
            self.audio.apply_settings(&Settings {
                muted: true,
                ..self.settings.clone()
            });
        }
    }

    pub fn on_focus(&mut self) {
        self.audio.apply_settings(&self.settings);
    }

    /// Release the audio device (component unmount)
    pub fn dispose(&mut self) {
        self.audio.dispose();
    }
}

impl ArcadeHandle {
    fn apply_settings(&mut self) {
        self.audio.apply_settings(&self.settings);
        self.settings.save(self.settings_store.as_mut());
    }
}
