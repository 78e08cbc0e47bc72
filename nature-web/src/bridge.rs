//! JavaScript-facing handle around the game store.
use nature_game::constants::DEFAULT_SOUND_VOLUME;
use nature_game::{GameStore, Interaction, WeatherPatch, hidden_creature};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::clock::JsClock;
use crate::sound::{self, clamp_volume};
use crate::storage::LocalStore;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// One play session in the page. Loads the saved snapshot on construction.
#[wasm_bindgen]
pub struct NatureGame {
    store: GameStore<LocalStore, JsClock>,
    volume: f32,
    sound_enabled: bool,
}

impl Default for NatureGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl NatureGame {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: GameStore::with_clock(LocalStore, JsClock),
            volume: DEFAULT_SOUND_VOLUME,
            sound_enabled: true,
        }
    }

    /// Current state as a plain JS object in snapshot layout.
    ///
    /// # Errors
    /// Returns an error if the state cannot be converted.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.store.state())
    }

    /// Apply an interaction such as `{ type: "feedAnimal", value: "bird1" }`,
    /// play its sounds and return the reaction.
    ///
    /// # Errors
    /// Returns an error if the interaction is malformed.
    pub fn dispatch(&mut self, interaction: JsValue) -> Result<JsValue, JsValue> {
        let interaction: Interaction = serde_wasm_bindgen::from_value(interaction)?;
        let reaction = self.store.dispatch(&interaction);
        if self.sound_enabled {
            sound::play_reaction(&reaction, self.volume);
        }
        to_js(&reaction)
    }

    /// Merge a partial weather object into the current weather.
    ///
    /// # Errors
    /// Returns an error if the patch is malformed.
    #[wasm_bindgen(js_name = updateWeather)]
    pub fn update_weather(&mut self, patch: JsValue) -> Result<(), JsValue> {
        let patch: WeatherPatch = serde_wasm_bindgen::from_value(patch)?;
        self.store.update_weather(&patch);
        Ok(())
    }

    #[wasm_bindgen(js_name = updateMissionProgress)]
    pub fn update_mission_progress(&mut self, mission_id: &str, progress: u32) -> bool {
        self.store.update_mission_progress(mission_id, progress)
    }

    /// Ids of badges unlocked by this check.
    #[wasm_bindgen(js_name = checkBadges)]
    pub fn check_badges(&mut self) -> Vec<String> {
        self.store.check_badges()
    }

    pub fn save(&mut self) -> bool {
        self.store.save_progress()
    }

    pub fn load(&mut self) -> bool {
        self.store.load_progress()
    }

    pub fn reset(&mut self) {
        self.store.reset_progress();
    }

    /// Fun fact for a hidden creature, `undefined` for unknown ids.
    #[wasm_bindgen(js_name = creatureFact)]
    #[must_use]
    pub fn creature_fact(creature_id: &str) -> Option<String> {
        hidden_creature(creature_id).map(|creature| creature.fact.to_string())
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
    }

    #[wasm_bindgen(js_name = setSoundEnabled)]
    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }
}
