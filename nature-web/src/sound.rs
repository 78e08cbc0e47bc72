//! Sound cues leave the game as `playSound` events on `window`; whatever audio
//! component is listening decides how they sound.
use nature_game::constants::DEFAULT_SOUND_VOLUME;
use nature_game::{Reaction, SoundKind};
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit};

use crate::dom;

pub const PLAY_SOUND_EVENT: &str = "playSound";

/// Event payload, `{ type, volume }` on the JS side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoundDetail {
    #[serde(rename = "type")]
    pub kind: SoundKind,
    pub volume: f32,
}

impl SoundDetail {
    #[must_use]
    pub fn new(kind: SoundKind, volume: f32) -> Self {
        Self {
            kind,
            volume: clamp_volume(volume),
        }
    }
}

/// Keep a volume within `0.0..=1.0`; NaN falls back to the default volume.
#[must_use]
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        DEFAULT_SOUND_VOLUME
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Dispatch a `playSound` event for `kind`.
///
/// # Errors
/// Returns an error if there is no window or the event cannot be built or dispatched.
pub fn play_sound(kind: SoundKind, volume: f32) -> Result<(), JsValue> {
    let window = dom::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let detail = serde_wasm_bindgen::to_value(&SoundDetail::new(kind, volume))?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(PLAY_SOUND_EVENT, &init)?;
    window.dispatch_event(&event)?;
    Ok(())
}

/// Play every cue a reaction calls for. Failures are logged, not raised, since
/// a silent game is still playable.
pub fn play_reaction(reaction: &Reaction, volume: f32) {
    for cue in reaction.cues() {
        if let Err(err) = play_sound(cue, volume) {
            let message = dom::js_error_message(&err);
            log::warn!("could not play {cue}: {message}");
            dom::console_warn(&format!("playSound {cue}: {message}"));
        }
    }
}
