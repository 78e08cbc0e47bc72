#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use nature_game::constants::SAVE_KEY;
use nature_game::{Clock, GameStore, KeyValueStore, SoundKind};
use nature_web::sound::{PLAY_SOUND_EVENT, play_sound};
use nature_web::{JsClock, LocalStore, NatureGame, dom};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::CustomEvent;

wasm_bindgen_test_configure!(run_in_browser);

fn clear_save() {
    LocalStore.clear(SAVE_KEY).expect("clear save");
}

#[wasm_bindgen_test]
fn dom_helpers_reach_browser() {
    assert!(dom::window().is_some());
    assert!(dom::local_storage().is_ok());
}

#[wasm_bindgen_test]
fn local_store_round_trips() {
    LocalStore.save("nature.test", "{\"a\":1}").expect("save");
    assert_eq!(
        LocalStore.load("nature.test").expect("load").as_deref(),
        Some("{\"a\":1}")
    );
    LocalStore.clear("nature.test").expect("clear");
    assert_eq!(LocalStore.load("nature.test").expect("load"), None);
}

#[wasm_bindgen_test]
fn js_clock_is_past_epoch() {
    assert!(JsClock.now_ms() > 1_600_000_000_000);
}

#[wasm_bindgen_test]
fn store_persists_through_local_storage() {
    clear_save();
    let mut store = GameStore::with_clock(LocalStore, JsClock);
    store.feed_animal("bird1");
    assert!(store.save_progress());

    let reopened = GameStore::with_clock(LocalStore, JsClock);
    assert_eq!(reopened.state().animal("bird1").unwrap().feed_count, 1);
    clear_save();
}

#[wasm_bindgen_test]
fn play_sound_dispatches_custom_event() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let listener = Closure::<dyn FnMut(CustomEvent)>::new(move |event: CustomEvent| {
        let detail = event.detail();
        let kind = js_sys::Reflect::get(&detail, &JsValue::from_str("type"))
            .ok()
            .and_then(|value| value.as_string())
            .unwrap_or_default();
        sink.borrow_mut().push(kind);
    });
    let window = dom::window().expect("window");
    window
        .add_event_listener_with_callback(PLAY_SOUND_EVENT, listener.as_ref().unchecked_ref())
        .expect("listen");

    play_sound(SoundKind::BadgeEarn, 0.5).expect("dispatch");

    window
        .remove_event_listener_with_callback(PLAY_SOUND_EVENT, listener.as_ref().unchecked_ref())
        .expect("unlisten");
    assert_eq!(seen.borrow().as_slice(), ["badgeEarn".to_string()]);
}

#[wasm_bindgen_test]
fn handle_dispatches_and_saves() {
    clear_save();
    let mut game = NatureGame::new();
    game.set_sound_enabled(false);

    let interaction = serde_wasm_bindgen::to_value(&nature_game::Interaction::ChangeSky(
        nature_game::Sky::Rainbow,
    ))
    .expect("interaction to js");
    let reaction = game.dispatch(interaction).expect("dispatch");
    let reaction: nature_game::Reaction =
        serde_wasm_bindgen::from_value(reaction).expect("reaction from js");
    assert_eq!(reaction.earned_badges, vec!["sky-wizard".to_string()]);

    assert!(game.save());
    game.reset();
    assert!(LocalStore.load(SAVE_KEY).expect("load").is_none());
    assert_eq!(
        NatureGame::creature_fact("ladybug").as_deref(),
        Some("Ladybugs help protect leaves!")
    );
}

#[wasm_bindgen_test]
fn update_weather_clamps_wild_cloud_counts() {
    clear_save();
    let mut game = NatureGame::new();
    for (raw, expected) in [("300", 10), ("-1", 0), ("2.5", 2)] {
        let patch = js_sys::JSON::parse(&format!("{{\"cloudCount\":{raw}}}")).expect("patch");
        game.update_weather(patch).expect("patch accepted");
        let state: nature_game::GameState =
            serde_wasm_bindgen::from_value(game.state().expect("state")).expect("state from js");
        assert_eq!(state.weather.cloud_count, expected);
    }
    let state: nature_game::GameState =
        serde_wasm_bindgen::from_value(game.state().expect("state")).expect("state from js");
    assert_eq!(state.total_interactions, 3);
}

#[wasm_bindgen_test]
fn handle_reports_feeding_verdicts() {
    clear_save();
    let mut game = NatureGame::new();
    game.set_sound_enabled(false);
    let attempt = |food: &str| {
        js_sys::JSON::parse(&format!(
            "{{\"type\":\"feedWith\",\"value\":{{\"animal\":\"bird1\",\"food\":\"{food}\"}}}}"
        ))
        .expect("interaction")
    };
    let wrong: nature_game::Reaction =
        serde_wasm_bindgen::from_value(game.dispatch(attempt("nectar")).expect("dispatch"))
            .expect("reaction from js");
    assert_eq!(wrong.food_matched, Some(false));
    let right: nature_game::Reaction =
        serde_wasm_bindgen::from_value(game.dispatch(attempt("seeds")).expect("dispatch"))
            .expect("reaction from js");
    assert_eq!(right.food_matched, Some(true));
    assert_eq!(right.cue, SoundKind::AnimalFeed);
}
