#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod bridge;
pub mod clock;
pub mod dom;
pub mod sound;
pub mod storage;

pub use bridge::NatureGame;
pub use clock::JsClock;
pub use storage::{LocalStore, WebStorageError};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    log::debug!("nature-web ready");
}
