pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use cub_sim::SimConfig;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner, or return `fallback` before `game_init`.
fn with_runner<R>(fallback: R, f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("runner not initialized, call game_init() first");
            fallback
        }
    })
}

/// Install logging and create the runner. `config_json` may be empty or a
/// partial `SimConfig`; unknown or malformed input falls back to defaults.
#[wasm_bindgen]
pub fn game_init(config_json: &str) -> bool {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let (config, ok) = if config_json.trim().is_empty() {
        (SimConfig::default(), true)
    } else {
        match SimConfig::from_json(config_json) {
            Ok(config) => (config, true),
            Err(err) => {
                log::error!("bad config, using defaults: {err}");
                (SimConfig::default(), false)
            }
        }
    };

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(SimRunner::new(config));
    });
    log::info!("cub-web: initialized");
    ok
}

#[wasm_bindgen]
pub fn game_load_level(json: &str) -> bool {
    with_runner(false, |r| match r.load_level_json(json) {
        Ok(()) => true,
        Err(err) => {
            log::error!("level rejected: {err}");
            false
        }
    })
}

#[wasm_bindgen]
pub fn game_load_builtin(id: u32) -> bool {
    with_runner(false, |r| match r.load_builtin(id) {
        Ok(()) => true,
        Err(err) => {
            log::error!("level {id} rejected: {err}");
            false
        }
    })
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner((), |r| r.tick(dt));
}

/// Intent bits: left 1, right 2, jump 4, down 8, fire 16.
#[wasm_bindgen]
pub fn game_set_input(bits: u32) {
    with_runner((), |r| r.set_input(bits));
}

#[wasm_bindgen]
pub fn game_restart() {
    with_runner((), |r| r.restart());
}

#[wasm_bindgen]
pub fn game_revive() {
    with_runner((), |r| r.revive());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_sprites_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.sprites_ptr())
}

#[wasm_bindgen]
pub fn get_sprite_count() -> u32 {
    with_runner(0, |r| r.sprite_count())
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> *const u8 {
    with_runner(std::ptr::null(), |r| r.sound_events_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> u32 {
    with_runner(0, |r| r.sound_events_len())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(std::ptr::null(), |r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(0, |r| r.events_len())
}

// ---- Capacity accessors ----

#[wasm_bindgen]
pub fn get_max_sprites() -> u32 {
    with_runner(0, |r| r.max_sprites())
}

#[wasm_bindgen]
pub fn get_max_sounds() -> u32 {
    with_runner(0, |r| r.max_sounds())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(0, |r| r.max_events())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(0, |r| r.buffer_total_floats())
}
