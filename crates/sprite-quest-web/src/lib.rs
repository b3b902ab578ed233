//! `#[wasm_bindgen]` exports for the Sprite Quest core.
//!
//! JS calls `quest_init()` once, optionally `quest_load_catalog` /
//! `quest_configure`, then `quest_tick(dt)` every frame. After each tick it
//! reads the sound and event buffers through the pointer/length accessors
//! and pulls `quest_snapshot()` for the UI state.

pub mod runner;

pub use runner::QuestRunner;

use std::cell::RefCell;
use std::fmt::Display;

use sprite_quest::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<QuestRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut QuestRunner) -> R) -> Result<R, JsValue> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Ok(f(runner)),
            None => Err(JsValue::from_str(
                "Quest not initialized. Call quest_init() first.",
            )),
        }
    })
}

fn to_js(err: impl Display) -> JsValue {
    let message = err.to_string();
    log::error!("{}", message);
    JsValue::from_str(&message)
}

#[wasm_bindgen]
pub fn quest_init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = QuestRunner::builtin().map_err(to_js)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("sprite-quest: initialized");
    Ok(())
}

/// Replace the curriculum with a JSON array of modules. Restarts the quest.
#[wasm_bindgen]
pub fn quest_load_catalog(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.load_catalog(json))?.map_err(to_js)
}

/// Apply a JSON `QuestConfig` (missing fields take defaults). Restarts the quest.
#[wasm_bindgen]
pub fn quest_configure(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.configure(json))?.map_err(to_js)
}

#[wasm_bindgen]
pub fn quest_tick(dt: f32) -> Result<(), JsValue> {
    with_runner(|r| r.tick(dt))
}

// ---- Learner controls ----

#[wasm_bindgen]
pub fn quest_next() -> Result<(), JsValue> {
    with_runner(|r| r.session_mut().next())
}

#[wasm_bindgen]
pub fn quest_previous() -> Result<bool, JsValue> {
    with_runner(|r| r.session_mut().previous())
}

#[wasm_bindgen]
pub fn quest_select_level(index: u32) -> Result<bool, JsValue> {
    with_runner(|r| r.session_mut().select_level(index as usize))
}

#[wasm_bindgen]
pub fn quest_restart() -> Result<(), JsValue> {
    with_runner(|r| r.session_mut().restart())
}

#[wasm_bindgen]
pub fn quest_dismiss_welcome() -> Result<(), JsValue> {
    with_runner(|r| r.session_mut().dismiss_welcome())
}

// ---- Mini-game input ----

#[wasm_bindgen]
pub fn quest_pointer_down(x: f32, y: f32) -> Result<(), JsValue> {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }))
}

#[wasm_bindgen]
pub fn quest_pointer_up(x: f32, y: f32) -> Result<(), JsValue> {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }))
}

#[wasm_bindgen]
pub fn quest_pointer_move(x: f32, y: f32) -> Result<(), JsValue> {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }))
}

#[wasm_bindgen]
pub fn quest_custom_event(kind: u32, a: f32, b: f32, c: f32) -> Result<(), JsValue> {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }))
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn quest_snapshot() -> Result<String, JsValue> {
    with_runner(|r| r.snapshot_json())?.map_err(to_js)
}

#[wasm_bindgen]
pub fn get_sound_events_ptr() -> Result<*const u8, JsValue> {
    with_runner(|r| r.sound_events_ptr())
}

#[wasm_bindgen]
pub fn get_sound_events_len() -> Result<u32, JsValue> {
    with_runner(|r| r.sound_events_len())
}

#[wasm_bindgen]
pub fn get_quest_events_ptr() -> Result<*const f32, JsValue> {
    with_runner(|r| r.quest_events_ptr())
}

#[wasm_bindgen]
pub fn get_quest_events_len() -> Result<u32, JsValue> {
    with_runner(|r| r.quest_events_len())
}

/// Copy of the sound buffer, for hosts without shared memory access.
#[wasm_bindgen]
pub fn quest_sound_events() -> Result<js_sys::Uint8Array, JsValue> {
    with_runner(|r| js_sys::Uint8Array::from(r.sound_events()))
}

/// Copy of the event buffer as flat `kind, a, b, c` floats.
#[wasm_bindgen]
pub fn quest_events() -> Result<js_sys::Float32Array, JsValue> {
    with_runner(|r| {
        let floats: Vec<f32> = r
            .quest_events()
            .iter()
            .flat_map(|e| [e.kind, e.a, e.b, e.c])
            .collect();
        js_sys::Float32Array::from(floats.as_slice())
    })
}

#[wasm_bindgen]
pub fn get_max_sounds() -> Result<u32, JsValue> {
    with_runner(|r| r.max_sounds())
}

#[wasm_bindgen]
pub fn get_max_events() -> Result<u32, JsValue> {
    with_runner(|r| r.max_events())
}
