use std::sync::Mutex;
use std::time::Duration;

use termfolio_core::content::ProjectStore;
use termfolio_core::{Engine, EngineOptions, InputEvent};
use wasm_bindgen::prelude::*;

static ENGINE: Mutex<Option<Engine>> = Mutex::new(None);

fn with_engine<T>(f: impl FnOnce(&mut Engine) -> Result<T, JsError>) -> Result<T, JsError> {
    let mut slot = ENGINE.lock().unwrap_or_else(|e| e.into_inner());
    let engine = slot.as_mut().ok_or_else(|| JsError::new("engine not initialized"))?;
    f(engine)
}

/// Initialize the engine with the built-in catalog, or a custom catalog
/// passed as JSON bytes.
#[wasm_bindgen]
pub fn init(catalog: Option<Vec<u8>>, particle_count: usize) -> Result<(), JsError> {
    let store = match catalog {
        Some(data) => ProjectStore::from_json(&data).map_err(|e| JsError::new(&e.to_string()))?,
        None => ProjectStore::builtin(),
    };
    let engine = Engine::new(
        store,
        EngineOptions {
            particle_count,
            ..EngineOptions::default()
        },
    );
    let mut slot = ENGINE.lock().unwrap_or_else(|e| e.into_inner());
    *slot = Some(engine);
    Ok(())
}

/// Feed one input event, encoded as JSON (e.g.
/// `{"kind":"wheel","delta_y":120}`). `now_ms` is the page's
/// `performance.now()` value.
#[wasm_bindgen]
pub fn handle_input(event_json: &str, now_ms: f64) -> Result<(), JsError> {
    let event: InputEvent =
        serde_json::from_str(event_json).map_err(|e| JsError::new(&e.to_string()))?;
    with_engine(|engine| {
        engine.handle(event, Duration::from_secs_f64(now_ms.max(0.0) / 1000.0));
        Ok(())
    })
}

/// Advance the engine one frame and return the scene snapshot as JSON
/// for the canvas renderer.
#[wasm_bindgen]
pub fn tick(now_ms: f64) -> Result<String, JsError> {
    with_engine(|engine| {
        let now = Duration::from_secs_f64(now_ms.max(0.0) / 1000.0);
        engine.tick(now);
        let snapshot = engine.snapshot(now);
        serde_json::to_string(&snapshot).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Resize the glitch backdrop grid to the canvas's character grid.
#[wasm_bindgen]
pub fn resize_glitch(columns: usize, rows: usize) -> Result<(), JsError> {
    with_engine(|engine| {
        engine.resize_glitch(columns, rows);
        Ok(())
    })
}

/// Number of projects in the active catalog.
#[wasm_bindgen]
pub fn project_count() -> Result<usize, JsError> {
    with_engine(|engine| Ok(engine.store().len()))
}
