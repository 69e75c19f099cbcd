#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod pool;

use std::fmt;

use pool::{
    ConfigError, PoolConfig, PoolError, PoolScene, PoolShape, ShapeKind, TILE_SIZE_PRESETS, build_pool_scene,
    generate_perimeter,
};
use serde::Serialize;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // A second `initialize` call keeps the logger that is already installed.
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
#[wasm_bindgen]
pub async fn initialize_parallel(worker_count: Option<u32>) -> Result<(), JsError> {
    let threads = worker_count
        .map(|count| count.max(1) as usize)
        .or_else(|| std::thread::available_parallelism().map(|value| value.get()).ok())
        .unwrap_or(1);

    wasm_bindgen_rayon::init_thread_pool(threads)
        .await
        .map_err(|err| JsError::new(&format!("could not start the rayon thread pool: {err}")))
}

/// Public entry point for the viewer.
///
/// Holds the current [`PoolConfig`] and the last scene built from it. Setting a
/// new config marks the scene stale; `build` is a no-op while nothing changed.
#[wasm_bindgen]
pub struct PoolEngine {
    config: PoolConfig,
    scene: Option<PoolScene>,
    dirty: bool,
}

impl Default for PoolEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PoolEngine {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> PoolEngine {
        PoolEngine {
            config: PoolConfig::default(),
            scene: None,
            dirty: true,
        }
    }

    /// Replaces the config with a JS object; missing fields take their defaults.
    #[wasm_bindgen]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: PoolConfig = serde_wasm_bindgen::from_value(config).map_err(to_js_error)?;
        self.configure(config).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config = PoolConfig::from_json_str(json).map_err(to_js_error)?;
        self.configure(config).map_err(to_js_error)
    }

    #[wasm_bindgen]
    pub fn get_config(&self) -> Result<JsValue, JsValue> {
        to_js(&self.config)
    }

    /// Rebuilds every mesh if the config changed since the last build.
    #[wasm_bindgen]
    pub fn build(&mut self) -> Result<(), JsValue> {
        self.build_scene().map(|_| ()).map_err(to_js_error)
    }

    /// Packed mesh buffers plus waterline metadata for the last build.
    #[wasm_bindgen]
    pub fn get_scene(&self) -> Result<JsValue, JsValue> {
        let scene = self.built_scene()?;
        to_js(&scene.to_buffers())
    }

    #[wasm_bindgen]
    pub fn get_waterline_metadata(&self) -> Result<JsValue, JsValue> {
        let scene = self.built_scene()?;
        to_js(&scene.waterline_metadata)
    }

    #[wasm_bindgen]
    pub fn get_diagnostics(&self) -> Result<JsValue, JsValue> {
        let scene = self.built_scene()?;
        to_js(&scene.diagnostics())
    }
}

impl PoolEngine {
    /// Validates and stores `config`. The previous config stays on error.
    pub fn configure(&mut self, config: PoolConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config != self.config {
            self.config = config;
            self.dirty = true;
        }
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn build_scene(&mut self) -> Result<&PoolScene, PoolError> {
        let scene = match self.scene.take() {
            Some(scene) if !self.dirty => scene,
            _ => build_pool_scene(&self.config)?,
        };
        self.dirty = false;
        Ok(self.scene.insert(scene))
    }

    /// Last built scene, if it still matches the config.
    #[must_use]
    pub fn scene(&self) -> Option<&PoolScene> {
        if self.dirty { None } else { self.scene.as_ref() }
    }

    fn built_scene(&self) -> Result<&PoolScene, JsValue> {
        self.scene()
            .ok_or_else(|| js_error("the scene has not been built for the current config"))
    }
}

/// Perimeter points `[x, 0, z]` for one shape, without building a scene.
#[wasm_bindgen]
pub fn perimeter_points(shape: &str, length: f64, width: f64, segments: usize) -> Result<JsValue, JsValue> {
    let kind: ShapeKind = shape.parse().map_err(to_js_error)?;
    let perimeter = generate_perimeter(&PoolShape::new(kind, length, width), segments).map_err(to_js_error)?;
    to_js(&perimeter.to_arrays())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TileSizeExport {
    label: String,
    width_inches: f64,
    height_inches: f64,
}

#[wasm_bindgen]
pub fn tile_size_presets() -> Result<JsValue, JsValue> {
    let presets: Vec<TileSizeExport> = TILE_SIZE_PRESETS
        .iter()
        .map(|tile| TileSizeExport {
            label: tile.label(),
            width_inches: tile.width_inches,
            height_inches: tile.height_inches,
        })
        .collect();
    to_js(&presets)
}

/// Plain JS objects instead of `Map`s so the viewer can index by key.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| JsError::new(&err.to_string()).into())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}
