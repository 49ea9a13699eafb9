//! WASM exports for the desktop shell
//!
//! This module provides wasm-bindgen exports for the Scene, allowing the
//! page to feed pointer events in and read frames out as JSON.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

use crate::config::ShellConfig;
use crate::input::{InputResult, Modifiers};
use crate::math::{Rect, Size, Vec2};
use crate::panel::Clock;
use crate::scene::{AppInfo, Scene};

// Import js_sys::Date for timestamps
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Date, js_name = now)]
    fn date_now() -> f64;
}

/// `log` backend writing to the browser console
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn result_json(result: &InputResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|_| r#"{"type":"unhandled"}"#.to_string())
}

fn modifiers(ctrl: bool, shift: bool) -> Modifiers {
    Modifiers { ctrl, shift }
}

/// Shell controller for WASM - wraps Scene with JS-friendly API
#[wasm_bindgen]
pub struct ShellController {
    scene: Scene,
}

#[wasm_bindgen]
impl ShellController {
    /// Create a controller with the default desktop
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ShellController, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let scene = Scene::with_default_desktop(ShellConfig::default())?;
        Ok(Self { scene })
    }

    /// Create an empty controller from a (partial) JSON configuration
    #[wasm_bindgen]
    pub fn with_config_json(json: &str) -> Result<ShellController, JsError> {
        let config = ShellConfig::from_json(json)?;
        Ok(Self {
            scene: Scene::new(config),
        })
    }

    /// Route `log` records to the console; `level` is error|warn|info|debug|trace
    #[wasm_bindgen]
    pub fn init_logging(level: &str) {
        let filter = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(filter);
        }
    }

    // =========================================================================
    // Display
    // =========================================================================

    /// Resize the display
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.scene.resize(Size::new(width, height));
    }

    /// Report the measured taskbar rectangle
    #[wasm_bindgen]
    pub fn set_taskbar_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.scene.set_taskbar_rect(Rect::new(x, y, width, height));
    }

    // =========================================================================
    // Pointer input
    // =========================================================================

    /// Pointer down; returns an InputResult as JSON
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32, ctrl: bool, shift: bool) -> String {
        let result = self
            .scene
            .pointer_down(Vec2::new(x, y), modifiers(ctrl, shift), date_now());
        result_json(&result)
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> String {
        result_json(&self.scene.pointer_move(Vec2::new(x, y)))
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self) -> String {
        result_json(&self.scene.pointer_up(date_now()))
    }

    #[wasm_bindgen]
    pub fn double_click(&mut self, x: f32, y: f32) -> String {
        result_json(&self.scene.double_click(Vec2::new(x, y)))
    }

    /// Whether window-level move/up listeners should be bound
    #[wasm_bindgen]
    pub fn is_capturing(&self) -> bool {
        self.scene.is_capturing()
    }

    /// Component teardown; returns every surface to idle
    #[wasm_bindgen]
    pub fn teardown(&mut self) {
        self.scene.teardown();
    }

    // =========================================================================
    // Icons, windows, tasks
    // =========================================================================

    #[wasm_bindgen]
    pub fn add_icon(&mut self, title: &str, icon_path: &str) -> Result<usize, JsError> {
        Ok(self.scene.add_icon(title, icon_path)?)
    }

    #[wasm_bindgen]
    pub fn remove_icon(&mut self, index: usize) -> Result<(), JsError> {
        Ok(self.scene.remove_icon(index)?)
    }

    /// Launch an app described as JSON (`title`, `description`, `icon`, `size`, `position`)
    #[wasm_bindgen]
    pub fn launch(&mut self, app_json: &str) -> Result<u64, JsError> {
        let app: AppInfo = serde_json::from_str(app_json)?;
        Ok(self.scene.launch(&app))
    }

    #[wasm_bindgen]
    pub fn close_window(&mut self, id: u64) -> Result<(), JsError> {
        Ok(self.scene.close_window(id)?)
    }

    #[wasm_bindgen]
    pub fn pin_task(&mut self, title: &str, description: &str, icon: &str) -> usize {
        self.scene.pin_task(title, description, icon)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Current frame as JSON
    #[wasm_bindgen]
    pub fn tick_frame(&self) -> String {
        serde_json::to_string(&self.scene.frame()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Clock faces as JSON for the browser's local time
    #[wasm_bindgen]
    pub fn clock_json(&self) -> Result<String, JsError> {
        // getTimezoneOffset is minutes behind UTC
        let offset_minutes = -(js_sys::Date::new_0().get_timezone_offset() as i32);
        let now = Clock::local_time(date_now(), offset_minutes)?;
        let faces = self.scene.clock_faces(now)?;
        Ok(serde_json::to_string(&faces)?)
    }
}
