//! Game settings
//!
//! Only the grid size is persisted in LocalStorage. The viewport comes from
//! the canvas at startup, and tuning values and the seed are never stored,
//! so every run carves a fresh maze unless the URL pins one. URL query
//! parameters (`?rows=8&cols=12&seed=42`) override the stored size.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maze rows
    pub rows: usize,
    /// Maze columns
    pub cols: usize,

    /// Play area width (not persisted, taken from the canvas)
    #[serde(skip)]
    pub width: f32,
    /// Play area height (not persisted, taken from the canvas)
    #[serde(skip)]
    pub height: f32,

    /// Internal wall thickness
    #[serde(skip)]
    pub wall_thickness: f32,
    /// Outer edge thickness
    #[serde(skip)]
    pub boundary_thickness: f32,

    /// Velocity change per key press
    #[serde(skip)]
    pub nudge_speed: f32,
    /// Downward gravity once the maze is solved
    #[serde(skip)]
    pub win_gravity: f32,

    /// Fixed maze seed for this run only (random when unset)
    #[serde(skip)]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            width: 800.0,
            height: 600.0,
            wall_thickness: WALL_THICKNESS,
            boundary_thickness: BOUNDARY_THICKNESS,
            nudge_speed: NUDGE_SPEED,
            win_gravity: WIN_GRAVITY,
            seed: None,
        }
    }
}

impl Settings {
    /// Copy with a new viewport size
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Reject configurations the game cannot lay out
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::ZeroDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let viewport_ok = |v: f32| v.is_finite() && v > 0.0;
        if !viewport_ok(self.width) || !viewport_ok(self.height) {
            return Err(ConfigError::EmptyViewport {
                width: self.width,
                height: self.height,
            });
        }
        for thickness in [self.wall_thickness, self.boundary_thickness] {
            if !thickness.is_finite() || thickness <= 0.0 {
                return Err(ConfigError::InvalidThickness(thickness));
            }
        }
        Ok(())
    }

    /// Cell width and height for the current viewport
    pub fn cell_size(&self) -> (f32, f32) {
        (
            self.width / self.cols as f32,
            self.height / self.rows as f32,
        )
    }

    /// Apply `rows`, `cols` and `seed` overrides from a URL query string
    ///
    /// Accepts a leading `?`. Unknown keys are ignored. On error nothing
    /// is applied.
    pub fn apply_query(&mut self, query: &str) -> Result<(), ConfigError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut next = self.clone();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let invalid = || ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            };
            match key {
                "rows" => next.rows = value.parse().map_err(|_| invalid())?,
                "cols" => next.cols = value.parse().map_err(|_| invalid())?,
                "seed" => next.seed = Some(value.parse().map_err(|_| invalid())?),
                _ => log::debug!("Ignoring query parameter {key:?}"),
            }
        }
        *self = next;
        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "maze_ball_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
