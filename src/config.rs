//! Startup settings read from `canvasflow.json`.
//!
//! Every field has a default, so a partial file (or no file at all) works.

use crate::color::parse_color;
use crate::controls::{clamp_brush, DEFAULT_BRUSH};
use crate::error::{Error, Result};
use crate::types::Rgba;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_ENV: &str = "CANVASFLOW_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "canvasflow.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial window size in pixels.
    pub width: usize,
    pub height: usize,
    /// What a blank canvas is filled with.
    pub background: String,
    pub default_color: String,
    pub default_brush_size: u32,
    /// Where exported PNGs go.
    pub export_dir: PathBuf,
    pub splash_ms: u64,
    pub sound_volume: f32,
    pub dark_theme: bool,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 640,
            background: "#ffffff".into(),
            default_color: "#000000".into(),
            default_brush_size: DEFAULT_BRUSH,
            export_dir: PathBuf::from("."),
            splash_ms: 2500,
            sound_volume: 0.3,
            dark_theme: false,
            debug: false,
        }
    }
}

impl AppConfig {
    /// `$CANVASFLOW_CONFIG`, else `canvasflow.json` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Missing or empty file means defaults. Unreadable files and malformed JSON are errors.
    pub fn load(path: &Path) -> Result<Self> {
        let to_err = |reason: String| Error::Config { path: path.to_path_buf(), reason };
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(to_err(e.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(&content).map_err(|e| to_err(e.to_string()))?;
        Ok(config.sanitized())
    }

    /// Pull out-of-range values back to something usable.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.width == 0 || self.height == 0 {
            warn!(width = self.width, height = self.height, "zero window size in config, using defaults");
            self.width = defaults.width;
            self.height = defaults.height;
        }
        self.default_brush_size = clamp_brush(self.default_brush_size as i64);
        self.sound_volume = self.sound_volume.clamp(0.0, 1.0);
        if let Err(e) = parse_color(&self.background) {
            warn!("{e} for background, using {}", defaults.background);
            self.background = defaults.background;
        }
        if let Err(e) = parse_color(&self.default_color) {
            warn!("{e} for default_color, using {}", defaults.default_color);
            self.default_color = defaults.default_color;
        }
        self
    }

    pub fn background_rgba(&self) -> Rgba {
        parse_color(&self.background).unwrap_or(Rgba::WHITE)
    }

    pub fn default_color_rgba(&self) -> Rgba {
        parse_color(&self.default_color).unwrap_or(Rgba::BLACK)
    }
}
