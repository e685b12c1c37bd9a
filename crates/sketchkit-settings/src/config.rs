//! Configuration Management
//!
//! Editor, rendering, canvas and storage settings with JSON/TOML file
//! persistence. A [`Config`] converts into the option structs consumed by the
//! designer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sketchkit_designer::canvas::DEFAULT_HIT_TOLERANCE;
use sketchkit_designer::font_manager::get_font_from_file;
use sketchkit_designer::history::DEFAULT_UNDO_LIMIT;
use sketchkit_designer::model::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use sketchkit_designer::{
    CanvasMeta, EditorConfig, FontMetrics, RasterOptions, RenderOptions, Rgb,
};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

const APP_DIR: &str = "sketchkit";
const CONFIG_FILE: &str = "config.toml";
const LOCAL_STORE_FILE: &str = "local.json";

/// Upper bound on the render scale; keeps raster allocations sane.
pub const MAX_SCALE: f64 = 16.0;

/// Interactive editing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Start in edit mode; `false` opens documents view-only
    pub edit_mode: bool,
    /// Grid pitch in document units
    pub grid: f64,
    /// Snap pointer input to the grid
    pub snap_to_grid: bool,
    /// Margin around bounding boxes for hit-testing
    pub hit_tolerance: f64,
    /// Half-size of the resize handle hot-zone
    pub handle_size: f64,
    /// Undo depth, 0 for unbounded
    pub undo_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            edit_mode: true,
            grid: 10.0,
            snap_to_grid: false,
            hit_tolerance: DEFAULT_HIT_TOLERANCE,
            handle_size: 6.0,
            undo_limit: DEFAULT_UNDO_LIMIT,
        }
    }
}

/// Rendering preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Surface pixels per document unit
    pub scale: f64,
    /// Hand Bezier curves to the rasterizer instead of flattening them
    pub native_curves: bool,
    /// Smooth raster edges
    pub anti_alias: bool,
    /// System font family for text; empty selects the default sans-serif
    pub font_family: String,
    /// Font file that takes precedence over `font_family`
    pub font_file: Option<PathBuf>,
    /// Leave raster backgrounds transparent instead of white
    pub transparent_background: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            native_curves: true,
            anti_alias: true,
            font_family: String::new(),
            font_file: None,
            transparent_background: false,
        }
    }
}

/// Size given to new documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

/// Where named local documents are kept
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Local store file; `None` uses the platform data directory
    pub local_store: Option<PathBuf>,
}

impl StorageSettings {
    /// The configured store file, or `<data dir>/sketchkit/local.json`.
    pub fn local_store_path(&self) -> Option<PathBuf> {
        self.local_store
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR).join(LOCAL_STORE_FILE)))
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub editor: EditorSettings,
    pub render: RenderSettings,
    pub canvas: CanvasSettings,
    pub storage: StorageSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// `<config dir>/sketchkit/config.toml`
pub fn default_config_path() -> SettingsResult<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| {
            SettingsError::NoConfigDir("the platform reports none".into())
        })
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML, chosen by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let e = &self.editor;
        if !e.grid.is_finite() || e.grid < 0.0 {
            return Err(ConfigError::out_of_range("editor.grid", e.grid));
        }
        if e.snap_to_grid && e.grid == 0.0 {
            return Err(ConfigError::out_of_range("editor.grid", e.grid));
        }
        if !e.hit_tolerance.is_finite() || e.hit_tolerance < 0.0 {
            return Err(ConfigError::out_of_range(
                "editor.hit_tolerance",
                e.hit_tolerance,
            ));
        }
        if !e.handle_size.is_finite() || e.handle_size <= 0.0 {
            return Err(ConfigError::out_of_range("editor.handle_size", e.handle_size));
        }

        let r = &self.render;
        if !r.scale.is_finite() || r.scale <= 0.0 || r.scale > MAX_SCALE {
            return Err(ConfigError::out_of_range("render.scale", r.scale));
        }

        if self.canvas.width == 0 {
            return Err(ConfigError::out_of_range("canvas.width", self.canvas.width));
        }
        if self.canvas.height == 0 {
            return Err(ConfigError::out_of_range("canvas.height", self.canvas.height));
        }

        Ok(())
    }

    /// Editor options; the grid only applies when snapping is on.
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig {
            edit_mode: self.editor.edit_mode,
            scale: self.render.scale,
            grid: if self.editor.snap_to_grid {
                self.editor.grid
            } else {
                0.0
            },
            hit_tolerance: self.editor.hit_tolerance,
            handle_size: self.editor.handle_size,
            undo_limit: self.editor.undo_limit,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            scale: self.render.scale,
        }
    }

    /// Text metrics for the configured face. A font file that cannot be
    /// parsed is an error; an unknown family falls back to approximate
    /// metrics.
    pub fn font_metrics(&self) -> ConfigResult<FontMetrics> {
        if let Some(file) = &self.render.font_file {
            return get_font_from_file(file)
                .map(|font| FontMetrics::from_font(Some(font)))
                .ok_or_else(|| ConfigError::FontFile(file.display().to_string()));
        }
        let metrics = FontMetrics::for_family(&self.render.font_family);
        if metrics.font().is_none() {
            tracing::warn!(
                "Font family '{}' not found, text will use approximate metrics",
                self.render.font_family
            );
        }
        Ok(metrics)
    }

    pub fn raster_options(&self) -> ConfigResult<RasterOptions> {
        Ok(RasterOptions {
            render: self.render_options(),
            native_curves: self.render.native_curves,
            anti_alias: self.render.anti_alias,
            font: self.font_metrics()?,
            background: if self.render.transparent_background {
                None
            } else {
                Some(Rgb::new(255, 255, 255))
            },
        })
    }

    /// Size for new documents
    pub fn canvas_meta(&self) -> CanvasMeta {
        CanvasMeta::new(self.canvas.width, self.canvas.height)
    }
}
