//! SketchKit Settings Crate
//!
//! Loads, validates and saves the editor configuration and converts it into
//! the options the designer crate consumes.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, EditorSettings, RenderSettings, StorageSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
