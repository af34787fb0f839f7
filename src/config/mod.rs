//! This module handles the stage configuration: the fixed container
//! dimensions, the initial image source list and the per-image chrome
//! options, with loading and saving to a `stage.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use image_stage::config::{self, EditorConfig};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.width = 600.0;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::{
    DEFAULT_CONTAINER_HEIGHT, DEFAULT_CONTAINER_WIDTH, DEFAULT_REMOVE_ICON_SIZE,
    DEFAULT_SCALE_FACTOR, MAX_SCALE_FACTOR, MIN_SCALE_FACTOR, Z_INDEX_BASE,
};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "stage.toml";
const APP_NAME: &str = "ImageStage";

/// Per-image source options.
///
/// A source entry may be a bare URL string or a table carrying the
/// chrome flags; missing flags default to `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceOptions {
    pub url: String,
    /// Whether the rendering shell shows a remove button for this image.
    #[serde(default = "default_flag")]
    pub close_button: bool,
    /// Whether a tap on this image selects it.
    #[serde(default = "default_flag")]
    pub click_to_select: bool,
}

fn default_flag() -> bool {
    true
}

impl SourceOptions {
    /// Creates options for a bare URL with both chrome flags enabled.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            close_button: true,
            click_to_select: true,
        }
    }
}

impl From<&str> for SourceOptions {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for SourceOptions {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

/// One entry of the configured source list: either a plain URL string
/// or a full options table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceEntry {
    Url(String),
    Options(SourceOptions),
}

impl From<SourceEntry> for SourceOptions {
    fn from(entry: SourceEntry) -> Self {
        match entry {
            SourceEntry::Url(url) => SourceOptions::new(url),
            SourceEntry::Options(options) => options,
        }
    }
}

/// Stage configuration.
///
/// `width` and `height` are fixed for the lifetime of the editor; the
/// animation flags and remove-icon settings are consumed by the
/// rendering shell, not the transform core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub image_sources: Vec<SourceEntry>,
    #[serde(default)]
    pub remove_icon: Option<String>,
    #[serde(default = "default_remove_icon_size")]
    pub remove_icon_size: f32,
    #[serde(default = "default_flag")]
    pub add_image_animation: bool,
    #[serde(default = "default_flag")]
    pub remove_image_animation: bool,
}

fn default_remove_icon_size() -> f32 {
    DEFAULT_REMOVE_ICON_SIZE
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CONTAINER_WIDTH,
            height: DEFAULT_CONTAINER_HEIGHT,
            image_sources: Vec::new(),
            remove_icon: None,
            remove_icon_size: DEFAULT_REMOVE_ICON_SIZE,
            add_image_animation: true,
            remove_image_animation: true,
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<EditorConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(EditorConfig::default())
}

pub fn save(config: &EditorConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<EditorConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &EditorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
