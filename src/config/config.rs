//! TOML configuration for the toolbar and search widgets.
//!
//! Lives at `~/.config/mindbar/config.toml` (Linux/macOS) or
//! `%APPDATA%\mindbar\config.toml` (Windows). Missing file or missing
//! keys fall back to the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::options::ToolbarOptions;
use crate::widgets::search_input::SearchInputConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toolbar: ToolbarOptions,
    pub search: SearchInputConfig,
}

impl Config {
    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("could not read config {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("could not parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save to the default location, creating parent directories.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// The default config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().context("could not determine config directory")?;
        Ok(config_dir.join("mindbar").join("config.toml"))
    }

    /// A default config file with comments, for `--init-config`.
    pub fn default_with_comments() -> &'static str {
        r#"# mindbar configuration
# Location: ~/.config/mindbar/config.toml (Linux/macOS)
#           %APPDATA%\mindbar\config.toml (Windows)

[toolbar]
# "top" or "bottom"
position = "top"
show_search = true
show_expand_collapse = true
show_export = false
show_color_picker = false
show_brand = true
show_settings = true

[search]
placeholder = "Search..."
# Quiet period before a query is delivered, in milliseconds
debounce_ms = 300
show_clear_button = true
"#
    }
}
