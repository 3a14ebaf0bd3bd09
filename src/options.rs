//! Toolbar configuration options.

use serde::{Deserialize, Serialize};

/// Where the host should place the toolbar row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Bottom,
}

impl Default for Position {
    fn default() -> Self {
        Position::Top
    }
}

/// Options controlling which controls the toolbar assembles and where it
/// sits. A snapshot of these is read on every render pass; mutation goes
/// through [`ToolbarOptions::merge`] only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarOptions {
    /// Top or bottom placement
    pub position: Position,
    /// Include the search control in the layout
    pub show_search: bool,
    /// Include the expand/collapse command pair
    pub show_expand_collapse: bool,
    /// Include the export command
    pub show_export: bool,
    /// Include the color-scheme command
    pub show_color_picker: bool,
    /// Create the brand overlay on mount
    pub show_brand: bool,
    /// Create the settings overlay on mount
    pub show_settings: bool,
}

impl Default for ToolbarOptions {
    fn default() -> Self {
        Self {
            position: Position::Top,
            show_search: true,
            show_expand_collapse: true,
            show_export: false,
            show_color_picker: false,
            show_brand: true,
            show_settings: true,
        }
    }
}

impl ToolbarOptions {
    /// Shallow-merge an update: only fields set in `update` overwrite.
    pub fn merge(&mut self, update: ToolbarOptionsUpdate) {
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(show_search) = update.show_search {
            self.show_search = show_search;
        }
        if let Some(show_expand_collapse) = update.show_expand_collapse {
            self.show_expand_collapse = show_expand_collapse;
        }
        if let Some(show_export) = update.show_export {
            self.show_export = show_export;
        }
        if let Some(show_color_picker) = update.show_color_picker {
            self.show_color_picker = show_color_picker;
        }
        if let Some(show_brand) = update.show_brand {
            self.show_brand = show_brand;
        }
        if let Some(show_settings) = update.show_settings {
            self.show_settings = show_settings;
        }
    }
}

/// A partial update for [`ToolbarOptions`]; unset fields leave the current
/// value untouched.
#[derive(Debug, Clone, Default)]
pub struct ToolbarOptionsUpdate {
    pub position: Option<Position>,
    pub show_search: Option<bool>,
    pub show_expand_collapse: Option<bool>,
    pub show_export: Option<bool>,
    pub show_color_picker: Option<bool>,
    pub show_brand: Option<bool>,
    pub show_settings: Option<bool>,
}
