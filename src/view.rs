//! Collaborator seam to the visualization engine.
//!
//! The toolbar never renders the mindmap itself; it issues commands to an
//! attached view through this trait. Hosts hand the shell an
//! `Rc<RefCell<dyn MindmapView>>` so resolved default handlers can borrow
//! the view mutably at activation time.

use serde::{Deserialize, Serialize};

/// The visualization engine the toolbar issues default commands to.
pub trait MindmapView {
    /// Step the zoom level (bound to the zoom commands by default).
    fn rescale(&mut self);

    /// Fit the whole map into the viewport.
    fn fit(&mut self);

    /// Expand every node.
    fn expand_all(&mut self);

    /// Collapse every node.
    fn collapse_all(&mut self);

    /// Apply engine options. The shell never calls this itself; it is
    /// available to external callbacks.
    fn set_options(&mut self, options: ViewOptions);
}

/// Options understood by the visualization engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    /// Named color scheme, e.g. "default", "dark", "solarized"
    pub color_scheme: String,
    /// Refit the view automatically after structural changes
    pub auto_fit: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            color_scheme: "default".to_string(),
            auto_fit: false,
        }
    }
}
