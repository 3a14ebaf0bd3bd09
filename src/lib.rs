//! mindbar — toolbar shell and debounced search widgets for ratatui
//! mindmap views.
//!
//! The library provides a [`ToolbarShell`] that assembles command buttons
//! from a pure item registry, hosts a debounced [`SearchInput`], and
//! manages two process-wide overlay singletons (brand mark, settings
//! trigger). Commands resolve against an attached [`MindmapView`]
//! collaborator unless an explicit callback overrides them.

pub mod callbacks;
pub mod config;
pub mod options;
pub mod overlay;
pub mod registry;
pub mod toolbar;
pub mod utils;
pub mod view;
pub mod widgets;

pub use callbacks::{command_handler, search_handler, ToolbarCallbacks};
pub use options::{Position, ToolbarOptions, ToolbarOptionsUpdate};
pub use registry::{build_items, ItemId, ToolbarItem};
pub use toolbar::{Container, ShellId, ShellState, ToolbarShell};
pub use view::{MindmapView, ViewOptions};
pub use widgets::search_input::{SearchInput, SearchInputBuilder, SearchInputConfig};
