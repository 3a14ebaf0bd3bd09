//! Toolbar item registry.
//!
//! Pure transformation from options + callbacks + optional collaborator to
//! an ordered list of command descriptors. Handler resolution happens fresh
//! on every build, so a later `set_callbacks`/`attach` is picked up by the
//! next render without any cache invalidation.

use std::cell::RefCell;
use std::rc::Rc;

use crate::callbacks::{CommandHandler, ToolbarCallbacks};
use crate::options::ToolbarOptions;
use crate::view::MindmapView;

/// Stable identifier for a toolbar command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemId {
    Fit,
    ZoomIn,
    ZoomOut,
    ExpandAll,
    CollapseAll,
    Export,
    ColorScheme,
}

/// A command button descriptor. Derived, never mutated in place —
/// regenerated on each build from the current options and callbacks.
#[derive(Clone)]
pub struct ToolbarItem {
    pub id: ItemId,
    /// Human-readable tooltip, also used for identification
    pub title: &'static str,
    /// Single-cell icon glyph
    pub icon: &'static str,
    /// Resolved handler; `None` renders the button inert
    pub on_activate: Option<CommandHandler>,
    /// Render a group divider after this item
    pub divider_after: bool,
}

impl ToolbarItem {
    fn new(id: ItemId, title: &'static str, icon: &'static str) -> Self {
        Self {
            id,
            title,
            icon,
            on_activate: None,
            divider_after: false,
        }
    }

    fn with_handler(mut self, handler: Option<CommandHandler>) -> Self {
        self.on_activate = handler;
        self
    }
}

/// Bind a zero-argument collaborator method as a command handler.
fn bind_view<F>(view: &Rc<RefCell<dyn MindmapView>>, method: F) -> CommandHandler
where
    F: Fn(&mut dyn MindmapView) + 'static,
{
    let view = Rc::clone(view);
    Rc::new(RefCell::new(move || method(&mut *view.borrow_mut())))
}

/// Resolve a command handler: explicit callback wins, else the matching
/// collaborator method, else inert.
fn resolve<F>(
    explicit: &Option<CommandHandler>,
    collaborator: Option<&Rc<RefCell<dyn MindmapView>>>,
    method: F,
) -> Option<CommandHandler>
where
    F: Fn(&mut dyn MindmapView) + 'static,
{
    if let Some(handler) = explicit {
        return Some(Rc::clone(handler));
    }
    collaborator.map(|view| bind_view(view, method))
}

/// Build the ordered item list for the current configuration.
///
/// The base view-manipulation commands (fit, zoom in, zoom out) are always
/// present; the expand/collapse pair, export, and color-scheme commands are
/// appended in that fixed order when enabled. Adjacent groups are separated
/// by a divider marker on the last item of the preceding group.
pub fn build_items(
    options: &ToolbarOptions,
    callbacks: &ToolbarCallbacks,
    collaborator: Option<&Rc<RefCell<dyn MindmapView>>>,
) -> Vec<ToolbarItem> {
    let mut groups: Vec<Vec<ToolbarItem>> = Vec::new();

    // Base view commands; zoom defaults bind the collaborator's rescale.
    groups.push(vec![
        ToolbarItem::new(ItemId::Fit, "Fit to view", "◎")
            .with_handler(resolve(&None, collaborator, |view| view.fit())),
        ToolbarItem::new(ItemId::ZoomIn, "Zoom in", "+")
            .with_handler(resolve(&None, collaborator, |view| view.rescale())),
        ToolbarItem::new(ItemId::ZoomOut, "Zoom out", "-")
            .with_handler(resolve(&None, collaborator, |view| view.rescale())),
    ]);

    if options.show_expand_collapse {
        groups.push(vec![
            ToolbarItem::new(ItemId::ExpandAll, "Expand all", "▾").with_handler(resolve(
                &callbacks.on_expand_all,
                collaborator,
                |view| view.expand_all(),
            )),
            ToolbarItem::new(ItemId::CollapseAll, "Collapse all", "▴").with_handler(resolve(
                &callbacks.on_collapse_all,
                collaborator,
                |view| view.collapse_all(),
            )),
        ]);
    }

    if options.show_export {
        // No collaborator counterpart; explicit callback or inert.
        groups.push(vec![ToolbarItem::new(ItemId::Export, "Export", "↓")
            .with_handler(callbacks.on_export.clone())]);
    }

    if options.show_color_picker {
        groups.push(vec![ToolbarItem::new(
            ItemId::ColorScheme,
            "Color scheme",
            "◑",
        )
        .with_handler(callbacks.on_color_scheme_change.clone())]);
    }

    let group_count = groups.len();
    let mut items = Vec::new();
    for (index, mut group) in groups.into_iter().enumerate() {
        if index + 1 < group_count {
            if let Some(last) = group.last_mut() {
                last.divider_after = true;
            }
        }
        items.append(&mut group);
    }
    items
}
