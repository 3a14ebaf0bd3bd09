//! Event handler slots for the toolbar.
//!
//! Every slot is optional: an unset slot means the corresponding event
//! produces no external effect. Slots are shared `Rc<RefCell<..>>` handlers
//! so the built item descriptors can hold clones while the shell keeps
//! ownership of the merged set.

use std::cell::RefCell;
use std::rc::Rc;

/// A zero-argument command handler (button activations, clear, settings).
pub type CommandHandler = Rc<RefCell<dyn FnMut()>>;

/// A search handler receiving the trimmed query.
pub type SearchHandler = Rc<RefCell<dyn FnMut(&str)>>;

/// Wrap a closure as a [`CommandHandler`].
pub fn command_handler(f: impl FnMut() + 'static) -> CommandHandler {
    Rc::new(RefCell::new(f))
}

/// Wrap a closure as a [`SearchHandler`].
pub fn search_handler(f: impl FnMut(&str) + 'static) -> SearchHandler {
    Rc::new(RefCell::new(f))
}

/// Invoke a command handler slot if set.
pub(crate) fn invoke(slot: &Option<CommandHandler>) {
    if let Some(handler) = slot {
        (&mut *handler.borrow_mut())();
    }
}

/// Invoke a search handler slot if set.
pub(crate) fn invoke_search(slot: &Option<SearchHandler>, query: &str) {
    if let Some(handler) = slot {
        (&mut *handler.borrow_mut())(query);
    }
}

/// The toolbar's handler slots. Merged, never replaced wholesale, by
/// [`ToolbarCallbacks::merge`].
#[derive(Clone, Default)]
pub struct ToolbarCallbacks {
    pub on_search: Option<SearchHandler>,
    pub on_expand_all: Option<CommandHandler>,
    pub on_collapse_all: Option<CommandHandler>,
    pub on_export: Option<CommandHandler>,
    pub on_color_scheme_change: Option<CommandHandler>,
    pub on_settings: Option<CommandHandler>,
}

impl ToolbarCallbacks {
    /// Merge a partial set: slots set in `other` overwrite, unset slots
    /// leave the existing handler in place.
    pub fn merge(&mut self, other: ToolbarCallbacks) {
        if other.on_search.is_some() {
            self.on_search = other.on_search;
        }
        if other.on_expand_all.is_some() {
            self.on_expand_all = other.on_expand_all;
        }
        if other.on_collapse_all.is_some() {
            self.on_collapse_all = other.on_collapse_all;
        }
        if other.on_export.is_some() {
            self.on_export = other.on_export;
        }
        if other.on_color_scheme_change.is_some() {
            self.on_color_scheme_change = other.on_color_scheme_change;
        }
        if other.on_settings.is_some() {
            self.on_settings = other.on_settings;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_existing_slots() {
        let calls = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&calls);
        let mut callbacks = ToolbarCallbacks {
            on_export: Some(command_handler(move || log.borrow_mut().push("export"))),
            ..Default::default()
        };

        let log = Rc::clone(&calls);
        callbacks.merge(ToolbarCallbacks {
            on_settings: Some(command_handler(move || log.borrow_mut().push("settings"))),
            ..Default::default()
        });

        invoke(&callbacks.on_export);
        invoke(&callbacks.on_settings);
        assert_eq!(*calls.borrow(), vec!["export", "settings"]);
    }

    #[test]
    fn test_merge_overwrites_set_slots() {
        let calls = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&calls);
        let mut callbacks = ToolbarCallbacks {
            on_export: Some(command_handler(move || log.borrow_mut().push("old"))),
            ..Default::default()
        };

        let log = Rc::clone(&calls);
        callbacks.merge(ToolbarCallbacks {
            on_export: Some(command_handler(move || log.borrow_mut().push("new"))),
            ..Default::default()
        });

        invoke(&callbacks.on_export);
        assert_eq!(*calls.borrow(), vec!["new"]);
    }

    #[test]
    fn test_invoke_on_unset_slot_is_silent() {
        invoke(&None);
        invoke_search(&None, "query");
    }
}
