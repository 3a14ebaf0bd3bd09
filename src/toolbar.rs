//! The toolbar shell.
//!
//! Assembles the command buttons from the item registry, hosts the search
//! input, and manages the two screen-level overlays. The shell walks a
//! small lifecycle: Unattached → Attached (collaborator bound) → Mounted
//! (a container holds the bar, overlays placed) → Destroyed. Re-mounting
//! detaches the previous mount first, so a container holds at most one
//! occupant and each overlay kind stays a process-wide singleton.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position as Point, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

use crate::callbacks::{invoke, ToolbarCallbacks};
use crate::options::{ToolbarOptions, ToolbarOptionsUpdate};
use crate::overlay::{self, OverlayKind};
use crate::registry::{build_items, ItemId, ToolbarItem};
use crate::view::MindmapView;
use crate::widgets::search_input::{SearchInput, SearchInputConfig};

/// Render areas narrower than this get the compact layout. Recomputed on
/// every render call; there is no resize subscription.
pub const COMPACT_WIDTH_THRESHOLD: u16 = 64;

/// Inline search field width, normal and compact.
const SEARCH_WIDTH: u16 = 24;
const SEARCH_WIDTH_COMPACT: u16 = 16;

/// Identity of a shell instance; overlay ownership is keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellId(u64);

fn next_shell_id() -> ShellId {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    ShellId(NEXT.fetch_add(1, Ordering::Relaxed))
}

/// Lifecycle state of a [`ToolbarShell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    Unattached,
    Attached,
    Mounted,
    Destroyed,
}

/// A host-owned mount slot. The shell borrows it (via `Rc`) while
/// mounted and never owns it; a container holds at most one occupant.
pub struct Container {
    name: String,
    occupant: Cell<Option<ShellId>>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            occupant: Cell::new(None),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shell currently mounted here, if any.
    pub fn occupant(&self) -> Option<ShellId> {
        self.occupant.get()
    }

    fn set_occupant(&self, id: Option<ShellId>) {
        self.occupant.set(id);
    }
}

/// The composable toolbar container.
pub struct ToolbarShell {
    id: ShellId,
    state: ShellState,
    options: ToolbarOptions,
    callbacks: ToolbarCallbacks,
    collaborator: Option<Rc<RefCell<dyn MindmapView>>>,
    search: SearchInput,
    /// Borrowed mount slot while mounted
    container: Option<Rc<Container>>,
    /// Item list as of the last render, kept for hit-testing
    items: Vec<ToolbarItem>,
    /// Button cells as of the last render
    item_areas: Vec<(ItemId, Rect)>,
    /// Compact layout flag as of the last render
    compact: bool,
}

impl ToolbarShell {
    pub fn new(options: ToolbarOptions, callbacks: ToolbarCallbacks) -> Self {
        let mut search = SearchInput::new();
        search.set_on_search(callbacks.on_search.clone());
        Self {
            id: next_shell_id(),
            state: ShellState::Unattached,
            options,
            callbacks,
            collaborator: None,
            search,
            container: None,
            items: Vec::new(),
            item_areas: Vec::new(),
            compact: false,
        }
    }

    /// Compose `new` + [`attach`](Self::attach): a ready shell with default
    /// handlers bound to `collaborator`, not yet mounted.
    pub fn create(
        collaborator: Rc<RefCell<dyn MindmapView>>,
        options: ToolbarOptions,
        callbacks: ToolbarCallbacks,
    ) -> Self {
        let mut shell = Self::new(options, callbacks);
        shell.attach(collaborator);
        shell
    }

    /// Replace the search widget's configuration (placeholder, debounce,
    /// clear affordance). Keeps the `on_search` wiring.
    pub fn with_search_config(mut self, config: SearchInputConfig) -> Self {
        self.search = SearchInput::with_config(config);
        self.search.set_on_search(self.callbacks.on_search.clone());
        self
    }

    pub fn id(&self) -> ShellId {
        self.id
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    pub fn options(&self) -> &ToolbarOptions {
        &self.options
    }

    /// Placement the host's layout should honor.
    pub fn position(&self) -> crate::options::Position {
        self.options.position
    }

    /// Rows the bar occupies.
    pub fn height(&self) -> u16 {
        1
    }

    /// Compact layout flag as of the last render.
    pub fn is_compact(&self) -> bool {
        self.compact
    }

    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchInput {
        &mut self.search
    }

    /// Bind the visualization collaborator. Default handlers resolve
    /// against it from the next render on; mounting is not required.
    pub fn attach(&mut self, collaborator: Rc<RefCell<dyn MindmapView>>) {
        if self.state == ShellState::Destroyed {
            warn!(target: "toolbar", "attach ignored on destroyed shell");
            return;
        }
        self.collaborator = Some(collaborator);
        if self.state == ShellState::Unattached {
            self.state = ShellState::Attached;
        }
        info!(target: "toolbar", id = ?self.id, "collaborator attached");
    }

    /// Mount the toolbar into `container` and place the overlays. Safe
    /// from any non-destroyed state; a repeated call (same or different
    /// container) detaches the previous mount first, so there is exactly
    /// one occupant per container and one overlay node per kind.
    pub fn attach_to_container(&mut self, container: &Rc<Container>) {
        if self.state == ShellState::Destroyed {
            warn!(target: "toolbar", "attach_to_container ignored on destroyed shell");
            return;
        }
        self.unmount();
        container.set_occupant(Some(self.id));
        self.container = Some(Rc::clone(container));
        self.state = ShellState::Mounted;
        self.sync_overlays();
        info!(target: "toolbar", id = ?self.id, container = %container.name(), "toolbar mounted");
    }

    /// Shallow-merge `update` into the options; the next render reflects
    /// the merged set, including position and the conditional items.
    pub fn update_options(&mut self, update: ToolbarOptionsUpdate) {
        if self.state == ShellState::Destroyed {
            return;
        }
        self.options.merge(update);
        if self.state == ShellState::Mounted {
            self.sync_overlays();
        }
        debug!(target: "toolbar", options = ?self.options, "options updated");
    }

    /// Merge `partial` into the callbacks; later activations use the
    /// merged set.
    pub fn set_callbacks(&mut self, partial: ToolbarCallbacks) {
        if self.state == ShellState::Destroyed {
            return;
        }
        self.callbacks.merge(partial);
        self.search.set_on_search(self.callbacks.on_search.clone());
    }

    /// Activate a command by id, resolving its handler fresh (explicit
    /// callback, else collaborator method, else inert). Returns whether a
    /// handler ran.
    pub fn activate(&mut self, id: ItemId) -> bool {
        if self.state == ShellState::Destroyed {
            return false;
        }
        let items = build_items(&self.options, &self.callbacks, self.collaborator.as_ref());
        match items.iter().find(|item| item.id == id) {
            Some(item) => match &item.on_activate {
                Some(handler) => {
                    debug!(target: "toolbar", ?id, "command activated");
                    (&mut *handler.borrow_mut())();
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Forward a key event to the search input while it is shown and
    /// focused.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.state == ShellState::Destroyed || !self.options.show_search {
            return false;
        }
        if self.search.is_focused() {
            return self.search.handle_key(key);
        }
        false
    }

    /// Hit-test a mouse event against the settings overlay, the command
    /// buttons, and the search control. Silent no-op when nothing is hit
    /// or the hit command has no resolvable handler.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.state == ShellState::Destroyed
            || !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
        {
            return false;
        }
        let at = Point::new(mouse.column, mouse.row);

        if overlay::settings_hit(at) == Some(self.id) {
            debug!(target: "toolbar", "settings overlay activated");
            invoke(&self.callbacks.on_settings);
            return true;
        }

        let hit = self
            .item_areas
            .iter()
            .find(|(_, area)| area.contains(at))
            .map(|&(id, _)| id);
        if let Some(id) = hit {
            return self.activate(id);
        }

        if self.options.show_search {
            return self.search.handle_mouse(mouse);
        }
        false
    }

    /// Pump the search debounce. The host calls this once per poll
    /// timeout.
    pub fn tick(&mut self) {
        self.search.tick();
    }

    /// Paint the bar into `area`, rebuilding the item list from the
    /// current options/callbacks/collaborator. The compact layout is
    /// recomputed from the area width on every call.
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        if self.state == ShellState::Destroyed || area.height < 1 || area.width < 4 {
            return;
        }
        self.compact = area.width < COMPACT_WIDTH_THRESHOLD;
        self.items = build_items(&self.options, &self.callbacks, self.collaborator.as_ref());
        self.item_areas.clear();

        // Reserve the right end for the inline search field.
        let search_width = if self.options.show_search {
            let want = if self.compact {
                SEARCH_WIDTH_COMPACT
            } else {
                SEARCH_WIDTH
            };
            want.min(area.width / 2)
        } else {
            0
        };
        let items_right = area.right() - search_width;

        let mut spans: Vec<Span> = Vec::new();
        let mut x = area.x;
        for item in &self.items {
            let label = if self.compact {
                item.icon.to_string()
            } else {
                format!(" {} ", item.icon)
            };
            let width = if self.compact { 1 } else { 3 };
            if x + width > items_right {
                break;
            }
            let style = if item.on_activate.is_some() {
                Style::default().fg(Color::Gray)
            } else {
                // inert commands stay visible but muted
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
            };
            spans.push(Span::styled(label, style));
            self.item_areas.push((item.id, Rect::new(x, area.y, width, 1)));
            x += width;

            if item.divider_after && x + 1 <= items_right {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
                x += 1;
            }
        }

        let items_area = Rect::new(area.x, area.y, items_right - area.x, 1);
        f.render_widget(Line::from(spans), items_area);

        if search_width >= 6 {
            let search_area = Rect::new(area.right() - search_width, area.y, search_width, 1);
            self.search.render(f, search_area);
        }
    }

    /// Tear down everything the shell owns: unmount from the container,
    /// remove both overlays, destroy the search input, drop the
    /// collaborator. Idempotent.
    pub fn destroy(&mut self) {
        if self.state == ShellState::Destroyed {
            return;
        }
        self.unmount();
        self.search.destroy();
        self.collaborator = None;
        self.items.clear();
        self.item_areas.clear();
        self.state = ShellState::Destroyed;
        info!(target: "toolbar", id = ?self.id, "toolbar destroyed");
    }

    /// Detach from the current container (if any) and remove the overlay
    /// nodes this shell owns.
    fn unmount(&mut self) {
        if let Some(container) = self.container.take() {
            if container.occupant() == Some(self.id) {
                container.set_occupant(None);
            }
        }
        overlay::remove_if_owner(OverlayKind::Brand, self.id);
        overlay::remove_if_owner(OverlayKind::Settings, self.id);
    }

    /// Bring the overlay registry in line with the current options; only
    /// meaningful while mounted.
    fn sync_overlays(&self) {
        if self.options.show_brand {
            overlay::place(OverlayKind::Brand, self.id);
        } else {
            overlay::remove_if_owner(OverlayKind::Brand, self.id);
        }
        if self.options.show_settings {
            overlay::place(OverlayKind::Settings, self.id);
        } else {
            overlay::remove_if_owner(OverlayKind::Settings, self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::command_handler;
    use crate::options::Position;
    use crate::view::ViewOptions;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[derive(Default)]
    struct RecordingView {
        calls: Vec<&'static str>,
    }

    impl MindmapView for RecordingView {
        fn rescale(&mut self) {
            self.calls.push("rescale");
        }
        fn fit(&mut self) {
            self.calls.push("fit");
        }
        fn expand_all(&mut self) {
            self.calls.push("expand_all");
        }
        fn collapse_all(&mut self) {
            self.calls.push("collapse_all");
        }
        fn set_options(&mut self, _options: ViewOptions) {
            self.calls.push("set_options");
        }
    }

    fn recording_view() -> (Rc<RefCell<RecordingView>>, Rc<RefCell<dyn MindmapView>>) {
        let view = Rc::new(RefCell::new(RecordingView::default()));
        let collaborator: Rc<RefCell<dyn MindmapView>> = view.clone();
        (view, collaborator)
    }

    #[test]
    fn test_attach_transitions_without_mounting() {
        let (_, collaborator) = recording_view();
        let mut shell = ToolbarShell::new(ToolbarOptions::default(), ToolbarCallbacks::default());
        assert_eq!(shell.state(), ShellState::Unattached);

        shell.attach(collaborator);
        assert_eq!(shell.state(), ShellState::Attached);
    }

    #[test]
    fn test_create_factory_returns_attached_shell() {
        let (view, collaborator) = recording_view();
        let mut shell = ToolbarShell::create(
            collaborator,
            ToolbarOptions::default(),
            ToolbarCallbacks::default(),
        );
        assert_eq!(shell.state(), ShellState::Attached);

        assert!(shell.activate(ItemId::Fit));
        assert_eq!(view.borrow().calls, vec!["fit"]);
    }

    #[test]
    fn test_activate_without_handler_is_silent() {
        let mut shell = ToolbarShell::new(ToolbarOptions::default(), ToolbarCallbacks::default());
        assert!(!shell.activate(ItemId::Fit));
        assert!(!shell.activate(ItemId::Export)); // not even in the item set
    }

    #[test]
    fn test_set_callbacks_takes_effect_on_next_activation() {
        let (view, collaborator) = recording_view();
        let mut shell = ToolbarShell::create(
            collaborator,
            ToolbarOptions::default(),
            ToolbarCallbacks::default(),
        );

        let fired = Rc::new(RefCell::new(0));
        let count = Rc::clone(&fired);
        shell.set_callbacks(ToolbarCallbacks {
            on_expand_all: Some(command_handler(move || *count.borrow_mut() += 1)),
            ..Default::default()
        });

        assert!(shell.activate(ItemId::ExpandAll));
        assert_eq!(*fired.borrow(), 1);
        assert!(view.borrow().calls.is_empty(), "override wins over collaborator");
    }

    #[test]
    fn test_update_options_changes_item_set_and_position() {
        let mut shell = ToolbarShell::new(ToolbarOptions::default(), ToolbarCallbacks::default());
        shell.update_options(ToolbarOptionsUpdate {
            position: Some(Position::Bottom),
            show_expand_collapse: Some(false),
            show_export: Some(true),
            ..Default::default()
        });

        assert_eq!(shell.position(), Position::Bottom);
        let items = build_items(shell.options(), &ToolbarCallbacks::default(), None);
        assert!(!items.iter().any(|item| item.id == ItemId::ExpandAll));
        assert!(items.iter().any(|item| item.id == ItemId::Export));
    }

    #[test]
    fn test_key_forwarding_requires_focused_search() {
        let mut shell = ToolbarShell::new(ToolbarOptions::default(), ToolbarCallbacks::default());
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);

        assert!(!shell.handle_key(key));
        shell.search_mut().focus();
        assert!(shell.handle_key(key));
        assert_eq!(shell.search().raw_value(), "a");
    }

    #[test]
    fn test_destroyed_shell_ignores_everything() {
        let (_, collaborator) = recording_view();
        let mut shell = ToolbarShell::new(ToolbarOptions::default(), ToolbarCallbacks::default());
        shell.destroy();
        shell.destroy(); // idempotent

        assert_eq!(shell.state(), ShellState::Destroyed);
        shell.attach(collaborator);
        assert_eq!(shell.state(), ShellState::Destroyed);
        assert!(!shell.activate(ItemId::Fit));
        shell.update_options(ToolbarOptionsUpdate {
            position: Some(Position::Bottom),
            ..Default::default()
        });
        assert_eq!(shell.position(), Position::Top);
    }
}
