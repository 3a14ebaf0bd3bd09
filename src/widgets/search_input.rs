//! Debounced search input widget.
//!
//! Owns a text field, a clear affordance, and a cancellable quiet-period
//! delay. Keystrokes re-arm the delay; the host pumps [`SearchInput::tick`]
//! from its event loop and the trimmed query is delivered to the
//! `on_search` slot once the quiet period elapses. Escape and the clear
//! affordance bypass the debounce entirely and reset synchronously.

use crossterm::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};
use tracing::debug;
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::callbacks::{invoke, invoke_search, CommandHandler, SearchHandler};
use crate::utils::debouncer::Debouncer;

/// Magnifier glyph rendered in the icon slot.
const SEARCH_ICON: &str = "⌕";
/// Clear affordance glyph; its cell stays laid out even while hidden.
const CLEAR_ICON: &str = "✕";

/// Configuration for the search input.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchInputConfig {
    /// Placeholder shown while the value is empty
    pub placeholder: String,
    /// Quiet period before a query is delivered, in milliseconds
    pub debounce_ms: u64,
    /// Whether the clear affordance may become visible
    pub show_clear_button: bool,
}

impl Default for SearchInputConfig {
    fn default() -> Self {
        Self {
            placeholder: "Search...".to_string(),
            debounce_ms: 300,
            show_clear_button: true,
        }
    }
}

/// A debounced search input with a clear affordance.
pub struct SearchInput {
    /// The underlying text field
    input: Input,
    /// Quiet-period delay armed by each value change
    debouncer: Debouncer,
    config: SearchInputConfig,
    /// Delivered the trimmed query; unset means search events vanish
    on_search: Option<SearchHandler>,
    /// Fired by the explicit-clear path only, never by Escape
    on_clear: Option<CommandHandler>,
    /// Whether the clear glyph is currently shown (the cell always exists)
    clear_visible: bool,
    focused: bool,
    destroyed: bool,
    /// Where the widget was last painted, for mouse hit-testing
    last_area: Option<Rect>,
    /// Cell of the clear affordance as of the last paint
    clear_area: Option<Rect>,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::with_config(SearchInputConfig::default())
    }

    pub fn with_config(config: SearchInputConfig) -> Self {
        Self {
            input: Input::default(),
            debouncer: Debouncer::new(config.debounce_ms),
            config,
            on_search: None,
            on_clear: None,
            clear_visible: false,
            focused: false,
            destroyed: false,
            last_area: None,
            clear_area: None,
        }
    }

    /// Replace the search handler slot.
    pub fn set_on_search(&mut self, handler: Option<SearchHandler>) {
        if !self.destroyed {
            self.on_search = handler;
        }
    }

    /// Replace the clear handler slot.
    pub fn set_on_clear(&mut self, handler: Option<CommandHandler>) {
        if !self.destroyed {
            self.on_clear = handler;
        }
    }

    /// The current value, whitespace-trimmed.
    pub fn value(&self) -> &str {
        self.input.value().trim()
    }

    /// The raw, untrimmed value.
    pub fn raw_value(&self) -> &str {
        self.input.value()
    }

    /// Set the value directly, bypassing the debounce. Updates the clear
    /// affordance synchronously and does not invoke `on_search`.
    pub fn set_value(&mut self, value: impl Into<String>) {
        if self.destroyed {
            return;
        }
        let value = value.into();
        self.clear_visible = !value.trim().is_empty();
        self.input = Input::default().with_value(value);
    }

    /// Focus the input. Safe to call before the first render.
    pub fn focus(&mut self) {
        if !self.destroyed {
            self.focused = true;
        }
    }

    /// Drop focus.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the clear glyph is currently shown.
    pub fn clear_visible(&self) -> bool {
        self.clear_visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Whether a debounced delivery is pending.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Handle a key event. Returns `true` when the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.destroyed {
            return false;
        }

        match key.code {
            // Escape resets synchronously; it fires on_search("") but,
            // unlike the clear affordance, never on_clear.
            KeyCode::Esc => {
                self.reset_value();
                invoke_search(&self.on_search, "");
                true
            }
            _ => {
                let before = self.input.value().to_string();
                let consumed = self.input.handle_event(&Event::Key(key)).is_some();
                if self.input.value() != before {
                    debug!(target: "search", "input changed, re-arming debounce");
                    self.debouncer.trigger();
                }
                consumed
            }
        }
    }

    /// Handle a mouse event against the last-rendered areas. A click on
    /// the visible clear affordance runs the explicit-clear path; a click
    /// elsewhere in the widget focuses it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.destroyed || !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return false;
        }
        let at = Position::new(mouse.column, mouse.row);

        if self.config.show_clear_button && self.clear_visible {
            if let Some(clear_area) = self.clear_area {
                if clear_area.contains(at) {
                    self.clear();
                    return true;
                }
            }
        }
        if let Some(area) = self.last_area {
            if area.contains(at) {
                self.focused = true;
                return true;
            }
        }
        false
    }

    /// Explicit clear: reset synchronously, fire `on_search("")` and
    /// `on_clear()`. Not debounced.
    pub fn clear(&mut self) {
        if self.destroyed {
            return;
        }
        self.reset_value();
        invoke_search(&self.on_search, "");
        invoke(&self.on_clear);
    }

    fn reset_value(&mut self) {
        self.input.reset();
        self.clear_visible = false;
        self.debouncer.cancel();
    }

    /// Pump the debounce delay. The host calls this once per poll-timeout
    /// iteration; delivery never happens inside `handle_key`.
    pub fn tick(&mut self) {
        if self.destroyed {
            return;
        }
        if self.debouncer.poll() {
            let trimmed = self.input.value().trim().to_string();
            self.clear_visible = !trimmed.is_empty();
            debug!(target: "search", query = %trimmed, "debounced search fired");
            invoke_search(&self.on_search, &trimmed);
        }
    }

    /// Tear down: cancel any pending delivery and clear both handler
    /// slots. Idempotent; a destroyed widget ignores all further events.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        debug!(target: "search", "search input destroyed");
        self.debouncer.cancel();
        self.on_search = None;
        self.on_clear = None;
        self.focused = false;
        self.last_area = None;
        self.clear_area = None;
        self.destroyed = true;
    }

    /// Paint the widget: icon slot, text field, clear cell. Each call is a
    /// fresh materialization into `area`.
    pub fn render(&mut self, f: &mut Frame, area: Rect) {
        if self.destroyed || area.width < 5 || area.height < 1 {
            return;
        }
        self.last_area = Some(area);

        let icon_area = Rect::new(area.x, area.y, 2, 1);
        let text_area = Rect::new(area.x + 2, area.y, area.width - 4, 1);
        let clear_area = Rect::new(area.right() - 1, area.y, 1, 1);
        self.clear_area = Some(clear_area);

        f.render_widget(
            Span::styled(SEARCH_ICON, Style::default().fg(Color::DarkGray)),
            icon_area,
        );

        let width = text_area.width as usize;
        if self.input.value().is_empty() {
            f.render_widget(
                Span::styled(
                    self.config.placeholder.clone(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                ),
                text_area,
            );
        } else {
            let scroll = self.input.visual_scroll(width);
            let visible: String = self
                .input
                .value()
                .chars()
                .skip(scroll)
                .take(width)
                .collect();
            f.render_widget(Span::raw(visible), text_area);

            if self.focused {
                let cursor = self.input.visual_cursor().max(scroll) - scroll;
                f.set_cursor_position((text_area.x + cursor as u16, text_area.y));
            }
        }

        // The clear cell is always laid out; only the glyph toggles.
        let clear_glyph = if self.config.show_clear_button && self.clear_visible {
            Span::styled(CLEAR_ICON, Style::default().fg(Color::Gray))
        } else {
            Span::raw(" ")
        };
        f.render_widget(clear_glyph, clear_area);
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`SearchInput`] configuration.
pub struct SearchInputBuilder {
    config: SearchInputConfig,
}

impl SearchInputBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchInputConfig::default(),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.placeholder = placeholder.into();
        self
    }

    pub fn debounce_ms(mut self, ms: u64) -> Self {
        self.config.debounce_ms = ms;
        self
    }

    pub fn show_clear_button(mut self, show: bool) -> Self {
        self.config.show_clear_button = show;
        self
    }

    pub fn build(self) -> SearchInput {
        SearchInput::with_config(self.config)
    }
}

impl Default for SearchInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::{command_handler, search_handler};
    use crossterm::event::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::thread::sleep;
    use std::time::Duration;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn esc() -> KeyEvent {
        KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)
    }

    fn wired(debounce_ms: u64) -> (SearchInput, Rc<RefCell<Vec<String>>>, Rc<RefCell<u32>>) {
        let searches = Rc::new(RefCell::new(Vec::new()));
        let clears = Rc::new(RefCell::new(0));

        let mut widget = SearchInputBuilder::new().debounce_ms(debounce_ms).build();
        let log = Rc::clone(&searches);
        widget.set_on_search(Some(search_handler(move |q| {
            log.borrow_mut().push(q.to_string())
        })));
        let count = Rc::clone(&clears);
        widget.set_on_clear(Some(command_handler(move || *count.borrow_mut() += 1)));

        (widget, searches, clears)
    }

    fn type_str(widget: &mut SearchInput, s: &str) {
        for c in s.chars() {
            widget.handle_key(key(c));
        }
    }

    #[test]
    fn test_burst_delivers_once_with_last_value() {
        let (mut widget, searches, _) = wired(30);

        type_str(&mut widget, "te");
        widget.tick();
        assert!(searches.borrow().is_empty(), "nothing before the delay");

        type_str(&mut widget, "st");
        sleep(Duration::from_millis(45));
        widget.tick();
        widget.tick();

        assert_eq!(*searches.borrow(), vec!["test"]);
    }

    #[test]
    fn test_delivered_value_is_trimmed() {
        let (mut widget, searches, _) = wired(10);
        type_str(&mut widget, "  hi  ");
        sleep(Duration::from_millis(20));
        widget.tick();
        assert_eq!(*searches.borrow(), vec!["hi"]);
        assert!(widget.clear_visible());
    }

    #[test]
    fn test_zero_debounce_defers_to_next_tick() {
        let (mut widget, searches, _) = wired(0);
        widget.handle_key(key('a'));
        // never synchronous inside handle_key
        assert!(searches.borrow().is_empty());
        widget.tick();
        assert_eq!(*searches.borrow(), vec!["a"]);
    }

    #[test]
    fn test_escape_fires_search_but_not_clear() {
        let (mut widget, searches, clears) = wired(30);
        type_str(&mut widget, "abc");
        widget.handle_key(esc());

        assert_eq!(*searches.borrow(), vec![""]);
        assert_eq!(*clears.borrow(), 0);
        assert_eq!(widget.value(), "");
        assert!(!widget.clear_visible());

        // the superseded debounce never fires afterwards
        sleep(Duration::from_millis(45));
        widget.tick();
        assert_eq!(*searches.borrow(), vec![""]);
    }

    #[test]
    fn test_explicit_clear_fires_both() {
        let (mut widget, searches, clears) = wired(30);
        type_str(&mut widget, "abc");
        widget.clear();

        assert_eq!(*searches.borrow(), vec![""]);
        assert_eq!(*clears.borrow(), 1);
    }

    #[test]
    fn test_set_value_updates_affordance_without_search() {
        let (mut widget, searches, _) = wired(30);
        widget.set_value("  hi  ");
        assert_eq!(widget.value(), "hi");
        assert!(widget.clear_visible());
        assert!(searches.borrow().is_empty());

        widget.set_value("   ");
        assert!(!widget.clear_visible());
    }

    #[test]
    fn test_destroy_cancels_pending_delivery() {
        let (mut widget, searches, _) = wired(10);
        type_str(&mut widget, "doomed");
        widget.destroy();
        sleep(Duration::from_millis(20));
        widget.tick();
        assert!(searches.borrow().is_empty());
    }

    #[test]
    fn test_destroy_is_idempotent_and_inert() {
        let (mut widget, searches, clears) = wired(10);
        widget.destroy();
        widget.destroy();

        assert!(!widget.handle_key(key('x')));
        widget.clear();
        widget.tick();
        assert!(searches.borrow().is_empty());
        assert_eq!(*clears.borrow(), 0);
    }

    #[test]
    fn test_focus_before_render_is_safe() {
        let mut widget = SearchInput::new();
        widget.focus();
        assert!(widget.is_focused());
        assert_eq!(widget.value(), "");
    }
}
