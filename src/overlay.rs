//! Screen-level overlay singletons.
//!
//! The brand mark and the settings trigger live at the screen root,
//! independent of whichever container currently holds the toolbar. Both
//! are process-wide singletons: an explicit registry keyed by
//! [`OverlayKind`] holds at most one node per kind, and placement always
//! goes query-and-replace through the registry — uniqueness is never
//! assumed from anywhere else. The most recent placer owns the slot;
//! removal is owner-checked so a stale shell cannot tear down its
//! successor's overlays.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use tracing::debug;

use crate::toolbar::ShellId;

/// Brand mark content. The URL is the fixed outbound project link.
pub const BRAND_LOGO: &str = "◉";
pub const BRAND_LABEL: &str = "mindbar";
pub const BRAND_URL: &str = "https://github.com/mindbar-rs/mindbar";

/// Gear glyph for the settings trigger.
pub const SETTINGS_ICON: &str = "⚙";
/// Fixed cell width of the settings trigger.
const SETTINGS_WIDTH: u16 = 3;

/// The two overlay kinds the shell manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Brand,
    Settings,
}

/// A placed overlay node: its kind, the shell that placed it, and where
/// it was last painted (for hit-testing).
#[derive(Debug, Clone)]
struct OverlayNode {
    owner: ShellId,
    last_area: Option<Rect>,
}

fn registry() -> &'static Mutex<HashMap<OverlayKind, OverlayNode>> {
    static REGISTRY: OnceLock<Mutex<HashMap<OverlayKind, OverlayNode>>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Place (or replace) the overlay of `kind`, owned by `owner`. Any
/// previous node of that kind is dropped, whoever owned it.
pub fn place(kind: OverlayKind, owner: ShellId) {
    let mut slots = registry().lock().unwrap();
    debug!(target: "overlay", ?kind, ?owner, "overlay placed");
    slots.insert(
        kind,
        OverlayNode {
            owner,
            last_area: None,
        },
    );
}

/// Remove the overlay of `kind` if it is currently owned by `owner`.
/// Returns whether a node was removed.
pub fn remove_if_owner(kind: OverlayKind, owner: ShellId) -> bool {
    let mut slots = registry().lock().unwrap();
    match slots.get(&kind) {
        Some(node) if node.owner == owner => {
            slots.remove(&kind);
            debug!(target: "overlay", ?kind, ?owner, "overlay removed");
            true
        }
        _ => false,
    }
}

/// Current owner of the overlay of `kind`, if placed.
pub fn owner(kind: OverlayKind) -> Option<ShellId> {
    registry().lock().unwrap().get(&kind).map(|node| node.owner)
}

/// Whether the overlay of `kind` is placed.
pub fn is_placed(kind: OverlayKind) -> bool {
    registry().lock().unwrap().contains_key(&kind)
}

/// Number of placed overlay nodes (at most one per kind).
pub fn placed_count() -> usize {
    registry().lock().unwrap().len()
}

/// Remove every overlay regardless of owner. Host teardown helper.
pub fn clear_all() {
    registry().lock().unwrap().clear();
}

/// Hit-test the settings trigger against its last-painted cell. Returns
/// the owning shell so it can route the activation to its own handler.
pub fn settings_hit(at: Position) -> Option<ShellId> {
    let slots = registry().lock().unwrap();
    let node = slots.get(&OverlayKind::Settings)?;
    match node.last_area {
        Some(area) if area.contains(at) => Some(node.owner),
        _ => None,
    }
}

/// Paint the placed overlays above everything else. The brand mark sits
/// at the bottom-left of the screen, the settings trigger at the
/// top-right; both record their areas for hit-testing.
pub fn render(f: &mut Frame, screen: Rect) {
    if screen.width < SETTINGS_WIDTH || screen.height < 1 {
        return;
    }
    let mut slots = registry().lock().unwrap();

    if let Some(node) = slots.get_mut(&OverlayKind::Brand) {
        let line = Line::from(vec![
            Span::styled(BRAND_LOGO, Style::default().fg(Color::Cyan)),
            Span::raw(" "),
            Span::styled(BRAND_LABEL, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(
                BRAND_URL,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ),
        ]);
        let width = (line.width() as u16).min(screen.width);
        let area = Rect::new(screen.x, screen.bottom() - 1, width, 1);
        node.last_area = Some(area);
        f.render_widget(line, area);
    }

    if let Some(node) = slots.get_mut(&OverlayKind::Settings) {
        let area = Rect::new(screen.right() - SETTINGS_WIDTH, screen.y, SETTINGS_WIDTH, 1);
        node.last_area = Some(area);
        f.render_widget(
            Span::styled(
                format!(" {} ", SETTINGS_ICON),
                Style::default().fg(Color::Gray),
            ),
            area,
        );
    }
}
