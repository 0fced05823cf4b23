//! Workspace view engine.
//!
//! Pure view state over the reconciled link list: which pane is active,
//! the optional split pane, and the chrome flags. The engine never touches
//! storage or network; the sync core feeds it via [`WorkspaceView::reconcile`].

use crate::models::Link;

/// Lower clamp for the split ratio
pub const MIN_SPLIT_RATIO: f64 = 0.3;
/// Upper clamp for the split ratio
pub const MAX_SPLIT_RATIO: f64 = 0.7;

/// Horizontal bounds of the split container, in the same units as the
/// pointer position handed to [`WorkspaceView::drag_to`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
}

/// View state for the link workspace.
#[derive(Debug, Clone)]
pub struct WorkspaceView {
    links: Vec<Link>,
    active_pane: Option<String>,
    secondary_pane: Option<String>,
    split_enabled: bool,
    split_ratio: f64,
    sidebar_collapsed: bool,
    muted: bool,
    dragging: bool,
}

impl Default for WorkspaceView {
    fn default() -> Self {
        Self {
            links: Vec::new(),
            active_pane: None,
            secondary_pane: None,
            split_enabled: false,
            split_ratio: 0.5,
            sidebar_collapsed: false,
            muted: false,
            dragging: false,
        }
    }
}

impl WorkspaceView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a reconciled link list. Pane ids that no longer exist are
    /// re-selected to the first available id instead of dangling.
    pub fn reconcile(&mut self, links: Vec<Link>) {
        self.links = links;
        let first = self.display_order().first().map(|link| link.id.clone());

        let active_valid = self
            .active_pane
            .as_ref()
            .is_some_and(|id| self.contains(id));
        if !active_valid {
            self.active_pane = first.clone();
        }

        if let Some(secondary) = &self.secondary_pane {
            if !self.contains(secondary) {
                self.secondary_pane = first;
            }
        }
    }

    /// Links in display order: pinned first, both partitions keeping the
    /// reconciled order.
    #[must_use]
    pub fn display_order(&self) -> Vec<&Link> {
        let pinned = self.links.iter().filter(|link| link.pinned);
        let unpinned = self.links.iter().filter(|link| !link.pinned);
        pinned.chain(unpinned).collect()
    }

    /// Make the given link the active pane. Returns `false` when the id is
    /// not in the list.
    pub fn select(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.active_pane = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Advance the active pane through the display order, wrapping at the
    /// end. No-op on an empty list.
    pub fn select_next(&mut self) {
        self.step(true);
    }

    /// Step the active pane backwards through the display order, wrapping
    /// at the start. No-op on an empty list.
    pub fn select_previous(&mut self) {
        self.step(false);
    }

    /// Make the given link the secondary pane. Returns `false` when the id
    /// is not in the list.
    pub fn set_secondary(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.secondary_pane = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Toggle split view. When enabling without a valid secondary pane,
    /// the pane after the active one becomes the secondary.
    pub fn toggle_split(&mut self) {
        self.split_enabled = !self.split_enabled;
        if !self.split_enabled {
            return;
        }
        let secondary_valid = self
            .secondary_pane
            .as_ref()
            .is_some_and(|id| self.contains(id));
        if !secondary_valid {
            self.secondary_pane = self.neighbor_after_active();
        }
    }

    /// Start a split-ratio drag gesture.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Recompute the split ratio from a pointer position. Ignored unless a
    /// drag is active and the container has width.
    pub fn drag_to(&mut self, pointer_x: f64, bounds: Bounds) {
        if !self.dragging || bounds.width <= 0.0 {
            return;
        }
        let ratio = (pointer_x - bounds.left) / bounds.width;
        self.split_ratio = ratio.clamp(MIN_SPLIT_RATIO, MAX_SPLIT_RATIO);
    }

    /// End the drag gesture wherever the pointer is.
    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    #[must_use]
    pub fn active_pane(&self) -> Option<&str> {
        self.active_pane.as_deref()
    }

    #[must_use]
    pub fn secondary_pane(&self) -> Option<&str> {
        self.secondary_pane.as_deref()
    }

    #[must_use]
    pub const fn split_enabled(&self) -> bool {
        self.split_enabled
    }

    #[must_use]
    pub const fn split_ratio(&self) -> f64 {
        self.split_ratio
    }

    #[must_use]
    pub const fn sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    #[must_use]
    pub const fn muted(&self) -> bool {
        self.muted
    }

    #[must_use]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    fn contains(&self, id: &str) -> bool {
        self.links.iter().any(|link| link.id == id)
    }

    fn step(&mut self, forward: bool) {
        let ids: Vec<&str> = self
            .links
            .iter()
            .filter(|link| link.pinned)
            .chain(self.links.iter().filter(|link| !link.pinned))
            .map(|link| link.id.as_str())
            .collect();
        if ids.is_empty() {
            return;
        }

        let len = ids.len();
        let current = self
            .active_pane
            .as_deref()
            .and_then(|active| ids.iter().position(|id| *id == active));
        let next = match current {
            None => 0,
            Some(index) if forward => (index + 1) % len,
            Some(index) => (index + len - 1) % len,
        };
        self.active_pane = Some(ids[next].to_string());
    }

    fn neighbor_after_active(&self) -> Option<String> {
        let ids: Vec<&str> = self
            .display_order()
            .iter()
            .map(|link| link.id.as_str())
            .collect();
        if ids.is_empty() {
            return None;
        }
        let index = self
            .active_pane
            .as_deref()
            .and_then(|active| ids.iter().position(|id| *id == active))
            .map_or(0, |index| (index + 1) % ids.len());
        Some(ids[index].to_string())
    }
}
