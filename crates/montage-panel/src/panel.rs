//! Floating panel state machine.
//!
//! The panel is either a draggable circle or an open sidebar docked to the
//! edge the circle was last snapped to. Pointer events arrive from the host
//! toolkit; global move/up tracking is only needed while a drag is active.

use serde::Serialize;
use tracing::{debug, trace};

use crate::feature::Feature;
use crate::geometry::{Position, Viewport};
use crate::snap::{clamp_circle, clamp_open_panel, snap_to_edge, DockEdge, CIRCLE_SIZE};

/// Width of the docked sidebar.
pub const DOCKED_PANEL_WIDTH: f64 = 400.0;

/// Circle position before the first drag.
pub const INITIAL_POSITION: Position = Position::new(50.0, 50.0);

/// Placement of the open sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DockedLayout {
    pub edge: DockEdge,
    pub width: f64,
    pub top: f64,
}

/// Drag/snap/open state of the editor panel.
#[derive(Debug, Clone, Serialize)]
pub struct PanelState {
    viewport: Viewport,
    position: Position,
    pinned: Position,
    edge: DockEdge,
    open: bool,
    dragging: bool,
    moved_during_drag: bool,
    last_pointer: Position,
    feature: Feature,
}

impl PanelState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            position: INITIAL_POSITION,
            pinned: INITIAL_POSITION,
            edge: DockEdge::Left,
            open: false,
            dragging: false,
            moved_during_drag: false,
            last_pointer: Position::default(),
            feature: Feature::default(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn pinned_position(&self) -> Position {
        self.pinned
    }

    pub fn dock_edge(&self) -> DockEdge {
        self.edge
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn selected_feature(&self) -> Feature {
        self.feature
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Whether document-level move/up listeners should be attached.
    pub fn is_tracking_pointer(&self) -> bool {
        self.dragging
    }

    /// Press on the circle. Ignored while the panel is open.
    pub fn pointer_down(&mut self, cursor: Position) {
        if self.open {
            return;
        }
        self.dragging = true;
        self.moved_during_drag = false;
        self.last_pointer = cursor;
        debug!(x = cursor.x, y = cursor.y, "Drag started");
    }

    /// Pointer motion while dragging: the circle follows, centered on the cursor.
    pub fn pointer_move(&mut self, cursor: Position) {
        if !self.dragging {
            return;
        }
        self.moved_during_drag = true;
        self.last_pointer = cursor;
        self.position = clamp_circle(centered_on(cursor), self.viewport);
        trace!(x = self.position.x, y = self.position.y, "Drag moved");
    }

    /// Release: snap to the nearer edge and remember it as the pinned spot.
    pub fn pointer_up(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;

        let snapped = snap_to_edge(centered_on(self.last_pointer), self.viewport);
        self.position = snapped.position;
        self.pinned = snapped.position;
        self.edge = snapped.edge;
        debug!(edge = ?snapped.edge, x = snapped.position.x, y = snapped.position.y, "Snapped to edge");
    }

    /// Click on the circle. A click that ends a drag gesture does not open
    /// the panel. Returns whether the panel is now open.
    pub fn activate(&mut self) -> bool {
        if self.moved_during_drag {
            self.moved_during_drag = false;
            return self.open;
        }
        if !self.open {
            self.open = true;
            debug!(edge = ?self.edge, "Panel opened");
        }
        self.open
    }

    /// Close the sidebar and put the circle back where it was pinned.
    pub fn close(&mut self) {
        self.open = false;
        self.position = self.pinned;
        debug!(x = self.pinned.x, y = self.pinned.y, "Panel closed");
    }

    /// Host window resized.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.position = clamp_open_panel(self.position, viewport);
        debug!(width = viewport.width, height = viewport.height, "Viewport resized");
    }

    pub fn select_feature(&mut self, feature: Feature) {
        self.feature = feature;
    }

    /// Sidebar placement, when open.
    pub fn docked_layout(&self) -> Option<DockedLayout> {
        self.open.then_some(DockedLayout {
            edge: self.edge,
            width: DOCKED_PANEL_WIDTH,
            top: 0.0,
        })
    }
}

fn centered_on(cursor: Position) -> Position {
    cursor.offset(-CIRCLE_SIZE / 2.0, -CIRCLE_SIZE / 2.0)
}
