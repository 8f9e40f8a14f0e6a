//! Edge snapping and visibility clamping for the floating button.

use serde::{Deserialize, Serialize};

use crate::geometry::{clamp, Position, Viewport};

/// Diameter of the collapsed circular button.
pub const CIRCLE_SIZE: f64 = 60.0;

/// Gap kept between the button and the viewport edges.
pub const EDGE_MARGIN: f64 = 16.0;

/// Box that must stay visible when the panel opens from the button.
pub const PANEL_WIDTH: f64 = 400.0;
pub const PANEL_HEIGHT: f64 = 340.0;

/// Viewport edge the widget is docked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockEdge {
    #[default]
    Left,
    Right,
}

/// Outcome of releasing the button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub position: Position,
    pub edge: DockEdge,
}

/// Keep the whole circle inside the margins.
pub fn clamp_circle(pos: Position, viewport: Viewport) -> Position {
    let max_x = viewport.width - CIRCLE_SIZE - EDGE_MARGIN;
    let max_y = viewport.height - CIRCLE_SIZE - EDGE_MARGIN;
    Position::new(
        clamp(pos.x, EDGE_MARGIN, max_x),
        clamp(pos.y, EDGE_MARGIN, max_y),
    )
}

/// Dock to whichever side the circle's center is on, keeping y in bounds.
pub fn snap_to_edge(pos: Position, viewport: Viewport) -> SnapResult {
    let edge = if pos.x + CIRCLE_SIZE / 2.0 < viewport.center_x() {
        DockEdge::Left
    } else {
        DockEdge::Right
    };

    let x = match edge {
        DockEdge::Left => EDGE_MARGIN,
        DockEdge::Right => viewport.width - CIRCLE_SIZE - EDGE_MARGIN,
    };
    let y = clamp(pos.y, EDGE_MARGIN, viewport.height - CIRCLE_SIZE - EDGE_MARGIN);

    SnapResult {
        position: Position::new(x, y),
        edge,
    }
}

/// Keep an opened panel anchored at `pos` fully on screen.
pub fn clamp_open_panel(pos: Position, viewport: Viewport) -> Position {
    Position::new(
        clamp(pos.x, 0.0, viewport.width - PANEL_WIDTH),
        clamp(pos.y, 0.0, viewport.height - PANEL_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Viewport = Viewport::new(1920.0, 1080.0);

    #[test]
    fn test_clamp_circle() {
        assert_eq!(clamp_circle(Position::new(-100.0, -100.0), SCREEN), Position::new(16.0, 16.0));
        assert_eq!(
            clamp_circle(Position::new(5000.0, 5000.0), SCREEN),
            Position::new(1844.0, 1004.0)
        );
        assert_eq!(clamp_circle(Position::new(500.0, 300.0), SCREEN), Position::new(500.0, 300.0));
    }

    #[test]
    fn test_snap_left_and_right() {
        let left = snap_to_edge(Position::new(400.0, 500.0), SCREEN);
        assert_eq!(left.edge, DockEdge::Left);
        assert_eq!(left.position, Position::new(16.0, 500.0));

        let right = snap_to_edge(Position::new(1200.0, 2000.0), SCREEN);
        assert_eq!(right.edge, DockEdge::Right);
        assert_eq!(right.position, Position::new(1844.0, 1004.0));
    }

    #[test]
    fn test_snap_uses_circle_center() {
        // center at 930 + 30 = 960, not strictly left of the middle
        assert_eq!(snap_to_edge(Position::new(930.0, 100.0), SCREEN).edge, DockEdge::Right);
        assert_eq!(snap_to_edge(Position::new(929.0, 100.0), SCREEN).edge, DockEdge::Left);
    }

    #[test]
    fn test_clamp_open_panel() {
        assert_eq!(
            clamp_open_panel(Position::new(1844.0, 1004.0), SCREEN),
            Position::new(1520.0, 740.0)
        );
        let tiny = Viewport::new(300.0, 200.0);
        assert_eq!(clamp_open_panel(Position::new(16.0, 16.0), tiny), Position::new(-100.0, -140.0));
    }
}
