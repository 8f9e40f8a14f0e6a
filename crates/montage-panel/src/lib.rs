//! Floating editor panel state.
//!
//! Toolkit-independent drag, snap, clamp and dock logic for the collapsed
//! circle and the open sidebar. The host feeds pointer and resize events in
//! and reads positions back out.

pub mod feature;
pub mod geometry;
pub mod panel;
pub mod snap;

pub use feature::{Feature, FeatureTool};
pub use geometry::{clamp, Position, Viewport};
pub use panel::{DockedLayout, PanelState, DOCKED_PANEL_WIDTH, INITIAL_POSITION};
pub use snap::{clamp_circle, clamp_open_panel, snap_to_edge, DockEdge, SnapResult};
