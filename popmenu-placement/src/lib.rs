//! Placement and animation engine for overlays anchored to an on-screen
//! element.
//!
//! The [`OverlayController`] drives a single overlay through measurement,
//! placement and its entrance/exit animation against a
//! [`RenderingSurface`]. Geometry and easing helpers are exposed for
//! renderers that lay the overlay out themselves.

mod animation;
mod config;
mod controller;
mod edge;
mod engine;
mod error;
mod geometry;
mod offset;
mod surface;

pub use animation::{
    AnimationDirection, AnimationFrame, AnimationSession, AnimationSpec,
    DEFAULT_DURATION_MS, Easing,
};
pub use config::{HiddenNotification, MenuConfig};
pub use controller::{ComputeOffset, OverlayController, ShowRequest};
pub use edge::{EdgeCorrection, correct_for_screen};
pub use engine::{
    CycleId, LastConfiguration, LifecycleState, OverlayFrame, PlacementEffect,
    PlacementEngine, PlacementEvent, ShowParams, StickTo,
};
pub use error::{PlacementError, Result};
pub use geometry::{
    AnchorRect, OverlaySize, Placement, SCREEN_INDENT, ScreenSize,
    base_offset, base_offset_by_name,
};
pub use offset::{Offset, SparseOffset, normalize_offset, sum_offsets};
pub use surface::{MeasureTicket, RenderingSurface};
