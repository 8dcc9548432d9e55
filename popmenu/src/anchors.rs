use iced::widget::Id;
use popmenu_placement::{AnchorRect, Placement, SparseOffset};

pub(crate) const ANCHOR_WIDTH: f32 = 140.0;
pub(crate) const ANCHOR_HEIGHT: f32 = 40.0;
pub(crate) const ANCHOR_MARGIN: f32 = 24.0;

/// Vertical nudge applied to menus opening below their anchor.
const BOTTOM_NUDGE: f32 = 4.0;

/// Anchor placement per grid slot, top row first, left to right.
///
/// Menus that attach by their left edge sit in the right column and the
/// bottom row sits against the window bottom, so both flips are reachable.
pub(crate) const GRID: [[Placement; 3]; 2] = [
    [Placement::TopRight, Placement::TopCenter, Placement::TopLeft],
    [
        Placement::BottomRight,
        Placement::BottomCenter,
        Placement::BottomLeft,
    ],
];

/// Widget id of the container wrapping the anchor button for `placement`.
pub(crate) fn anchor_id(placement: Placement) -> Id {
    Id::new(placement.name())
}

/// Computed offset for a placement; only downward menus are nudged.
pub(crate) fn computed_offset(
    placement: Placement,
    _anchor: &AnchorRect,
) -> SparseOffset {
    match placement {
        Placement::BottomLeft
        | Placement::BottomRight
        | Placement::BottomCenter => SparseOffset::new().with_top(BOTTOM_NUDGE),
        _ => SparseOffset::new(),
    }
}
