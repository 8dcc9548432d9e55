use crate::geometry::{AnchorRect, OverlaySize, ScreenSize};
use crate::offset::Offset;

/// Position after screen-edge correction.
///
/// When an axis is flipped the overlay grows toward negative coordinates
/// from `position`, so the renderer subtracts the animated extent on that
/// axis (see [`EdgeCorrection::origin`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCorrection {
    pub position: Offset,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl EdgeCorrection {
    /// Top-left corner of the rendered overlay for the given visible size.
    pub fn origin(&self, visible: OverlaySize) -> Offset {
        let left = if self.flip_x {
            self.position.left - visible.width
        } else {
            self.position.left
        };
        let top = if self.flip_y {
            self.position.top - visible.height
        } else {
            self.position.top
        };
        Offset { left, top }
    }
}

/// Flip the resting position on any axis where the overlay would cross the
/// far screen edge minus `indent`.
///
/// A flipped axis reattaches at the anchor's opposite edge, capped at the
/// screen edge minus `indent`. Recompute on every layout pass since both the
/// screen and the anchor can change while the overlay is up.
pub fn correct_for_screen(
    resting: Offset,
    overlay: OverlaySize,
    anchor: &AnchorRect,
    screen: ScreenSize,
    indent: f32,
) -> EdgeCorrection {
    let flip_x = resting.left > screen.width - overlay.width - indent;
    let left = if flip_x {
        (screen.width - indent).min(resting.left + anchor.width)
    } else {
        resting.left
    };

    let flip_y = resting.top > screen.height - overlay.height - indent;
    let top = if flip_y {
        (screen.height - indent).min(resting.top + anchor.height)
    } else {
        resting.top
    };

    EdgeCorrection {
        position: Offset { left, top },
        flip_x,
        flip_y,
    }
}
