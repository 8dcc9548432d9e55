use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlacementError;
use crate::offset::Offset;

/// Minimum inset between the screen border and anchors or overlays.
pub const SCREEN_INDENT: f32 = 8.0;

/// Anchor bounds in screen coordinates, captured once per show cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl AnchorRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Push the origin inward so it never sits closer than `indent` to the
    /// top or left screen border.
    pub fn clamped(self, indent: f32) -> Self {
        Self {
            left: self.left.max(indent),
            top: self.top.max(indent),
            ..self
        }
    }
}

/// Natural overlay size reported by the invisible measurement pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlaySize {
    pub width: f32,
    pub height: f32,
}

impl OverlaySize {
    pub const ZERO: OverlaySize = OverlaySize {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Dimensions of the screen the overlay is laid out on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Anchor corner or edge the overlay attaches to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Placement {
    #[default]
    TopLeft,
    TopRight,
    TopCenter,
    BottomLeft,
    BottomRight,
    BottomCenter,
}

impl Placement {
    pub const ALL: [Placement; 6] = [
        Placement::TopLeft,
        Placement::TopRight,
        Placement::TopCenter,
        Placement::BottomLeft,
        Placement::BottomRight,
        Placement::BottomCenter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Placement::TopLeft => "TOP_LEFT",
            Placement::TopRight => "TOP_RIGHT",
            Placement::TopCenter => "TOP_CENTER",
            Placement::BottomLeft => "BOTTOM_LEFT",
            Placement::BottomRight => "BOTTOM_RIGHT",
            Placement::BottomCenter => "BOTTOM_CENTER",
        }
    }

    pub fn from_name(name: &str) -> Option<Placement> {
        Placement::ALL
            .into_iter()
            .find(|placement| placement.name() == name)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Placement {
    type Err = PlacementError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Placement::from_name(value)
            .ok_or_else(|| PlacementError::UnknownPlacement(value.to_string()))
    }
}

/// Top-left corner of the overlay for `placement`, before flip correction.
pub fn base_offset(
    placement: Placement,
    anchor: &AnchorRect,
    overlay: &OverlaySize,
) -> Offset {
    let start = anchor.left;
    let end = anchor.left + anchor.width - overlay.width;
    let center =
        anchor.left + round_half_up((anchor.width - overlay.width) / 2.0);
    let above = anchor.top;
    let below = anchor.top + anchor.height;

    match placement {
        Placement::TopLeft => Offset::new(start, above),
        Placement::TopRight => Offset::new(end, above),
        Placement::TopCenter => Offset::new(center, above),
        Placement::BottomLeft => Offset::new(start, below),
        Placement::BottomRight => Offset::new(end, below),
        Placement::BottomCenter => Offset::new(center, below),
    }
}

/// Same as [`base_offset`] for a raw style name; `None` when the name is not
/// one of the six placement styles.
pub fn base_offset_by_name(
    name: &str,
    anchor: &AnchorRect,
    overlay: &OverlaySize,
) -> Option<Offset> {
    Placement::from_name(name)
        .map(|placement| base_offset(placement, anchor, overlay))
}

/// Round to the nearest integer with halves going toward positive infinity.
pub(crate) fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> AnchorRect {
        AnchorRect::new(100.0, 200.0, 50.0, 20.0)
    }

    fn overlay() -> OverlaySize {
        OverlaySize::new(80.0, 30.0)
    }

    #[test]
    fn given_reference_anchor_when_computing_base_offsets_then_table_matches() {
        let anchor = anchor();
        let overlay = overlay();

        let cases = [
            (Placement::TopLeft, Offset::new(100.0, 200.0)),
            (Placement::TopRight, Offset::new(70.0, 200.0)),
            (Placement::TopCenter, Offset::new(85.0, 200.0)),
            (Placement::BottomLeft, Offset::new(100.0, 220.0)),
            (Placement::BottomRight, Offset::new(70.0, 220.0)),
            (Placement::BottomCenter, Offset::new(85.0, 220.0)),
        ];

        for (placement, expected) in cases {
            assert_eq!(
                base_offset(placement, &anchor, &overlay),
                expected,
                "{placement}"
            );
        }
    }

    #[test]
    fn given_odd_width_difference_when_centering_then_half_rounds_up() {
        let anchor = AnchorRect::new(10.0, 0.0, 41.0, 10.0);
        let overlay = OverlaySize::new(40.0, 10.0);

        let offset = base_offset(Placement::TopCenter, &anchor, &overlay);

        assert_eq!(offset.left, 11.0);
    }

    #[test]
    fn given_negative_half_when_rounding_then_result_is_zero() {
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.5), -1.0);
        assert_eq!(round_half_up(2.5), 3.0);
    }

    #[test]
    fn given_unknown_name_when_computing_base_offset_then_returns_none() {
        let offset = base_offset_by_name("MIDDLE_LEFT", &anchor(), &overlay());

        assert!(offset.is_none());
    }

    #[test]
    fn given_known_name_when_computing_base_offset_then_matches_enum() {
        let offset = base_offset_by_name("TOP_RIGHT", &anchor(), &overlay());

        assert_eq!(offset, Some(Offset::new(70.0, 200.0)));
    }

    #[test]
    fn given_every_placement_when_round_tripping_name_then_value_is_stable() {
        for placement in Placement::ALL {
            assert_eq!(Placement::from_name(placement.name()), Some(placement));
            assert_eq!(
                placement.name().parse::<Placement>().ok(),
                Some(placement)
            );
        }
    }

    #[test]
    fn given_unknown_name_when_parsing_then_error_names_the_input() {
        let err = "SIDEWAYS"
            .parse::<Placement>()
            .expect_err("unknown name should fail");

        assert!(err.to_string().contains("SIDEWAYS"));
    }

    #[test]
    fn given_anchor_at_origin_when_clamped_then_origin_moves_to_indent() {
        let rect =
            AnchorRect::new(-4.0, 3.0, 20.0, 10.0).clamped(SCREEN_INDENT);

        assert_eq!(rect, AnchorRect::new(8.0, 8.0, 20.0, 10.0));
    }
}
