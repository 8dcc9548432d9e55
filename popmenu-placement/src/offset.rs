use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Signed `(left, top)` displacement in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub left: f32,
    pub top: f32,
}

impl Offset {
    pub const ZERO: Offset = Offset {
        left: 0.0,
        top: 0.0,
    };

    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

impl Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset {
            left: self.left + rhs.left,
            top: self.top + rhs.top,
        }
    }
}

impl Sum for Offset {
    fn sum<I: Iterator<Item = Offset>>(iter: I) -> Offset {
        iter.fold(Offset::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Offset> for Offset {
    fn sum<I: Iterator<Item = &'a Offset>>(iter: I) -> Offset {
        iter.copied().sum()
    }
}

/// Directional offset where every side is optional.
///
/// `right` and `bottom` push in the opposite direction of `left` and
/// `top`, so `{ right: 10 }` moves the overlay ten units to the left.
/// Unknown keys in JSON payloads are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparseOffset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f32>,
}

impl SparseOffset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_left(mut self, value: f32) -> Self {
        self.left = Some(value);
        self
    }

    pub fn with_right(mut self, value: f32) -> Self {
        self.right = Some(value);
        self
    }

    pub fn with_top(mut self, value: f32) -> Self {
        self.top = Some(value);
        self
    }

    pub fn with_bottom(mut self, value: f32) -> Self {
        self.bottom = Some(value);
        self
    }
}

/// Collapse a sparse directional offset into a signed pair.
pub fn normalize_offset(sparse: &SparseOffset) -> Offset {
    let left = sparse.left.unwrap_or(0.0) - sparse.right.unwrap_or(0.0);
    let top = sparse.top.unwrap_or(0.0) - sparse.bottom.unwrap_or(0.0);
    Offset { left, top }
}

/// Field-wise sum of offsets, starting from `(0, 0)`.
pub fn sum_offsets(offsets: &[Offset]) -> Offset {
    offsets.iter().sum()
}
