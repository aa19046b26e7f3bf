//! Relative placement of viewports.
//!
//! A viewport is either placed at a fixed origin or next to another viewport. The relation is
//! stored as data and resolved on demand, so nothing goes stale when a neighbour moves or is
//! resized.

use crate::workspace::ViewportId;

/// Side of the reference viewport a placed viewport sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Directly above.
    Above,
    /// Directly below.
    Below,
    /// To the left.
    Left,
    /// To the right.
    Right,
}

/// Where a viewport sits in presentation space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A fixed origin (top-left corner).
    Origin {
        /// Horizontal coordinate.
        x: f32,
        /// Vertical coordinate (grows downward).
        y: f32,
    },
    /// Next to another viewport.
    Relative {
        /// The reference viewport.
        of: ViewportId,
        /// Which side of the reference.
        direction: Direction,
        /// Space left between the two.
        gap: f32,
    },
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Origin { x: 0.0, y: 0.0 }
    }
}

impl Placement {
    /// Place next to `of` with no gap.
    pub fn relative(of: ViewportId, direction: Direction) -> Self {
        Placement::Relative {
            of,
            direction,
            gap: 0.0,
        }
    }

    /// The reference viewport, if relative.
    pub fn reference(&self) -> Option<ViewportId> {
        match self {
            Placement::Origin { .. } => None,
            Placement::Relative { of, .. } => Some(*of),
        }
    }
}

/// Origin of a viewport of size `(width, height)` placed in `direction` of a reference whose
/// origin is `reference_origin` and size is `reference_size`.
pub fn offset_origin(
    reference_origin: (f32, f32),
    reference_size: (f32, f32),
    size: (f32, f32),
    direction: Direction,
    gap: f32,
) -> (f32, f32) {
    let (rx, ry) = reference_origin;
    let (rw, rh) = reference_size;
    let (w, h) = size;
    match direction {
        Direction::Above => (rx, ry - gap - h),
        Direction::Below => (rx, ry + rh + gap),
        Direction::Left => (rx - gap - w, ry),
        Direction::Right => (rx + rw + gap, ry),
    }
}
