//! Position value types.
//!
//! Two coordinate spaces exist over the same document:
//!
//! - [`Position`]: a *file* position. `x` is a character index into the raw line (tabs count as
//!   one character).
//! - [`ScreenPosition`]: a *screen* position. `x` is a character index into the line after every
//!   tab has been replaced by the configured tab string.
//!
//! Both are ordered by line first, then column. Conversions between them go through
//! [`TabExpansion`](crate::TabExpansion) and always need the line text.

use std::cmp::Ordering;

/// A file position: raw column `x` (pre tab expansion) on line `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based column in characters within the raw line.
    pub x: usize,
    /// Zero-based line index.
    pub y: usize,
}

impl Position {
    /// Create a new file position.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Position after `text` would be inserted at `self`.
    pub fn advanced_by(self, text: &str) -> Self {
        match text.rfind('\n') {
            None => Self::new(self.x + text.chars().count(), self.y),
            Some(last_newline) => {
                let newlines = text.matches('\n').count();
                Self::new(text[last_newline + 1..].chars().count(), self.y + newlines)
            }
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then_with(|| self.x.cmp(&other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A screen position: column `x` after tab expansion on line `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScreenPosition {
    /// Zero-based column in characters within the tab-expanded line.
    pub x: usize,
    /// Zero-based line index.
    pub y: usize,
}

impl ScreenPosition {
    /// Create a new screen position.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl Ord for ScreenPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then_with(|| self.x.cmp(&other.x))
    }
}

impl PartialOrd for ScreenPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Return `(a, b)` ordered so that the first element is textually first.
pub fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

/// An axis-aligned rectangle in presentation units, as consumed by a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightBox {
    /// Left edge, relative to the viewport's left margin.
    pub x: f32,
    /// Top edge, relative to the viewport's first visible row (grows downward).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}
