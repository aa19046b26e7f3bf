//! Tab expansion between file columns and screen columns.
//!
//! Every `'\t'` in a line is replaced by the configured tab string. Screen columns are character
//! indices into the expanded line; file columns are character indices into the raw line.

use std::borrow::Cow;

use crate::position::{Position, ScreenPosition};

/// Default tab width (in characters) used when a caller does not specify a tab string.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Tab expansion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabExpansion {
    tab: String,
}

impl Default for TabExpansion {
    fn default() -> Self {
        Self::with_width(DEFAULT_TAB_WIDTH)
    }
}

impl TabExpansion {
    /// Expand each tab to `width` spaces (`0` is treated as `1`).
    pub fn with_width(width: usize) -> Self {
        Self {
            tab: " ".repeat(width.max(1)),
        }
    }

    /// Expand each tab to an arbitrary string.
    pub fn with_string(tab: impl Into<String>) -> Self {
        Self { tab: tab.into() }
    }

    /// The replacement string for a tab.
    pub fn tab_str(&self) -> &str {
        &self.tab
    }

    /// Width of one expanded tab in screen columns.
    pub fn tab_width(&self) -> usize {
        self.tab.chars().count()
    }

    /// Expand tabs in `line`. Borrows when the line has no tabs.
    pub fn expand<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if line.contains('\t') {
            Cow::Owned(line.replace('\t', &self.tab))
        } else {
            Cow::Borrowed(line)
        }
    }

    /// Length of `line` in screen columns.
    pub fn screen_len(&self, line: &str) -> usize {
        self.file_to_screen_x(line, usize::MAX)
    }

    /// Screen column of file column `x` in `line`. Columns past the end extend one screen column
    /// per file column.
    pub fn file_to_screen_x(&self, line: &str, x: usize) -> usize {
        let tab_width = self.tab_width();
        let mut screen = 0usize;
        let mut consumed = 0usize;
        for ch in line.chars() {
            if consumed == x {
                return screen;
            }
            screen += if ch == '\t' { tab_width } else { 1 };
            consumed += 1;
        }
        if x == usize::MAX {
            return screen;
        }
        screen + x.saturating_sub(consumed)
    }

    /// File column that contains screen column `screen_x`. A screen column inside an expanded tab
    /// maps to the tab itself.
    pub fn screen_to_file_x(&self, line: &str, screen_x: usize) -> usize {
        let tab_width = self.tab_width();
        let mut screen = 0usize;
        for (column, ch) in line.chars().enumerate() {
            let width = if ch == '\t' { tab_width } else { 1 };
            if screen_x < screen + width {
                return column;
            }
            screen += width;
        }
        line.chars().count() + screen_x.saturating_sub(screen)
    }

    /// Convert a file position on `line` to its screen position.
    pub fn to_screen(&self, line: &str, pos: Position) -> ScreenPosition {
        ScreenPosition::new(self.file_to_screen_x(line, pos.x), pos.y)
    }

    /// Convert a screen position on `line` to its file position.
    pub fn to_file(&self, line: &str, pos: ScreenPosition) -> Position {
        Position::new(self.screen_to_file_x(line, pos.x), pos.y)
    }
}
