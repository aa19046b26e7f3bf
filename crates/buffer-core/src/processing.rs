//! Pluggable highlighting.
//!
//! A highlighter owns a [`HighlightIndex`] for one document and keeps it in sync with the
//! document's content. Language-specific crates (`buffer-core-cfamily`, ...) implement
//! [`Highlighter`]; callers stay generic over it.

use crate::document::Document;
use crate::highlight::{Highlight, HighlightIndex};
use crate::position::ScreenPosition;

/// A lexical highlighter producing a [`HighlightIndex`] for a [`Document`].
pub trait Highlighter {
    /// Clear the index and rescan the whole document.
    fn generate_highlighting(&mut self, document: &Document);

    /// Clear and rescan lines `[0, to_line)` (clamped to the document).
    fn update_highlighting(&mut self, document: &Document, to_line: usize);

    /// Clear and rescan from `line` to the end of the document, starting from the lexical state
    /// recorded for `line` by an earlier pass.
    fn rehighlight_from(&mut self, document: &Document, line: usize);

    /// The index built by the last pass.
    fn highlight_index(&self) -> &HighlightIndex;

    /// Bring the index up to date with edits made since the last refresh.
    ///
    /// Returns `true` if a rescan happened.
    fn refresh(&mut self, document: &mut Document) -> bool {
        match document.take_dirty_from() {
            Some(line) => {
                self.rehighlight_from(document, line);
                true
            }
            None => false,
        }
    }

    /// Highlights on `line`, sorted by start column.
    fn get_highlighting(&self, line: usize) -> Vec<&Highlight> {
        self.highlight_index().line(line)
    }

    /// Highlights on lines `[start_line, end_line)`, sorted by line then start column.
    fn get_highlighting_range(&self, start_line: usize, end_line: usize) -> Vec<&Highlight> {
        self.highlight_index().range(start_line, end_line)
    }

    /// Auto-indent whitespace for a new line started at `pos`.
    fn get_indent(&self, pos: ScreenPosition) -> String {
        self.highlight_index().indent_at(pos)
    }
}
