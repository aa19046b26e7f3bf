//! A rectangular, scrollable window onto one [`Document`].
//!
//! The viewport owns the cursor, the selection (anchor and extent) and the visible window. It
//! never renders; geometry queries convert rows and columns into presentation units using the
//! externally supplied [`ViewMetrics`].
//!
//! The document is not stored in the viewport. Every operation that needs content borrows it,
//! so any number of viewports can look at the same document.

use log::debug;

use crate::document::Document;
use crate::error::DocumentError;
use crate::history::TextChange;
use crate::highlight::{Highlight, HighlightKind};
use crate::position::{HighlightBox, Position, ordered};
use crate::tabs::TabExpansion;
use crate::text::is_word_break;

/// Font metrics used to convert rows/columns into presentation units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMetrics {
    /// Width of one screen column.
    pub char_width: f32,
    /// Height of one row.
    pub line_height: f32,
}

impl Default for ViewMetrics {
    fn default() -> Self {
        Self {
            char_width: 1.0,
            line_height: 1.0,
        }
    }
}

/// Initial viewport settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportConfig {
    /// Visible rows.
    pub show_length: usize,
    /// Visible screen columns.
    pub show_width: usize,
    /// Tab expansion used for screen columns.
    pub tab: TabExpansion,
    /// Font metrics.
    pub metrics: ViewMetrics,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            show_length: 40,
            show_width: 80,
            tab: TabExpansion::default(),
            metrics: ViewMetrics::default(),
        }
    }
}

impl ViewportConfig {
    /// Config with the given window size and default tab/metrics.
    pub fn with_size(show_length: usize, show_width: usize) -> Self {
        Self {
            show_length,
            show_width,
            ..Self::default()
        }
    }
}

/// Cursor, selection and scroll state for one view of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    cursor: Position,
    show_start_y: usize,
    show_start_x: usize,
    show_length: usize,
    show_width: usize,
    highlight_anchor: Position,
    highlight_extent: Position,
    lock_position: Option<usize>,
    tab: TabExpansion,
    metrics: ViewMetrics,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    /// Create a viewport at the top-left of a document.
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            cursor: Position::default(),
            show_start_y: 0,
            show_start_x: 0,
            show_length: config.show_length.max(1),
            show_width: config.show_width.max(1),
            highlight_anchor: Position::default(),
            highlight_extent: Position::default(),
            lock_position: None,
            tab: config.tab,
            metrics: config.metrics,
        }
    }

    /// Cursor (file position, not clipped to the window).
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// First visible line.
    pub fn show_start_y(&self) -> usize {
        self.show_start_y
    }

    /// First visible screen column.
    pub fn show_start_x(&self) -> usize {
        self.show_start_x
    }

    /// Number of visible rows.
    pub fn show_length(&self) -> usize {
        self.show_length
    }

    /// Number of visible screen columns.
    pub fn show_width(&self) -> usize {
        self.show_width
    }

    /// Resize the window.
    pub fn set_size(&mut self, show_length: usize, show_width: usize) {
        self.show_length = show_length.max(1);
        self.show_width = show_width.max(1);
    }

    /// Selection anchor.
    pub fn highlight_anchor(&self) -> Position {
        self.highlight_anchor
    }

    /// Selection extent.
    pub fn highlight_extent(&self) -> Position {
        self.highlight_extent
    }

    /// Tab expansion in use.
    pub fn tab(&self) -> &TabExpansion {
        &self.tab
    }

    /// Font metrics in use.
    pub fn metrics(&self) -> ViewMetrics {
        self.metrics
    }

    /// Replace the font metrics.
    pub fn set_metrics(&mut self, metrics: ViewMetrics) {
        self.metrics = metrics;
    }

    /// Pin the window at line `y` so edits made elsewhere do not scroll it.
    pub fn lock(&mut self, y: usize) {
        self.lock_position = Some(y);
        self.show_start_y = y;
    }

    /// Release the pin.
    pub fn unlock(&mut self) {
        self.lock_position = None;
    }

    /// Whether the window is pinned.
    pub fn is_locked(&self) -> bool {
        self.lock_position.is_some()
    }

    /// Line the window is pinned at, if any.
    pub fn lock_position(&self) -> Option<usize> {
        self.lock_position
    }

    /// Returns `true` if line `y` is inside the visible window.
    pub fn is_line_visible(&self, y: usize) -> bool {
        y >= self.show_start_y && y < self.show_start_y + self.show_length
    }

    /// Move the cursor to `pos`, clamped to the document, scrolling just enough to show it.
    pub fn set_cursor(&mut self, document: &Document, pos: Position) {
        let y = pos.y.min(document.line_count() - 1);
        let x = pos.x.min(line_len(document, y));
        self.cursor = Position::new(x, y);
        self.ensure_cursor_visible(document);
    }

    /// Move the cursor up one line.
    ///
    /// With `sticky` the cursor snaps to the end of the new line; otherwise its column is kept
    /// unless the new line is shorter. At line 0 only the window scrolls (if it is scrolled).
    pub fn move_cursor_up(&mut self, document: &Document, sticky: bool) {
        if self.cursor.y == 0 {
            self.show_start_y = self.show_start_y.saturating_sub(1);
            return;
        }
        self.cursor.y -= 1;
        self.cursor.x = self.vertical_column(document, sticky);
        if self.cursor.y < self.show_start_y {
            self.show_start_y -= 1;
        }
        self.scroll_x_to_cursor(document);
    }

    /// Move the cursor down one line. A no-op on the last line.
    pub fn move_cursor_down(&mut self, document: &Document, sticky: bool) {
        if self.cursor.y + 1 >= document.line_count() {
            return;
        }
        self.cursor.y += 1;
        self.cursor.x = self.vertical_column(document, sticky);
        if self.cursor.y >= self.show_start_y + self.show_length {
            self.show_start_y += 1;
        }
        self.scroll_x_to_cursor(document);
    }

    /// Move the cursor one character left, wrapping to the end of the previous line.
    pub fn move_cursor_left(&mut self, document: &Document) {
        if self.cursor.x > 0 {
            self.cursor.x = self.cursor.x.min(line_len(document, self.cursor.y)).saturating_sub(1);
            self.scroll_x_to_cursor(document);
        } else if self.cursor.y > 0 {
            self.move_cursor_up(document, true);
        }
    }

    /// Move the cursor one character right, wrapping to the start of the next line.
    pub fn move_cursor_right(&mut self, document: &Document) {
        if self.cursor.x < line_len(document, self.cursor.y) {
            self.cursor.x += 1;
            self.scroll_x_to_cursor(document);
        } else if self.cursor.y + 1 < document.line_count() {
            self.move_cursor_down(document, false);
            self.cursor.x = 0;
            self.scroll_x_to_cursor(document);
        }
    }

    /// Move the cursor to the start of its line.
    pub fn move_cursor_home(&mut self) {
        self.cursor.x = 0;
        self.show_start_x = 0;
    }

    /// Move the cursor to the end of its line.
    pub fn move_cursor_end(&mut self, document: &Document) {
        self.cursor.x = line_len(document, self.cursor.y);
        self.scroll_x_to_cursor(document);
    }

    /// Move the window and the cursor up by one page.
    pub fn page_up(&mut self, document: &Document) {
        let page = self.show_length;
        self.show_start_y = self.show_start_y.saturating_sub(page);
        self.cursor.y = self.cursor.y.saturating_sub(page);
        self.cursor.x = self.vertical_column(document, false);
        self.scroll_x_to_cursor(document);
    }

    /// Move the window and the cursor down by one page, clamped to the last line.
    pub fn page_down(&mut self, document: &Document) {
        let page = self.show_length;
        let last = document.line_count() - 1;
        self.show_start_y = (self.show_start_y + page).min(last);
        self.cursor.y = (self.cursor.y + page).min(last);
        self.cursor.x = self.vertical_column(document, false);
        self.scroll_x_to_cursor(document);
    }

    /// Jump to the previous whitespace boundary on the line, or to the end of the previous line
    /// from column 0.
    pub fn word_jump_cursor_left(&mut self, document: &Document) {
        if self.cursor.x == 0 {
            if self.cursor.y > 0 {
                self.move_cursor_up(document, true);
            }
            return;
        }
        let chars = line_chars(document, self.cursor.y);
        let x = self.cursor.x.min(chars.len());
        self.cursor.x = if x > 0 && is_word_break(chars[x - 1]) {
            x - 1
        } else {
            previous_break(&chars, x.saturating_sub(1)).map_or(0, |i| i + 1)
        };
        self.scroll_x_to_cursor(document);
    }

    /// Jump to the next whitespace boundary on the line.
    ///
    /// Landing on whitespace advances one further character. From the end of the line the cursor
    /// continues at column 0 of the next line instead of moving one column past the end; on the
    /// last line it stays put.
    pub fn word_jump_cursor_right(&mut self, document: &Document) {
        let chars = line_chars(document, self.cursor.y);
        let x = self.cursor.x;
        if x >= chars.len() {
            if self.cursor.y + 1 < document.line_count() {
                self.move_cursor_down(document, false);
                self.cursor.x = 0;
                self.scroll_x_to_cursor(document);
            }
            return;
        }
        self.cursor.x = if is_word_break(chars[x]) {
            x + 1
        } else {
            next_break(&chars, x).unwrap_or(chars.len())
        };
        self.scroll_x_to_cursor(document);
    }

    /// Scroll so that `line` is the first visible line (clamped), ignoring any lock.
    pub fn scroll_to(&mut self, document: &Document, line: usize) {
        self.show_start_y = line.min(document.line_count() - 1);
    }

    /// Scroll the minimum amount needed to show the cursor.
    pub fn ensure_cursor_visible(&mut self, document: &Document) {
        if self.cursor.y < self.show_start_y {
            self.show_start_y = self.cursor.y;
        } else if self.cursor.y >= self.show_start_y + self.show_length {
            self.show_start_y = self.cursor.y + 1 - self.show_length;
        }
        self.scroll_x_to_cursor(document);
    }

    /// Start a selection at the cursor.
    pub fn start_highlight(&mut self) {
        self.highlight_anchor = self.cursor;
        self.highlight_extent = self.cursor;
    }

    /// Extend the selection to the cursor, keeping the anchor.
    pub fn extend_highlight(&mut self) {
        self.highlight_extent = self.cursor;
    }

    /// Drop the selection.
    pub fn no_highlight(&mut self) {
        self.highlight_anchor = self.cursor;
        self.highlight_extent = self.cursor;
    }

    /// Returns `true` if something is selected.
    pub fn got_highlight(&self) -> bool {
        self.highlight_anchor != self.highlight_extent
    }

    /// The selection as an ordered `(start, end)` pair.
    pub fn selection(&self) -> (Position, Position) {
        ordered(self.highlight_anchor, self.highlight_extent)
    }

    /// Boxes covering the selection, in presentation units relative to the window.
    ///
    /// A downward selection is walked from the anchor line (or the top of the window) to the
    /// extent line. An upward selection is walked from the extent line to the anchor line (or the
    /// bottom of the window), and the anchor line ends at the live cursor column. Rows with no
    /// highlighted width get a half-character marker.
    pub fn compute_highlight_boxes(&self, document: &Document) -> Vec<HighlightBox> {
        if !self.got_highlight() {
            return Vec::new();
        }
        let anchor = self.highlight_anchor;
        let extent = self.highlight_extent;

        if anchor.y == extent.y {
            let Ok(line) = document.line(anchor.y) else {
                return Vec::new();
            };
            let a = self.tab.file_to_screen_x(line, anchor.x);
            let e = self.tab.file_to_screen_x(line, extent.x);
            return vec![self.row_box(anchor.y, a.min(e), a.max(e))];
        }

        let mut boxes = Vec::new();
        if anchor < extent {
            for y in anchor.y.max(self.show_start_y)..=extent.y {
                let Ok(line) = document.line(y) else {
                    break;
                };
                let start = if y == anchor.y {
                    self.tab.file_to_screen_x(line, anchor.x)
                } else {
                    0
                };
                let end = if y == extent.y {
                    self.tab.file_to_screen_x(line, extent.x)
                } else {
                    self.tab.screen_len(line)
                };
                boxes.push(self.row_box(y, start, end));
            }
        } else {
            let last = anchor.y.min(self.show_start_y + self.show_length - 1);
            for y in extent.y..=last {
                let Ok(line) = document.line(y) else {
                    break;
                };
                let start = if y == extent.y {
                    self.tab.file_to_screen_x(line, extent.x)
                } else {
                    0
                };
                let end = if y == anchor.y {
                    self.tab.file_to_screen_x(line, self.cursor.x)
                } else {
                    self.tab.screen_len(line)
                };
                boxes.push(self.row_box(y, start, end));
            }
        }
        boxes
    }

    /// The selection as [`HighlightKind::UserSelection`] spans, one per selected line.
    pub fn selection_highlights(&self, document: &Document) -> Vec<Highlight> {
        if !self.got_highlight() {
            return Vec::new();
        }
        let (start, end) = self.selection();
        let mut spans = Vec::new();
        for y in start.y..=end.y.min(document.line_count() - 1) {
            let Ok(line) = document.line(y) else {
                break;
            };
            let from = if y == start.y { start.x } else { 0 };
            let to = if y == end.y { end.x } else { usize::MAX };
            let text: String = line
                .chars()
                .skip(from)
                .take(to.saturating_sub(from))
                .collect();
            let start_column = self.tab.file_to_screen_x(line, from);
            let end_column = if to == usize::MAX {
                self.tab.screen_len(line)
            } else {
                self.tab.file_to_screen_x(line, to)
            };
            spans.push(Highlight::new(
                y,
                start_column,
                end_column,
                text,
                HighlightKind::UserSelection,
            ));
        }
        spans
    }

    /// Selected text as segments: the tail of the first line, whole interior lines and the head
    /// of the last line. Joining with `'\n'` is left to the caller.
    pub fn get_selection_text(&self, document: &Document) -> Vec<String> {
        if !self.got_highlight() {
            return Vec::new();
        }
        let (start, end) = self.selection();
        document
            .text_between(start, end)
            .map(|text| text.split('\n').map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Selected text joined with `'\n'`.
    pub fn selection_text(&self, document: &Document) -> String {
        self.get_selection_text(document).join("\n")
    }

    /// Delete the selection, leaving the cursor at its start.
    pub fn delete_current_selection(&mut self, document: &mut Document) -> Result<(), DocumentError> {
        if !self.got_highlight() {
            return Ok(());
        }
        let (start, end) = self.selection();
        document.delete_selection(start, end)?;
        self.cursor = start;
        self.no_highlight();
        self.ensure_cursor_visible(document);
        Ok(())
    }

    /// Replace the selection (or insert at the cursor when nothing is selected) with `text`.
    ///
    /// The window is re-centered when the new cursor falls outside it.
    pub fn replace_current_selection(
        &mut self,
        document: &mut Document,
        text: &str,
    ) -> Result<Position, DocumentError> {
        let (start, end) = if self.got_highlight() {
            self.selection()
        } else {
            (self.cursor, self.cursor)
        };
        let pos = document.replace_text(start, end, text)?;
        self.cursor = pos;
        self.no_highlight();
        if !self.is_line_visible(pos.y) {
            self.show_start_y = pos.y.saturating_sub(self.show_length / 2);
            debug!("re-centered viewport on line {} (top {})", pos.y, self.show_start_y);
        }
        self.scroll_x_to_cursor(document);
        Ok(pos)
    }

    /// Type `text` at the cursor, replacing the selection if there is one.
    pub fn insert_text(&mut self, document: &mut Document, text: &str) -> Result<Position, DocumentError> {
        if self.got_highlight() {
            return self.replace_current_selection(document, text);
        }
        let pos = document.insert_text(self.cursor, text)?;
        self.cursor = pos;
        self.no_highlight();
        self.ensure_cursor_visible(document);
        Ok(pos)
    }

    /// Break the line at the cursor, starting the new line with `indent`.
    pub fn insert_new_line(
        &mut self,
        document: &mut Document,
        indent: &str,
    ) -> Result<Position, DocumentError> {
        self.delete_current_selection(document)?;
        let pos = document.insert_new_line(self.cursor, indent)?;
        self.cursor = pos;
        self.no_highlight();
        self.ensure_cursor_visible(document);
        Ok(pos)
    }

    /// Undo up to `n` commands and move the cursor to where the document says.
    pub fn undo(&mut self, document: &mut Document, n: usize) -> Result<Option<Position>, DocumentError> {
        let pos = document.undo(n)?;
        self.place_after_history(document, pos);
        Ok(pos)
    }

    /// Redo up to `n` commands and move the cursor to where the document says.
    pub fn redo(&mut self, document: &mut Document, n: usize) -> Result<Option<Position>, DocumentError> {
        let pos = document.redo(n)?;
        self.place_after_history(document, pos);
        Ok(pos)
    }

    fn place_after_history(&mut self, document: &Document, pos: Option<Position>) {
        if let Some(pos) = pos {
            self.cursor = pos;
            self.no_highlight();
            self.ensure_cursor_visible(document);
        }
    }

    /// Re-clamp cursor, selection and window after the document changed outside this viewport.
    ///
    /// A selection with an endpoint outside the document is dropped.
    pub fn verify_boundaries(&mut self, document: &Document) {
        let last = document.line_count() - 1;
        let cursor_y = self.cursor.y.min(last);
        self.cursor = Position::new(self.cursor.x.min(line_len(document, cursor_y)), cursor_y);

        let valid = |pos: Position| pos.y <= last && pos.x <= line_len(document, pos.y);
        if !valid(self.highlight_anchor) || !valid(self.highlight_extent) {
            self.no_highlight();
        }

        self.show_start_y = match self.lock_position {
            Some(lock) => lock.min(last),
            None => self.show_start_y.min(last),
        };
    }

    /// Adjust to edits made through another viewport, given in the order they were applied.
    ///
    /// Cursor and selection move with the text around them, so a split or join of this viewport's
    /// own line keeps the cursor on the same character. The window follows too unless locked.
    pub fn follow_edit(&mut self, document: &Document, changes: &[TextChange]) {
        for change in changes {
            self.cursor = change.map_position(self.cursor);
            self.highlight_anchor = change.map_position(self.highlight_anchor);
            self.highlight_extent = change.map_position(self.highlight_extent);
            if self.lock_position.is_none() {
                self.show_start_y = change.map_position(Position::new(0, self.show_start_y)).y;
            }
        }
        self.verify_boundaries(document);
    }

    /// Keep the last line of a tailing document in view, unless locked.
    pub fn follow_tail(&mut self, document: &Document) {
        if !document.is_tailing() || self.lock_position.is_some() {
            self.verify_boundaries(document);
            return;
        }
        let last = document.line_count() - 1;
        self.cursor = Position::new(0, last);
        self.no_highlight();
        if last >= self.show_start_y + self.show_length {
            self.show_start_y = last + 1 - self.show_length;
        }
    }

    /// Cursor location in presentation units relative to the window's top-left.
    pub fn get_cursor_coordinates(&self, document: &Document) -> (f32, f32) {
        let screen_x = document
            .line(self.cursor.y)
            .map_or(self.cursor.x, |line| self.tab.file_to_screen_x(line, self.cursor.x));
        (
            (screen_x as f32 - self.show_start_x as f32) * self.metrics.char_width,
            (self.cursor.y as f32 - self.show_start_y as f32) * self.metrics.line_height,
        )
    }

    /// Width of the window in presentation units.
    pub fn get_visible_width(&self) -> f32 {
        self.show_width as f32 * self.metrics.char_width
    }

    /// Height of the window in presentation units.
    pub fn get_visible_height(&self) -> f32 {
        self.show_length as f32 * self.metrics.line_height
    }

    fn row_box(&self, y: usize, start: usize, end: usize) -> HighlightBox {
        let start = start.max(self.show_start_x);
        let end = end.max(start);
        let width = if end == start {
            self.metrics.char_width / 2.0
        } else {
            (end - start) as f32 * self.metrics.char_width
        };
        HighlightBox {
            x: (start - self.show_start_x) as f32 * self.metrics.char_width,
            y: (y as f32 - self.show_start_y as f32) * self.metrics.line_height,
            width,
            height: self.metrics.line_height,
        }
    }

    fn vertical_column(&self, document: &Document, sticky: bool) -> usize {
        let len = line_len(document, self.cursor.y);
        if sticky { len } else { self.cursor.x.min(len) }
    }

    fn scroll_x_to_cursor(&mut self, document: &Document) {
        let screen_x = document
            .line(self.cursor.y)
            .map_or(self.cursor.x, |line| self.tab.file_to_screen_x(line, self.cursor.x));
        if screen_x < self.show_start_x {
            self.show_start_x = screen_x;
        } else if screen_x >= self.show_start_x + self.show_width {
            self.show_start_x = screen_x + 1 - self.show_width;
        }
    }
}

fn line_len(document: &Document, y: usize) -> usize {
    document.line_len(y).unwrap_or(0)
}

fn line_chars(document: &Document, y: usize) -> Vec<char> {
    document
        .line(y)
        .map(|line| line.chars().collect())
        .unwrap_or_default()
}

/// First word break after `from`.
fn next_break(chars: &[char], from: usize) -> Option<usize> {
    (from + 1..chars.len()).find(|&i| is_word_break(chars[i]))
}

/// Last word break before `before`.
fn previous_break(chars: &[char], before: usize) -> Option<usize> {
    (0..before).rev().find(|&i| is_word_break(chars[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> Document {
        Document::from_lines(lines.iter().copied())
    }

    fn viewport(rows: usize, cols: usize) -> Viewport {
        Viewport::new(ViewportConfig::with_size(rows, cols))
    }

    #[test]
    fn test_word_jump_right_scenario() {
        let doc = doc(&["foo bar", "baz"]);
        let mut view = viewport(10, 80);
        view.word_jump_cursor_right(&doc);
        assert_eq!(view.cursor(), Position::new(3, 0));
        view.word_jump_cursor_right(&doc);
        assert_eq!(view.cursor(), Position::new(4, 0));
        view.word_jump_cursor_right(&doc);
        assert_eq!(view.cursor(), Position::new(7, 0));
        view.word_jump_cursor_right(&doc);
        assert_eq!(view.cursor(), Position::new(0, 1));
    }

    #[test]
    fn test_word_jump_left_mirrors_right() {
        let doc = doc(&["x", "foo bar"]);
        let mut view = viewport(10, 80);
        view.set_cursor(&doc, Position::new(7, 1));
        view.word_jump_cursor_left(&doc);
        assert_eq!(view.cursor(), Position::new(4, 1));
        view.word_jump_cursor_left(&doc);
        assert_eq!(view.cursor(), Position::new(3, 1));
        view.word_jump_cursor_left(&doc);
        assert_eq!(view.cursor(), Position::new(0, 1));
        view.word_jump_cursor_left(&doc);
        assert_eq!(view.cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_vertical_sticky_vs_plain() {
        let doc = doc(&["a long line", "ab", "another long line"]);
        let mut view = viewport(10, 80);
        view.set_cursor(&doc, Position::new(6, 0));

        view.move_cursor_down(&doc, false);
        assert_eq!(view.cursor(), Position::new(2, 1));
        view.move_cursor_down(&doc, false);
        assert_eq!(view.cursor(), Position::new(2, 2));

        view.move_cursor_up(&doc, true);
        assert_eq!(view.cursor(), Position::new(2, 1));
        view.move_cursor_up(&doc, true);
        assert_eq!(view.cursor(), Position::new(11, 0));
    }

    #[test]
    fn test_single_line_selection_box() {
        let doc = doc(&["abcdef"]);
        let mut view = Viewport::new(ViewportConfig {
            metrics: ViewMetrics {
                char_width: 2.0,
                line_height: 3.0,
            },
            ..ViewportConfig::with_size(5, 40)
        });
        view.set_cursor(&doc, Position::new(4, 0));
        view.start_highlight();
        view.set_cursor(&doc, Position::new(1, 0));
        view.extend_highlight();

        let boxes = view.compute_highlight_boxes(&doc);
        assert_eq!(
            boxes,
            vec![HighlightBox {
                x: 2.0,
                y: 0.0,
                width: 6.0,
                height: 3.0
            }]
        );
    }

    #[test]
    fn test_no_selection_has_no_boxes() {
        let doc = doc(&["abc"]);
        let mut view = viewport(5, 40);
        view.start_highlight();
        assert!(!view.got_highlight());
        assert!(view.compute_highlight_boxes(&doc).is_empty());
    }

    #[test]
    fn test_tabs_widen_boxes() {
        let doc = doc(&["\tab"]);
        let mut view = viewport(5, 40);
        view.start_highlight();
        view.move_cursor_end(&doc);
        view.extend_highlight();
        let boxes = view.compute_highlight_boxes(&doc);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].width, 6.0);
    }

    #[test]
    fn test_verify_boundaries_after_truncation() {
        let mut big = doc(&["one", "two", "three", "four"]);
        let mut view = viewport(2, 40);
        view.set_cursor(&big, Position::new(2, 3));
        view.start_highlight();
        view.move_cursor_up(&big, false);
        view.extend_highlight();
        view.scroll_to(&big, 3);

        big.delete_selection(Position::new(3, 0), big.end_position())
            .unwrap();
        view.verify_boundaries(&big);
        assert_eq!(view.cursor(), Position::new(2, 0));
        assert!(!view.got_highlight());
        assert_eq!(view.show_start_y(), 0);
    }

    #[test]
    fn test_horizontal_scroll_follows_cursor() {
        let doc = doc(&["0123456789abcdef"]);
        let mut view = viewport(3, 4);
        view.move_cursor_end(&doc);
        assert_eq!(view.show_start_x(), 13);
        view.move_cursor_home();
        assert_eq!(view.show_start_x(), 0);
    }
}
