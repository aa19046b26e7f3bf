//! Per-line highlight spans and brace-depth bookkeeping.
//!
//! A [`HighlightIndex`] is owned by a highlighter (see [`Highlighter`](crate::Highlighter)) and
//! rebuilt in line ranges. Columns are screen columns (after tab expansion), half-open.

use std::collections::BTreeMap;
use std::ops::{Bound, Range};

use crate::position::ScreenPosition;

/// Semantic style identifier. The renderer maps these to colors.
pub type StyleId = u32;

/// Comment text (line comments and block comments).
pub const STYLE_COMMENT: StyleId = 0x0100_0001;
/// Language keyword.
pub const STYLE_KEYWORD: StyleId = 0x0100_0002;
/// Preprocessor directive line.
pub const STYLE_PREPROCESSOR: StyleId = 0x0100_0003;
/// User selection overlay.
pub const STYLE_SELECTION: StyleId = 0x0500_0001;
/// Diff row present only on the right-hand side.
pub const STYLE_DIFF_INSERTED: StyleId = 0x0600_0001;
/// Diff row present only on the left-hand side.
pub const STYLE_DIFF_DELETED: StyleId = 0x0600_0002;
/// Filler row in a diff alignment.
pub const STYLE_DIFF_PADDING: StyleId = 0x0600_0003;

/// What produced a highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// Line or block comment.
    Comment,
    /// Keyword from the language's keyword set.
    Keyword,
    /// Preprocessor directive.
    Preprocessor,
    /// The user's current selection.
    UserSelection,
    /// A changed row in a diff view.
    DiffMarker,
}

impl HighlightKind {
    /// Default style for this kind. Diff markers carry a more specific style of their own.
    pub fn default_style(self) -> StyleId {
        match self {
            HighlightKind::Comment => STYLE_COMMENT,
            HighlightKind::Keyword => STYLE_KEYWORD,
            HighlightKind::Preprocessor => STYLE_PREPROCESSOR,
            HighlightKind::UserSelection => STYLE_SELECTION,
            HighlightKind::DiffMarker => STYLE_DIFF_INSERTED,
        }
    }
}

/// A styled span on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Line index.
    pub line: usize,
    /// First screen column covered.
    pub start_column: usize,
    /// Screen column just past the span.
    pub end_column: usize,
    /// The matched text, for diagnostics.
    pub text: String,
    /// What produced the span.
    pub kind: HighlightKind,
    /// Semantic style.
    pub style_id: StyleId,
}

impl Highlight {
    /// Create a highlight with the kind's default style.
    pub fn new(
        line: usize,
        start_column: usize,
        end_column: usize,
        text: impl Into<String>,
        kind: HighlightKind,
    ) -> Self {
        Self {
            line,
            start_column,
            end_column,
            text: text.into(),
            kind,
            style_id: kind.default_style(),
        }
    }

    /// Override the style.
    pub fn with_style(mut self, style_id: StyleId) -> Self {
        self.style_id = style_id;
        self
    }

    /// Number of screen columns covered.
    pub fn width(&self) -> usize {
        self.end_column.saturating_sub(self.start_column)
    }

    /// Check if the span covers screen column `column`.
    pub fn contains(&self, column: usize) -> bool {
        self.start_column <= column && column < self.end_column
    }
}

/// Highlights keyed by line plus inferred brace depths keyed by brace position.
///
/// Insertion order within a line is preserved internally; queries return spans sorted by start
/// column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightIndex {
    lines: BTreeMap<usize, Vec<Highlight>>,
    brace_depths: BTreeMap<ScreenPosition, usize>,
}

impl HighlightIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a highlight.
    pub fn push(&mut self, highlight: Highlight) {
        self.lines.entry(highlight.line).or_default().push(highlight);
    }

    /// Remove every highlight and brace depth.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.brace_depths.clear();
    }

    /// Remove highlights and brace depths on lines in `range`.
    pub fn clear_lines(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let doomed: Vec<usize> = self.lines.range(range.clone()).map(|(line, _)| *line).collect();
        for line in doomed {
            self.lines.remove(&line);
        }
        let lo = ScreenPosition::new(0, range.start);
        let hi = ScreenPosition::new(0, range.end);
        let doomed: Vec<ScreenPosition> = self
            .brace_depths
            .range(lo..hi)
            .map(|(pos, _)| *pos)
            .collect();
        for pos in doomed {
            self.brace_depths.remove(&pos);
        }
    }

    /// Remove highlights and brace depths on `line` and every line after it.
    pub fn clear_from(&mut self, line: usize) {
        self.lines.split_off(&line);
        self.brace_depths.split_off(&ScreenPosition::new(0, line));
    }

    /// Highlights on `line`, sorted by start column.
    pub fn line(&self, line: usize) -> Vec<&Highlight> {
        let mut spans: Vec<&Highlight> = self
            .lines
            .get(&line)
            .map(|spans| spans.iter().collect())
            .unwrap_or_default();
        spans.sort_by_key(|h| (h.start_column, h.end_column));
        spans
    }

    /// Highlights on lines `[start_line, end_line)`, sorted by line then start column.
    pub fn range(&self, start_line: usize, end_line: usize) -> Vec<&Highlight> {
        if start_line >= end_line {
            return Vec::new();
        }
        let mut spans: Vec<&Highlight> = self
            .lines
            .range(start_line..end_line)
            .flat_map(|(_, spans)| spans.iter())
            .collect();
        spans.sort_by_key(|h| (h.line, h.start_column, h.end_column));
        spans
    }

    /// Total number of highlights.
    pub fn len(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    /// Returns `true` if there are no highlights.
    pub fn is_empty(&self) -> bool {
        self.lines.values().all(Vec::is_empty)
    }

    /// Recorded depth for the brace at `pos`.
    pub fn brace_depth(&self, pos: ScreenPosition) -> Option<usize> {
        self.brace_depths.get(&pos).copied()
    }

    /// Record the depth for the brace at `pos`.
    pub fn set_brace_depth(&mut self, pos: ScreenPosition, depth: usize) {
        self.brace_depths.insert(pos, depth);
    }

    /// Depth of the last brace strictly before `pos` (0 if none).
    pub fn depth_before(&self, pos: ScreenPosition) -> usize {
        self.brace_depths
            .range((Bound::Unbounded, Bound::Excluded(pos)))
            .next_back()
            .map_or(0, |(_, depth)| *depth)
    }

    /// Number of recorded brace depths.
    pub fn brace_count(&self) -> usize {
        self.brace_depths.len()
    }

    /// Indent whitespace for a new line started at `pos`: one space per unit of depth of the last
    /// brace before `pos`.
    pub fn indent_at(&self, pos: ScreenPosition) -> String {
        " ".repeat(self.depth_before(pos))
    }
}
