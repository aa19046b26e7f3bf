#![warn(missing_docs)]
//! `buffer-core-diff` - padded line alignment of two documents.
//!
//! [`DiffAligner`] compares a left and a right [`Document`] line by line and lays the result out
//! as two equally long row sequences. Row `i` on the left and row `i` on the right always stand
//! for the same spot in the merged view, so two viewports can scroll in lockstep. Where one side
//! has no counterpart line it gets a [`RowKind::Padding`] row.
//!
//! ```rust
//! use buffer_core::Document;
//! use buffer_core_diff::{DiffAligner, RowKind, Side};
//!
//! let left = Document::from_text("a\nb\nc");
//! let right = Document::from_text("a\nx\nb\nc");
//!
//! let mut aligner = DiffAligner::new();
//! aligner.set_documents(&left, &right);
//! assert!(aligner.process());
//! assert_eq!(aligner.max_diff_length(), 4);
//!
//! let (l, r) = aligner.row(1).unwrap();
//! assert_eq!((l.kind, r.kind), (RowKind::Padding, RowKind::Inserted));
//! assert_eq!(aligner.diff_position_to_original_line(Side::Left, 1), Some(0));
//! ```

use buffer_core::{
    Document, Highlight, HighlightKind, STYLE_DIFF_DELETED, STYLE_DIFF_INSERTED, TabExpansion,
};
use log::{debug, warn};
use similar::{Algorithm, DiffOp, capture_diff_slices};

/// Classification of one side of an aligned row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// Present on both sides with the same content.
    Unchanged,
    /// Present only on the right.
    Inserted,
    /// Present only on the left.
    Deleted,
    /// Filler facing a line that exists only on the other side.
    Padding,
}

/// One side of an aligned row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiffRow {
    /// Classification.
    pub kind: RowKind,
    /// Source line on this side, `None` for padding.
    pub line: Option<usize>,
}

impl DiffRow {
    fn source(kind: RowKind, line: usize) -> Self {
        Self {
            kind,
            line: Some(line),
        }
    }

    fn padding() -> Self {
        Self {
            kind: RowKind::Padding,
            line: None,
        }
    }

    /// Returns `true` for padding rows.
    pub fn is_padding(&self) -> bool {
        self.kind == RowKind::Padding
    }
}

/// Which document of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The original document.
    Left,
    /// The changed document.
    Right,
}

/// Two equally long row sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffAlignment {
    left: Vec<DiffRow>,
    right: Vec<DiffRow>,
}

impl DiffAlignment {
    fn push(&mut self, left: DiffRow, right: DiffRow) {
        debug_assert!(!(left.is_padding() && right.is_padding()));
        self.left.push(left);
        self.right.push(right);
    }

    fn identity(len: usize) -> Self {
        let mut alignment = Self::default();
        for line in 0..len {
            alignment.push(
                DiffRow::source(RowKind::Unchanged, line),
                DiffRow::source(RowKind::Unchanged, line),
            );
        }
        alignment
    }

    /// Number of aligned rows.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Rows of one side.
    pub fn rows(&self, side: Side) -> &[DiffRow] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// The `(left, right)` pair at `index`.
    pub fn row(&self, index: usize) -> Option<(DiffRow, DiffRow)> {
        Some((*self.left.get(index)?, *self.right.get(index)?))
    }

    /// Returns `true` if any row is not unchanged on both sides.
    pub fn has_diffs(&self) -> bool {
        self.left
            .iter()
            .chain(self.right.iter())
            .any(|row| row.kind != RowKind::Unchanged)
    }

    /// Number of rows of `kind` on `side`.
    pub fn count(&self, side: Side, kind: RowKind) -> usize {
        self.rows(side).iter().filter(|row| row.kind == kind).count()
    }
}

/// Computes and queries the alignment of a left and a right document.
///
/// Line content is copied on [`set_documents`](Self::set_documents); edits made afterwards do not
/// affect the alignment until the documents are set again.
#[derive(Debug, Clone, Default)]
pub struct DiffAligner {
    left: Vec<String>,
    right: Vec<String>,
    loaded: bool,
    same_document: bool,
    tab: TabExpansion,
    alignment: Option<DiffAlignment>,
}

impl DiffAligner {
    /// Create an aligner with no documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aligner whose highlight columns use `tab` expansion.
    pub fn with_tab(tab: TabExpansion) -> Self {
        Self {
            tab,
            ..Self::default()
        }
    }

    /// Snapshot the two documents to compare. Any previous alignment is dropped.
    pub fn set_documents(&mut self, left: &Document, right: &Document) {
        self.same_document = std::ptr::eq(left, right);
        self.left = left.lines().map(str::to_string).collect();
        self.right = right.lines().map(str::to_string).collect();
        self.loaded = true;
        self.alignment = None;
    }

    /// Compute the alignment. Returns `false` when there are no differences.
    ///
    /// Aligning a document with itself is reported as no differences; the alignment then pairs
    /// every line with itself.
    pub fn process(&mut self) -> bool {
        if !self.loaded {
            debug!("diff requested before documents were set");
            return false;
        }
        if self.same_document {
            warn!("diff of a document against itself, reporting no differences");
            self.alignment = Some(DiffAlignment::identity(self.left.len()));
            return false;
        }

        let ops = capture_diff_slices(Algorithm::Lcs, &self.left, &self.right);
        let mut alignment = DiffAlignment::default();
        let mut deleted = Vec::new();
        let mut inserted = Vec::new();
        for op in ops {
            match op {
                DiffOp::Equal {
                    old_index,
                    new_index,
                    len,
                } => {
                    flush_changes(&mut alignment, &mut deleted, &mut inserted);
                    for k in 0..len {
                        alignment.push(
                            DiffRow::source(RowKind::Unchanged, old_index + k),
                            DiffRow::source(RowKind::Unchanged, new_index + k),
                        );
                    }
                }
                DiffOp::Delete {
                    old_index, old_len, ..
                } => deleted.extend(old_index..old_index + old_len),
                DiffOp::Insert {
                    new_index, new_len, ..
                } => inserted.extend(new_index..new_index + new_len),
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => {
                    deleted.extend(old_index..old_index + old_len);
                    inserted.extend(new_index..new_index + new_len);
                }
            }
        }
        flush_changes(&mut alignment, &mut deleted, &mut inserted);

        let has_diffs = alignment.has_diffs();
        debug!(
            "diff of {} vs {} lines: {} rows, {} deleted, {} inserted",
            self.left.len(),
            self.right.len(),
            alignment.len(),
            alignment.count(Side::Left, RowKind::Deleted),
            alignment.count(Side::Right, RowKind::Inserted)
        );
        self.alignment = Some(alignment);
        has_diffs
    }

    /// Drop the documents and the alignment.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
        self.loaded = false;
        self.same_document = false;
        self.alignment = None;
    }

    /// The last computed alignment.
    pub fn alignment(&self) -> Option<&DiffAlignment> {
        self.alignment.as_ref()
    }

    /// Returns `true` if the last computed alignment contains a change.
    pub fn has_diffs(&self) -> bool {
        self.alignment.as_ref().is_some_and(DiffAlignment::has_diffs)
    }

    /// Number of aligned rows (0 before [`process`](Self::process)).
    pub fn max_diff_length(&self) -> usize {
        self.alignment.as_ref().map_or(0, DiffAlignment::len)
    }

    /// The `(left, right)` rows at diff position `index`.
    pub fn row(&self, index: usize) -> Option<(DiffRow, DiffRow)> {
        self.alignment.as_ref()?.row(index)
    }

    /// Diff position showing source `line` of `side`, for entering diff mode at a cursor line.
    pub fn original_line_to_diff_position(&self, side: Side, line: usize) -> Option<usize> {
        self.alignment
            .as_ref()?
            .rows(side)
            .iter()
            .position(|row| row.line == Some(line))
    }

    /// Source line of `side` to restore when leaving diff mode at diff position `index`.
    ///
    /// Padding rows are skipped backwards to the nearest real line; if only padding precedes
    /// `index`, the first real line after it is used. Positions past the end are clamped.
    pub fn diff_position_to_original_line(&self, side: Side, index: usize) -> Option<usize> {
        let rows = self.alignment.as_ref()?.rows(side);
        let last = rows.len().checked_sub(1)?;
        let index = index.min(last);
        rows[..=index]
            .iter()
            .rev()
            .find_map(|row| row.line)
            .or_else(|| rows[index..].iter().find_map(|row| row.line))
    }

    /// Source text at diff position `index` on `side` (`None` for padding).
    pub fn line_text(&self, side: Side, index: usize) -> Option<&str> {
        let row = self.alignment.as_ref()?.rows(side).get(index)?;
        let lines = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        lines.get(row.line?).map(String::as_str)
    }

    /// Full-row markers for changed rows on `side`, keyed by diff position.
    pub fn diff_highlights(&self, side: Side) -> Vec<Highlight> {
        let Some(alignment) = &self.alignment else {
            return Vec::new();
        };
        alignment
            .rows(side)
            .iter()
            .enumerate()
            .filter_map(|(index, row)| {
                let style = match row.kind {
                    RowKind::Inserted => STYLE_DIFF_INSERTED,
                    RowKind::Deleted => STYLE_DIFF_DELETED,
                    RowKind::Unchanged | RowKind::Padding => return None,
                };
                let text = self.line_text(side, index).unwrap_or_default();
                let width = self.tab.screen_len(text).max(1);
                Some(
                    Highlight::new(index, 0, width, text, HighlightKind::DiffMarker)
                        .with_style(style),
                )
            })
            .collect()
    }
}

/// Lay out a run of deleted lines facing a run of inserted lines; the longer run's surplus faces
/// padding.
fn flush_changes(alignment: &mut DiffAlignment, deleted: &mut Vec<usize>, inserted: &mut Vec<usize>) {
    for k in 0..deleted.len().max(inserted.len()) {
        let left = deleted
            .get(k)
            .map_or_else(DiffRow::padding, |&line| DiffRow::source(RowKind::Deleted, line));
        let right = inserted
            .get(k)
            .map_or_else(DiffRow::padding, |&line| DiffRow::source(RowKind::Inserted, line));
        alignment.push(left, right);
    }
    deleted.clear();
    inserted.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(aligner: &DiffAligner, side: Side) -> Vec<RowKind> {
        aligner
            .alignment()
            .unwrap()
            .rows(side)
            .iter()
            .map(|row| row.kind)
            .collect()
    }

    #[test]
    fn test_replace_block_pads_shorter_side() {
        let left = Document::from_text("a\nb\nc\nz");
        let right = Document::from_text("a\nx\nz");
        let mut aligner = DiffAligner::new();
        aligner.set_documents(&left, &right);
        assert!(aligner.process());

        use RowKind::*;
        assert_eq!(kinds(&aligner, Side::Left), vec![Unchanged, Deleted, Deleted, Unchanged]);
        assert_eq!(kinds(&aligner, Side::Right), vec![Unchanged, Inserted, Padding, Unchanged]);
    }

    #[test]
    fn test_self_diff_reports_no_differences() {
        let document = Document::from_text("one\ntwo");
        let mut aligner = DiffAligner::new();
        aligner.set_documents(&document, &document);
        assert!(!aligner.process());
        assert!(!aligner.has_diffs());
        assert_eq!(aligner.max_diff_length(), 2);
    }

    #[test]
    fn test_process_without_documents() {
        let mut aligner = DiffAligner::new();
        assert!(!aligner.process());
        assert_eq!(aligner.max_diff_length(), 0);
        assert_eq!(aligner.diff_position_to_original_line(Side::Left, 0), None);
    }

    #[test]
    fn test_snapshot_ignores_later_edits() {
        let left = Document::from_text("a\nb");
        let mut right = Document::from_text("a\nb");
        let mut aligner = DiffAligner::new();
        aligner.set_documents(&left, &right);
        right
            .insert_text(buffer_core::Position::new(1, 1), "!")
            .unwrap();
        assert!(!aligner.process());
    }

    #[test]
    fn test_clear() {
        let left = Document::from_text("a");
        let right = Document::from_text("b");
        let mut aligner = DiffAligner::new();
        aligner.set_documents(&left, &right);
        assert!(aligner.process());
        aligner.clear();
        assert!(aligner.alignment().is_none());
        assert!(!aligner.process());
    }
}
