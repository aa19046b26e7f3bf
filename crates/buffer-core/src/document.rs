//! The mutable line-oriented document.
//!
//! All content changes go through reversible [`EditCommand`]s recorded in an [`UndoHistory`].
//! Mutators validate positions up front and never clamp; read-only and tailing documents reject
//! edits before a command is built.

use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::error::DocumentError;
use crate::history::{EditCommand, EditKind, TextChange, UndoHistory};
use crate::position::{Position, ordered};
use crate::text::split_lines_preserve_trailing;

/// A line-oriented text document with undo/redo history.
///
/// # Example
///
/// ```rust
/// use buffer_core::{Document, Position};
///
/// let mut doc = Document::from_text("fn main() {\n}");
/// let end = doc.insert_text(Position::new(11, 0), " // entry").unwrap();
/// assert_eq!(end, Position::new(20, 0));
/// assert_eq!(doc.line(0).unwrap(), "fn main() { // entry");
///
/// doc.undo(1).unwrap();
/// assert_eq!(doc.line(0).unwrap(), "fn main() {");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<String>,
    file_path: Option<PathBuf>,
    read_only: bool,
    tailing: bool,
    modified: bool,
    history: UndoHistory,
    revision: u64,
    dirty_from: Option<usize>,
    recorded: Option<Vec<TextChange>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding a single empty line.
    pub fn new() -> Self {
        Self::from_lines(Vec::<String>::new())
    }

    /// Create a document from initial line content (no trailing newlines stored).
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            file_path: None,
            read_only: false,
            tailing: false,
            modified: false,
            history: UndoHistory::default(),
            revision: 0,
            dirty_from: Some(0),
            recorded: None,
        }
    }

    /// Create a document by splitting `text` on `'\n'` (a preceding `'\r'` is dropped).
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(split_lines_preserve_trailing(text))
    }

    /// Replace the undo history with an empty one capped at `limit` commands.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = UndoHistory::new(limit);
        self
    }

    /// Associate the document with a path on disk.
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content of line `y`.
    pub fn line(&self, y: usize) -> Result<&str, DocumentError> {
        self.lines
            .get(y)
            .map(String::as_str)
            .ok_or(DocumentError::OutOfRange { line: y, column: 0 })
    }

    /// Length of line `y` in characters, or `None` past the end.
    pub fn line_len(&self, y: usize) -> Option<usize> {
        self.lines.get(y).map(|line| line.chars().count())
    }

    /// All lines in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Full text, lines joined with `'\n'`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Position just past the last character of the document.
    pub fn end_position(&self) -> Position {
        let y = self.lines.len() - 1;
        Position::new(self.lines[y].chars().count(), y)
    }

    /// Path the document was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Set or clear the document's path.
    pub fn set_file_path(&mut self, path: Option<PathBuf>) {
        self.file_path = path;
    }

    /// Whether content changed since creation or the last save.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Whether edits are rejected.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Allow or reject edits.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Whether the document is in append-only tailing mode.
    pub fn is_tailing(&self) -> bool {
        self.tailing
    }

    /// Enter or leave tailing mode. A tailing document rejects edits but accepts
    /// [`append_line`](Self::append_line).
    pub fn set_tailing(&mut self, tailing: bool) {
        self.tailing = tailing;
    }

    /// Counter bumped by every content change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Boundary between applied and undone commands.
    pub fn undo_position(&self) -> usize {
        self.history.position()
    }

    /// Number of commands on the undo stack (applied and undone).
    pub fn command_stack_len(&self) -> usize {
        self.history.len()
    }

    /// Returns `true` if [`undo`](Self::undo) would change anything.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if [`redo`](Self::redo) would change anything.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The undo history.
    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// Smallest line touched since the last [`take_dirty_from`](Self::take_dirty_from).
    pub fn dirty_from(&self) -> Option<usize> {
        self.dirty_from
    }

    /// Take the smallest line touched since the last call, resetting it.
    ///
    /// Highlighters use this to rescan only the suffix of the document that may have changed.
    pub fn take_dirty_from(&mut self) -> Option<usize> {
        self.dirty_from.take()
    }

    /// Insert `text` at `pos`, splitting it on embedded newlines.
    ///
    /// Returns the position immediately after the inserted text.
    pub fn insert_text(&mut self, pos: Position, text: &str) -> Result<Position, DocumentError> {
        self.ensure_editable()?;
        self.check_position(pos)?;
        let text = normalize_newlines(text);
        self.apply_new(EditCommand {
            kind: EditKind::InsertText,
            start: pos,
            removed: String::new(),
            inserted: text,
        })
    }

    /// Split the line at `pos`, starting the new line with `indent`.
    ///
    /// Returns the position at the start of the new line's content (after the indent).
    pub fn insert_new_line(&mut self, pos: Position, indent: &str) -> Result<Position, DocumentError> {
        self.ensure_editable()?;
        self.check_position(pos)?;
        let mut inserted = String::with_capacity(indent.len() + 1);
        inserted.push('\n');
        inserted.push_str(indent);
        self.apply_new(EditCommand {
            kind: EditKind::InsertNewLine,
            start: pos,
            removed: String::new(),
            inserted,
        })
    }

    /// Delete the half-open range between `a` and `b`, in either order.
    ///
    /// Deleting an empty range is a no-op and records nothing.
    pub fn delete_selection(&mut self, a: Position, b: Position) -> Result<(), DocumentError> {
        self.ensure_editable()?;
        self.check_position(a)?;
        self.check_position(b)?;
        if a == b {
            return Ok(());
        }
        let (start, end) = ordered(a, b);
        let removed = self.slice_between(start, end);
        self.apply_new(EditCommand {
            kind: EditKind::Delete,
            start,
            removed,
            inserted: String::new(),
        })?;
        Ok(())
    }

    /// Replace the range between `a` and `b` with `text` as a single undoable command.
    ///
    /// Returns the position immediately after the inserted text.
    pub fn replace_text(
        &mut self,
        a: Position,
        b: Position,
        text: &str,
    ) -> Result<Position, DocumentError> {
        self.ensure_editable()?;
        self.check_position(a)?;
        self.check_position(b)?;
        let (start, end) = ordered(a, b);
        let removed = self.slice_between(start, end);
        self.apply_new(EditCommand {
            kind: EditKind::Replace,
            start,
            removed,
            inserted: normalize_newlines(text),
        })
    }

    /// Undo up to `n` commands.
    ///
    /// Returns the cursor position implied by the last command undone (just after the text it
    /// restored), or `None` when there was nothing to undo.
    pub fn undo(&mut self, n: usize) -> Result<Option<Position>, DocumentError> {
        self.ensure_editable()?;
        let mut cursor = None;
        for _ in 0..n {
            let Some(command) = self.history.step_back().cloned() else {
                break;
            };
            self.splice(command.start, command.inserted_end(), &command.removed);
            cursor = Some(command.removed_end());
        }
        match cursor {
            Some(pos) => {
                debug!(
                    "undo: position {} of {}, cursor {:?}",
                    self.history.position(),
                    self.history.len(),
                    pos
                );
                self.modified = true;
            }
            None => debug!("undo: nothing to undo"),
        }
        Ok(cursor)
    }

    /// Redo up to `n` commands.
    ///
    /// Returns the cursor position the last redone command originally returned, or `None` when
    /// there was nothing to redo.
    pub fn redo(&mut self, n: usize) -> Result<Option<Position>, DocumentError> {
        self.ensure_editable()?;
        let mut cursor = None;
        for _ in 0..n {
            let Some(command) = self.history.step_forward().cloned() else {
                break;
            };
            cursor = Some(self.splice(command.start, command.removed_end(), &command.inserted));
        }
        match cursor {
            Some(pos) => {
                debug!(
                    "redo: position {} of {}, cursor {:?}",
                    self.history.position(),
                    self.history.len(),
                    pos
                );
                self.modified = true;
            }
            None => debug!("redo: nothing to redo"),
        }
        Ok(cursor)
    }

    /// Append a line to a tailing document. Not recorded in the undo history.
    pub fn append_line(&mut self, line: impl Into<String>) -> Result<(), DocumentError> {
        if !self.tailing {
            return Err(DocumentError::InvalidState(
                "append_line requires a tailing document",
            ));
        }
        let line = line.into();
        let last = self.lines.len() - 1;
        if self.lines.len() == 1 && self.lines[0].is_empty() {
            self.lines[0] = line;
        } else {
            self.lines.push(line);
        }
        self.touch(last);
        Ok(())
    }

    /// Write the document to `sink` (lines joined with `'\n'`) and clear the modified flag.
    pub fn save<W: Write>(&mut self, sink: &mut W) -> Result<(), DocumentError> {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                sink.write_all(b"\n")?;
            }
            sink.write_all(line.as_bytes())?;
        }
        sink.flush()?;
        self.mark_saved();
        Ok(())
    }

    /// Clear the modified flag after the host persisted the content itself.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    /// Text in the half-open range between `a` and `b`, in either order.
    pub fn text_between(&self, a: Position, b: Position) -> Result<String, DocumentError> {
        self.check_position(a)?;
        self.check_position(b)?;
        let (start, end) = ordered(a, b);
        Ok(self.slice_between(start, end))
    }

    /// Text in `[start, end)`; both positions must already be checked and ordered.
    fn slice_between(&self, start: Position, end: Position) -> String {
        if start.y == end.y {
            return char_slice(&self.lines[start.y], start.x, end.x).to_string();
        }
        let mut out = String::new();
        out.push_str(char_slice(&self.lines[start.y], start.x, usize::MAX));
        for line in &self.lines[start.y + 1..end.y] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(char_slice(&self.lines[end.y], 0, end.x));
        out
    }

    fn ensure_editable(&self) -> Result<(), DocumentError> {
        if self.read_only || self.tailing {
            return Err(DocumentError::ReadOnly);
        }
        Ok(())
    }

    fn check_position(&self, pos: Position) -> Result<(), DocumentError> {
        match self.line_len(pos.y) {
            Some(len) if pos.x <= len => Ok(()),
            _ => Err(DocumentError::OutOfRange {
                line: pos.y,
                column: pos.x,
            }),
        }
    }

    fn apply_new(&mut self, command: EditCommand) -> Result<Position, DocumentError> {
        let end = self.splice(command.start, command.removed_end(), &command.inserted);
        trace!(
            "{:?} at {:?}: removed {} chars, inserted {} chars",
            command.kind,
            command.start,
            command.removed.chars().count(),
            command.inserted.chars().count()
        );
        self.history.push(command);
        self.modified = true;
        Ok(end)
    }

    /// Replace `[start, end)` with `text` and return the position after the inserted text.
    fn splice(&mut self, start: Position, end: Position, text: &str) -> Position {
        let head = char_slice(&self.lines[start.y], 0, start.x).to_string();
        let tail = char_slice(&self.lines[end.y], end.x, usize::MAX).to_string();

        let mut pieces: Vec<String> = text.split('\n').map(str::to_string).collect();
        let last = pieces.len() - 1;
        let new_end = start.advanced_by(text);
        pieces[0].insert_str(0, &head);
        pieces[last].push_str(&tail);

        self.lines.splice(start.y..=end.y, pieces).for_each(drop);
        self.touch(start.y);
        if let Some(changes) = &mut self.recorded {
            changes.push(TextChange {
                start,
                old_end: end,
                new_end,
            });
        }
        new_end
    }

    fn touch(&mut self, line: usize) {
        self.revision = self.revision.wrapping_add(1);
        self.dirty_from = Some(self.dirty_from.map_or(line, |d| d.min(line)));
    }

    /// Start collecting a [`TextChange`] for every splice (edits, undo and redo).
    pub(crate) fn start_recording(&mut self) {
        self.recorded = Some(Vec::new());
    }

    /// Stop collecting and return the changes applied since [`start_recording`](Self::start_recording),
    /// oldest first.
    pub(crate) fn finish_recording(&mut self) -> Vec<TextChange> {
        self.recorded.take().unwrap_or_default()
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n")
}

/// Slice `line` by character columns `[from, to)`, clamping both to the line.
fn char_slice(line: &str, from: usize, to: usize) -> &str {
    let byte_at = |column: usize| {
        line.char_indices()
            .nth(column)
            .map_or(line.len(), |(byte, _)| byte)
    };
    let start = byte_at(from);
    let end = if to == usize::MAX { line.len() } else { byte_at(to) };
    &line[start..end.max(start)]
}
