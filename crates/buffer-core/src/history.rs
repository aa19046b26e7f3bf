//! Reversible edit commands and the linear undo history.
//!
//! A command stores the text it removed and the text it inserted at a single start position, so
//! applying it forward or backward never needs to re-derive anything from a diff of the document.

use crate::position::Position;

/// Default maximum number of commands kept in the history.
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Which document operation produced a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// `insert_text`
    InsertText,
    /// `insert_new_line`
    InsertNewLine,
    /// `delete_selection`
    Delete,
    /// `replace_text`
    Replace,
}

/// A single reversible edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    /// The operation that recorded this command.
    pub kind: EditKind,
    /// Where the removed text started and the inserted text starts.
    pub start: Position,
    /// Text removed by the forward application (may contain `'\n'`).
    pub removed: String,
    /// Text inserted by the forward application (may contain `'\n'`).
    pub inserted: String,
}

impl EditCommand {
    /// End of the range this command removes when applied forward.
    pub fn removed_end(&self) -> Position {
        self.start.advanced_by(&self.removed)
    }

    /// End of the range this command occupies after being applied forward.
    pub fn inserted_end(&self) -> Position {
        self.start.advanced_by(&self.inserted)
    }
}

/// The effect of one applied edit on document coordinates: `[start, old_end)` was replaced by
/// text now occupying `[start, new_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChange {
    /// Where the replaced range starts.
    pub start: Position,
    /// End of the replaced range before the edit.
    pub old_end: Position,
    /// End of the inserted text after the edit.
    pub new_end: Position,
}

impl TextChange {
    /// Where `pos` ends up after this change.
    ///
    /// Positions before `start` stay put, positions inside the replaced range collapse to `start`,
    /// and positions at or after `old_end` move with the text that follows the edit (an insertion
    /// exactly at `pos` pushes it along).
    pub fn map_position(&self, pos: Position) -> Position {
        if pos < self.start {
            return pos;
        }
        if pos < self.old_end {
            return self.start;
        }
        if pos.y == self.old_end.y {
            Position::new(self.new_end.x + (pos.x - self.old_end.x), self.new_end.y)
        } else {
            Position::new(pos.x, pos.y - self.old_end.y + self.new_end.y)
        }
    }

    /// Lines added (positive) or removed (negative) by this change.
    pub fn line_delta(&self) -> isize {
        self.new_end.y as isize - self.old_end.y as isize
    }
}

/// Linear command stack with a movable position.
///
/// Commands in `[0, position)` are applied; commands in `[position, len)` are undone and can be
/// redone until the next push truncates them.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    commands: Vec<EditCommand>,
    position: usize,
    limit: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl UndoHistory {
    /// Create an empty history holding at most `limit` commands (`0` is treated as `1`).
    pub fn new(limit: usize) -> Self {
        Self {
            commands: Vec::new(),
            position: 0,
            limit: limit.max(1),
        }
    }

    /// Boundary between applied and undone commands.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of commands on the stack (applied and undone).
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if the stack holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns `true` if there is an applied command to undo.
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    /// Returns `true` if there is an undone command to redo.
    pub fn can_redo(&self) -> bool {
        self.position < self.commands.len()
    }

    /// Record a freshly applied command, discarding anything previously undone.
    pub fn push(&mut self, command: EditCommand) {
        self.commands.truncate(self.position);
        if self.commands.len() >= self.limit {
            self.commands.remove(0);
        }
        self.commands.push(command);
        self.position = self.commands.len();
    }

    /// Step back over the last applied command and return it.
    pub(crate) fn step_back(&mut self) -> Option<&EditCommand> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.commands.get(self.position)
    }

    /// Step forward over the next undone command and return it.
    pub(crate) fn step_forward(&mut self) -> Option<&EditCommand> {
        let command = self.commands.get(self.position)?;
        self.position += 1;
        Some(command)
    }

    /// All recorded commands, oldest first.
    pub fn commands(&self) -> &[EditCommand] {
        &self.commands
    }
}
