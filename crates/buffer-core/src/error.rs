//! Error types for documents and workspaces.

use thiserror::Error;

/// Errors produced by [`Document`](crate::Document) operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// A line or column index outside the document.
    #[error("position out of range: line {line}, column {column}")]
    OutOfRange {
        /// Requested line index.
        line: usize,
        /// Requested column (file column).
        column: usize,
    },

    /// A mutation was attempted on a read-only or tailing document.
    #[error("document is read-only")]
    ReadOnly,

    /// The operation does not apply to the document's current mode.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Writing the document out failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by [`Workspace`](crate::Workspace) operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// A document id was not found.
    #[error("document not found: {0:?}")]
    DocumentNotFound(crate::DocumentId),

    /// A viewport id was not found.
    #[error("viewport not found: {0:?}")]
    ViewportNotFound(crate::ViewportId),

    /// Relative placements loop back to the viewport being resolved.
    #[error("placement cycle through viewport {0:?}")]
    PlacementCycle(crate::ViewportId),

    /// The underlying document rejected the operation.
    #[error(transparent)]
    Document(#[from] DocumentError),
}
