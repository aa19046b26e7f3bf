#![warn(missing_docs)]
//! Buffer Core - line-based text model and editing engine
//!
//! # Overview
//!
//! `buffer-core` holds the state behind a text editor window without drawing anything. A
//! [`Document`] stores text as lines and records every edit for undo/redo. A [`Viewport`] owns a
//! cursor, a selection and a scroll window over a document, and reports selection geometry in
//! presentation units. Highlighting is pluggable through the [`Highlighter`] trait; the
//! `buffer-core-cfamily` crate provides a C-family tokenizer and `buffer-core-diff` aligns two
//! documents for side-by-side display.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Workspace (documents, viewports, placement)│  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Viewport (cursor, selection, window)       │  ← Navigation
//! ├─────────────────────────────────────────────┤
//! │  Highlighter / HighlightIndex               │  ← Visual Enhancement
//! ├─────────────────────────────────────────────┤
//! │  Document + UndoHistory                     │  ← Text Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use buffer_core::{Document, Position, Viewport, ViewportConfig};
//!
//! let mut document = Document::from_text("int main() {\n}");
//! let mut viewport = Viewport::new(ViewportConfig::with_size(20, 80));
//!
//! viewport.set_cursor(&document, Position::new(12, 0));
//! viewport.insert_new_line(&mut document, "  ").unwrap();
//! viewport.insert_text(&mut document, "return 0;").unwrap();
//! assert_eq!(document.line(1).unwrap(), "  return 0;");
//!
//! viewport.undo(&mut document, 2).unwrap();
//! assert_eq!(document.text(), "int main() {\n}");
//! ```
//!
//! # Coordinates
//!
//! - File positions ([`Position`]) count characters in the raw line; a tab is one character.
//! - Screen positions ([`ScreenPosition`]) count characters after tab expansion
//!   ([`TabExpansion`]). Highlights and brace depths are keyed by screen positions.
//!
//! # Module Description
//!
//! - [`document`] - line storage and edit operations
//! - [`history`] - undo/redo command log
//! - [`highlight`] - highlight spans and brace depths
//! - [`processing`] - the [`Highlighter`] trait
//! - [`viewport`] - cursor, selection and scroll window
//! - [`workspace`] - documents, viewports and their placement

pub mod document;
pub mod error;
pub mod highlight;
pub mod history;
pub mod placement;
pub mod position;
pub mod processing;
pub mod tabs;
mod text;
pub mod viewport;
pub mod workspace;

pub use document::Document;
pub use error::{DocumentError, WorkspaceError};
pub use highlight::{
    Highlight, HighlightIndex, HighlightKind, STYLE_COMMENT, STYLE_DIFF_DELETED,
    STYLE_DIFF_INSERTED, STYLE_DIFF_PADDING, STYLE_KEYWORD, STYLE_PREPROCESSOR, STYLE_SELECTION,
    StyleId,
};
pub use history::{DEFAULT_HISTORY_LIMIT, EditCommand, EditKind, TextChange, UndoHistory};
pub use placement::{Direction, Placement};
pub use position::{HighlightBox, Position, ScreenPosition};
pub use processing::Highlighter;
pub use tabs::{DEFAULT_TAB_WIDTH, TabExpansion};
pub use viewport::{ViewMetrics, Viewport, ViewportConfig};
pub use workspace::{DocumentId, OpenDocumentResult, ViewportId, Workspace};
