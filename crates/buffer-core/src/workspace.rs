//! Documents and the viewports looking at them.
//!
//! A [`Workspace`] owns every open [`Document`] and [`Viewport`], addressed by opaque ids.
//! Edits are made through a viewport with [`Workspace::edit`]; afterwards every other viewport
//! of the same document follows the text its cursor and selection sit on (and, unless locked,
//! moves its window along).

use std::collections::{BTreeMap, HashSet};

use log::debug;

use crate::document::Document;
use crate::error::{DocumentError, WorkspaceError};
use crate::history::TextChange;
use crate::placement::{Placement, offset_origin};
use crate::viewport::{Viewport, ViewportConfig};

/// Opaque identifier for an open document in a [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identifier for a viewport in a [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewportId(u64);

impl ViewportId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Result of opening a document (a document always starts with one viewport).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenDocumentResult {
    /// The created document id.
    pub document_id: DocumentId,
    /// The initial viewport id.
    pub viewport_id: ViewportId,
}

#[derive(Debug)]
struct ViewportEntry {
    document: DocumentId,
    viewport: Viewport,
    placement: Placement,
}

/// A collection of open documents and their viewports.
#[derive(Debug, Default)]
pub struct Workspace {
    next_document_id: u64,
    documents: BTreeMap<DocumentId, Document>,
    next_viewport_id: u64,
    viewports: BTreeMap<ViewportId, ViewportEntry>,
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if no document is open.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of viewports.
    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }

    /// Add a document and create its first viewport.
    pub fn open_document(
        &mut self,
        document: Document,
        config: ViewportConfig,
        placement: Placement,
    ) -> Result<OpenDocumentResult, WorkspaceError> {
        let document_id = DocumentId(self.next_document_id);
        self.next_document_id = self.next_document_id.saturating_add(1);
        self.documents.insert(document_id, document);
        let viewport_id = self.create_viewport(document_id, config, placement)?;
        Ok(OpenDocumentResult {
            document_id,
            viewport_id,
        })
    }

    /// Create another viewport onto an open document.
    pub fn create_viewport(
        &mut self,
        document: DocumentId,
        config: ViewportConfig,
        placement: Placement,
    ) -> Result<ViewportId, WorkspaceError> {
        if !self.documents.contains_key(&document) {
            return Err(WorkspaceError::DocumentNotFound(document));
        }
        let id = ViewportId(self.next_viewport_id);
        self.next_viewport_id = self.next_viewport_id.saturating_add(1);
        self.viewports.insert(
            id,
            ViewportEntry {
                document,
                viewport: Viewport::new(config),
                placement,
            },
        );
        Ok(id)
    }

    /// Close a viewport. The document stays open even without viewports.
    ///
    /// Viewports placed relative to the closed one take over its resolved origin (or `(0, 0)` if
    /// the closed viewport sat on a placement cycle).
    pub fn close_viewport(&mut self, id: ViewportId) -> Result<(), WorkspaceError> {
        if !self.viewports.contains_key(&id) {
            return Err(WorkspaceError::ViewportNotFound(id));
        }
        let origin = match self.resolve_origin(id) {
            Ok(origin) => origin,
            Err(err) => {
                debug!("closing {:?} with unresolved placement: {}", id, err);
                (0.0, 0.0)
            }
        };
        self.viewports.remove(&id);
        for entry in self.viewports.values_mut() {
            if entry.placement.reference() == Some(id) {
                entry.placement = Placement::Origin {
                    x: origin.0,
                    y: origin.1,
                };
            }
        }
        Ok(())
    }

    /// Close a document and all of its viewports, returning the document.
    pub fn close_document(&mut self, id: DocumentId) -> Result<Document, WorkspaceError> {
        let doomed: Vec<ViewportId> = self
            .viewports
            .iter()
            .filter(|(_, entry)| entry.document == id)
            .map(|(vid, _)| *vid)
            .collect();
        for vid in doomed {
            self.close_viewport(vid)?;
        }
        self.documents
            .remove(&id)
            .ok_or(WorkspaceError::DocumentNotFound(id))
    }

    /// Borrow a document.
    pub fn document(&self, id: DocumentId) -> Result<&Document, WorkspaceError> {
        self.documents
            .get(&id)
            .ok_or(WorkspaceError::DocumentNotFound(id))
    }

    /// Borrow a viewport.
    pub fn viewport(&self, id: ViewportId) -> Result<&Viewport, WorkspaceError> {
        self.viewports
            .get(&id)
            .map(|entry| &entry.viewport)
            .ok_or(WorkspaceError::ViewportNotFound(id))
    }

    /// Document a viewport is looking at.
    pub fn document_for_viewport(&self, id: ViewportId) -> Result<DocumentId, WorkspaceError> {
        self.viewports
            .get(&id)
            .map(|entry| entry.document)
            .ok_or(WorkspaceError::ViewportNotFound(id))
    }

    /// Viewports looking at `document`.
    pub fn viewports_of(&self, document: DocumentId) -> Vec<ViewportId> {
        self.viewports
            .iter()
            .filter(|(_, entry)| entry.document == document)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Run `f` against a viewport without modifying its document (navigation, selection).
    pub fn navigate<T>(
        &mut self,
        id: ViewportId,
        f: impl FnOnce(&mut Viewport, &Document) -> T,
    ) -> Result<T, WorkspaceError> {
        let entry = self
            .viewports
            .get_mut(&id)
            .ok_or(WorkspaceError::ViewportNotFound(id))?;
        let document = self
            .documents
            .get(&entry.document)
            .ok_or(WorkspaceError::DocumentNotFound(entry.document))?;
        Ok(f(&mut entry.viewport, document))
    }

    /// Run an editing closure against a viewport and its document, then make every other
    /// viewport of that document follow each change the closure applied (including undo/redo).
    pub fn edit<T>(
        &mut self,
        id: ViewportId,
        f: impl FnOnce(&mut Viewport, &mut Document) -> Result<T, DocumentError>,
    ) -> Result<T, WorkspaceError> {
        let entry = self
            .viewports
            .get_mut(&id)
            .ok_or(WorkspaceError::ViewportNotFound(id))?;
        let document_id = entry.document;
        let document = self
            .documents
            .get_mut(&document_id)
            .ok_or(WorkspaceError::DocumentNotFound(document_id))?;

        document.start_recording();
        let result = f(&mut entry.viewport, document);
        let changes = document.finish_recording();

        // Changes applied before a failing step are followed too.
        if !changes.is_empty() {
            debug!(
                "edit through {:?}: {} change(s), first at {:?}, line delta {}",
                id,
                changes.len(),
                changes[0].start,
                changes.iter().map(TextChange::line_delta).sum::<isize>()
            );
            for (other_id, other) in self.viewports.iter_mut() {
                if *other_id == id || other.document != document_id {
                    continue;
                }
                other.viewport.follow_edit(document, &changes);
            }
        }
        result.map_err(WorkspaceError::Document)
    }

    /// Append a line to a tailing document and let its viewports follow the tail.
    pub fn append_line(
        &mut self,
        id: DocumentId,
        line: impl Into<String>,
    ) -> Result<(), WorkspaceError> {
        let document = self
            .documents
            .get_mut(&id)
            .ok_or(WorkspaceError::DocumentNotFound(id))?;
        document.append_line(line)?;
        for entry in self.viewports.values_mut() {
            if entry.document == id {
                entry.viewport.follow_tail(document);
            }
        }
        Ok(())
    }

    /// Placement of a viewport.
    pub fn placement(&self, id: ViewportId) -> Result<Placement, WorkspaceError> {
        self.viewports
            .get(&id)
            .map(|entry| entry.placement)
            .ok_or(WorkspaceError::ViewportNotFound(id))
    }

    /// Change the placement of a viewport. Cycles are only detected when resolving.
    pub fn set_placement(
        &mut self,
        id: ViewportId,
        placement: Placement,
    ) -> Result<(), WorkspaceError> {
        let entry = self
            .viewports
            .get_mut(&id)
            .ok_or(WorkspaceError::ViewportNotFound(id))?;
        entry.placement = placement;
        Ok(())
    }

    /// Resolve the top-left origin of a viewport by walking its placement chain.
    pub fn resolve_origin(&self, id: ViewportId) -> Result<(f32, f32), WorkspaceError> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = id;
        let base = loop {
            if !seen.insert(current) {
                return Err(WorkspaceError::PlacementCycle(current));
            }
            let entry = self
                .viewports
                .get(&current)
                .ok_or(WorkspaceError::ViewportNotFound(current))?;
            match entry.placement {
                Placement::Origin { x, y } => break (x, y),
                Placement::Relative { of, .. } => {
                    chain.push(current);
                    current = of;
                }
            }
        };

        let mut origin = base;
        let mut reference = current;
        for placed in chain.into_iter().rev() {
            let entry = &self.viewports[&placed];
            let Placement::Relative { direction, gap, .. } = entry.placement else {
                continue;
            };
            let reference_view = &self.viewports[&reference].viewport;
            origin = offset_origin(
                origin,
                (
                    reference_view.get_visible_width(),
                    reference_view.get_visible_height(),
                ),
                (
                    entry.viewport.get_visible_width(),
                    entry.viewport.get_visible_height(),
                ),
                direction,
                gap,
            );
            reference = placed;
        }
        Ok(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Direction;
    use crate::position::Position;

    #[test]
    fn test_open_and_close() {
        let mut workspace = Workspace::new();
        let opened = workspace
            .open_document(
                Document::from_text("a\nb"),
                ViewportConfig::default(),
                Placement::default(),
            )
            .unwrap();
        assert_eq!(workspace.len(), 1);
        assert_eq!(workspace.viewport_count(), 1);

        let doc = workspace.close_document(opened.document_id).unwrap();
        assert_eq!(doc.line_count(), 2);
        assert!(workspace.is_empty());
        assert_eq!(workspace.viewport_count(), 0);
        assert!(matches!(
            workspace.viewport(opened.viewport_id),
            Err(WorkspaceError::ViewportNotFound(_))
        ));
    }

    #[test]
    fn test_placement_cycle_is_reported() {
        let mut workspace = Workspace::new();
        let opened = workspace
            .open_document(Document::new(), ViewportConfig::default(), Placement::default())
            .unwrap();
        let a = opened.viewport_id;
        let b = workspace
            .create_viewport(
                opened.document_id,
                ViewportConfig::default(),
                Placement::relative(a, Direction::Right),
            )
            .unwrap();
        workspace
            .set_placement(a, Placement::relative(b, Direction::Left))
            .unwrap();
        assert!(matches!(
            workspace.resolve_origin(b),
            Err(WorkspaceError::PlacementCycle(_))
        ));

        // Closing one end of the cycle breaks it.
        workspace.close_viewport(a).unwrap();
        assert_eq!(
            workspace.placement(b).unwrap(),
            Placement::Origin { x: 0.0, y: 0.0 }
        );
        assert_eq!(workspace.resolve_origin(b).unwrap(), (0.0, 0.0));
    }

    #[test]
    fn test_sibling_viewport_follows_inserted_lines() {
        let mut workspace = Workspace::new();
        let text = (0..10).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let opened = workspace
            .open_document(
                Document::from_text(&text),
                ViewportConfig::with_size(4, 20),
                Placement::default(),
            )
            .unwrap();
        let editor = opened.viewport_id;
        let watcher = workspace
            .create_viewport(
                opened.document_id,
                ViewportConfig::with_size(4, 20),
                Placement::relative(editor, Direction::Below),
            )
            .unwrap();
        workspace
            .navigate(watcher, |viewport, document| {
                viewport.set_cursor(document, Position::new(2, 8));
            })
            .unwrap();

        workspace
            .edit(editor, |viewport, document| {
                viewport.set_cursor(document, Position::new(0, 1));
                viewport.insert_text(document, "a\nb\n")
            })
            .unwrap();

        let watcher_view = workspace.viewport(watcher).unwrap();
        assert_eq!(watcher_view.cursor(), Position::new(2, 10));
        assert_eq!(workspace.resolve_origin(watcher).unwrap(), (0.0, 4.0));
    }
}
