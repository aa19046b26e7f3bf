use buffer_core::{
    Direction, Document, DocumentError, OpenDocumentResult, Placement, Position, ViewportConfig,
    Workspace, WorkspaceError,
};

fn numbered(count: usize) -> Document {
    Document::from_lines((0..count).map(|i| format!("line {i}")))
}

#[test]
fn test_edit_shifts_sibling_viewports() {
    let mut ws = Workspace::new();
    let OpenDocumentResult {
        document_id: doc,
        viewport_id: editor,
    } = ws
        .open_document(numbered(10), ViewportConfig::with_size(4, 80), Placement::default())
        .unwrap();
    let watcher = ws
        .create_viewport(doc, ViewportConfig::with_size(4, 80), Placement::default())
        .unwrap();
    assert_eq!(ws.viewports_of(doc), vec![editor, watcher]);

    ws.navigate(watcher, |view, document| {
        view.set_cursor(document, Position::new(2, 8));
    })
    .unwrap();

    ws.edit(editor, |view, document| {
        view.set_cursor(document, Position::new(0, 2));
        view.start_highlight();
        view.set_cursor(document, Position::new(0, 5));
        view.extend_highlight();
        view.delete_current_selection(document)
    })
    .unwrap();

    let document = ws.document(doc).unwrap();
    assert_eq!(document.line_count(), 7);
    let watcher_view = ws.viewport(watcher).unwrap();
    assert_eq!(watcher_view.cursor(), Position::new(2, 5));
    assert_eq!(document.line(5).unwrap(), "line 8");
    assert!(watcher_view.is_line_visible(5));
}

#[test]
fn test_sibling_cursor_follows_split_of_its_own_line() {
    let mut ws = Workspace::new();
    let opened = ws
        .open_document(
            Document::from_lines(["abc", "def"]),
            ViewportConfig::default(),
            Placement::default(),
        )
        .unwrap();
    let watcher = ws
        .create_viewport(opened.document_id, ViewportConfig::default(), Placement::default())
        .unwrap();
    ws.navigate(watcher, |view, document| {
        view.set_cursor(document, Position::new(3, 0));
        view.start_highlight();
        view.set_cursor(document, Position::new(1, 1));
        view.extend_highlight();
    })
    .unwrap();

    ws.edit(opened.viewport_id, |view, document| {
        view.set_cursor(document, Position::new(1, 0));
        view.insert_new_line(document, "")
    })
    .unwrap();

    let document = ws.document(opened.document_id).unwrap();
    assert_eq!(document.lines().collect::<Vec<_>>(), vec!["a", "bc", "def"]);
    let view = ws.viewport(watcher).unwrap();
    assert_eq!(view.cursor(), Position::new(1, 2));
    assert_eq!(view.highlight_anchor(), Position::new(2, 1));
    assert_eq!(view.selection_text(document), "\nd");
}

#[test]
fn test_sibling_cursor_follows_join_and_its_undo() {
    let mut ws = Workspace::new();
    let opened = ws
        .open_document(
            Document::from_lines(["abc", "def"]),
            ViewportConfig::default(),
            Placement::default(),
        )
        .unwrap();
    let editor = opened.viewport_id;
    let watcher = ws
        .create_viewport(opened.document_id, ViewportConfig::default(), Placement::default())
        .unwrap();
    ws.navigate(watcher, |view, document| {
        view.set_cursor(document, Position::new(1, 1))
    })
    .unwrap();

    ws.edit(editor, |view, document| {
        view.set_cursor(document, Position::new(3, 0));
        view.start_highlight();
        view.set_cursor(document, Position::new(0, 1));
        view.extend_highlight();
        view.delete_current_selection(document)
    })
    .unwrap();
    assert_eq!(ws.document(opened.document_id).unwrap().text(), "abcdef");
    assert_eq!(ws.viewport(watcher).unwrap().cursor(), Position::new(4, 0));

    ws.edit(editor, |view, document| view.undo(document, 1))
        .unwrap();
    assert_eq!(ws.document(opened.document_id).unwrap().text(), "abc\ndef");
    assert_eq!(ws.viewport(watcher).unwrap().cursor(), Position::new(1, 1));
}

#[test]
fn test_locked_viewport_keeps_its_window() {
    let mut ws = Workspace::new();
    let opened = ws
        .open_document(numbered(30), ViewportConfig::with_size(5, 80), Placement::default())
        .unwrap();
    let pinned = ws
        .create_viewport(
            opened.document_id,
            ViewportConfig::with_size(5, 80),
            Placement::default(),
        )
        .unwrap();
    ws.navigate(pinned, |view, _| view.lock(20)).unwrap();

    ws.edit(opened.viewport_id, |view, document| {
        view.insert_text(document, "a\nb\nc\n")
    })
    .unwrap();

    let view = ws.viewport(pinned).unwrap();
    assert!(view.is_locked());
    assert_eq!(view.show_start_y(), 20);
}

#[test]
fn test_failed_edit_leaves_siblings_alone() {
    let mut ws = Workspace::new();
    let opened = ws
        .open_document(numbered(5), ViewportConfig::default(), Placement::default())
        .unwrap();
    let other = ws
        .create_viewport(opened.document_id, ViewportConfig::default(), Placement::default())
        .unwrap();
    ws.navigate(other, |view, document| {
        view.set_cursor(document, Position::new(1, 4))
    })
    .unwrap();

    let err = ws
        .edit(opened.viewport_id, |_, document| {
            document.insert_text(Position::new(0, 99), "x")
        })
        .unwrap_err();
    assert!(matches!(
        err,
        WorkspaceError::Document(DocumentError::OutOfRange { line: 99, .. })
    ));
    assert_eq!(ws.viewport(other).unwrap().cursor(), Position::new(1, 4));
}

#[test]
fn test_tailing_document_follows_appends() {
    let mut ws = Workspace::new();
    let mut log = Document::new();
    log.set_tailing(true);
    let opened = ws
        .open_document(log, ViewportConfig::with_size(3, 80), Placement::default())
        .unwrap();

    for i in 0..5 {
        ws.append_line(opened.document_id, format!("entry {i}")).unwrap();
    }

    let document = ws.document(opened.document_id).unwrap();
    assert_eq!(document.line_count(), 5);
    assert_eq!(document.line(0).unwrap(), "entry 0");
    assert!(!document.is_modified());
    let view = ws.viewport(opened.viewport_id).unwrap();
    assert_eq!(view.cursor(), Position::new(0, 4));
    assert_eq!(view.show_start_y(), 2);

    let err = ws
        .edit(opened.viewport_id, |view, document| view.insert_text(document, "x"))
        .unwrap_err();
    assert!(matches!(err, WorkspaceError::Document(DocumentError::ReadOnly)));
}

#[test]
fn test_append_requires_tailing() {
    let mut ws = Workspace::new();
    let opened = ws
        .open_document(Document::new(), ViewportConfig::default(), Placement::default())
        .unwrap();
    let err = ws.append_line(opened.document_id, "x").unwrap_err();
    assert!(matches!(
        err,
        WorkspaceError::Document(DocumentError::InvalidState(_))
    ));
}

#[test]
fn test_relative_placement_chain() {
    let mut ws = Workspace::new();
    let opened = ws
        .open_document(
            numbered(3),
            ViewportConfig::with_size(10, 40),
            Placement::Origin { x: 10.0, y: 20.0 },
        )
        .unwrap();
    let a = opened.viewport_id;
    let b = ws
        .create_viewport(
            opened.document_id,
            ViewportConfig::with_size(10, 40),
            Placement::Relative {
                of: a,
                direction: Direction::Right,
                gap: 2.0,
            },
        )
        .unwrap();
    let c = ws
        .create_viewport(
            opened.document_id,
            ViewportConfig::with_size(6, 40),
            Placement::relative(b, Direction::Below),
        )
        .unwrap();

    assert_eq!(ws.resolve_origin(a).unwrap(), (10.0, 20.0));
    assert_eq!(ws.resolve_origin(b).unwrap(), (52.0, 20.0));
    assert_eq!(ws.resolve_origin(c).unwrap(), (52.0, 30.0));

    // Moving the root moves the whole chain.
    ws.set_placement(a, Placement::Origin { x: 0.0, y: 0.0 }).unwrap();
    assert_eq!(ws.resolve_origin(c).unwrap(), (42.0, 10.0));

    // Closing the middle viewport pins its dependent where it was.
    ws.close_viewport(b).unwrap();
    assert_eq!(ws.placement(c).unwrap(), Placement::Origin { x: 42.0, y: 0.0 });
    assert_eq!(ws.resolve_origin(c).unwrap(), (42.0, 0.0));
}

#[test]
fn test_unknown_ids_are_reported() {
    let mut ws = Workspace::new();
    let opened = ws
        .open_document(Document::new(), ViewportConfig::default(), Placement::default())
        .unwrap();
    ws.close_document(opened.document_id).unwrap();

    assert!(matches!(
        ws.document(opened.document_id),
        Err(WorkspaceError::DocumentNotFound(_))
    ));
    assert!(matches!(
        ws.create_viewport(opened.document_id, ViewportConfig::default(), Placement::default()),
        Err(WorkspaceError::DocumentNotFound(_))
    ));
    assert!(matches!(
        ws.edit(opened.viewport_id, |_, _| Ok(())),
        Err(WorkspaceError::ViewportNotFound(_))
    ));
}
