//! Boundary Tests for sheet2doc
//!
//! Each pipeline stage is driven to its failure edge with the in-memory
//! collaborators, and the side effects left behind are checked.

use sheet2doc::memory::{
    FixedSelection, MemoryDocumentStore, MemoryFolderStore, MemorySheet, RecordingAlerts,
    RecordingDisplay, ScriptedPrompt,
};
use sheet2doc::{
    Block, CellValue, DateFormat, ExporterBuilder, FileId, FolderError, FolderId, HeadingLevel,
    Host, PromptResponse, Selection, SelectionIssue, SheetToDocError,
};

/// 1回分の実行環境
struct Run {
    sheet: MemorySheet,
    selection: Selection,
    prompt: ScriptedPrompt,
    alerts: RecordingAlerts,
    folders: MemoryFolderStore,
    documents: MemoryDocumentStore,
    display: RecordingDisplay,
    spreadsheet: FileId,
}

impl Run {
    fn new(rows: Vec<Vec<CellValue>>, selection: Selection, response: PromptResponse) -> Self {
        let mut folders = MemoryFolderStore::new();
        let spreadsheet = folders.add_file("root", "survey");
        Self {
            sheet: MemorySheet::new(rows),
            selection,
            prompt: ScriptedPrompt::new(vec![response]),
            alerts: RecordingAlerts::default(),
            folders,
            documents: MemoryDocumentStore::new(),
            display: RecordingDisplay::default(),
            spreadsheet,
        }
    }

    fn survey(selection: Selection, response: PromptResponse) -> Self {
        Self::new(
            vec![
                vec!["Question".into(), "Answer".into()],
                vec!["Favorite color".into(), "Blue".into()],
            ],
            selection,
            response,
        )
    }

    fn execute(&mut self, builder: ExporterBuilder) -> Result<String, SheetToDocError> {
        let exporter = builder.build().unwrap();
        let mut host = Host {
            selection: &FixedSelection(self.selection),
            sheet: &self.sheet,
            prompt: &mut self.prompt,
            alerts: &mut self.alerts,
            folders: &mut self.folders,
            documents: &mut self.documents,
            display: &mut self.display,
        };
        exporter.run(&self.spreadsheet, &mut host)
    }

    fn export(&mut self) -> Result<String, SheetToDocError> {
        self.execute(ExporterBuilder::new())
    }

    fn last_alert(&self) -> &str {
        self.alerts.messages.last().map(String::as_str).unwrap_or("")
    }

    fn destination(&self) -> Vec<&sheet2doc::Folder> {
        self.folders.children(&FolderId("root".to_string()))
    }
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_single_row_single_cell_selection() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("Doc"));
    run.export().unwrap();

    // 選択幅に関係なく全列が書き出される
    assert_eq!(run.documents.documents()[0].blocks.len(), 4);
}

#[test]
fn test_multiple_rows_rejected_without_side_effects() {
    let mut run = Run::survey(Selection::new(2, 3, 2), PromptResponse::ok("Doc"));
    let result = run.export();

    match result {
        Err(SheetToDocError::SelectionInvalid(SelectionIssue::MultipleRows { rows })) => {
            assert_eq!(rows, 3)
        }
        other => panic!("Expected MultipleRows, got {:?}", other),
    }
    assert_eq!(run.last_alert(), "Selection: Please select only one row at a time.");
    assert!(run.prompt.shown.is_empty());
    assert!(run.destination().is_empty());
    assert!(run.documents.documents().is_empty());
    assert!(run.display.links.is_empty());
}

#[test]
fn test_empty_selection_rejected() {
    for selection in [Selection::new(2, 0, 1), Selection::new(2, 1, 0)] {
        let mut run = Run::survey(selection, PromptResponse::ok("Doc"));
        assert!(matches!(
            run.export(),
            Err(SheetToDocError::SelectionInvalid(SelectionIssue::NoRow))
        ));
        assert_eq!(run.last_alert(), "Selection: Please select a row.");
    }
}

#[test]
fn test_header_row_selection_is_transcribed() {
    // ヘッダー行自体を選んでも拒否しない
    let mut run = Run::survey(Selection::new(1, 1, 2), PromptResponse::ok("Doc"));
    run.export().unwrap();

    assert_eq!(
        run.documents.documents()[0].blocks,
        vec![
            Block::Heading("Question".to_string()),
            Block::Body("Question".to_string()),
            Block::Heading("Answer".to_string()),
            Block::Body("Answer".to_string()),
        ]
    );
}

// ============================================================================
// Reading
// ============================================================================

#[test]
fn test_unreadable_sheet_fails_on_selected_row() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("Doc"));
    run.sheet = run.sheet.clone().failing_reads();

    match run.export() {
        Err(SheetToDocError::Read { row, .. }) => assert_eq!(row, 2),
        other => panic!("Expected Read error, got {:?}", other),
    }
    assert!(run.last_alert().starts_with("Reading the selected row: "));
    assert!(run.prompt.shown.is_empty());
}

#[test]
fn test_empty_sheet_fails_before_prompt() {
    let mut run = Run::new(Vec::new(), Selection::new(1, 1, 1), PromptResponse::ok("Doc"));

    assert!(matches!(run.export(), Err(SheetToDocError::Read { .. })));
    assert!(run.prompt.shown.is_empty());
    assert!(run.documents.documents().is_empty());
}

#[test]
fn test_header_row_beyond_sheet_is_blank_headings() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("Doc"));
    run.execute(ExporterBuilder::new().with_header_row(9)).unwrap();

    assert_eq!(
        run.documents.documents()[0].blocks,
        vec![
            Block::Heading(String::new()),
            Block::Body("Favorite color".to_string()),
            Block::Heading(String::new()),
            Block::Body("Blue".to_string()),
        ]
    );
}

#[test]
fn test_ragged_rows_use_widest_row() {
    let mut run = Run::new(
        vec![
            vec!["A".into()],
            vec!["1".into(), "2".into(), "3".into()],
        ],
        Selection::new(2, 1, 1),
        PromptResponse::ok("Doc"),
    );
    run.export().unwrap();

    let texts: Vec<&str> = run.documents.documents()[0]
        .blocks
        .iter()
        .map(Block::text)
        .collect();
    assert_eq!(texts, vec!["A", "1", "", "2", "", "3"]);
}

// ============================================================================
// Filename prompt
// ============================================================================

#[test]
fn test_prompt_exits_create_nothing() {
    let cases = [
        (PromptResponse::cancel(), "Filename: Export cancelled."),
        (
            PromptResponse::close(),
            "Filename: The filename dialog was closed without a choice.",
        ),
        (PromptResponse::ok(""), "Filename: A filename is required."),
    ];

    for (response, alert) in cases {
        let mut run = Run::survey(Selection::new(2, 1, 1), response);
        assert!(run.export().is_err());
        assert_eq!(run.alerts.messages, vec![alert.to_string()]);
        assert!(run.destination().is_empty());
        assert_eq!(run.folders.created_count(), 0);
        assert!(run.documents.documents().is_empty());
        assert!(run.display.links.is_empty());
    }
}

#[test]
fn test_whitespace_filename_is_accepted_verbatim() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("   "));
    run.export().unwrap();
    assert_eq!(run.documents.documents()[0].title, "   ");
}

#[test]
fn test_prompt_shown_once_per_run() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("Doc"));
    run.export().unwrap();
    assert_eq!(run.prompt.shown, vec!["Name your document".to_string()]);
    assert_eq!(
        run.alerts.messages,
        vec!["The document will be named 'Doc'.".to_string()]
    );
}

// ============================================================================
// Destination folder
// ============================================================================

#[test]
fn test_spreadsheet_without_parent() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("Doc"));
    run.spreadsheet = FileId("detached".to_string());

    assert!(matches!(
        run.export(),
        Err(SheetToDocError::FolderResolution(FolderError::NoParent(_)))
    ));
    assert!(run.last_alert().starts_with("Destination folder: "));
    assert!(run.documents.documents().is_empty());
}

#[test]
fn test_repeated_runs_share_one_folder() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("First"));
    run.export().unwrap();
    run.prompt = ScriptedPrompt::new(vec![PromptResponse::ok("Second")]);
    run.export().unwrap();

    assert_eq!(run.folders.created_count(), 1);
    assert_eq!(run.destination().len(), 1);
    let documents = run.documents.documents();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].folder, documents[1].folder);
    assert_eq!(run.display.links.len(), 2);
}

#[test]
fn test_custom_folder_name() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("Doc"));
    run.execute(ExporterBuilder::new().with_folder_name("Exports"))
        .unwrap();
    let names: Vec<&str> = run.destination().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Exports"]);
}

// ============================================================================
// Document writing
// ============================================================================

#[test]
fn test_missing_value_leaves_partial_document() {
    let mut run = Run::new(
        vec![
            vec!["A".into(), "B".into(), "C".into()],
            vec!["1".into(), CellValue::Null, "3".into()],
        ],
        Selection::new(2, 1, 1),
        PromptResponse::ok("Partial"),
    );

    match run.export() {
        Err(SheetToDocError::MissingValue { index }) => assert_eq!(index, 1),
        other => panic!("Expected MissingValue, got {:?}", other),
    }
    assert_eq!(
        run.last_alert(),
        "Writing document: Missing value at column index 1"
    );

    // 巻き戻しはしない
    let doc = &run.documents.documents()[0];
    assert_eq!(
        doc.blocks,
        vec![
            Block::Heading("A".to_string()),
            Block::Body("1".to_string()),
            Block::Heading("B".to_string()),
        ]
    );
    assert!(!doc.committed);
    assert!(doc.folder.is_some());
    assert_eq!(run.folders.created_count(), 1);
    assert!(run.display.links.is_empty());
}

#[test]
fn test_missing_header_stops_before_heading() {
    let mut run = Run::new(
        vec![
            vec!["A".into(), CellValue::Null],
            vec!["1".into(), "2".into()],
        ],
        Selection::new(2, 1, 1),
        PromptResponse::ok("Doc"),
    );

    assert!(matches!(
        run.export(),
        Err(SheetToDocError::MissingHeader { index: 1 })
    ));
    assert_eq!(run.documents.documents()[0].blocks.len(), 2);
}

#[test]
fn test_store_failure_mid_write() {
    let mut run = Run::survey(Selection::new(2, 1, 1), PromptResponse::ok("Doc"));
    run.documents = MemoryDocumentStore::new().fail_after_appends(3);

    assert!(matches!(
        run.export(),
        Err(SheetToDocError::DocumentWrite(_))
    ));
    assert!(run.last_alert().starts_with("Writing document: "));
    assert_eq!(run.documents.documents()[0].blocks.len(), 3);
}

#[test]
fn test_value_kinds_are_normalized() {
    let mut run = Run::new(
        vec![
            vec![
                "Count".into(),
                "Ratio".into(),
                "Flag".into(),
                "Err".into(),
                "Blank".into(),
            ],
            vec![
                3.0.into(),
                0.25.into(),
                false.into(),
                CellValue::Error("#N/A".to_string()),
                CellValue::Empty,
            ],
        ],
        Selection::new(2, 1, 1),
        PromptResponse::ok("Kinds"),
    );
    run.export().unwrap();

    let bodies: Vec<&str> = run.documents.documents()[0]
        .blocks
        .iter()
        .filter(|b| matches!(b, Block::Body(_)))
        .map(Block::text)
        .collect();
    assert_eq!(bodies, vec!["3", "0.25", "false", "#N/A", ""]);
}

#[test]
fn test_numeric_headers_are_normalized() {
    let mut run = Run::new(
        vec![vec![2024.0.into()], vec!["x".into()]],
        Selection::new(2, 1, 1),
        PromptResponse::ok("Doc"),
    );
    run.execute(
        ExporterBuilder::new()
            .with_heading_level(HeadingLevel::H3)
            .with_date_format(DateFormat::Custom("%Y/%m/%d".to_string())),
    )
    .unwrap();
    assert_eq!(
        run.documents.documents()[0].blocks[0],
        Block::Heading("2024".to_string())
    );
}
