//! sheet2doc - Transcribe a selected spreadsheet row into a document
//!
//! スプレッドシートで選択された1行を、ヘッダー行と組み合わせて
//! 「見出し・本文」を交互に並べたドキュメントに書き出すクレートです。
//!
//! UI、スプレッドシート、フォルダ、ドキュメントの各ストレージは
//! [`services`]のトレイトとして注入されます。ローカル環境向けの実装として
//! calamineベースの[`WorkbookSheet`]、ディレクトリベースの[`LocalFolderStore`]、
//! Markdown/HTMLファイルを書き出す[`LocalDocumentStore`]を提供します。
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sheet2doc::memory::{FixedSelection, RecordingAlerts, RecordingDisplay, ScriptedPrompt};
//! use sheet2doc::{
//!     ExporterBuilder, Host, LocalDocumentStore, LocalFolderStore, OutputFormat,
//!     PromptResponse, Selection, SheetSelector, WorkbookSheet,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exporter = ExporterBuilder::new().build()?;
//!     let sheet = WorkbookSheet::open_path("survey.xlsx", &SheetSelector::First)?;
//!     let mut folders = LocalFolderStore::new();
//!     let mut documents = LocalDocumentStore::new(".", OutputFormat::Markdown);
//!
//!     let mut host = Host {
//!         selection: &FixedSelection(Selection::new(2, 1, 1)),
//!         sheet: &sheet,
//!         prompt: &mut ScriptedPrompt::new(vec![PromptResponse::ok("Row 2")]),
//!         alerts: &mut RecordingAlerts::default(),
//!         folders: &mut folders,
//!         documents: &mut documents,
//!         display: &mut RecordingDisplay::default(),
//!     };
//!
//!     let url = exporter.run(&LocalFolderStore::file_id("survey.xlsx"), &mut host)?;
//!     println!("{}", url);
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod folder;
mod formatter;
mod local;
pub mod memory;
mod output;
mod parser;
mod prompt;
mod reader;
mod security;
mod selection;
pub mod services;
mod types;
mod writer;

// 公開API
pub use api::{DateFormat, HeadingLevel, OutputFormat, SheetSelector};
pub use builder::{ExportConfig, Exporter, ExporterBuilder, Stage, DEFAULT_FOLDER_NAME};
pub use error::{FolderError, SelectionIssue, ServiceError, SheetToDocError};
pub use formatter::ValueNormalizer;
pub use local::{LocalDocumentStore, LocalFolderStore};
pub use output::render_blocks;
pub use parser::WorkbookSheet;
pub use selection::validate_selection;
pub use services::Host;
pub use types::{
    Block, CellValue, DocumentId, FileId, Folder, FolderId, PromptButton, PromptResponse,
    Selection,
};
pub use writer::pair_blocks;
