//! CLI Tool Example
//!
//! This example transcribes one row of a local workbook into a Markdown or
//! HTML document. The destination folder is created next to the workbook.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example cli_tool -- survey.xlsx --row 2
//! cargo run --example cli_tool -- survey.xlsx --row 2 --sheet Answers --html
//! RUST_LOG=sheet2doc=debug cargo run --example cli_tool -- survey.xlsx --row 2
//! ```
//!
//! The filename is read from stdin. An empty line is rejected, `cancel`
//! aborts, and end of input counts as closing the dialog.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use sheet2doc::memory::FixedSelection;
use sheet2doc::services::{AlertService, PromptService, ResultDisplay};
use sheet2doc::{
    ExporterBuilder, Host, HeadingLevel, LocalDocumentStore, LocalFolderStore, OutputFormat,
    PromptResponse, Selection, SheetSelector, WorkbookSheet, DEFAULT_FOLDER_NAME,
};

#[derive(Parser, Debug)]
#[command(name = "cli_tool")]
#[command(about = "Transcribe a spreadsheet row into a heading/paragraph document")]
struct Args {
    /// Workbook to read (xlsx, xls, xlsb, ods)
    workbook: PathBuf,

    /// Selected row (1-based)
    #[arg(long)]
    row: u32,

    /// Number of selected rows
    #[arg(long, default_value_t = 1)]
    rows: u32,

    /// Number of selected columns
    #[arg(long, default_value_t = 1)]
    columns: u32,

    /// Sheet name (defaults to the first sheet)
    #[arg(long)]
    sheet: Option<String>,

    /// Where new documents are created before they are moved
    #[arg(long, default_value = ".")]
    output_root: PathBuf,

    /// Destination folder name
    #[arg(long, default_value = DEFAULT_FOLDER_NAME)]
    folder: String,

    /// Heading depth (1-6)
    #[arg(long, default_value_t = 2)]
    heading_level: u8,

    /// Write HTML instead of Markdown
    #[arg(long)]
    html: bool,
}

/// stdinから1行読み取る入力ダイアログ
struct StdinPrompt;

impl PromptService for StdinPrompt {
    fn prompt_text(&mut self, title: &str, placeholder: &str) -> PromptResponse {
        eprint!("{}\n{} ", title, placeholder);
        let _ = io::stderr().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => PromptResponse::close(),
            Ok(_) => {
                let text = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
                if text == "cancel" {
                    PromptResponse::cancel()
                } else {
                    PromptResponse::ok(text)
                }
            }
        }
    }
}

struct StderrAlerts;

impl AlertService for StderrAlerts {
    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

struct StdoutDisplay;

impl ResultDisplay for StdoutDisplay {
    fn show_link(&mut self, url: &str) {
        println!("Document ready: {}", url);
    }
}

fn heading_level(depth: u8) -> Option<HeadingLevel> {
    Some(match depth {
        1 => HeadingLevel::H1,
        2 => HeadingLevel::H2,
        3 => HeadingLevel::H3,
        4 => HeadingLevel::H4,
        5 => HeadingLevel::H5,
        6 => HeadingLevel::H6,
        _ => return None,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let Some(level) = heading_level(args.heading_level) else {
        eprintln!("Error: --heading-level must be between 1 and 6");
        process::exit(1);
    };

    let exporter = match ExporterBuilder::new()
        .with_folder_name(args.folder.clone())
        .with_heading_level(level)
        .build()
    {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let selector = match args.sheet {
        Some(ref name) => SheetSelector::Name(name.clone()),
        None => SheetSelector::First,
    };
    let sheet = match WorkbookSheet::open_path(&args.workbook, &selector) {
        Ok(sheet) => sheet,
        Err(e) => {
            eprintln!("Error: Could not open '{}'", args.workbook.display());
            eprintln!("  {}", e);
            process::exit(1);
        }
    };

    let format = if args.html {
        OutputFormat::Html
    } else {
        OutputFormat::Markdown
    };
    let mut folders = LocalFolderStore::new();
    let mut documents = LocalDocumentStore::new(&args.output_root, format);

    let mut host = Host {
        selection: &FixedSelection(Selection::new(args.row, args.rows, args.columns)),
        sheet: &sheet,
        prompt: &mut StdinPrompt,
        alerts: &mut StderrAlerts,
        folders: &mut folders,
        documents: &mut documents,
        display: &mut StdoutDisplay,
    };

    // 失敗はアラートとして表示済み
    if exporter
        .run(&LocalFolderStore::file_id(&args.workbook), &mut host)
        .is_err()
    {
        process::exit(1);
    }
}
