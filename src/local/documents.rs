//! Markdown/HTMLファイルをドキュメントとして扱うドキュメントストア。
//!
//! 追記は即座にファイルへ書き込まれるため、途中で失敗してもそれまでの内容は残ります。

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::api::{HeadingLevel, OutputFormat};
use crate::error::ServiceError;
use crate::output::OutputFormatter;
use crate::security::{sanitize_file_stem, SecurityConfig};
use crate::services::DocumentStore;
use crate::types::{DocumentId, Folder};

/// 同名ファイルが存在する場合に試す連番の上限
const MAX_NAME_SUFFIX: u32 = 10_000;

#[derive(Debug)]
struct LocalDocument {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    blocks_written: usize,
}

/// ローカルファイルシステムのドキュメントストア
#[derive(Debug)]
pub struct LocalDocumentStore {
    /// 新規ドキュメントを作成するディレクトリ
    root: PathBuf,
    format: OutputFormat,
    security: SecurityConfig,
    documents: HashMap<DocumentId, LocalDocument>,
    next_id: usize,
}

impl LocalDocumentStore {
    /// `root`に新規ドキュメントを作成するストアを生成
    pub fn new(root: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            root: root.into(),
            format,
            security: SecurityConfig::default(),
            documents: HashMap::new(),
            next_id: 0,
        }
    }

    /// ドキュメントの現在のパス
    pub fn path_of(&self, doc: &DocumentId) -> Option<&Path> {
        self.documents.get(doc).map(|d| d.path.as_path())
    }

    fn get_mut(&mut self, doc: &DocumentId) -> Result<&mut LocalDocument, ServiceError> {
        self.documents
            .get_mut(doc)
            .ok_or_else(|| ServiceError::NotFound(doc.to_string()))
    }

    /// ブロックを1つ追記する（書き込みは`render`に委ねる）
    fn append<F>(&mut self, doc: &DocumentId, render: F) -> Result<(), ServiceError>
    where
        F: FnOnce(OutputFormatter, &mut BufWriter<File>, bool) -> std::io::Result<()>,
    {
        let formatter = OutputFormatter::from_format(self.format);
        let document = self.get_mut(doc)?;

        if document.writer.is_none() {
            let file = OpenOptions::new().append(true).open(&document.path)?;
            document.writer = Some(BufWriter::new(file));
        }
        if let Some(writer) = document.writer.as_mut() {
            render(formatter, writer, document.blocks_written == 0)?;
        }
        document.blocks_written += 1;
        Ok(())
    }
}

/// `dir`内で使われていないファイルパスを探す（`name.ext`, `name (2).ext`, ...）
fn unused_path(dir: &Path, stem: &str, extension: &str) -> Result<PathBuf, ServiceError> {
    let first = dir.join(format!("{}.{}", stem, extension));
    if !first.exists() {
        return Ok(first);
    }
    for n in 2..=MAX_NAME_SUFFIX {
        let candidate = dir.join(format!("{} ({}).{}", stem, n, extension));
        if !candidate.exists() {
            return Ok(candidate);
        }
    }
    Err(ServiceError::Message(format!(
        "too many documents named '{}' in {}",
        stem,
        dir.display()
    )))
}

impl DocumentStore for LocalDocumentStore {
    fn create_document(&mut self, title: &str) -> Result<DocumentId, ServiceError> {
        let stem = sanitize_file_stem(title, &self.security);
        let path = unused_path(&self.root, &stem, self.format.extension())?;
        OpenOptions::new().write(true).create_new(true).open(&path)?;

        self.next_id += 1;
        let id = DocumentId(format!("local-{}", self.next_id));
        debug!(doc = %id, path = %path.display(), "created local document");
        self.documents.insert(
            id.clone(),
            LocalDocument {
                path,
                writer: None,
                blocks_written: 0,
            },
        );
        Ok(id)
    }

    fn move_to(&mut self, doc: &DocumentId, folder: &Folder) -> Result<(), ServiceError> {
        let document = self.get_mut(doc)?;
        if let Some(mut writer) = document.writer.take() {
            writer.flush()?;
        }

        let file_name = document
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| ServiceError::Message("document has no file name".to_string()))?;
        let extension = document
            .path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = unused_path(Path::new(&folder.id.0), &file_name, &extension)?;

        fs::rename(&document.path, &target)?;
        debug!(doc = %doc, path = %target.display(), "moved local document");
        document.path = target;
        Ok(())
    }

    fn append_heading(
        &mut self,
        doc: &DocumentId,
        text: &str,
        level: HeadingLevel,
    ) -> Result<(), ServiceError> {
        self.append(doc, |formatter, writer, first| {
            formatter.render_heading(writer, text, level, first)
        })
    }

    fn append_paragraph(&mut self, doc: &DocumentId, text: &str) -> Result<(), ServiceError> {
        self.append(doc, |formatter, writer, first| {
            formatter.render_body(writer, text, first)
        })
    }

    fn commit(&mut self, doc: &DocumentId) -> Result<(), ServiceError> {
        let document = self.get_mut(doc)?;
        if let Some(writer) = document.writer.take() {
            let file = writer
                .into_inner()
                .map_err(|e| ServiceError::Io(e.into_error()))?;
            file.sync_all()?;
        }
        Ok(())
    }

    fn url_of(&self, doc: &DocumentId) -> Result<String, ServiceError> {
        let path = self
            .path_of(doc)
            .ok_or_else(|| ServiceError::NotFound(doc.to_string()))?;
        let absolute = fs::canonicalize(path)?;
        Url::from_file_path(&absolute)
            .map(String::from)
            .map_err(|()| {
                ServiceError::Message(format!(
                    "cannot express {} as a file URL",
                    absolute.display()
                ))
            })
    }
}
