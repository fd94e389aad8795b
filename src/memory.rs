//! In-Memory Collaborators
//!
//! ホスト環境を使わずにエンジンを動かすためのメモリ内実装。
//! テスト、ベンチマーク、組み込み用途で使用します。

use std::collections::{HashMap, VecDeque};

use crate::api::HeadingLevel;
use crate::error::ServiceError;
use crate::services::{
    AlertService, DocumentStore, FolderStore, PromptService, ResultDisplay, SelectionSource,
    SheetReader,
};
use crate::types::{
    Block, CellValue, DocumentId, FileId, Folder, FolderId, PromptResponse, Selection,
};

/// 固定の選択範囲
#[derive(Debug, Clone, Copy)]
pub struct FixedSelection(pub Selection);

impl SelectionSource for FixedSelection {
    fn active_selection(&self) -> Selection {
        self.0
    }
}

/// 行のリストで表したシート（1行目がヘッダー）
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    rows: Vec<Vec<CellValue>>,
    fail_reads: bool,
}

impl MemorySheet {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            rows,
            fail_reads: false,
        }
    }

    /// すべての読み取りを失敗させる
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }
}

impl SheetReader for MemorySheet {
    fn read_row(
        &self,
        row: u32,
        from_col: u32,
        num_cols: u32,
    ) -> Result<Vec<CellValue>, ServiceError> {
        if self.fail_reads {
            return Err(ServiceError::Message("sheet is unavailable".to_string()));
        }
        if row == 0 || from_col == 0 {
            return Err(ServiceError::Message(format!(
                "rows and columns start at 1 (got row {}, column {})",
                row, from_col
            )));
        }

        let cells = self.rows.get(row as usize - 1);
        let start = from_col as usize - 1;
        Ok((start..start + num_cols as usize)
            .map(|col| {
                cells
                    .and_then(|cells| cells.get(col))
                    .cloned()
                    .unwrap_or(CellValue::Empty)
            })
            .collect())
    }

    fn last_populated_column(&self) -> u32 {
        self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32
    }
}

/// 決められた応答を順に返す入力ダイアログ
///
/// 応答が尽きた後は`Close`を返します。
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    responses: VecDeque<PromptResponse>,
    /// 表示されたダイアログのタイトル
    pub shown: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(responses: Vec<PromptResponse>) -> Self {
        Self {
            responses: responses.into(),
            shown: Vec::new(),
        }
    }
}

impl PromptService for ScriptedPrompt {
    fn prompt_text(&mut self, title: &str, _placeholder: &str) -> PromptResponse {
        self.shown.push(title.to_string());
        self.responses
            .pop_front()
            .unwrap_or_else(PromptResponse::close)
    }
}

/// 表示されたアラートを記録する
#[derive(Debug, Clone, Default)]
pub struct RecordingAlerts {
    pub messages: Vec<String>,
}

impl AlertService for RecordingAlerts {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// 表示されたリンクを記録する
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    pub links: Vec<String>,
}

impl ResultDisplay for RecordingDisplay {
    fn show_link(&mut self, url: &str) {
        self.links.push(url.to_string());
    }
}

/// メモリ内のフォルダツリー
#[derive(Debug, Clone, Default)]
pub struct MemoryFolderStore {
    /// (親, フォルダ) の挿入順リスト
    folders: Vec<(FolderId, Folder)>,
    files: HashMap<FileId, FolderId>,
    next_id: usize,
    created: usize,
}

impl MemoryFolderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `parent`直下にファイルを登録する
    pub fn add_file(&mut self, parent: &str, name: &str) -> FileId {
        let id = FileId(format!("{}/{}", parent, name));
        self.files.insert(id.clone(), FolderId(parent.to_string()));
        id
    }

    /// `parent`直下に既存のフォルダを登録する（作成数には数えない）
    pub fn add_folder(&mut self, parent: &str, name: &str) -> Folder {
        self.insert(FolderId(parent.to_string()), name)
    }

    /// `create_child`で作成されたフォルダの数
    pub fn created_count(&self) -> usize {
        self.created
    }

    /// `parent`直下のフォルダ
    pub fn children(&self, parent: &FolderId) -> Vec<&Folder> {
        self.folders
            .iter()
            .filter(|(p, _)| p == parent)
            .map(|(_, f)| f)
            .collect()
    }

    fn insert(&mut self, parent: FolderId, name: &str) -> Folder {
        self.next_id += 1;
        let folder = Folder {
            id: FolderId(format!("folder-{}", self.next_id)),
            name: name.to_string(),
        };
        self.folders.push((parent, folder.clone()));
        folder
    }
}

impl FolderStore for MemoryFolderStore {
    fn parent_of(&self, file: &FileId) -> Result<Option<FolderId>, ServiceError> {
        Ok(self.files.get(file).cloned())
    }

    fn find_child_by_name(
        &self,
        folder: &FolderId,
        name: &str,
    ) -> Result<Option<Folder>, ServiceError> {
        Ok(self
            .folders
            .iter()
            .find(|(parent, child)| parent == folder && child.name == name)
            .map(|(_, child)| child.clone()))
    }

    fn create_child(&mut self, folder: &FolderId, name: &str) -> Result<Folder, ServiceError> {
        self.created += 1;
        Ok(self.insert(folder.clone(), name))
    }
}

/// メモリ内のドキュメント
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDocument {
    pub id: DocumentId,
    pub title: String,
    /// 移動先フォルダ（移動前は`None`）
    pub folder: Option<FolderId>,
    pub blocks: Vec<Block>,
    pub committed: bool,
}

/// メモリ内のドキュメントストア
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Vec<MemoryDocument>,
    fail_after_appends: Option<usize>,
    appends: usize,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n`回の追記が成功した後、以降の追記を失敗させる
    pub fn fail_after_appends(mut self, n: usize) -> Self {
        self.fail_after_appends = Some(n);
        self
    }

    /// 作成されたドキュメント（作成順）
    pub fn documents(&self) -> &[MemoryDocument] {
        &self.documents
    }

    fn get_mut(&mut self, doc: &DocumentId) -> Result<&mut MemoryDocument, ServiceError> {
        self.documents
            .iter_mut()
            .find(|d| &d.id == doc)
            .ok_or_else(|| ServiceError::NotFound(doc.to_string()))
    }

    fn append(&mut self, doc: &DocumentId, block: Block) -> Result<(), ServiceError> {
        if self.fail_after_appends.is_some_and(|limit| self.appends >= limit) {
            return Err(ServiceError::Message("append rejected".to_string()));
        }
        self.get_mut(doc)?.blocks.push(block);
        self.appends += 1;
        Ok(())
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn create_document(&mut self, title: &str) -> Result<DocumentId, ServiceError> {
        let id = DocumentId(format!("doc-{}", self.documents.len() + 1));
        self.documents.push(MemoryDocument {
            id: id.clone(),
            title: title.to_string(),
            folder: None,
            blocks: Vec::new(),
            committed: false,
        });
        Ok(id)
    }

    fn move_to(&mut self, doc: &DocumentId, folder: &Folder) -> Result<(), ServiceError> {
        self.get_mut(doc)?.folder = Some(folder.id.clone());
        Ok(())
    }

    fn append_heading(
        &mut self,
        doc: &DocumentId,
        text: &str,
        _level: HeadingLevel,
    ) -> Result<(), ServiceError> {
        self.append(doc, Block::Heading(text.to_string()))
    }

    fn append_paragraph(&mut self, doc: &DocumentId, text: &str) -> Result<(), ServiceError> {
        self.append(doc, Block::Body(text.to_string()))
    }

    fn commit(&mut self, doc: &DocumentId) -> Result<(), ServiceError> {
        self.get_mut(doc)?.committed = true;
        Ok(())
    }

    fn url_of(&self, doc: &DocumentId) -> Result<String, ServiceError> {
        self.documents
            .iter()
            .find(|d| &d.id == doc)
            .map(|d| format!("memory://documents/{}", d.id))
            .ok_or_else(|| ServiceError::NotFound(doc.to_string()))
    }
}
